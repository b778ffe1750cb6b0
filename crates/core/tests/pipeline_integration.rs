//! End-to-end pipeline runs over realistic forecast review requests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use foresight_core::{ExplanationGenerator, ForecastAnalysisService, SessionStore};
use foresight_domain::config::LlmConfig;
use foresight_domain::{
    AnalysisSession, AnalysisStatus, FlagType, ForecastMonth, ForecastReviewRequest,
    ForesightError, ProjectInfo, PurchaseOrder, Result, Severity, ThresholdAlertType,
};
use parking_lot::Mutex;

struct OfflineGenerator;

#[async_trait]
impl ExplanationGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String> {
        Err(ForesightError::Llm("connection refused".to_string()))
    }
}

#[derive(Default)]
struct RecordingStore {
    sessions: Mutex<Vec<AnalysisSession>>,
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn save_session(&self, session: AnalysisSession) -> Result<()> {
        self.sessions.lock().push(session);
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<AnalysisSession>> {
        Ok(self.sessions.lock().iter().find(|s| s.session_id == session_id).cloned())
    }
}

fn service() -> (ForecastAnalysisService, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    let svc = ForecastAnalysisService::new(
        Arc::new(OfflineGenerator),
        store.clone(),
        LlmConfig::default(),
    );
    (svc, store)
}

fn project(budget: f64) -> ProjectInfo {
    ProjectInfo {
        id: "PRJ-001".to_string(),
        code: "WHX".to_string(),
        name: "Warehouse Expansion".to_string(),
        budget,
        approved_amount: budget,
        start_date: "2024-01-01".to_string(),
        anticipated_end_date: "2025-06-30".to_string(),
        status: "active".to_string(),
    }
}

fn months(
    rollover: f64,
    actuals: &[f64],
) -> Vec<ForecastMonth> {
    (1..=12)
        .map(|month| ForecastMonth {
            month,
            base_forecast: rollover,
            forecast_with_rollover: Some(rollover),
            actual: actuals.get(month as usize - 1).copied(),
        })
        .collect()
}

fn request(forecasts: Vec<ForecastMonth>, pos: Vec<PurchaseOrder>) -> ForecastReviewRequest {
    let current_month = forecasts.iter().filter(|f| f.actual.is_some()).count() as u32 + 1;
    ForecastReviewRequest {
        request_id: "req-e2e".to_string(),
        project: project(12_000.0),
        fiscal_year: 2024,
        current_month: current_month.min(12),
        forecasts,
        purchase_orders: pos,
        reason_codes: vec![],
    }
}

fn po(number: &str, amount: f64) -> PurchaseOrder {
    PurchaseOrder {
        po_number: number.to_string(),
        amount,
        issue_date: "2024-01-15".to_string(),
        estimated_delivery: "2024-06-30".to_string(),
        actual_delivery: None,
        status: "open".to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 15).expect("valid date")
}

#[tokio::test]
async fn budget_at_ninety_percent_raises_a_threshold_alert() {
    let (svc, _) = service();

    // One realized month consuming 90% of a 12k budget.
    let forecasts = months(1000.0, &[10_800.0]);
    let response = svc.analyze_as_of(request(forecasts, vec![]), today()).await.unwrap();

    assert_eq!(response.status, AnalysisStatus::Completed);
    assert_eq!(response.analysis.budget_consumption_percent, 90.0);

    let alert = response
        .threshold_alerts
        .iter()
        .find(|a| a.alert_type == ThresholdAlertType::BudgetThreshold)
        .expect("budget threshold alert");
    assert_eq!(alert.current, Some(90.0));
    assert_eq!(alert.threshold, Some(90.0));
    assert_eq!(alert.severity, Severity::High);

    let question = response
        .questions
        .iter()
        .find(|q| q.question_type == "threshold_alert")
        .expect("threshold question");
    assert!(question.text.contains("reached 90.0%, exceeding the 90% threshold"));
}

#[tokio::test]
async fn eight_thousand_dollar_po_is_flagged_at_ratio_eight() {
    let (svc, _) = service();

    // 12 months of 1000, no actuals, one 8k PO: avg monthly = 1000.
    let forecasts = months(1000.0, &[]);
    let response =
        svc.analyze_as_of(request(forecasts, vec![po("PO-400", 8000.0)]), today()).await.unwrap();

    let flag = response
        .flags
        .iter()
        .find(|f| f.flag_type == FlagType::LargePo)
        .expect("large_po flag");
    assert_eq!(flag.severity, Severity::High);
    assert_eq!(flag.ratio, Some(8.0));
    assert_eq!(flag.po_number.as_deref(), Some("PO-400"));

    let question = response
        .questions
        .iter()
        .find(|q| q.question_type == "large_po_review")
        .expect("large PO question");
    assert_eq!(question.question_id, "q1");
    assert!(question.text.contains("PO-400"));
    assert!(question.text.contains("$8,000"));
}

#[tokio::test]
async fn net_order_value_subtracts_actuals_from_open_pos() {
    let (svc, _) = service();

    // Actuals 1050 + 1200 + 900 = 3150, one open 9k PO: NOV = 5850.
    let forecasts = months(1000.0, &[1050.0, 1200.0, 900.0]);
    let response =
        svc.analyze_as_of(request(forecasts, vec![po("PO-900", 9000.0)]), today()).await.unwrap();

    assert_eq!(response.analysis.net_order_value, 5850.0);
    assert_eq!(response.analysis.total_actuals_to_date, 3150.0);
    assert_eq!(response.analysis.months_with_actuals, 3);
    assert_eq!(response.analysis.months_remaining, 9);
}

#[tokio::test]
async fn no_change_scenario_covers_exactly_the_unrealized_months() {
    let (svc, _) = service();

    let forecasts = months(1000.0, &[1000.0, 1000.0, 1000.0]);
    let response = svc.analyze_as_of(request(forecasts, vec![]), today()).await.unwrap();

    let no_change = &response.scenarios[0];
    assert_eq!(no_change.scenario_id, "scenario-1");
    assert_eq!(no_change.name, "No Change");

    let scenario_months: Vec<u32> = no_change.forecasts.iter().map(|f| f.month).collect();
    assert_eq!(scenario_months, vec![4, 5, 6, 7, 8, 9, 10, 11, 12]);
    assert_eq!(no_change.total_year_forecast, 12_000.0);
    assert_eq!(no_change.variance_from_budget, 0.0);
}

#[tokio::test]
async fn spread_scenario_divides_large_pos_across_remaining_months() {
    let (svc, _) = service();

    let forecasts = months(1000.0, &[1000.0, 1000.0, 1000.0]);
    let response =
        svc.analyze_as_of(request(forecasts, vec![po("PO-400", 9000.0)]), today()).await.unwrap();

    let spread = response
        .scenarios
        .iter()
        .find(|s| s.scenario_id == "scenario-2")
        .expect("spread scenario");
    assert_eq!(spread.name, "Spread Large POs");
    // 9000 over 9 remaining months.
    assert_eq!(spread.forecasts.len(), 9);
    assert!(spread.forecasts.iter().all(|f| f.amount == 1000.0));
    assert!(spread.description.contains("$9,000 across 9 months"));
    assert!(spread.description.contains("$1,000/month"));
}

#[tokio::test]
async fn explanation_falls_back_when_the_model_is_unreachable() {
    let (svc, _) = service();

    let forecasts = months(1000.0, &[1000.0]);
    let response = svc.analyze_as_of(request(forecasts, vec![]), today()).await.unwrap();

    assert!(response.explanation.starts_with("The project is"));
    assert!(response.explanation.contains("Review the scenarios provided"));
    assert!(response
        .analysis
        .summary
        .starts_with("Budget analysis for Warehouse Expansion:"));
}

#[tokio::test]
async fn completed_sessions_are_stored_and_retrievable() {
    let (svc, store) = service();

    let forecasts = months(1000.0, &[1000.0]);
    let response = svc.analyze_as_of(request(forecasts, vec![]), today()).await.unwrap();

    let stored = store.sessions.lock().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].session_id, response.session_id);
    assert_eq!(stored[0].project_id, "PRJ-001");

    let fetched = svc.get_session(&response.session_id).await.unwrap().expect("session");
    assert_eq!(fetched.request_id, "req-e2e");
}

#[tokio::test]
async fn identical_input_and_date_yield_identical_findings() {
    let (svc, _) = service();

    let forecasts = months(1000.0, &[1050.0, 1200.0, 900.0]);
    let req = request(forecasts, vec![po("PO-900", 9000.0)]);

    let first = svc.analyze_as_of(req.clone(), today()).await.unwrap();
    let second = svc.analyze_as_of(req, today()).await.unwrap();

    assert_eq!(
        serde_json::to_value(&first.flags).unwrap(),
        serde_json::to_value(&second.flags).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&first.threshold_alerts).unwrap(),
        serde_json::to_value(&second.threshold_alerts).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&first.scenarios).unwrap(),
        serde_json::to_value(&second.scenarios).unwrap()
    );
    assert_eq!(first.analysis.net_order_value, second.analysis.net_order_value);
    assert_ne!(first.session_id, second.session_id);
}

#[tokio::test]
async fn run_is_stamped_with_a_utc_timestamp() {
    let (svc, _) = service();

    let before = Utc::now();
    let forecasts = months(1000.0, &[1000.0]);
    let response = svc.analyze_as_of(request(forecasts, vec![]), today()).await.unwrap();

    let stamp = chrono::DateTime::parse_from_rfc3339(&response.timestamp).expect("rfc3339");
    assert!(stamp.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
}
