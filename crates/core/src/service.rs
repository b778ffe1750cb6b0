//! Forecast analysis service - runs the pipeline stages in fixed order

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use foresight_domain::config::LlmConfig;
use foresight_domain::utils::helpers::current_timestamp;
use foresight_domain::{
    Analysis, AnalysisRecord, AnalysisSession, AnalysisStatus, ForecastReviewRequest,
    ForecastReviewResponse, Result,
};
use tracing::{error, info};

use crate::pipeline::{
    compile, explanation, intake, metrics, po_review, project_status, questions, scenarios,
    thresholds, variance,
};
use crate::ports::{ExplanationGenerator, SessionStore};

/// Orchestrates one analysis run over an exclusively-owned record.
///
/// Stages execute in fixed order; intake is the only stage that can move
/// the record to the error state, and doing so halts the run before any
/// flags or scenarios are produced.
pub struct ForecastAnalysisService {
    generator: Arc<dyn ExplanationGenerator>,
    sessions: Arc<dyn SessionStore>,
    llm: LlmConfig,
}

impl ForecastAnalysisService {
    /// Create a new analysis service
    pub fn new(
        generator: Arc<dyn ExplanationGenerator>,
        sessions: Arc<dyn SessionStore>,
        llm: LlmConfig,
    ) -> Self {
        Self { generator, sessions, llm }
    }

    /// Analyze a forecast review request as of today's date.
    pub async fn analyze(&self, request: ForecastReviewRequest) -> Result<ForecastReviewResponse> {
        self.analyze_as_of(request, Utc::now().date_naive()).await
    }

    /// Analyze a forecast review request against an explicit current date.
    ///
    /// Lateness checks compare project dates to `today`; passing it in
    /// keeps runs reproducible.
    pub async fn analyze_as_of(
        &self,
        request: ForecastReviewRequest,
        today: NaiveDate,
    ) -> Result<ForecastReviewResponse> {
        request.validate()?;

        info!(
            request_id = %request.request_id,
            project_id = %request.project.id,
            project_name = %request.project.name,
            "processing forecast review request"
        );

        let mut record = AnalysisRecord::from_request(request);

        intake::load(&mut record);
        if record.status == AnalysisStatus::Error {
            return Ok(error_response(&mut record));
        }

        metrics::calculate(&mut record);
        variance::detect(&mut record);
        thresholds::check(&mut record);
        project_status::check(&mut record, today);
        po_review::analyze(&mut record);
        scenarios::generate(&mut record);
        questions::build(&mut record);
        explanation::synthesize(&mut record, self.generator.as_ref(), &self.llm).await;

        let response = compile::finalize(&mut record);

        info!(
            request_id = %response.request_id,
            session_id = %response.session_id,
            scenarios = response.scenarios.len(),
            flags = response.flags.len(),
            "forecast review completed"
        );

        self.store_session(&record, &response).await;

        Ok(response)
    }

    /// Retrieve a previously stored analysis session.
    pub async fn get_session(&self, session_id: &str) -> Result<Option<AnalysisSession>> {
        self.sessions.get_session(session_id).await
    }

    // Write-once, fire-and-forget: a store failure must not fail the run.
    async fn store_session(&self, record: &AnalysisRecord, response: &ForecastReviewResponse) {
        let session = AnalysisSession {
            session_id: record.session_id.clone(),
            request_id: record.request_id.clone(),
            project_id: record.project.id.clone(),
            project_name: record.project.name.clone(),
            response: response.clone(),
            created_at: Utc::now(),
        };

        if let Err(err) = self.sessions.save_session(session).await {
            error!(error = %err, session_id = %record.session_id, "failed to store session");
        }
    }
}

/// Response for a run rejected at intake: status error, no partial results.
fn error_response(record: &mut AnalysisRecord) -> ForecastReviewResponse {
    record.timestamp = current_timestamp();

    ForecastReviewResponse {
        request_id: record.request_id.clone(),
        session_id: record.session_id.clone(),
        status: AnalysisStatus::Error,
        analysis: Analysis {
            summary: record.errors.join("; "),
            budget: record.total_budget,
            approved_amount: record.total_approved,
            total_base_forecast: 0.0,
            total_forecast_with_rollover: 0.0,
            total_actuals_to_date: 0.0,
            budget_consumption_percent: 0.0,
            net_order_value: 0.0,
            months_with_actuals: 0,
            months_remaining: 0,
        },
        flags: Vec::new(),
        threshold_alerts: Vec::new(),
        questions: Vec::new(),
        scenarios: Vec::new(),
        explanation: String::new(),
        timestamp: record.timestamp.clone(),
    }
}
