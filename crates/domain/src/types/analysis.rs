//! Analysis output types and the pipeline's working record
//!
//! `AnalysisRecord` is the single mutable state threaded through the
//! pipeline stages. It is created once per request, exclusively owned by
//! the orchestrator, and never shared across concurrent runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::forecast::{
    ForecastMonth, ForecastReviewRequest, ProjectInfo, PurchaseOrder, ReasonCode,
};

/// Severity attached to flags and threshold alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

/// Kind of anomaly a flag reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    VarianceExceeded,
    LargePo,
    ProjectLate,
    PoDeliveryExceedsForecast,
}

/// Kind of hard-constraint breach an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdAlertType {
    BudgetThreshold,
    NovConstraint,
}

/// A detected anomaly requiring attention
///
/// Only the fields relevant to the flag's type are populated; the rest
/// stay `None` and are omitted from the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    pub severity: Severity,
    pub message: String,
    // Variance fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_percent: Option<f64>,
    // Purchase order fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_forecast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    // Late project fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anticipated_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_late: Option<i64>,
    // PO delivery fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_ratio: Option<f64>,
}

impl Flag {
    /// A flag with only the common fields set
    pub fn new(flag_type: FlagType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            flag_type,
            severity,
            message: message.into(),
            month: None,
            forecast: None,
            actual: None,
            variance: None,
            variance_percent: None,
            po_number: None,
            po_amount: None,
            monthly_forecast: None,
            ratio: None,
            project_id: None,
            project_name: None,
            anticipated_end_date: None,
            days_late: None,
            delivery_month: None,
            estimated_delivery: None,
            excess_ratio: None,
        }
    }
}

/// A detected breach of a hard business constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdAlert {
    #[serde(rename = "type")]
    pub alert_type: ThresholdAlertType,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nov: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_forecast_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<f64>,
}

/// Variance for one realized month, recorded whether or not it was flagged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthVariance {
    pub month: u32,
    pub forecast: f64,
    pub actual: f64,
    pub variance: f64,
    /// Rounded to 2 decimals
    pub variance_percent: f64,
}

/// Review entry for a purchase order disproportionate to the monthly average
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoAnalysis {
    pub po_number: String,
    pub amount: f64,
    pub monthly_avg: f64,
    /// amount / monthly_avg, rounded to 1 decimal
    pub ratio: f64,
    pub issue_date: String,
    pub status: String,
    pub needs_review: bool,
}

/// Option presented for a reviewer question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), follow_up: None }
    }

    pub fn with_follow_up(
        value: impl Into<String>,
        label: impl Into<String>,
        follow_up: impl Into<String>,
    ) -> Self {
        Self { value: value.into(), label: label.into(), follow_up: Some(follow_up.into()) }
    }
}

/// Clarifying question for the human reviewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub priority: String,
    pub text: String,
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub requires_reason: bool,
}

/// Projected amount for one future month within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub month: u32,
    pub amount: f64,
}

/// Suggested reason code with contribution percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedReasonCode {
    pub code: String,
    /// 0-100
    pub suggested_percent: u32,
}

/// A hypothetical revised forecast projection for remaining months
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub name: String,
    pub description: String,
    /// Future months only, order preserved from the 12-month sequence
    pub forecasts: Vec<ScenarioForecast>,
    pub total_year_forecast: f64,
    pub variance_from_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_reason_codes: Option<Vec<SuggestedReasonCode>>,
}

/// Summary metrics block of the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub budget: f64,
    pub approved_amount: f64,
    pub total_base_forecast: f64,
    pub total_forecast_with_rollover: f64,
    pub total_actuals_to_date: f64,
    pub budget_consumption_percent: f64,
    pub net_order_value: f64,
    pub months_with_actuals: u32,
    pub months_remaining: u32,
}

/// Pipeline lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Initialized,
    Processing,
    Completed,
    Error,
}

/// Working state for one analysis run
///
/// Owns the immutable inputs, the derived metrics, and the append-only
/// result collections. Stages mutate it in a fixed order; no stage
/// re-reads external state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    // Request information
    pub request_id: String,
    pub session_id: String,

    // Project data (immutable input)
    pub project: ProjectInfo,
    pub fiscal_year: i32,
    pub current_month: u32,
    pub forecasts: Vec<ForecastMonth>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub available_reason_codes: Vec<ReasonCode>,

    // Calculated metrics
    pub total_budget: f64,
    pub total_approved: f64,
    pub total_base_forecast: f64,
    pub total_forecast_with_rollover: f64,
    pub total_actuals: f64,
    pub budget_consumption_percent: f64,
    pub net_order_value: f64,
    pub total_pos: f64,
    pub months_with_actuals: u32,
    pub months_remaining: u32,

    // Analysis results
    pub variances: Vec<MonthVariance>,
    pub flags: Vec<Flag>,
    pub threshold_alerts: Vec<ThresholdAlert>,
    pub po_analysis: Vec<PoAnalysis>,

    // Outputs
    pub scenarios: Vec<Scenario>,
    pub questions: Vec<Question>,
    pub explanation: String,
    pub summary: String,

    // Status
    pub status: AnalysisStatus,
    pub errors: Vec<String>,
    pub timestamp: String,
}

impl AnalysisRecord {
    /// Initialize a record from an incoming request with a fresh session id
    pub fn from_request(request: ForecastReviewRequest) -> Self {
        Self {
            request_id: request.request_id,
            session_id: Uuid::new_v4().to_string(),
            project: request.project,
            fiscal_year: request.fiscal_year,
            current_month: request.current_month,
            forecasts: request.forecasts,
            purchase_orders: request.purchase_orders,
            available_reason_codes: request.reason_codes,
            total_budget: 0.0,
            total_approved: 0.0,
            total_base_forecast: 0.0,
            total_forecast_with_rollover: 0.0,
            total_actuals: 0.0,
            budget_consumption_percent: 0.0,
            net_order_value: 0.0,
            total_pos: 0.0,
            months_with_actuals: 0,
            months_remaining: 0,
            variances: Vec::new(),
            flags: Vec::new(),
            threshold_alerts: Vec::new(),
            po_analysis: Vec::new(),
            scenarios: Vec::new(),
            questions: Vec::new(),
            explanation: String::new(),
            summary: String::new(),
            status: AnalysisStatus::Initialized,
            errors: Vec::new(),
            timestamp: String::new(),
        }
    }

    /// Forecast months that have not been realized yet, in input order
    pub fn future_months(&self) -> impl Iterator<Item = &ForecastMonth> {
        self.forecasts.iter().filter(|f| f.is_future())
    }
}

/// Completed analysis retained for later retrieval by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub session_id: String,
    pub request_id: String,
    pub project_id: String,
    pub project_name: String,
    pub response: crate::types::forecast::ForecastReviewResponse,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
