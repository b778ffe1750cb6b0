//! Input records and the external request/response contract
//!
//! These shapes mirror what the financial-planning system sends and receives.
//! Input records are immutable once loaded; the pipeline never mutates a
//! forecast month or purchase order.

use serde::{Deserialize, Serialize};

use crate::constants::MONTHS_PER_YEAR;
use crate::errors::{ForesightError, Result};
use crate::types::analysis::{Analysis, AnalysisStatus, Flag, Question, Scenario, ThresholdAlert};

/// Project master data supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Total project budget, >= 0
    pub budget: f64,
    /// Approved amount, >= 0; the denominator of budget consumption
    pub approved_amount: f64,
    pub start_date: String,
    /// `YYYY-MM-DD`; unparseable values disable the lateness check
    pub anticipated_end_date: String,
    /// Free text; "complete"/"completed"/"closed" (case-insensitive) means
    /// the project is finished
    pub status: String,
}

impl ProjectInfo {
    /// Whether the project status marks it as finished
    pub fn is_finished(&self) -> bool {
        matches!(self.status.to_lowercase().as_str(), "complete" | "completed" | "closed")
    }
}

/// Forecast data for a single month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastMonth {
    /// Calendar month 1-12, unique within the 12-element sequence
    pub month: u32,
    /// Original forecast before rollover adjustment, >= 0
    pub base_forecast: f64,
    /// Forecast carrying forward unused budget from prior months; supplied
    /// by the caller, never computed here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_with_rollover: Option<f64>,
    /// Realized spend; absent means the month has not happened yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
}

impl ForecastMonth {
    /// Rollover-adjusted forecast, falling back to the base forecast when
    /// no rollover value was supplied. Used by variance detection and the
    /// PO delivery check.
    pub fn effective_forecast(&self) -> f64 {
        self.forecast_with_rollover.unwrap_or(self.base_forecast)
    }

    /// Rollover-adjusted forecast treating absence as zero. Used by the
    /// totals, the NOV floor check, and scenario projection.
    pub fn rollover_or_zero(&self) -> f64 {
        self.forecast_with_rollover.unwrap_or(0.0)
    }

    /// Whether the month is still in the future (no actual recorded)
    pub fn is_future(&self) -> bool {
        self.actual.is_none()
    }
}

/// Purchase order information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_number: String,
    /// Committed amount, >= 0
    pub amount: f64,
    pub issue_date: String,
    /// `YYYY-MM-DD`; unparseable values skip the delivery check for this PO
    pub estimated_delivery: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<String>,
    /// open / delivered / cancelled / closed, case-insensitive
    pub status: String,
}

impl PurchaseOrder {
    /// Whether the PO is still pending delivery
    pub fn is_open(&self) -> bool {
        !matches!(self.status.to_lowercase().as_str(), "delivered" | "cancelled" | "closed")
    }
}

/// Reason code for forecast adjustments; passed through, never interpreted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonCode {
    pub code: String,
    pub description: String,
}

/// Request to analyze a project's forecast
///
/// This is what the financial-planning system sends to Foresight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReviewRequest {
    /// Unique request identifier from the caller
    pub request_id: String,
    pub project: ProjectInfo,
    pub fiscal_year: i32,
    /// Current month number in the fiscal year, 1-12
    pub current_month: u32,
    /// Exactly 12 entries, one per calendar month
    pub forecasts: Vec<ForecastMonth>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub reason_codes: Vec<ReasonCode>,
}

impl ForecastReviewRequest {
    /// Validate the structural invariants the pipeline relies on: a
    /// non-empty request id, a plausible fiscal year and current month,
    /// and exactly 12 forecast months covering 1-12 without duplicates.
    ///
    /// # Errors
    /// Returns `ForesightError::InvalidInput` describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.request_id.trim().is_empty() {
            return Err(ForesightError::InvalidInput("request_id must not be empty".into()));
        }
        if !(2000..=2100).contains(&self.fiscal_year) {
            return Err(ForesightError::InvalidInput(format!(
                "fiscal_year {} out of range 2000-2100",
                self.fiscal_year
            )));
        }
        if !(1..=MONTHS_PER_YEAR).contains(&self.current_month) {
            return Err(ForesightError::InvalidInput(format!(
                "current_month {} out of range 1-12",
                self.current_month
            )));
        }
        if self.forecasts.len() != MONTHS_PER_YEAR as usize {
            return Err(ForesightError::InvalidInput(format!(
                "expected 12 forecast months, got {}",
                self.forecasts.len()
            )));
        }
        let mut seen = [false; MONTHS_PER_YEAR as usize + 1];
        for f in &self.forecasts {
            if !(1..=MONTHS_PER_YEAR).contains(&f.month) {
                return Err(ForesightError::InvalidInput(format!(
                    "forecast month {} out of range 1-12",
                    f.month
                )));
            }
            if seen[f.month as usize] {
                return Err(ForesightError::InvalidInput(format!(
                    "duplicate forecast month {}",
                    f.month
                )));
            }
            seen[f.month as usize] = true;
        }
        Ok(())
    }
}

/// Response from a forecast review
///
/// This is what Foresight returns to the financial-planning system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReviewResponse {
    /// Original request id from the input
    pub request_id: String,
    /// Analysis session identifier (assigned per run)
    pub session_id: String,
    pub status: AnalysisStatus,
    pub analysis: Analysis,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub threshold_alerts: Vec<ThresholdAlert>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    /// Narrative explanation (model-generated or local fallback)
    pub explanation: String,
    /// ISO-8601 UTC timestamp of response generation
    pub timestamp: String,
}
