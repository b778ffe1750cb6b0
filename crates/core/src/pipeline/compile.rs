//! Stage 10: response compilation
//!
//! Final stage: stamps the record, marks it completed and assembles the
//! response handed back to the calling system.

use foresight_domain::utils::helpers::current_timestamp;
use foresight_domain::{Analysis, AnalysisRecord, AnalysisStatus, ForecastReviewResponse};

/// Mark the record completed and build the outgoing response.
pub fn finalize(record: &mut AnalysisRecord) -> ForecastReviewResponse {
    record.timestamp = current_timestamp();
    record.status = AnalysisStatus::Completed;

    ForecastReviewResponse {
        request_id: record.request_id.clone(),
        session_id: record.session_id.clone(),
        status: record.status,
        analysis: Analysis {
            summary: record.summary.clone(),
            budget: record.total_budget,
            approved_amount: record.total_approved,
            total_base_forecast: record.total_base_forecast,
            total_forecast_with_rollover: record.total_forecast_with_rollover,
            total_actuals_to_date: record.total_actuals,
            budget_consumption_percent: record.budget_consumption_percent,
            net_order_value: record.net_order_value,
            months_with_actuals: record.months_with_actuals,
            months_remaining: record.months_remaining,
        },
        flags: record.flags.clone(),
        threshold_alerts: record.threshold_alerts.clone(),
        questions: record.questions.clone(),
        scenarios: record.scenarios.clone(),
        explanation: record.explanation.clone(),
        timestamp: record.timestamp.clone(),
    }
}
