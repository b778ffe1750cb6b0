//! Stage 1: intake
//!
//! Validates that required input is present, copies project totals into the
//! record, and counts realized/remaining months. The only stage that can
//! move the record to the error state.

use foresight_domain::constants::MONTHS_PER_YEAR;
use foresight_domain::{AnalysisRecord, AnalysisStatus};

/// Validate required input and prime the record for processing.
///
/// On a missing required field the record transitions to
/// [`AnalysisStatus::Error`] and the orchestrator halts; no partial flags
/// or scenarios are produced.
pub fn load(record: &mut AnalysisRecord) {
    if record.request_id.trim().is_empty() {
        fail(record, "request_id");
        return;
    }
    if record.forecasts.is_empty() {
        fail(record, "forecasts");
        return;
    }
    if !(1..=MONTHS_PER_YEAR).contains(&record.current_month) {
        fail(record, "current_month");
        return;
    }

    record.total_budget = record.project.budget;
    record.total_approved = record.project.approved_amount;

    let with_actuals = record.forecasts.iter().filter(|f| f.actual.is_some()).count() as u32;
    record.months_with_actuals = with_actuals;
    record.months_remaining = MONTHS_PER_YEAR.saturating_sub(with_actuals);

    record.status = AnalysisStatus::Processing;
}

fn fail(record: &mut AnalysisRecord, field: &str) {
    tracing::warn!(field, "analysis request rejected: missing required field");
    record.errors.push(format!("Missing required field: {field}"));
    record.status = AnalysisStatus::Error;
}

#[cfg(test)]
mod tests {
    use foresight_domain::{ForecastMonth, ForecastReviewRequest, ProjectInfo};

    use super::*;

    fn record_with(forecasts: Vec<ForecastMonth>) -> AnalysisRecord {
        AnalysisRecord::from_request(ForecastReviewRequest {
            request_id: "req-1".to_string(),
            project: ProjectInfo {
                id: "PRJ-001".to_string(),
                code: "PRJ".to_string(),
                name: "Test".to_string(),
                budget: 120_000.0,
                approved_amount: 100_000.0,
                start_date: "2024-01-01".to_string(),
                anticipated_end_date: "2024-12-31".to_string(),
                status: "active".to_string(),
            },
            fiscal_year: 2024,
            current_month: 4,
            forecasts,
            purchase_orders: vec![],
            reason_codes: vec![],
        })
    }

    fn months(actuals: usize) -> Vec<ForecastMonth> {
        (1..=12)
            .map(|month| ForecastMonth {
                month,
                base_forecast: 1000.0,
                forecast_with_rollover: Some(1000.0),
                actual: if (month as usize) <= actuals { Some(1000.0) } else { None },
            })
            .collect()
    }

    #[test]
    fn primes_totals_and_month_counters() {
        let mut record = record_with(months(3));
        load(&mut record);

        assert_eq!(record.status, AnalysisStatus::Processing);
        assert_eq!(record.total_budget, 120_000.0);
        assert_eq!(record.total_approved, 100_000.0);
        assert_eq!(record.months_with_actuals, 3);
        assert_eq!(record.months_remaining, 9);
    }

    #[test]
    fn missing_request_id_halts_with_error() {
        let mut record = record_with(months(0));
        record.request_id = String::new();
        load(&mut record);

        assert_eq!(record.status, AnalysisStatus::Error);
        assert_eq!(record.errors, vec!["Missing required field: request_id"]);
    }

    #[test]
    fn empty_forecasts_halt_with_error() {
        let mut record = record_with(vec![]);
        load(&mut record);

        assert_eq!(record.status, AnalysisStatus::Error);
        assert!(record.errors[0].contains("forecasts"));
    }
}
