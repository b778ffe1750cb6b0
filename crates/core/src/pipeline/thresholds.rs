//! Stage 4: threshold checks
//!
//! Two hard business constraints: the 90% budget-consumption ceiling and
//! the NOV floor (future forecasts must cover remaining PO obligations).
//! Produces alerts only, never flags.

use foresight_domain::constants::BUDGET_CONSUMPTION_ALERT_PERCENT;
use foresight_domain::utils::helpers::{format_currency_whole, round2};
use foresight_domain::{AnalysisRecord, Severity, ThresholdAlert, ThresholdAlertType};

/// Evaluate the budget ceiling and NOV floor against computed metrics.
/// Budget alert is emitted first; output order is part of the contract.
pub fn check(record: &mut AnalysisRecord) {
    let mut alerts = Vec::new();

    if record.budget_consumption_percent >= BUDGET_CONSUMPTION_ALERT_PERCENT {
        alerts.push(ThresholdAlert {
            alert_type: ThresholdAlertType::BudgetThreshold,
            severity: Severity::High,
            message: format!(
                "Budget consumption at {:.1}% - exceeds 90% threshold",
                record.budget_consumption_percent
            ),
            threshold: Some(BUDGET_CONSUMPTION_ALERT_PERCENT),
            current: Some(round2(record.budget_consumption_percent)),
            nov: None,
            future_forecast_total: None,
            shortfall: None,
        });
    }

    // Future forecasts must be >= NOV: the committed PO value not yet
    // realized still has to be paid out of the remaining months.
    let future_total: f64 =
        record.forecasts.iter().filter(|f| f.is_future()).map(|f| f.rollover_or_zero()).sum();

    if future_total < record.net_order_value {
        let shortfall = record.net_order_value - future_total;
        alerts.push(ThresholdAlert {
            alert_type: ThresholdAlertType::NovConstraint,
            severity: Severity::High,
            message: format!(
                "Future forecasts ({}) are below NOV ({}). Shortfall: {}",
                format_currency_whole(future_total),
                format_currency_whole(record.net_order_value),
                format_currency_whole(shortfall)
            ),
            threshold: None,
            current: None,
            nov: Some(record.net_order_value),
            future_forecast_total: Some(future_total),
            shortfall: Some(shortfall),
        });
    }

    record.threshold_alerts = alerts;
}

#[cfg(test)]
mod tests {
    use foresight_domain::{ForecastMonth, ForecastReviewRequest, ProjectInfo};

    use super::*;

    fn record(consumption: f64, nov: f64, future_monthly: f64, realized: u32) -> AnalysisRecord {
        let forecasts = (1..=12)
            .map(|month| ForecastMonth {
                month,
                base_forecast: future_monthly,
                forecast_with_rollover: Some(future_monthly),
                actual: if month <= realized { Some(future_monthly) } else { None },
            })
            .collect();

        let mut r = AnalysisRecord::from_request(ForecastReviewRequest {
            request_id: "req-1".to_string(),
            project: ProjectInfo {
                id: "PRJ-001".to_string(),
                code: "PRJ".to_string(),
                name: "Test".to_string(),
                budget: 12_000.0,
                approved_amount: 12_000.0,
                start_date: "2024-01-01".to_string(),
                anticipated_end_date: "2024-12-31".to_string(),
                status: "active".to_string(),
            },
            fiscal_year: 2024,
            current_month: realized + 1,
            forecasts,
            purchase_orders: vec![],
            reason_codes: vec![],
        });
        r.budget_consumption_percent = consumption;
        r.net_order_value = nov;
        r
    }

    #[test]
    fn alerts_at_ninety_percent_consumption() {
        let mut r = record(90.0, 0.0, 1000.0, 1);
        check(&mut r);

        assert_eq!(r.threshold_alerts.len(), 1);
        let alert = &r.threshold_alerts[0];
        assert_eq!(alert.alert_type, ThresholdAlertType::BudgetThreshold);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.threshold, Some(90.0));
        assert_eq!(alert.current, Some(90.0));
    }

    #[test]
    fn no_alert_below_ninety_percent() {
        let mut r = record(89.99, 0.0, 1000.0, 1);
        check(&mut r);
        assert!(r.threshold_alerts.is_empty());
    }

    #[test]
    fn nov_floor_breach_reports_shortfall() {
        // 9 future months of 1000 = 9000 future total, NOV 10_000
        let mut r = record(0.0, 10_000.0, 1000.0, 3);
        check(&mut r);

        assert_eq!(r.threshold_alerts.len(), 1);
        let alert = &r.threshold_alerts[0];
        assert_eq!(alert.alert_type, ThresholdAlertType::NovConstraint);
        assert_eq!(alert.future_forecast_total, Some(9000.0));
        assert_eq!(alert.shortfall, Some(1000.0));
        assert!(alert.message.contains("$9,000"));
    }

    #[test]
    fn budget_alert_ordered_before_nov_alert() {
        let mut r = record(95.0, 10_000.0, 1000.0, 3);
        check(&mut r);

        assert_eq!(r.threshold_alerts.len(), 2);
        assert_eq!(r.threshold_alerts[0].alert_type, ThresholdAlertType::BudgetThreshold);
        assert_eq!(r.threshold_alerts[1].alert_type, ThresholdAlertType::NovConstraint);
    }

    #[test]
    fn future_total_treats_missing_rollover_as_zero() {
        let mut r = record(0.0, 5000.0, 1000.0, 3);
        for f in r.forecasts.iter_mut().filter(|f| f.is_future()) {
            f.forecast_with_rollover = None;
        }
        check(&mut r);

        let alert = &r.threshold_alerts[0];
        assert_eq!(alert.future_forecast_total, Some(0.0));
        assert_eq!(alert.shortfall, Some(5000.0));
    }
}
