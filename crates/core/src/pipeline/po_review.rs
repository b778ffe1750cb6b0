//! Stage 6: purchase order review
//!
//! Flags purchase orders disproportionate to the average monthly base
//! forecast. These entries later drive the large-PO reviewer question and
//! the "Spread Large POs" scenario.

use foresight_domain::constants::{LARGE_PO_MULTIPLIER, MONTHS_PER_YEAR};
use foresight_domain::utils::helpers::{format_currency_whole, round1};
use foresight_domain::{AnalysisRecord, Flag, FlagType, PoAnalysis, Severity};

/// Flag each PO larger than twice the average monthly forecast.
/// Large-PO flags always carry high severity.
pub fn analyze(record: &mut AnalysisRecord) {
    let avg_monthly = if record.total_base_forecast > 0.0 {
        record.total_base_forecast / f64::from(MONTHS_PER_YEAR)
    } else {
        0.0
    };

    let mut po_analysis = Vec::new();
    let mut flags = Vec::new();

    for po in &record.purchase_orders {
        if avg_monthly > 0.0 && po.amount > avg_monthly * LARGE_PO_MULTIPLIER {
            let ratio = round1(po.amount / avg_monthly);

            po_analysis.push(PoAnalysis {
                po_number: po.po_number.clone(),
                amount: po.amount,
                monthly_avg: avg_monthly,
                ratio,
                issue_date: po.issue_date.clone(),
                status: po.status.clone(),
                needs_review: true,
            });

            let mut flag = Flag::new(
                FlagType::LargePo,
                Severity::High,
                format!(
                    "PO {} ({}) is {ratio:.1}x larger than average monthly forecast ({})",
                    po.po_number,
                    format_currency_whole(po.amount),
                    format_currency_whole(avg_monthly)
                ),
            );
            flag.po_number = Some(po.po_number.clone());
            flag.po_amount = Some(po.amount);
            flag.monthly_forecast = Some(avg_monthly);
            flag.ratio = Some(ratio);
            flags.push(flag);
        }
    }

    record.po_analysis = po_analysis;
    record.flags.extend(flags);
}

#[cfg(test)]
mod tests {
    use foresight_domain::{
        ForecastMonth, ForecastReviewRequest, ProjectInfo, PurchaseOrder,
    };

    use super::*;

    fn record(total_base: f64, amounts: &[f64]) -> AnalysisRecord {
        let forecasts = (1..=12)
            .map(|month| ForecastMonth {
                month,
                base_forecast: total_base / 12.0,
                forecast_with_rollover: Some(total_base / 12.0),
                actual: None,
            })
            .collect();

        let purchase_orders = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| PurchaseOrder {
                po_number: format!("PO-{:03}", i + 1),
                amount: *amount,
                issue_date: "2024-01-15".to_string(),
                estimated_delivery: "2024-06-30".to_string(),
                actual_delivery: None,
                status: "open".to_string(),
            })
            .collect();

        let mut r = AnalysisRecord::from_request(ForecastReviewRequest {
            request_id: "req-1".to_string(),
            project: ProjectInfo {
                id: "PRJ-001".to_string(),
                code: "PRJ".to_string(),
                name: "Test".to_string(),
                budget: total_base,
                approved_amount: total_base,
                start_date: "2024-01-01".to_string(),
                anticipated_end_date: "2024-12-31".to_string(),
                status: "active".to_string(),
            },
            fiscal_year: 2024,
            current_month: 1,
            forecasts,
            purchase_orders,
            reason_codes: vec![],
        });
        r.total_base_forecast = total_base;
        r
    }

    #[test]
    fn flags_po_above_twice_monthly_average() {
        let mut r = record(12_000.0, &[8000.0]);
        analyze(&mut r);

        assert_eq!(r.po_analysis.len(), 1);
        assert_eq!(r.po_analysis[0].ratio, 8.0);
        assert!(r.po_analysis[0].needs_review);

        assert_eq!(r.flags.len(), 1);
        let flag = &r.flags[0];
        assert_eq!(flag.flag_type, FlagType::LargePo);
        assert_eq!(flag.severity, Severity::High);
        assert_eq!(flag.ratio, Some(8.0));
    }

    #[test]
    fn po_at_twice_average_is_not_flagged() {
        let mut r = record(12_000.0, &[2000.0]);
        analyze(&mut r);
        assert!(r.po_analysis.is_empty());
        assert!(r.flags.is_empty());
    }

    #[test]
    fn zero_forecast_disables_the_check() {
        let mut r = record(0.0, &[50_000.0]);
        analyze(&mut r);
        assert!(r.flags.is_empty());
    }

    #[test]
    fn flags_keep_input_order() {
        let mut r = record(12_000.0, &[5000.0, 100.0, 3000.0]);
        analyze(&mut r);

        assert_eq!(r.flags.len(), 2);
        assert_eq!(r.flags[0].po_number.as_deref(), Some("PO-001"));
        assert_eq!(r.flags[1].po_number.as_deref(), Some("PO-003"));
    }

    #[test]
    fn message_carries_ratio_and_average() {
        let mut r = record(12_000.0, &[8000.0]);
        analyze(&mut r);
        assert_eq!(
            r.flags[0].message,
            "PO PO-001 ($8,000) is 8.0x larger than average monthly forecast ($1,000)"
        );
    }
}
