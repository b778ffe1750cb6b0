//! Stage 3: variance detection
//!
//! Compares actuals to the rollover-adjusted forecast for every realized
//! month. Every evaluated month is recorded for downstream scenario use;
//! only overspend beyond the threshold produces a flag.

use foresight_domain::constants::{
    VARIANCE_FLAG_THRESHOLD_PERCENT, VARIANCE_HIGH_SEVERITY_PERCENT,
};
use foresight_domain::utils::helpers::{format_currency_whole, round2};
use foresight_domain::{AnalysisRecord, Flag, FlagType, MonthVariance, Severity};

/// Evaluate each month with a present actual and flag overspends.
///
/// The comparison is signed: only `variance_percent > 5` flags. Months
/// where actuals came in under forecast are recorded but never flagged;
/// only overspend is treated as risk.
pub fn detect(record: &mut AnalysisRecord) {
    let mut variances = Vec::new();
    let mut flags = Vec::new();

    for f in &record.forecasts {
        let Some(actual) = f.actual else {
            continue; // No actual yet
        };

        let forecast = f.effective_forecast();
        let variance = actual - forecast;
        let variance_percent =
            if forecast > 0.0 { (variance / forecast) * 100.0 } else { 0.0 };

        variances.push(MonthVariance {
            month: f.month,
            forecast,
            actual,
            variance,
            variance_percent: round2(variance_percent),
        });

        if variance_percent > VARIANCE_FLAG_THRESHOLD_PERCENT {
            let severity = if variance_percent > VARIANCE_HIGH_SEVERITY_PERCENT {
                Severity::High
            } else {
                Severity::Medium
            };
            let mut flag = Flag::new(
                FlagType::VarianceExceeded,
                severity,
                format!(
                    "Month {} actuals ({}) exceeded forecast ({}) by {:.1}%",
                    f.month,
                    format_currency_whole(actual),
                    format_currency_whole(forecast),
                    variance_percent.abs()
                ),
            );
            flag.month = Some(f.month);
            flag.forecast = Some(forecast);
            flag.actual = Some(actual);
            flag.variance = Some(variance);
            flag.variance_percent = Some(round2(variance_percent));
            flags.push(flag);
        }
    }

    record.variances = variances;
    record.flags.extend(flags);
}
