//! Stage 2: metrics
//!
//! Derives totals, Net Order Value, and budget consumption from the
//! forecasts and purchase orders. Pure arithmetic; cannot fail.

use foresight_domain::utils::helpers::calculate_percentage;
use foresight_domain::AnalysisRecord;

/// Compute totals, NOV, and the budget consumption percentage.
///
/// NOV = total POs issued - total actuals. This is the remaining legal
/// obligation to pay vendors and the minimum floor future forecasts must
/// cover. It may be negative when actual spend already exceeds PO value.
pub fn calculate(record: &mut AnalysisRecord) {
    record.total_base_forecast = record.forecasts.iter().map(|f| f.base_forecast).sum();
    record.total_forecast_with_rollover =
        record.forecasts.iter().map(|f| f.rollover_or_zero()).sum();
    record.total_actuals = record.forecasts.iter().filter_map(|f| f.actual).sum();
    record.total_pos = record.purchase_orders.iter().map(|po| po.amount).sum();

    record.net_order_value = record.total_pos - record.total_actuals;

    record.budget_consumption_percent = if record.total_approved > 0.0 {
        calculate_percentage(record.total_actuals, record.total_approved)
    } else {
        0.0
    };
}
