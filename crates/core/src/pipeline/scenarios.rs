//! Stage 7: scenario generation
//!
//! Produces 1-3 alternative forecast projections for the remaining months.
//! Every scenario respects the same financial invariants as the base data;
//! all of them are advisory pending human confirmation.

use foresight_domain::utils::helpers::{format_currency_whole, round2};
use foresight_domain::{
    AnalysisRecord, Scenario, ScenarioForecast, SuggestedReasonCode,
};

/// Generate the forecast scenarios.
///
/// "No Change" is always present. "Spread Large POs" requires at least one
/// large-PO review entry and a remaining month. "Adjust for Variance
/// Trend" requires net positive observed variance and a remaining month.
pub fn generate(record: &mut AnalysisRecord) {
    let mut scenarios = Vec::new();

    let future: Vec<(u32, f64)> =
        record.future_months().map(|f| (f.month, f.rollover_or_zero())).collect();
    let months_remaining = future.len();

    // Scenario 1: keep current forecasts unchanged
    let forecasts: Vec<ScenarioForecast> =
        future.iter().map(|&(month, amount)| ScenarioForecast { month, amount }).collect();
    let total: f64 =
        forecasts.iter().map(|f| f.amount).sum::<f64>() + record.total_actuals;
    scenarios.push(Scenario {
        scenario_id: "scenario-1".to_string(),
        name: "No Change".to_string(),
        description: "Keep current forecasts unchanged".to_string(),
        forecasts,
        total_year_forecast: total,
        variance_from_budget: total - record.total_budget,
        suggested_reason_codes: None,
    });

    // Scenario 2: spread flagged large POs evenly across remaining months
    let large_pos: Vec<_> = record.po_analysis.iter().filter(|p| p.needs_review).collect();
    if !large_pos.is_empty() && months_remaining > 0 {
        let total_large_pos: f64 = large_pos.iter().map(|p| p.amount).sum();
        let spread_amount = total_large_pos / months_remaining as f64;
        let forecasts: Vec<ScenarioForecast> = future
            .iter()
            .map(|&(month, _)| ScenarioForecast { month, amount: round2(spread_amount) })
            .collect();
        let total: f64 =
            forecasts.iter().map(|f| f.amount).sum::<f64>() + record.total_actuals;
        scenarios.push(Scenario {
            scenario_id: "scenario-2".to_string(),
            name: "Spread Large POs".to_string(),
            description: format!(
                "Spread {} across {} months ({}/month)",
                format_currency_whole(total_large_pos),
                months_remaining,
                format_currency_whole(spread_amount)
            ),
            forecasts,
            total_year_forecast: total,
            variance_from_budget: total - record.total_budget,
            suggested_reason_codes: Some(vec![SuggestedReasonCode {
                code: "normal_variance".to_string(),
                suggested_percent: 100,
            }]),
        });
    }

    // Scenario 3: carry the observed variance trend into remaining months
    if !record.variances.is_empty() {
        let total_variance: f64 = record.variances.iter().map(|v| v.variance).sum();
        if total_variance > 0.0 && months_remaining > 0 {
            let adjustment = total_variance / months_remaining as f64;
            let forecasts: Vec<ScenarioForecast> = future
                .iter()
                .map(|&(month, amount)| ScenarioForecast { month, amount: amount + adjustment })
                .collect();
            let total: f64 =
                forecasts.iter().map(|f| f.amount).sum::<f64>() + record.total_actuals;
            scenarios.push(Scenario {
                scenario_id: "scenario-3".to_string(),
                name: "Adjust for Variance Trend".to_string(),
                description: format!(
                    "Increase remaining months by {} each to cover observed variance",
                    format_currency_whole(adjustment)
                ),
                forecasts,
                total_year_forecast: total,
                variance_from_budget: total - record.total_budget,
                suggested_reason_codes: Some(vec![
                    SuggestedReasonCode { code: "inflation".to_string(), suggested_percent: 60 },
                    SuggestedReasonCode {
                        code: "normal_variance".to_string(),
                        suggested_percent: 40,
                    },
                ]),
            });
        }
    }

    record.scenarios = scenarios;
}
