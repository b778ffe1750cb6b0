//! Forecast analysis pipeline stages
//!
//! Fixed execution order, each stage reading and appending to the shared
//! [`foresight_domain::AnalysisRecord`]:
//!
//! 1. intake - validate required input, count months
//! 2. metrics - totals, NOV, budget consumption
//! 3. variance - actuals vs forecast per realized month
//! 4. thresholds - 90% budget ceiling and NOV floor
//! 5. project_status - lateness and PO delivery vs forecast
//! 6. po_review - purchase orders disproportionate to the monthly average
//! 7. scenarios - alternative forecast projections
//! 8. questions - reviewer questions derived from flags and alerts
//! 9. explanation - narrative via LLM with deterministic fallback
//! 10. compile - timestamp, final status, response mapping

pub mod compile;
pub mod explanation;
pub mod intake;
pub mod metrics;
pub mod po_review;
pub mod project_status;
pub mod questions;
pub mod scenarios;
pub mod thresholds;
pub mod variance;
