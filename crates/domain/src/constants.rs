//! Business rule constants
//!
//! Centralized location for the numeric thresholds that drive flagging,
//! alerting, and severity classification. These values are the observable
//! contract of the analysis pipeline; change them only with business
//! sign-off.

/// Months in a fiscal year (forecasts always cover a full year).
pub const MONTHS_PER_YEAR: u32 = 12;

/// Variance percentage above which a month is flagged.
pub const VARIANCE_FLAG_THRESHOLD_PERCENT: f64 = 5.0;
/// Variance percentage above which a variance flag escalates to high.
pub const VARIANCE_HIGH_SEVERITY_PERCENT: f64 = 15.0;

/// Budget consumption percentage that triggers a threshold alert.
pub const BUDGET_CONSUMPTION_ALERT_PERCENT: f64 = 90.0;

/// A purchase order is flagged as large when it exceeds this multiple of
/// the average monthly base forecast.
pub const LARGE_PO_MULTIPLIER: f64 = 2.0;

/// PO delivery must exceed the month's forecast by this ratio to be flagged.
pub const PO_DELIVERY_EXCESS_RATIO: f64 = 1.5;
/// PO delivery ratio above which the flag escalates to high.
pub const PO_DELIVERY_HIGH_SEVERITY_RATIO: f64 = 3.0;

/// Days late after which a late project escalates to high severity.
pub const PROJECT_LATE_HIGH_DAYS: i64 = 30;
/// Days late after which a late project escalates to critical severity.
pub const PROJECT_LATE_CRITICAL_DAYS: i64 = 90;

/// Minimum model response length (trimmed chars) accepted as an explanation.
pub const MIN_EXPLANATION_LENGTH: usize = 20;

/// Maximum characters of user-supplied text admitted into an LLM prompt.
pub const MAX_PROMPT_TEXT_LENGTH: usize = 1000;
/// Maximum characters for a sanitized project name.
pub const MAX_PROJECT_NAME_LENGTH: usize = 200;
/// Maximum characters for a sanitized PO number.
pub const MAX_PO_NUMBER_LENGTH: usize = 50;
/// Maximum characters for a sanitized reason code.
pub const MAX_REASON_CODE_LENGTH: usize = 100;

/// Date format used for project end dates and PO delivery dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
