//! Stage 8: question building
//!
//! Turns accumulated flags and alerts into concrete questions for the human
//! reviewer. Lateness and delivery-date questions are raised directly by the
//! project-status stage; this stage covers everything else.

use foresight_domain::utils::helpers::format_currency_whole;
use foresight_domain::{
    AnalysisRecord, FlagType, Question, QuestionOption, ThresholdAlertType,
};

/// Build reviewer questions from the flags and alerts computed so far.
///
/// Ids are sequential (`q1`, `q2`, ...) in generation order: one question
/// per large-PO flag, then a single aggregated variance question, then one
/// question per budget threshold alert.
pub fn build(record: &mut AnalysisRecord) {
    let mut next_id = 1u32;

    for flag in record.flags.iter().filter(|f| f.flag_type == FlagType::LargePo) {
        let po_number = flag.po_number.as_deref().unwrap_or("unknown");
        let po_amount = flag.po_amount.unwrap_or(0.0);
        record.questions.push(Question {
            question_id: format!("q{next_id}"),
            question_type: "large_po_review".to_string(),
            priority: "high".to_string(),
            text: format!(
                "A large PO ({po_number}) of {} was issued, significantly exceeding \
                 the monthly forecast. How should this be handled?",
                format_currency_whole(po_amount)
            ),
            options: vec![
                QuestionOption::with_follow_up(
                    "spread",
                    "Spread over multiple months",
                    "How many months?",
                ),
                QuestionOption::new("increase", "Increase forecast to match"),
                QuestionOption::new("no_action", "No action needed (already accounted for)"),
            ],
            requires_reason: true,
        });
        next_id += 1;
    }

    let variance_count =
        record.flags.iter().filter(|f| f.flag_type == FlagType::VarianceExceeded).count();
    if variance_count > 0 {
        record.questions.push(Question {
            question_id: format!("q{next_id}"),
            question_type: "variance_review".to_string(),
            priority: "medium".to_string(),
            text: format!(
                "Actuals exceeded forecasts in {variance_count} month(s). Would you \
                 like to adjust the forecast for remaining months?"
            ),
            options: vec![
                QuestionOption::new("yes", "Yes, increase remaining months"),
                QuestionOption::new("no", "No, keep current forecast"),
                QuestionOption::new("custom", "Specify custom adjustment"),
            ],
            requires_reason: true,
        });
        next_id += 1;
    }

    for alert in
        record.threshold_alerts.iter().filter(|a| a.alert_type == ThresholdAlertType::BudgetThreshold)
    {
        record.questions.push(Question {
            question_id: format!("q{next_id}"),
            question_type: "threshold_alert".to_string(),
            priority: "high".to_string(),
            // Debug formatting keeps the trailing .0 on whole-number percentages.
            text: format!(
                "Budget consumption has reached {:?}%, exceeding the 90% threshold. \
                 How would you like to proceed?",
                alert.current.unwrap_or(0.0)
            ),
            options: vec![
                QuestionOption::new("acknowledge", "Acknowledge and continue"),
                QuestionOption::new("review", "Flag for management review"),
                QuestionOption::new("request_increase", "Request budget increase"),
            ],
            requires_reason: false,
        });
        next_id += 1;
    }
}
