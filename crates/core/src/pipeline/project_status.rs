//! Stage 5: project status checks
//!
//! Two independently triggered checks against the current date: project
//! lateness and purchase-order deliveries that exceed the month's
//! forecast. Both raise a flag plus a mandatory reviewer question.
//! Unparseable dates are logged and skipped; their absence of a flag is
//! designed behavior, not a defect.

use std::collections::HashMap;

use chrono::NaiveDate;
use foresight_domain::constants::{
    DATE_FORMAT, PO_DELIVERY_EXCESS_RATIO, PO_DELIVERY_HIGH_SEVERITY_RATIO,
    PROJECT_LATE_CRITICAL_DAYS, PROJECT_LATE_HIGH_DAYS,
};
use foresight_domain::utils::helpers::{format_currency_whole, round1};
use foresight_domain::{
    AnalysisRecord, Flag, FlagType, Question, QuestionOption, Severity,
};

/// Run the lateness and PO-delivery checks as of `today`.
///
/// The current date is injected by the orchestrator so runs are
/// reproducible in tests and idempotent for a fixed date.
pub fn check(record: &mut AnalysisRecord, today: NaiveDate) {
    if let Some(flag) = check_project_late(record, today) {
        let question = late_project_question(record);
        record.flags.push(flag);
        record.questions.push(question);
    }

    let delivery_flags = check_po_delivery_dates(record);
    for flag in delivery_flags {
        let question = po_delivery_question(&flag);
        record.flags.push(flag);
        record.questions.push(question);
    }
}

/// A project is late when its anticipated end date is strictly before
/// today and its status does not mark it finished.
fn check_project_late(record: &AnalysisRecord, today: NaiveDate) -> Option<Flag> {
    let project = &record.project;

    if project.anticipated_end_date.trim().is_empty() || project.is_finished() {
        return None;
    }

    let end_date = match NaiveDate::parse_from_str(&project.anticipated_end_date, DATE_FORMAT) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(
                project_id = %project.id,
                anticipated_end_date = %project.anticipated_end_date,
                error = %err,
                "could not parse anticipated end date"
            );
            return None;
        }
    };

    if today <= end_date {
        return None;
    }

    let days_late = (today - end_date).num_days();
    let severity = if days_late > PROJECT_LATE_CRITICAL_DAYS {
        Severity::Critical
    } else if days_late > PROJECT_LATE_HIGH_DAYS {
        Severity::High
    } else {
        Severity::Medium
    };

    tracing::warn!(
        project_id = %project.id,
        days_late,
        "project is past its anticipated end date"
    );

    let mut flag = Flag::new(
        FlagType::ProjectLate,
        severity,
        format!(
            "Project is {days_late} days past anticipated end date ({end_date}). \
             Review for potential cost overruns."
        ),
    );
    flag.project_id = Some(project.id.clone());
    flag.project_name = Some(project.name.clone());
    flag.anticipated_end_date = Some(end_date.to_string());
    flag.days_late = Some(days_late);
    Some(flag)
}

fn late_project_question(record: &AnalysisRecord) -> Question {
    let project = &record.project;
    Question {
        question_id: format!("q_late_{}", project.id),
        question_type: "project_late_review".to_string(),
        priority: "high".to_string(),
        text: format!(
            "Project '{}' appears to be past its anticipated end date ({}). \
             Is there a risk that the project will cost more than forecast?",
            project.name, project.anticipated_end_date
        ),
        options: vec![
            QuestionOption::with_follow_up(
                "yes_increase",
                "Yes, likely to cost more",
                "By how much?",
            ),
            QuestionOption::new("yes_minor", "Yes, but minor increase expected"),
            QuestionOption::new("no_on_track", "No, project is on track despite date"),
            QuestionOption::new("pending_review", "Need more information to assess"),
        ],
        requires_reason: true,
    }
}

/// Flag open POs whose estimated delivery lands in a month (>= current)
/// whose forecast they exceed by more than the excess ratio.
fn check_po_delivery_dates(record: &AnalysisRecord) -> Vec<Flag> {
    let mut flags = Vec::new();

    let forecast_by_month: HashMap<u32, f64> =
        record.forecasts.iter().map(|f| (f.month, f.effective_forecast())).collect();

    for po in &record.purchase_orders {
        if !po.is_open() || po.estimated_delivery.trim().is_empty() {
            continue;
        }

        let delivery_date =
            match NaiveDate::parse_from_str(&po.estimated_delivery, DATE_FORMAT) {
                Ok(date) => date,
                Err(err) => {
                    tracing::warn!(
                        po_number = %po.po_number,
                        estimated_delivery = %po.estimated_delivery,
                        error = %err,
                        "could not parse PO delivery date"
                    );
                    continue;
                }
            };

        let delivery_month = chrono::Datelike::month(&delivery_date);
        if delivery_month < record.current_month {
            continue; // Only check future months
        }

        let monthly_forecast = forecast_by_month.get(&delivery_month).copied().unwrap_or(0.0);

        if po.amount > monthly_forecast && monthly_forecast > 0.0 {
            let excess_ratio = po.amount / monthly_forecast;

            // Only significant excesses are worth a reviewer's time
            if excess_ratio > PO_DELIVERY_EXCESS_RATIO {
                let severity = if excess_ratio > PO_DELIVERY_HIGH_SEVERITY_RATIO {
                    Severity::High
                } else {
                    Severity::Medium
                };

                let mut flag = Flag::new(
                    FlagType::PoDeliveryExceedsForecast,
                    severity,
                    format!(
                        "PO {} delivery ({}) in month {} exceeds forecast ({}) by {:.1}x",
                        po.po_number,
                        format_currency_whole(po.amount),
                        delivery_month,
                        format_currency_whole(monthly_forecast),
                        excess_ratio
                    ),
                );
                flag.po_number = Some(po.po_number.clone());
                flag.po_amount = Some(po.amount);
                flag.delivery_month = Some(delivery_month);
                flag.estimated_delivery = Some(delivery_date.to_string());
                flag.monthly_forecast = Some(monthly_forecast);
                flag.excess_ratio = Some(round1(excess_ratio));

                tracing::info!(
                    po_number = %po.po_number,
                    po_amount = po.amount,
                    monthly_forecast,
                    "PO delivery flagged against monthly forecast"
                );

                flags.push(flag);
            }
        }
    }

    flags
}

fn po_delivery_question(flag: &Flag) -> Question {
    let po_number = flag.po_number.clone().unwrap_or_default();
    Question {
        question_id: format!("q_delivery_{po_number}"),
        question_type: "po_delivery_review".to_string(),
        priority: "medium".to_string(),
        text: format!(
            "PO {} ({}) has estimated delivery in month {}, but the forecast for \
             that month is only {}. How should this be handled?",
            po_number,
            format_currency_whole(flag.po_amount.unwrap_or(0.0)),
            flag.delivery_month.unwrap_or(0),
            format_currency_whole(flag.monthly_forecast.unwrap_or(0.0))
        ),
        options: vec![
            QuestionOption::new("increase_forecast", "Increase forecast to match PO"),
            QuestionOption::new("spread_months", "Spread delivery across months"),
            QuestionOption::new("delay_expected", "Delivery will likely be delayed"),
            QuestionOption::new("already_accounted", "Already accounted for in forecast"),
        ],
        requires_reason: true,
    }
}
