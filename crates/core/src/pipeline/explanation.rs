//! Stage 9: explanation synthesis
//!
//! Delegates the narrative to an external text-generation collaborator and
//! falls back to a rule-based explanation whenever the call fails, times out
//! or returns an unusably short answer. This stage never fails the pipeline.

use std::time::Duration;

use foresight_domain::config::LlmConfig;
use foresight_domain::constants::MIN_EXPLANATION_LENGTH;
use foresight_domain::utils::helpers::format_currency;
use foresight_domain::utils::sanitization::sanitize_project_name;
use foresight_domain::AnalysisRecord;

use crate::ports::ExplanationGenerator;

/// Synthesize the narrative explanation and the one-line summary.
///
/// The generator call is bounded by `llm.timeout_seconds`; a slow
/// collaborator triggers the fallback like any other failure.
pub async fn synthesize(
    record: &mut AnalysisRecord,
    generator: &dyn ExplanationGenerator,
    llm: &LlmConfig,
) {
    let project_name = sanitize_project_name(&record.project.name);
    let prompt = build_prompt(record, &project_name);

    let call = generator.generate(&prompt, llm.temperature);
    record.explanation = match tokio::time::timeout(
        Duration::from_secs(llm.timeout_seconds),
        call,
    )
    .await
    {
        Ok(Ok(text)) if text.len() > MIN_EXPLANATION_LENGTH => {
            tracing::info!("llm explanation generated successfully");
            text
        }
        Ok(Ok(_)) => {
            tracing::info!("using fallback explanation (short llm response)");
            fallback_explanation(record)
        }
        Ok(Err(error)) => {
            tracing::warn!(%error, "llm call failed, using fallback");
            fallback_explanation(record)
        }
        Err(_) => {
            tracing::warn!(
                timeout_seconds = llm.timeout_seconds,
                "llm call timed out, using fallback"
            );
            fallback_explanation(record)
        }
    };

    record.summary = format!(
        "Budget analysis for {project_name}: {:.1}% consumed, {} issues detected.",
        record.budget_consumption_percent,
        record.flags.len()
    );
}

fn build_prompt(record: &AnalysisRecord, project_name: &str) -> String {
    let flags = if record.flags.is_empty() {
        "None".to_string()
    } else {
        record
            .flags
            .iter()
            .map(|f| format!("- {}", f.message))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let scenarios = if record.scenarios.is_empty() {
        "None".to_string()
    } else {
        record
            .scenarios
            .iter()
            .map(|s| format!("- {}: {}", s.name, s.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are a financial analyst explaining project forecast analysis to a project manager.\n\
         \n\
         Project: {project_name}\n\
         Budget: {budget}\n\
         Approved Amount: {approved}\n\
         Total Actuals to Date: {actuals}\n\
         Budget Consumption: {consumption:.1}%\n\
         Net Order Value (remaining obligations): {nov}\n\
         \n\
         Issues Found:\n\
         {flags}\n\
         \n\
         Scenarios Generated:\n\
         {scenarios}\n\
         \n\
         Write a clear, concise explanation (3-4 sentences) that:\n\
         1. Summarizes the current state of the project\n\
         2. Highlights the main issues found\n\
         3. Explains what the scenarios mean\n\
         4. Provides a recommendation\n\
         \n\
         Keep it simple and actionable. Do not use technical jargon.",
        budget = format_currency(record.total_budget),
        approved = format_currency(record.total_approved),
        actuals = format_currency(record.total_actuals),
        consumption = record.budget_consumption_percent,
        nov = format_currency(record.net_order_value),
    )
}

/// Rule-based explanation used when the collaborator is unavailable.
fn fallback_explanation(record: &AnalysisRecord) -> String {
    let consumption = record.budget_consumption_percent;
    let flag_count = record.flags.len();

    let phase = if consumption < 25.0 {
        "early stages"
    } else if consumption < 50.0 {
        "on track"
    } else if consumption < 75.0 {
        "mid-way through"
    } else if consumption < 90.0 {
        "nearing completion"
    } else {
        "at critical budget threshold"
    };

    let status = match flag_count {
        0 => "progressing smoothly with no significant issues".to_string(),
        1 => "has one issue requiring attention".to_string(),
        n => format!("has {n} issues that need review"),
    };

    format!(
        "The project is {phase} with {consumption:.1}% of budget consumed. It {status}. \
         Review the scenarios provided to determine the best path forward."
    )
}
