//! Port interfaces for the analysis pipeline's external collaborators

use async_trait::async_trait;
use foresight_domain::{AnalysisSession, Result};

/// Trait for obtaining a narrative explanation from a text-generation model
///
/// Implementations perform the network call; the pipeline owns the timeout
/// and the fallback policy. A failure here never fails a pipeline run.
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    /// Generate text for the given prompt at the given temperature
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// Trait for persisting completed analysis sessions
///
/// The pipeline writes once per run and treats the call as fire-and-forget:
/// a save failure is logged, never propagated.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a completed session by its session id
    async fn save_session(&self, session: AnalysisSession) -> Result<()>;

    /// Retrieve a previously stored session
    async fn get_session(&self, session_id: &str) -> Result<Option<AnalysisSession>>;
}
