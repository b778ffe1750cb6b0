//! Application configuration structures

use serde::{Deserialize, Serialize};

/// Top-level configuration for the analysis service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub llm: LlmConfig,
    pub session: SessionConfig,
}

/// Settings for the explanation LLM collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama-compatible server
    pub host: String,
    /// Model name (e.g., "qwen2.5:7b")
    pub model: String,
    /// Sampling temperature passed through to the model
    pub temperature: f32,
    /// Upper bound on the explanation call; the pipeline falls back to a
    /// local explanation when this elapses
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b".to_string(),
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

/// Settings for in-memory session retention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of completed analysis sessions kept in memory
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_sessions: 1000 }
    }
}
