//! # Foresight Domain
//!
//! Business domain types and models for Foresight.
//!
//! This crate contains:
//! - Domain data types (ProjectInfo, ForecastMonth, AnalysisRecord, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and pure helpers
//!
//! ## Architecture
//! - No dependencies on other Foresight crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export sanitization utilities used when building LLM prompts
pub use utils::sanitization::{sanitize_for_llm_prompt, sanitize_project_name};
