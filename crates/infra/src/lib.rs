//! # Foresight Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Ollama explanation-generator adapter
//! - In-memory session storage
//! - Configuration loading (environment and file)
//!
//! ## Architecture
//! - Implements traits defined in `foresight-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod context;
pub mod errors;
pub mod llm;
pub mod sessions;

// Re-export commonly used items
pub use context::ServiceContext;
pub use errors::InfraError;
pub use llm::OllamaClient;
pub use sessions::InMemorySessionStore;
