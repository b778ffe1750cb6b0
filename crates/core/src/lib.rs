//! # Foresight Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The forecast analysis pipeline (one module per stage)
//! - Port/adapter interfaces (traits) for the explanation generator and
//!   session storage
//! - The orchestrator service that runs the stages in fixed order
//!
//! ## Architecture Principles
//! - Only depends on `foresight-domain`
//! - No HTTP or storage code; external collaborators enter via traits
//! - Every stage except intake and explanation is a total function over
//!   the analysis record

pub mod pipeline;
pub mod ports;
pub mod service;

pub use ports::{ExplanationGenerator, SessionStore};
pub use service::ForecastAnalysisService;
