//! Pure utility helpers shared across the workspace

pub mod helpers;
pub mod sanitization;
