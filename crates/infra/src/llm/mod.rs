//! Text-generation integration (Ollama-compatible API)

pub mod client;

pub use client::OllamaClient;
