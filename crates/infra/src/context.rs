//! Process assembly: configuration, adapters, and the analysis service.

use std::sync::Arc;

use foresight_core::ForecastAnalysisService;
use foresight_domain::{Config, Result};
use tracing::info;

use crate::config::loader;
use crate::llm::OllamaClient;
use crate::sessions::InMemorySessionStore;

/// Wires configuration and adapters into a ready-to-use analysis service.
pub struct ServiceContext {
    pub config: Config,
    pub sessions: Arc<InMemorySessionStore>,
    pub service: Arc<ForecastAnalysisService>,
}

impl ServiceContext {
    /// Build the context from the standard configuration sources.
    pub fn init() -> Result<Self> {
        Self::from_config(loader::load()?)
    }

    /// Build the context from an explicit configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let generator = Arc::new(OllamaClient::new(&config.llm)?);
        let sessions = Arc::new(InMemorySessionStore::new(&config.session));
        let service = Arc::new(ForecastAnalysisService::new(
            generator,
            sessions.clone(),
            config.llm.clone(),
        ));

        info!(
            host = %config.llm.host,
            model = %config.llm.model,
            "analysis service initialized"
        );

        Ok(Self { config, sessions, service })
    }
}
