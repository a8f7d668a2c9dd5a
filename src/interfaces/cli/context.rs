//! Per-invocation CLI state: configuration, casino registry and store

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::CliError;
use crate::client::{ReportStore, create_store};
use crate::config::StaticConfig;
use crate::report::CasinoRegistry;

pub struct CliContext {
    pub config: Arc<StaticConfig>,
    pub registry: CasinoRegistry,
    registry_path: PathBuf,
    store: Box<dyn ReportStore>,
}

impl CliContext {
    /// Load the registry file (or the configured seed) and open the store
    pub fn from_config(config: Arc<StaticConfig>) -> Result<Self, CliError> {
        let registry_path = PathBuf::from(&config.registry.file);
        let registry = CasinoRegistry::load_or(&registry_path, config.registry.seed())?;
        let store = create_store(&config)?;
        debug!(
            "CLI context ready: {} casinos, {} store",
            registry.len(),
            store.backend_name()
        );
        Ok(Self {
            config,
            registry,
            registry_path,
            store,
        })
    }

    /// Assemble from explicit parts
    pub fn with_parts(
        config: Arc<StaticConfig>,
        registry: CasinoRegistry,
        registry_path: PathBuf,
        store: Box<dyn ReportStore>,
    ) -> Self {
        Self {
            config,
            registry,
            registry_path,
            store,
        }
    }

    pub fn store(&self) -> &dyn ReportStore {
        self.store.as_ref()
    }

    /// Persist the registry after a change
    pub fn save_registry(&self) -> Result<(), CliError> {
        self.registry.save(&self.registry_path)?;
        debug!("Registry saved to {}", self.registry_path.display());
        Ok(())
    }
}
