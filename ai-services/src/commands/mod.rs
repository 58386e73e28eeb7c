// ai-services/src/commands/mod.rs

pub mod bootstrap;
pub mod configure;
pub mod logs;
pub mod validate;
pub mod version;

use ai_services_core::AiServicesError;
use ai_services_core::application::BootstrapFactory;
use ai_services_core::domain::RuntimeType;
use ai_services_core::infrastructure::config::AppConfig;
use ai_services_core::infrastructure::{KubectlClient, SystemHost};
use std::sync::Arc;

/// Resolved configuration shared by all commands.
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn runtime(&self) -> RuntimeType {
        self.config.runtime
    }

    /// Wires the real host and cluster adapters into the bootstrap factory.
    pub fn factory(&self) -> Result<BootstrapFactory, AiServicesError> {
        let host = Arc::new(SystemHost::new());
        let cluster = Arc::new(KubectlClient::new(self.config.cluster.cli.clone()));
        Ok(BootstrapFactory::new(
            self.runtime(),
            self.config.clone(),
            host,
            cluster,
        )?)
    }
}
