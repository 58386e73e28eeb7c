// ai-services-core/src/error.rs

use crate::application::bootstrap::BootstrapError;
use crate::application::validation::ValidationError;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiServicesError {
    // --- DOMAIN (registries, rules) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, config, YAML) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- USE CASES ---
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

impl From<std::io::Error> for AiServicesError {
    fn from(err: std::io::Error) -> Self {
        AiServicesError::Infrastructure(InfrastructureError::Io(err))
    }
}
