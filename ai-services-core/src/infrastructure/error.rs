// ai-services-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(ai_services::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(ai_services::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(ai_services::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(ai_services::infra::config_missing))]
    ConfigNotFound(String),
}
