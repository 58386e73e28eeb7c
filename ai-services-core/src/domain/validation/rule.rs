// ai-services-core/src/domain/validation/rule.rs

use crate::ports::{ClusterError, ProbeError};
use async_trait::async_trait;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Name of the rule whose failure aborts a validation run. Every later check
/// assumes the privileges it verifies.
pub const PRIVILEGE_RULE: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Why a single check did not pass.
#[derive(Error, Debug, Diagnostic)]
pub enum RuleError {
    #[error("{0}")]
    #[diagnostic(code(ai_services::rule::check_failed))]
    CheckFailed(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Cluster(#[from] ClusterError),

    #[error("failed to parse {what}: {detail}")]
    #[diagnostic(code(ai_services::rule::parse))]
    Parse { what: &'static str, detail: String },
}

impl RuleError {
    pub fn failed(message: impl Into<String>) -> Self {
        RuleError::CheckFailed(message.into())
    }
}

/// One verifiable fact about the target environment.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Stable identifier, used by `--skip-validation`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn verify(&self) -> Result<(), RuleError>;

    /// Success statement. Only meaningful after `verify` returned `Ok`.
    fn message(&self) -> String;

    fn level(&self) -> Severity;

    /// Remediation text. Only meaningful after `verify` failed.
    fn hint(&self) -> String;
}
