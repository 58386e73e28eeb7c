// ai-services-core/src/domain/runtime.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution substrate targeted by bootstrap and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    #[default]
    Podman,
    OpenShift,
}

impl RuntimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Podman => "podman",
            Self::OpenShift => "openshift",
        }
    }

    pub fn all() -> [RuntimeType; 2] {
        [Self::Podman, Self::OpenShift]
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuntimeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "podman" => Ok(Self::Podman),
            "openshift" => Ok(Self::OpenShift),
            _ => Err(DomainError::UnknownRuntime(s.to_string())),
        }
    }
}
