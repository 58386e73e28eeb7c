// ai-services-core/src/domain/rules/podman/root.rs

use crate::domain::validation::{PRIVILEGE_RULE, Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const PROC_STATUS: &str = "/proc/self/status";

pub struct RootRule {
    host: Arc<dyn HostProbe>,
}

impl RootRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

/// Effective UID from a `/proc/<pid>/status` dump.
/// The `Uid:` line holds real, effective, saved and filesystem UIDs.
pub fn parse_effective_uid(status: &str) -> Result<u32, RuleError> {
    let line = status
        .lines()
        .find(|l| l.starts_with("Uid:"))
        .ok_or_else(|| RuleError::Parse {
            what: "process status",
            detail: "no Uid line".into(),
        })?;

    let effective = line.split_whitespace().nth(2).ok_or_else(|| RuleError::Parse {
        what: "process status",
        detail: format!("malformed Uid line '{line}'"),
    })?;

    effective.parse().map_err(|_| RuleError::Parse {
        what: "effective UID",
        detail: effective.to_string(),
    })
}

#[async_trait]
impl Rule for RootRule {
    fn name(&self) -> &str {
        PRIVILEGE_RULE
    }

    fn description(&self) -> &str {
        "Validates that the current user has root privileges."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Checking root privileges");
        let status = self.host.read_to_string(PROC_STATUS).await?;
        let euid = parse_effective_uid(&status)?;

        if euid != 0 {
            return Err(RuleError::failed(format!(
                "current user is not root (EUID: {euid})"
            )));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "Current user is root".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "Run this command with root privileges using 'sudo' or as the root user".to_string()
    }
}
