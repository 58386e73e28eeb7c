// ai-services-core/src/domain/rules/podman/rhn.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::{CommandOutput, HostProbe};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const NOT_REGISTERED: &str = "not registered";

pub struct RhnRule {
    host: Arc<dyn HostProbe>,
}

impl RhnRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

/// dnf can exit 0 while printing that the system is not registered, so the
/// output is inspected before the exit status.
pub fn check_registration(output: &CommandOutput) -> Result<(), RuleError> {
    if output.combined().contains(NOT_REGISTERED) {
        return Err(RuleError::failed("system is not registered with RHN"));
    }
    if !output.success() {
        return Err(RuleError::failed(format!(
            "failed to check registration status: dnf exited with status {}",
            output.status
        )));
    }
    Ok(())
}

#[async_trait]
impl Rule for RhnRule {
    fn name(&self) -> &str {
        "rhn"
    }

    fn description(&self) -> &str {
        "Validates that the system is registered with Red Hat Network."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Validating RHN registration");
        let output = self.host.run("dnf", &["repolist"]).await?;
        check_registration(&output)
    }

    fn message(&self) -> String {
        "System is registered with RHN".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "Register the system with 'subscription-manager register' and attach a valid subscription".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_output_wins_over_exit_status() {
        let output = CommandOutput {
            status: 0,
            stdout: "This system is not registered with an entitlement server.".into(),
            stderr: String::new(),
        };
        assert!(check_registration(&output).is_err());
    }

    #[test]
    fn test_message_on_stderr_is_seen() {
        let output = CommandOutput {
            status: 0,
            stdout: "repo id   repo name\n".into(),
            stderr: "This system is not registered".into(),
        };
        assert!(check_registration(&output).is_err());
    }

    #[test]
    fn test_non_zero_exit_fails() {
        let output = CommandOutput {
            status: 1,
            stdout: String::new(),
            stderr: "Error: Failed to download metadata".into(),
        };
        let err = check_registration(&output).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("failed to check registration status: dnf exited with status 1")
        );
    }

    #[tokio::test]
    async fn test_registered_system_passes() {
        let host = FakeHost::new().with_command(
            "dnf",
            0,
            "repo id                          repo name\nrhel-9-for-ppc64le-baseos-rpms   Red Hat Enterprise Linux 9 BaseOS\n",
            "",
        );
        let host = Arc::new(host);
        let rule = RhnRule::new(host.clone());
        assert!(rule.verify().await.is_ok());
        assert_eq!(host.invocations(), vec!["dnf repolist"]);
    }

    #[tokio::test]
    async fn test_missing_dnf_is_probe_error() {
        let rule = RhnRule::new(Arc::new(FakeHost::new()));
        assert!(matches!(rule.verify().await, Err(RuleError::Probe(_))));
    }
}
