// ai-services-core/src/domain/rules/podman/power.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const CPU_INFO: &str = "/proc/cpuinfo";
const REQUIRED_ARCH: &str = "ppc64le";
const REQUIRED_CPU: &str = "power11";

pub struct PowerRule {
    host: Arc<dyn HostProbe>,
}

impl PowerRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl Rule for PowerRule {
    fn name(&self) -> &str {
        "power11"
    }

    fn description(&self) -> &str {
        "Validates that the LPAR runs on IBM Power11 (ppc64le)."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Validating IBM Power version");
        let arch = self.host.arch();
        if arch != REQUIRED_ARCH {
            return Err(RuleError::failed(format!(
                "unsupported architecture: {arch}. IBM Power architecture ({REQUIRED_ARCH}) is required"
            )));
        }

        let cpu_info = self.host.read_to_string(CPU_INFO).await?;
        if !cpu_info.to_lowercase().contains(REQUIRED_CPU) {
            return Err(RuleError::failed(
                "unsupported IBM Power version: Power11 is required",
            ));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "System is running on IBM Power11 architecture".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "This tool requires an IBM Power11 LPAR running in little-endian mode (ppc64le).".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    const POWER11_CPUINFO: &str = "processor\t: 0\ncpu\t\t: Power11 (architected), altivec supported\n";

    #[tokio::test]
    async fn test_power11_passes() {
        let host = FakeHost::new().with_file(CPU_INFO, POWER11_CPUINFO);
        assert!(PowerRule::new(Arc::new(host)).verify().await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_architecture_fails_before_cpuinfo() {
        let host = FakeHost::new().with_arch("x86_64");
        let err = PowerRule::new(Arc::new(host)).verify().await;
        assert!(matches!(err, Err(RuleError::CheckFailed(msg)) if msg.contains("x86_64")));
    }

    #[tokio::test]
    async fn test_older_power_generation_fails() {
        let host = FakeHost::new().with_file(CPU_INFO, "cpu\t\t: POWER10 (architected)\n");
        let err = PowerRule::new(Arc::new(host)).verify().await;
        assert!(matches!(err, Err(RuleError::CheckFailed(msg)) if msg.contains("Power11 is required")));
    }
}
