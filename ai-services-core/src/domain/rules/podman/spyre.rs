// ai-services-core/src/domain/rules/podman/spyre.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

// Device name as printed by lspci, or the IBM vendor:device pair (lspci -nn).
static SPYRE_DEVICE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)IBM Spyre Accelerator|\[?\b1014:06a7\b\]?").ok());

/// Number of PCI devices in an `lspci -nn` listing that are Spyre cards.
pub fn count_spyre_devices(listing: &str) -> usize {
    let Some(pattern) = SPYRE_DEVICE.as_ref() else {
        return 0;
    };
    listing.lines().filter(|line| pattern.is_match(line)).count()
}

pub struct SpyreRule {
    host: Arc<dyn HostProbe>,
}

impl SpyreRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl Rule for SpyreRule {
    fn name(&self) -> &str {
        "spyre"
    }

    fn description(&self) -> &str {
        "Validates that the IBM Spyre Accelerator is attached to the LPAR."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Validating Spyre attachment");
        let output = self.host.run("lspci", &["-nn"]).await?;
        if !output.success() {
            return Err(RuleError::failed(format!(
                "lspci exited with status {}: {}",
                output.status,
                output.stderr.trim()
            )));
        }

        let cards = count_spyre_devices(&output.stdout);
        debug!(cards, "Spyre cards detected");
        if cards == 0 {
            return Err(RuleError::failed(
                "IBM Spyre Accelerator is not attached to the LPAR",
            ));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "IBM Spyre Accelerator is attached to the LPAR".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "IBM Spyre Accelerator hardware is required but not detected.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    const LSPCI: &str = "\
0181:70:00.0 Processing accelerators [1200]: IBM Device [1014:06a7] (rev 02)
0182:70:00.0 Processing accelerators [1200]: IBM Spyre Accelerator (rev 02)
0200:00:00.0 Ethernet controller [0200]: Mellanox Technologies MT28908 [15b3:101b]
";

    #[test]
    fn test_count_by_name_or_id() {
        assert_eq!(count_spyre_devices(LSPCI), 2);
        assert_eq!(count_spyre_devices(""), 0);
        assert_eq!(
            count_spyre_devices("0200:00:00.0 Ethernet controller: Mellanox [15b3:101b]"),
            0
        );
        // a different IBM device id must not match
        assert_eq!(count_spyre_devices("IBM Device [1014:06a70]"), 0);
    }

    #[tokio::test]
    async fn test_attached_cards_pass() {
        let host = FakeHost::new().with_command("lspci", 0, LSPCI, "");
        assert!(SpyreRule::new(Arc::new(host)).verify().await.is_ok());
    }

    #[tokio::test]
    async fn test_no_cards_fail() {
        let host = FakeHost::new().with_command(
            "lspci",
            0,
            "0200:00:00.0 Ethernet controller [0200]: Mellanox [15b3:101b]\n",
            "",
        );
        let err = SpyreRule::new(Arc::new(host)).verify().await;
        assert!(matches!(err, Err(RuleError::CheckFailed(msg)) if msg.contains("not attached")));
    }

    #[tokio::test]
    async fn test_lspci_error_is_reported() {
        let host = FakeHost::new().with_command("lspci", 1, "", "pcilib: cannot open /sys/bus/pci");
        let err = SpyreRule::new(Arc::new(host)).verify().await;
        assert!(matches!(err, Err(RuleError::CheckFailed(msg)) if msg.contains("pcilib")));
    }
}
