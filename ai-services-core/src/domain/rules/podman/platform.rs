// ai-services-core/src/domain/rules/podman/platform.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const OS_RELEASE: &str = "/etc/os-release";
const RHEL_NAME: &str = "Red Hat Enterprise Linux";

/// Oldest supported RHEL release.
pub const MINIMUM_RHEL: RhelVersion = RhelVersion { major: 9, minor: 6 };

/// The fields of `/etc/os-release` this tool cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    fields: HashMap<String, String>,
}

impl OsRelease {
    pub fn parse(content: &str) -> Self {
        let fields = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                (key.trim().to_string(), value.to_string())
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_rhel(&self) -> bool {
        self.get("ID") == Some("rhel")
            || ["NAME", "PRETTY_NAME"]
                .iter()
                .filter_map(|k| self.get(k))
                .any(|v| v.contains(RHEL_NAME))
    }

    pub fn version_id(&self) -> Option<&str> {
        self.get("VERSION_ID")
    }
}

/// `major.minor` release number. Parsing never fails: a missing minor is 0 and
/// any non-numeric component reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RhelVersion {
    pub major: u32,
    pub minor: u32,
}

impl RhelVersion {
    pub fn parse(version: &str) -> Self {
        let mut parts = version.trim().split('.');
        let mut component = || {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };
        let major = component();
        let minor = component();
        Self { major, minor }
    }

    pub fn is_supported(&self) -> bool {
        *self >= MINIMUM_RHEL
    }
}

impl fmt::Display for RhelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

pub struct PlatformRule {
    host: Arc<dyn HostProbe>,
}

impl PlatformRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl Rule for PlatformRule {
    fn name(&self) -> &str {
        "rhel"
    }

    fn description(&self) -> &str {
        "Validates that the operating system is RHEL version 9.6 or higher."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Validating operating system");
        let content = self.host.read_to_string(OS_RELEASE).await?;
        let release = OsRelease::parse(&content);

        if !release.is_rhel() {
            return Err(RuleError::failed(
                "unsupported operating system: only RHEL is supported",
            ));
        }

        let raw = release
            .version_id()
            .ok_or_else(|| RuleError::failed("unable to determine OS version"))?;

        if !RhelVersion::parse(raw).is_supported() {
            return Err(RuleError::failed(format!(
                "unsupported RHEL version: {raw}. Minimum required version is {MINIMUM_RHEL}"
            )));
        }

        debug!(version = raw, "Operating system is RHEL");
        Ok(())
    }

    fn message(&self) -> String {
        format!(
            "The LPAR is running a supported version of the operating system (RHEL {MINIMUM_RHEL} or higher)."
        )
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        format!(
            "This tool requires RHEL version {MINIMUM_RHEL} or higher, please install or upgrade to a supported platform"
        )
    }
}
