// ai-services-core/src/domain/rules/podman/numa.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const NUMA_DOCS: &str =
    "https://www.ibm.com/docs/aiservices?topic=installation-chip-alignment-in-lpar";

/// Parses the NUMA node count out of `lscpu` output.
///
/// Uses the `NUMA node(s)` line when present, otherwise the whole text, and
/// reads its last whitespace-separated token.
pub fn parse_numa_node_count(output: &str) -> Result<u32, RuleError> {
    let line = output
        .lines()
        .find(|l| l.to_lowercase().contains("numa node(s)"))
        .unwrap_or(output);

    let token = line.split_whitespace().last().ok_or_else(|| RuleError::Parse {
        what: "NUMA node count",
        detail: "failed to get NUMA node fields".into(),
    })?;

    token.parse().map_err(|_| RuleError::Parse {
        what: "NUMA node count",
        detail: format!("'{token}' is not a number"),
    })
}

pub struct NumaRule {
    host: Arc<dyn HostProbe>,
}

impl NumaRule {
    pub fn new(host: Arc<dyn HostProbe>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl Rule for NumaRule {
    fn name(&self) -> &str {
        "numa"
    }

    fn description(&self) -> &str {
        "Validates that the NUMA node alignment on LPAR is set to 1 for optimal performance."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!("Validating NUMA node alignment on LPAR");
        let output = self.host.run("lscpu", &[]).await?;
        if !output.success() {
            return Err(RuleError::failed(format!(
                "failed to execute lscpu command (exit status {})",
                output.status
            )));
        }

        let nodes = parse_numa_node_count(&output.stdout)?;
        if nodes != 1 {
            return Err(RuleError::failed(format!(
                "current NUMA node configuration ({nodes}) is not aligned for maximum efficiency. \
                 For optimal performance, ensure that all CPUs are aligned to a single NUMA node"
            )));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "NUMA node alignment on LPAR: 1".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Warning
    }

    fn hint(&self) -> String {
        format!(
            "This tool requires NUMA node alignment set to 1 on the LPAR. \
             For detailed instructions and best practices on NUMA configuration, please refer to {NUMA_DOCS}"
        )
    }
}
