// ai-services-core/src/domain/rules/podman/servicereport.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::HostProbe;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// `podman run` arguments that execute ServiceReport inside the tools image
/// with access to the host devices and configuration.
pub fn servicereport_args(tools_image: &str, flags: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = [
        "run",
        "--rm",
        "--privileged",
        "--pid=host",
        "--network=host",
        "-v",
        "/etc:/etc",
        "-v",
        "/var/log:/var/log",
        "-v",
        "/dev:/dev",
        tools_image,
        "servicereport",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.extend(flags.iter().map(|s| s.to_string()));
    args
}

/// Last `lines` non-empty lines of a tool's output, for error messages.
pub fn output_tail(output: &str, lines: usize) -> String {
    let kept: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    kept[kept.len().saturating_sub(lines)..].join("\n")
}

pub struct ServiceReportRule {
    host: Arc<dyn HostProbe>,
    tools_image: String,
}

impl ServiceReportRule {
    pub fn new(host: Arc<dyn HostProbe>, tools_image: &str) -> Self {
        Self {
            host,
            tools_image: tools_image.to_string(),
        }
    }
}

#[async_trait]
impl Rule for ServiceReportRule {
    fn name(&self) -> &str {
        "servicereport"
    }

    fn description(&self) -> &str {
        "Validates if the ServiceReport tool has been run on the LPAR."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        debug!(image = %self.tools_image, "Validating if ServiceReport tool has run on LPAR");
        let args = servicereport_args(&self.tools_image, &["-v", "-p", "spyre"]);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.host.run("podman", &args).await?;
        if !output.success() {
            return Err(RuleError::failed(format!(
                "ServiceReport validation failed (exit status {}):\n{}",
                output.status,
                output_tail(&output.combined(), 5)
            )));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "ServiceReport tool has successfully run on the LPAR".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "ServiceReport tool needs to be run on LPAR, please use `ai-services bootstrap configure`"
            .to_string()
    }
}
