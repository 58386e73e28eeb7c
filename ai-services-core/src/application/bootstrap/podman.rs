// ai-services-core/src/application/bootstrap/podman.rs

use super::{Bootstrap, BootstrapError};
use crate::domain::RuntimeType;
use crate::domain::rules::podman::servicereport::{output_tail, servicereport_args};
use crate::ports::{HostProbe, ProbeError, ProgressReporter};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct PodmanBootstrap {
    host: Arc<dyn HostProbe>,
    tools_image: String,
}

impl PodmanBootstrap {
    pub fn new(host: Arc<dyn HostProbe>, tools_image: &str) -> Self {
        Self {
            host,
            tools_image: tools_image.to_string(),
        }
    }

    async fn ensure_podman(&self, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError> {
        reporter.start("Checking podman installation...");
        match self.host.run("podman", &["--version"]).await {
            Ok(output) if output.success() => {
                let version = output.stdout.trim();
                info!(%version, "podman already installed");
                reporter.success(&format!("podman is installed ({version})"));
                return Ok(());
            }
            Ok(_) | Err(ProbeError::Spawn { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        warn!("podman not found, installing it with dnf");
        reporter.update("Installing podman...");
        let output = self.host.run("dnf", &["install", "-y", "podman"]).await?;
        if !output.success() {
            let detail = output_tail(&output.combined(), 5);
            reporter.failure("podman installation failed", None);
            return Err(BootstrapError::CommandFailed {
                step: "podman installation".to_string(),
                detail,
            });
        }
        reporter.success("podman installed");
        Ok(())
    }

    async fn repair_with_servicereport(
        &self,
        reporter: &dyn ProgressReporter,
    ) -> Result<(), BootstrapError> {
        reporter.start("Configuring the LPAR with ServiceReport...");
        let args = servicereport_args(&self.tools_image, &["-r", "-p", "spyre"]);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.host.run("podman", &args).await?;
        if !output.success() {
            let detail = output_tail(&output.combined(), 5);
            reporter.failure("ServiceReport repair failed", None);
            return Err(BootstrapError::CommandFailed {
                step: "ServiceReport repair".to_string(),
                detail,
            });
        }
        reporter.success("ServiceReport repair completed");
        Ok(())
    }
}

#[async_trait]
impl Bootstrap for PodmanBootstrap {
    #[instrument(skip_all)]
    async fn configure(&self, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError> {
        self.ensure_podman(reporter).await?;
        self.repair_with_servicereport(reporter).await?;
        info!("LPAR configured successfully");
        Ok(())
    }

    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::Podman
    }
}
