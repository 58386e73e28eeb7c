// ai-services-core/src/infrastructure/host.rs

use crate::ports::{CommandOutput, HostProbe, ProbeError};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Host probe backed by the real filesystem and process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

/// Maps Rust target names to the names used by Linux distributions.
pub fn distribution_arch(arch: &str, little_endian: bool) -> String {
    match (arch, little_endian) {
        ("powerpc64", true) => "ppc64le".to_string(),
        ("powerpc64", false) => "ppc64".to_string(),
        (other, _) => other.to_string(),
    }
}

#[async_trait]
impl HostProbe for SystemHost {
    async fn read_to_string(&self, path: &str) -> Result<String, ProbeError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ProbeError::Read {
                path: path.to_string(),
                source,
            })
    }

    #[instrument(skip(self))]
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let result = CommandOutput {
            // killed by a signal: no exit code
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(status = result.status, "Command finished");
        Ok(result)
    }

    fn arch(&self) -> String {
        distribution_arch(std::env::consts::ARCH, cfg!(target_endian = "little"))
    }
}
