// ai-services-core/src/infrastructure/logs.rs

use crate::domain::RuntimeType;
use crate::ports::{LogError, LogSource, LogStream, LogTarget};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Follows logs by running `podman pod logs -f` or `oc logs -f`.
#[derive(Debug, Clone)]
pub struct CommandLogSource {
    runtime: RuntimeType,
    program: String,
}

impl CommandLogSource {
    pub fn podman() -> Self {
        Self {
            runtime: RuntimeType::Podman,
            program: "podman".to_string(),
        }
    }

    pub fn cluster(cli: impl Into<String>) -> Self {
        Self {
            runtime: RuntimeType::OpenShift,
            program: cli.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self, target: &LogTarget) -> Vec<String> {
        let mut args = Vec::new();
        match self.runtime {
            RuntimeType::Podman => {
                args.extend(["pod", "logs", "-f"].map(String::from));
                if let Some(container) = &target.container {
                    args.extend(["--container".to_string(), container.clone()]);
                }
                args.push(target.pod.clone());
            }
            RuntimeType::OpenShift => {
                args.extend(["logs", "-f"].map(String::from));
                args.push(target.pod.clone());
                if let Some(container) = &target.container {
                    args.extend(["-c".to_string(), container.clone()]);
                }
                if let Some(ns) = &target.namespace {
                    args.extend(["-n".to_string(), ns.clone()]);
                }
            }
        }
        args
    }
}

#[async_trait]
impl LogSource for CommandLogSource {
    async fn follow(&self, target: &LogTarget) -> Result<LogStream, LogError> {
        let args = self.args(target);
        debug!(program = %self.program, ?args, "Following logs");

        let spawn_error = |source| LogError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            spawn_error(std::io::Error::other("stdout was not captured"))
        })?;

        // the child lives in the exit future; dropping the stream kills it
        let program = self.program.clone();
        let exit = async move {
            let status = child.wait().await.map_err(LogError::Stream)?;
            if !status.success() {
                return Err(LogError::Exited { program, status });
            }
            Ok::<(), LogError>(())
        };
        Ok(LogStream::new(stdout).with_exit(exit))
    }
}
