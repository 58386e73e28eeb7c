// ai-services-core/src/infrastructure/kubectl.rs

use crate::ports::cluster::{nested_str, object_name};
use crate::ports::{ClusterClient, ClusterError, ResourceKind};
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument};

const UNREACHABLE_MARKERS: [&str; 5] = [
    "Unable to connect to the server",
    "connection refused",
    "no such host",
    "You must be logged in",
    "Unauthorized",
];

/// Cluster access through the `oc` (or `kubectl`) command line client.
#[derive(Debug, Clone)]
pub struct KubectlClient {
    cli: String,
}

impl KubectlClient {
    pub fn new(cli: impl Into<String>) -> Self {
        Self { cli: cli.into() }
    }

    pub fn cli(&self) -> &str {
        &self.cli
    }

    async fn exec(&self, args: &[String]) -> Result<std::process::Output, ClusterError> {
        debug!(cli = %self.cli, ?args, "Calling cluster CLI");
        let output = Command::new(&self.cli)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(output)
    }

    async fn exec_json(&self, args: &[String], kind: &str, name: &str) -> Result<Value, ClusterError> {
        let output = self.exec(args).await?;
        if !output.status.success() {
            return Err(classify_failure(
                &self.cli,
                &String::from_utf8_lossy(&output.stderr),
                kind,
                name,
            ));
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    async fn exec_unit(&self, args: &[String], kind: &str, name: &str) -> Result<(), ClusterError> {
        let output = self.exec(args).await?;
        if !output.status.success() {
            return Err(classify_failure(
                &self.cli,
                &String::from_utf8_lossy(&output.stderr),
                kind,
                name,
            ));
        }
        Ok(())
    }
}

/// Arguments of `get`, one object when `name` is set, a list otherwise.
pub fn get_args(kind: &ResourceKind, name: Option<&str>, namespace: Option<&str>) -> Vec<String> {
    let mut args = vec!["get".to_string(), kind.qualified()];
    if let Some(name) = name {
        args.push(name.to_string());
    }
    match namespace {
        Some(ns) => args.extend(["-n".to_string(), ns.to_string()]),
        None if name.is_none() => args.push("--all-namespaces".to_string()),
        None => {}
    }
    args.extend(["-o".to_string(), "json".to_string()]);
    args
}

/// Turns the stderr of a failed CLI call into a typed error.
pub fn classify_failure(cli: &str, stderr: &str, kind: &str, name: &str) -> ClusterError {
    let detail = stderr.trim();
    if detail.contains("(NotFound)") || detail.contains("not found") {
        return ClusterError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        };
    }
    if detail.contains("(AlreadyExists)") || detail.contains("already exists") {
        return ClusterError::AlreadyExists {
            kind: kind.to_string(),
            name: name.to_string(),
        };
    }
    if UNREACHABLE_MARKERS.iter().any(|m| detail.contains(m)) {
        return ClusterError::Unreachable(detail.to_string());
    }
    ClusterError::Command {
        program: cli.to_string(),
        detail: detail.to_string(),
    }
}

#[async_trait]
impl ClusterClient for KubectlClient {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<String, ClusterError> {
        let args = ["version", "-o", "json"].map(String::from);
        let output = self.exec(&args).await?;
        let version: Value = serde_json::from_slice(&output.stdout).unwrap_or(Value::Null);

        // `version` prints the client part even when the server cannot be reached
        match nested_str(&version, &["serverVersion", "gitVersion"]) {
            Some(server) if output.status.success() => Ok(server.to_string()),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let detail = stderr.trim();
                Err(ClusterError::Unreachable(if detail.is_empty() {
                    "server version unavailable".to_string()
                } else {
                    detail.to_string()
                }))
            }
        }
    }

    #[instrument(skip(self), fields(kind = kind.kind))]
    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Value>, ClusterError> {
        let mut list = self
            .exec_json(&get_args(kind, None, namespace), kind.kind, "")
            .await?;
        match list.get_mut("items").map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            _ => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self), fields(kind = kind.kind))]
    async fn get(
        &self,
        kind: &ResourceKind,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<Value, ClusterError> {
        self.exec_json(&get_args(kind, Some(name), namespace), kind.kind, name)
            .await
    }

    #[instrument(skip(self, manifest), fields(name = object_name(manifest)))]
    async fn create(&self, manifest: &Value) -> Result<(), ClusterError> {
        let kind = nested_str(manifest, &["kind"]).unwrap_or("object");
        let name = object_name(manifest);

        let mut file = tempfile::Builder::new()
            .prefix("ai-services-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(&serde_json::to_vec(manifest)?)?;
        file.flush()?;

        let args = vec![
            "create".to_string(),
            "-f".to_string(),
            file.path().display().to_string(),
        ];
        self.exec_unit(&args, kind, name).await
    }

    #[instrument(skip(self))]
    async fn apply_file(&self, path: &Path) -> Result<(), ClusterError> {
        let args = vec![
            "apply".to_string(),
            "-f".to_string(),
            path.display().to_string(),
        ];
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.exec_unit(&args, "manifest", &name).await
    }
}
