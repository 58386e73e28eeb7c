// ai-services-core/src/ports/cluster.rs

use async_trait::async_trait;
use miette::Diagnostic;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Schema address of a cluster resource (group / version / plural).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub group: &'static str,
    pub version: &'static str,
    pub plural: &'static str,
    pub kind: &'static str,
}

impl ResourceKind {
    pub const CLUSTER_SERVICE_VERSION: ResourceKind = ResourceKind {
        group: "operators.coreos.com",
        version: "v1alpha1",
        plural: "clusterserviceversions",
        kind: "ClusterServiceVersion",
    };

    pub const SUBSCRIPTION: ResourceKind = ResourceKind {
        group: "operators.coreos.com",
        version: "v1alpha1",
        plural: "subscriptions",
        kind: "Subscription",
    };

    pub const SPYRE_CLUSTER_POLICY: ResourceKind = ResourceKind {
        group: "spyre.ibm.com",
        version: "v1alpha1",
        plural: "spyreclusterpolicies",
        kind: "SpyreClusterPolicy",
    };

    pub const STORAGE_CLASS: ResourceKind = ResourceKind {
        group: "storage.k8s.io",
        version: "v1",
        plural: "storageclasses",
        kind: "StorageClass",
    };

    /// Fully qualified resource name understood by `kubectl get`.
    pub fn qualified(&self) -> String {
        if self.group.is_empty() {
            self.plural.to_string()
        } else {
            format!("{}.{}.{}", self.plural, self.version, self.group)
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ClusterError {
    #[error("{kind} '{name}' not found")]
    #[diagnostic(code(ai_services::cluster::not_found))]
    NotFound { kind: String, name: String },

    #[error("{kind} '{name}' already exists")]
    #[diagnostic(code(ai_services::cluster::already_exists))]
    AlreadyExists { kind: String, name: String },

    #[error("cluster is unreachable: {0}")]
    #[diagnostic(
        code(ai_services::cluster::unreachable),
        help("Check that KUBECONFIG points to a valid cluster and that you are logged in.")
    )]
    Unreachable(String),

    #[error("'{program}' failed: {detail}")]
    #[diagnostic(code(ai_services::cluster::command))]
    Command { program: String, detail: String },

    #[error("invalid cluster response: {0}")]
    #[diagnostic(code(ai_services::cluster::decode))]
    Decode(#[from] serde_json::Error),

    #[error("cluster I/O error: {0}")]
    #[diagnostic(code(ai_services::cluster::io))]
    Io(#[from] std::io::Error),
}

impl ClusterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClusterError::AlreadyExists { .. })
    }
}

/// Generic (dynamic) cluster access. Objects are returned as raw JSON.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Verifies the API server answers with the active credentials.
    /// Returns a short description of the server (version or context).
    async fn ping(&self) -> Result<String, ClusterError>;

    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Value>, ClusterError>;

    async fn get(
        &self,
        kind: &ResourceKind,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<Value, ClusterError>;

    async fn create(&self, manifest: &Value) -> Result<(), ClusterError>;

    async fn apply_file(&self, path: &Path) -> Result<(), ClusterError>;
}

/// Walks `path` through nested JSON objects and returns the string found there.
pub fn nested_str<'a>(object: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(object, |current, key| current.get(*key))
        .and_then(Value::as_str)
}

pub fn object_name(object: &Value) -> &str {
    nested_str(object, &["metadata", "name"]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qualified_resource_names() {
        assert_eq!(
            ResourceKind::CLUSTER_SERVICE_VERSION.qualified(),
            "clusterserviceversions.v1alpha1.operators.coreos.com"
        );
        assert_eq!(
            ResourceKind::SPYRE_CLUSTER_POLICY.api_version(),
            "spyre.ibm.com/v1alpha1"
        );
    }

    #[test]
    fn test_nested_str() {
        let obj = json!({
            "metadata": { "name": "nfd.4.18.0" },
            "status": { "phase": "Succeeded", "replicas": 3 }
        });
        assert_eq!(nested_str(&obj, &["status", "phase"]), Some("Succeeded"));
        assert_eq!(nested_str(&obj, &["status", "replicas"]), None);
        assert_eq!(nested_str(&obj, &["status", "missing"]), None);
        assert_eq!(object_name(&obj), "nfd.4.18.0");
        assert_eq!(object_name(&json!({})), "");
    }
}
