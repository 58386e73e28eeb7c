// ai-services-core/src/domain/rules/openshift/kubeconfig.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::ClusterClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct KubeconfigRule {
    cluster: Arc<dyn ClusterClient>,
}

impl KubeconfigRule {
    pub fn new(cluster: Arc<dyn ClusterClient>) -> Self {
        Self { cluster }
    }
}

#[async_trait]
impl Rule for KubeconfigRule {
    fn name(&self) -> &str {
        "kubeconfig"
    }

    fn description(&self) -> &str {
        "Validates that the cluster is reachable with the current kubeconfig."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        let server = self.cluster.ping().await?;
        debug!(server = %server, "Cluster API reachable");
        Ok(())
    }

    fn message(&self) -> String {
        "Cluster is reachable with the current kubeconfig".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "Log in with 'oc login' or set KUBECONFIG to a valid cluster configuration".to_string()
    }
}
