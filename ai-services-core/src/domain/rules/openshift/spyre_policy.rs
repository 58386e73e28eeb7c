// ai-services-core/src/domain/rules/openshift/spyre_policy.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::cluster::nested_str;
use crate::ports::{ClusterClient, ResourceKind};
use async_trait::async_trait;
use std::sync::Arc;

pub const SPYRE_POLICY_NAME: &str = "spyreclusterpolicy";
const READY_STATE: &str = "ready";

pub struct SpyrePolicyRule {
    cluster: Arc<dyn ClusterClient>,
    namespace: String,
}

impl SpyrePolicyRule {
    pub fn new(cluster: Arc<dyn ClusterClient>, namespace: &str) -> Self {
        Self {
            cluster,
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl Rule for SpyrePolicyRule {
    fn name(&self) -> &str {
        "spyre-cluster-policy"
    }

    fn description(&self) -> &str {
        "Validates that the SpyreClusterPolicy reports a ready state."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        let policy = self
            .cluster
            .get(
                &ResourceKind::SPYRE_CLUSTER_POLICY,
                SPYRE_POLICY_NAME,
                Some(&self.namespace),
            )
            .await?;

        let state = nested_str(&policy, &["status", "state"]).unwrap_or("unknown");
        if state != READY_STATE {
            return Err(RuleError::failed(format!(
                "spyre cluster policy is not ready (current state: {state})"
            )));
        }
        Ok(())
    }

    fn message(&self) -> String {
        "SpyreClusterPolicy is ready".to_string()
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        format!(
            "Run 'oc get spyreclusterpolicy -n {}' and ensure status.state is 'ready'.",
            self.namespace
        )
    }
}
