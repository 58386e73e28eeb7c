// ai-services-core/src/domain/rules/openshift/storage_class.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::cluster::{nested_str, object_name};
use crate::ports::{ClusterClient, ResourceKind};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

/// Name of the class annotated as cluster default, if any.
pub fn default_class(classes: &[Value]) -> Option<&str> {
    classes
        .iter()
        .find(|class| {
            nested_str(class, &["metadata", "annotations", DEFAULT_CLASS_ANNOTATION])
                .is_some_and(|value| value.eq_ignore_ascii_case("true"))
        })
        .map(object_name)
}

pub struct StorageClassRule {
    cluster: Arc<dyn ClusterClient>,
    default: Mutex<Option<String>>,
}

impl StorageClassRule {
    pub fn new(cluster: Arc<dyn ClusterClient>) -> Self {
        Self {
            cluster,
            default: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Rule for StorageClassRule {
    fn name(&self) -> &str {
        "storageclass"
    }

    fn description(&self) -> &str {
        "Validates that a StorageClass is available for persistent volumes."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        let classes = self.cluster.list(&ResourceKind::STORAGE_CLASS, None).await?;
        *self.default.lock().unwrap_or_else(PoisonError::into_inner) =
            default_class(&classes).map(str::to_string);

        if classes.is_empty() {
            return Err(RuleError::failed("no StorageClass found in the cluster"));
        }
        Ok(())
    }

    fn message(&self) -> String {
        match self
            .default
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
        {
            Some(name) => format!("StorageClass available (default: {name})"),
            None => "StorageClass available".to_string(),
        }
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "Create a StorageClass (and mark one as default) so applications can claim persistent volumes".to_string()
    }
}
