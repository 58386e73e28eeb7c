// ai-services-core/src/domain/rules/openshift/operators.rs

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::cluster::{nested_str, object_name};
use crate::ports::{ClusterClient, ResourceKind};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

const PHASE_SUCCEEDED: &str = "Succeeded";

/// Operators the AI Services stack depends on: display name, CSV name prefix.
pub const REQUIRED_OPERATORS: [(&str, &str); 5] = [
    ("Secondary Scheduler Operator", "secondaryscheduleroperator"),
    ("Cert-Manager Operator", "cert-manager-operator"),
    ("Service Mesh 3 Operator", "servicemeshoperator3"),
    ("Node Feature Discovery Operator", "nfd"),
    ("RHOAI Operator", "rhods-operator"),
];

/// Finds the CSV of `prefix` and checks it finished installing.
pub fn check_operator(csvs: &[Value], prefix: &str) -> Result<(), String> {
    let wanted = format!("{prefix}.");
    let Some(csv) = csvs.iter().find(|csv| object_name(csv).starts_with(&wanted)) else {
        return Err(format!("operator not installed: {prefix}"));
    };

    match nested_str(csv, &["status", "phase"]) {
        Some(PHASE_SUCCEEDED) => Ok(()),
        phase => Err(format!(
            "operator {} found but not ready (phase={})",
            object_name(csv),
            phase.unwrap_or_default()
        )),
    }
}

pub struct OperatorRule {
    cluster: Arc<dyn ClusterClient>,
    passed: Mutex<Vec<String>>,
}

impl OperatorRule {
    pub fn new(cluster: Arc<dyn ClusterClient>) -> Self {
        Self {
            cluster,
            passed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Rule for OperatorRule {
    fn name(&self) -> &str {
        "operators"
    }

    fn description(&self) -> &str {
        "Validates that all required operators are installed and ready."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        let csvs = self
            .cluster
            .list(&ResourceKind::CLUSTER_SERVICE_VERSION, None)
            .await?;
        debug!(count = csvs.len(), "Listed ClusterServiceVersions");

        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for (display, prefix) in REQUIRED_OPERATORS {
            match check_operator(&csvs, prefix) {
                Ok(()) => passed.push(format!("  - {display} installed")),
                Err(reason) => failed.push(format!("  - {display}: {reason}")),
            }
        }

        let report = passed.iter().chain(failed.iter()).cloned().collect::<Vec<_>>();
        *self.passed.lock().unwrap_or_else(PoisonError::into_inner) = passed;

        if !failed.is_empty() {
            return Err(RuleError::failed(format!(
                "operator validation failed: \n{}",
                report.join("\n")
            )));
        }
        Ok(())
    }

    fn message(&self) -> String {
        let passed = self.passed.lock().unwrap_or_else(PoisonError::into_inner);
        format!("Operators installed\n{}", passed.join("\n"))
    }

    fn level(&self) -> Severity {
        Severity::Error
    }

    fn hint(&self) -> String {
        "This tool requires certain operators to be up and running, please run `ai-services bootstrap configure` to install required operators".to_string()
    }
}
