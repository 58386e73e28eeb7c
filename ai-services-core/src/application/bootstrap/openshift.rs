// ai-services-core/src/application/bootstrap/openshift.rs

use super::{Bootstrap, BootstrapError};
use crate::application::wait::{PollSettings, poll_until_ready};
use crate::domain::RuntimeType;
use crate::domain::rules::openshift::spyre_policy::SPYRE_POLICY_NAME;
use crate::ports::cluster::nested_str;
use crate::ports::{ClusterClient, ClusterError, ProgressReporter, ResourceKind};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const SPYRE_SUBSCRIPTION: &str = "spyre-operator";
const ALM_EXAMPLES: &str = "alm-examples";
const EXTERNAL_DEVICE_RESERVATION: &str = "externalDeviceReservation";

pub struct OpenShiftBootstrap {
    cluster: Arc<dyn ClusterClient>,
    namespace: String,
    manifests_dir: Option<PathBuf>,
    poll: PollSettings,
}

/// Manifests of `dir` applied in name order.
pub fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, BootstrapError> {
    let entries = std::fs::read_dir(dir).map_err(|source| BootstrapError::Manifests {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| BootstrapError::Manifests {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if path.is_file() && is_yaml {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(BootstrapError::NoManifests(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// `spec` of the SpyreClusterPolicy example shipped in the operator CSV.
pub fn policy_spec_from_csv(csv: &Value) -> Result<Value, BootstrapError> {
    let raw = nested_str(csv, &["metadata", "annotations", ALM_EXAMPLES]).ok_or_else(|| {
        BootstrapError::PolicyTemplate(format!("annotation '{ALM_EXAMPLES}' is missing"))
    })?;
    let examples: Vec<Value> = serde_json::from_str(raw).map_err(|e| {
        BootstrapError::PolicyTemplate(format!("annotation '{ALM_EXAMPLES}' is not valid JSON: {e}"))
    })?;

    examples
        .into_iter()
        .find(|example| {
            nested_str(example, &["kind"]) == Some(ResourceKind::SPYRE_CLUSTER_POLICY.kind)
        })
        .and_then(|mut example| example.get_mut("spec").map(Value::take))
        .ok_or_else(|| {
            BootstrapError::PolicyTemplate(format!(
                "no {} example with a spec",
                ResourceKind::SPYRE_CLUSTER_POLICY.kind
            ))
        })
}

/// Drops the `externalDeviceReservation` experimental mode; other entries are kept as is.
pub fn strip_external_device_reservation(spec: &mut Value) {
    if let Some(Value::Array(modes)) = spec.get_mut("experimentalMode") {
        modes.retain(|mode| mode.as_str() != Some(EXTERNAL_DEVICE_RESERVATION));
    }
}

pub fn spyre_policy_manifest(spec: Value, namespace: &str) -> Value {
    let kind = ResourceKind::SPYRE_CLUSTER_POLICY;
    json!({
        "apiVersion": kind.api_version(),
        "kind": kind.kind,
        "metadata": {
            "name": SPYRE_POLICY_NAME,
            "namespace": namespace,
        },
        "spec": spec,
    })
}

impl OpenShiftBootstrap {
    pub fn new(
        cluster: Arc<dyn ClusterClient>,
        namespace: &str,
        manifests_dir: Option<PathBuf>,
        poll: PollSettings,
    ) -> Self {
        Self {
            cluster,
            namespace: namespace.to_string(),
            manifests_dir,
            poll,
        }
    }

    async fn apply_manifests(&self, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError> {
        let Some(dir) = &self.manifests_dir else {
            warn!("bootstrap.manifests_dir is not set, operator manifests are not applied");
            reporter.warning("No manifests directory configured; assuming the operators are already installed");
            return Ok(());
        };

        reporter.start("Applying operator manifests...");
        for file in manifest_files(dir)? {
            debug!(file = %file.display(), "Applying manifest");
            reporter.update(&format!("Applying {}...", file.display()));
            self.cluster.apply_file(&file).await?;
        }
        reporter.success("Operator manifests applied");
        Ok(())
    }

    async fn wait_for_operator(&self, reporter: &dyn ProgressReporter) -> Result<Value, BootstrapError> {
        reporter.start("Waiting for the Spyre operator...");
        let cluster = self.cluster.as_ref();
        let ns = self.namespace.as_str();

        let csv_name = poll_until_ready("Subscription spyre-operator", self.poll, move || async move {
            let subscription = cluster
                .get(&ResourceKind::SUBSCRIPTION, SPYRE_SUBSCRIPTION, Some(ns))
                .await?;
            // the subscription exists before OLM resolves its CSV
            nested_str(&subscription, &["status", "currentCSV"])
                .filter(|csv| !csv.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ClusterError::NotFound {
                    kind: ResourceKind::CLUSTER_SERVICE_VERSION.kind.to_string(),
                    name: format!("{SPYRE_SUBSCRIPTION} (currentCSV)"),
                })
        })
        .await?;
        reporter.update(&format!("Waiting for {csv_name}..."));

        let csv_ref = csv_name.as_str();
        let csv = poll_until_ready(&format!("ClusterServiceVersion {csv_name}"), self.poll, move || {
            cluster.get(&ResourceKind::CLUSTER_SERVICE_VERSION, csv_ref, Some(ns))
        })
        .await?;
        reporter.success(&format!("Spyre operator available ({csv_name})"));
        Ok(csv)
    }

    async fn create_policy(&self, csv: &Value, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError> {
        reporter.start("Creating the SpyreClusterPolicy...");
        let mut spec = policy_spec_from_csv(csv)?;
        strip_external_device_reservation(&mut spec);

        match self
            .cluster
            .create(&spyre_policy_manifest(spec, &self.namespace))
            .await
        {
            Ok(()) => reporter.success("SpyreClusterPolicy created"),
            Err(err) if err.is_already_exists() => {
                info!("SpyreClusterPolicy already exists");
                reporter.success("SpyreClusterPolicy already exists");
            }
            Err(err) => {
                reporter.failure(&err.to_string(), None);
                return Err(err.into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Bootstrap for OpenShiftBootstrap {
    #[instrument(skip_all, fields(namespace = %self.namespace))]
    async fn configure(&self, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError> {
        self.apply_manifests(reporter).await?;
        let csv = self.wait_for_operator(reporter).await?;
        self.create_policy(&csv, reporter).await?;
        info!("Cluster configured successfully");
        Ok(())
    }

    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::OpenShift
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::wait::WaitError;
    use crate::testing::{FakeCluster, RecordingReporter};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    const NS: &str = "spyre-operator";
    const CSV: &str = "spyre-operator.v1.0.0";

    fn fast() -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(5),
            timeout: Duration::from_millis(200),
        }
    }

    fn alm_examples() -> String {
        json!([
            { "apiVersion": "spyre.ibm.com/v1alpha1", "kind": "SpyreNodeState", "spec": {} },
            {
                "apiVersion": "spyre.ibm.com/v1alpha1",
                "kind": "SpyreClusterPolicy",
                "metadata": { "name": "example" },
                "spec": {
                    "experimentalMode": ["perDeviceAllocation", "externalDeviceReservation", 7],
                    "devicePlugin": { "enabled": true }
                }
            }
        ])
        .to_string()
    }

    fn operator_cluster() -> FakeCluster {
        FakeCluster::reachable()
            .with_object(
                &ResourceKind::SUBSCRIPTION,
                json!({
                    "metadata": { "name": SPYRE_SUBSCRIPTION, "namespace": NS },
                    "status": { "currentCSV": CSV }
                }),
            )
            .with_object(
                &ResourceKind::CLUSTER_SERVICE_VERSION,
                json!({
                    "metadata": {
                        "name": CSV,
                        "namespace": NS,
                        "annotations": { ALM_EXAMPLES: alm_examples() }
                    },
                    "status": { "phase": "Succeeded" }
                }),
            )
    }

    #[test]
    fn test_policy_spec_from_csv() -> anyhow::Result<()> {
        let csv = json!({ "metadata": { "annotations": { ALM_EXAMPLES: alm_examples() } } });
        let mut spec = policy_spec_from_csv(&csv)?;
        strip_external_device_reservation(&mut spec);

        assert_eq!(spec["experimentalMode"], json!(["perDeviceAllocation", 7]));
        assert_eq!(spec["devicePlugin"]["enabled"], json!(true));
        Ok(())
    }

    #[test]
    fn test_policy_spec_errors() {
        let missing = json!({ "metadata": {} });
        assert!(matches!(policy_spec_from_csv(&missing), Err(BootstrapError::PolicyTemplate(_))));

        let garbage = json!({ "metadata": { "annotations": { ALM_EXAMPLES: "{not json" } } });
        assert!(matches!(policy_spec_from_csv(&garbage), Err(BootstrapError::PolicyTemplate(ref m)) if m.contains("not valid JSON")));

        let other_kind = json!({ "metadata": { "annotations": { ALM_EXAMPLES: "[{\"kind\":\"Other\",\"spec\":{}}]" } } });
        assert!(policy_spec_from_csv(&other_kind).is_err());
    }

    #[test]
    fn test_strip_without_experimental_mode() {
        let mut spec = json!({ "devicePlugin": {} });
        strip_external_device_reservation(&mut spec);
        assert_eq!(spec, json!({ "devicePlugin": {} }));
    }

    #[test]
    fn test_policy_manifest_shape() {
        let manifest = spyre_policy_manifest(json!({ "a": 1 }), NS);
        assert_eq!(manifest["apiVersion"], "spyre.ibm.com/v1alpha1");
        assert_eq!(manifest["kind"], "SpyreClusterPolicy");
        assert_eq!(manifest["metadata"]["name"], "spyreclusterpolicy");
        assert_eq!(manifest["metadata"]["namespace"], NS);
    }

    #[test]
    fn test_manifest_files_sorted_and_filtered() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("20-subscription.yml"), "kind: Subscription")?;
        fs::write(dir.path().join("10-namespace.yaml"), "kind: Namespace")?;
        fs::write(dir.path().join("README.md"), "docs")?;
        fs::create_dir(dir.path().join("nested.yaml"))?;

        let files = manifest_files(dir.path())?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["10-namespace.yaml", "20-subscription.yml"]);
        Ok(())
    }

    #[test]
    fn test_manifest_dir_errors() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert!(matches!(manifest_files(dir.path()), Err(BootstrapError::NoManifests(_))));
        assert!(matches!(
            manifest_files(&dir.path().join("missing")),
            Err(BootstrapError::Manifests { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_configure_applies_waits_and_creates_policy() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("operators.yaml"), "kind: List")?;
        let cluster = Arc::new(operator_cluster().hidden_for_gets(2));
        let bootstrap = OpenShiftBootstrap::new(cluster.clone(), NS, Some(dir.path().to_path_buf()), fast());

        bootstrap.configure(&RecordingReporter::default()).await?;

        assert_eq!(cluster.applied(), vec![dir.path().join("operators.yaml")]);
        let created = cluster.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["metadata"]["name"], SPYRE_POLICY_NAME);
        assert_eq!(created[0]["spec"]["experimentalMode"], json!(["perDeviceAllocation", 7]));
        // two hidden gets, then subscription and csv
        assert_eq!(cluster.get_calls(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_configure_twice_is_successful() -> anyhow::Result<()> {
        let cluster = Arc::new(operator_cluster());
        let bootstrap = OpenShiftBootstrap::new(cluster.clone(), NS, None, fast());
        let reporter = RecordingReporter::default();

        bootstrap.configure(&reporter).await?;
        bootstrap.configure(&reporter).await?;

        assert_eq!(cluster.created().len(), 1);
        assert!(cluster.applied().is_empty());
        assert!(reporter.events().contains(&"success: SpyreClusterPolicy already exists".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_without_csv_times_out() {
        let cluster = FakeCluster::reachable().with_object(
            &ResourceKind::SUBSCRIPTION,
            json!({ "metadata": { "name": SPYRE_SUBSCRIPTION, "namespace": NS }, "status": {} }),
        );
        let bootstrap = OpenShiftBootstrap::new(Arc::new(cluster), NS, None, fast());

        let result = bootstrap.configure(&RecordingReporter::default()).await;
        assert!(matches!(result, Err(BootstrapError::Wait(WaitError::Timeout { .. }))));
    }

    #[tokio::test]
    async fn test_unreachable_cluster_fails_fast() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("operators.yaml"), "kind: List").unwrap();
        let bootstrap = OpenShiftBootstrap::new(
            Arc::new(FakeCluster::unreachable()),
            NS,
            Some(dir.path().to_path_buf()),
            fast(),
        );

        let result = bootstrap.configure(&RecordingReporter::default()).await;
        assert!(matches!(result, Err(BootstrapError::Cluster(ClusterError::Unreachable(_)))));
    }
}
