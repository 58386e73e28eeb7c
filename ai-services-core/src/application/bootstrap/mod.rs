// ai-services-core/src/application/bootstrap/mod.rs
//
// Entry points of `ai-services bootstrap`: provisioning (`configure`) and
// prerequisite validation, bound to the active runtime.

pub mod openshift;
pub mod podman;

use crate::application::validation::{ValidationError, run_validation};
use crate::application::wait::{PollSettings, WaitError};
use crate::domain::error::DomainError;
use crate::domain::rules::{build_openshift_registry, build_podman_registry};
use crate::domain::validation::{SkipSet, ValidationRegistry, ValidationReport};
use crate::domain::RuntimeType;
use crate::infrastructure::config::AppConfig;
use crate::ports::{ClusterClient, ClusterError, HostProbe, ProbeError, ProgressReporter};
use async_trait::async_trait;
use miette::Diagnostic;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

pub use openshift::OpenShiftBootstrap;
pub use podman::PodmanBootstrap;

#[derive(Error, Debug, Diagnostic)]
pub enum BootstrapError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Wait(#[from] WaitError),

    #[error("{step} failed: {detail}")]
    #[diagnostic(code(ai_services::bootstrap::command))]
    CommandFailed { step: String, detail: String },

    #[error("cannot read manifests directory '{}': {source}", path.display())]
    #[diagnostic(code(ai_services::bootstrap::manifests))]
    Manifests {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no *.yaml or *.yml manifest found in '{}'", .0.display())]
    #[diagnostic(
        code(ai_services::bootstrap::no_manifests),
        help("Point bootstrap.manifests_dir at the directory holding the operator manifests.")
    )]
    NoManifests(PathBuf),

    #[error("cannot derive the SpyreClusterPolicy from the operator: {0}")]
    #[diagnostic(code(ai_services::bootstrap::policy))]
    PolicyTemplate(String),
}

/// Provisioning of one runtime.
#[async_trait]
pub trait Bootstrap: Send + Sync {
    /// Installs or repairs what the runtime needs before applications can run.
    async fn configure(&self, reporter: &dyn ProgressReporter) -> Result<(), BootstrapError>;

    fn runtime_type(&self) -> RuntimeType;
}

/// Binds the rule registry and the provisioning implementation to a runtime.
pub struct BootstrapFactory {
    runtime: RuntimeType,
    config: AppConfig,
    host: Arc<dyn HostProbe>,
    cluster: Arc<dyn ClusterClient>,
    registry: ValidationRegistry,
}

impl BootstrapFactory {
    pub fn new(
        runtime: RuntimeType,
        config: AppConfig,
        host: Arc<dyn HostProbe>,
        cluster: Arc<dyn ClusterClient>,
    ) -> Result<Self, DomainError> {
        let registry = match runtime {
            RuntimeType::Podman => build_podman_registry(Arc::clone(&host), &config.tools_image)?,
            RuntimeType::OpenShift => build_openshift_registry(
                Arc::clone(&cluster),
                &config.cluster.spyre_namespace,
            )?,
        };
        Ok(Self {
            runtime,
            config,
            host,
            cluster,
            registry,
        })
    }

    pub fn runtime(&self) -> RuntimeType {
        self.runtime
    }

    pub fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    pub fn create(&self) -> Box<dyn Bootstrap> {
        match self.runtime {
            RuntimeType::Podman => Box::new(PodmanBootstrap::new(
                Arc::clone(&self.host),
                &self.config.tools_image,
            )),
            RuntimeType::OpenShift => Box::new(OpenShiftBootstrap::new(
                Arc::clone(&self.cluster),
                &self.config.cluster.spyre_namespace,
                self.config.bootstrap.manifests_dir.clone(),
                PollSettings {
                    interval: self.config.cluster.poll_interval(),
                    timeout: self.config.cluster.poll_timeout(),
                },
            )),
        }
    }

    #[instrument(skip_all, fields(runtime = %self.runtime))]
    pub async fn validate(
        &self,
        skip: &SkipSet,
        reporter: &dyn ProgressReporter,
    ) -> Result<ValidationReport, ValidationError> {
        info!(checks = self.registry.len(), skipped = skip.len(), "Running bootstrap validation");
        run_validation(&self.registry, skip, reporter).await
    }
}
