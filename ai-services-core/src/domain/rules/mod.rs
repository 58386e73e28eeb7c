// ai-services-core/src/domain/rules/mod.rs
//
// Built-in rule sets, one per substrate. Registration order is execution order:
// `root` comes first because every other host check needs its privileges.

pub mod openshift;
pub mod podman;

use crate::domain::error::DomainError;
use crate::domain::runtime::RuntimeType;
use crate::domain::validation::ValidationRegistry;
use crate::ports::{ClusterClient, HostProbe};
use std::sync::Arc;

pub fn build_podman_registry(
    host: Arc<dyn HostProbe>,
    tools_image: &str,
) -> Result<ValidationRegistry, DomainError> {
    let registry = ValidationRegistry::new(RuntimeType::Podman.as_str());
    registry.register(podman::RootRule::new(Arc::clone(&host)))?;
    registry.register(podman::NumaRule::new(Arc::clone(&host)))?;
    registry.register(podman::PlatformRule::new(Arc::clone(&host)))?;
    registry.register(podman::PowerRule::new(Arc::clone(&host)))?;
    registry.register(podman::RhnRule::new(Arc::clone(&host)))?;
    registry.register(podman::SpyreRule::new(Arc::clone(&host)))?;
    registry.register(podman::ServiceReportRule::new(host, tools_image))?;
    Ok(registry)
}

pub fn build_openshift_registry(
    cluster: Arc<dyn ClusterClient>,
    spyre_namespace: &str,
) -> Result<ValidationRegistry, DomainError> {
    let registry = ValidationRegistry::new(RuntimeType::OpenShift.as_str());
    registry.register(openshift::KubeconfigRule::new(Arc::clone(&cluster)))?;
    registry.register(openshift::OperatorRule::new(Arc::clone(&cluster)))?;
    registry.register(openshift::SpyrePolicyRule::new(
        Arc::clone(&cluster),
        spyre_namespace,
    ))?;
    registry.register(openshift::StorageClassRule::new(cluster))?;
    Ok(registry)
}
