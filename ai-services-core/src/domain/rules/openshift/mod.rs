// ai-services-core/src/domain/rules/openshift/mod.rs
//
// Cluster checks for the OpenShift substrate.

pub mod kubeconfig;
pub mod operators;
pub mod spyre_policy;
pub mod storage_class;

pub use kubeconfig::KubeconfigRule;
pub use operators::OperatorRule;
pub use spyre_policy::SpyrePolicyRule;
pub use storage_class::StorageClassRule;
