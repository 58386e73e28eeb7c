// ai-services-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod host;
pub mod kubectl;
pub mod logs;
pub mod spinner;

pub use host::SystemHost;
pub use kubectl::KubectlClient;
pub use logs::CommandLogSource;
pub use spinner::SpinnerReporter;
