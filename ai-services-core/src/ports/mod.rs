// ai-services-core/src/ports/mod.rs
//
// Contracts the core needs from its environment. Rules and use cases only
// see these traits; adapters live in `infrastructure`.

pub mod cluster;
pub mod host;
pub mod logs;
pub mod progress;

pub use cluster::{ClusterClient, ClusterError, ResourceKind};
pub use host::{CommandOutput, HostProbe, ProbeError};
pub use logs::{LogError, LogSource, LogStream, LogTarget};
pub use progress::{ProgressReporter, SilentReporter};
