// ai-services-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (traits the core needs from the outside world)
// HostProbe, ClusterClient, ProgressReporter
pub mod ports;

// 2. Domain
// Rules, registries, skip sets, validation outcomes.
// Depends only on ports.
pub mod domain;

// 3. Infrastructure (Adapters)
// Real host probe, kubectl/oc client, spinners, config files.
pub mod infrastructure;

// 4. Application (Use Cases)
// Validation orchestrator, bootstrap factory, log streaming.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::AiServicesError;

#[cfg(test)]
pub(crate) mod testing;
