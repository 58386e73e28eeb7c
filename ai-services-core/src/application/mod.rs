// ai-services-core/src/application/mod.rs

pub mod bootstrap;
pub mod help;
pub mod logs;
pub mod validation;
pub mod wait;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs:
// `use ai_services_core::application::{BootstrapFactory, run_validation, stream_logs};`

pub use bootstrap::{Bootstrap, BootstrapError, BootstrapFactory};
pub use help::describe_checks;
pub use logs::{StreamEnd, stream_logs};
pub use validation::{ValidationError, run_validation};
pub use wait::{PollSettings, WaitError, poll_until_ready};
