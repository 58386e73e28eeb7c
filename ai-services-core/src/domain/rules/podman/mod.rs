// ai-services-core/src/domain/rules/podman/mod.rs
//
// Host checks for the podman substrate.

pub mod numa;
pub mod platform;
pub mod power;
pub mod rhn;
pub mod root;
pub mod servicereport;
pub mod spyre;

pub use numa::NumaRule;
pub use platform::PlatformRule;
pub use power::PowerRule;
pub use rhn::RhnRule;
pub use root::RootRule;
pub use servicereport::ServiceReportRule;
pub use spyre::SpyreRule;
