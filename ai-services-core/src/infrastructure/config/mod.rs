pub mod app;

pub use app::{AppConfig, BootstrapSettings, ClusterSettings, load_config};
