// ai-services/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use ai_services_core::application::describe_checks;
use ai_services_core::domain::RuntimeType;
use ai_services_core::domain::rules::{build_openshift_registry, build_podman_registry};
use ai_services_core::infrastructure::config::app::{DEFAULT_SPYRE_NAMESPACE, DEFAULT_TOOLS_IMAGE};
use ai_services_core::infrastructure::{KubectlClient, SystemHost};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ai-services")]
#[command(about = "Provision, validate and manage AI Services applications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Runtime to target (overrides config file and AI_SERVICES_RUNTIME)
    #[arg(long, short, global = true)]
    pub runtime: Option<RuntimeType>,

    /// Configuration file (default: ./ai-services.yaml when present)
    #[arg(long, global = true, env = "AI_SERVICES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Configures and validates the runtime (configure + validate)
    #[command(after_help = checks_help())]
    Bootstrap {
        #[command(subcommand)]
        action: Option<BootstrapAction>,
    },

    /// 📦 Manages deployed applications
    Application {
        #[command(subcommand)]
        action: ApplicationAction,
    },

    /// 🏷️ Prints version information
    Version,
}

#[derive(Subcommand)]
pub enum BootstrapAction {
    /// 🔧 Installs and configures the runtime prerequisites
    Configure,

    /// ✅ Validates the runtime prerequisites
    #[command(after_help = checks_help())]
    Validate {
        /// Comma separated list of checks to skip (ex: "numa,rhn")
        #[arg(long = "skip-validation", value_delimiter = ',')]
        skip_validation: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ApplicationAction {
    /// 📜 Follows the logs of an application pod (Ctrl+C to stop)
    Logs {
        /// Pod name
        pod: String,

        /// Only follow this container
        #[arg(long, short)]
        container: Option<String>,

        /// Cluster namespace (openshift runtime)
        #[arg(long, short)]
        namespace: Option<String>,
    },
}

/// Checks of every runtime, rendered for `--help`. Building the registries
/// performs no I/O.
pub fn checks_help() -> String {
    let podman = build_podman_registry(Arc::new(SystemHost::new()), DEFAULT_TOOLS_IMAGE);
    let openshift = build_openshift_registry(Arc::new(KubectlClient::new("oc")), DEFAULT_SPYRE_NAMESPACE);
    match (podman, openshift) {
        (Ok(podman), Ok(openshift)) => describe_checks(&[&podman, &openshift]),
        _ => String::new(),
    }
}
