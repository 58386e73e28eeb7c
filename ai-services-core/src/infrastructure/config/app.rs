// ai-services-core/src/infrastructure/config/app.rs

use crate::domain::RuntimeType;
use crate::infrastructure::error::InfrastructureError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_TOOLS_IMAGE: &str = "icr.io/ai-services/tools:0.5";
pub const DEFAULT_SPYRE_NAMESPACE: &str = "spyre-operator";

const CONFIG_CANDIDATES: [&str; 2] = ["ai-services.yaml", "ai-services.yml"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeType,

    #[serde(default = "default_tools_image")]
    pub tools_image: String,

    #[serde(default)]
    pub cluster: ClusterSettings,

    #[serde(default)]
    pub bootstrap: BootstrapSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClusterSettings {
    /// Cluster command line client (`oc` or `kubectl`).
    #[serde(default = "default_cli")]
    pub cli: String,

    #[serde(default = "default_spyre_namespace")]
    pub spyre_namespace: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BootstrapSettings {
    /// Directory of operator manifests applied by `bootstrap configure` on OpenShift.
    #[serde(default)]
    pub manifests_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeType::default(),
            tools_image: default_tools_image(),
            cluster: ClusterSettings::default(),
            bootstrap: BootstrapSettings::default(),
        }
    }
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            spyre_namespace: default_spyre_namespace(),
            poll_interval_secs: default_poll_interval(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

impl ClusterSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

fn default_tools_image() -> String {
    DEFAULT_TOOLS_IMAGE.to_string()
}
fn default_cli() -> String {
    "oc".to_string()
}
fn default_spyre_namespace() -> String {
    DEFAULT_SPYRE_NAMESPACE.to_string()
}
fn default_poll_interval() -> u64 {
    5
}
fn default_poll_timeout() -> u64 {
    120
}

// --- LOADER ---

/// Loads the configuration: explicit file, else `ai-services.y(a)ml` in `dir`,
/// else defaults. Environment overrides are applied last.
#[instrument(skip(dir))]
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<AppConfig, InfrastructureError> {
    let mut config = match find_config(explicit, dir)? {
        Some(path) => {
            info!(path = ?path, "Loading configuration");
            let content = fs::read_to_string(&path)?;
            parse_config(&content)?
        }
        None => {
            debug!("No configuration file, using defaults");
            AppConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<AppConfig, InfrastructureError> {
    // an empty file is a valid, all-defaults configuration
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn find_config(explicit: Option<&Path>, dir: &Path) -> Result<Option<PathBuf>, InfrastructureError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file()))
}

/// Applies `AI_SERVICES_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("AI_SERVICES_RUNTIME") {
        let runtime = val
            .parse::<RuntimeType>()
            .map_err(|e| InfrastructureError::ConfigError(format!("AI_SERVICES_RUNTIME: {e}")))?;
        info!(old = %config.runtime, new = %runtime, "Overriding runtime via ENV");
        config.runtime = runtime;
    }
    if let Some(val) = lookup("AI_SERVICES_SPYRE_NAMESPACE") {
        info!(old = %config.cluster.spyre_namespace, new = %val, "Overriding spyre namespace via ENV");
        config.cluster.spyre_namespace = val;
    }
    Ok(())
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.cluster.poll_interval_secs == 0 {
        return Err(InfrastructureError::ConfigError(
            "cluster.poll_interval_secs must be greater than 0".to_string(),
        ));
    }
    if config.cluster.poll_timeout_secs < config.cluster.poll_interval_secs {
        return Err(InfrastructureError::ConfigError(
            "cluster.poll_timeout_secs must not be shorter than cluster.poll_interval_secs"
                .to_string(),
        ));
    }
    if config.tools_image.trim().is_empty() {
        return Err(InfrastructureError::ConfigError(
            "tools_image must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.runtime, RuntimeType::Podman);
        assert_eq!(config.tools_image, DEFAULT_TOOLS_IMAGE);
        assert_eq!(config.cluster.cli, "oc");
        assert_eq!(config.cluster.spyre_namespace, "spyre-operator");
        assert_eq!(config.cluster.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.cluster.poll_timeout(), Duration::from_secs(120));
        assert!(config.bootstrap.manifests_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let yaml = r#"
runtime: openshift
cluster:
  cli: kubectl
  poll_timeout_secs: 300
bootstrap:
  manifests_dir: /etc/ai-services/manifests
"#;
        let config = parse_config(yaml)?;
        assert_eq!(config.runtime, RuntimeType::OpenShift);
        assert_eq!(config.cluster.cli, "kubectl");
        assert_eq!(config.cluster.poll_timeout_secs, 300);
        assert_eq!(config.cluster.poll_interval_secs, 5);
        assert_eq!(config.tools_image, DEFAULT_TOOLS_IMAGE);
        assert_eq!(
            config.bootstrap.manifests_dir,
            Some(PathBuf::from("/etc/ai-services/manifests"))
        );
        Ok(())
    }

    #[test]
    fn test_empty_file_is_default() -> Result<()> {
        assert_eq!(parse_config("\n")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_runtime_in_yaml() {
        let err = parse_config("runtime: docker\n");
        assert!(matches!(err, Err(InfrastructureError::YamlError(_))));
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let env: HashMap<&str, &str> = [
            ("AI_SERVICES_RUNTIME", "OpenShift"),
            ("AI_SERVICES_SPYRE_NAMESPACE", "spyre-system"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()))?;
        assert_eq!(config.runtime, RuntimeType::OpenShift);
        assert_eq!(config.cluster.spyre_namespace, "spyre-system");
        Ok(())
    }

    #[test]
    fn test_bad_env_runtime_is_config_error() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, |key| {
            (key == "AI_SERVICES_RUNTIME").then(|| "lxc".to_string())
        });
        assert!(matches!(err, Err(InfrastructureError::ConfigError(ref msg)) if msg.contains("lxc")));
    }

    #[test]
    fn test_discovers_file_in_directory() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("ai-services.yml"), "tools_image: registry.local/tools:dev\n")?;

        let found = find_config(None, dir.path())?;
        assert_eq!(found, Some(dir.path().join("ai-services.yml")));
        let config = parse_config(&fs::read_to_string(found.unwrap())?)?;
        assert_eq!(config.tools_image, "registry.local/tools:dev");
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let err = find_config(Some(&dir.path().join("nope.yaml")), dir.path());
        assert!(matches!(err, Err(InfrastructureError::ConfigNotFound(_))));
        assert_eq!(find_config(None, dir.path())?, None);
        Ok(())
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.cluster.poll_interval_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = AppConfig::default();
        config.cluster.poll_timeout_secs = 1;
        assert!(validate(&config).is_err());

        assert!(validate(&AppConfig::default()).is_ok());
    }
}
