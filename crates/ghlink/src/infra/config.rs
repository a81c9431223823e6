//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static WORKSPACE_CONFIG_PATH: &str = ".ghlink/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub branches: BranchesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "RemoteConfig::default_preferred")]
    pub preferred: String,
}

impl RemoteConfig {
    fn default_preferred() -> String {
        "origin".into()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            preferred: Self::default_preferred(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchesConfig {
    #[serde(default = "BranchesConfig::default_defaults")]
    pub defaults: Vec<String>,
}

impl BranchesConfig {
    fn default_defaults() -> Vec<String> {
        vec!["main".into(), "master".into()]
    }
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            defaults: Self::default_defaults(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    copy: Option<bool>,
    #[serde(default)]
    format: Option<String>,
}

impl OutputConfig {
    pub fn copy(&self) -> bool {
        self.copy.unwrap_or(true)
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("plain")
    }

    pub fn set_copy(&mut self, copy: bool) {
        self.copy = Some(copy);
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    remote: Option<String>,
    format: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            remote: env::var("GHLINK_REMOTE").ok(),
            format: env::var("GHLINK_FORMAT").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(remote: &str, format: &str) -> Self {
        Self {
            remote: Some(remote.to_owned()),
            format: Some(format.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration for a file or directory at `start`, picking up the workspace layer
    /// from the enclosing repository if there is one.
    pub fn load_for(start: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = find_repo_root(start).map(|root| root.join(WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to parse TOML config")?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            remote: merge_remote(self.remote, other.remote),
            branches: merge_branches(self.branches, other.branches),
            output: merge_output(self.output, other.output),
        }
    }
}

fn merge_remote(base: RemoteConfig, overlay: RemoteConfig) -> RemoteConfig {
    if overlay.preferred != RemoteConfig::default_preferred() {
        overlay
    } else {
        base
    }
}

fn merge_branches(base: BranchesConfig, overlay: BranchesConfig) -> BranchesConfig {
    if overlay.defaults != BranchesConfig::default_defaults() {
        overlay
    } else {
        base
    }
}

fn merge_output(mut base: OutputConfig, overlay: OutputConfig) -> OutputConfig {
    if let Some(value) = overlay.copy {
        base.copy = Some(value);
    }
    if let Some(value) = overlay.format {
        base.format = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("ghlink/config.toml"))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(remote) = env.remote {
        config.remote.preferred = remote;
    }
    if let Some(format) = env.format {
        config.output.format = Some(format);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.remote.preferred, "origin");
        assert_eq!(config.branches.defaults, vec!["main", "master"]);
        assert!(config.output.copy());
        assert_eq!(config.output.format(), "plain");
    }

    #[test]
    fn bundled_defaults_match_code_defaults() -> Result<()> {
        let bundled = Config::from_str(&DEFAULT_CONFIG)?;
        assert_eq!(bundled.remote, RemoteConfig::default());
        assert_eq!(bundled.branches, BranchesConfig::default());
        Ok(())
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[remote]
preferred = "upstream"
[output]
copy = false
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".ghlink"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(WORKSPACE_CONFIG_PATH),
            r#"
[branches]
defaults = ["trunk"]
[output]
format = "json"
"#,
        )?;

        let nested = workspace_dir.join("src/deep");
        fs::create_dir_all(&nested)?;
        let workspace = find_repo_root(&nested).map(|root| root.join(WORKSPACE_CONFIG_PATH));
        assert_eq!(workspace, Some(workspace_dir.join(WORKSPACE_CONFIG_PATH)));

        let config = Config::load_with_layers(Some(global), workspace, EnvOverrides::default())?;

        assert_eq!(config.remote.preferred, "upstream");
        assert_eq!(config.branches.defaults, vec!["trunk"]);
        assert!(!config.output.copy());
        assert_eq!(config.output.format(), "json");
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("fork", "json");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.remote.preferred, "fork");
        assert_eq!(config.output.format(), "json");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
