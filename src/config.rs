use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "podpublish.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".podpublish.toml";

/// Represents the complete configuration for pod-publish.
///
/// Contains publish targets, proxy settings for subprocesses, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_private_repo() -> String {
    "Specs".to_string()
}

fn default_commit_message() -> String {
    "Bump version to {version}".to_string()
}

fn default_tag_format() -> String {
    "{version}".to_string()
}

fn default_allow_warnings() -> bool {
    true
}

/// Where and how a release is published.
///
/// `commit_message` and `tag_format` are templates; `{version}` is replaced
/// with the bumped version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_private_repo")]
    pub private_repo: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    /// Pass `--allow-warnings` to `pod lib lint` and `pod repo push`
    #[serde(default = "default_allow_warnings")]
    pub allow_warnings: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            branch: default_branch(),
            remote: default_remote(),
            private_repo: default_private_repo(),
            commit_message: default_commit_message(),
            tag_format: default_tag_format(),
            allow_warnings: default_allow_warnings(),
        }
    }
}

impl PublishConfig {
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }

    pub fn tag_for(&self, version: &str) -> String {
        self.tag_format.replace("{version}", version)
    }
}

/// Proxy settings handed to every spawned `git` and `pod` process.
///
/// Never applied to the pod-publish process itself.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProxyConfig {
    #[serde(default)]
    pub http: Option<String>,

    #[serde(default)]
    pub https: Option<String>,

    #[serde(default)]
    pub all: Option<String>,
}

impl ProxyConfig {
    /// Environment variables for a subprocess, in a stable order.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        [
            ("http_proxy", &self.http),
            ("https_proxy", &self.https),
            ("all_proxy", &self.all),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.all.is_none()
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Keep running the remaining steps after a fatal step failure
    #[serde(default)]
    pub best_effort: bool,

    /// Treat a podspec without a version assignment as "nothing to do"
    #[serde(default)]
    pub skip_missing_version: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `podpublish.toml` in the project directory
/// 3. `.podpublish.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `project_dir` - Directory holding the podspec
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);

    let source = if let Some(path) = config_path {
        path.to_path_buf()
    } else if project_config.exists() {
        project_config
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            user_config
        } else {
            debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %source.display(), "loading configuration");
    let config_str = fs::read_to_string(&source)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_publish_config() {
        let config = Config::default();
        assert_eq!(config.publish.branch, "main");
        assert_eq!(config.publish.remote, "origin");
        assert_eq!(config.publish.private_repo, "Specs");
        assert!(config.publish.allow_warnings);
        assert!(config.proxy.is_empty());
        assert!(!config.behavior.best_effort);
        assert!(!config.behavior.skip_missing_version);
    }

    #[test]
    fn test_templates() {
        let publish = PublishConfig::default();
        assert_eq!(publish.commit_message_for("1.2.4"), "Bump version to 1.2.4");
        assert_eq!(publish.tag_for("1.2.4"), "1.2.4");

        let custom = PublishConfig {
            tag_format: "v{version}".to_string(),
            ..PublishConfig::default()
        };
        assert_eq!(custom.tag_for("1.2.4"), "v1.2.4");
    }

    #[test]
    fn test_proxy_env_vars_order_and_filtering() {
        let proxy = ProxyConfig {
            http: Some("http://127.0.0.1:7890".to_string()),
            https: None,
            all: Some("socks5://127.0.0.1:7890".to_string()),
        };

        assert_eq!(
            proxy.env_vars(),
            vec![
                ("http_proxy".to_string(), "http://127.0.0.1:7890".to_string()),
                ("all_proxy".to_string(), "socks5://127.0.0.1:7890".to_string()),
            ]
        );
        assert!(!proxy.is_empty());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str("[publish]\nbranch = \"release\"\n").unwrap();
        assert_eq!(config.publish.branch, "release");
        assert_eq!(config.publish.remote, "origin");
        assert_eq!(config.publish.commit_message, "Bump version to {version}");
    }
}
