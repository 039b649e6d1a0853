//! Configuration Management
//!
//! Handles persistent configuration storage for gapi-rest.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Project sent to APIs that take one
    #[serde(default)]
    pub project_id: Option<String>,
    /// Send every service to this root instead of its own (e.g. a local mock)
    #[serde(default)]
    pub root_url: Option<String>,
    /// `quotaUser` added to every call
    #[serde(default)]
    pub quota_user: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Extra service tables, JSON or YAML
    #[serde(default)]
    pub descriptor_files: Vec<PathBuf>,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gapi-rest").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse configuration, falling back to defaults on a corrupt file
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config file: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective project (CLI > config > gcloud default)
    pub fn effective_project(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.project_id.clone())
            .or_else(crate::gcp::auth::get_default_project)
    }

    /// Get effective root override (CLI > config)
    pub fn effective_root_url(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string).or_else(|| self.root_url.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Set project and save
    pub fn set_project(&mut self, project_id: &str) -> Result<()> {
        self.project_id = Some(project_id.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"{
                "project_id": "my-project",
                "root_url": "http://localhost:8080/",
                "quota_user": "ci",
                "descriptor_files": ["/etc/gapi/tasks.yaml"],
                "timeout_secs": 30
            }"#,
        );
        assert_eq!(config.project_id.as_deref(), Some("my-project"));
        assert_eq!(config.descriptor_files, vec![PathBuf::from("/etc/gapi/tasks.yaml")]);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() {
        assert_eq!(Config::parse("{not json"), Config::default());
        assert_eq!(Config::parse("{}"), Config::default());
    }

    #[test]
    fn test_cli_wins_over_config() {
        let config = Config {
            project_id: Some("from-config".to_string()),
            root_url: Some("http://config/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.effective_project(Some("from-cli")).as_deref(),
            Some("from-cli")
        );
        assert_eq!(config.effective_project(None).as_deref(), Some("from-config"));
        assert_eq!(config.effective_root_url(None).as_deref(), Some("http://config/"));
        assert_eq!(
            config.effective_root_url(Some("http://cli/")).as_deref(),
            Some("http://cli/")
        );
    }
}
