//! Configuration loading for jj-policy-hook
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/jj-policy/audit.jsonl".to_string()),
        }
    }
}

/// Override configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Path to allowlist file
    pub allowlist_file: Option<String>,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            allowlist_file: Some("~/.claude/jj-policy/allow.toml".to_string()),
        }
    }
}

/// Policy table configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Tool names whose `command` input is evaluated
    pub shell_tools: Vec<String>,

    /// Evaluate every `;`, `&&`, `||`, `|` segment instead of only the head
    pub check_compound_segments: bool,

    /// Git subcommands denied on top of the built-in table
    pub extra_git_subcommands: Vec<String>,

    /// Rule ids to drop from the table
    pub disabled_rules: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            shell_tools: vec!["Bash".to_string()],
            check_compound_segments: false,
            extra_git_subcommands: Vec::new(),
            disabled_rules: Vec::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub overrides: OverrideConfig,
    pub policy: PolicyConfig,
}

impl Config {
    /// Load configuration from the first standard location that parses
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/jj-policy/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/jj-policy/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load config");
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), `None` when audit logging is off
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }

    /// Get the allowlist file path (expanded)
    pub fn allowlist_path(&self) -> Option<PathBuf> {
        self.overrides
            .allowlist_file
            .as_deref()
            .map(Self::expand_path)
    }

    /// Whether `tool_name` is a shell tool whose commands get evaluated
    pub fn is_shell_tool(&self, tool_name: &str) -> bool {
        self.policy
            .shell_tools
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tool_name))
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/jj-policy/audit.jsonl"

[overrides]
allowlist_file = "~/.claude/jj-policy/allow.toml"

[policy]
shell_tools = ["Bash"]
check_compound_segments = false
extra_git_subcommands = []
disabled_rules = []
"#;
