//! Allowlist handling for bypassing the policy
//!
//! Supports user-defined patterns whose matching commands skip every rule.

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// An allowlist entry
#[derive(Debug, Clone, Deserialize)]
pub struct AllowEntry {
    /// Regex pattern to match
    pub pattern: String,

    /// Human-readable reason for allowing
    pub reason: String,

    /// Optional tool restriction (if not set, applies to all tools)
    #[serde(default)]
    pub tool: Option<String>,
}

/// The allowlist configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AllowlistConfig {
    /// List of allowed patterns
    #[serde(default)]
    pub allow: Vec<AllowEntry>,
}

/// Compiled allowlist for efficient matching
#[derive(Debug, Default)]
pub struct CompiledAllowlist {
    /// General patterns (apply to all tools)
    general: Vec<(Regex, String)>,

    /// Tool-specific patterns, keyed by lowercase tool name
    by_tool: HashMap<String, Vec<(Regex, String)>>,
}

impl CompiledAllowlist {
    /// Create an empty allowlist
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and compile allowlist from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AllowlistConfig = toml::from_str(&content)?;
        Self::from_config(&config)
    }

    /// Compile from config
    pub fn from_config(config: &AllowlistConfig) -> Result<Self> {
        let mut allowlist = Self::empty();

        for entry in &config.allow {
            let item = (Regex::new(&entry.pattern)?, entry.reason.clone());

            match entry.tool.as_deref() {
                None | Some("*") => allowlist.general.push(item),
                Some(tool) => allowlist
                    .by_tool
                    .entry(tool.to_lowercase())
                    .or_default()
                    .push(item),
            }
        }

        Ok(allowlist)
    }

    /// Check if a command matches the allowlist for the given tool
    pub fn matches(&self, tool: &str, input: &str) -> Option<&str> {
        let tool_patterns = self
            .by_tool
            .get(&tool.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default();

        tool_patterns
            .iter()
            .chain(self.general.iter())
            .find(|(regex, _)| regex.is_match(input))
            .map(|(_, reason)| reason.as_str())
    }

    /// Check if the allowlist is empty
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.by_tool.values().all(Vec::is_empty)
    }
}
