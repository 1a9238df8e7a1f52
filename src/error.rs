//! Error types for jj-policy-hook

use thiserror::Error;

/// A command was rejected by the policy.
///
/// Carries the id of the rule that fired and the remediation message meant
/// for the agent that issued the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{rule_id}] {reason}")]
pub struct PolicyViolation {
    pub rule_id: String,
    pub reason: String,
}

/// Errors from the ambient layers (config, allowlist, audit log, hook JSON)
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
