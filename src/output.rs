//! Verdicts and hook response formatting
//!
//! Produces the JSON output format expected by Claude Code PreToolUse hooks.

use serde::Serialize;

use crate::error::PolicyViolation;

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (always "PreToolUse")
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Permission decision: "deny" (allow is expressed by omitting this block)
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Reason fed back to the agent so it can reformulate the command
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

/// Outcome of evaluating one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyVerdict {
    /// Run the command
    Allow,

    /// Do not run the command; surface `reason` to the caller
    Deny { rule_id: String, reason: String },

    /// Run the command but show `reason` (warn-only mode)
    Warn { rule_id: String, reason: String },
}

impl PolicyVerdict {
    /// Create a deny verdict
    pub fn deny(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        PolicyVerdict::Deny {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a warn verdict
    pub fn warn(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        PolicyVerdict::Warn {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// True for `Allow` and `Warn`: the command proceeds
    pub fn is_allow(&self) -> bool {
        !self.is_deny()
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, PolicyVerdict::Deny { .. })
    }

    /// Get the rule ID if applicable
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            PolicyVerdict::Allow => None,
            PolicyVerdict::Deny { rule_id, .. } | PolicyVerdict::Warn { rule_id, .. } => {
                Some(rule_id)
            }
        }
    }

    /// Get the reason if applicable
    pub fn reason(&self) -> Option<&str> {
        match self {
            PolicyVerdict::Allow => None,
            PolicyVerdict::Deny { reason, .. } | PolicyVerdict::Warn { reason, .. } => {
                Some(reason)
            }
        }
    }

    /// Turn a denial into a `PolicyViolation` error
    pub fn into_result(self) -> Result<(), PolicyViolation> {
        match self {
            PolicyVerdict::Deny { rule_id, reason } => Err(PolicyViolation { rule_id, reason }),
            PolicyVerdict::Allow | PolicyVerdict::Warn { .. } => Ok(()),
        }
    }
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    /// Create a deny response with rule ID and reason
    pub fn deny_with_rule(rule_id: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: reason.to_string(),
            }),
            system_message: Some(format!("[jj-policy:{}] Blocked: {}", rule_id, reason)),
        }
    }

    /// Create a warn response (allows but shows warning)
    pub fn warn(rule_id: &str, message: &str) -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: Some(format!("[jj-policy:{}] Warning: {}", rule_id, message)),
        }
    }

    /// Create output from a verdict
    pub fn from_verdict(verdict: &PolicyVerdict) -> Self {
        match verdict {
            PolicyVerdict::Allow => HookOutput::allow(),
            PolicyVerdict::Deny { rule_id, reason } => HookOutput::deny_with_rule(rule_id, reason),
            PolicyVerdict::Warn { rule_id, reason } => HookOutput::warn(rule_id, reason),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
