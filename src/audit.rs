//! JSONL audit logging for jj-policy-hook
//!
//! Records every verdict to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::input::HookInput;
use crate::output::PolicyVerdict;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warn,
    Disabled,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    /// Log level (ALLOWED, BLOCKED, WARN, DISABLED)
    pub level: LogLevel,

    /// Tool that was invoked
    pub tool: String,

    /// Rule ID that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Summary of the input
    pub input_summary: String,

    /// Reason for the decision
    pub reason: String,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from input and verdict
    pub fn new(input: &HookInput, verdict: &PolicyVerdict, disabled: bool) -> Self {
        let (level, rule_id, reason) = if disabled {
            (LogLevel::Disabled, None, "JJ_POLICY_DISABLED".to_string())
        } else {
            match verdict {
                PolicyVerdict::Allow => (LogLevel::Allowed, None, "no rule matched".to_string()),
                PolicyVerdict::Deny { rule_id, reason } => {
                    (LogLevel::Blocked, Some(rule_id.clone()), reason.clone())
                }
                PolicyVerdict::Warn { rule_id, reason } => {
                    (LogLevel::Warn, Some(rule_id.clone()), reason.clone())
                }
            }
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: input.tool_name.clone(),
            rule_id,
            input_summary: input.summary(),
            reason,
            session_id: input.session_id.clone(),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Open (creating parents as needed) an append-only log at `path`
    ///
    /// Failure to open leaves the logger disabled.
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| match Self::open(p) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "audit log unavailable");
                None
            }
        });

        Self { writer }
    }

    fn open(path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new().create(true).append(true).open(path)?)
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a verdict
    pub fn log_verdict(
        &mut self,
        input: &HookInput,
        verdict: &PolicyVerdict,
        disabled: bool,
    ) -> Result<()> {
        let entry = AuditEntry::new(input, verdict, disabled);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
