//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON record the host sends on stdin before running a tool.

use serde::Deserialize;

/// Main input structure from Claude Code hooks
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash")
    pub tool_name: String,

    /// Tool-specific input parameters
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Tool-specific input variants
#[derive(Debug, Clone)]
pub enum ToolInput {
    /// Shell command execution
    Shell {
        command: String,
        #[allow(dead_code)]
        description: Option<String>,
        #[allow(dead_code)]
        timeout: Option<u64>,
    },

    /// Anything without a command string - passed through
    Unknown { raw: serde_json::Value },
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(command) = value.get("command").and_then(|v| v.as_str()) {
            return Ok(ToolInput::Shell {
                command: command.to_string(),
                description: value
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                timeout: value.get("timeout").and_then(|v| v.as_u64()),
            });
        }

        Ok(ToolInput::Unknown { raw: value })
    }
}

/// A command about to be executed and the tool executing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub tool_name: String,
    pub command: String,
}

impl CommandRequest {
    pub fn new(tool_name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            command: command.into(),
        }
    }
}

impl From<CommandRequest> for HookInput {
    fn from(request: CommandRequest) -> Self {
        HookInput {
            tool_name: request.tool_name,
            tool_input: ToolInput::Shell {
                command: request.command,
                description: None,
                timeout: None,
            },
            session_id: None,
            hook_event_name: None,
            cwd: None,
        }
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The command request carried by this input, if the tool sent a command
    pub fn command_request(&self) -> Option<CommandRequest> {
        match &self.tool_input {
            ToolInput::Shell { command, .. } => {
                Some(CommandRequest::new(self.tool_name.as_str(), command.as_str()))
            }
            ToolInput::Unknown { .. } => None,
        }
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match &self.tool_input {
            ToolInput::Shell { command, .. } => {
                let truncated = if command.chars().count() > 100 {
                    format!("{}...", command.chars().take(100).collect::<String>())
                } else {
                    command.clone()
                };
                format!("{}: {}", self.tool_name, truncated)
            }
            ToolInput::Unknown { .. } => format!("Unknown tool: {}", self.tool_name),
        }
    }
}
