//! jj-policy-hook - steer coding agents from raw git to non-interactive jj
//!
//! A PreToolUse hook that inspects shell commands before an agent host runs
//! them. Raw `git` subcommands are denied in favour of jj (Jujutsu), and jj
//! invocations that would open an editor the host cannot drive are denied
//! with a non-interactive alternative.
//!
//! # Features
//!
//! - **Ordered rule table**: first matching rule decides, each rule testable on its own
//! - **Fixed vocabularies**: denied git subcommands and jj flag grammar live in data tables
//! - **Fail-open**: anything no rule recognizes is allowed
//! - **Allowlist support**: user-defined exceptions for specific patterns
//! - **Audit logging**: JSONL log of all verdicts
//!
//! # Example
//!
//! ```
//! use jj_policy_hook::{Config, HookInput, PolicyEngine};
//!
//! let engine = PolicyEngine::new(Config::default());
//!
//! assert!(engine.evaluate("git commit -m wip").is_deny());
//! assert!(engine.evaluate("jj describe -m wip").is_allow());
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"jj diffedit"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//! assert!(engine.check(&hook_input).is_deny());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::PolicyEngine;
pub use error::{Error, PolicyViolation};
pub use input::{CommandRequest, HookInput, ToolInput};
pub use output::{HookOutput, PolicyVerdict};
