//! Policy engine for jj-policy-hook
//!
//! Owns the compiled rule table and applies the host-facing overrides
//! (disable switch, allowlist, warn-only) around command evaluation.

pub mod command;

use crate::config::Config;
use crate::input::HookInput;
use crate::output::PolicyVerdict;
use crate::rules::allowlist::CompiledAllowlist;
use crate::rules::vocabulary::Vocabulary;
use crate::rules::{self, Rule};

use std::env;

/// Environment switch that turns every check into an allow
pub const DISABLED_ENV: &str = "JJ_POLICY_DISABLED";

/// Environment switch that turns denials into warnings
pub const WARN_ONLY_ENV: &str = "JJ_POLICY_WARN_ONLY";

/// The main policy engine
pub struct PolicyEngine {
    config: Config,
    rules: Vec<Rule>,
    vocab: Vocabulary,
    allowlist: CompiledAllowlist,
    warn_only: bool,
}

impl PolicyEngine {
    /// Create a new policy engine with the given configuration
    pub fn new(config: Config) -> Self {
        for id in &config.policy.disabled_rules {
            if rules::find_rule(id).is_none() {
                tracing::warn!(rule = %id, "unknown rule id in disabled_rules");
            }
        }

        let rules = rules::RULES
            .iter()
            .filter(|r| !config.policy.disabled_rules.iter().any(|id| id == r.id))
            .copied()
            .collect();

        let vocab = Vocabulary::new(&config.policy.extra_git_subcommands);

        // Load allowlist if configured
        let allowlist = config
            .allowlist_path()
            .filter(|path| path.exists())
            .and_then(|path| match CompiledAllowlist::from_file(&path) {
                Ok(allowlist) => Some(allowlist),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to load allowlist");
                    None
                }
            })
            .unwrap_or_else(CompiledAllowlist::empty);

        Self {
            config,
            rules,
            vocab,
            allowlist,
            warn_only: false,
        }
    }

    /// Replace the allowlist
    pub fn with_allowlist(mut self, allowlist: CompiledAllowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    /// Report denials as warnings regardless of the environment
    pub fn with_warn_only(mut self, warn_only: bool) -> Self {
        self.warn_only = warn_only;
        self
    }

    /// Check if the policy is disabled via environment
    pub fn is_disabled(&self) -> bool {
        env::var_os(DISABLED_ENV).is_some()
    }

    /// Check if warn-only mode is enabled
    pub fn is_warn_only(&self) -> bool {
        self.warn_only || env::var_os(WARN_ONLY_ENV).is_some()
    }

    /// Classify a command line: the pure policy, no overrides applied
    pub fn evaluate(&self, command: &str) -> PolicyVerdict {
        command::evaluate_command(
            command,
            &self.rules,
            &self.vocab,
            self.config.policy.check_compound_segments,
        )
    }

    /// Main entry point: check a hook input and return a verdict
    pub fn check(&self, input: &HookInput) -> PolicyVerdict {
        if self.is_disabled() {
            tracing::debug!("policy disabled via {}", DISABLED_ENV);
            return PolicyVerdict::Allow;
        }

        if !self.config.is_shell_tool(&input.tool_name) {
            return PolicyVerdict::Allow;
        }

        let Some(request) = input.command_request() else {
            return PolicyVerdict::Allow;
        };

        if let Some(reason) = self.allowlist.matches(&request.tool_name, &request.command) {
            tracing::debug!(reason, "command allowlisted");
            return PolicyVerdict::Allow;
        }

        let verdict = self.evaluate(&request.command);

        // If warn-only mode, convert denies to warnings
        if self.is_warn_only() {
            if let PolicyVerdict::Deny { rule_id, reason } = verdict {
                return PolicyVerdict::warn(rule_id, reason);
            }
        }

        verdict
    }

    /// The active rules, in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
