//! Shell command evaluation
//!
//! Runs the rule table over a command line, segment by segment when compound
//! checking is on.

use crate::output::PolicyVerdict;
use crate::parser::shell;
use crate::rules::vocabulary::Vocabulary;
use crate::rules::{Invocation, Rule};

/// Evaluate a command line against `rules`, first match wins
pub fn evaluate_command(
    command: &str,
    rules: &[Rule],
    vocab: &Vocabulary,
    compound_segments: bool,
) -> PolicyVerdict {
    if !compound_segments {
        return evaluate_segment(command, rules, vocab);
    }

    shell::split_compound_command(command)
        .into_iter()
        .map(|segment| evaluate_segment(segment, rules, vocab))
        .find(PolicyVerdict::is_deny)
        .unwrap_or(PolicyVerdict::Allow)
}

fn evaluate_segment(segment: &str, rules: &[Rule], vocab: &Vocabulary) -> PolicyVerdict {
    let invocation = Invocation::parse(segment);

    for rule in rules {
        if let Some(reason) = (rule.check)(&invocation, vocab) {
            tracing::debug!(rule = rule.id, segment, "rule matched");
            return PolicyVerdict::deny(rule.id, reason);
        }
    }

    PolicyVerdict::Allow
}
