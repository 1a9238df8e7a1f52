//! Raw git rule
//!
//! Git subcommands from the vocabulary table are denied in favour of jj.

use super::vocabulary::{self, Vocabulary};
use super::{Invocation, Rule};

pub const GIT_DISALLOWED: Rule = Rule::new(
    "git-disallowed",
    "git <subcommand> from the denied table: use jj instead",
    check_git,
);

fn check_git(inv: &Invocation<'_>, vocab: &Vocabulary) -> Option<String> {
    let subcommand = inv.subcommand_of("git")?;
    if !vocab.denies_git(subcommand) {
        return None;
    }

    let hint = match vocabulary::jj_equivalent(subcommand) {
        Some(equivalent) => format!("Try `{}`.", equivalent),
        None => "Use the equivalent jj command.".to_string(),
    };

    Some(format!(
        "Raw `git {}` is not allowed in this repository; use jj (Jujutsu) instead. {}",
        subcommand, hint
    ))
}
