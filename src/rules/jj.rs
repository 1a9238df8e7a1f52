//! jj interactive-editor rules
//!
//! The hook host has no terminal, so jj invocations that would open an
//! editor, diff editor or merge tool hang until timeout. These rules deny
//! them and name a non-interactive spelling.

use super::vocabulary::{
    Vocabulary, INTERACTIVE_FLAGS, JJ_COMMIT_SUBCOMMANDS, JJ_INTERACTIVE_SUBCOMMANDS, LIST_FLAGS,
    MESSAGE_FLAGS, SPLIT_BOOL_FLAGS, SPLIT_VALUE_FLAGS,
};
use super::{has_flag, Invocation, Rule};

/// Message flags whose value is the next argument
const MESSAGE_VALUE_FLAGS: &[&str] = &["-m", "--message"];

pub const DIFFEDIT: Rule = Rule::new(
    "jj-diffedit",
    "jj diffedit always opens a diff editor",
    check_diffedit,
);

pub const SPLIT_INTERACTIVE: Rule = Rule::new(
    "jj-split-interactive",
    "jj split with -i/--interactive/--tool",
    check_split_interactive,
);

pub const SPLIT_NO_MESSAGE: Rule = Rule::new(
    "jj-split-no-message",
    "jj split without -m/--message",
    check_split_no_message,
);

pub const SPLIT_NO_FILESETS: Rule = Rule::new(
    "jj-split-no-filesets",
    "jj split without paths after stripping flags",
    check_split_no_filesets,
);

pub const RESOLVE_NO_LIST: Rule = Rule::new(
    "jj-resolve-no-list",
    "jj resolve without -l/--list",
    check_resolve,
);

pub const DESCRIBE_NO_MESSAGE: Rule = Rule::new(
    "jj-describe-no-message",
    "jj describe without -m/--message/--stdin",
    check_describe,
);

pub const COMMIT_NO_MESSAGE: Rule = Rule::new(
    "jj-commit-no-message",
    "jj commit/ci without -m/--message/--stdin",
    check_commit,
);

pub const INTERACTIVE_FLAG: Rule = Rule::new(
    "jj-interactive-flag",
    "jj squash/commit/ci/restore with -i/--interactive/--tool",
    check_interactive_flag,
);

fn has_message(inv: &Invocation<'_>) -> bool {
    has_flag(&inv.args, MESSAGE_FLAGS, true)
}

/// Interactive flags, ignoring the value of a separate `-m`/`--message`
fn has_interactive(inv: &Invocation<'_>) -> bool {
    let mut flags = Vec::new();
    let mut iter = inv.args.iter();
    while let Some(arg) = iter.next() {
        if MESSAGE_VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        flags.push(arg.clone());
    }
    has_flag(&flags, INTERACTIVE_FLAGS, false)
}

fn check_diffedit(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    (inv.subcommand_of("jj")? == "diffedit").then(|| {
        "`jj diffedit` always opens an interactive diff editor. \
         Use `jj restore --from <rev> <paths>` or `jj squash`/`jj split` with explicit paths instead."
            .to_string()
    })
}

fn check_split_interactive(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    if inv.subcommand_of("jj")? != "split" || !has_interactive(inv) {
        return None;
    }
    Some(
        "`jj split` with -i/--interactive/--tool opens an interactive diff editor. \
         Pass the paths to split out instead: `jj split -m \"msg\" path/to/file`."
            .to_string(),
    )
}

fn check_split_no_message(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    if inv.subcommand_of("jj")? != "split" || has_message(inv) {
        return None;
    }
    Some(
        "`jj split` without -m/--message opens an editor for the description. \
         Use `jj split -m \"msg\" <paths>`."
            .to_string(),
    )
}

fn check_split_no_filesets(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    if inv.subcommand_of("jj")? != "split" || !split_filesets(&inv.args).is_empty() {
        return None;
    }
    Some(
        "`jj split` without paths opens the interactive diff editor. \
         List the files that go into the first commit: `jj split -m \"msg\" path/to/file`."
            .to_string(),
    )
}

/// Arguments left after removing every recognized `jj split` flag
///
/// Only the flags in `SPLIT_VALUE_FLAGS` and `SPLIT_BOOL_FLAGS` are known;
/// any other flag spelling is left in place and counts as a fileset.
pub fn split_filesets(args: &[String]) -> Vec<&str> {
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if SPLIT_BOOL_FLAGS.contains(&arg.as_str()) {
            continue;
        }
        if SPLIT_VALUE_FLAGS.contains(&arg.as_str()) {
            // the flag's argument
            iter.next();
            continue;
        }
        if is_inline_value_flag(arg) {
            continue;
        }
        remaining.push(arg.as_str());
    }

    remaining
}

/// `--flag=value` or `-xvalue` for a value-taking split flag
fn is_inline_value_flag(arg: &str) -> bool {
    SPLIT_VALUE_FLAGS.iter().any(|flag| {
        if flag.starts_with("--") {
            arg.strip_prefix(flag)
                .is_some_and(|rest| rest.starts_with('='))
        } else {
            arg.len() > flag.len() && arg.starts_with(flag)
        }
    })
}

fn check_resolve(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    if inv.subcommand_of("jj")? != "resolve" || has_flag(&inv.args, LIST_FLAGS, false) {
        return None;
    }
    Some(
        "`jj resolve` opens an interactive merge tool. \
         Use `jj resolve --list` to see conflicts, then edit the conflicted files directly."
            .to_string(),
    )
}

fn check_describe(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    if inv.subcommand_of("jj")? != "describe" || has_message(inv) {
        return None;
    }
    Some(
        "`jj describe` without -m/--message opens an editor. Use `jj describe -m \"msg\"`."
            .to_string(),
    )
}

fn check_commit(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    let subcommand = inv.subcommand_of("jj")?;
    if !JJ_COMMIT_SUBCOMMANDS.contains(&subcommand) || has_message(inv) {
        return None;
    }
    Some(format!(
        "`jj {}` without -m/--message opens an editor. Use `jj commit -m \"msg\"`.",
        subcommand
    ))
}

fn check_interactive_flag(inv: &Invocation<'_>, _vocab: &Vocabulary) -> Option<String> {
    let subcommand = inv.subcommand_of("jj")?;
    if !JJ_INTERACTIVE_SUBCOMMANDS.contains(&subcommand) || !has_interactive(inv) {
        return None;
    }
    Some(format!(
        "`jj {}` with -i/--interactive/--tool opens an interactive diff editor. \
         Pass paths to select changes instead.",
        subcommand
    ))
}
