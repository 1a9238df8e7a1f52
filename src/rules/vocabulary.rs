//! Fixed subcommand and flag tables the policy matches against
//!
//! These tables are the contract surface of the filter: a git subcommand that
//! is not listed here (or added through `policy.extra_git_subcommands`) is
//! never intercepted.

use std::collections::HashSet;

/// Git subcommands that are denied outright
pub const GIT_SUBCOMMANDS: &[&str] = &[
    "commit",
    "push",
    "pull",
    "checkout",
    "branch",
    "merge",
    "rebase",
    "status",
    "diff",
    "log",
    "add",
    "reset",
    "stash",
    "clone",
    "init",
    "fetch",
    "tag",
    "show",
    "rm",
    "mv",
    "restore",
    "switch",
    "remote",
    "config",
    "clean",
    "cherry-pick",
    "revert",
    "bisect",
    "blame",
    "grep",
    "shortlog",
    "describe",
    "archive",
    "bundle",
    "submodule",
    "worktree",
    "reflog",
];

/// Suggested jj replacement for a denied git subcommand
pub const JJ_EQUIVALENTS: &[(&str, &str)] = &[
    ("commit", "jj commit -m \"msg\""),
    ("push", "jj git push"),
    ("pull", "jj git fetch && jj rebase -d <bookmark>@origin"),
    ("fetch", "jj git fetch"),
    ("clone", "jj git clone"),
    ("init", "jj git init"),
    ("remote", "jj git remote"),
    ("status", "jj status"),
    ("diff", "jj diff"),
    ("log", "jj log"),
    ("show", "jj show"),
    ("checkout", "jj new <rev> (or jj edit <rev>)"),
    ("switch", "jj new <rev> (or jj edit <rev>)"),
    ("branch", "jj bookmark"),
    ("tag", "jj tag"),
    ("merge", "jj new <rev1> <rev2>"),
    ("rebase", "jj rebase"),
    ("cherry-pick", "jj duplicate"),
    ("revert", "jj backout"),
    ("reset", "jj restore or jj abandon"),
    ("restore", "jj restore"),
    ("stash", "jj new (the working copy is already a commit)"),
    ("add", "nothing: jj tracks files automatically"),
    ("rm", "rm <path> (jj records the deletion)"),
    ("mv", "mv <src> <dst> (jj records the rename)"),
    ("blame", "jj file annotate"),
    ("reflog", "jj op log"),
    ("config", "jj config"),
    ("describe", "jj describe -m \"msg\""),
];

/// jj subcommands that prompt when handed an interactive flag
pub const JJ_INTERACTIVE_SUBCOMMANDS: &[&str] = &["squash", "commit", "ci", "restore"];

/// jj subcommands that open an editor for the description without `-m`
pub const JJ_COMMIT_SUBCOMMANDS: &[&str] = &["commit", "ci"];

/// Flags that supply a description without opening an editor
pub const MESSAGE_FLAGS: &[&str] = &["-m", "--message", "--message=", "--stdin"];

/// Flags that make a jj command open an interactive editor or tool
pub const INTERACTIVE_FLAGS: &[&str] = &["-i", "--interactive", "--tool"];

/// Flags that keep `jj resolve` in listing mode
pub const LIST_FLAGS: &[&str] = &["-l", "--list"];

/// `jj split` flags (and global flags) that consume the following argument
pub const SPLIT_VALUE_FLAGS: &[&str] = &[
    "-r",
    "--revision",
    "-m",
    "--message",
    "-d",
    "--destination",
    "-o",
    "--onto",
    "-A",
    "--insert-after",
    "--after",
    "-B",
    "--insert-before",
    "--before",
    "--tool",
    "-R",
    "--repository",
    "--at-op",
    "--at-operation",
    "--color",
    "--config",
    "--config-file",
];

/// `jj split` flags (and global flags) that take no argument
pub const SPLIT_BOOL_FLAGS: &[&str] = &[
    "-i",
    "--interactive",
    "-p",
    "--parallel",
    "--stdin",
    "--ignore-working-copy",
    "--ignore-immutable",
    "--no-pager",
    "--quiet",
    "--debug",
    "-h",
    "--help",
    "--",
];

/// Look up the suggested jj replacement for a git subcommand
pub fn jj_equivalent(git_subcommand: &str) -> Option<&'static str> {
    JJ_EQUIVALENTS
        .iter()
        .find(|(git, _)| *git == git_subcommand)
        .map(|(_, jj)| *jj)
}

/// The denied git subcommand table, optionally extended from config
#[derive(Debug, Clone)]
pub struct Vocabulary {
    git_subcommands: HashSet<String>,
}

impl Vocabulary {
    /// Built-in table plus `extra` subcommands
    ///
    /// Extra entries that can never be parsed as a subcommand (anything other
    /// than lowercase letters and hyphens after a leading letter) are reported.
    pub fn new(extra: &[String]) -> Self {
        for sub in extra.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !is_subcommand_word(sub) {
                tracing::warn!(
                    subcommand = %sub,
                    "extra_git_subcommands entry can never match; use lowercase letters and hyphens"
                );
            }
        }

        let git_subcommands = GIT_SUBCOMMANDS
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { git_subcommands }
    }

    /// Whether `git <subcommand>` is denied
    pub fn denies_git(&self, subcommand: &str) -> bool {
        self.git_subcommands.contains(subcommand)
    }
}

/// Whether `word` has the `[a-z][a-z-]*` shape of a parsed subcommand
pub fn is_subcommand_word(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c == '-')
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(&[])
    }
}
