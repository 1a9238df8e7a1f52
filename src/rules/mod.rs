//! Policy rules for jj-policy-hook
//!
//! The policy is an ordered table of rules. Each rule inspects one parsed
//! command segment and either produces a denial reason or passes. The first
//! rule that produces a reason decides the verdict.

pub mod allowlist;
pub mod git;
pub mod jj;
pub mod vocabulary;

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::parser::shell;
use vocabulary::Vocabulary;

/// A rule predicate: `Some(reason)` denies the command
pub type Check = fn(&Invocation<'_>, &Vocabulary) -> Option<String>;

/// A policy rule definition
#[derive(Clone, Copy)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// One-line description for `--list-rules`
    pub description: &'static str,

    /// Predicate producing the denial reason
    pub check: Check,
}

impl Rule {
    /// Create a new rule
    pub const fn new(id: &'static str, description: &'static str, check: Check) -> Self {
        Self {
            id,
            description,
            check,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The full rule table, in evaluation order
pub const RULES: &[Rule] = &[
    git::GIT_DISALLOWED,
    jj::DIFFEDIT,
    jj::SPLIT_INTERACTIVE,
    jj::SPLIT_NO_MESSAGE,
    jj::SPLIT_NO_FILESETS,
    jj::RESOLVE_NO_LIST,
    jj::DESCRIBE_NO_MESSAGE,
    jj::COMMIT_NO_MESSAGE,
    jj::INTERACTIVE_FLAG,
];

/// Look up a rule by id
pub fn find_rule(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.id == id)
}

/// The head of one command segment: program, subcommand, remaining arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The segment as given
    pub raw: &'a str,

    /// First word
    pub program: Option<&'a str>,

    /// Second word when it looks like a subcommand (`[a-z][a-z-]*`)
    pub subcommand: Option<&'a str>,

    /// Tokenized text after the subcommand (or after the program)
    pub args: Vec<String>,
}

impl<'a> Invocation<'a> {
    /// Parse the head of a command segment
    pub fn parse(raw: &'a str) -> Self {
        static HEAD: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?s)^\s*(\S+)(?:\s+([a-z][a-z-]*)\b)?(.*)$").expect("valid head pattern")
        });

        match HEAD.captures(raw) {
            Some(caps) => Self {
                raw,
                program: caps.get(1).map(|m| m.as_str()),
                subcommand: caps.get(2).map(|m| m.as_str()),
                args: caps
                    .get(3)
                    .map(|m| shell::tokenize_lossy(m.as_str()))
                    .unwrap_or_default(),
            },
            None => Self {
                raw,
                program: None,
                subcommand: None,
                args: Vec::new(),
            },
        }
    }

    /// The subcommand, if the program is `program`
    pub fn subcommand_of(&self, program: &str) -> Option<&'a str> {
        if self.program == Some(program) {
            self.subcommand
        } else {
            None
        }
    }
}

/// Whether any token is one of `flags`
///
/// A flag ending in `=` matches as a prefix (`--message=msg`), long flags also
/// match their `--flag=value` form, and when `attached_short` is set a short
/// flag matches with its value glued on (`-mmsg`).
pub fn has_flag(tokens: &[String], flags: &[&str], attached_short: bool) -> bool {
    tokens.iter().any(|token| {
        flags
            .iter()
            .any(|flag| matches_flag(token, flag, attached_short))
    })
}

fn matches_flag(token: &str, flag: &str, attached_short: bool) -> bool {
    if token == flag {
        return true;
    }
    if flag.ends_with('=') {
        return token.starts_with(flag);
    }
    if flag.starts_with("--") {
        return token
            .strip_prefix(flag)
            .is_some_and(|rest| rest.starts_with('='));
    }
    attached_short && token.len() > flag.len() && token.starts_with(flag)
}
