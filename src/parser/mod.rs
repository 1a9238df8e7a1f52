//! Shell parsing utilities for jj-policy-hook
//!
//! Provides shell tokenization and compound command splitting.

pub mod shell;
