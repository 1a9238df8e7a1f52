//! Integration tests for jj-policy-hook

mod cli_tests;
mod hook_tests;
mod policy_tests;
