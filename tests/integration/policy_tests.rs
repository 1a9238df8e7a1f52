//! Integration tests for the command policy

use jj_policy_hook::{Config, HookInput, PolicyEngine, PolicyVerdict};

fn engine() -> PolicyEngine {
    PolicyEngine::new(Config::default())
}

fn check_bash(command: &str) -> PolicyVerdict {
    let json = format!(
        r#"{{"tool_name":"Bash","tool_input":{{"command":"{}"}}}}"#,
        command.replace('\\', "\\\\").replace('"', "\\\"")
    );
    let input = HookInput::from_json(&json).unwrap();
    engine().check(&input)
}

fn allowed(command: &str) -> bool {
    check_bash(command).is_allow()
}

fn rule(command: &str) -> Option<String> {
    check_bash(command).rule_id().map(String::from)
}

// ============================================================================
// Raw git
// ============================================================================

#[test]
fn test_git_subcommands_blocked() {
    assert!(!allowed("git commit -m x"));
    assert!(!allowed("  git commit -m x"));
    assert!(!allowed("git push origin main"));
    assert!(!allowed("git status"));
    assert!(!allowed("git cherry-pick abc123"));
    assert!(!allowed("git worktree add ../wt"));
}

#[test]
fn test_git_denial_mentions_jj() {
    let verdict = check_bash("git log --oneline");
    assert_eq!(verdict.rule_id(), Some("git-disallowed"));
    assert!(verdict.reason().unwrap().contains("jj"));
}

#[test]
fn test_unlisted_git_allowed() {
    assert!(allowed("git help"));
    assert!(allowed("git --version"));
    assert!(allowed("jj git push"));
    assert!(allowed("jj git fetch"));
}

// ============================================================================
// jj interactive traps
// ============================================================================

#[test]
fn test_describe_and_commit_need_message() {
    assert_eq!(rule("jj describe").as_deref(), Some("jj-describe-no-message"));
    assert!(allowed("jj describe -m hello"));
    assert!(allowed("jj describe --message=hello"));
    assert!(allowed("jj describe --stdin"));

    assert_eq!(rule("jj commit").as_deref(), Some("jj-commit-no-message"));
    assert_eq!(rule("jj ci").as_deref(), Some("jj-commit-no-message"));
    assert!(allowed("jj commit -m \"feat: add policy\""));
}

#[test]
fn test_split() {
    assert_eq!(rule("jj split -m 'msg'").as_deref(), Some("jj-split-no-filesets"));
    assert!(allowed("jj split -m 'msg' path/to/file"));
    assert_eq!(rule("jj split path/to/file").as_deref(), Some("jj-split-no-message"));
    assert_eq!(
        rule("jj split -i -m 'msg' path/to/file").as_deref(),
        Some("jj-split-interactive")
    );
}

#[test]
fn test_resolve() {
    assert!(!allowed("jj resolve"));
    assert!(allowed("jj resolve --list"));
}

#[test]
fn test_diffedit_always_blocked() {
    assert!(!allowed("jj diffedit"));
    assert!(!allowed("jj diffedit -r @- --from main"));
}

#[test]
fn test_interactive_flags() {
    assert!(!allowed("jj squash -i"));
    assert!(!allowed("jj restore --tool meld"));
    assert!(allowed("jj squash"));
    assert!(allowed("jj restore --from @- src/lib.rs"));
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn test_unmatched_commands_allowed() {
    assert!(allowed("ls -la"));
    assert!(allowed("npm test"));
    assert!(allowed("cargo build --release"));
    assert!(allowed("jj log -r 'all()'"));
    assert!(allowed("jj new main"));
}

#[test]
fn test_env_switch_text_is_not_intercepted() {
    assert!(allowed("jj describe -m 'docs: explain JJ_POLICY_DISABLED=1'"));
    assert!(allowed("echo JJ_POLICY_DISABLED=1"));
    assert!(allowed("grep -rn 'JJ_POLICY_WARN_ONLY=' README.md"));
}

#[test]
fn test_verdict_is_stable() {
    for command in ["jj describe", "git push", "jj split -m x a", "ls"] {
        assert_eq!(check_bash(command), check_bash(command));
    }
}
