//! Integration tests for the hook surface: config files, allowlist, output

use std::fs;

use jj_policy_hook::{Config, HookInput, HookOutput, PolicyEngine, PolicyVerdict};
use tempfile::TempDir;

fn hook_json(tool: &str, command: &str) -> String {
    serde_json::json!({
        "tool_name": tool,
        "tool_input": { "command": command },
        "session_id": "s-1",
        "hook_event_name": "PreToolUse",
    })
    .to_string()
}

fn engine_from_toml(dir: &TempDir, toml: &str) -> PolicyEngine {
    let path = dir.path().join("config.toml");
    fs::write(&path, toml).unwrap();
    PolicyEngine::new(Config::load_from(&path).unwrap())
}

#[test]
fn test_deny_output_carries_reason() {
    let engine = PolicyEngine::new(Config::default());
    let input = HookInput::from_json(&hook_json("Bash", "jj resolve")).unwrap();
    let verdict = engine.check(&input);

    let json: serde_json::Value =
        serde_json::from_str(&HookOutput::from_verdict(&verdict).to_json()).unwrap();
    let specific = &json["hookSpecificOutput"];
    assert_eq!(specific["hookEventName"], "PreToolUse");
    assert_eq!(specific["permissionDecision"], "deny");
    assert!(specific["permissionDecisionReason"]
        .as_str()
        .unwrap()
        .contains("jj resolve --list"));
    assert!(json["systemMessage"]
        .as_str()
        .unwrap()
        .contains("jj-resolve-no-list"));
}

#[test]
fn test_allow_output_is_empty_object() {
    let engine = PolicyEngine::new(Config::default());
    let input = HookInput::from_json(&hook_json("Bash", "jj st")).unwrap();
    let verdict = engine.check(&input);
    assert_eq!(verdict, PolicyVerdict::Allow);
    assert_eq!(HookOutput::from_verdict(&verdict).to_json(), "{}");
}

#[test]
fn test_non_shell_tools_pass_through() {
    let engine = PolicyEngine::new(Config::default());
    let json = r#"{"tool_name":"Read","tool_input":{"file_path":"/repo/.git/config"}}"#;
    let input = HookInput::from_json(json).unwrap();
    assert!(engine.check(&input).is_allow());
}

#[test]
fn test_allowlist_file_from_config() {
    let dir = TempDir::new().unwrap();
    let allow_path = dir.path().join("allow.toml");
    fs::write(
        &allow_path,
        r#"
        [[allow]]
        pattern = "^git status( -s)?$"
        reason = "status is read-only in colocated repos"
        tool = "Bash"
        "#,
    )
    .unwrap();

    let engine = engine_from_toml(
        &dir,
        &format!(
            "[overrides]\nallowlist_file = {:?}\n",
            allow_path.to_string_lossy()
        ),
    );

    let check = |command: &str| engine.check(&HookInput::from_json(&hook_json("Bash", command)).unwrap());
    assert!(check("git status").is_allow());
    assert!(check("git status -s").is_allow());
    assert!(check("git status --porcelain").is_deny());
    assert!(check("git push").is_deny());
}

#[test]
fn test_broken_allowlist_is_ignored() {
    let dir = TempDir::new().unwrap();
    let allow_path = dir.path().join("allow.toml");
    fs::write(&allow_path, "[[allow]]\npattern = \"(unclosed\"\nreason = \"x\"\n").unwrap();

    let engine = engine_from_toml(
        &dir,
        &format!(
            "[overrides]\nallowlist_file = {:?}\n",
            allow_path.to_string_lossy()
        ),
    );
    assert!(engine.evaluate("git push").is_deny());
}

#[test]
fn test_compound_segments_from_config() {
    let dir = TempDir::new().unwrap();
    let engine = engine_from_toml(
        &dir,
        "[overrides]\n\n[policy]\ncheck_compound_segments = true\n",
    );

    assert!(engine.evaluate("cd repo && git commit -m x").is_deny());
    assert!(engine.evaluate("jj describe -m 'one; two' && jj new").is_allow());
}

#[test]
fn test_custom_shell_tools() {
    let dir = TempDir::new().unwrap();
    let engine = engine_from_toml(&dir, "[policy]\nshell_tools = [\"Shell\", \"Exec\"]\n");

    let check = |tool: &str| engine.check(&HookInput::from_json(&hook_json(tool, "git push")).unwrap());
    assert!(check("Shell").is_deny());
    assert!(check("exec").is_deny());
    assert!(check("Bash").is_allow());
}

#[test]
fn test_violation_error() {
    let engine = PolicyEngine::new(Config::default());
    let violation = engine.evaluate("jj diffedit").into_result().unwrap_err();
    assert_eq!(violation.rule_id, "jj-diffedit");
    assert!(violation.to_string().starts_with("[jj-diffedit] "));
}
