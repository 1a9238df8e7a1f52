//! jj-policy-hook - steer coding agents from raw git to non-interactive jj
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook (reads JSON from stdin, writes JSON to stdout)
//! echo '{"tool_name":"Bash","tool_input":{"command":"git commit -m x"}}' | jj-policy-hook
//!
//! # Check a single command (exit 0 = allow, 2 = deny)
//! jj-policy-hook --check "jj describe"
//!
//! # Dry-run mode (show what would be blocked)
//! jj-policy-hook --dry-run
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use jj_policy_hook::{
    audit::AuditLogger,
    config::Config,
    engine::{PolicyEngine, DISABLED_ENV},
    input::{CommandRequest, HookInput},
    output::{HookOutput, PolicyVerdict},
};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "JJ_POLICY_LOG";

/// Exit status for a denied `--check`
const EXIT_DENIED: u8 = 2;

/// Print version information
fn print_version() {
    println!("jj-policy-hook {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"jj-policy-hook - steer coding agents from raw git to non-interactive jj

USAGE:
    jj-policy-hook [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -d, --dry-run           Dry-run mode (show what would be blocked but allow)
    -c, --config PATH       Path to config file
        --check COMMAND     Evaluate COMMAND and exit 0 (allow) or 2 (deny)
        --list-rules        Print the active rules in evaluation order

ENVIRONMENT:
    JJ_POLICY_DISABLED=1    Disable all checks (still logs)
    JJ_POLICY_WARN_ONLY=1   Warn but don't block
    JJ_POLICY_LOG=debug     Diagnostic log filter (stderr)

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash",
          "hooks": [{{
            "type": "command",
            "command": "~/.claude/jj-policy/jj-policy-hook",
            "timeout": 5
          }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
#[derive(Default)]
struct Args {
    help: bool,
    version: bool,
    dry_run: bool,
    list_rules: bool,
    config_path: Option<String>,
    check: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-V" | "--version" => result.version = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "--list-rules" => result.list_rules = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "--check" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.check = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                arg if arg.starts_with("--check=") => {
                    result.check = Some(arg.trim_start_matches("--check=").to_string());
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
            i += 1;
        }

        result
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = match args.config_path {
        Some(ref path) => Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            tracing::warn!(path = %path, error = %e, "failed to load config, using defaults");
            Config::default()
        }),
        None => Config::load(),
    };

    let engine = PolicyEngine::new(config).with_warn_only(args.dry_run);

    if args.list_rules {
        for rule in engine.rules() {
            println!("{:<24} {}", rule.id, rule.description);
        }
        return ExitCode::SUCCESS;
    }

    let mut logger = AuditLogger::new(engine.config().audit_path().as_deref());

    match args.check {
        Some(command) => run_check(&engine, &mut logger, command),
        None => run_hook(&engine, &mut logger),
    }
}

/// Evaluate one command given on the command line
fn run_check(engine: &PolicyEngine, logger: &mut AuditLogger, command: String) -> ExitCode {
    let tool = engine
        .config()
        .policy
        .shell_tools
        .first()
        .cloned()
        .unwrap_or_else(|| "Bash".to_string());
    let input = HookInput::from(CommandRequest::new(tool, command));
    let verdict = decide(engine, logger, &input);

    match verdict.into_result() {
        Ok(()) => ExitCode::SUCCESS,
        Err(violation) => {
            eprintln!("{}", violation);
            ExitCode::from(EXIT_DENIED)
        }
    }
}

/// Read one hook record from stdin and answer on stdout
fn run_hook(engine: &PolicyEngine, logger: &mut AuditLogger) -> ExitCode {
    let mut input_json = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_json) {
        tracing::warn!(error = %e, "failed to read stdin, allowing");
    }

    // No input = nothing to check, allow
    if input_json.trim().is_empty() {
        emit(&HookOutput::allow());
        return ExitCode::SUCCESS;
    }

    let input = match HookInput::from_json(&input_json) {
        Ok(input) => input,
        Err(e) => {
            // Fail open on malformed input
            tracing::warn!(error = %e, "failed to parse hook input, allowing");
            emit(&HookOutput::allow());
            return ExitCode::SUCCESS;
        }
    };

    let verdict = decide(engine, logger, &input);
    emit(&HookOutput::from_verdict(&verdict));
    ExitCode::SUCCESS
}

fn decide(engine: &PolicyEngine, logger: &mut AuditLogger, input: &HookInput) -> PolicyVerdict {
    let verdict = engine.check(input);

    if let Err(e) = logger.log_verdict(input, &verdict, engine.is_disabled()) {
        tracing::warn!(error = %e, "failed to write audit log");
    }

    if engine.is_disabled() {
        tracing::info!("checks skipped: {} is set", DISABLED_ENV);
    }

    verdict
}

fn emit(output: &HookOutput) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", output.to_json()).and_then(|_| handle.flush()) {
        tracing::error!(error = %e, "failed to write hook output");
    }
}
