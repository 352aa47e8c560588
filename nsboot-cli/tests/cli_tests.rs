use assert_cmd::Command;
use predicates::prelude::*;

const SANDBOX_ENV: &str = "_RUNWASI_SANDBOX";
const PHASE_ENV: &str = "_RUNWASI_PHASE";
const NETNS_PATH_ENV: &str = "_RUNWASI_NETNS_PATH";
const ON_FAILURE_ENV: &str = "_RUNWASI_NETNS_ON_FAILURE";

/// Check if running as root
fn is_root() -> bool {
    unsafe { libc::getuid() == 0 }
}

/// The binary with a clean namespace environment
fn nsboot() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nsboot"));
    cmd.env_remove(SANDBOX_ENV)
        .env_remove(PHASE_ENV)
        .env_remove(NETNS_PATH_ENV)
        .env_remove(ON_FAILURE_ENV)
        .env_remove("NSBOOT_LOG");
    cmd
}

fn show_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("show").arg("--json").output().unwrap();
    assert!(output.status.success(), "show failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_command() {
    nsboot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("hold"))
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_version_command() {
    nsboot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nsboot"));
}

#[test]
fn test_invalid_command() {
    nsboot()
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_exec_without_command() {
    nsboot()
        .arg("exec")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_show_without_flag_is_inactive() {
    nsboot()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("NET:"))
        .stdout(predicate::str::contains("inactive"));
}

#[test]
fn test_flag_zero_never_touches_path() {
    let report = show_json(
        nsboot()
            .env(SANDBOX_ENV, "0")
            .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net"),
    );

    assert_eq!(report["bootstrap"], "inactive");
    assert_eq!(report["degraded"], false);
}

#[test]
fn test_missing_handle_logs_open_and_continues() {
    nsboot()
        .env(SANDBOX_ENV, "1")
        .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("failed (open:"))
        .stderr(predicate::str::contains("Network namespace setup failed"))
        .stderr(predicate::str::contains("open: could not open network namespace"));
}

#[test]
fn test_non_namespace_file_logs_setns() {
    let report = show_json(
        nsboot()
            .env(SANDBOX_ENV, "1")
            .env(NETNS_PATH_ENV, "/dev/null"),
    );

    assert_eq!(report["degraded"], true);
    assert!(report["bootstrap"].as_str().unwrap().contains("setns:"));
}

#[test]
fn test_strict_flag_aborts() {
    nsboot()
        .env(SANDBOX_ENV, "1")
        .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net")
        .arg("--strict")
        .arg("show")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("open:"));
}

#[test]
fn test_abort_policy_from_env() {
    nsboot()
        .env(SANDBOX_ENV, "1")
        .env(NETNS_PATH_ENV, "/dev/null")
        .env(ON_FAILURE_ENV, "abort")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("setns:"));
}

#[test]
fn test_phase_flag_reads_phase_variable() {
    let report = show_json(
        nsboot()
            .env(PHASE_ENV, "1")
            .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net")
            .arg("--phase"),
    );
    assert!(report["bootstrap"].as_str().unwrap().contains("open:"));

    // Without --phase the phase variable is ignored
    let report = show_json(
        nsboot()
            .env(PHASE_ENV, "1")
            .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net"),
    );
    assert_eq!(report["bootstrap"], "inactive");
}

#[test]
fn test_exec_replaces_process() {
    nsboot()
        .arg("exec")
        .arg("--")
        .arg("/bin/echo")
        .arg("hello")
        .arg("world")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn test_exec_withholds_namespace_variables() {
    nsboot()
        .env(SANDBOX_ENV, "1")
        .env(NETNS_PATH_ENV, "/nonexistent/nsboot/net")
        .env(ON_FAILURE_ENV, "continue")
        .env("NSBOOT_KEEP", "kept")
        .arg("exec")
        .arg("--")
        .arg("/bin/sh")
        .arg("-c")
        .arg(format!(
            "echo flag=${{{SANDBOX_ENV}:-unset}} path=${{{NETNS_PATH_ENV}:-unset}} policy=${{{ON_FAILURE_ENV}:-unset}} keep=$NSBOOT_KEEP"
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "flag=unset path=unset policy=unset keep=kept",
        ));
}

#[test]
fn test_exec_missing_program() {
    nsboot()
        .arg("exec")
        .arg("--")
        .arg("/nonexistent/nsboot/program")
        .assert()
        .code(127)
        .stderr(predicate::str::contains("Failed to execute"));
}

#[test]
fn test_show_without_root_cannot_create_namespace() {
    // Skip if running as root
    if is_root() {
        return;
    }

    let report = show_json(nsboot().env(SANDBOX_ENV, "1"));
    assert_eq!(report["degraded"], true);
    assert!(report["bootstrap"].as_str().unwrap().contains("unshare:"));
}

#[test]
#[ignore] // Requires root
fn test_create_new_namespace() {
    // Skip if not root
    if !is_root() {
        return;
    }

    let host = show_json(&mut nsboot());
    let isolated = show_json(nsboot().env(SANDBOX_ENV, "1"));

    assert_eq!(isolated["bootstrap"], "created new network namespace");
    assert_ne!(host["net_namespace"], isolated["net_namespace"]);
}

#[test]
#[ignore] // Requires root
fn test_join_init_namespace() {
    // Skip if not root
    if !is_root() {
        return;
    }

    let report = show_json(
        nsboot()
            .env(SANDBOX_ENV, "1")
            .env(NETNS_PATH_ENV, "/proc/1/ns/net"),
    );

    assert_eq!(report["bootstrap"], "joined network namespace /proc/1/ns/net");
    assert_eq!(report["net_namespace"], report["init_namespace"]);
}
