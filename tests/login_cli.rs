//! End-to-end tests for the `loginuv-agent` binary.
//!
//! The binary is run with piped stdin (line prompts, no terminal) and a
//! zero step delay so the full flow finishes instantly.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_agent(stdin: &str, extra_env: &[(&str, &str)]) -> Output {
    run_agent_bytes(stdin.as_bytes(), extra_env)
}

fn run_agent_bytes(stdin: &[u8], extra_env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_loginuv-agent"));
    cmd.env("LOGINUV_STEP_DELAY_MS", "0")
        .env_remove("LOGINUV_PROGRESS")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in extra_env {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("failed to spawn loginuv-agent");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for loginuv-agent")
}

const GRANTED_TRANSCRIPT: &str = "\
[ 20%] Validando datos locales
[ 45%] Conectando al servidor
[ 70%] Validando credenciales
[ 90%] Aplicando politicas de sesion
[100%] Acceso concedido
queued event: LOGIN_OK
Sesion iniciada
";

#[test]
fn valid_user_code_runs_full_flow() {
    let output = run_agent("alice123\nanything\n", &[]);

    assert!(
        output.status.success(),
        "agent failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), GRANTED_TRANSCRIPT);
}

#[test]
fn latin1_password_still_grants_session() {
    let output = run_agent_bytes(b"alice123\ncontrase\xf1a\n", &[]);

    assert!(
        output.status.success(),
        "agent failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), GRANTED_TRANSCRIPT);
}

#[test]
fn empty_user_code_prints_only_rejection() {
    let output = run_agent("\n", &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Credenciales invalidas\n");
}

#[test]
fn whitespace_user_code_is_rejected_like_empty() {
    let output = run_agent("   \nsecret\n", &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Credenciales invalidas\n");
}

#[test]
fn same_input_gives_same_transcript() {
    let first = run_agent("bob\npw\n", &[]);
    let second = run_agent("bob\npw\n", &[]);

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn prompts_and_banner_go_to_stderr() {
    let output = run_agent("alice123\npw\n", &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("LoginUV Client Agent (demo)"), "stderr: {}", stderr);
    assert!(stderr.contains("Codigo de usuario: "), "stderr: {}", stderr);
    assert!(stderr.contains("Contrasena: "), "stderr: {}", stderr);
    assert!(!stderr.contains("pw\n"), "password should not be echoed: {}", stderr);
}

#[test]
fn invalid_configuration_fails_before_prompting() {
    let output = run_agent("alice123\npw\n", &[("LOGINUV_STEP_DELAY_MS", "later")]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LOGINUV_STEP_DELAY_MS"), "stderr: {}", stderr);
}

#[test]
fn bar_mode_keeps_stdout_free_of_step_lines() {
    let output = run_agent("alice123\npw\n", &[("LOGINUV_PROGRESS", "bar")]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "queued event: LOGIN_OK\nSesion iniciada\n"
    );
}
