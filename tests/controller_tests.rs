//! Controller tests against stub `pg_ctl` executables

#![cfg(unix)]
#![allow(deprecated)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use pgctl::{Controller, ControllerConfig, ControllerError, StatusResult, INTERNAL_ERROR_CODE};
use tempfile::TempDir;

/// Write an executable shell script standing in for pg_ctl
fn stub_pg_ctl(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("pg_ctl");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn controller_for(bin: PathBuf) -> Controller {
    Controller::with_config("/gpdata/master", ControllerConfig::default().with_pg_ctl_bin(bin))
}

const RUNNING_OUTPUT: &str = r#"printf 'pg_ctl: server is running (PID: 4821)\n/usr/local/bin/postgres -D /data\n'"#;

#[test]
fn status_running() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, RUNNING_OUTPUT));

    let status = controller.status().unwrap();
    assert_eq!(status.error_code, 0);
    assert!(status.is_server_running);
    assert_eq!(status.pid, 4821);
    assert_eq!(status.ps_postgres, "/usr/local/bin/postgres -D /data");
    assert_eq!(
        status.raw_stdout,
        "pg_ctl: server is running (PID: 4821)\n/usr/local/bin/postgres -D /data\n"
    );
    assert!(status.raw_stderr.is_empty());
}

#[test]
fn status_not_running_exit_3_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(
        &dir,
        "echo 'pg_ctl: no server running'\necho 'extra line'\nexit 3",
    ));

    let status = controller.status().unwrap();
    assert_eq!(status.error_code, 3);
    assert!(!status.is_server_running);
    assert_eq!(status.pid, 0);
    assert_eq!(status.ps_postgres, "");
}

#[test]
fn status_fields_come_from_stdout_regardless_of_exit_code() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, &format!("{}\nexit 4", RUNNING_OUTPUT)));

    let status = controller.status().unwrap();
    assert_eq!(status.error_code, 4);
    assert!(status.is_server_running);
    assert_eq!(status.pid, 4821);
}

#[test]
fn status_captures_stderr_separately() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(
        &dir,
        "echo 'pg_ctl: no server running'\necho 'pg_ctl: invalid option' >&2\nexit 1",
    ));

    let status = controller.status().unwrap();
    assert_eq!(status.error_code, 1);
    assert_eq!(status.raw_stdout, "pg_ctl: no server running\n");
    assert_eq!(status.raw_stderr, "pg_ctl: invalid option\n");
}

#[test]
fn status_passes_expected_arguments() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, r#"printf '%s|' "$@" >&2"#));

    let status = controller.status().unwrap();
    assert_eq!(status.raw_stderr, "status|-w|-D|/gpdata/master|");
}

#[test]
fn status_forwards_configured_env() {
    let dir = TempDir::new().unwrap();
    let config = ControllerConfig::default()
        .with_pg_ctl_bin(stub_pg_ctl(&dir, r#"echo "pg_ctl: server is running (PID: $STUB_PID)""#))
        .with_env("STUB_PID", "314");
    let controller = Controller::with_config("/gpdata/master", config);

    let status = controller.status().unwrap();
    assert!(status.is_server_running);
    assert_eq!(status.pid, 314);
    assert_eq!(status.ps_postgres, "");
}

#[test]
fn status_missing_binary_reports_internal_error() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(dir.path().join("missing_pg_ctl"));

    let err = controller.status().unwrap_err();
    assert_eq!(err.error_code(), INTERNAL_ERROR_CODE);
    assert!(matches!(err, ControllerError::Command(_)));

    let record = err.status_result();
    assert_eq!(record.error_code, INTERNAL_ERROR_CODE);
    assert!(record.raw_stdout.is_empty());
    assert!(record.raw_stderr.is_empty());
    assert!(!record.is_server_running);
    assert_eq!(record.pid, 0);
    assert!(record.ps_postgres.is_empty());
    assert_eq!(record, StatusResult::internal_failure());
}

#[test]
fn status_not_executable_reports_internal_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pg_ctl");
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let err = controller_for(path).status().unwrap_err();
    assert_eq!(err.error_code(), INTERNAL_ERROR_CODE);
}

#[test]
fn status_killed_by_signal_reports_internal_error() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, "kill -9 $$"));

    let err = controller.status().unwrap_err();
    assert_eq!(err.error_code(), INTERNAL_ERROR_CODE);
    assert!(err.to_string().contains("signal"));
    assert_eq!(err.status_result(), StatusResult::internal_failure());
}

#[test]
fn is_started_exit_0() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, RUNNING_OUTPUT));

    assert!(controller.is_started().unwrap());
}

#[test]
fn is_started_exit_3() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, "echo 'pg_ctl: no server running'\nexit 3"));

    assert!(!controller.is_started().unwrap());
}

#[test]
fn is_started_ignores_status_text() {
    // Exit code alone decides, even when stdout says the server is running
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, &format!("{}\nexit 3", RUNNING_OUTPUT)));

    assert!(!controller.is_started().unwrap());
}

#[test]
fn is_started_other_exit_is_error() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(
        &dir,
        "echo 'pg_ctl: could not access directory' >&2\nexit 4",
    ));

    match controller.is_started().unwrap_err() {
        ControllerError::InstanceState { code, output } => {
            assert_eq!(code, 4);
            assert_eq!(output, "pg_ctl: could not access directory\n");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn is_started_passes_socket_option() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(
        &dir,
        r#"[ "$*" = "status -w -D /gpdata/master -o -c unix_socket_directories=/tmp" ] || exit 9"#,
    ));

    assert!(controller.is_started().unwrap());
}

#[test]
fn is_started_missing_binary_is_error() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(dir.path().join("missing_pg_ctl"));

    assert!(matches!(
        controller.is_started().unwrap_err(),
        ControllerError::Command(_)
    ));
}

#[tokio::test]
async fn status_async_matches_blocking_call() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, RUNNING_OUTPUT));

    let status = controller.status_async().await.unwrap();
    assert_eq!(status, controller.status().unwrap());
}

#[tokio::test]
async fn is_started_async_exit_3() {
    let dir = TempDir::new().unwrap();
    let controller = controller_for(stub_pg_ctl(&dir, "exit 3"));

    assert!(!controller.is_started_async().await.unwrap());
}
