use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn ssm_parent_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ssm-parent"))
}

fn with_temp_workspace<F>(test: F)
where
    F: FnOnce(&Path),
{
    let temp_dir = TempDir::new().expect("create temp dir");
    test(temp_dir.path());
}

fn write_store(workspace: &Path) -> PathBuf {
    let store_path = workspace.join("store.toml");
    std::fs::write(
        &store_path,
        r#"
[parameters]
"/app/config" = '{"HOST": "db", "PORT": "5432"}'
"/app/plain/TOKEN" = "t$k"
"/app/broken" = "{nope"
"#,
    )
    .expect("write store");
    store_path
}

fn run_cli(workspace: &Path, args: &[&str]) -> Output {
    Command::new(ssm_parent_binary())
        .args(args)
        .current_dir(workspace)
        .env_remove("LOG_LEVEL")
        .env_remove("SSM_PARENT_STORE")
        .output()
        .expect("run ssm-parent")
}

#[test]
fn test_print_json() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "-n",
                "/app/config",
                "--plain-path",
                "/app/plain",
                "print",
            ],
        );
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let printed: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        assert_eq!(printed["HOST"], "db");
        assert_eq!(printed["PORT"], "5432");
        assert_eq!(printed["TOKEN"], "t$k");
    });
}

#[test]
fn test_dotenv_writes_file() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "--plain-name",
                "/app/plain/TOKEN",
                "dotenv",
                "app.env",
            ],
        );
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let content = std::fs::read_to_string(workspace.join("app.env")).expect("read env file");
        assert_eq!(content, "TOKEN=\"t\\$k\"\n");
    });
}

#[test]
fn test_strict_mode_exit_code() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "-s",
                "--plain-name",
                "/app/missing",
                "print",
            ],
        );
        assert_eq!(output.status.code(), Some(3));

        let lenient = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "--plain-name",
                "/app/missing",
                "print",
            ],
        );
        assert!(lenient.status.success());
    });
}

#[test]
fn test_malformed_json_exit_code() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &["--store", "store.toml", "-n", "/app/broken", "print"],
        );
        assert_eq!(output.status.code(), Some(7));
    });
}

#[test]
fn test_config_file_transformations() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        std::fs::write(
            workspace.join("ssm-parent.toml"),
            r#"
store = "store.toml"
name = ["/app/config"]

[[transformations]]
action = "template"
key = "URL"
template = "{{.HOST}}:{{.PORT}}"

[[transformations]]
action = "delete"
key = "PORT"
"#,
        )
        .expect("write config");

        let output = run_cli(workspace, &["-c", "ssm-parent.toml", "print"]);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let printed: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        assert_eq!(printed["URL"], "db:5432");
        assert!(printed.get("PORT").is_none());
    });
}

#[cfg(unix)]
#[test]
fn test_run_exports_parameters() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "-n",
                "/app/config",
                "run",
                "--",
                "sh",
                "-c",
                "test \"$HOST:$PORT\" = db:5432",
            ],
        );
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    });
}

#[cfg(unix)]
#[test]
fn test_run_expands_arguments() {
    with_temp_workspace(|workspace| {
        write_store(workspace);
        let output = run_cli(
            workspace,
            &[
                "--store",
                "store.toml",
                "-e",
                "-n",
                "/app/config",
                "run",
                "--",
                "echo",
                "${HOST}-$PORT",
            ],
        );
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "db-5432");
    });
}

#[test]
fn test_missing_store_is_config_error() {
    with_temp_workspace(|workspace| {
        let output = run_cli(workspace, &["-n", "/app/config", "print"]);
        assert_eq!(output.status.code(), Some(6));
    });
}
