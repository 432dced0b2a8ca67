//! End-to-end tests of the zabbix-dna binary against a mock Zabbix API.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use axum::{routing::post, Json, Router};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Serve `reply` on a background thread with its own runtime.
fn spawn_zabbix(reply: fn(&Value) -> Value) -> String {
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();

            let app = Router::new().route(
                "/api_jsonrpc.php",
                post(move |body: axum::body::Bytes| async move {
                    let body: Value = serde_json::from_slice(&body).unwrap();
                    Json(reply(&body))
                }),
            );
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}/api_jsonrpc.php", rx.recv().unwrap())
}

fn zabbix(body: &Value) -> Value {
    let id = body["id"].clone();
    let result = match body["method"].as_str().unwrap_or("") {
        "apiinfo.version" => json!("7.0.2"),
        "host.get" => json!([
            {"hostid": "10105", "host": "web02", "name": "Web 02", "status": "0",
             "maintenance_status": "0", "interfaces": [{"ip": "10.0.0.2", "available": "1"}]},
            {"hostid": "10084", "host": "web01", "name": "Web 01", "status": "1",
             "maintenance_status": "1", "interfaces": [{"ip": "10.0.0.1", "available": "2"}]}
        ]),
        "hostgroup.get" => json!([{"groupid": "2", "name": "Linux servers"}]),
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found.", "data": "Incorrect method"},
                "id": id
            })
        }
    };
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

fn zabbix_denied(body: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": -32602, "message": "Invalid params.", "data": "No permissions to referred object."},
        "id": body["id"]
    })
}

fn write_config(dir: &Path, url: &str, extra: &str) -> PathBuf {
    let path = dir.join("zabbix-dna.toml");
    let content = format!(
        "[api]\nurl = \"{}\"\nauth_token = \"test-token\"\ntimeout = 5\n\n[app]\nhistory = false\n{}\n\n[app.output]\ncolor = false\n",
        url, extra
    );
    std::fs::write(&path, content).unwrap();
    path
}

fn zabbix_dna(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zabbix-dna").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_host_list_rows_in_returned_order() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "");

    let output = zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .args(["host", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let web02 = stdout.find("web02").unwrap();
    let web01 = stdout.find("web01").unwrap();
    assert!(web02 < web01);
    assert!(stdout.contains("10.0.0.2"));
    assert!(stdout.contains("Found 2 hosts"));
}

#[test]
fn test_host_list_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "");

    let output = zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .args(["host", "list", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["count"], 2);
    assert_eq!(doc["hosts"][0]["host"], "web02");
    assert_eq!(doc["hosts"][1]["hostid"], "10084");
}

#[test]
fn test_legacy_alias() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "");

    zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .args(["hostgroup", "show_hostgroups"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linux servers"));
}

#[test]
fn test_rpc_error_exits_one() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix_denied), "");

    zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .args(["host", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("-32602"))
        .stderr(predicate::str::contains("Invalid params."));
}

#[test]
fn test_missing_config() {
    let dir = TempDir::new().unwrap();

    zabbix_dna(&dir)
        .args(["-c", "missing.toml", "host", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_version_without_config() {
    let dir = TempDir::new().unwrap();

    zabbix_dna(&dir)
        .args(["-c", "missing.toml", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "zabbix-dna {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_shows_api_version() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "");

    zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Zabbix API 7.0.2"));
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "bulk_mode = \"continue\"");
    let batch = dir.path().join("commands.txt");
    std::fs::write(
        &batch,
        "# inventory\nhost frobnicate\n\nhostgroup list\ntemplate list\n",
    )
    .unwrap();

    zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .arg("--batch")
        .arg(&batch)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linux servers"))
        .stdout(predicate::str::contains("Summary: 1 succeeded, 2 failed"));
}

#[test]
fn test_batch_strict_fails_after_all_lines() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_zabbix(zabbix), "");
    let batch = dir.path().join("commands.txt");
    std::fs::write(&batch, "host frobnicate\nhostgroup list\n").unwrap();

    zabbix_dna(&dir)
        .arg("-c")
        .arg(&config)
        .arg("--batch")
        .arg(&batch)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Linux servers"))
        .stderr(predicate::str::contains("1 succeeded, 1 failed"));
}
