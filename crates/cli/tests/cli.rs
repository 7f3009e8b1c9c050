use assert_cmd::Command;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
[store]
dir = "store"

[embedding]
model = { kind = "hashing", dimension = 128 }

[journal]
path = "log.md"
"#;

fn workspace() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let config = tmp.path().join("vectormd.toml");
    std::fs::write(&config, CONFIG).expect("write config");
    std::fs::write(tmp.path().join("vecDB.md"), "# A\ncode\n# B\nmore\n").expect("write md");
    (tmp, config)
}

fn bin(name: &str, dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(name).expect("binary");
    cmd.current_dir(dir)
        .env_remove("VECTORMD_CONFIG")
        .env_remove("VECTORMD_MODEL_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_then_json_query_ranks_matching_heading_first() {
    let (tmp, config) = workspace();

    bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    assert!(tmp.path().join("store/vectormd.index.json").is_file());
    assert!(tmp.path().join("store/vectormd.dataset/sections.json").is_file());

    let output = bin("vmd", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "A"])
        .output()
        .expect("run vmd");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let hits = json["hits"].as_array().expect("hits");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["heading"], "# A");
    assert_eq!(hits[0]["content"], "code");
    assert!(hits[0]["score"].as_f64() < hits[1]["score"].as_f64());
    assert!(!tmp.path().join("log.md").exists());
}

#[test]
fn query_before_init_fails() {
    let (tmp, config) = workspace();

    let output = bin("vmd", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "anything"])
        .output()
        .expect("run vmd");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not initialized"), "stderr: {stderr}");
}

#[test]
fn no_select_prints_table() {
    let (tmp, config) = workspace();
    bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let output = bin("vmd", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--no-select", "B"])
        .output()
        .expect("run vmd");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    let header = lines.next().expect("header");
    assert!(header.contains("Heading") && header.contains("Score"));
    assert!(lines.next().expect("first row").contains("# B"));
}

#[test]
fn init_with_explicit_file() {
    let (tmp, config) = workspace();
    std::fs::write(tmp.path().join("notes.md"), "# Only\nbody\n").expect("write");

    let output = bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--file", "notes.md"])
        .output()
        .expect("run vmd-init");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Indexed 1 sections"));
}

#[test]
fn piped_query_loop_runs_until_quit() {
    let (tmp, config) = workspace();
    bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let output = bin("vmd", tmp.path())
        .arg("--config")
        .arg(&config)
        .arg("--no-select")
        .write_stdin("A\nquit\n")
        .output()
        .expect("run vmd");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let tables = stdout.lines().filter(|l| l.contains("Heading")).count();
    assert_eq!(tables, 1, "{stdout}");
    assert!(stdout.contains("# A"));
}

#[test]
fn piped_selection_is_logged() {
    let (tmp, config) = workspace();
    bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    bin("vmd", tmp.path())
        .arg("--config")
        .arg(&config)
        .write_stdin("A\n0\nquit\n")
        .assert()
        .success();

    let log = std::fs::read_to_string(tmp.path().join("log.md")).expect("read log");
    assert!(log.starts_with("\n\n# A ("), "{log}");
    assert!(log.contains("## A (0.0)\n\ncode"), "{log}");
    assert!(!log.contains("## B"), "{log}");
}

#[test]
fn missing_file_prompts_for_replacement_on_stdin() {
    let (tmp, config) = workspace();
    std::fs::write(tmp.path().join("notes.md"), "# Only\nbody\n").expect("write");

    let output = bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--file", "missing.md"])
        .write_stdin("notes.md\n")
        .output()
        .expect("run vmd-init");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Indexed 1 sections"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.md not found"));
}

#[test]
fn missing_replacement_fails_setup() {
    let (tmp, config) = workspace();

    bin("vmd-init", tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--file", "missing.md"])
        .write_stdin("also-missing.md\n")
        .assert()
        .failure();
    assert!(!tmp.path().join("store").exists());
}
