use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tokmeter"))
}

fn root_args(temp_dir: &TempDir) -> [String; 2] {
    ["--root".to_string(), temp_dir.path().to_string_lossy().into_owned()]
}

#[test]
fn e2e_analyze_inline_text_report() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "--text", "Hello world"])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Model:          GPT-4o Mini"), "Got:\n{}", stdout);
    assert!(stdout.contains("Role:           User Message"), "Got:\n{}", stdout);
    assert!(stdout.contains("Characters:             11"), "Got:\n{}", stdout);
    assert!(stdout.contains("Words:                   2"), "Got:\n{}", stdout);
}

#[test]
fn e2e_analyze_json_from_file() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("prompt.txt"), "You are a helpful assistant.")
        .expect("write prompt");

    let output = bin()
        .args(root_args(&temp_dir))
        .args([
            "analyze",
            "prompt.txt",
            "--model",
            "gpt-4o",
            "--role",
            "system",
            "--format",
            "json",
        ])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["text"], "You are a helpful assistant.");
    assert_eq!(value["model"], "gpt-4o");
    assert_eq!(value["role"]["type"], "system");
    assert!(value["totalTokens"].as_u64().unwrap() > 0);
}

#[test]
fn e2e_analyze_reads_stdin() {
    let temp_dir = TempDir::new().expect("temp dir");

    let mut child = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "--format", "csv"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn tokmeter");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"piped text")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Text,Model,Role,Tokens,Characters,Words,Cost,Timestamp");
    assert!(lines[1].starts_with("piped text,gpt-4o-mini,user,"), "Got:\n{}", stdout);
}

#[test]
fn e2e_config_overrides_apply_to_paths() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(
        temp_dir.path().join("tokmeter.toml"),
        r#"
model = "gpt-4"

[[override]]
pattern = "replies/**"
model = "claude-3-haiku"
role = "assistant"
"#,
    )
    .expect("write config");
    std::fs::create_dir(temp_dir.path().join("replies")).expect("mkdir");
    std::fs::write(temp_dir.path().join("replies/one.txt"), "Sure, here you go.")
        .expect("write reply");
    std::fs::write(temp_dir.path().join("question.txt"), "Can you help?")
        .expect("write question");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "replies/one.txt", "question.txt", "--format", "csv"])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("\"Sure, here you go.\",claude-3-haiku,assistant,"),
        "Got:\n{}",
        stdout
    );
    assert!(stdout.contains("Can you help?,gpt-4,user,"), "Got:\n{}", stdout);
}

#[test]
fn e2e_analyze_several_inputs_prints_history() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("a.txt"), "first").expect("write a");
    std::fs::write(temp_dir.path().join("b.txt"), "second").expect("write b");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "a.txt", "b.txt"])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== a.txt =="), "Got:\n{}", stdout);
    assert!(stdout.contains("Recent analyses (2)"), "Got:\n{}", stdout);
}

#[test]
fn e2e_strict_fails_when_over_limit() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("big.txt"), "word ".repeat(9000)).expect("write");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "big.txt", "--model", "gpt-4", "--strict"])
        .output()
        .expect("run tokmeter");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR [big.txt]"), "Got:\n{}", stderr);
    assert!(stderr.contains("Error: 1 input(s) exceed"), "Got:\n{}", stderr);
}

#[test]
fn e2e_usage_warning_goes_to_stderr() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("tokmeter.toml"), "[limits]\nwarn = 0.0\n")
        .expect("write config");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "--text", "tiny", "--format", "json"])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN [<text>]"), "Got:\n{}", stderr);
    serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("stdout stays json");
}

#[test]
fn e2e_count_prints_bare_number() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["count", "--text", "Hello world", "--model", "gpt-4"])
        .output()
        .expect("run tokmeter");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let count: usize = stdout.trim().parse().expect("number");
    assert_eq!(count, tokmeter::count_tokens("Hello world", tokmeter::SupportedModel::Gpt4));
}

#[test]
fn e2e_limit_exit_codes() {
    let temp_dir = TempDir::new().expect("temp dir");

    let ok = bin()
        .args(root_args(&temp_dir))
        .args(["limit", "8192", "--model", "gpt-4"])
        .output()
        .expect("run tokmeter");
    assert!(ok.status.success());
    assert!(String::from_utf8_lossy(&ok.stdout).contains("(100.00%) ok"));

    let over = bin()
        .args(root_args(&temp_dir))
        .args(["limit", "8193", "--model", "gpt-4"])
        .output()
        .expect("run tokmeter");
    assert_eq!(over.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&over.stderr).starts_with("Error: 8193 tokens exceed"));
}

#[test]
fn e2e_models_lists_registry() {
    let output = bin().arg("models").output().expect("run tokmeter");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["gpt-3.5-turbo", "gpt-4o-mini", "claude-3.5-sonnet", "claude-3-opus"] {
        assert!(stdout.contains(id), "missing {}:\n{}", id, stdout);
    }
}

#[test]
fn e2e_unknown_model_is_rejected() {
    let output = bin()
        .args(["count", "--text", "x", "--model", "gpt-9"])
        .output()
        .expect("run tokmeter");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown model 'gpt-9'"), "Got:\n{}", stderr);
}

#[test]
fn e2e_missing_file_reports_error() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = bin()
        .args(root_args(&temp_dir))
        .args(["analyze", "nope.txt"])
        .output()
        .expect("run tokmeter");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read input file"), "Got:\n{}", stderr);
}
