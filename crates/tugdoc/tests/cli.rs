//! CLI end-to-end tests.
//!
//! These tests spawn the actual `tugdoc` binary against files in a temporary
//! directory and validate stdout and exit codes.
//!
//! Exit code expectations:
//! - 0: Success
//! - 2: Invalid arguments (malformed location, unknown style)
//! - 3: Resolution error (file not found)

use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run tugdoc with given arguments and return (stdout, stderr, exit_code).
fn run_tugdoc(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tugdoc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute tugdoc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Write `source` to `name` inside `dir` and return its path.
fn python_file(dir: &TempDir, name: &str, source: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write python file");
    path.to_string_lossy().into_owned()
}

const SAMPLE: &str = "\
def lookup(table, key, default=None):
    '''Find a key.'''
    if key not in table:
        raise KeyError(key)
    return table[key]
";

// ============================================================================
// generate
// ============================================================================

#[test]
fn generate_text_prints_docstring_body() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "sample.py", SAMPLE);

    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &format!("{file}:1:5")]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "\nFind a key.\n\nArgs:\n    table (TYPE): \n    key (TYPE): \n    default (NoneType):  default: ``None``\n\n\nReturns:\n    TYPE: table[key]\n\n\nRaises:\n    KeyError: \n\n"
    );
}

#[test]
fn generate_json_envelope() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "sample.py", SAMPLE);
    let at = format!("{file}:3:1");

    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &at, "--format", "json"]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["schema_version"], "1");
    assert_eq!(json["location"]["line"], 3);
    assert_eq!(json["subject"]["kind"], "function");
    assert_eq!(json["subject"]["name"], "lookup");
    assert_eq!(json["subject"]["line"], 1);
    assert_eq!(json["style"], "google");
    assert!(json["docstring"]
        .as_str()
        .unwrap()
        .starts_with("\nFind a key.\n\nArgs:\n"));
}

#[test]
fn generate_module_outside_definitions() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "consts.py", "import os\n\nLIMIT = 10\nNAME = 'x'\n");

    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &format!("{file}:1:1")]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "\n\n\nAttributes:\n    LIMIT (int): 10\n    NAME (str): 'x'\n\n"
    );
}

// ============================================================================
// facts and styles
// ============================================================================

#[test]
fn facts_dump_the_subject() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "sample.py", SAMPLE);

    let (stdout, _stderr, exit_code) = run_tugdoc(&["facts", "--at", &format!("{file}:1:1")]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["status"], "ok");
    let subject = &json["subject"];
    assert_eq!(subject["kind"], "function");
    assert_eq!(subject["params"].as_array().map(Vec::len), Some(3));
    assert_eq!(subject["params"][2]["default"], "None");
    assert_eq!(subject["returns"][0]["expression"], "table[key]");
    assert_eq!(subject["raises"][0]["exception_name"], "KeyError");
    assert_eq!(subject["docstring"], "'''Find a key.'''");
}

#[test]
fn styles_lists_google() {
    let (stdout, _stderr, exit_code) = run_tugdoc(&["styles"]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["styles"], serde_json::json!(["google"]));
    assert_eq!(json["default"], "google");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_file_returns_exit_3() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.py");
    let at = format!("{}:1:1", missing.display());

    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &at]);

    assert_eq!(exit_code, 3);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], 3);
    assert_eq!(
        json["error"]["details"]["path"],
        missing.to_string_lossy().as_ref()
    );
}

#[test]
fn malformed_location_returns_exit_2() {
    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", "sample.py:nope"]);

    assert_eq!(exit_code, 2);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["error"]["code"], 2);
}

#[test]
fn unknown_style_returns_exit_2() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "sample.py", SAMPLE);
    let at = format!("{file}:1:1");

    let (stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &at, "--style", "numpy"]);

    assert_eq!(exit_code, 2);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["error"]["details"]["style"], "numpy");
    assert_eq!(json["error"]["details"]["available"], serde_json::json!(["google"]));
}

#[test]
fn line_zero_returns_exit_2() {
    let dir = TempDir::new().unwrap();
    let file = python_file(&dir, "sample.py", SAMPLE);

    let (_stdout, _stderr, exit_code) = run_tugdoc(&["generate", "--at", &format!("{file}:0:1")]);

    assert_eq!(exit_code, 2);
}
