// Integration tests for the constfold binary
// Runs the compiled binary on fixture files and checks output and exit codes.

use std::process::Command;

/// Run a fixture and return (stdout, stderr, exit_code)
fn run_fixture(name: &str, extra_args: &[&str]) -> (String, String, i32) {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let output = Command::new(env!("CARGO_BIN_EXE_constfold"))
        .arg("--no-color")
        .args(extra_args)
        .arg(&path)
        .output()
        .expect("Failed to execute constfold");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Test helper: assert exit code and that stdout or stderr contains each expected line
fn assert_output(name: &str, expected_exit_code: i32, expected: &[&str]) {
    let (stdout, stderr, exit_code) = run_fixture(name, &[]);

    assert_eq!(
        exit_code, expected_exit_code,
        "\nExit code mismatch for {}\nExpected: {}\nGot: {}\nStdout: {}\nStderr: {}",
        name, expected_exit_code, exit_code, stdout, stderr
    );

    for line in expected {
        assert!(
            stdout.contains(line) || stderr.contains(line),
            "\nOutput mismatch for {}\nExpected to contain: {}\nStdout: {}\nStderr: {}",
            name, line, stdout, stderr
        );
    }
}

// ==================== SUCCESS TESTS ====================

#[test]
fn test_folds_constants() {
    assert_output(
        "ok.cst",
        0,
        &[
            "WIDTH: uint8 = 16",
            "HEIGHT: uint8 = 9",
            "AREA: uint8 = 144",
            "MASK: uint256 = 255",
            "HALF: rational_const 1/2 = 1/2",
            "AREA % 7 = 4",
            "(WIDTH + 1) / 2 = 17/2",
        ],
    );
}

#[test]
fn test_variables_are_not_listed() {
    let (stdout, _, _) = run_fixture("ok.cst", &[]);
    assert!(!stdout.contains("counter"));
}

#[test]
fn test_one_shot_mode_gives_same_values() {
    let (shared, _, shared_code) = run_fixture("ok.cst", &[]);
    let (one_shot, _, one_shot_code) = run_fixture("ok.cst", &["--one-shot"]);
    assert_eq!(shared, one_shot);
    assert_eq!(shared_code, one_shot_code);
}

#[test]
fn test_tokens_mode() {
    let (stdout, _, exit_code) = run_fixture("cyclic.cst", &["--tokens"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Const"));
}

// ==================== DIAGNOSTIC TESTS ====================

#[test]
fn test_cyclic_constants() {
    assert_output(
        "cyclic.cst",
        3,
        &["E203", "Cyclic constant definition (or maximum recursion depth exhausted)."],
    );
}

#[test]
fn test_division_by_zero() {
    assert_output(
        "div_zero.cst",
        2,
        &["E201", "Division by 0.", "q: not constant", "a / 3 = 10/3"],
    );
}

#[test]
fn test_not_convertible() {
    assert_output(
        "not_convertible.cst",
        2,
        &[
            "E204",
            "small: uint8 = 300",
            "Type int_const 300 is not implicitly convertible to expected type uint8.",
        ],
    );
}

#[test]
fn test_incompatible_operator_stops_the_pass() {
    assert_output(
        "incompatible.cst",
        3,
        &["E202", "Operator + not compatible with types bool and literal_string \"abc\""],
    );
    let (stdout, _, _) = run_fixture("incompatible.cst", &[]);
    assert!(stdout.contains("later: int_const 1 = 1"));
    assert!(!stdout.lines().any(|line| line == "later = 1"));
}

// ==================== FRONTEND ERROR TESTS ====================

#[test]
fn test_parse_error() {
    assert_output("parse_error.cst", 1, &["E001"]);
}

#[test]
fn test_undefined_identifier() {
    assert_output("undefined.cst", 1, &["Undeclared identifier 'y'"]);
}

#[test]
fn test_unknown_type_name() {
    assert_output("bad_type.cst", 1, &["unknown type name 'uint7'"]);
}

#[test]
fn test_missing_file() {
    let (_, stderr, exit_code) = run_fixture("does_not_exist.cst", &[]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Error reading"));
}
