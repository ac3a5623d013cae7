//! End-to-end tests for the varlens binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn varlens() -> Command {
    let mut cmd = Command::cargo_bin("varlens").unwrap();
    cmd.env_remove("VARLENS_SEED").env_remove("RUST_LOG");
    cmd
}

fn returns_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SAMPLE: &str = "return\n-0.05\n-0.03\n-0.01\n0.00\n0.01\n0.02\n0.04\n";

#[test]
fn historical_from_file() {
    let file = returns_file(SAMPLE);

    varlens()
        .args(["--format", "minimal", "var", "--method", "historical", "--confidence", "0.90"])
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout("0.038000\n");
}

#[test]
fn parametric_json_with_loss_amount() {
    let output = varlens()
        .args([
            "--format",
            "json",
            "var",
            "--method",
            "parametric",
            "--mean",
            "0",
            "--volatility",
            "0.02",
            "--confidence",
            "0.95",
            "--portfolio-value",
            "1000000",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "parametric");
    assert!((json["value"].as_f64().unwrap() - 0.0329).abs() < 1e-4);
    let loss = json["lossAmount"].as_f64().unwrap();
    assert!((loss - 32_897.07).abs() < 0.01, "{loss}");
}

#[test]
fn monte_carlo_seeded_is_reproducible() {
    let run = || {
        varlens()
            .args([
                "--format",
                "minimal",
                "var",
                "--method",
                "montecarlo",
                "--returns=-0.02,0.01,0.015,-0.005,0.003",
                "--simulations",
                "20000",
                "--seed",
                "42",
            ])
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn prices_are_converted() {
    let file = returns_file("date,close\n2024-03-01,100\n2024-03-04,110\n2024-03-05,99\n");

    // Returns are +10% and -10%; at 50% the interpolated quantile is 0.
    varlens()
        .args(["--format", "minimal", "var", "--confidence", "0.5", "--prices"])
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout("0.000000\n");
}

#[test]
fn table_output_has_headline() {
    varlens()
        .args(["var", "--method", "parametric", "--mean", "0", "--volatility", "0.02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Value at Risk"))
        .stdout(predicate::str::contains("3.2897%"));
}

#[test]
fn invalid_confidence_fails() {
    varlens()
        .args(["var", "--method", "parametric", "--mean", "0", "--volatility", "0.02", "--confidence", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confidence"));
}

#[test]
fn single_return_is_insufficient() {
    varlens()
        .args(["var", "--returns", "0.01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient data"));
}

#[test]
fn bad_input_line_reported() {
    let file = returns_file("0.01\nnot-a-number\n");

    varlens()
        .args(["var"])
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(":2: expected a number"));
}

#[test]
fn report_csv_has_every_method() {
    let file = returns_file(SAMPLE);

    varlens()
        .args(["--format", "csv", "report", "--seed", "7", "--confidence", "0.95,0.99"])
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("method,confidence,value,lossAmount,error\n"))
        .stdout(predicate::str::contains("historical,0.95,"))
        .stdout(predicate::str::contains("parametric,0.99,"))
        .stdout(predicate::str::contains("montecarlo,0.99,"));
}

#[test]
fn report_json_records_row_errors() {
    let output = varlens()
        .args([
            "--format",
            "json",
            "report",
            "--returns",
            "0.01",
            "--mean",
            "0",
            "--volatility",
            "0.02",
            "--confidence",
            "0.99",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["errorKind"], "InsufficientData");
    assert!(rows[1]["value"].is_number());
}
