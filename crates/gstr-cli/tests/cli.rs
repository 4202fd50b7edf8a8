//! Command-line round trips.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INVOICE_TEXT: &str = "TAX INVOICE
Supplier GSTIN: 27ABCDE1234F1Z5
Invoice No: INV-2024-118
Invoice Date: 05/04/2024
Taxable Value: 10,000.00
CGST @ 9%: 900.00
SGST @ 9%: 900.00
Grand Total: \u{20b9} 11,800.00
";

/// `gstr` with its config directory pointed into `home`.
fn gstr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gstr").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

#[test]
fn extract_text_file_as_json() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("invoice.txt");
    fs::write(&input, INVOICE_TEXT).unwrap();

    let output = gstr(&home).arg("extract").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["gstin"], "27ABCDE1234F1Z5");
    assert_eq!(json["invoice_no"], "INV-2024-118");
    assert_eq!(json["money"]["taxable_value"], "10000.00");
    assert_eq!(json["money"]["total_tax"], "1800.00");
    assert_eq!(json["money"]["total_tax_derived"], true);
    assert_eq!(json["money"]["invoice_value"], "11800.00");
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn extract_reports_warnings_on_stderr() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("blank.txt");
    fs::write(&input, "Thank you for your business\n").unwrap();

    gstr(&home)
        .args(["extract", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("GSTIN: -"))
        .stderr(predicate::str::contains("GSTIN not found"))
        .stderr(predicate::str::contains("Taxable value not found"));
}

#[test]
fn extract_rejects_unknown_format() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("invoice.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();

    gstr(&home)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: pdf"));
}

#[test]
fn extract_unreadable_image_needs_no_models() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("scan.png");
    fs::write(&input, b"not really a png").unwrap();

    let output = gstr(&home)
        .arg("extract")
        .arg(&input)
        .arg("--model-dir")
        .arg(home.path().join("no-models"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported file or unreadable image"));
    assert!(!stderr.contains("OCR models not found"));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["warnings"][0], "Unsupported file or unreadable image");
    assert_eq!(json["warnings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn extract_logs_follow_rust_log() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("invoice.txt");
    fs::write(&input, INVOICE_TEXT).unwrap();

    gstr(&home)
        .env("RUST_LOG", "info")
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing file"));

    gstr(&home)
        .env_remove("RUST_LOG")
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing file").not());
}

#[test]
fn export_rows_to_stdout() {
    let home = TempDir::new().unwrap();
    let rows = home.path().join("rows.json");
    fs::write(
        &rows,
        r#"[
            {
                "gstin_uin_of_recipient": "29AABCU9603R1ZM",
                "receiver_name": "Acme Traders",
                "invoice_number": "INV-001",
                "invoice_date": "05-04-2024",
                "invoice_value": "11800.00",
                "rate": "18",
                "taxable_value": "10000.00"
            },
            { "gstin_uin_of_recipient": "27ABCDE1234F1Z5", "invoice_number": "INV-002" }
        ]"#,
    )
    .unwrap();

    gstr(&home)
        .arg("export")
        .arg(&rows)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "GSTIN/UIN of Recipient,Receiver Name,Invoice Number",
        ))
        .stdout(predicate::str::contains(
            "29AABCU9603R1ZM,Acme Traders,INV-001,05-04-2024,11800.00,,N,,Regular,,18,10000.00,0.0\n",
        ))
        .stdout(predicate::str::contains(
            "27ABCDE1234F1Z5,,INV-002,,,,N,,Regular,,,,0.0\n",
        ));
}

#[test]
fn export_reports_issues_and_strict_fails() {
    let home = TempDir::new().unwrap();
    let rows = home.path().join("rows.json");
    fs::write(
        &rows,
        r#"[{ "gstin_uin_of_recipient": "BADGSTIN", "reverse_charge": "X" }]"#,
    )
    .unwrap();

    gstr(&home)
        .arg("export")
        .arg(&rows)
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid recipient GSTIN: BADGSTIN"))
        .stdout(predicate::str::contains("BADGSTIN,,,,,,X,,Regular,,,,0.0"));

    gstr(&home)
        .args(["export", "--strict"])
        .arg(&rows)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn export_into_directory_uses_configured_name() {
    let home = TempDir::new().unwrap();
    let rows = home.path().join("rows.json");
    fs::write(&rows, "[]").unwrap();
    let out_dir = home.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    gstr(&home)
        .arg("export")
        .arg(&rows)
        .arg("--output")
        .arg(&out_dir)
        .assert()
        .success();

    let csv = fs::read_to_string(out_dir.join("gstr1_b2b.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn batch_writes_summary() {
    let home = TempDir::new().unwrap();
    let inbox = home.path().join("inbox");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a.txt"), INVOICE_TEXT).unwrap();
    fs::write(inbox.join("b.txt"), "nothing useful").unwrap();
    let out_dir = home.path().join("out");

    gstr(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", inbox.display()))
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Total taxable value: 10000.00"));

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.txt,valid,inv_"));
    assert!(lines[2].starts_with("b.txt,warning,inv_"));
}

#[test]
fn config_init_get_set() {
    let home = TempDir::new().unwrap();

    gstr(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    gstr(&home)
        .args(["config", "set", "ocr.min_region_score", "0.5"])
        .assert()
        .success();

    gstr(&home)
        .args(["config", "get", "ocr.min_region_score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.5"));

    gstr(&home)
        .args(["config", "get", "ocr.no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    gstr(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn batch_marks_unreadable_image_as_warning() {
    let home = TempDir::new().unwrap();
    let inbox = home.path().join("inbox");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a.txt"), INVOICE_TEXT).unwrap();
    fs::write(inbox.join("broken.png"), b"\x89PNG truncated").unwrap();
    let out_dir = home.path().join("out");

    gstr(&home)
        .arg("batch")
        .arg(format!("{}/*", inbox.display()))
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--model-dir")
        .arg(home.path().join("no-models"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    let broken = summary
        .lines()
        .find(|line| line.starts_with("broken.png,"))
        .unwrap();
    assert!(broken.starts_with("broken.png,warning,inv_"));
    assert!(broken.contains("Unsupported file or unreadable image"));
}

#[test]
fn config_subcommands_use_global_config_path() {
    let home = TempDir::new().unwrap();
    let team = home.path().join("team.json");
    let default_path = home.path().join("gstr").join("config.json");

    gstr(&home)
        .arg("--config")
        .arg(&team)
        .args(["config", "init"])
        .assert()
        .success();

    gstr(&home)
        .arg("--config")
        .arg(&team)
        .args(["config", "set", "ocr.min_region_score", "0.5"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&team).unwrap()).unwrap();
    assert_eq!(saved["ocr"]["min_region_score"], 0.5);
    assert!(!default_path.exists());

    gstr(&home)
        .arg("--config")
        .arg(&team)
        .args(["config", "get", "ocr.min_region_score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.5"));

    gstr(&home)
        .arg("--config")
        .arg(&team)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("team.json"))
        .stdout(predicate::str::contains("exists"));
}
