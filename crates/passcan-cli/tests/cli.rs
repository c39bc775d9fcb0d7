use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

const MRZ_TEXT: &str = "REPUBLIQUE FRANCAISE\nPASSEPORT/PASSPORT\n\
    Date de délivrance/Date of issue\n12 03 2019\n\
    P<FRAMARTIN<<JEAN<PIERRE<<<<<<<<<<<<<<<<<<<<\n\
    12AB34567<8FRA850101<M290512<<<<<<<<<<<<<04\n";

fn write_native_dump(path: &Path) {
    let dump = json!({
        "pages": [
            {
                "full_text": MRZ_TEXT,
                "words": [
                    { "text": "MARTIN", "confidence": 0.9 },
                    { "text": "JEAN", "confidence": 0.8 },
                    { "text": "12AB34567", "confidence": 0.7 }
                ]
            },
            { "full_text": "Lorem ipsum dolor sit amet", "words": [] }
        ]
    });
    fs::write(path, serde_json::to_string(&dump).unwrap()).unwrap();
}

fn write_vision_dump(path: &Path) {
    let dump = json!({
        "responses": [
            {
                "fullTextAnnotation": {
                    "text": MRZ_TEXT,
                    "pages": [{
                        "blocks": [{
                            "paragraphs": [{
                                "words": [
                                    { "confidence": 0.9, "symbols": [{ "text": "MAR" }, { "text": "TIN" }] }
                                ]
                            }]
                        }]
                    }]
                }
            },
            { "error": { "code": 3, "message": "Bad image data." } }
        ]
    });
    fs::write(path, serde_json::to_string(&dump).unwrap()).unwrap();
}

fn passcan() -> Command {
    Command::cargo_bin("passcan").unwrap()
}

#[test]
fn test_extract_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.json");
    write_native_dump(&input);

    passcan()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"success\""))
        .stdout(predicate::str::contains("\"passport_number\": \"12AB34567\""))
        .stdout(predicate::str::contains("\"birth_date\": \"1985-01-01\""))
        .stdout(predicate::str::contains(
            "The document could not be confirmed as a French passport.",
        ))
        .stderr(predicate::str::contains("1 accepted"));
}

#[test]
fn test_extract_vision_response_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("vision.json");
    let output = dir.path().join("out.csv");
    write_vision_dump(&input);

    passcan()
        .args(["extract", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("page,status,last_name"));
    assert!(lines[1].starts_with("1,success,MARTIN,JEAN PIERRE,12AB34567"));
    assert!(lines[2].starts_with("2,failure"));
    assert!(lines[2].contains("Bad image data."));
}

#[test]
fn test_extract_text_with_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.json");
    write_native_dump(&input);

    passcan()
        .args(["extract", "--format", "text", "--parallel", "--show-confidence"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1: accepted"))
        .stdout(predicate::str::contains("Page 2: rejected"))
        .stderr(predicate::str::contains("Page 1 confidence: 80.0%"));
}

#[test]
fn test_extract_missing_input() {
    passcan()
        .args(["extract", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    passcan().arg("extract").arg(&input).assert().failure();
}

#[test]
fn test_extract_unrecognized_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("other.json");
    fs::write(&input, r#"{"unrelated": 42}"#).unwrap();

    passcan()
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized OCR output"));
}

#[test]
fn test_batch_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    write_native_dump(&dir.path().join("a.json"));
    write_vision_dump(&dir.path().join("b.json"));
    fs::write(dir.path().join("c.json"), "{ not json").unwrap();

    let pattern = dir.path().join("*.json");

    passcan()
        .args(["batch", "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 3 files"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("file,page,status,passport_number,confidence,reason"));
    assert!(summary.contains("a.json,1,success,12AB34567,0.8000,"));
    assert!(summary.contains("a.json,2,failure"));
    assert!(summary.contains("c.json,,error"));
}

#[test]
fn test_batch_stops_on_error_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "[1, 2").unwrap();
    let pattern = dir.path().join("*.json");

    passcan()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_batch_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.json");

    passcan()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    passcan()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.reference_year", "2030"])
        .assert()
        .success();

    passcan()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.reference_year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2030"));

    passcan()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "pipeline.workers", "4"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    passcan().arg("-c").arg(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    passcan()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
