// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end tests for hdds-cdr-gen: library entry points and the binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use hdds_cdr_gen::{check_file, compile_file, describe, generate_file, load_schema, Mode};
use hdds_cdr_schema::{Schema, SchemaError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hdds-cdr-gen"))
}

#[test]
fn test_load_fixture() {
    let schema = load_schema(&fixture("sensors.yaml")).unwrap();
    assert_eq!(schema.types.len(), 6);
    assert_eq!(schema.messages().count(), 4);
    assert_eq!(schema.aliases().count(), 1);
    assert_eq!(schema.services().count(), 1);
}

#[test]
fn test_compile_infers_lifetimes() {
    let compiled = compile_file(&fixture("sensors.yaml")).unwrap();
    assert!(compiled.borrows("Imu"));
    assert!(compiled.borrows("Header"));
    assert!(!compiled.borrows("Time"));
    assert!(!compiled.borrows("AddTwoIntsRequest"));
    assert!(compiled.is_copy("Header"));
    assert!(!compiled.is_copy("Imu"));
}

#[test]
fn test_generate_table_source() {
    let code = generate_file(&fixture("sensors.yaml"), Mode::Table).unwrap();
    assert!(code.starts_with("// Generated by hdds-cdr-gen from sensors.yaml."));
    assert!(code.contains("hdds_cdr::schema! {"));
    assert!(code.contains("    message Time = (\"builtin_interfaces::msg::dds_::Time_\""));
    assert!(code.contains("orientation_covariance: [float64; 9]"));
    assert!(code.contains("raw: sequence<uint8>"));
}

#[test]
fn test_generate_expanded_items() {
    let code = generate_file(&fixture("sensors.yaml"), Mode::Expanded).unwrap();
    assert!(code.contains("pub struct Imu < 'a >"));
    assert!(code.contains("pub struct Time"));
    assert!(code.contains("pub struct AddTwoIntsRequest"));
    assert!(code.contains(":: hdds_cdr :: ServiceType for AddTwoInts"));
    assert!(!code.contains("schema !"));
}

#[test]
fn test_check_reports_every_problem() {
    let errors = check_file(&fixture("broken.yaml")).unwrap();
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(errors
        .iter()
        .any(|e| matches!(e, SchemaError::UnknownType { name, .. } if name == "Point")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, SchemaError::ZeroLengthArray { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, SchemaError::EmptyIdentity { name } if name == "Twist")));

    let err = generate_file(&fixture("broken.yaml"), Mode::Table).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.yaml is invalid:"));
    assert_eq!(message.matches("\n  - ").count(), 3);
}

#[test]
fn test_missing_file_names_the_path() {
    let err = load_schema(Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.yaml"));
}

#[test]
fn test_bad_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "messages:\n  - name: A\n    colour: red\n").unwrap();

    let err = load_schema(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse schema file"));
    assert!(err.chain().any(|cause| cause.to_string().contains("colour")));
}

#[test]
fn test_describe_lists_layout() {
    let compiled = compile_file(&fixture("sensors.yaml")).unwrap();
    let text = describe(&compiled);
    assert!(text.contains("message Imu<'a>\n"));
    assert!(text.contains("message Time\n"));
    assert!(text.contains("  type_name: sensor_msgs::msg::dds_::Imu_\n"));
    assert!(text.contains("alias Seconds = int64\n"));
    assert!(text.contains("service AddTwoInts\n"));
    assert!(text.contains("  request AddTwoIntsRequest:\n"));
    assert!(text.contains("  reply AddTwoIntsReply:\n"));
}

#[test]
fn test_bin_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sensors.rs");

    let status = bin()
        .arg("generate")
        .arg(fixture("sensors.yaml"))
        .arg("--out")
        .arg(&out)
        .args(["--mode", "table"])
        .status()
        .unwrap();
    assert!(status.success());

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        generate_file(&fixture("sensors.yaml"), Mode::Table).unwrap()
    );
}

#[test]
fn test_bin_generate_to_stdout() {
    let output = bin()
        .arg("generate")
        .arg(fixture("sensors.yaml"))
        .args(["--mode", "expanded"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("pub struct Quaternion"));
}

#[test]
fn test_bin_check_exit_codes() {
    let ok = bin()
        .arg("check")
        .arg(fixture("sensors.yaml"))
        .output()
        .unwrap();
    assert!(ok.status.success());
    assert!(String::from_utf8_lossy(&ok.stdout).contains("[OK] Schema is valid"));

    let bad = bin()
        .arg("check")
        .arg(fixture("broken.yaml"))
        .output()
        .unwrap();
    assert!(!bad.status.success());
    let stderr = String::from_utf8_lossy(&bad.stderr);
    assert!(stderr.contains("unknown type `Point`"));
    assert!(stderr.contains("Validation failed with 3 error(s)"));
}

#[test]
fn test_schema_file_round_trip() {
    let schema = load_schema(&fixture("sensors.yaml")).unwrap();
    let yaml = schema.to_yaml().unwrap();
    assert_eq!(Schema::from_yaml(&yaml).unwrap(), schema);
}
