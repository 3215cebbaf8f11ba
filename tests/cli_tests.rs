//! Runs the `tagpack` binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tagpack::format::Format;
use tagpack::Value;

fn sample() -> Value {
    Value::dict([
        (Value::from("name"), Value::from("widget")),
        (Value::from("count"), Value::from(3)),
        (Value::from("blob"), Value::Bytes(vec![0, 159, 255])),
        (
            Value::from("span"),
            Value::tuple([Value::range(0, 10, 2), Value::None]),
        ),
    ])
}

fn run(input: &Path, output: &Path, input_format: &str, output_format: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tagpack"))
        .arg("-i")
        .arg(input)
        .arg("-o")
        .arg(output)
        .args(["--input-format", input_format])
        .args(["--output-format", output_format])
        .output()
        .expect("failed to run tagpack")
}

fn write_json(path: &Path, value: &Value) {
    let text = Format::Json.serializer().dumps(value).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn test_same_format_copies_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    // Hand-written layout, so a re-encode would not reproduce these bytes.
    let text = "{ \"type\" : \"str\",\n  \"value\" : \"kept\" }\n";
    fs::write(&input, text).unwrap();

    let result = run(&input, &output, "json", "JSON");
    assert!(result.status.success(), "{:?}", result);
    assert_eq!(fs::read(&output).unwrap(), text.as_bytes());
}

#[test]
fn test_convert_between_formats() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.toml");
    write_json(&input, &sample());

    let result = run(&input, &output, "json", "toml");
    assert!(result.status.success(), "{:?}", result);
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(Format::Toml.serializer().loads(&text).unwrap(), sample());
}

#[test]
fn test_convert_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data");
    write_json(&path, &sample());

    let result = run(&path, &path, "json", "yaml");
    assert!(result.status.success(), "{:?}", result);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(Format::Yaml.serializer().loads(&text).unwrap(), sample());
}

#[test]
fn test_format_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.yaml");
    write_json(&input, &sample());

    let result = Command::new(env!("CARGO_BIN_EXE_tagpack"))
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--if", "json", "--of", "yaml"])
        .output()
        .unwrap();
    assert!(result.status.success(), "{:?}", result);
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(Format::Yaml.serializer().loads(&text).unwrap(), sample());
}

#[test]
fn test_unknown_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.xml");
    write_json(&input, &sample());

    let result = run(&input, &output, "json", "xml");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(stderr.contains("xml"), "{}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.json");
    let output = dir.path().join("out.yaml");

    let result = run(&input, &output, "json", "yaml");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(stderr.contains("absent.json"), "{}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_malformed_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.yaml");
    fs::write(&input, r#"{"type":"int","value":"#).unwrap();

    let result = run(&input, &output, "json", "yaml");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(!output.exists());
}
