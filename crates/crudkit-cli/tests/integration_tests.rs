//! Integration tests for the crudkit binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn crudkit() -> Command {
    Command::cargo_bin("crudkit").unwrap()
}

#[test]
fn help_lists_subcommands() {
    crudkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("payload"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("sample"));
}

#[test]
fn version_flag_matches_cargo() {
    crudkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn sample_check_payload_render_pipeline() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("diagram.json");

    // sample
    crudkit()
        .args(["sample", "-o"])
        .arg(&doc)
        .assert()
        .success();
    assert!(doc.exists());

    // check: the sample must be generator-ready
    crudkit()
        .arg("check")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Order"))
        .stdout(predicate::str::contains("generator-ready"));

    // payload: module derivation + relationship resolution
    crudkit()
        .arg("payload")
        .arg(&doc)
        .args(["--artifact-id", "shop", "--base-package", "com.acme.shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"moduleName\":\"shop-crud\""))
        .stdout(predicate::str::contains("\"basePackage\":\"com.acme.shop\""))
        .stdout(predicate::str::contains("\"targetClassName\":\"Product\""))
        .stdout(predicate::str::contains("\"relationshipType\":\"ONE_TO_MANY\""));

    // render
    let svg = temp.path().join("diagram.svg");
    crudkit()
        .arg("render")
        .arg(&doc)
        .arg("-o")
        .arg(&svg)
        .assert()
        .success();
    let content = std::fs::read_to_string(&svg).unwrap();
    assert!(content.starts_with("<svg"));
    assert!(content.contains("OrderStatus"));
}

#[test]
fn check_rejects_invalid_document_with_exit_2() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("bad.json");
    // One CLASS whose name is not PascalCase.
    std::fs::write(
        &doc,
        r#"{
          "nodes": [{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "bad name",
            "table_name": "",
            "structure_type": "CLASS",
            "position": { "x": 0.0, "y": 0.0 },
            "fields": [{
              "id": "00000000-0000-0000-0000-000000000002",
              "name": "id",
              "field_type": "Long",
              "identifier": true,
              "required": true,
              "unique": true,
              "object_type": false,
              "target_class": null,
              "relationship_type": null
            }],
            "methods": [],
            "enum_constants": [],
            "collapsed": false
          }],
          "selected": null
        }"#,
    )
    .unwrap();

    crudkit()
        .arg("check")
        .arg(&doc)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn payload_on_empty_diagram_emits_nothing() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("empty.json");
    std::fs::write(&doc, r#"{ "nodes": [], "selected": null }"#).unwrap();

    crudkit()
        .arg("payload")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("moduleName").not());
}

#[test]
fn missing_document_exits_3() {
    crudkit()
        .args(["check", "/no/such/diagram.json"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn garbage_document_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("garbage.json");
    std::fs::write(&doc, "not json at all").unwrap();

    crudkit()
        .arg("payload")
        .arg(&doc)
        .assert()
        .failure()
        .code(2);
}
