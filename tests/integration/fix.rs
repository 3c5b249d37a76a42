use predicates::prelude::*;
use yamlbuddy::test_utils::TestProject;

use crate::{CREATED_YAML, MAIN_YAML, yamlbuddy};

#[test]
fn test_fix_creates_document_when_none_exists() {
    let project = TestProject::new().unwrap();

    yamlbuddy(&project)
        .args(["fix", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main/resources/application.yaml:3:3"));

    assert_eq!(project.read(CREATED_YAML).unwrap(), "# created by YAML Buddy\nserver:\n  port:\n");
}

#[test]
fn test_fix_promotes_scalar() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "a:\n  b: 1\n").unwrap();

    yamlbuddy(&project)
        .args(["fix", "a.b.c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main/resources/application.yml:3:5"));

    assert_eq!(project.read(MAIN_YAML).unwrap(), "a:\n  b:\n    c:\n");
}

#[test]
fn test_fix_existing_key_is_a_no_op() {
    let project = TestProject::new().unwrap();
    let original = "x:\n  y: 5 # five\n";
    project.write(MAIN_YAML, original).unwrap();

    yamlbuddy(&project)
        .args(["fix", "x.y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("application.yml:2:3"));

    assert_eq!(project.read(MAIN_YAML).unwrap(), original);
}

#[test]
fn test_fix_twice_is_idempotent() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "a: 1\nb: 2\n").unwrap();

    yamlbuddy(&project).args(["fix", "c.d"]).assert().success();
    yamlbuddy(&project).args(["fix", "c.d"]).assert().success();

    assert_eq!(project.read(MAIN_YAML).unwrap(), "a: 1\nb: 2\nc:\n  d:\n");
}

#[test]
fn test_fix_edits_top_ranked_document_only() {
    let project = TestProject::new().unwrap();
    project.write("config/application.yml", "other: 1\n").unwrap();
    project.write("src/test/resources/application.yml", "test: 1\n").unwrap();

    yamlbuddy(&project).args(["fix", "app.name"]).assert().success();

    assert_eq!(project.read("src/test/resources/application.yml").unwrap(), "test: 1\napp:\n  name:\n");
    assert_eq!(project.read("config/application.yml").unwrap(), "other: 1\n");
    assert!(!project.exists(CREATED_YAML));
}

#[test]
fn test_fix_unavailable_exits_with_failure() {
    let project = TestProject::new().unwrap();
    let original = "list:\n  - a\n  - b\n";
    project.write(MAIN_YAML, original).unwrap();

    yamlbuddy(&project)
        .args(["fix", "list.item"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not create key 'list.item'"));

    assert_eq!(project.read(MAIN_YAML).unwrap(), original);
}

#[test]
fn test_fix_rejects_invalid_key() {
    let project = TestProject::new().unwrap();

    yamlbuddy(&project)
        .args(["fix", "a..b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid key path 'a..b'"));

    assert!(!project.exists(CREATED_YAML));
}

#[test]
fn test_fix_keeps_byte_order_mark() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "\u{feff}server:\n  port: 8080\n").unwrap();

    yamlbuddy(&project)
        .args(["fix", "server.host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("application.yml:3:3"));

    assert_eq!(project.read(MAIN_YAML).unwrap(), "\u{feff}server:\n  port: 8080\n  host:\n");
}

#[test]
fn test_fix_leaves_flow_mapping_root_untouched() {
    let project = TestProject::new().unwrap();
    let original = "{server: {port: 8080}}\n";
    project.write(MAIN_YAML, original).unwrap();

    yamlbuddy(&project).args(["fix", "server.port"]).assert().success();
    yamlbuddy(&project).args(["fix", "server.host"]).assert().code(1);

    assert_eq!(project.read(MAIN_YAML).unwrap(), original);
}
