use predicates::prelude::*;
use yamlbuddy::test_utils::TestProject;

use crate::{CREATED_YAML, MAIN_YAML, SOURCE, component, yamlbuddy};

#[test]
fn test_check_clean_project() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "server:\n  port: 8080\n").unwrap();
    project.write(SOURCE, &component(&["server.port"])).unwrap();

    yamlbuddy(&project)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No unresolved keys in 1 file(s)"));
}

#[test]
fn test_check_reports_unresolved_with_position() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "server:\n  port: 8080\n").unwrap();
    project.write(SOURCE, &component(&["server.port", "server.host"])).unwrap();

    // Second @Value is on line 9; the placeholder starts after `    @Value("`.
    yamlbuddy(&project)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "src/main/java/demo/Settings.java:9:13: warning: key 'server.host' not found",
        ))
        .stdout(predicate::str::contains("server.port").not());
}

#[test]
fn test_check_ignores_other_annotations_and_comments() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "a: 1\n").unwrap();
    project
        .write(
            SOURCE,
            "import javax.inject.Named;\nclass A {\n  // @Value(\"${commented}\")\n  @Named(\"${not.value}\") String s;\n}\n",
        )
        .unwrap();

    yamlbuddy(&project).arg("check").assert().success();
}

#[test]
fn test_check_json_report() {
    let project = TestProject::new().unwrap();
    project.write(SOURCE, &component(&["app.name"])).unwrap();

    let output = yamlbuddy(&project).args(["check", "--format", "json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_scanned"], 1);
    let finding = &report["findings"][0];
    assert_eq!(finding["key_path"], "app.name");
    assert_eq!(finding["message"], "key 'app.name' not found");
    assert_eq!(finding["fixable"], true);
    assert_eq!(finding["fix"]["label"], "Create key 'app.name' in application.yaml");
    assert_eq!(finding["fix"]["family"], "YAML Buddy QuickFixes");
    assert_eq!(finding["line"], 6);
}

#[test]
fn test_check_fix_creates_document_and_keys() {
    let project = TestProject::new().unwrap();
    project
        .write(SOURCE, &component(&["server.port", "server.ssl.enabled", "server.port"]))
        .unwrap();

    yamlbuddy(&project)
        .args(["check", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed: created key 'server.port'"))
        .stdout(predicate::str::contains("No unresolved keys"));

    assert_eq!(
        project.read(CREATED_YAML).unwrap(),
        "# created by YAML Buddy\nserver:\n  port:\n  ssl:\n    enabled:\n"
    );
}

#[test]
fn test_check_fix_preserves_existing_content() {
    let project = TestProject::new().unwrap();
    let original = "# Service settings\nserver:\n  port: 8080 # http\n\nspring:\n  application:\n    name: demo\n";
    project.write(MAIN_YAML, original).unwrap();
    project.write(SOURCE, &component(&["spring.application.version", "logging.level"])).unwrap();

    yamlbuddy(&project).args(["check", "--fix"]).assert().success();

    assert_eq!(
        project.read(MAIN_YAML).unwrap(),
        "# Service settings\nserver:\n  port: 8080 # http\n\nspring:\n  application:\n    name: demo\n    version:\nlogging:\n  level:\n"
    );
    assert!(!project.exists(CREATED_YAML));
}

#[test]
fn test_check_fix_leaves_malformed_document_alone() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "server: [broken\n").unwrap();
    project.write(SOURCE, &component(&["server.port"])).unwrap();

    yamlbuddy(&project)
        .args(["check", "--fix"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("could not create key 'server.port'"));

    assert_eq!(project.read(MAIN_YAML).unwrap(), "server: [broken\n");
}

#[test]
fn test_check_explicit_paths_and_excluded_sources() {
    let project = TestProject::new().unwrap();
    project.write(SOURCE, &component(&["a.b"])).unwrap();
    project.write("target/generated/Gen.java", &component(&["c.d"])).unwrap();

    yamlbuddy(&project)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("key 'a.b' not found"))
        .stdout(predicate::str::contains("c.d").not());

    yamlbuddy(&project)
        .arg("check")
        .arg(project.join("target/generated/Gen.java"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("key 'c.d' not found"));
}

#[test]
fn test_check_missing_source_file_is_an_error() {
    let project = TestProject::new().unwrap();

    yamlbuddy(&project)
        .args(["check", "does/not/Exist.java"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read source file"));
}

#[test]
fn test_check_resolves_flow_mappings_and_byte_order_mark() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "\u{feff}server:\n  port: 8080\nlogging: {level: INFO}\n").unwrap();
    project.write(SOURCE, &component(&["server.port", "logging.level"])).unwrap();

    yamlbuddy(&project)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No unresolved keys in 1 file(s)"));
}
