use predicates::prelude::*;
use yamlbuddy::test_utils::TestProject;

use crate::{MAIN_YAML, yamlbuddy};

#[test]
fn test_resolve_prints_first_ranked_location_and_value() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "# app\nserver:\n  port: 8080\n").unwrap();
    project.write("config/application.yaml", "server:\n  port: 9090\n").unwrap();

    yamlbuddy(&project)
        .args(["resolve", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main/resources/application.yml:3:3: 8080"))
        .stdout(predicate::str::contains("9090").not());
}

#[test]
fn test_resolve_all_lists_every_document() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "server:\n  port: 8080\n").unwrap();
    project.write("config/application.yaml", "server:\n  port: \"9090\"\n").unwrap();

    yamlbuddy(&project)
        .args(["resolve", "server.port", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8080"))
        .stdout(predicate::str::contains("config/application.yaml:2:3: 9090"));
}

#[test]
fn test_resolve_mapping_and_missing_key() {
    let project = TestProject::new().unwrap();
    project.write(MAIN_YAML, "server:\n  port: 8080\n").unwrap();

    yamlbuddy(&project)
        .args(["resolve", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("application.yml:1:1: (mapping)"));

    yamlbuddy(&project)
        .args(["resolve", "server.host"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("key 'server.host' not found"));
}
