use predicates::prelude::*;
use yamlbuddy::test_utils::TestProject;

use crate::yamlbuddy;

#[test]
fn test_candidates_ranked_by_location() {
    let project = TestProject::new().unwrap();
    project.write("application.yml", "a: 1\n").unwrap();
    project.write("src/test/resources/application.yaml", "a: 1\n").unwrap();
    project.write("src/main/resources/application.yml", "a: 1\n").unwrap();
    project.write("build/resources/main/application.yml", "a: 1\n").unwrap();

    let output = yamlbuddy(&project).arg("candidates").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "0\tsrc/main/resources/application.yml",
            "1\tsrc/test/resources/application.yaml",
            "2\tapplication.yml",
        ]
    );
}

#[test]
fn test_candidates_empty_project() {
    let project = TestProject::new().unwrap();

    yamlbuddy(&project)
        .arg("candidates")
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration documents found"));
}
