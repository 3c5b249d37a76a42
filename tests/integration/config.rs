use predicates::prelude::*;
use yamlbuddy::test_utils::TestProject;

use crate::{SOURCE, yamlbuddy};

#[test]
fn test_project_config_changes_annotation_and_created_file() {
    let project = TestProject::new().unwrap();
    project
        .write(
            "yamlbuddy.toml",
            "annotation = \"com.acme.Prop\"\ncreate_file = \"application.yml\"\nresources_dir = \"conf\"\n",
        )
        .unwrap();
    project
        .write(SOURCE, "import com.acme.Prop;\nclass A {\n  @Prop(\"${acme.key}\") String k;\n}\n")
        .unwrap();

    yamlbuddy(&project)
        .args(["check", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created key 'acme.key' at conf/application.yml:3:3"));

    assert_eq!(project.read("conf/application.yml").unwrap(), "# created by YAML Buddy\nacme:\n  key:\n");
}

#[test]
fn test_explicit_config_via_environment() {
    let project = TestProject::new().unwrap();
    let config = project.write("settings/custom.toml", "marker = \"# generated\"\n").unwrap();

    yamlbuddy(&project)
        .env("YAMLBUDDY_CONFIG", &config)
        .args(["fix", "a"])
        .assert()
        .success();

    assert_eq!(
        project.read("src/main/resources/application.yaml").unwrap(),
        "# generated\na:\n"
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let project = TestProject::new().unwrap();
    project.write("yamlbuddy.toml", "candidates = []\n").unwrap();

    yamlbuddy(&project)
        .arg("candidates")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("yamlbuddy.toml"))
        .stderr(predicate::str::contains("'candidates' must name at least one file"));
}

#[test]
fn test_missing_project_directory() {
    assert_cmd::Command::new(env!("CARGO_BIN_EXE_yamlbuddy"))
        .env("NO_COLOR", "1")
        .env_remove("YAMLBUDDY_CONFIG")
        .args(["--project", "/definitely/not/here", "candidates"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project directory not found"));
}
