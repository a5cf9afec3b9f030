//! End-to-end tests for the `new` command.
//!
//! Projects are created from a local template repository through a
//! `file://` URL, so these tests need git but no network access.

mod common;
use common::prelude::*;
use std::fs;

#[test]
fn test_new_creates_project_from_template() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture
        .new_command("my-app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'my-app' created successfully"))
        .stdout(predicate::str::contains("cd my-app"));

    let project = fixture.project("my-app");
    assert!(project.join("go.mod").is_file());
    assert!(project.join("main.go").is_file());
    assert!(project.join("app/http/kernel.go").is_file());
    for stripped in template::STRIPPED {
        assert!(
            !project.join(stripped).exists(),
            "{} should have been removed",
            stripped
        );
    }
}

#[test]
fn test_new_generates_env_file() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture.new_command("shop").assert().success();

    let env = fs::read_to_string(fixture.project("shop").join(".env")).unwrap();
    assert!(env.contains("APP_NAME=shop\n"));
    assert!(env.contains("APP_URL=http://localhost:3000\n"));
    assert!(env.contains("APP_HOST=127.0.0.1\n"));
    assert!(env.contains("DB_CONNECTION=mysql\n"));
    // The example is kept alongside the generated file
    assert_eq!(
        fs::read_to_string(fixture.project("shop").join(".env.example")).unwrap(),
        template::ENV_EXAMPLE
    );
}

#[test]
fn test_new_keeps_module_name_by_default() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture.new_command("shop").assert().success();

    let go_mod = fs::read_to_string(fixture.project("shop").join("go.mod")).unwrap();
    assert_eq!(go_mod, template::GO_MOD);
}

#[test]
fn test_new_rename_module() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture
        .new_command("shop")
        .arg("--rename-module")
        .assert()
        .success();

    let go_mod = fs::read_to_string(fixture.project("shop").join("go.mod")).unwrap();
    assert!(go_mod.starts_with("module shop\n"));
    assert!(go_mod.contains("require github.com/goravel/framework v1.14.0"));
}

#[test]
fn test_new_refuses_existing_directory() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };
    let fixture = fixture.with_file("my-app/keep.txt", "mine");

    fixture
        .new_command("my-app")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("hint: Pass --force"));

    let project = fixture.project("my-app");
    assert_eq!(fs::read_to_string(project.join("keep.txt")).unwrap(), "mine");
    assert!(!project.join("go.mod").exists());
}

#[test]
fn test_new_force_replaces_existing_directory() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };
    let fixture = fixture.with_file("my-app/stale.txt", "old");

    fixture.new_command("my-app").arg("--force").assert().success();

    let project = fixture.project("my-app");
    assert!(!project.join("stale.txt").exists());
    assert!(project.join("go.mod").is_file());
}

#[test]
fn test_new_missing_branch_fails_without_creating_project() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture
        .new_command("my-app")
        .args(["--branch", "does-not-exist"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("All template mirrors failed"))
        .stderr(predicate::str::contains("All template mirrors failed"));

    assert!(!fixture.project("my-app").exists());
}

#[test]
fn test_new_missing_repository_fails() {
    let fixture = TestFixture::new();
    let missing = fixture.work_dir().path().join("no-such-template");

    fixture
        .command()
        .args(["new", "my-app", "--no-banner", "--no-bootstrap", "--repo-url"])
        .arg(format!("file://{}", missing.display()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("All template mirrors failed"));

    assert!(!fixture.project("my-app").exists());
}

#[test]
fn test_new_verbose_relays_git_output() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture
        .new_command("my-app")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("git stderr:"))
        .stdout(predicate::str::contains("Removed README.md"));
}

#[test]
fn test_new_plain_output_without_color() {
    let Some(fixture) = TestFixture::with_template_repo() else {
        return;
    };

    fixture
        .new_command("my-app")
        .args(["--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DONE]"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_new_rejects_invalid_project_name() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["new", "..", "--no-banner", "--no-bootstrap"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_new_rejects_invalid_template_slug() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["new", "my-app", "--no-banner", "--template", "not a slug"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid template"))
        .stderr(predicate::str::contains("hint:"));

    assert!(!fixture.project("my-app").exists());
}

/// Clones the real template through the built-in mirrors.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_new_from_builtin_mirrors() {
    if should_skip_network_tests() || !common::git_available() {
        return;
    }
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["new", "kit-app", "--no-banner", "--no-bootstrap"])
        .assert()
        .success();

    let project = fixture.project("kit-app");
    assert!(project.join("go.mod").is_file());
    assert!(!project.join(".git").exists());
}
