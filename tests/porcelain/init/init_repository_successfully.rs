use crate::common::command::{read_head, repository_dir, run_dvcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_dvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty dvcs repository in"));

    let metadata = repository_dir.path().join(".dvcs");
    assert!(metadata.join("objects").is_dir());
    assert!(metadata.join("refs").join("heads").is_dir());
    assert!(metadata.join("refs").join("tags").is_dir());
    assert_eq!(std::fs::read_to_string(metadata.join("index"))?, "");
    assert_eq!(
        std::fs::read_to_string(metadata.join("refs").join("heads").join("master"))?,
        ""
    );
    assert_eq!(read_head(repository_dir.path()), "ref: refs/heads/master");

    Ok(())
}

#[rstest]
fn init_at_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let nested = repository_dir.path().join("project");

    run_dvcs_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();

    assert!(nested.join(".dvcs").join("HEAD").is_file());
    assert!(!repository_dir.path().join(".dvcs").exists());

    Ok(())
}

#[rstest]
fn reinit_leaves_existing_repository_untouched(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_dvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let head_path = repository_dir.path().join(".dvcs").join("HEAD");
    std::fs::write(&head_path, "ref: refs/heads/feature\n")?;

    run_dvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    assert_eq!(read_head(repository_dir.path()), "ref: refs/heads/feature");

    Ok(())
}

#[rstest]
#[case::add(&["add", "."])]
#[case::commit(&["commit", "-m", "msg"])]
#[case::status(&["status"])]
#[case::log(&["log"])]
#[case::branch(&["branch"])]
#[case::checkout(&["checkout", "master"])]
#[case::merge(&["merge", "master"])]
fn commands_require_an_initialized_repository(
    repository_dir: TempDir,
    #[case] args: &[&str],
) {
    run_dvcs_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a dvcs repository"));
}
