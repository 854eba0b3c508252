use crate::common::command::{
    dvcs_commit, init_repository_dir, read_branch, read_object, repository_dir, run_dvcs_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

const ROOT_TREE_OID: &str = "c36bf600ef06f44a761b25fcd154e2c3eec0ba3c";
const INITIAL_COMMIT_OID: &str = "ba6a3635c3561a5f12932403a6ace0c9c0ee64db";

#[rstest]
fn root_commit_for_nested_project(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_dvcs_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(dir.join("a").join("b").join("3.txt"), "three".to_string()));
    run_dvcs_command(dir, &["add", "."]).assert().success();

    dvcs_commit(dir, "Initial commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("[master (root-commit) ba6a363] Initial commit"));

    assert_eq!(read_branch(dir, "master"), INITIAL_COMMIT_OID);
    assert_eq!(
        read_object(dir, INITIAL_COMMIT_OID),
        format!("tree {ROOT_TREE_OID}\nmessage Initial commit\n")
    );
    assert_eq!(
        read_object(dir, ROOT_TREE_OID),
        "100644 blob fe05bcdcdc4928012781a5f1a2a77cbb5398e106 1.txt\n\
         040000 tree 5c987c786e4e120eb018dd8c2c7ad8a4dbe9b112 a\n"
    );

    Ok(())
}

#[rstest]
fn second_commit_records_its_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_dvcs_command(dir, &["add", "1.txt"]).assert().success();

    dvcs_commit(dir, "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("[master ").and(predicate::str::contains("root-commit").not()));

    let head = read_branch(dir, "master");
    let commit = read_object(dir, &head);
    assert!(commit.contains(&format!("\nparent {INITIAL_COMMIT_OID}\n")));
    assert!(commit.ends_with("message Second commit\n"));

    Ok(())
}

#[rstest]
fn commit_with_empty_index_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_dvcs_command(dir, &["init"]).assert().success();

    dvcs_commit(dir, "Nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    assert_eq!(read_branch(dir, "master"), "");
}

#[rstest]
fn committing_an_unchanged_snapshot_reuses_the_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    dvcs_commit(dir, "Again").assert().success();

    let head = read_branch(dir, "master");
    assert_ne!(head, INITIAL_COMMIT_OID);
    assert!(read_object(dir, &head).starts_with(&format!("tree {ROOT_TREE_OID}\n")));

    Ok(())
}
