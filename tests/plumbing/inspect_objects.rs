use crate::common::command::{init_repository_dir, read_branch, repository_dir, run_dvcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

const ONE_OID: &str = "fe05bcdcdc4928012781a5f1a2a77cbb5398e106";
const ROOT_TREE_OID: &str = "c36bf600ef06f44a761b25fcd154e2c3eec0ba3c";

#[rstest]
fn hash_object_without_write_stores_nothing(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_dvcs_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));

    run_dvcs_command(dir, &["hash-object", "1.txt"])
        .assert()
        .success()
        .stdout(format!("{ONE_OID}\n"));

    assert!(!dir.join(".dvcs/objects/fe").exists());
}

#[rstest]
fn hash_object_with_write_stores_the_blob(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_dvcs_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));

    run_dvcs_command(dir, &["hash-object", "-w", "1.txt"])
        .assert()
        .success()
        .stdout(format!("{ONE_OID}\n"));

    run_dvcs_command(dir, &["cat-file", ONE_OID])
        .assert()
        .success()
        .stdout("one");
}

#[rstest]
fn cat_file_accepts_abbreviated_ids(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["cat-file", &ONE_OID[..6]])
        .assert()
        .success()
        .stdout("one");
}

#[rstest]
fn cat_file_pretty_prints_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = read_branch(dir, "master");

    run_dvcs_command(dir, &["cat-file", "-p", &head])
        .assert()
        .success()
        .stdout(format!("tree {ROOT_TREE_OID}\n\nInitial commit\n"));
}

#[rstest]
fn cat_file_of_missing_object_fails(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["cat-file", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn ls_tree_lists_top_level_entries(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["ls-tree", ROOT_TREE_OID])
        .assert()
        .success()
        .stdout(format!(
            "100644 blob {ONE_OID}\t1.txt\n\
             040000 tree 5c987c786e4e120eb018dd8c2c7ad8a4dbe9b112\ta\n"
        ));
}

#[rstest]
fn ls_tree_recursive_from_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = read_branch(dir, "master");

    let output = run_dvcs_command(dir, &["ls-tree", "-r", &head])
        .output()
        .expect("ls-tree failed");
    let stdout = String::from_utf8(output.stdout).expect("invalid utf-8");

    assert_eq!(
        stdout,
        format!(
            "100644 blob {ONE_OID}\t1.txt\n\
             100644 blob ad782ecdac770fc6eb9a62e44f90873fb97fb26b\ta/2.txt\n\
             100644 blob b802f384302cb24fbab0a44997e820bf2e8507bb\ta/b/3.txt\n"
        )
    );
}
