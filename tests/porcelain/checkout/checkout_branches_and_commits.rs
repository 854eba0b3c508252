use crate::common::command::{
    dvcs_commit, init_repository_dir, read_branch, read_head, run_dvcs_command,
};
use crate::common::file::{FileSpec, delete_path, write_file};
use crate::common::read_to_string;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// `master` one commit ahead of `base`: `1.txt` rewritten, `a/b` removed,
/// `c/4.txt` added
#[fixture]
fn diverged_repository(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "base"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    write_file(FileSpec::new(dir.join("c").join("4.txt"), "four".to_string()));
    delete_path(&dir.join("a").join("b"));
    run_dvcs_command(dir, &["add", "."]).assert().success();
    dvcs_commit(dir, "Second commit")
        .assert()
        .success();

    init_repository_dir
}

#[rstest]
fn checkout_branch_rewrites_working_tree(diverged_repository: TempDir) {
    let dir = diverged_repository.path();

    run_dvcs_command(dir, &["checkout", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'base'"));

    assert_eq!(read_to_string(dir, "1.txt"), "one");
    assert_eq!(read_to_string(dir, "a/b/3.txt"), "three");
    assert!(!dir.join("c").exists());
    assert_eq!(read_head(dir), "ref: refs/heads/base");
    assert_eq!(read_to_string(dir, ".dvcs/index").lines().count(), 3);

    run_dvcs_command(dir, &["checkout", "master"]).assert().success();

    assert_eq!(read_to_string(dir, "1.txt"), "uno");
    assert_eq!(read_to_string(dir, "c/4.txt"), "four");
    assert!(!dir.join("a").join("b").exists());
}

#[rstest]
fn checkout_current_branch_reports_already_on(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on 'master'"));
}

#[rstest]
fn checkout_abbreviated_commit_detaches_head(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    let base = read_branch(dir, "base");

    run_dvcs_command(dir, &["checkout", &base[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("HEAD is now at {}", &base[..7])))
        .stderr(predicate::str::contains("detached HEAD"));

    assert_eq!(read_head(dir), base);
    assert_eq!(read_to_string(dir, "1.txt"), "one");
}

#[rstest]
fn commit_on_detached_head_moves_head_only(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    let base = read_branch(dir, "base");
    let master = read_branch(dir, "master");
    run_dvcs_command(dir, &["checkout", &base]).assert().success();

    write_file(FileSpec::new(dir.join("5.txt"), "five".to_string()));
    run_dvcs_command(dir, &["add", "5.txt"]).assert().success();
    dvcs_commit(dir, "Detached work")
        .assert()
        .success()
        .stdout(predicate::str::contains("[detached HEAD "));

    assert_ne!(read_head(dir), base);
    assert_eq!(read_branch(dir, "base"), base);
    assert_eq!(read_branch(dir, "master"), master);
}

#[rstest]
fn checkout_missing_branch_fails(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["checkout", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'nope' does not exist"));
}

#[rstest]
fn checkout_refuses_to_overwrite_modified_file(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    write_file(FileSpec::new(dir.join("1.txt"), "local edit".to_string()));
    let index_before = read_to_string(dir, ".dvcs/index");

    run_dvcs_command(dir, &["checkout", "base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Your local changes to the following files would be overwritten by checkout:",
        ))
        .stderr(predicate::str::contains("1.txt"));

    assert_eq!(read_to_string(dir, "1.txt"), "local edit");
    assert_eq!(read_to_string(dir, "c/4.txt"), "four");
    assert_eq!(read_to_string(dir, ".dvcs/index"), index_before);
    assert_eq!(read_head(dir), "ref: refs/heads/master");
}

#[rstest]
fn checkout_refuses_when_tracked_file_is_deleted(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    delete_path(&dir.join("c").join("4.txt"));

    run_dvcs_command(dir, &["checkout", "base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("c/4.txt"));

    assert_eq!(read_to_string(dir, "1.txt"), "uno");
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_file(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    let base = read_branch(dir, "base");
    run_dvcs_command(dir, &["checkout", "base"]).assert().success();

    // c/4.txt exists only on master, so an untracked copy is in the way
    write_file(FileSpec::new(dir.join("c").join("4.txt"), "mine".to_string()));

    run_dvcs_command(dir, &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The following untracked working tree files would be overwritten by checkout:",
        ));

    assert_eq!(read_to_string(dir, "c/4.txt"), "mine");
    assert_eq!(read_branch(dir, "base"), base);
    assert_eq!(read_head(dir), "ref: refs/heads/base");
}

#[rstest]
fn untracked_files_elsewhere_survive_checkout(diverged_repository: TempDir) {
    let dir = diverged_repository.path();
    write_file(FileSpec::new(dir.join("notes.txt"), "keep me".to_string()));

    run_dvcs_command(dir, &["checkout", "base"]).assert().success();

    assert_eq!(read_to_string(dir, "notes.txt"), "keep me");
}

#[rstest]
fn checkout_branch_without_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::write(dir.join(".dvcs/refs/heads/empty"), "").expect("write ref");

    run_dvcs_command(dir, &["checkout", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commit yet"));

    assert_eq!(read_head(dir), "ref: refs/heads/master");
    assert_eq!(read_to_string(dir, "1.txt"), "one");
}
