use crate::common::command::{init_repository_dir, repository_dir, run_dvcs_command};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn status_of_a_fresh_repository(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_dvcs_command(dir, &["init"]).assert().success();

    run_dvcs_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch master"))
        .stdout(predicate::str::contains("No commits yet"))
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn print_clean_status_when_nothing_changed(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current commit: "))
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn report_staged_unstaged_and_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("staged.txt"), "staged".to_string()));
    run_dvcs_command(dir, &["add", "staged.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    delete_path(&dir.join("a").join("2.txt"));
    write_file(FileSpec::new(dir.join("loose.txt"), "loose".to_string()));

    run_dvcs_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("new file:"))
        .stdout(predicate::str::contains("staged.txt"))
        .stdout(predicate::str::contains("Changes not staged for commit:"))
        .stdout(predicate::str::contains("modified:"))
        .stdout(predicate::str::contains("deleted:"))
        .stdout(predicate::str::contains("a/2.txt"))
        .stdout(predicate::str::contains("Untracked files:"))
        .stdout(predicate::str::contains("loose.txt"));
}

#[rstest]
fn report_files_deleted_from_the_index(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    delete_path(&dir.join("a"));
    run_dvcs_command(dir, &["add", "."]).assert().success();

    run_dvcs_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("a/b/3.txt"))
        .stdout(predicate::str::contains("Changes not staged for commit:").not());
}
