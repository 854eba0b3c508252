use crate::common::command::{
    commit_all, init_repository_dir, read_branch, read_head, read_object, run_dvcs_command,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::read_to_string;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn count_objects(dir: &std::path::Path) -> usize {
    walkdir::WalkDir::new(dir.join(".dvcs").join("objects"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[rstest]
fn fast_forward_moves_the_branch_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "feature"]).assert().success();
    run_dvcs_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    commit_all(dir, "Feature work");
    run_dvcs_command(dir, &["checkout", "master"]).assert().success();

    let index_before = read_to_string(dir, ".dvcs/index");
    let objects_before = count_objects(dir);

    run_dvcs_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fast-forward"));

    assert_eq!(read_branch(dir, "master"), read_branch(dir, "feature"));
    assert_eq!(read_head(dir), "ref: refs/heads/master");
    assert_eq!(count_objects(dir), objects_before);
    assert_eq!(read_to_string(dir, ".dvcs/index"), index_before);
}

#[rstest]
fn merging_an_ancestor_is_already_up_to_date(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "old"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    commit_all(dir, "Second commit");
    let master = read_branch(dir, "master");

    run_dvcs_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up to date."));

    assert_eq!(read_branch(dir, "master"), master);
}

#[rstest]
fn diverged_branches_get_a_merge_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "feature"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    commit_all(dir, "Master work");
    let ours = read_branch(dir, "master");

    run_dvcs_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("a").join("new.txt"), "new".to_string()));
    commit_all(dir, "Feature work");
    let theirs = read_branch(dir, "feature");

    run_dvcs_command(dir, &["checkout", "master"]).assert().success();
    run_dvcs_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge branch 'feature'"));

    let merge_oid = read_branch(dir, "master");
    let merge_commit = read_object(dir, &merge_oid);
    assert!(merge_commit.contains(&format!("\nparent {ours}\nparent {theirs}\n")));
    assert!(merge_commit.ends_with("message Merge branch 'feature'\n"));

    assert_eq!(read_to_string(dir, "1.txt"), "uno");
    assert_eq!(read_to_string(dir, "a/new.txt"), "new");
    assert_eq!(read_to_string(dir, "a/b/3.txt"), "three");
    assert_eq!(read_to_string(dir, ".dvcs/index").lines().count(), 4);

    run_dvcs_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn conflicting_changes_abort_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "feature"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "ours".to_string()));
    commit_all(dir, "Master edit");

    run_dvcs_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "theirs".to_string()));
    commit_all(dir, "Feature edit");

    run_dvcs_command(dir, &["checkout", "master"]).assert().success();
    let master = read_branch(dir, "master");
    let index_before = read_to_string(dir, ".dvcs/index");

    run_dvcs_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merge conflict in"))
        .stderr(predicate::str::contains("1.txt"));

    assert_eq!(read_branch(dir, "master"), master);
    assert_eq!(read_to_string(dir, "1.txt"), "ours");
    assert_eq!(read_to_string(dir, ".dvcs/index"), index_before);
}

#[rstest]
fn merge_refuses_to_overwrite_local_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_dvcs_command(dir, &["branch", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "dos".to_string()));
    commit_all(dir, "Master edit");

    run_dvcs_command(dir, &["checkout", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    commit_all(dir, "Feature edit");
    run_dvcs_command(dir, &["checkout", "master"]).assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "dirty".to_string()));
    let master = read_branch(dir, "master");

    run_dvcs_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would be overwritten"));

    assert_eq!(read_branch(dir, "master"), master);
    assert_eq!(read_to_string(dir, "1.txt"), "dirty");
}

#[rstest]
fn merge_on_detached_head_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let master = read_branch(dir, "master");
    run_dvcs_command(dir, &["branch", "feature"]).assert().success();
    run_dvcs_command(dir, &["checkout", &master]).assert().success();

    run_dvcs_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD is detached"));
}

#[rstest]
fn merge_with_missing_branch_fails(init_repository_dir: TempDir) {
    run_dvcs_command(init_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'ghost' does not exist"));
}
