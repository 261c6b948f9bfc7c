use crate::common::command::{init_repository_dir, run_verflow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn remove_file_from_index_and_worktree(init_repository_dir: TempDir) {
    run_verflow_command(init_repository_dir.path(), &["rm", "a/2.txt"])
        .assert()
        .success();

    init_repository_dir
        .child("a/2.txt")
        .assert(predicate::path::missing());
    let assert = run_verflow_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "1.txt\na/b/3.txt\n");
}

#[rstest]
fn cached_remove_keeps_the_working_file(init_repository_dir: TempDir) {
    run_verflow_command(init_repository_dir.path(), &["rm", "--cached", "1.txt"])
        .assert()
        .success();

    init_repository_dir.child("1.txt").assert("one");
    let assert = run_verflow_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "D  1.txt\n?? 1.txt\n");
}

#[rstest]
fn removing_a_path_not_in_the_index_fails(init_repository_dir: TempDir) {
    init_repository_dir.child("loose.txt").write_str("x").unwrap();

    run_verflow_command(init_repository_dir.path(), &["rm", "loose.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot remove paths not in the index: loose.txt",
        ));

    init_repository_dir.child("loose.txt").assert("x");
}
