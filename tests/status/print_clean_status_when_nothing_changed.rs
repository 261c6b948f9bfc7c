use crate::common::command::{init_repository_dir, run_verflow_command};
use crate::common::file::touch;
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_nothing_when_no_files_are_changed(init_repository_dir: TempDir) {
    let assert = run_verflow_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success();

    assert_eq!(stdout_of(&assert), "");
}

#[rstest]
fn print_nothing_if_a_file_is_touched(init_repository_dir: TempDir) {
    touch(&init_repository_dir.path().join("1.txt"));

    let assert = run_verflow_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success();

    assert_eq!(stdout_of(&assert), "");
}

#[rstest]
fn status_on_a_detached_head(init_repository_dir: TempDir) {
    let storage = init_repository_dir.path().join(".verflow");
    let branch = std::fs::read_to_string(storage.join("refs/heads/master")).unwrap();
    std::fs::write(storage.join("HEAD"), branch).unwrap();

    let assert = run_verflow_command(init_repository_dir.path(), &["status"])
        .assert()
        .success();

    assert_eq!(
        stdout_of(&assert),
        "HEAD detached\nnothing to commit, working tree clean\n"
    );
}
