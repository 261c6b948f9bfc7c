use crate::common::command::{
    head_commit_oid, init_repository_dir, repository_dir, run_verflow_command, verflow_commit,
};
use crate::common::file::rewrite_file;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::os::unix::fs::PermissionsExt;

#[rstest]
fn checkout_commit_into_a_new_directory(init_repository_dir: TempDir) {
    let destination = TempDir::new().unwrap();
    let target = destination.path().join("snapshot");

    run_verflow_command(
        init_repository_dir.path(),
        &["checkout", "HEAD", target.to_str().unwrap()],
    )
    .assert()
    .success();

    assert_eq!(std::fs::read_to_string(target.join("1.txt")).unwrap(), "one");
    assert_eq!(std::fs::read_to_string(target.join("a/2.txt")).unwrap(), "two");
    assert_eq!(
        std::fs::read_to_string(target.join("a/b/3.txt")).unwrap(),
        "three"
    );
    assert!(!target.join(".verflow").exists());
}

#[rstest]
fn checkout_an_older_commit(init_repository_dir: TempDir) {
    let first = head_commit_oid(init_repository_dir.path());
    rewrite_file(&init_repository_dir.path().join("1.txt"), "uno");
    run_verflow_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    verflow_commit(init_repository_dir.path(), "Second commit")
        .assert()
        .success();

    let destination = TempDir::new().unwrap();
    run_verflow_command(
        init_repository_dir.path(),
        &["checkout", &first[..10], destination.path().to_str().unwrap()],
    )
    .assert()
    .success();

    destination.child("1.txt").assert("one");
}

#[rstest]
fn checkout_keeps_the_executable_bit(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let script = repository_dir.path().join("run.sh");
    std::fs::write(&script, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    run_verflow_command(repository_dir.path(), &["add", "run.sh"])
        .assert()
        .success();
    verflow_commit(repository_dir.path(), "Add script")
        .assert()
        .success();

    run_verflow_command(repository_dir.path(), &["ls-tree", "HEAD"])
        .assert()
        .success()
        .stdout(predicates::str::starts_with("100755 blob "));

    let destination = TempDir::new().unwrap();
    run_verflow_command(
        repository_dir.path(),
        &["checkout", "master", destination.path().to_str().unwrap()],
    )
    .assert()
    .success();

    let mode = std::fs::metadata(destination.path().join("run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}
