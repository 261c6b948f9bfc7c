use crate::common::command::{repository_dir, run_verflow_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let storage_path = repository_dir
        .path()
        .canonicalize()?
        .join(".verflow")
        .display()
        .to_string();

    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty verflow repository in .+$",
        )?)
        .stdout(predicate::str::contains(storage_path));

    repository_dir
        .child(".verflow/objects")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".verflow/refs/heads")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".verflow/refs/tags")
        .assert(predicate::path::is_dir());
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join(".verflow/HEAD"))?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}

#[rstest]
fn init_creates_the_target_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_verflow_command(repository_dir.path(), &["init", target.to_str().unwrap()])
        .assert()
        .success();

    assert!(target.join(".verflow").join("HEAD").is_file());

    Ok(())
}
