use crate::common::command::{
    head_commit_oid, init_repository_dir, run_verflow_command, verflow_commit,
};
use crate::common::file::rewrite_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use verflow::areas::repository::Repository;
use verflow::artifacts::objects::object_id::ObjectId;

#[rstest]
fn write_second_commit_with_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = head_commit_oid(init_repository_dir.path());

    rewrite_file(&init_repository_dir.path().join("1.txt"), "uno");
    run_verflow_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    verflow_commit(init_repository_dir.path(), "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[master [0-9a-f]{7}\] Second commit\n$",
        )?);

    let second = head_commit_oid(init_repository_dir.path());
    assert_ne!(first, second);

    let repository = Repository::new(init_repository_dir.path(), Box::new(std::io::sink()))?;
    let commit = repository
        .database()
        .parse_object(&ObjectId::try_parse(second)?)?;
    let commit = commit.as_commit().ok_or("HEAD is not a commit")?;
    assert_eq!(commit.parents()?, vec![ObjectId::try_parse(first)?]);

    Ok(())
}

#[rstest]
fn commit_on_detached_head_moves_head_itself(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = head_commit_oid(init_repository_dir.path());
    let storage = init_repository_dir.path().join(".verflow");
    std::fs::write(storage.join("HEAD"), format!("{first}\n"))?;

    rewrite_file(&init_repository_dir.path().join("1.txt"), "uno");
    run_verflow_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    verflow_commit(init_repository_dir.path(), "Detached commit")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[detached HEAD "));

    let head = std::fs::read_to_string(storage.join("HEAD"))?;
    assert_ne!(head.trim(), first);
    assert_eq!(
        std::fs::read_to_string(storage.join("refs/heads/master"))?.trim(),
        first
    );

    Ok(())
}
