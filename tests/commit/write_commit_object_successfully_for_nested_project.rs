use crate::common::command::{repository_dir, run_verflow_command, verflow_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use verflow::areas::repository::Repository;
use verflow::artifacts::objects::object_id::ObjectId;

#[rstest]
fn write_commit_object_successfully_for_nested_project(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (path, content) in [("b", "bee"), ("a/x", "ex"), ("a/y/z", "zed")] {
        write_file(FileSpec::new(
            repository_dir.path().join(path),
            content.to_string(),
        ));
    }
    run_verflow_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    verflow_commit(repository_dir.path(), "Initial commit\n\nWith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[master \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    let branch = std::fs::read_to_string(repository_dir.path().join(".verflow/refs/heads/master"))?;
    let commit_oid = ObjectId::try_parse(branch.trim().to_string())?;

    let repository = Repository::new(repository_dir.path(), Box::new(std::io::sink()))?;
    let commit = repository.database().parse_object(&commit_oid)?;
    let commit = commit.as_commit().ok_or("HEAD is not a commit")?;
    assert!(commit.parents()?.is_empty());
    assert_eq!(commit.message().as_ref(), b"Initial commit\n\nWith a body");

    // "a" sorts as "a/", ahead of "b"
    let root = repository
        .database()
        .parse_object_as_tree(&commit.tree_oid()?)?;
    let names = root
        .leaves()
        .iter()
        .map(|leaf| (leaf.mode.trim_start().to_string(), leaf.path.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            ("040000".to_string(), "a".to_string()),
            ("100644".to_string(), "b".to_string())
        ]
    );

    let files = repository.database().flatten_tree(&commit.tree_oid()?)?;
    assert_eq!(
        files.keys().cloned().collect::<Vec<_>>(),
        vec!["a/x", "a/y/z", "b"]
    );

    Ok(())
}
