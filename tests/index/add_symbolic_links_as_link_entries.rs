use crate::common::command::{repository_dir, run_verflow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::os::unix::fs::symlink;
use verflow::areas::index::Index;
use verflow::artifacts::objects::blob::Blob;
use verflow::artifacts::objects::object::Object;

#[fixture]
fn linked_repository(repository_dir: TempDir) -> TempDir {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("real/file.txt").write_str("content").unwrap();

    repository_dir
}

fn staged_modes(dir: &TempDir) -> Vec<(String, String, String)> {
    let mut index = Index::new(dir.path().join(".verflow/index").into_boxed_path());
    index.rehydrate().unwrap();

    index
        .entries()
        .map(|entry| {
            (
                entry.name.clone(),
                entry.metadata.mode.tree_mode(),
                entry.oid.to_string(),
            )
        })
        .collect()
}

fn blob_id(content: &str) -> String {
    Object::Blob(Blob::new(content.to_string()))
        .object_id()
        .unwrap()
        .to_string()
}

#[rstest]
fn add_symlink_to_a_directory(linked_repository: TempDir) {
    symlink("real", linked_repository.path().join("link")).unwrap();

    run_verflow_command(linked_repository.path(), &["add", "."])
        .assert()
        .success();

    assert_eq!(
        staged_modes(&linked_repository),
        vec![
            ("link".to_string(), "120000".to_string(), blob_id("real")),
            (
                "real/file.txt".to_string(),
                "100644".to_string(),
                blob_id("content")
            ),
        ]
    );
}

#[rstest]
fn add_dangling_symlink(linked_repository: TempDir) {
    symlink("nowhere", linked_repository.path().join("dangling")).unwrap();

    run_verflow_command(linked_repository.path(), &["add", "dangling"])
        .assert()
        .success();

    assert_eq!(
        staged_modes(&linked_repository),
        vec![(
            "dangling".to_string(),
            "120000".to_string(),
            blob_id("nowhere")
        )]
    );

    let assert = run_verflow_command(linked_repository.path(), &["status", "--porcelain"])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "A  dangling\n?? real/file.txt\n");
}
