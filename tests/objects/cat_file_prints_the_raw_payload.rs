use crate::common::command::{head_commit_oid, init_repository_dir, run_verflow_command};
use crate::common::command::{AUTHOR_EMAIL, AUTHOR_NAME};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn cat_file_prints_a_blob_by_abbreviated_id(init_repository_dir: TempDir) {
    // blob of "one"
    let output = run_verflow_command(
        init_repository_dir.path(),
        &["hash-object", "1.txt"],
    )
    .output()
    .unwrap();
    let blob_oid = String::from_utf8(output.stdout).unwrap();

    run_verflow_command(
        init_repository_dir.path(),
        &["cat-file", "blob", &blob_oid.trim()[..8]],
    )
    .assert()
    .success()
    .stdout("one");
}

#[rstest]
fn cat_file_prints_the_head_commit(init_repository_dir: TempDir) {
    let assert = run_verflow_command(init_repository_dir.path(), &["cat-file", "commit", "HEAD"])
        .assert()
        .success();
    let payload = crate::common::stdout_of(&assert);

    let lines = payload.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("tree "));
    assert_eq!(
        lines[1],
        format!("author {AUTHOR_NAME} <{AUTHOR_EMAIL}> 1672574400 +0000")
    );
    assert_eq!(
        lines[2],
        format!("committer {AUTHOR_NAME} <{AUTHOR_EMAIL}> 1672574400 +0000")
    );
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Initial commit");
}

#[rstest]
fn cat_file_peels_a_commit_to_its_tree(init_repository_dir: TempDir) {
    let head = head_commit_oid(init_repository_dir.path());

    run_verflow_command(init_repository_dir.path(), &["cat-file", "tree", &head])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.txt"));
}

#[rstest]
fn cat_file_with_an_unreachable_type_fails(init_repository_dir: TempDir) {
    run_verflow_command(init_repository_dir.path(), &["cat-file", "tag", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD does not name a tag"));
}
