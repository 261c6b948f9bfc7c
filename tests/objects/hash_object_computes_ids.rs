use crate::common::command::{repository_dir, run_verflow_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn write_blob_object_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("a.txt").write_str("hi")?;

    run_verflow_command(repository_dir.path(), &["hash-object", "-w", "a.txt"])
        .assert()
        .success()
        .stdout("32f95c0d1244a78b2be1bab8de17906fabb2c4a8\n");

    repository_dir
        .child(".verflow/objects/32/f95c0d1244a78b2be1bab8de17906fabb2c4a8")
        .assert(predicate::path::is_file());

    Ok(())
}

#[rstest]
fn hash_without_write_leaves_the_store_untouched(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let files = write_generated_files(repository_dir.path(), 1);
    let file_name = files[0].path.file_name().unwrap().to_str().unwrap();

    run_verflow_command(repository_dir.path(), &["hash-object", file_name])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$").unwrap());

    let stored = walkdir::WalkDir::new(repository_dir.path().join(".verflow/objects"))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count();
    assert_eq!(stored, 0);
}

#[rstest]
fn hash_object_rejects_an_unknown_type(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("a.txt").write_str("hi").unwrap();

    run_verflow_command(repository_dir.path(), &["hash-object", "-t", "bundle", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown object type bundle"));
}
