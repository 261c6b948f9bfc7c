use crate::common::command::{repository_dir, run_verflow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;
use verflow::areas::repository::Repository;
use verflow::artifacts::objects::blob::Blob;
use verflow::artifacts::objects::object::Object;
use verflow::artifacts::objects::object_id::ObjectId;

/// Store blobs until two of them share their first four hex digits
fn store_colliding_blobs(repository: &Repository) -> (ObjectId, ObjectId) {
    let mut seen = HashMap::<String, ObjectId>::new();

    for counter in 0.. {
        let blob = Object::Blob(Blob::new(format!("blob {counter}")));
        let oid = repository.database().store(&blob).unwrap();
        let prefix = oid.as_ref()[..4].to_string();

        if let Some(previous) = seen.insert(prefix, oid.clone()) {
            return (previous, oid);
        }
    }

    unreachable!()
}

#[rstest]
fn rev_parse_a_unique_prefix(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join("a.txt"), "hi").unwrap();
    run_verflow_command(repository_dir.path(), &["hash-object", "-w", "a.txt"])
        .assert()
        .success();

    let assert = run_verflow_command(repository_dir.path(), &["rev-parse", "32f9"])
        .assert()
        .success();

    assert_eq!(
        stdout_of(&assert),
        "32f95c0d1244a78b2be1bab8de17906fabb2c4a8\n"
    );
}

#[rstest]
fn rev_parse_an_ambiguous_prefix_lists_every_candidate(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let repository = Repository::new(repository_dir.path(), Box::new(std::io::sink())).unwrap();
    let (first, second) = store_colliding_blobs(&repository);
    let prefix = &first.as_ref()[..4];

    run_verflow_command(repository_dir.path(), &["rev-parse", prefix])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("ambiguous reference {prefix}")))
        .stderr(predicate::str::contains(first.to_string()))
        .stderr(predicate::str::contains(second.to_string()));
}

#[rstest]
fn rev_parse_accepts_uppercase_prefixes(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join("a.txt"), "hi").unwrap();
    run_verflow_command(repository_dir.path(), &["hash-object", "-w", "a.txt"])
        .assert()
        .success();

    run_verflow_command(repository_dir.path(), &["rev-parse", "32F95C"])
        .assert()
        .success()
        .stdout("32f95c0d1244a78b2be1bab8de17906fabb2c4a8\n");
}
