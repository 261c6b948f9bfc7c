use crate::common::command::{init_repository_dir, run_verflow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// `<mode> <kind> <oid>\t<path>` with the oid masked
fn masked(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| {
            let (meta, path) = line.split_once('\t').unwrap();
            let fields = meta.split(' ').collect::<Vec<_>>();
            assert_eq!(fields[2].len(), 40);
            format!("{} {} {}", fields[0], fields[1], path)
        })
        .collect()
}

#[rstest]
fn list_top_level_entries_from_head_commit(init_repository_dir: TempDir) {
    let assert = run_verflow_command(init_repository_dir.path(), &["ls-tree", "HEAD"])
        .assert()
        .success();

    assert_eq!(
        masked(&stdout_of(&assert)),
        vec!["100644 blob 1.txt", "040000 tree a"]
    );
}

#[rstest]
fn list_all_blobs_from_head_commit(init_repository_dir: TempDir) {
    let assert = run_verflow_command(init_repository_dir.path(), &["ls-tree", "-r", "HEAD"])
        .assert()
        .success();

    assert_eq!(
        masked(&stdout_of(&assert)),
        vec![
            "100644 blob 1.txt",
            "100644 blob a/2.txt",
            "100644 blob a/b/3.txt"
        ]
    );
}
