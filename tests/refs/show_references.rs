use crate::common::command::{head_commit_oid, init_repository_dir, run_verflow_command};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_every_resolvable_reference(init_repository_dir: TempDir) {
    let head = head_commit_oid(init_repository_dir.path());
    let storage = init_repository_dir.path().join(".verflow");
    std::fs::write(
        storage.join("refs/heads/topic"),
        "ref: refs/heads/master\n",
    )
    .unwrap();
    // a branch that does not exist yet is skipped
    std::fs::write(storage.join("refs/heads/later"), "ref: refs/heads/nowhere\n").unwrap();
    std::fs::write(storage.join("refs/tags/v1"), format!("{head}\n")).unwrap();

    let assert = run_verflow_command(init_repository_dir.path(), &["show-ref"])
        .assert()
        .success();

    assert_eq!(
        stdout_of(&assert),
        format!(
            "{head} refs/heads/master\n{head} refs/heads/topic\n{head} refs/tags/v1\n"
        )
    );
}
