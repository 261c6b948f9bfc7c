use crate::common::command::{
    head_commit_oid, init_repository_dir, repository_dir, run_verflow_command,
};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("HEAD")]
#[case("master")]
#[case("  master  ")]
fn rev_parse_resolves_head_and_branches(init_repository_dir: TempDir, #[case] name: &str) {
    let head = head_commit_oid(init_repository_dir.path());

    let assert = run_verflow_command(init_repository_dir.path(), &["rev-parse", name])
        .assert()
        .success();

    assert_eq!(stdout_of(&assert), format!("{head}\n"));
}

#[rstest]
fn rev_parse_peels_a_commit_to_its_tree(init_repository_dir: TempDir) {
    let head = head_commit_oid(init_repository_dir.path());

    let assert = run_verflow_command(
        init_repository_dir.path(),
        &["rev-parse", "--type", "tree", "HEAD"],
    )
    .assert()
    .success();
    let tree = stdout_of(&assert);

    assert_ne!(tree.trim(), head);
    run_verflow_command(init_repository_dir.path(), &["cat-file", "tree", tree.trim()])
        .assert()
        .success();
}

#[rstest]
fn rev_parse_an_unknown_name_fails(init_repository_dir: TempDir) {
    run_verflow_command(init_repository_dir.path(), &["rev-parse", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such reference nope"));
}

#[rstest]
fn rev_parse_a_symbolic_reference_cycle_fails(init_repository_dir: TempDir) {
    let heads = init_repository_dir.path().join(".verflow/refs/heads");
    std::fs::write(heads.join("ping"), "ref: refs/heads/pong\n").unwrap();
    std::fs::write(heads.join("pong"), "ref: refs/heads/ping\n").unwrap();

    run_verflow_command(init_repository_dir.path(), &["rev-parse", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference cycle detected"));
}

#[rstest]
fn rev_parse_head_before_the_first_commit_fails(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_verflow_command(repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such reference HEAD"));
}
