use crate::common::command::{repository_dir, run_verflow_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn ignoring_repository(repository_dir: TempDir) -> TempDir {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join(".verflow/info/exclude"),
        "# build output\n*.log\n!keep.log\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("docs/.vfignore"),
        "*.tmp\n!docs/draft.log\n".to_string(),
    ));
    run_verflow_command(repository_dir.path(), &["add", "docs/.vfignore"])
        .assert()
        .success();

    repository_dir
}

#[rstest]
fn check_ignore_applies_the_repository_exclude_file(ignoring_repository: TempDir) {
    let assert = run_verflow_command(
        ignoring_repository.path(),
        &["check-ignore", "a.log", "keep.log", "a.txt"],
    )
    .assert()
    .success();

    assert_eq!(stdout_of(&assert), "a.log\n");
}

#[rstest]
fn scoped_rules_win_inside_their_directory(ignoring_repository: TempDir) {
    let assert = run_verflow_command(
        ignoring_repository.path(),
        &[
            "check-ignore",
            "docs/x.tmp",
            "x.tmp",
            "docs/draft.log",
            "docs/other.log",
        ],
    )
    .assert()
    .success();

    assert_eq!(stdout_of(&assert), "docs/x.tmp\ndocs/other.log\n");
}

#[rstest]
fn global_rules_come_from_the_config_home(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let config_home = TempDir::new().unwrap();
    write_file(FileSpec::new(
        config_home.path().join("verflow/ignore"),
        "*.swp\n".to_string(),
    ));

    let assert = run_verflow_command(repository_dir.path(), &["check-ignore", "a.swp", "a.txt"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .assert()
        .success();

    assert_eq!(stdout_of(&assert), "a.swp\n");
}

#[rstest]
fn check_ignore_rejects_absolute_paths(ignoring_repository: TempDir) {
    run_verflow_command(ignoring_repository.path(), &["check-ignore", "/etc/a.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "path must be relative to the worktree root",
        ));
}
