use crate::common::command::{repository_dir, run_verflow_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(&["status"])]
#[case(&["ls-files"])]
#[case(&["show-ref"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    run_verflow_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a verflow repository"));
}

#[rstest]
fn commands_in_a_subdirectory_find_the_repository(repository_dir: TempDir) {
    run_verflow_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let nested = repository_dir.path().join("deep").join("er");
    std::fs::create_dir_all(&nested).unwrap();

    run_verflow_command(&nested, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("On branch master\n"));
}
