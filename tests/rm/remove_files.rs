use crate::common::command::{bitlet_commit, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(!dir.path().join("1.txt").exists());
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\n1.txt\n\n"));

    bitlet_commit(dir.path(), "drop one").assert().success();
    run_bitlet_command(dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    run_bitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["rm", "new.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(dir.path().join("new.txt").exists());
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ===\nnew.txt\n"));
}

#[rstest]
fn removing_an_untracked_file_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("loose.txt"), "x".to_string()));

    run_bitlet_command(dir.path(), &["rm", "loose.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");

    assert!(dir.path().join("loose.txt").exists());
}

#[rstest]
fn adding_back_a_removed_file_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));

    run_bitlet_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    bitlet_commit(dir.path(), "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}
