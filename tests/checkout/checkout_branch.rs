use crate::common::command::{
    commit_files, current_branch, get_head_commit_sha, init_repository_dir, object_count,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_branch_projects_its_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success()
        .stdout("");
    run_bitlet_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    commit_files(
        dir.path(),
        &[("a/2.txt", "deux"), ("topic.txt", "t")],
        "topic work",
    );

    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(current_branch(dir.path()), "master");
    assert_eq!(read_file(&dir.path().join("1.txt")), "one");
    assert_eq!(read_file(&dir.path().join("a").join("2.txt")), "two");
    assert!(!dir.path().join("topic.txt").exists());

    run_bitlet_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();

    assert!(!dir.path().join("1.txt").exists());
    assert_eq!(read_file(&dir.path().join("a").join("2.txt")), "deux");
    assert_eq!(read_file(&dir.path().join("topic.txt")), "t");
}

#[rstest]
fn checkout_branch_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    run_bitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\nnew.txt\n"));
}

#[rstest]
fn checkout_of_an_unknown_branch_is_refused(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "nowhere"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");
}

#[rstest]
fn checkout_of_the_current_branch_is_refused(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}

#[rstest]
fn untracked_file_in_the_way_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    commit_files(dir.path(), &[("clash.txt", "theirs")], "add clash");
    let topic_head = get_head_commit_sha(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("clash.txt"), "mine".to_string()));
    write_file(FileSpec::new(dir.path().join("1.txt"), "edited".to_string()));
    let objects = object_count(dir.path());

    run_bitlet_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(current_branch(dir.path()), "master");
    assert_eq!(read_file(&dir.path().join("clash.txt")), "mine");
    assert_eq!(read_file(&dir.path().join("1.txt")), "edited");
    assert_eq!(object_count(dir.path()), objects);
    assert_ne!(get_head_commit_sha(dir.path()), topic_head);
}

#[rstest]
fn untracked_file_where_a_directory_is_needed_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("d/f.txt", "nested")], "add d/f.txt");
    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("d"), "mine".to_string()));

    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(current_branch(dir.path()), "master");
    assert_eq!(read_file(&dir.path().join("d")), "mine");
}

#[rstest]
fn untracked_directory_where_a_file_is_needed_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("notes", "theirs")], "add notes");
    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("notes").join("mine.txt"),
        "mine".to_string(),
    ));

    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(current_branch(dir.path()), "master");
    assert_eq!(read_file(&dir.path().join("notes").join("mine.txt")), "mine");
}
