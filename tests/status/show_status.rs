use crate::common::command::{init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, delete_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn clean_repository_reports_empty_sections(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn status_reports_every_kind_of_change(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other-branch"])
        .assert()
        .success();

    // staged, then changed again on disk
    write_file(FileSpec::new(dir.path().join("staged.txt"), "v1".to_string()));
    run_bitlet_command(dir.path(), &["add", "staged.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("staged.txt"), "v2".to_string()));

    write_file(FileSpec::new(dir.path().join("1.txt"), "edited".to_string()));
    delete_file(&dir.path().join("a").join("2.txt"));
    write_file(FileSpec::new(dir.path().join("z.txt"), "loose".to_string()));

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\nother-branch\n\n\
             === Staged Files ===\nstaged.txt\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\
             1.txt (modified)\na/2.txt (deleted)\nstaged.txt (modified)\n\n\
             === Untracked Files ===\nz.txt\n\n",
        );
}

#[rstest]
fn removed_file_recreated_on_disk_is_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("1.txt"), "back".to_string()));

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\n1.txt\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\n1.txt\n\n"))
        .stdout(predicate::str::contains("1.txt (modified)").not());
}

#[rstest]
fn staged_file_deleted_from_disk_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    run_bitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    delete_file(&dir.path().join("new.txt"));

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\nnew.txt (deleted)\n\n",
        ));
}
