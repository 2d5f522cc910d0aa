use crate::common::command::{init_repository_dir, repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_files_lists_them_as_staged(repository_dir: TempDir) {
    let dir = repository_dir;
    run_bitlet_command(dir.path(), &["init"]).assert().success();

    let files = write_generated_files(dir.path(), 3);
    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        run_bitlet_command(dir.path(), &["add", &name])
            .assert()
            .success()
            .stdout("");
    }

    let staged = files
        .iter()
        .map(|file| format!("{}\n", file.path.file_name().unwrap().to_string_lossy()))
        .collect::<String>();
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n{staged}\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n"
        )));
}

#[rstest]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn adding_unchanged_content_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["commit", "nothing"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn restoring_committed_content_unstages_the_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let file = dir.path().join("1.txt");

    write_file(FileSpec::new(file.clone(), "changed".to_string()));
    run_bitlet_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(file, "one".to_string()));
    run_bitlet_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["commit", "nothing"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn adding_a_file_in_a_subdirectory(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(
        dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_bitlet_command(dir.path(), &["add", "a/b/3.txt"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\na/b/3.txt\n\n",
        ));
}
