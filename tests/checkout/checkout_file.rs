use crate::common::command::{commit_files, get_head_commit_sha, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn checkout_file_restores_the_head_version(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let file = dir.path().join("1.txt");
    write_file(FileSpec::new(file.clone(), "edited".to_string()));

    run_bitlet_command(dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&file), "one");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let old = get_head_commit_sha(dir.path());
    commit_files(dir.path(), &[("1.txt", "uno")], "translate");

    run_bitlet_command(dir.path(), &["checkout", &old[..8], "--", "1.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("1.txt")), "one");
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "=== Modifications Not Staged For Commit ===\n1.txt (modified)\n\n",
        ));
}

#[rstest]
#[case::unknown_id("0123456789abcdef")]
#[case::not_hex("not-a-commit")]
fn checkout_file_from_an_unknown_commit_is_refused(
    init_repository_dir: TempDir,
    #[case] revision: &str,
) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", revision, "--", "1.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn checkout_of_a_file_missing_from_the_commit_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let file = dir.path().join("1.txt");
    write_file(FileSpec::new(file.clone(), "edited".to_string()));

    run_bitlet_command(dir.path(), &["checkout", "--", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");

    assert_eq!(read_file(&file), "edited");
}
