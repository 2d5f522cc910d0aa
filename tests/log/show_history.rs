use crate::common::command::{
    READABLE_COMMIT_DATE, bitlet_merge, branch_commit_id, commit_files, get_head_commit_sha,
    repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn log_follows_first_parents_from_head(repository_dir: TempDir) {
    let dir = repository_dir;
    run_bitlet_command(dir.path(), &["init"]).assert().success();
    let root = get_head_commit_sha(dir.path());

    commit_files(dir.path(), &[("f.txt", "1")], "first");
    let first = get_head_commit_sha(dir.path());
    commit_files(dir.path(), &[("f.txt", "2")], "second");
    let second = get_head_commit_sha(dir.path());

    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "===\ncommit {second}\nDate: {READABLE_COMMIT_DATE}\nsecond\n\n\
             ===\ncommit {first}\nDate: {READABLE_COMMIT_DATE}\nfirst\n\n\
             ===\ncommit {root}\nDate: Thu Jan 01 00:00:00 1970 +0000\ninitial commit\n\n"
        )));
}

#[rstest]
fn log_of_a_merge_commit_shows_both_parents(repository_dir: TempDir) {
    let dir = repository_dir;
    run_bitlet_command(dir.path(), &["init"]).assert().success();
    commit_files(dir.path(), &[("base.txt", "base")], "base");
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("master.txt", "m")], "on master");
    let master = get_head_commit_sha(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("other.txt", "o")], "on other");
    let other = get_head_commit_sha(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    bitlet_merge(dir.path(), "other").assert().success().stdout("");

    let merge = get_head_commit_sha(dir.path());
    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {merge}\nMerge: {} {}\nDate: {READABLE_COMMIT_DATE}\nMerged other into master.\n\n\
             ===\ncommit {master}\n",
            &master[..7],
            &other[..7]
        )))
        .stdout(predicate::str::contains("on other").not());
}

#[rstest]
fn global_log_lists_every_commit_in_id_order(repository_dir: TempDir) {
    let dir = repository_dir;
    run_bitlet_command(dir.path(), &["init"]).assert().success();
    let root = get_head_commit_sha(dir.path());
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("master.txt", "m")], "on master");
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    commit_files(dir.path(), &[("other.txt", "o")], "on other");

    let mut ids = vec![
        root,
        branch_commit_id(dir.path(), "master"),
        branch_commit_id(dir.path(), "other"),
    ];
    ids.sort();

    let output = run_bitlet_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).unwrap();
    let listed = output
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect::<Vec<_>>();

    assert_eq!(listed, ids);
}
