use crate::common::command::{
    branch_commit_id, current_branch, get_head_commit_sha, init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case::simple("feature", "feature\n*master\n\n")]
#[case::nested("topic/one", "*master\ntopic/one\n\n")]
fn branch_points_at_the_head_commit(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] listing: &str,
) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(dir.path(), name), get_head_commit_sha(dir.path()));
    assert_eq!(current_branch(dir.path()), "master");
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("=== Branches ===\n{listing}")));
}

#[rstest]
fn existing_branch_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
#[case::nested_under_existing("topic", "topic/one")]
#[case::parent_of_existing("topic/one", "topic")]
fn branch_clashing_with_a_nested_name_is_refused(
    init_repository_dir: TempDir,
    #[case] existing: &str,
    #[case] name: &str,
) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", existing])
        .assert()
        .success();

    run_bitlet_command(dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");

    assert_eq!(
        branch_commit_id(dir.path(), existing),
        get_head_commit_sha(dir.path())
    );
}

#[rstest]
#[case::double_dot("bad..name")]
#[case::trailing_lock("bad.lock")]
#[case::leading_dash("-bad")]
fn invalid_branch_names_are_refused(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "--", name])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("Invalid branch name: {name}\n")));

    assert!(
        !dir.path()
            .join(".bitlet")
            .join("refs")
            .join("heads")
            .join(name)
            .exists()
    );
}
