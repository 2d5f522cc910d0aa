use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2024-05-01 12:00:00 +0000";
pub const READABLE_COMMIT_DATE: &str = "Wed May 01 12:00:00 2024 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository holding `1.txt` and `a/2.txt` in one commit on top of the initial one
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_files(
        repository_dir.path(),
        &[("1.txt", "one"), ("a/2.txt", "two")],
        "first files",
    );

    repository_dir
}

pub fn run_bitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlet").expect("Failed to find bitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("BITLET_COMMIT_DATE", COMMIT_DATE)]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bitlet_commit(dir: &Path, message: &str) -> Command {
    run_bitlet_command(dir, &["commit", message])
}

pub fn bitlet_merge(dir: &Path, branch: &str) -> Command {
    run_bitlet_command(dir, &["merge", branch])
}

/// Write, stage and commit `files` as one commit
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (path, content) in files {
        write_file(FileSpec::new(dir.join(path), content.to_string()));
        run_bitlet_command(dir, &["add", path]).assert().success();
    }

    bitlet_commit(dir, message).assert().success().stdout("");
}

pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".bitlet").join("HEAD"))
        .expect("Failed to read HEAD");

    head.trim()
        .trim_start_matches("ref: refs/heads/")
        .to_string()
}

pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".bitlet").join("refs").join("heads").join(branch);

    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read ref {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

pub fn get_head_commit_sha(dir: &Path) -> String {
    branch_commit_id(dir, &current_branch(dir))
}

/// Number of stored objects, blobs and commits alike
pub fn object_count(dir: &Path) -> usize {
    walkdir::WalkDir::new(dir.join(".bitlet").join("objects"))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count()
}
