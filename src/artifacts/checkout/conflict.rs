use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;

/// Whether writing `written` would replace `existing` on disk: the same path,
/// a file standing where a parent directory is needed, or a directory holding
/// `existing` standing where a file is needed
fn overlaps(written: &str, existing: &str) -> bool {
    let nested = |outer: &str, inner: &str| {
        inner
            .strip_prefix(outer)
            .is_some_and(|rest| rest.starts_with('/'))
    };

    written == existing || nested(existing, written) || nested(written, existing)
}

/// Fail with `UntrackedObstruction` if writing `written_paths` would clobber
/// any of `workspace_files` that `current` does not track
pub fn check_untracked_obstructions<'p>(
    written_paths: impl IntoIterator<Item = &'p String>,
    current: &Tree,
    workspace_files: &[String],
) -> Result<(), RepositoryError> {
    let untracked = workspace_files
        .iter()
        .filter(|file| !current.contains(file))
        .collect::<Vec<_>>();

    let mut obstructions = Vec::new();
    for path in written_paths {
        for file in &untracked {
            if overlaps(path, file) {
                obstructions.push(file.to_string());
            }
        }
    }
    obstructions.sort();
    obstructions.dedup();

    if obstructions.is_empty() {
        Ok(())
    } else {
        tracing::info!(?obstructions, "untracked files in the way");
        Err(RepositoryError::UntrackedObstruction(obstructions))
    }
}
