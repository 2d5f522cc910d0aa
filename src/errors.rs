//! Repository error taxonomy
//!
//! Every precondition a command can violate is a [`RepositoryError`]. Its
//! `Display` form is the single line shown to the user. Operations validate
//! before mutating, so a returned `RepositoryError` means nothing changed.
//!
//! Unexpected failures (I/O, corrupt objects) travel as plain `anyhow::Error`
//! values and are not part of this enum.

use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// No object is stored under the given fingerprint.
    #[error("No object with id {0} exists.")]
    NotFound(ObjectId),

    #[error("No commit with that id exists.")]
    UnknownCommit(String),

    #[error("Commit id {0} is ambiguous.")]
    AmbiguousCommit(String),

    #[error("No such branch exists.")]
    UnknownBranch(String),

    /// A working-directory file not tracked by HEAD would be clobbered.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedObstruction(Vec<String>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("No changes added to the commit.")]
    NothingToMerge,

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("Not in an initialized bitlet directory.")]
    NotInitialized,

    #[error("A bitlet repository already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("A branch with that name already exists.")]
    BranchExists(String),

    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
}

/// Extract the domain error from an `anyhow::Error`, if it carries one.
pub fn as_repository_error(error: &anyhow::Error) -> Option<&RepositoryError> {
    error.downcast_ref::<RepositoryError>()
}
