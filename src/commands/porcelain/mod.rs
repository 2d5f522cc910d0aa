//! User-facing commands
//!
//! ## Commands
//!
//! - `init`: Create the repository and its initial commit
//! - `add`: Stage a file for addition
//! - `commit`: Record the staging area as a new commit
//! - `rm`: Stage a file for removal
//! - `log`: Show history from HEAD, or every commit with `global-log`
//! - `checkout`: Restore a file, or switch branches
//! - `status`: Show branches, staged changes and working-directory changes
//! - `branch`: Create or delete branch pointers
//! - `reset`: Move the current branch to a commit
//! - `merge`: Merge a branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
