//! Branch names and symbolic refs
//!
//! Branch names follow git's ref-name rules: no leading dot, dash or slash, no
//! `..`, `/.` or `@{`, no trailing slash or `.lock`, no control characters
//! and none of `* : ? [ \ ~ ^`.

pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|^-|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
