use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use std::sync::LazyLock;

pub const REF_PREFIX: &str = "refs/heads/";

static INVALID_BRANCH_NAME: LazyLock<Result<regex::Regex, regex::Error>> =
    LazyLock::new(|| regex::Regex::new(INVALID_BRANCH_NAME_REGEX));

/// Path of a ref relative to the repository directory, e.g. `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Validate `name` against git's ref-name rules
    ///
    /// Fails with `RepositoryError::InvalidBranchName` for names git would reject.
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = INVALID_BRANCH_NAME
            .as_ref()
            .map_err(Clone::clone)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        let name = sym_ref_name
            .as_ref_path()
            .strip_prefix(REF_PREFIX)
            .with_context(|| {
                format!(
                    "symbolic ref name must start with '{}', got '{}'",
                    REF_PREFIX,
                    sym_ref_name.as_ref_path()
                )
            })?;

        Self::try_parse(name.to_string())
    }

    pub fn to_sym_ref_name(&self) -> SymRefName {
        SymRefName::new(format!("{REF_PREFIX}{}", self.0))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
