//! Commit object
//!
//! Commits are snapshots of the whole tracked file state. They contain:
//! - Up to two parent commit IDs (a second parent marks a merge)
//! - A timestamp with its timezone offset
//! - The full tree (path -> blob ID)
//! - A message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <second-parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Because the tree is part of the payload, the commit ID covers message,
//! timestamp, parents and tree.

use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::io::BufRead;

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable fixing the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parent links of a commit, as needed for graph traversal
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    /// First parent, then second parent
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    tree: Tree,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        tree: Tree,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            second_parent,
            tree,
        }
    }

    /// The root of every history: no parent, the epoch, an empty tree
    pub fn initial() -> Self {
        let epoch = DateTime::UNIX_EPOCH.fixed_offset();
        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
            None,
            None,
            Tree::default(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.second_parent.iter())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents().cloned().collect(),
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }
}

/// Timestamp for a new commit
///
/// Reads `BITLET_COMMIT_DATE` (`%Y-%m-%d %H:%M:%S %z`) when set, otherwise
/// the local clock. Either way the value is truncated to whole seconds, which
/// is the precision the commit format keeps.
pub fn commit_timestamp() -> anyhow::Result<DateTime<FixedOffset>> {
    match std::env::var(COMMIT_DATE_ENV) {
        Ok(date) => DateTime::parse_from_str(&date, COMMIT_DATE_FORMAT)
            .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date}")),
        Err(_) => {
            let now = chrono::Local::now().fixed_offset();
            now.offset()
                .timestamp_opt(now.timestamp(), 0)
                .single()
                .context("Local clock produced an ambiguous timestamp")
        }
    }
}

fn parse_timestamp(seconds: &str, timezone: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let seconds = seconds
        .parse::<i64>()
        .with_context(|| format!("Invalid timestamp: {seconds}"))?;

    let (sign, digits) = match timezone.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => anyhow::bail!("Invalid timezone: {timezone}"),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("Invalid timezone: {timezone}");
    }
    let hours = digits[..2].parse::<i32>()?;
    let minutes = digits[2..].parse::<i32>()?;

    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("Timezone out of range: {timezone}"))?;

    offset
        .timestamp_opt(seconds, 0)
        .single()
        .with_context(|| format!("Timestamp out of range: {seconds}"))
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        // the header never contains blank lines, the message may
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tree = Tree::default();

        for line in header.split('\n') {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(date) = line.strip_prefix("date ") {
                let (seconds, timezone) = date
                    .split_once(' ')
                    .context("Invalid commit object: invalid date line")?;
                timestamp = Some(parse_timestamp(seconds, timezone)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tree.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        if parents.len() > 2 {
            anyhow::bail!("Invalid commit object: {} parents", parents.len());
        }
        let mut parents = parents.into_iter();
        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Ok(Commit::new(
            message.to_string(),
            timestamp,
            parents.next(),
            parents.next(),
            tree,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn payload(&self) -> anyhow::Result<Bytes> {
        let mut header = vec![];

        for parent in self.parents() {
            header.push(format!("parent {}", parent.as_ref()));
        }
        header.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in self.tree.entries() {
            if path.contains('\n') {
                anyhow::bail!("Unsupported path in tree: {path:?}");
            }
            header.push(format!("file {} {}", oid.as_ref(), path));
        }

        Ok(Bytes::from(format!(
            "{}\n\n{}",
            header.join("\n"),
            self.message
        )))
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.payload().unwrap_or_default()).to_string()
    }
}
