//! Staged entry codec
//!
//! One record per staged path. Additions carry the fingerprint of the
//! staged content; the content itself is already in the object database.

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{Read, Write};

/// Maximum path length supported in index entries
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

const ADDITION: u8 = 1;
const REMOVAL: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedEntry {
    Addition { path: String, oid: ObjectId },
    Removal { path: String },
}

impl StagedEntry {
    pub fn path(&self) -> &str {
        match self {
            StagedEntry::Addition { path, .. } | StagedEntry::Removal { path } => path,
        }
    }

    /// Read one entry from `reader`, which sits right after the previous one
    pub fn read_from(reader: &mut impl Read) -> anyhow::Result<Self> {
        let kind = reader.read_u8()?;
        let path_len = reader.read_u16::<NetworkEndian>()? as usize;

        let mut path = vec![0; path_len];
        reader.read_exact(&mut path)?;
        let path = String::from_utf8(path).map_err(|_| anyhow!("Invalid path in index entry"))?;

        match kind {
            ADDITION => Ok(StagedEntry::Addition {
                path,
                oid: ObjectId::read_h40_from(reader)?,
            }),
            REMOVAL => Ok(StagedEntry::Removal { path }),
            _ => Err(anyhow!("Invalid index entry kind: {kind}")),
        }
    }
}

impl Packable for StagedEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self.path();
        if path.len() > MAX_PATH_SIZE {
            return Err(anyhow!("Path too long for index: {path}"));
        }

        let mut bytes = Vec::new();
        let kind = match self {
            StagedEntry::Addition { .. } => ADDITION,
            StagedEntry::Removal { .. } => REMOVAL,
        };
        bytes.write_u8(kind)?;
        bytes.write_u16::<NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;
        if let StagedEntry::Addition { oid, .. } = self {
            oid.write_h40_to(&mut bytes)?;
        }

        Ok(Bytes::from(bytes))
    }
}
