//! Persisted staging area
//!
//! The staging area is stored in `.bitlet/index` (format described in
//! `artifacts::index`). It is loaded under a shared lock and rewritten under
//! an exclusive lock with a trailing checksum.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::StagedEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::staging_area::StagingArea;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::{Context, anyhow};
use std::ops::{Deref, DerefMut};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.bitlet/index`)
    path: Box<Path>,
    staging: StagingArea,
    /// Whether the staging area changed since it was loaded
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            staging: StagingArea::default(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        self.changed = true;
        &mut self.staging
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty index file is an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.staging = StagingArea::default();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index {}", self.path.display()))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = Self::parse_header(&mut reader)?;
        for _ in 0..entries_count {
            let entry = StagedEntry::read_from(&mut reader)?;
            self.staging.restore(entry);
        }

        reader.verify()?;
        tracing::debug!(entries = entries_count, "loaded index");

        Ok(())
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Persist the staging area if it changed since it was loaded
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;
        lock.deref_mut().set_len(0)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader::new(String::from(SIGNATURE), VERSION, self.staging.len() as u32);
        writer.write(&header.serialize()?)?;

        for entry in self.staging.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;
        tracing::debug!(entries = self.staging.len(), "wrote index");

        Ok(())
    }
}
