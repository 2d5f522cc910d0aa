//! Object database
//!
//! Objects live under `.bitlet/objects/<2 hex>/<38 hex>`, zlib-compressed.
//! Writes are put-if-absent: an object is written to a temp file in its
//! fan-out directory and renamed into place, so readers never see a partial
//! object and storing the same content twice is a no-op.

use crate::artifacts::database::store::{BlobStore, CommitStore};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store `object` unless an object with the same ID already exists
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let framed = object.framed()?;
        let object_id = crate::artifacts::objects::object::fingerprint(&framed)?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        self.write_object(&object_path, framed)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Framed bytes of a stored object; `None` when no such object exists
    fn load(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Ok(None);
        }

        self.read_object(&object_path).map(Some)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<Option<(ObjectType, impl BufRead)>> {
        let Some(object_content) = self.load(object_id)? else {
            return Ok(None);
        };
        let total_len = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader, Some(total_len))
            .with_context(|| format!("Corrupt object {object_id}"))?;

        Ok(Some((object_type, object_reader)))
    }

    /// Type of a stored object, decoding only its header
    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<Option<ObjectType>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;
        let mut reader = BufReader::new(flate2::read::ZlibDecoder::new(file));

        ObjectType::parse_object_type(&mut reader, None)
            .with_context(|| format!("Corrupt object {object_id}"))
            .map(Some)
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Every stored object ID, in ID order
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.find_objects_by_prefix("")
    }

    /// Find all objects whose ID starts with the given prefix.
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is
    /// searched. Temp files and anything else that is not an object ID are
    /// skipped. Results are sorted.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let dirs = if prefix.len() >= 2 {
            vec![self.path.join(&prefix[..2])]
        } else {
            (0..=255u8)
                .map(|i| self.path.join(format!("{i:02x}")))
                .collect::<Vec<PathBuf>>()
        };

        let mut matches = Vec::new();
        for dir_path in dirs {
            if !dir_path.is_dir() {
                continue;
            }
            let Some(dir_name) = dir_path.file_name().map(|name| name.to_string_lossy().to_string())
            else {
                continue;
            };

            for entry in std::fs::read_dir(&dir_path)
                .with_context(|| format!("Unable to list {}", dir_path.display()))?
            {
                let entry = entry?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}

impl BlobStore for Database {
    fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    fn get_blob(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        match self.parse_object_as_bytes(oid)? {
            Some((ObjectType::Blob, reader)) => Ok(Blob::deserialize(reader)?.into_content()),
            _ => Err(RepositoryError::NotFound(oid.clone()).into()),
        }
    }
}

impl CommitStore for Database {
    fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object_as_bytes(oid)? {
            Some((ObjectType::Commit, reader)) => Commit::deserialize(reader),
            _ => Err(RepositoryError::UnknownCommit(oid.to_string()).into()),
        }
    }

    fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commits = Vec::new();
        for oid in self.list_objects()? {
            if self.object_type(&oid)? == Some(ObjectType::Commit) {
                commits.push(oid);
            }
        }

        Ok(commits)
    }
}
