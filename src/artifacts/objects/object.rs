use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// A content-addressed object: its ID is the SHA-1 of its framed form
/// `<type> <size>\0<payload>`.
pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// Payload bytes, without the type/size frame
    fn payload(&self) -> Result<Bytes>;

    fn display(&self) -> String;

    fn framed(&self) -> Result<Bytes> {
        let payload = self.payload()?;

        let mut object_bytes = Vec::with_capacity(payload.len() + 16);
        let header = format!("{} {}\0", self.object_type().as_str(), payload.len());
        object_bytes.write_all(header.as_bytes())?;
        object_bytes.write_all(&payload)?;

        Ok(Bytes::from(object_bytes))
    }

    // TODO: Cache the framed bytes and ID; commits are framed once for the ID and again to store
    fn object_id(&self) -> Result<ObjectId> {
        fingerprint(&self.framed()?)
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// SHA-1 fingerprint of a byte sequence
pub fn fingerprint(data: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(data);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}
