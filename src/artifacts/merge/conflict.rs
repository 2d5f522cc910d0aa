use bytes::{BufMut, Bytes, BytesMut};

pub const HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const END_MARKER: &str = ">>>>>>>\n";

/// Content written for a path both sides changed differently
///
/// A side that deleted the file contributes no bytes.
pub fn conflict_content(head: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let head = head.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = BytesMut::with_capacity(
        HEAD_MARKER.len() + head.len() + SEPARATOR_MARKER.len() + given.len() + END_MARKER.len(),
    );
    content.put_slice(HEAD_MARKER.as_bytes());
    content.put_slice(head);
    content.put_slice(SEPARATOR_MARKER.as_bytes());
    content.put_slice(given);
    content.put_slice(END_MARKER.as_bytes());

    content.freeze()
}
