//! Sparse parameter store
//!
//! Integer-keyed bag of raw byte values used to attach optional attributes to
//! an entity without changing its layout.
//!
//! # Key space
//!
//! - `0..=999`: singleton attributes, see [`keys`]
//! - `1000..=1999`: attachments, partitioned per [`AttachmentKind`]; only
//!   reachable through the attachment API
//!
//! # Wire format
//!
//! ```text
//! count: int
//! count × (key: int, length: int, bytes)
//! ```

mod attachment;
pub mod keys;


pub use attachment::{ATTACHMENT_KEYS, Attachment, AttachmentKind, LABEL_DELIMITER};

use std::collections::BTreeMap;
use std::io::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codec::{Reader, Writer};
use crate::error::{CodecError, DecodeError, ParamError};

/// Smallest encoded entry: key + length
const ENTRY_HEADER_SIZE: usize = 8;

/// Integer-keyed attribute bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStore {
    values: BTreeMap<i32, Vec<u8>>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `key`, returning the previous value.
    ///
    /// Keys in the attachment range are rejected; use
    /// [`add_attachment`](Self::add_attachment) for those.
    pub fn put(&mut self, key: i32, value: impl Into<Vec<u8>>) -> Result<Option<Vec<u8>>, ParamError> {
        if ATTACHMENT_KEYS.contains(&key) {
            return Err(ParamError::ReservedKeyRange(key));
        }
        Ok(self.values.insert(key, value.into()))
    }

    pub fn get(&self, key: i32) -> Option<&[u8]> {
        self.values.get(&key).map(Vec::as_slice)
    }

    pub fn remove(&mut self, key: i32) -> Option<Vec<u8>> {
        self.values.remove(&key)
    }

    pub fn has(&self, key: i32) -> bool {
        self.values.contains_key(&key)
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Stored keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.keys().copied()
    }

    /// Store a string; an empty string removes the key
    pub fn put_str(&mut self, key: i32, value: &str) -> Result<(), ParamError> {
        if value.is_empty() {
            if ATTACHMENT_KEYS.contains(&key) {
                return Err(ParamError::ReservedKeyRange(key));
            }
            self.values.remove(&key);
        } else {
            self.put(key, value.as_bytes())?;
        }
        Ok(())
    }

    /// Read a value as UTF-8 text
    pub fn get_str(&self, key: i32) -> Option<&str> {
        self.get(key).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Store a big-endian `int`
    pub fn put_i32(&mut self, key: i32, value: i32) -> Result<(), ParamError> {
        self.put(key, value.to_be_bytes())?;
        Ok(())
    }

    /// Read a value stored by [`put_i32`](Self::put_i32)
    pub fn get_i32(&self, key: i32) -> Option<i32> {
        let bytes: [u8; 4] = self.get(key)?.try_into().ok()?;
        Some(i32::from_be_bytes(bytes))
    }

    // ------------------------------------------------------------------------
    // Attachments
    // ------------------------------------------------------------------------

    /// Add a labeled attachment to the first free slot of `kind`.
    ///
    /// Returns `Ok(false)` when an identical composite (case-insensitive) is
    /// already stored or `text` is empty. A full range fails without touching
    /// any other range. Labels may not contain [`LABEL_DELIMITER`].
    pub fn add_attachment(
        &mut self,
        kind: AttachmentKind,
        label: &str,
        text: &str,
    ) -> Result<bool, ParamError> {
        if label.contains(LABEL_DELIMITER) {
            return Err(ParamError::DelimiterInLabel(label.to_string()));
        }
        if text.is_empty() {
            return Ok(false);
        }
        let composite = Attachment::compose(label, text);
        let needle = composite.to_lowercase();

        let mut free = None;
        for key in kind.keys() {
            match self.values.get(&key) {
                Some(stored) => {
                    if String::from_utf8_lossy(stored).to_lowercase() == needle {
                        return Ok(false);
                    }
                }
                None if free.is_none() => free = Some(key),
                None => {}
            }
        }

        let Some(key) = free else {
            tracing::debug!(%kind, "attachment range is full");
            return Err(ParamError::AttachmentRangeFull(kind));
        };
        self.values.insert(key, composite.into_bytes());
        Ok(true)
    }

    /// Attachments of `kind` in increasing key order, skipping empty slots
    pub fn attachments(&self, kind: AttachmentKind) -> impl Iterator<Item = Attachment> + '_ {
        self.values
            .range(kind.keys())
            .map(|(_, stored)| Attachment::parse(&String::from_utf8_lossy(stored)))
    }

    /// Remove the first attachment of `kind` whose stored value ends with `text`.
    ///
    /// Trailing-substring matching lets callers remove a labeled entry by its
    /// bare text.
    pub fn remove_attachment(&mut self, kind: AttachmentKind, text: &str) -> Option<Attachment> {
        if text.is_empty() {
            return None;
        }
        let key = self
            .values
            .range(kind.keys())
            .find(|(_, stored)| stored.ends_with(text.as_bytes()))
            .map(|(key, _)| *key)?;
        self.values
            .remove(&key)
            .map(|stored| Attachment::parse(&String::from_utf8_lossy(&stored)))
    }

    /// Remove every attachment of `kind`, returning how many were removed
    pub fn remove_all_attachments(&mut self, kind: AttachmentKind) -> usize {
        let before = self.values.len();
        let keys = kind.keys();
        self.values.retain(|key, _| !keys.contains(key));
        before - self.values.len()
    }

    // ------------------------------------------------------------------------
    // Wire format
    // ------------------------------------------------------------------------

    /// Write count + (key, length, bytes) triples
    pub fn write_to<W: Write>(&self, w: &mut Writer<W>) -> Result<(), CodecError> {
        w.write_count(self.values.len())?;
        for (key, value) in &self.values {
            w.write_i32(*key)?;
            w.write_block(value)?;
        }
        Ok(())
    }

    /// Read a store written by [`write_to`](Self::write_to).
    ///
    /// Attachment keys are accepted here; that is how attachments travel.
    pub fn read_from(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let count = r.read_count(ENTRY_HEADER_SIZE)?;
        let mut values = BTreeMap::new();
        for _ in 0..count {
            let key = r.read_i32()?;
            let value = r.read_block()?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }
}

impl Serialize for ParameterStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, &String::from_utf8_lossy(value))?;
        }
        map.end()
    }
}
