//! Storable protocol
//!
//! Every serializable entity is written as a version tag followed by a body
//! whose layout depends on that version:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ version: int                 │
//! ├──────────────────────────────┤
//! │ body (fields of version 0)   │
//! │ body (fields of version 1)   │
//! │ ...                          │
//! └──────────────────────────────┘
//! ```
//!
//! Readers accept any version up to their own [`Storable::VERSION`]; fields
//! added after the stored version keep their `Default` value. A newer version
//! is rejected with [`DecodeError::UnsupportedVersion`].

mod file;


pub use file::{read_from_path, write_to_path};

use std::io::Write;

use crate::codec::{Reader, Writer};
use crate::error::{CodecError, DecodeError, EncodeError};
use crate::limits::DecodeLimits;

/// Minimum encoded size of a tagged block (the version tag)
const TAG_SIZE: usize = 4;

/// A value type with a versioned binary layout
pub trait Storable: Default + Sized {
    /// Highest layout version this code writes and understands
    const VERSION: i32;

    /// Entity name used in error reports
    const NAME: &'static str;

    /// Write the fields that exist at `version`
    fn write_body<W: Write>(&self, w: &mut Writer<W>, version: i32) -> Result<(), CodecError>;

    /// Read a body stored at `version` (never above [`Self::VERSION`])
    fn read_body(r: &mut Reader<'_>, version: i32) -> Result<Self, DecodeError>;

    /// Restore the default state
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Write a version-tagged block at the native version
pub fn write_object<W: Write, T: Storable>(w: &mut Writer<W>, value: &T) -> Result<(), CodecError> {
    w.write_i32(T::VERSION)?;
    value.write_body(w, T::VERSION)
}

/// Write a version-tagged block at an older layout version
pub fn write_object_as<W: Write, T: Storable>(
    w: &mut Writer<W>,
    value: &T,
    version: i32,
) -> Result<(), EncodeError> {
    if !(0..=T::VERSION).contains(&version) {
        return Err(EncodeError::UnsupportedVersion {
            entity: T::NAME,
            requested: version,
            supported: T::VERSION,
        });
    }
    w.write_i32(version)?;
    value.write_body(w, version)?;
    Ok(())
}

/// Read a version-tagged block
pub fn read_object<T: Storable>(r: &mut Reader<'_>) -> Result<T, DecodeError> {
    let version = r.read_i32()?;
    if version < 0 {
        return Err(DecodeError::invalid(
            "version",
            format!("negative {} version {}", T::NAME, version),
        ));
    }
    if version > T::VERSION {
        tracing::debug!(
            entity = T::NAME,
            found = version,
            supported = T::VERSION,
            "rejecting payload from a newer writer"
        );
        return Err(DecodeError::UnsupportedVersion {
            entity: T::NAME,
            found: version,
            supported: T::VERSION,
        });
    }
    tracing::trace!(entity = T::NAME, version, "decoding");
    T::read_body(r, version)
}

/// Write a presence flag followed by a tagged block when present
pub fn write_optional<W: Write, T: Storable>(
    w: &mut Writer<W>,
    value: Option<&T>,
) -> Result<(), CodecError> {
    match value {
        Some(value) => {
            w.write_bool(true)?;
            write_object(w, value)
        }
        None => w.write_bool(false),
    }
}

/// Read a value written by [`write_optional`]
pub fn read_optional<T: Storable>(r: &mut Reader<'_>) -> Result<Option<T>, DecodeError> {
    if r.read_bool()? {
        Ok(Some(read_object(r)?))
    } else {
        Ok(None)
    }
}

/// Write a count followed by one independently tagged block per element
pub fn write_list<W: Write, T: Storable>(w: &mut Writer<W>, items: &[T]) -> Result<(), CodecError> {
    w.write_count(items.len())?;
    for item in items {
        write_object(w, item)?;
    }
    Ok(())
}

/// Read a list written by [`write_list`]; fails as a whole if any element fails
pub fn read_list<T: Storable>(r: &mut Reader<'_>) -> Result<Vec<T>, DecodeError> {
    let count = r.read_count(TAG_SIZE)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_object(r)?);
    }
    Ok(items)
}

/// Encode a value at its native version
pub fn encode<T: Storable>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut w = Writer::buffer();
    write_object(&mut w, value)?;
    Ok(w.into_inner())
}

/// Encode a value using the layout of an older version
pub fn encode_as<T: Storable>(value: &T, version: i32) -> Result<Vec<u8>, EncodeError> {
    let mut w = Writer::buffer();
    write_object_as(&mut w, value, version)?;
    Ok(w.into_inner())
}

/// Decode a value with default limits
pub fn decode<T: Storable>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_with_limits(bytes, DecodeLimits::default())
}

/// Decode a value with explicit limits
pub fn decode_with_limits<T: Storable>(bytes: &[u8], limits: DecodeLimits) -> Result<T, DecodeError> {
    let mut r = Reader::with_limits(bytes, limits);
    let value = read_object(&mut r)?;
    if r.available() > 0 {
        tracing::trace!(entity = T::NAME, trailing = r.available(), "ignoring trailing bytes");
    }
    Ok(value)
}

/// Encode a homogeneous list of values
pub fn encode_list<T: Storable>(items: &[T]) -> Result<Vec<u8>, EncodeError> {
    let mut w = Writer::buffer();
    write_list(&mut w, items)?;
    Ok(w.into_inner())
}

/// Decode a list written by [`encode_list`]
pub fn decode_list<T: Storable>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    read_list(&mut Reader::new(bytes))
}

/// Peek at the leading version tag without decoding the body
pub fn peek_version(bytes: &[u8]) -> Result<i32, CodecError> {
    Reader::new(bytes).read_i32()
}
