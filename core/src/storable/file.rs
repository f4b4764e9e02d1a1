//! Scoped file transport
//!
//! Each call opens the file, performs exactly one encode or decode pass and
//! drops the handle before returning, on success and on every error path.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use super::{Storable, read_object, write_object};
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, DecodeError, EncodeError};
use crate::limits::DecodeLimits;

/// Encode `value` into a new file at `path`, replacing any existing file
pub fn write_to_path<T: Storable>(path: &Path, value: &T) -> Result<(), EncodeError> {
    let file = File::create(path)?;
    let mut w = Writer::new(BufWriter::new(file));
    write_object(&mut w, value)?;
    w.flush()?;
    Ok(())
}

/// Decode a value from the file at `path`
pub fn read_from_path<T: Storable>(path: &Path, limits: DecodeLimits) -> Result<T, DecodeError> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(CodecError::from)?;
    read_object(&mut Reader::with_limits(&bytes, limits))
}
