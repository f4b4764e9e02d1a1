//! Binary writer
//!
//! Writes big-endian primitives into any `Write` sink.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

use crate::error::CodecError;

/// Writer for the big-endian wire format
pub struct Writer<W: Write> {
    writer: W,
    written: usize,
}

impl Writer<Vec<u8>> {
    /// Create a writer backed by an in-memory buffer
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> Writer<W> {
    /// Create a new binary writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of bytes written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), CodecError> {
        self.writer.write_u8(u8::from(value))?;
        self.written += 1;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), CodecError> {
        self.writer.write_i32::<BigEndian>(value)?;
        self.written += 4;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), CodecError> {
        self.writer.write_i64::<BigEndian>(value)?;
        self.written += 8;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), CodecError> {
        self.writer.write_f32::<BigEndian>(value)?;
        self.written += 4;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), CodecError> {
        self.writer.write_f64::<BigEndian>(value)?;
        self.written += 8;
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_str(&mut self, value: &str) -> Result<(), CodecError> {
        self.write_block(value.as_bytes())
    }

    /// Write an optional string; `None` is stored as the empty string
    pub fn write_opt_str(&mut self, value: Option<&str>) -> Result<(), CodecError> {
        self.write_str(value.unwrap_or_default())
    }

    /// Write a length-prefixed raw byte block
    pub fn write_block(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let len = i32::try_from(bytes.len()).map_err(|_| CodecError::MalformedLength {
            length: bytes.len() as i64,
            available: i32::MAX as usize,
        })?;
        self.write_i32(len)?;
        self.write_bytes(bytes)
    }

    /// Write raw bytes without a length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    /// Write a collection length as an `int` count prefix
    pub fn write_count(&mut self, count: usize) -> Result<(), CodecError> {
        let count = i32::try_from(count).map_err(|_| CodecError::MalformedLength {
            length: count as i64,
            available: i32::MAX as usize,
        })?;
        self.write_i32(count)
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), CodecError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
