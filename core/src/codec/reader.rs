//! Binary reader
//!
//! Reads big-endian primitives from an in-memory byte slice. Length and count
//! prefixes are validated against the remaining bytes before anything is
//! allocated.

use byteorder::{BigEndian, ByteOrder};

use crate::error::CodecError;
use crate::limits::DecodeLimits;

/// Reader for the big-endian wire format
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> Reader<'a> {
    /// Create a reader with default decode limits
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, DecodeLimits::default())
    }

    /// Create a reader with explicit decode limits
    pub fn with_limits(data: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            data,
            pos: 0,
            limits,
        }
    }

    /// Bytes left between the cursor and the end of the stream
    pub fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let available = self.available();
        if n > available {
            return Err(CodecError::UnexpectedEndOfData {
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a boolean; any non-zero byte is `true`
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let bytes = self.read_block()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Read a length-prefixed raw byte block
    pub fn read_block(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_length(1, self.limits.max_block_len)?;
        Ok(self.take(len)?.to_vec())
    }

    /// Read exactly `n` raw bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.take(n)
    }

    /// Read an element count for a collection whose elements occupy at least
    /// `min_element_size` bytes each
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize, CodecError> {
        self.read_length(min_element_size, self.limits.max_list_len)
    }

    fn read_length(&mut self, unit: usize, limit: usize) -> Result<usize, CodecError> {
        let raw = self.read_i32()?;
        let available = self.available();
        let malformed = CodecError::MalformedLength {
            length: i64::from(raw),
            available,
        };
        let Ok(len) = usize::try_from(raw) else {
            return Err(malformed);
        };
        if len > limit || len.saturating_mul(unit) > available {
            return Err(malformed);
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_int() {
        let mut reader = Reader::new(&[0, 0, 1]);
        let err = reader.read_i32().unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedEndOfData {
                needed: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn test_length_exceeding_stream_is_rejected_before_allocation() {
        // Claims a 2 GiB block with only 3 bytes behind it
        let mut bytes = i32::MAX.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        let err = Reader::new(&bytes).read_block().unwrap_err();
        assert!(matches!(err, CodecError::MalformedLength { available: 3, .. }));
    }

    #[test]
    fn test_length_over_limit() {
        let mut bytes = 4i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"abcd");
        let limits = DecodeLimits {
            max_block_len: 3,
            ..DecodeLimits::default()
        };
        let err = Reader::with_limits(&bytes, limits).read_string().unwrap_err();
        assert!(matches!(err, CodecError::MalformedLength { length: 4, .. }));

        assert_eq!(Reader::new(&bytes).read_string().unwrap(), "abcd");
    }

    #[test]
    fn test_count_checks_element_size() {
        // Three elements of at least four bytes cannot fit in eight bytes
        let mut bytes = 3i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0; 8]);
        assert!(matches!(
            Reader::new(&bytes).read_count(4),
            Err(CodecError::MalformedLength { length: 3, .. })
        ));
        assert_eq!(Reader::new(&bytes).read_count(2).unwrap(), 3);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut bytes = 2i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0xC3, 0x28]);
        assert!(matches!(
            Reader::new(&bytes).read_string(),
            Err(CodecError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_available_and_position() {
        let bytes = [0u8; 13];
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.available(), 13);
        reader.read_i64().unwrap();
        reader.read_bool().unwrap();
        assert_eq!(reader.position(), 9);
        assert_eq!(reader.available(), 4);
        assert_eq!(reader.read_bytes(4).unwrap(), &[0, 0, 0, 0]);
    }
}
