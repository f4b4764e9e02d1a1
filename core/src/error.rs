//! Error types for the codec, the Storable protocol and the parameter store

use crate::params::AttachmentKind;

/// Codec-level failure while reading or writing primitives
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes remain than the value being read requires
    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    UnexpectedEndOfData { needed: usize, available: usize },

    /// Length or count prefix that is negative, larger than the remaining
    /// bytes or larger than the configured decode limit
    #[error("malformed length prefix {length} ({available} bytes available)")]
    MalformedLength { length: i64, available: usize },

    /// String payload is not UTF-8
    #[error("string is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Backend I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to decode a Storable entity
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Stored version is newer than the running code understands
    #[error("{entity} version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        entity: &'static str,
        found: i32,
        supported: i32,
    },

    /// Truncated or corrupt stream
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A decoded field holds a value the entity cannot represent
    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },
}

impl DecodeError {
    /// Shorthand for [`DecodeError::InvalidFieldValue`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::InvalidFieldValue {
            field,
            reason: reason.into(),
        }
    }

    /// Payload was produced by a newer writer; the caller may prompt for an upgrade
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, DecodeError::UnsupportedVersion { .. })
    }

    /// Payload is truncated or damaged and should be discarded
    pub fn is_corrupt(&self) -> bool {
        !self.is_unsupported_version()
    }
}

/// Failure to encode a Storable entity
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Requested layout version is outside `0..=supported`
    #[error("{entity} cannot be written at version {requested} (supported 0..={supported})")]
    UnsupportedVersion {
        entity: &'static str,
        requested: i32,
        supported: i32,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        EncodeError::Codec(CodecError::Io(e))
    }
}

/// Rejected parameter store mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// Generic `put` targeted the attachment key space
    #[error("key {0} lies in the reserved attachment range 1000..=1999")]
    ReservedKeyRange(i32),

    /// Every slot of the attachment kind is occupied
    #[error("no free slot left for {0} attachments")]
    AttachmentRangeFull(AttachmentKind),

    /// Attachment label contains the `|` label delimiter
    #[error("attachment label {0:?} contains the '|' delimiter")]
    DelimiterInLabel(String),
}
