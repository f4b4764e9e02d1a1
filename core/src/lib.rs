//! geowire core - versioned binary serialization for geodata
//!
//! This crate provides the pieces every geowire entity is built from:
//!
//! - [`codec`] - big-endian [`Reader`] / [`Writer`] for primitives, strings and blocks
//! - [`storable`] - the [`Storable`] trait: version tag + version-gated body,
//!   lists of independently versioned elements, scoped file transport
//! - [`params`] - the sparse [`ParameterStore`] with reserved attachment ranges
//!
//! Newer readers decode older payloads and fill fields that did not exist yet
//! with their defaults. Payloads from a newer writer are refused with
//! [`DecodeError::UnsupportedVersion`] so callers can tell them apart from
//! corrupt data.

pub mod codec;
pub mod error;
pub mod limits;
pub mod params;
pub mod storable;

pub use codec::{Reader, Writer};
pub use error::{CodecError, DecodeError, EncodeError, ParamError};
pub use limits::DecodeLimits;
pub use params::{Attachment, AttachmentKind, ParameterStore};
pub use storable::{
    Storable, decode, decode_list, decode_with_limits, encode, encode_as, encode_list,
    peek_version, read_list, read_object, read_optional, write_list, write_object,
    write_object_as, write_optional,
};
