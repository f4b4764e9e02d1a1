//! Big-endian binary codec
//!
//! Primitive layer shared by every Storable entity. Values are read strictly
//! in the order they were written; there is no random access.
//!
//! # Encoding
//!
//! ```text
//! bool    1 byte   0 / 1
//! int     4 bytes  big-endian two's complement
//! long    8 bytes  big-endian two's complement
//! float   4 bytes  big-endian IEEE-754
//! double  8 bytes  big-endian IEEE-754
//! string  int byte-length + UTF-8 bytes (absent string == empty string)
//! block   int byte-length + raw bytes
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
