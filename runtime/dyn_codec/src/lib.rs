//! Binary wire encoding for dyn runtime values.
//!
//! The format is a postfix byte stream: every unit starts with a one-byte
//! [`Opcode`], containers follow their elements, and the stream ends with
//! `HALT`. Decoding is therefore a small stack machine with no recursion.
//!
//! ```text
//! [1, "ab"]  =>  INT1 01 | STRING 'a' 'b' 00 | LIST 02 00 | HALT
//! ```
//!
//! Framing, checksums and versioning belong to the transport layer.

mod decode;
mod encode;
mod errors;
mod opcode;

pub use decode::{decode, decode_prefix, decode_with, DecodeOptions};
pub use encode::{encode, encoded_len};
pub use errors::{CodecError, CodecResult};
pub use opcode::Opcode;
