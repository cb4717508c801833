//! Codec failures.

use dyn_value::{ValueError, ValueType};
use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{ty} values have no wire encoding")]
    Unencodable { ty: ValueType },

    #[error("strings on the wire cannot contain NUL bytes")]
    EmbeddedNul,

    #[error("container of {len} entries does not fit a 16-bit count")]
    ContainerTooLong { len: usize },

    #[error("input ends inside the unit starting at offset {offset}")]
    Truncated { offset: usize },

    #[error("unknown opcode {opcode:#04x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("container needs {needed} values but only {available} are pending")]
    StackUnderflow { needed: usize, available: usize },

    #[error("container at offset {offset} nests deeper than {limit} levels")]
    TooDeep { limit: usize, offset: usize },

    #[error("dict key before offset {offset} is not a string")]
    InvalidKey { offset: usize },

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("input ends without HALT")]
    MissingHalt,

    #[error("HALT reached with {found} values pending instead of one")]
    ValueCount { found: usize },

    #[error(transparent)]
    Value(#[from] ValueError),
}
