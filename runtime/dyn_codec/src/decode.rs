//! Bytes to value.
//!
//! Scalars push onto a work stack. A container opcode pops its elements
//! (a dict pops key/value pairs) and pushes the assembled container. `HALT`
//! must find exactly one finished value.

use dyn_value::{Dict, Heap, List, Set, Value, ValueError};

use crate::errors::{CodecError, CodecResult};
use crate::opcode::Opcode;

/// Decoder limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Most values that may be pending on the work stack at once.
    pub max_values: usize,
    /// Deepest container nesting accepted. A flat list has depth 1.
    pub max_depth: usize,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_VALUES: usize = 65_536;
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_values: Self::DEFAULT_MAX_VALUES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decode one value with default limits. Bytes after `HALT` are ignored.
pub fn decode(bytes: &[u8]) -> CodecResult<Value> {
    decode_with(bytes, &DecodeOptions::default())
}

pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> CodecResult<Value> {
    decode_prefix(bytes, options).map(|(value, _)| value)
}

/// Decode the value at the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, `HALT` included, so
/// several encodings can be read back to back.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn decode_prefix(bytes: &[u8], options: &DecodeOptions) -> CodecResult<(Value, usize)> {
    let decoded = Decoder {
        bytes,
        pos: 0,
        stack: Vec::new(),
        max_values: options.max_values,
        max_depth: options.max_depth,
    }
    .run()?;
    tracing::debug!(consumed = decoded.1, "decoded");
    Ok(decoded)
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Pending values with their container nesting depth.
    stack: Vec<(Value, usize)>,
    max_values: usize,
    max_depth: usize,
}

impl Decoder<'_> {
    fn run(mut self) -> CodecResult<(Value, usize)> {
        loop {
            let offset = self.pos;
            let Some(&byte) = self.bytes.get(offset) else {
                return Err(CodecError::MissingHalt);
            };
            self.pos += 1;
            let opcode = Opcode::try_from(byte)
                .map_err(|opcode| CodecError::UnknownOpcode { opcode, offset })?;
            let scalar = match opcode {
                Opcode::Halt => return self.finish(),
                Opcode::None => Value::None,
                Opcode::True => Value::Bool(true),
                Opcode::False => Value::Bool(false),
                Opcode::Int1 => Value::Int(i32::from(i8::from_le_bytes(self.take(offset)?))),
                Opcode::Int2 => Value::Int(i32::from(i16::from_le_bytes(self.take(offset)?))),
                Opcode::Int4 => Value::Int(i32::from_le_bytes(self.take(offset)?)),
                Opcode::Float => Value::Float(f32::from_le_bytes(self.take(offset)?)),
                Opcode::Str => Value::Str(self.take_str(offset)?),
                Opcode::List => {
                    let count = self.take_count(offset)?;
                    let (items, depth) = self.pop(count, offset)?;
                    let list = Value::List(Box::new(List::from_values(items)?));
                    self.push(list, depth)?;
                    continue;
                }
                Opcode::Set => {
                    let count = self.take_count(offset)?;
                    let (items, depth) = self.pop(count, offset)?;
                    let set = Self::assemble_set(items, offset)?;
                    self.push(set, depth)?;
                    continue;
                }
                Opcode::Dict => {
                    let count = self.take_count(offset)?;
                    let (items, depth) = self.pop(count * 2, offset)?;
                    let dict = Self::assemble_dict(items, offset)?;
                    self.push(dict, depth)?;
                    continue;
                }
                Opcode::Proc => {
                    return Err(CodecError::UnknownOpcode {
                        opcode: byte,
                        offset,
                    })
                }
            };
            self.push(scalar, 0)?;
        }
    }

    fn finish(mut self) -> CodecResult<(Value, usize)> {
        match (self.stack.pop(), self.stack.len()) {
            (Some((value, _)), 0) => Ok((value, self.pos)),
            (None, _) => Err(CodecError::ValueCount { found: 0 }),
            (Some(_), rest) => Err(CodecError::ValueCount { found: rest + 1 }),
        }
    }

    fn push(&mut self, value: Value, depth: usize) -> CodecResult<()> {
        if self.stack.len() >= self.max_values {
            return Err(ValueError::CapacityExceeded {
                requested: self.stack.len() + 1,
                limit: self.max_values,
            }
            .into());
        }
        self.stack.push((value, depth));
        Ok(())
    }

    /// The `count` most recent values, oldest first, and the depth of the
    /// container that will hold them.
    fn pop(&mut self, count: usize, offset: usize) -> CodecResult<(Vec<Value>, usize)> {
        let available = self.stack.len();
        if count > available {
            return Err(CodecError::StackUnderflow {
                needed: count,
                available,
            });
        }
        let start = available - count;
        let depth = self.stack[start..]
            .iter()
            .map(|&(_, depth)| depth)
            .max()
            .unwrap_or(0)
            + 1;
        if depth > self.max_depth {
            return Err(CodecError::TooDeep {
                limit: self.max_depth,
                offset,
            });
        }
        let items = self.stack.drain(start..).map(|(value, _)| value).collect();
        Ok((items, depth))
    }

    /// Fixed-size payload of the unit that started at `offset`.
    fn take<const N: usize>(&mut self, offset: usize) -> CodecResult<[u8; N]> {
        let chunk = self
            .bytes
            .get(self.pos..self.pos + N)
            .and_then(|chunk| <[u8; N]>::try_from(chunk).ok())
            .ok_or(CodecError::Truncated { offset })?;
        self.pos += N;
        Ok(chunk)
    }

    fn take_count(&mut self, offset: usize) -> CodecResult<usize> {
        Ok(usize::from(u16::from_le_bytes(self.take(offset)?)))
    }

    fn take_str(&mut self, offset: usize) -> CodecResult<String> {
        let rest = self.bytes.get(self.pos..).unwrap_or_default();
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(CodecError::Truncated { offset })?;
        let text = std::str::from_utf8(&rest[..nul])
            .map_err(|_| CodecError::InvalidUtf8 { offset })?;
        let mut owned = String::new();
        owned
            .try_reserve_exact(text.len())
            .map_err(|_| ValueError::Allocation {
                requested: text.len(),
            })?;
        owned.push_str(text);
        self.pos += nul + 1;
        Ok(owned)
    }

    fn assemble_set(items: Vec<Value>, offset: usize) -> CodecResult<Value> {
        let count = items.len();
        let mut set = Set::with_space(count)?;
        for item in items {
            set.insert_owned(item)?;
        }
        if set.len() < count {
            tracing::warn!(
                offset,
                count,
                kept = set.len(),
                "duplicate set elements dropped"
            );
        }
        Ok(Value::Set(Box::new(set)))
    }

    /// Later duplicates of a key replace earlier ones. Receivers are bound
    /// once the dict is complete.
    fn assemble_dict(items: Vec<Value>, offset: usize) -> CodecResult<Value> {
        let count = items.len() / 2;
        let mut items = items.into_iter();
        let mut dict = Dict::with_space(count)?;
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            let Value::Str(key) = key else {
                return Err(CodecError::InvalidKey { offset });
            };
            dict.insert_owned(&key, value)?;
        }
        let heap = Heap::new(dict);
        Dict::set_location(&heap);
        Ok(Value::Dict(heap))
    }
}

#[cfg(test)]
mod tests;
