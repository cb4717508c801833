//! Value to bytes.
//!
//! Encoding walks the value graph twice through the same emitter: once
//! into a byte counter to size the output exactly, once into the buffer.

use dyn_value::{ensure_sufficient_stack, List, Value, ValueError};

use crate::errors::{CodecError, CodecResult};
use crate::opcode::Opcode;

/// Where emitted bytes go.
trait Sink {
    fn put(&mut self, bytes: &[u8]);

    fn opcode(&mut self, opcode: Opcode) {
        self.put(&[opcode.byte()]);
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Counts bytes without storing them.
struct Counter(usize);

impl Sink for Counter {
    fn put(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

/// Exact number of bytes [`encode`] produces for `value`, excluding the
/// trailing `HALT`.
///
/// Fails for the same inputs `encode` rejects.
pub fn encoded_len(value: &Value) -> CodecResult<usize> {
    let mut counter = Counter(0);
    emit(value, &mut counter)?;
    Ok(counter.0)
}

/// Encode `value` followed by `HALT`.
///
/// References encode their target. Functions, externals and the misc marker
/// cannot be encoded, nor can strings containing NUL or containers with
/// more than `u16::MAX` entries.
#[tracing::instrument(level = "debug", skip_all, fields(ty = %value.resolved_type()))]
pub fn encode(value: &Value) -> CodecResult<Vec<u8>> {
    let len = encoded_len(value)? + 1;
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| ValueError::Allocation { requested: len })?;
    emit(value, &mut out)?;
    out.opcode(Opcode::Halt);
    tracing::debug!(bytes = out.len(), "encoded");
    Ok(out)
}

fn emit<S: Sink>(value: &Value, sink: &mut S) -> CodecResult<()> {
    ensure_sufficient_stack(|| match value {
        Value::None => {
            sink.opcode(Opcode::None);
            Ok(())
        }
        Value::Bool(true) => {
            sink.opcode(Opcode::True);
            Ok(())
        }
        Value::Bool(false) => {
            sink.opcode(Opcode::False);
            Ok(())
        }
        Value::Int(n) => {
            emit_int(*n, sink);
            Ok(())
        }
        Value::Float(f) => {
            sink.opcode(Opcode::Float);
            sink.put(&f.to_le_bytes());
            Ok(())
        }
        Value::Str(text) => emit_str(text, sink),
        Value::List(list) => emit_sequence(list, Opcode::List, sink),
        Value::Set(set) => emit_sequence(set, Opcode::Set, sink),
        Value::Dict(dict) => {
            let dict = dict.borrow();
            for (key, value) in dict.iter() {
                emit_str(key, sink)?;
                emit(value, sink)?;
            }
            sink.opcode(Opcode::Dict);
            emit_count(dict.len(), sink)
        }
        Value::Reference(reference) => reference.read(|target| emit(target, sink)),
        Value::Function(_) | Value::External(_) | Value::Misc => Err(CodecError::Unencodable {
            ty: value.type_of(),
        }),
    })
}

/// Smallest integer unit whose range holds `n`. The top value of each
/// narrow width is left to the next width up.
fn emit_int<S: Sink>(n: i32, sink: &mut S) {
    match (i8::try_from(n), i16::try_from(n)) {
        (Ok(byte), _) if byte != i8::MAX => {
            sink.opcode(Opcode::Int1);
            sink.put(&byte.to_le_bytes());
        }
        (_, Ok(short)) if short != i16::MAX => {
            sink.opcode(Opcode::Int2);
            sink.put(&short.to_le_bytes());
        }
        _ => {
            sink.opcode(Opcode::Int4);
            sink.put(&n.to_le_bytes());
        }
    }
}

fn emit_str<S: Sink>(text: &str, sink: &mut S) -> CodecResult<()> {
    if text.as_bytes().contains(&0) {
        return Err(CodecError::EmbeddedNul);
    }
    sink.opcode(Opcode::Str);
    sink.put(text.as_bytes());
    sink.put(&[0]);
    Ok(())
}

fn emit_sequence<S: Sink>(items: &List, opcode: Opcode, sink: &mut S) -> CodecResult<()> {
    for item in items {
        emit(item, sink)?;
    }
    sink.opcode(opcode);
    emit_count(items.len(), sink)
}

fn emit_count<S: Sink>(len: usize, sink: &mut S) -> CodecResult<()> {
    let count = u16::try_from(len).map_err(|_| CodecError::ContainerTooLong { len })?;
    sink.put(&count.to_le_bytes());
    Ok(())
}
