//! One-byte unit tags.

/// Leading byte of every encoded unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    None = 0,
    True = 1,
    False = 2,
    /// `i8` payload, covering `-128..=126`.
    Int1 = 3,
    /// `i16` payload, covering `-32768..=32766`.
    Int2 = 4,
    /// `i32` payload.
    Int4 = 5,
    /// `f32` payload.
    Float = 6,
    /// Follows its elements; `u16` element count payload.
    List = 7,
    /// Follows its elements; `u16` element count payload.
    Set = 8,
    /// Reserved for procedures. Never produced, rejected by the decoder.
    Proc = 9,
    /// NUL-terminated UTF-8 payload.
    Str = 10,
    /// Follows its key/value pairs; `u16` entry count payload.
    Dict = 11,
    Halt = 12,
}

impl Opcode {
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        Ok(match byte {
            0 => Opcode::None,
            1 => Opcode::True,
            2 => Opcode::False,
            3 => Opcode::Int1,
            4 => Opcode::Int2,
            5 => Opcode::Int4,
            6 => Opcode::Float,
            7 => Opcode::List,
            8 => Opcode::Set,
            9 => Opcode::Proc,
            10 => Opcode::Str,
            11 => Opcode::Dict,
            12 => Opcode::Halt,
            other => return Err(other),
        })
    }
}
