//! Classified field records and their text rendering.

use std::fmt;

/// Indentation that lines field records up under the CONTENT column.
pub const FIELD_INDENT: &str = "       ";

/// Primitive type guessed for a region of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Printable run terminated by NUL or end of buffer.
    VarString,
    /// Canonical-size char array padded with NULs.
    FixedString,
    /// IEEE-754 single.
    Float,
    /// Negative 32-bit integer.
    Signed32,
    /// Unsigned 32-bit integer.
    Unsigned32,
    /// Negative 16-bit integer.
    Signed16,
    /// Unsigned 16-bit integer.
    Unsigned16,
    /// Byte holding 0 or 1.
    Bool,
    /// Any other byte.
    Byte,
}

impl FieldKind {
    /// Whether the kind carries text.
    pub fn is_string(self) -> bool {
        matches!(self, FieldKind::VarString | FieldKind::FixedString)
    }
}

/// Decoded value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String content, without terminator or padding.
    Text(String),
    /// Float value.
    Float(f32),
    /// 32-bit signed value.
    I32(i32),
    /// 32-bit unsigned value.
    U32(u32),
    /// 16-bit signed value.
    I16(i16),
    /// 16-bit unsigned value.
    U16(u16),
    /// Single byte.
    U8(u8),
}

/// One classified region of a packet.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    /// Start offset within the packet.
    pub offset: usize,
    /// Guessed type.
    pub kind: FieldKind,
    /// Bytes consumed, including any terminator or padding.
    pub width: usize,
    /// Decoded value.
    pub value: FieldValue,
}

impl FieldRecord {
    /// Create a new record.
    pub fn new(offset: usize, kind: FieldKind, width: usize, value: FieldValue) -> Self {
        Self {
            offset,
            kind,
            width,
            value,
        }
    }

    /// Offset one past the last consumed byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Label shown before the value, e.g. `char[4]` or `DWORD`.
    ///
    /// A variable string is shown as the char array that would hold it,
    /// terminator included, whether or not the NUL was present.
    pub fn label(&self) -> String {
        match (self.kind, &self.value) {
            (FieldKind::VarString, FieldValue::Text(s)) => format!("char[{}]", s.len() + 1),
            (FieldKind::FixedString, _) => format!("char[{}]", self.width),
            (FieldKind::VarString, _) => "char[]".to_string(),
            (FieldKind::Float, _) => "float".to_string(),
            (FieldKind::Signed32, _) => "long".to_string(),
            (FieldKind::Unsigned32, _) => "DWORD".to_string(),
            (FieldKind::Signed16, _) => "short".to_string(),
            (FieldKind::Unsigned16, _) => "WORD".to_string(),
            (FieldKind::Bool, _) => "BYTE/bool".to_string(),
            (FieldKind::Byte, _) => "BYTE".to_string(),
        }
    }

    /// Render as one indented log line, newline included.
    pub fn render_line(&self) -> String {
        format!("{}{}\n", FIELD_INDENT, self)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "\"{}\"", s),
            FieldValue::Float(v) => write!(f, "{:.4}", v),
            FieldValue::I32(v) => write!(f, "{} (0x{:08X})", v, *v as u32),
            FieldValue::U32(v) => write!(f, "{} (0x{:08X})", v, v),
            FieldValue::I16(v) => write!(f, "{} (0x{:04X})", v, *v as u16),
            FieldValue::U16(v) => write!(f, "{} (0x{:04X})", v, v),
            FieldValue::U8(v) => write!(f, "{} (0x{:02X})", v, v),
        }
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:03}] {}: ", self.offset, self.label())?;
        match (self.kind, &self.value) {
            // Booleans drop the hex column.
            (FieldKind::Bool, FieldValue::U8(v)) => write!(f, "{}", v),
            (_, value) => write!(f, "{}", value),
        }
    }
}
