//! Packet walker: header skip, dynamic-length detection and the scan loop.
//!
//! # Example
//!
//! ```
//! use packet_debug::config::DisasmConfig;
//! use packet_debug::disasm::{Disassembler, Disassembly};
//!
//! let disasm = Disassembler::new(DisasmConfig::default());
//! let out = disasm.disassemble(b"\x07ABC\x00");
//! assert_eq!(out.render(), "\n       [001] char[4]: \"ABC\"\n");
//!
//! assert_eq!(disasm.disassemble(b"\x07"), Disassembly::Empty);
//! ```

use super::classify::classify_at;
use super::field::{FieldRecord, FIELD_INDENT};
use super::reader::read_u16_at;
use crate::config::DisasmConfig;

/// Result of disassembling one packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Disassembly {
    /// Zero or one byte: nothing past the header id.
    Empty,
    /// Header (and declared length, if any) with no body.
    HeaderOnly,
    /// Classified body fields.
    Fields {
        /// Offset where scanning began (1, or 3 when a length was declared).
        start: usize,
        /// Fields in offset order.
        fields: Vec<FieldRecord>,
        /// Bytes left unscanned after the field cap was hit.
        remaining: usize,
    },
}

impl Disassembly {
    /// Field records, empty for the marker variants.
    pub fn fields(&self) -> &[FieldRecord] {
        match self {
            Disassembly::Fields { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Unscanned byte count.
    pub fn remaining(&self) -> usize {
        match self {
            Disassembly::Fields { remaining, .. } => *remaining,
            _ => 0,
        }
    }

    /// Render the CONTENT column: either a marker on the header line, or a
    /// line break followed by one line per field.
    pub fn render(&self) -> String {
        match self {
            Disassembly::Empty => " (empty)\n".to_string(),
            Disassembly::HeaderOnly => " (header only)\n".to_string(),
            Disassembly::Fields {
                fields, remaining, ..
            } => {
                let mut out = String::with_capacity(1 + fields.len() * 32);
                out.push('\n');
                for field in fields {
                    out.push_str(&field.render_line());
                }
                if *remaining > 0 {
                    out.push_str(&format!("{}... +{} more bytes\n", FIELD_INDENT, remaining));
                }
                out
            }
        }
    }
}

/// Whether bytes 1..3 declare the packet's own total length.
pub fn has_declared_length(buf: &[u8]) -> bool {
    buf.len() >= 3 && read_u16_at(buf, 1).map(usize::from) == Some(buf.len())
}

/// Offset where field scanning begins.
pub fn body_start(buf: &[u8]) -> usize {
    if has_declared_length(buf) {
        3
    } else {
        1
    }
}

/// Schema-less packet disassembler.
#[derive(Debug, Clone, Default)]
pub struct Disassembler {
    config: DisasmConfig,
}

impl Disassembler {
    /// Create a disassembler with the given settings.
    pub fn new(config: DisasmConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &DisasmConfig {
        &self.config
    }

    /// Walk the packet body and classify fields.
    ///
    /// Stops at the end of the buffer or after `max_fields` records,
    /// whichever comes first.
    pub fn disassemble(&self, buf: &[u8]) -> Disassembly {
        if buf.len() <= 1 {
            return Disassembly::Empty;
        }

        let start = body_start(buf);
        if start >= buf.len() {
            return Disassembly::HeaderOnly;
        }

        let mut fields = Vec::new();
        let mut pos = start;
        while fields.len() < self.config.max_fields {
            let Some(field) = classify_at(buf, pos, &self.config) else {
                break;
            };
            pos = field.end();
            fields.push(field);
        }

        Disassembly::Fields {
            start,
            fields,
            remaining: buf.len() - pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::field::{FieldKind, FieldValue};

    fn disasm() -> Disassembler {
        Disassembler::default()
    }

    #[test]
    fn test_empty_and_single_byte() {
        assert_eq!(disasm().disassemble(&[]), Disassembly::Empty);
        assert_eq!(disasm().disassemble(&[0x42]), Disassembly::Empty);
        assert_eq!(disasm().disassemble(&[0x42]).render(), " (empty)\n");
    }

    #[test]
    fn test_header_only_with_declared_length() {
        // [h, 3, 0]: declared length equals the buffer length, no body.
        let out = disasm().disassemble(&[0x10, 0x03, 0x00]);
        assert_eq!(out, Disassembly::HeaderOnly);
        assert_eq!(out.render(), " (header only)\n");
    }

    #[test]
    fn test_declared_length_skips_three() {
        let buf = [0x10, 0x07, 0x00, 0x02, 0x03, 0x04, 0x05];
        assert!(has_declared_length(&buf));
        let out = disasm().disassemble(&buf);
        match out {
            Disassembly::Fields { start, ref fields, .. } => {
                assert_eq!(start, 3);
                assert_eq!(fields[0].offset, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_length_starts_at_one() {
        let buf = [0x10, 0x09, 0x00, 0x02, 0x03, 0x04, 0x05];
        assert!(!has_declared_length(&buf));
        match disasm().disassemble(&buf) {
            Disassembly::Fields { start, fields, .. } => {
                assert_eq!(start, 1);
                assert_eq!(fields[0].offset, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_short_string_falls_through() {
        let out = disasm().disassemble(b"\x01AB\x00");
        let fields = out.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind, FieldKind::Unsigned16);
        assert_eq!(fields[0].value, FieldValue::U16(0x4241));
        assert_eq!(fields[1].kind, FieldKind::Bool);
        assert_eq!(out.remaining(), 0);
    }

    #[test]
    fn test_field_cap_reports_remainder() {
        // Each 0x02020202 word reads as a DWORD.
        let mut buf = vec![0xAA];
        buf.extend([0x02u8; 80]);
        let out = disasm().disassemble(&buf);
        assert_eq!(out.fields().len(), 16);
        assert!(out.fields().iter().all(|f| f.kind == FieldKind::Unsigned32));
        assert_eq!(out.remaining(), 16);
        assert!(out.render().ends_with("       ... +16 more bytes\n"));
    }

    #[test]
    fn test_fields_are_contiguous() {
        let buf = b"\x05name\x00\x00\x00\x80\x3f\xff\xff\xff\xff\x10\x27\x02";
        let out = disasm().disassemble(buf);
        let fields = out.fields();
        let mut expected = 1;
        for f in fields {
            assert_eq!(f.offset, expected);
            expected = f.end();
        }
        assert_eq!(expected + out.remaining(), buf.len());
    }

    #[test]
    fn test_small_cap() {
        let config = DisasmConfig {
            max_fields: 2,
            ..DisasmConfig::default()
        };
        let out = Disassembler::new(config).disassemble(&[0x01, 5, 6, 7, 8, 9, 10, 11, 12, 13]);
        assert_eq!(out.fields().len(), 2);
        assert!(out.render().ends_with("       ... +1 more bytes\n"));
    }
}
