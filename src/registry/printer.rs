//! Content printers for registered packets.

use std::fmt;

use serde::Deserialize;

use crate::disasm::Disassembler;

/// Body bytes shown by the hex dump before it truncates.
pub const HEX_DUMP_LIMIT: usize = 24;

/// Signature of a caller-supplied printer; receives the whole packet.
pub type PrintFn = fn(&[u8]) -> String;

/// How the CONTENT column of a packet is rendered.
#[derive(Clone, Copy, Default)]
pub enum Printer {
    /// Heuristic field disassembly.
    #[default]
    Heuristic,
    /// Body bytes as hex, truncated after [`HEX_DUMP_LIMIT`].
    HexDump,
    /// Fixed `(header only)` marker.
    HeaderOnly,
    /// Caller-supplied formatter.
    Custom(PrintFn),
}

impl Printer {
    /// Render content for `buf`, starting with a space and ending in a newline.
    pub fn render(&self, buf: &[u8], disassembler: &Disassembler) -> String {
        match self {
            Printer::Heuristic => disassembler.disassemble(buf).render(),
            Printer::HexDump => format!(" {}\n", hex_dump(buf)),
            Printer::HeaderOnly => " (header only)\n".to_string(),
            Printer::Custom(print) => format!(" {}\n", print(buf).trim_end_matches('\n')),
        }
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Printer::Heuristic => f.write_str("Heuristic"),
            Printer::HexDump => f.write_str("HexDump"),
            Printer::HeaderOnly => f.write_str("HeaderOnly"),
            Printer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Printer names accepted in registry files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterName {
    /// [`Printer::Heuristic`].
    #[default]
    Heuristic,
    /// [`Printer::HexDump`].
    #[serde(alias = "hex")]
    HexDump,
    /// [`Printer::HeaderOnly`].
    HeaderOnly,
}

impl From<PrinterName> for Printer {
    fn from(name: PrinterName) -> Self {
        match name {
            PrinterName::Heuristic => Printer::Heuristic,
            PrinterName::HexDump => Printer::HexDump,
            PrinterName::HeaderOnly => Printer::HeaderOnly,
        }
    }
}

/// Hex dump of the bytes after the header id.
///
/// Each byte is `XX ` (trailing space kept); `...` marks truncation.
pub fn hex_dump(buf: &[u8]) -> String {
    if buf.len() <= 1 {
        return "(empty)".to_string();
    }
    let body = &buf[1..];
    let shown = body.len().min(HEX_DUMP_LIMIT);
    let mut out = String::with_capacity(shown * 3 + 3);
    for b in &body[..shown] {
        out.push_str(&format!("{:02X} ", b));
    }
    if body.len() > HEX_DUMP_LIMIT {
        out.push_str("...");
    }
    out
}
