//! Registry module - named packets and their printers.
//!
//! Packets whose header id is registered get their name shown in the
//! CONTENT column and are rendered with the registered [`Printer`];
//! everything else falls back to heuristic disassembly.

mod printer;
mod table;

pub use printer::{hex_dump, PrintFn, Printer, PrinterName, HEX_DUMP_LIMIT};
pub use table::{PacketEntry, PacketRegistry};
