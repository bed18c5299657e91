//! Disassembler module - schema-less field recovery.
//!
//! Given a packet and nothing else, guess where field boundaries fall and
//! what primitive each field holds:
//! - [`reader`] - bounds-checked little-endian decoders
//! - [`classify`] - the ordered candidate cascade
//! - [`Disassembler`] - header skip, length detection, scan loop
//!
//! The guesses are not verified against anything. Two runs over the same
//! bytes always produce the same text.

pub mod classify;
mod disassembler;
mod field;
pub mod reader;

pub use classify::{classify_at, is_printable};
pub use disassembler::{body_start, has_declared_length, Disassembler, Disassembly};
pub use field::{FieldKind, FieldRecord, FieldValue, FIELD_INDENT};
