//! # packet-debug
//!
//! Schema-less packet logger for debugging network clients.
//!
//! The transport hands every outbound and inbound buffer to a
//! [`PacketDebugSession`], which appends one record per packet to a text
//! log. With no knowledge of the protocol, a heuristic disassembler guesses
//! the field layout of each packet: strings, floats, 32/16-bit integers and
//! bytes.
//!
//! ## Architecture
//!
//! - **Session** ([`session`]): sink, counters, timing, lifecycle
//! - **Disassembler** ([`disasm`]): ordered classification cascade
//! - **Registry** ([`registry`]): optional names and printers per header id
//! - **Transport** ([`transport`]): tokio stream taps
//!
//! Logging never disturbs the host. Every session operation returns a
//! [`LogStatus`] instead of an error, and a failed sink simply turns the
//! session off.
//!
//! ## Example
//!
//! ```no_run
//! use packet_debug::{DebugConfig, PacketDebugSession};
//!
//! let session = PacketDebugSession::new(DebugConfig::default());
//! session.initialize();
//!
//! session.on_send(&[0x06, 0x05, 0x00, b'h', b'i', b'!', 0x00]);
//! session.on_receive(&[0x2C]);
//!
//! session.shutdown();
//! ```
//!
//! Build without the default `enabled` feature to compile every session
//! operation down to an inactive no-op.

pub mod config;
pub mod disasm;
pub mod error;
pub mod registry;
pub mod session;
pub mod transport;

pub use config::{DebugConfig, DisasmConfig, Plausibility};
pub use disasm::{Disassembler, Disassembly, FieldKind, FieldRecord};
pub use error::PacketDebugError;
pub use registry::{PacketRegistry, Printer};
pub use session::{Direction, LogStatus, PacketDebugSession};
pub use transport::{PacketTap, Tapped};
