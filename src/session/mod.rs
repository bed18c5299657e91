//! Session module - the append-only packet log.
//!
//! Provides:
//! - [`PacketDebugSession`] - lifecycle, counters and record writing
//! - [`LogSink`] implementations for files and memory
//! - [`Clock`] sources for timestamps and inter-packet deltas
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "enabled")] {
//! use packet_debug::session::{LogStatus, MemorySink, PacketDebugSession, SinkTarget};
//!
//! let sink = MemorySink::new();
//! let session = PacketDebugSession::builder()
//!     .sink(SinkTarget::Memory(sink.clone()))
//!     .build();
//!
//! assert_eq!(session.initialize(), LogStatus::Written);
//! session.on_send(b"\x01hello");
//! session.shutdown();
//!
//! assert!(sink.contents().contains("char[6]: \"hello\""));
//! # }
//! ```

mod clock;
mod lifecycle;
mod record;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use lifecycle::{LogStatus, PacketDebugSession, SessionBuilder, ENABLED};
pub use record::{
    format_record_header, session_footer, session_header, Counters, Direction, BANNER_WIDTH,
    COLUMN_LEGEND, COLUMN_RULE,
};
pub use sink::{FileSink, LogSink, MemorySink, SinkTarget};
