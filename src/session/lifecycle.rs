//! Session lifecycle: initialize, record packets, shut down.
//!
//! The session is an explicit object owned by the host. All methods take
//! `&self`; sink, counters and the delta reference live behind one lock,
//! so records from different threads never interleave.
//!
//! No method returns an error. Failures are logged through `tracing` and
//! reported as a [`LogStatus`], and a failed sink is never retried.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::record::{
    format_record_header, session_footer, session_header, Counters, Direction,
};
use super::sink::{LogSink, SinkTarget};
use crate::config::DebugConfig;
use crate::disasm::Disassembler;
use crate::registry::PacketRegistry;

/// Whether the crate was built with packet logging compiled in.
pub const ENABLED: bool = cfg!(feature = "enabled");

/// Outcome of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    /// Text was appended to the sink.
    Written,
    /// `initialize()` while already active; nothing written.
    AlreadyActive,
    /// Not initialized, shut down, sink failed, or logging compiled out.
    Inactive,
    /// Zero-length buffer; nothing counted or written.
    EmptyBuffer,
}

impl LogStatus {
    /// Whether the operation wrote to the sink.
    #[inline]
    pub fn is_written(self) -> bool {
        self == LogStatus::Written
    }
}

/// Mutable session state.
struct State {
    /// Open sink while active.
    sink: Option<Box<dyn LogSink>>,
    /// Set once the sink has failed; the session stays inactive.
    failed: bool,
    /// Packet counts, kept across re-initialization.
    counters: Counters,
    /// Monotonic reading at the previous record.
    last_tick: Duration,
}

/// Builder for [`PacketDebugSession`].
pub struct SessionBuilder {
    config: DebugConfig,
    target: Option<SinkTarget>,
    clock: Option<Arc<dyn Clock>>,
    registry: PacketRegistry,
}

impl SessionBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: DebugConfig::default(),
            target: None,
            clock: None,
            registry: PacketRegistry::new(),
        }
    }

    /// Use `config` (log path and disassembler settings).
    pub fn config(mut self, config: DebugConfig) -> Self {
        self.config = config;
        self
    }

    /// Write somewhere other than `config.log_path`.
    pub fn sink(mut self, target: SinkTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Use a custom clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a packet registry for names and printers.
    pub fn registry(mut self, registry: PacketRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the session. Nothing is opened until `initialize()`.
    pub fn build(self) -> PacketDebugSession {
        let target = self
            .target
            .unwrap_or_else(|| SinkTarget::File(self.config.log_path.clone()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        PacketDebugSession {
            target,
            disassembler: Disassembler::new(self.config.disasm),
            registry: self.registry,
            clock,
            state: Mutex::new(State {
                sink: None,
                failed: false,
                counters: Counters::default(),
                last_tick: Duration::ZERO,
            }),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Packet debug session.
pub struct PacketDebugSession {
    target: SinkTarget,
    disassembler: Disassembler,
    registry: PacketRegistry,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl PacketDebugSession {
    /// Create a session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Session writing to `config.log_path` with the system clock.
    pub fn new(config: DebugConfig) -> Self {
        SessionBuilder::new().config(config).build()
    }

    /// Open the sink and write the session header.
    ///
    /// A second call while active is a no-op. If the sink cannot be
    /// opened the session stays inactive for good.
    pub fn initialize(&self) -> LogStatus {
        if !ENABLED {
            return LogStatus::Inactive;
        }
        let mut state = self.state.lock();
        if state.sink.is_some() {
            return LogStatus::AlreadyActive;
        }
        if state.failed {
            return LogStatus::Inactive;
        }

        let (mut sink, shown_path) = match self.target.open() {
            Ok(opened) => opened,
            Err(e) => {
                tracing::warn!("Packet debug log unavailable: {}", e);
                state.failed = true;
                return LogStatus::Inactive;
            }
        };

        let header = session_header(&self.clock.wall(), &shown_path);
        if let Err(e) = sink.append(&header) {
            tracing::warn!("Packet debug log write failed: {}", e);
            state.failed = true;
            return LogStatus::Inactive;
        }

        state.last_tick = self.clock.monotonic();
        state.sink = Some(sink);
        tracing::debug!("Packet debug session started: {}", shown_path);
        LogStatus::Written
    }

    /// Write the footer and close the sink.
    pub fn shutdown(&self) -> LogStatus {
        if !ENABLED {
            return LogStatus::Inactive;
        }
        let mut state = self.state.lock();
        let Some(mut sink) = state.sink.take() else {
            return LogStatus::Inactive;
        };

        let footer = session_footer(state.counters);
        if let Err(e) = sink.append(&footer) {
            tracing::warn!("Packet debug log write failed: {}", e);
            state.failed = true;
            return LogStatus::Inactive;
        }
        tracing::debug!(
            "Packet debug session ended: {} sent, {} received",
            state.counters.sent,
            state.counters.received
        );
        LogStatus::Written
    }

    /// Log an outbound packet.
    pub fn on_send(&self, buf: &[u8]) -> LogStatus {
        self.record(Direction::Send, buf)
    }

    /// Log an inbound packet.
    pub fn on_receive(&self, buf: &[u8]) -> LogStatus {
        self.record(Direction::Recv, buf)
    }

    /// Log a packet in `direction`: record header plus rendered content.
    pub fn record(&self, direction: Direction, buf: &[u8]) -> LogStatus {
        if !ENABLED {
            return LogStatus::Inactive;
        }
        let mut state = self.state.lock();
        if state.sink.is_none() {
            return LogStatus::Inactive;
        }
        if buf.is_empty() {
            return LogStatus::EmptyBuffer;
        }

        state.counters.bump(direction);
        let now = self.clock.monotonic();
        let elapsed_ms =
            u64::try_from(now.saturating_sub(state.last_tick).as_millis()).unwrap_or(u64::MAX);
        state.last_tick = now;

        let mut text = format_record_header(
            direction,
            state.counters.total(),
            &self.clock.wall(),
            elapsed_ms,
            buf,
        );
        text.push_str(&self.render_content(direction, buf));

        let result = match state.sink.as_mut() {
            Some(sink) => sink.append(&text),
            None => return LogStatus::Inactive,
        };
        if let Err(e) = result {
            tracing::warn!("Packet debug log write failed, disabling: {}", e);
            state.sink = None;
            state.failed = true;
            return LogStatus::Inactive;
        }
        LogStatus::Written
    }

    /// CONTENT column for a packet: a registered printer, or disassembly.
    pub fn render_content(&self, direction: Direction, buf: &[u8]) -> String {
        let header_id = buf.first().copied().unwrap_or(0);
        match self.registry.lookup(direction, header_id) {
            Some(entry) => entry.render(buf, &self.disassembler),
            None => self.disassembler.disassemble(buf).render(),
        }
    }

    /// Whether the sink is open.
    pub fn is_active(&self) -> bool {
        self.state.lock().sink.is_some()
    }

    /// Packet counts so far.
    pub fn counters(&self) -> Counters {
        self.state.lock().counters
    }

    /// The disassembler in use.
    pub fn disassembler(&self) -> &Disassembler {
        &self.disassembler
    }

    /// The packet registry in use.
    pub fn registry(&self) -> &PacketRegistry {
        &self.registry
    }
}
