//! Text layout of session banners and packet record headers.
//!
//! ```text
//!  DIR  |     TIME      | DT(ms) |   HEADER ID   | SIZE  | CONTENT
//! ------+---------------+--------+---------------+-------+----------------------------------
//!  SEND #1 | 12:00:00.250 |    250 |   6 (0x06)    |    13 |
//!        [001] char[6]: "hello"
//! ```

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Width of the `=` banner lines.
pub const BANNER_WIDTH: usize = 90;

/// Column legend written under the session header.
pub const COLUMN_LEGEND: &str =
    " DIR  |     TIME      | DT(ms) |   HEADER ID   | SIZE  | CONTENT\n";

/// Rule under the column legend.
pub const COLUMN_RULE: &str =
    "------+---------------+--------+---------------+-------+----------------------------------\n";

/// Packet direction relative to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outbound, about to be transmitted.
    #[serde(alias = "sent")]
    Send,
    /// Inbound, fully received.
    #[serde(alias = "receive", alias = "received")]
    Recv,
}

impl Direction {
    /// Four-letter tag used in the DIR column.
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Send => "SEND",
            Direction::Recv => "RECV",
        }
    }
}

/// Packet counts for the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Outbound packets logged.
    pub sent: u64,
    /// Inbound packets logged.
    pub received: u64,
}

impl Counters {
    /// Sent plus received.
    #[inline]
    pub fn total(&self) -> u64 {
        self.sent + self.received
    }

    /// Count one packet in `direction`.
    #[inline]
    pub fn bump(&mut self, direction: Direction) {
        match direction {
            Direction::Send => self.sent += 1,
            Direction::Recv => self.received += 1,
        }
    }
}

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Session header block, starting with a blank separator line.
pub fn session_header(started: &NaiveDateTime, log_path: &str) -> String {
    let banner = banner();
    format!(
        "\n{banner}\n  PACKET DEBUG SESSION - {}\n  Log file: {}\n{banner}\n{}{}",
        started.format("%Y-%m-%d %H:%M:%S"),
        log_path,
        COLUMN_LEGEND,
        COLUMN_RULE,
    )
}

/// Session footer block, ending with a blank line.
pub fn session_footer(counters: Counters) -> String {
    let banner = banner();
    format!(
        "{banner}\n SESSION END - SEND: {} packets | RECV: {} packets\n{banner}\n\n",
        counters.sent, counters.received
    )
}

/// Fixed-width prefix of one packet record, without a line break.
///
/// `sequence` is the running sent+received total including this packet.
/// `buf` must not be empty.
pub fn format_record_header(
    direction: Direction,
    sequence: u64,
    wall: &NaiveDateTime,
    elapsed_ms: u64,
    buf: &[u8],
) -> String {
    let header_id = buf.first().copied().unwrap_or(0);
    format!(
        " {} #{} | {} | {:6} | {:3} (0x{:02X})    | {:5} |",
        direction.tag(),
        sequence,
        wall.format("%H:%M:%S%.3f"),
        elapsed_ms,
        header_id,
        header_id,
        buf.len(),
    )
}
