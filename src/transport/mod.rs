//! Transport module - taps at the send/receive boundary.
//!
//! Provides:
//! - [`PacketTap`] - the `on_send` / `on_receive` seam
//! - [`Tapped`] - tokio stream adapter reporting each read and write

mod tap;

pub use tap::{PacketTap, Tapped};
