//! Stream adapters that report traffic to a [`PacketTap`].
//!
//! [`Tapped`] wraps any tokio stream. Each accepted `poll_write` chunk is
//! reported as an outbound packet and each non-empty `poll_read` fill as
//! an inbound one. Bytes and results pass through untouched, so the
//! transport behaves exactly as if the tap were absent.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "enabled")] {
//! use std::sync::Arc;
//! use packet_debug::session::{MemorySink, PacketDebugSession, SinkTarget};
//! use packet_debug::transport::Tapped;
//! use tokio::io::AsyncWriteExt;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let sink = MemorySink::new();
//! let session = Arc::new(
//!     PacketDebugSession::builder().sink(SinkTarget::Memory(sink.clone())).build(),
//! );
//! session.initialize();
//!
//! let mut out = Tapped::new(Vec::<u8>::new(), session.clone());
//! out.write_all(b"\x05ping").await.unwrap();
//! assert_eq!(session.counters().sent, 1);
//! assert_eq!(out.into_inner(), b"\x05ping");
//! # });
//! # }
//! ```

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::session::{LogStatus, PacketDebugSession};

/// Receiver of raw packet buffers at the transport boundary.
///
/// Implementations must not block the caller beyond a synchronous log
/// write and must never fail.
pub trait PacketTap: Send + Sync {
    /// A buffer is about to be transmitted.
    fn on_send(&self, buf: &[u8]) -> LogStatus;

    /// A buffer has just been received.
    fn on_receive(&self, buf: &[u8]) -> LogStatus;
}

impl PacketTap for PacketDebugSession {
    fn on_send(&self, buf: &[u8]) -> LogStatus {
        PacketDebugSession::on_send(self, buf)
    }

    fn on_receive(&self, buf: &[u8]) -> LogStatus {
        PacketDebugSession::on_receive(self, buf)
    }
}

/// A stream whose reads and writes are reported to a tap.
pub struct Tapped<S> {
    inner: S,
    tap: Arc<dyn PacketTap>,
}

impl<S> Tapped<S> {
    /// Wrap `inner`, reporting traffic to `tap`.
    pub fn new<T: PacketTap + 'static>(inner: S, tap: Arc<T>) -> Self {
        Self { inner, tap }
    }

    /// Get a reference to the wrapped stream.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get a mutable reference to the wrapped stream.
    ///
    /// Traffic sent through this reference is not reported.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for Tapped<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;
        let received = &buf.filled()[before..];
        if !received.is_empty() {
            this.tap.on_receive(received);
        }
        Poll::Ready(Ok(()))
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for Tapped<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let written = ready!(Pin::new(&mut this.inner).poll_write(cx, buf))?;
        if written > 0 {
            this.tap.on_send(&buf[..written]);
        }
        Poll::Ready(Ok(written))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
