//! Replay - log a short fake exchange and print the result.
//!
//! This example demonstrates:
//! - Building a session with a registry of known packets
//! - Tapping a tokio stream so traffic is logged transparently
//! - Reading the log back from an in-memory sink
//!
//! ```sh
//! cargo run --example replay
//! cargo run --example replay -- packets.json
//! ```
//!
//! The optional argument is a JSON registry file:
//!
//! ```json
//! [{ "direction": "send", "id": 1, "name": "CG_LOGIN" }]
//! ```

use std::sync::Arc;

use packet_debug::registry::{PacketRegistry, Printer};
use packet_debug::session::{Direction, MemorySink, PacketDebugSession, SinkTarget};
use packet_debug::transport::Tapped;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};

fn login_packet() -> Vec<u8> {
    let mut buf = vec![0x01];
    buf.extend(b"player\0");
    buf.extend(b"hunter2\0\0\0\0\0\0\0\0\0");
    buf.extend(1024u32.to_le_bytes());
    buf
}

fn position_packet() -> Vec<u8> {
    let mut buf = vec![0x0D, 0x00, 0x00];
    buf.extend(812.25f32.to_le_bytes());
    buf.extend((-33.5f32).to_le_bytes());
    buf.extend(2u16.to_le_bytes());
    let len = buf.len() as u16;
    buf[1..3].copy_from_slice(&len.to_le_bytes());
    buf
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = match std::env::args().nth(1) {
        Some(path) => PacketRegistry::from_file(path)?,
        None => PacketRegistry::new(),
    };
    registry.register(Direction::Recv, 0x2C, "GC_KEY", Printer::HexDump);

    let sink = MemorySink::new();
    let session = Arc::new(
        PacketDebugSession::builder()
            .sink(SinkTarget::Memory(sink.clone()))
            .registry(registry)
            .build(),
    );
    session.initialize();

    let (client, mut server) = duplex(4096);
    let mut client = Tapped::new(client, session.clone());

    for packet in [login_packet(), position_packet()] {
        client.write_all(&packet).await?;
        let mut echoed = vec![0u8; packet.len()];
        server.read_exact(&mut echoed).await?;
    }

    server.write_all(&[0x2C, 0x9F, 0x10, 0x77, 0x03]).await?;
    let mut key = [0u8; 5];
    client.read_exact(&mut key).await?;

    session.shutdown();
    print!("{}", sink.contents());
    Ok(())
}
