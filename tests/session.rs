//! Session tests against memory and file sinks.
//!
//! Only built with the default `enabled` feature; without it every
//! session call is a no-op (see `test_disabled_build_is_noop`).

#![cfg(feature = "enabled")]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use packet_debug::config::{DebugConfig, DisasmConfig};
use packet_debug::registry::{PacketRegistry, Printer};
use packet_debug::session::{
    Direction, LogStatus, ManualClock, MemorySink, PacketDebugSession, SinkTarget,
};

fn memory_session(registry: PacketRegistry) -> (PacketDebugSession, MemorySink) {
    let sink = MemorySink::new();
    let clock = Arc::new(ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 0)
            .unwrap(),
    ));
    let session = PacketDebugSession::builder()
        .sink(SinkTarget::Memory(sink.clone()))
        .clock(clock)
        .registry(registry)
        .build();
    (session, sink)
}

/// One send and two receives show up in the footer.
#[test]
fn test_session_counters_in_footer() {
    let (session, sink) = memory_session(PacketRegistry::new());
    assert_eq!(session.initialize(), LogStatus::Written);
    session.on_send(&[0x01, 0x02]);
    session.on_receive(&[0x03]);
    session.on_receive(&[0x04, 0x05, 0x06]);
    assert_eq!(session.shutdown(), LogStatus::Written);

    assert!(sink
        .contents()
        .contains("SEND: 1 packets | RECV: 2 packets"));
}

/// Repeated lifecycle calls write one header and one footer.
#[test]
fn test_lifecycle_idempotence() {
    let (session, sink) = memory_session(PacketRegistry::new());
    assert_eq!(session.initialize(), LogStatus::Written);
    assert_eq!(session.initialize(), LogStatus::AlreadyActive);
    assert_eq!(session.shutdown(), LogStatus::Written);
    assert_eq!(session.shutdown(), LogStatus::Inactive);

    let text = sink.contents();
    assert_eq!(text.matches("PACKET DEBUG SESSION").count(), 1);
    assert_eq!(text.matches("SESSION END").count(), 1);
}

/// The file sink appends a full session and a second run adds another block.
#[test]
fn test_file_session_appends_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug_packet.log");
    let config = DebugConfig {
        log_path: path.clone(),
        disasm: DisasmConfig::default(),
    };

    for _ in 0..2 {
        let session = PacketDebugSession::new(config.clone());
        assert_eq!(session.initialize(), LogStatus::Written);
        session.on_send(b"\x01login\x00");
        session.shutdown();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("PACKET DEBUG SESSION").count(), 2);
    assert_eq!(text.matches("char[6]: \"login\"").count(), 2);
    assert!(text.contains(&format!("  Log file: {}\n", path.display())));
}

/// An unopenable path leaves the session silently inactive.
#[test]
fn test_unopenable_path_is_silent() {
    let config = DebugConfig {
        log_path: "/nonexistent-packet-debug-dir/debug_packet.log".into(),
        disasm: DisasmConfig::default(),
    };
    let session = PacketDebugSession::new(config);
    assert_eq!(session.initialize(), LogStatus::Inactive);
    assert_eq!(session.on_send(&[1, 2, 3]), LogStatus::Inactive);
    assert_eq!(session.shutdown(), LogStatus::Inactive);
    assert!(!session.is_active());
}

/// Records from several threads never interleave.
#[test]
fn test_concurrent_records_stay_whole() {
    let (session, sink) = memory_session(PacketRegistry::new());
    let session = Arc::new(session);
    session.initialize();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let session = session.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    session.on_send(&[t as u8 + 2, b'x', b'y', b'z', 0]);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    session.shutdown();

    assert_eq!(session.counters().sent, 200);
    let text = sink.contents();
    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if line.starts_with(" SEND #") {
            assert_eq!(lines[i + 1], "       [001] char[4]: \"xyz\"");
        }
    }
    for n in 1..=200 {
        assert!(text.contains(&format!(" SEND #{} |", n)));
    }
}

/// Registered packets show their name and use their printer.
#[test]
fn test_registry_printers_in_log() {
    let mut registry = PacketRegistry::new();
    registry.register(Direction::Send, 0x10, "CG_CHAT", Printer::HexDump);
    registry.register(Direction::Recv, 0x11, "GC_PONG", Printer::HeaderOnly);
    let (session, sink) = memory_session(registry);
    session.initialize();

    session.on_send(&[0x10, 0xDE, 0xAD]);
    session.on_receive(&[0x11, 0x01, 0x02]);
    session.on_receive(&[0x12, b'o', b'k', b'!']);

    let text = sink.contents();
    assert!(text.contains("|     3 | CG_CHAT DE AD \n"));
    assert!(text.contains("|     3 | GC_PONG (header only)\n"));
    assert!(text.contains("|     4 |\n       [001] char[4]: \"ok!\"\n"));
}

/// Elapsed deltas follow the monotonic clock across directions.
#[test]
fn test_deltas_follow_clock() {
    let sink = MemorySink::new();
    let clock = Arc::new(ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(12, 0, 0, 0)
            .unwrap(),
    ));
    let session = PacketDebugSession::builder()
        .sink(SinkTarget::Memory(sink.clone()))
        .clock(clock.clone())
        .build();
    session.initialize();

    clock.advance(Duration::from_millis(1500));
    session.on_send(&[0x01]);
    clock.advance(Duration::from_millis(20));
    session.on_receive(&[0x02]);

    let text = sink.contents();
    assert!(text.contains(" SEND #1 | 12:00:01.500 |   1500 |"));
    assert!(text.contains(" RECV #2 | 12:00:01.520 |     20 |"));
}

/// Config files tune the disassembler; unknown settings keep defaults.
#[test]
fn test_config_file_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("capped.log");
    let config_path = dir.path().join("debug.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{"log_path": {:?}, "disasm": {{"max_fields": 2}}}}"#,
            log_path.display().to_string()
        ),
    )
    .unwrap();

    let config = DebugConfig::from_file(&config_path).unwrap();
    assert_eq!(config.disasm.max_fields, 2);
    assert_eq!(config.disasm.min_str_len, 3);

    let session = PacketDebugSession::new(config);
    session.initialize();
    session.on_send(&[0x09, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2]);
    session.shutdown();

    let text = std::fs::read_to_string(&log_path).unwrap();
    assert!(text.contains("       ... +2 more bytes\n"));
}

/// A registry file names packets per direction.
#[test]
fn test_registry_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("packets.json");
    std::fs::write(
        &path,
        r#"[
            {"direction": "send", "id": 1, "name": "CG_LOGIN"},
            {"direction": "recv", "id": 1, "name": "GC_LOGIN_OK", "printer": "header_only"}
        ]"#,
    )
    .unwrap();

    let registry = PacketRegistry::from_file(&path).unwrap();
    assert_eq!(registry.len(), 2);
    let (session, sink) = memory_session(registry);
    session.initialize();
    session.on_send(b"\x01abc\x00");
    session.on_receive(&[0x01, 0x00]);

    let text = sink.contents();
    assert!(text.contains("| CG_LOGIN\n       [001] char[4]: \"abc\"\n"));
    assert!(text.contains("| GC_LOGIN_OK (header only)\n"));
}
