//! Header-id table mapping each direction's packet ids to names and printers.
//!
//! # Example
//!
//! ```
//! use packet_debug::registry::{PacketRegistry, Printer};
//! use packet_debug::Direction;
//!
//! let mut registry = PacketRegistry::new();
//! registry.register(Direction::Send, 0x06, "CG_MOVE", Printer::Heuristic);
//! registry.register(Direction::Recv, 0x06, "GC_CHAT", Printer::HexDump);
//!
//! assert_eq!(registry.name(Direction::Send, 0x06), Some("CG_MOVE"));
//! assert_eq!(registry.name(Direction::Recv, 0x06), Some("GC_CHAT"));
//! assert_eq!(registry.len(), 2);
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::printer::{Printer, PrinterName};
use crate::disasm::Disassembler;
use crate::error::Result;
use crate::session::Direction;

/// A registered packet.
#[derive(Debug, Clone)]
pub struct PacketEntry {
    /// Short display name, e.g. `CG_MOVE`.
    pub name: String,
    /// Content printer.
    pub printer: Printer,
}

impl PacketEntry {
    /// Render the CONTENT column: the name, then the printer's output.
    pub fn render(&self, buf: &[u8], disassembler: &Disassembler) -> String {
        format!(" {}{}", self.name, self.printer.render(buf, disassembler))
    }
}

/// One entry of a JSON registry file.
#[derive(Debug, Deserialize)]
struct EntryRow {
    direction: Direction,
    id: u8,
    name: String,
    #[serde(default)]
    printer: PrinterName,
}

/// Registry keyed by direction and header id.
///
/// Outbound and inbound ids are separate namespaces.
#[derive(Debug, Clone, Default)]
pub struct PacketRegistry {
    entries: HashMap<(Direction, u8), PacketEntry>,
}

impl PacketRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a packet, replacing any previous entry for the same key.
    ///
    /// Returns the replaced entry.
    pub fn register(
        &mut self,
        direction: Direction,
        header_id: u8,
        name: &str,
        printer: Printer,
    ) -> Option<PacketEntry> {
        let previous = self.entries.insert(
            (direction, header_id),
            PacketEntry {
                name: name.to_string(),
                printer,
            },
        );
        if let Some(old) = &previous {
            tracing::debug!(
                "Replaced {} header {} ({} -> {})",
                direction.tag(),
                header_id,
                old.name,
                name
            );
        }
        previous
    }

    /// Look up an entry.
    pub fn lookup(&self, direction: Direction, header_id: u8) -> Option<&PacketEntry> {
        self.entries.get(&(direction, header_id))
    }

    /// Look up only the name.
    pub fn name(&self, direction: Direction, header_id: u8) -> Option<&str> {
        self.lookup(direction, header_id).map(|e| e.name.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load entries from a JSON array:
    /// `[{"direction": "send", "id": 6, "name": "CG_MOVE", "printer": "hex_dump"}]`.
    ///
    /// `printer` is optional and defaults to `heuristic`.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<EntryRow> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for row in rows {
            registry.register(row.direction, row.id, &row.name, row.printer.into());
        }
        Ok(registry)
    }

    /// Read a JSON registry file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PacketRegistry::new();
        assert!(registry.is_empty());

        registry.register(Direction::Send, 1, "CG_LOGIN", Printer::Heuristic);

        assert_eq!(registry.name(Direction::Send, 1), Some("CG_LOGIN"));
        assert!(registry.lookup(Direction::Recv, 1).is_none());
        assert!(registry.lookup(Direction::Send, 2).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = PacketRegistry::new();
        assert!(registry
            .register(Direction::Recv, 9, "GC_OLD", Printer::HexDump)
            .is_none());
        let old = registry
            .register(Direction::Recv, 9, "GC_NEW", Printer::HeaderOnly)
            .unwrap();
        assert_eq!(old.name, "GC_OLD");
        assert_eq!(registry.name(Direction::Recv, 9), Some("GC_NEW"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_entry_render() {
        let entry = PacketEntry {
            name: "GC_PING".to_string(),
            printer: Printer::HeaderOnly,
        };
        assert_eq!(
            entry.render(&[0x2C], &Disassembler::default()),
            " GC_PING (header only)\n"
        );
    }

    #[test]
    fn test_from_json() {
        let registry = PacketRegistry::from_json(
            r#"[
                {"direction": "send", "id": 6, "name": "CG_MOVE"},
                {"direction": "recv", "id": 6, "name": "GC_MOVE", "printer": "hex_dump"},
                {"direction": "recv", "id": 44, "name": "GC_PING", "printer": "header_only"}
            ]"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 3);
        assert!(matches!(
            registry.lookup(Direction::Send, 6).unwrap().printer,
            Printer::Heuristic
        ));
        assert!(matches!(
            registry.lookup(Direction::Recv, 6).unwrap().printer,
            Printer::HexDump
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_id() {
        assert!(PacketRegistry::from_json(r#"[{"direction": "send", "id": 300, "name": "X"}]"#).is_err());
    }
}
