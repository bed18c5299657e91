//! Configuration for the session log and the disassembler.
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides:
//!
//! ```
//! use packet_debug::config::DebugConfig;
//!
//! let config = DebugConfig::from_json(r#"{ "disasm": { "max_fields": 4 } }"#).unwrap();
//! assert_eq!(config.disasm.max_fields, 4);
//! assert_eq!(config.disasm.min_str_len, 3);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PacketDebugError, Result};

/// Minimum printable run treated as text.
pub const DEFAULT_MIN_STR_LEN: usize = 3;

/// Maximum fields rendered per packet.
pub const DEFAULT_MAX_FIELDS: usize = 16;

/// Longest null-terminated string the scanner will collect.
pub const DEFAULT_MAX_VAR_STR_LEN: usize = 64;

/// Log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "debug_packet.log";

/// Canonical fixed-size char array lengths, probed in ascending order.
pub const FIXED_STRING_SIZES: [usize; 13] = [13, 16, 17, 24, 25, 31, 32, 33, 48, 64, 65, 128, 256];

/// Plausibility bands used to accept numeric candidates.
///
/// These are tuned for small game-style protocols (coordinates, angles,
/// ids, counters). They are guesses, not protocol facts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Plausibility {
    /// Smallest accepted float magnitude.
    pub float_min: f32,
    /// Largest accepted float magnitude.
    pub float_max: f32,
    /// Hard magnitude limit checked before the band.
    pub float_abs_limit: f32,
    /// Negative i32 values must be strictly greater than this.
    pub i32_min_negative: i32,
    /// Unsigned u32 values must not exceed this.
    pub u32_max: u32,
    /// Negative i16 values must be strictly greater than this.
    pub i16_min_negative: i16,
    /// Unsigned u16 values must be strictly below this.
    pub u16_max_exclusive: u16,
}

impl Default for Plausibility {
    fn default() -> Self {
        Self {
            float_min: 0.0001,
            float_max: 100_000.0,
            float_abs_limit: 1e10,
            i32_min_negative: -100_000_000,
            u32_max: 0xF000_0000,
            i16_min_negative: -32_000,
            u16_max_exclusive: 0xFFF0,
        }
    }
}

/// Disassembler settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisasmConfig {
    /// Minimum printable run treated as a string.
    pub min_str_len: usize,
    /// Maximum field records per packet.
    pub max_fields: usize,
    /// Cap on a null-terminated string run.
    pub max_var_str_len: usize,
    /// Numeric acceptance bands.
    pub plausibility: Plausibility,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            min_str_len: DEFAULT_MIN_STR_LEN,
            max_fields: DEFAULT_MAX_FIELDS,
            max_var_str_len: DEFAULT_MAX_VAR_STR_LEN,
            plausibility: Plausibility::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Path of the append-only log file.
    pub log_path: PathBuf,
    /// Disassembler settings.
    pub disasm: DisasmConfig,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            disasm: DisasmConfig::default(),
        }
    }
}

impl DebugConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check that the values can drive the disassembler.
    pub fn validate(&self) -> Result<()> {
        let d = &self.disasm;
        if d.min_str_len == 0 {
            return Err(PacketDebugError::Config(
                "min_str_len must be at least 1".to_string(),
            ));
        }
        if d.max_fields == 0 {
            return Err(PacketDebugError::Config(
                "max_fields must be at least 1".to_string(),
            ));
        }
        if d.max_var_str_len < d.min_str_len {
            return Err(PacketDebugError::Config(format!(
                "max_var_str_len {} is below min_str_len {}",
                d.max_var_str_len, d.min_str_len
            )));
        }
        let p = &d.plausibility;
        if !(p.float_min >= 0.0 && p.float_min <= p.float_max) {
            return Err(PacketDebugError::Config(format!(
                "float band [{}, {}] is empty",
                p.float_min, p.float_max
            )));
        }
        if p.i32_min_negative >= 0 || p.i16_min_negative >= 0 {
            return Err(PacketDebugError::Config(
                "negative integer bounds must be below zero".to_string(),
            ));
        }
        Ok(())
    }
}
