//! Priority-ordered field classification.
//!
//! Each candidate is an independent predicate-plus-decode that either
//! claims the bytes at an offset or declines. [`classify_at`] tries them in
//! a fixed order and commits to the first match; the single-byte fallback
//! always matches, so every in-bounds offset yields a field.
//!
//! Order matters: text is tried before numbers, floats before integers,
//! wide integers before narrow ones.

use super::field::{FieldKind, FieldRecord, FieldValue};
use super::reader::{read_f32_at, read_i16_at, read_i32_at, read_u16_at, read_u32_at, read_u8_at};
use crate::config::{DisasmConfig, FIXED_STRING_SIZES};

/// A candidate classifier.
pub type Candidate = fn(&[u8], usize, &DisasmConfig) -> Option<FieldRecord>;

/// Candidates in priority order, excluding the byte fallback.
pub const CANDIDATES: [Candidate; 5] = [
    var_string,
    fixed_string,
    float32,
    int32,
    int16,
];

/// Printable ASCII, space through tilde.
#[inline]
pub fn is_printable(b: u8) -> bool {
    (32..127).contains(&b)
}

/// Classify the field starting at `offset`.
///
/// Returns `None` only when `offset` is at or past the end of `buf`.
pub fn classify_at(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    if offset >= buf.len() {
        return None;
    }
    CANDIDATES
        .iter()
        .find_map(|candidate| candidate(buf, offset, config))
        .or_else(|| byte(buf, offset))
}

/// Null-terminated printable run.
///
/// Accepted only when the run reaches `min_str_len` and stops at a NUL or
/// at the end of the buffer. The NUL is consumed with the string.
pub fn var_string(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    if !is_printable(*buf.get(offset)?) {
        return None;
    }
    let run = buf[offset..]
        .iter()
        .take(config.max_var_str_len)
        .take_while(|&&b| is_printable(b))
        .count();
    if run < config.min_str_len {
        return None;
    }

    let end = offset + run;
    let terminated = match buf.get(end) {
        None => false,
        Some(0) => true,
        Some(_) => return None,
    };

    let text = String::from_utf8_lossy(&buf[offset..end]).into_owned();
    let width = run + usize::from(terminated);
    Some(FieldRecord::new(
        offset,
        FieldKind::VarString,
        width,
        FieldValue::Text(text),
    ))
}

/// Char array of a canonical size, padded with NULs.
///
/// The smallest size whose region is entirely printable-or-NUL, holds at
/// least `min_str_len` printable bytes and at least one NUL wins.
pub fn fixed_string(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    let rest = buf.get(offset..)?;
    for &size in FIXED_STRING_SIZES.iter() {
        if size > rest.len() {
            break;
        }
        let region = &rest[..size];
        if is_padded_text(region, config.min_str_len) {
            let shown = region.iter().take_while(|&&b| b != 0).count();
            let text = String::from_utf8_lossy(&region[..shown]).into_owned();
            return Some(FieldRecord::new(
                offset,
                FieldKind::FixedString,
                size,
                FieldValue::Text(text),
            ));
        }
    }
    None
}

fn is_padded_text(region: &[u8], min_printable: usize) -> bool {
    let mut printable = 0usize;
    let mut nulls = 0usize;
    for &b in region {
        if is_printable(b) {
            printable += 1;
        } else if b == 0 {
            nulls += 1;
        } else {
            return false;
        }
    }
    printable >= min_printable && nulls > 0 && printable + nulls == region.len()
}

/// Little-endian f32 within the plausibility band.
pub fn float32(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    let value = read_f32_at(buf, offset)?;
    let p = &config.plausibility;
    if value.is_nan() || value == 0.0 {
        return None;
    }
    let magnitude = value.abs();
    if magnitude > p.float_abs_limit || magnitude < p.float_min || magnitude > p.float_max {
        return None;
    }
    Some(FieldRecord::new(
        offset,
        FieldKind::Float,
        4,
        FieldValue::Float(value),
    ))
}

/// 32-bit integer: small negatives as signed, sane positives as unsigned.
pub fn int32(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    let signed = read_i32_at(buf, offset)?;
    let unsigned = read_u32_at(buf, offset)?;
    let p = &config.plausibility;

    if signed < 0 && signed > p.i32_min_negative {
        return Some(FieldRecord::new(
            offset,
            FieldKind::Signed32,
            4,
            FieldValue::I32(signed),
        ));
    }
    if unsigned != 0 && unsigned != u32::MAX && unsigned <= p.u32_max {
        return Some(FieldRecord::new(
            offset,
            FieldKind::Unsigned32,
            4,
            FieldValue::U32(unsigned),
        ));
    }
    None
}

/// 16-bit integer, same rules as [`int32`] at half width.
pub fn int16(buf: &[u8], offset: usize, config: &DisasmConfig) -> Option<FieldRecord> {
    let signed = read_i16_at(buf, offset)?;
    let unsigned = read_u16_at(buf, offset)?;
    let p = &config.plausibility;

    if signed < 0 && signed > p.i16_min_negative {
        return Some(FieldRecord::new(
            offset,
            FieldKind::Signed16,
            2,
            FieldValue::I16(signed),
        ));
    }
    if unsigned > 0 && unsigned < p.u16_max_exclusive {
        return Some(FieldRecord::new(
            offset,
            FieldKind::Unsigned16,
            2,
            FieldValue::U16(unsigned),
        ));
    }
    None
}

/// Single byte; 0 and 1 read as booleans.
pub fn byte(buf: &[u8], offset: usize) -> Option<FieldRecord> {
    let value = read_u8_at(buf, offset)?;
    let kind = if value <= 1 {
        FieldKind::Bool
    } else {
        FieldKind::Byte
    };
    Some(FieldRecord::new(offset, kind, 1, FieldValue::U8(value)))
}
