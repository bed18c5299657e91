//! Bounds-checked little-endian readers.
//!
//! Each reader returns `None` when fewer bytes than the decoded width
//! remain at `offset`, so callers never index past the buffer.
//!
//! ```
//! use packet_debug::disasm::reader::{read_u16_at, read_f32_at};
//!
//! let buf = [0x10, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F];
//! assert_eq!(read_u16_at(&buf, 1), Some(0x1234));
//! assert_eq!(read_f32_at(&buf, 3), Some(1.0));
//! assert_eq!(read_u16_at(&buf, 6), None);
//! ```

/// Take exactly `N` bytes starting at `offset`.
#[inline]
fn take<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    let slice = buf.get(offset..end)?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Some(out)
}

/// Number of bytes left from `offset` to the end (0 if past the end).
#[inline]
pub fn remaining(buf: &[u8], offset: usize) -> usize {
    buf.len().saturating_sub(offset)
}

/// Read a byte.
#[inline]
pub fn read_u8_at(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

/// Read a little-endian u16.
#[inline]
pub fn read_u16_at(buf: &[u8], offset: usize) -> Option<u16> {
    take::<2>(buf, offset).map(u16::from_le_bytes)
}

/// Read a little-endian i16.
#[inline]
pub fn read_i16_at(buf: &[u8], offset: usize) -> Option<i16> {
    take::<2>(buf, offset).map(i16::from_le_bytes)
}

/// Read a little-endian u32.
#[inline]
pub fn read_u32_at(buf: &[u8], offset: usize) -> Option<u32> {
    take::<4>(buf, offset).map(u32::from_le_bytes)
}

/// Read a little-endian i32.
#[inline]
pub fn read_i32_at(buf: &[u8], offset: usize) -> Option<i32> {
    take::<4>(buf, offset).map(i32::from_le_bytes)
}

/// Read a little-endian IEEE-754 single.
#[inline]
pub fn read_f32_at(buf: &[u8], offset: usize) -> Option<f32> {
    take::<4>(buf, offset).map(f32::from_le_bytes)
}
