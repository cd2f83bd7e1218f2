//! CellKey - bit-packed coordinate key
//!
//! Two signed 32-bit axes packed into one u64:
//!   high 32 bits = x (two's complement)
//!   low 32 bits  = y (two's complement)
//!
//! Encoding is exact and branch-free, so it is safe to call for every
//! neighbour lookup. The per-axis range is the `i32` range; wider values
//! must go through `checked_coord` / `cell_from_world` which reject instead
//! of wrapping.

use super::error::EngineError;

const SHIFT: u32 = 32;
const Y_MASK: u64 = 0xFFFF_FFFF;

/// Opaque lookup key for a cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u64);

impl CellKey {
    #[inline(always)]
    pub fn encode(x: i32, y: i32) -> Self {
        CellKey(((x as u32 as u64) << SHIFT) | (y as u32 as u64))
    }

    #[inline(always)]
    pub fn decode(self) -> (i32, i32) {
        let x = (self.0 >> SHIFT) as u32 as i32;
        let y = (self.0 & Y_MASK) as u32 as i32;
        (x, y)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        CellKey(raw)
    }
}

/// Narrow a wide integer coordinate to the codec range.
pub fn checked_coord(v: i64) -> Result<i32, EngineError> {
    i32::try_from(v).map_err(|_| EngineError::CoordinateOutOfRange(v as f64))
}

/// Floor a world-space position to its cell coordinate.
///
/// NaN/inf and anything outside the `i32` range are rejected.
pub fn cell_from_world(v: f64) -> Result<i32, EngineError> {
    if !v.is_finite() {
        return Err(EngineError::NonFiniteInput("world coordinate"));
    }
    let floored = v.floor();
    if floored < i32::MIN as f64 || floored > i32::MAX as f64 {
        return Err(EngineError::CoordinateOutOfRange(v));
    }
    Ok(floored as i32)
}

/// Offset a coordinate, returning None when the result leaves the codec range.
#[inline(always)]
pub fn offset(x: i32, y: i32, dx: i32, dy: i32) -> Option<(i32, i32)> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}
