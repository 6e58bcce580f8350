//! Millisecond↔pixel mapping under zoom.
//!
//! All timeline geometry goes through one mapper so that rendering, hit
//! testing, and drag math can never disagree about where a millisecond sits
//! on screen. The zoom level (`range`) is owned by the caller; the mapper is
//! a pure conversion and holds no other state.

use serde::{Deserialize, Serialize};

/// Converts between absolute milliseconds and horizontal pixels at a given
/// zoom level.
///
/// One millisecond maps to `range / 20` pixels. Across the zoom window the
/// editor actually uses (`2.0..=20.0`) the two conversions are mutual
/// inverses within ±1px / ±5ms; outside it one direction's rounding step
/// exceeds the other's resolution and the bound widens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeMapper {
    range: f64,
}

impl TimeMapper {
    /// Smallest accepted zoom level. Guards the division; callers clamp
    /// their zoom UI well above this.
    pub const MIN_RANGE: f64 = 0.05;

    /// Create a mapper for the given zoom level.
    pub fn new(range: f64) -> Self {
        Self {
            range: range.max(Self::MIN_RANGE),
        }
    }

    /// The zoom level this mapper was built with.
    #[inline]
    pub fn range(&self) -> f64 {
        self.range
    }

    #[inline]
    fn px_per_ms(&self) -> f64 {
        // ms/5 · (range/4)
        self.range / 20.0
    }

    /// Convert milliseconds to pixels, rounded to the nearest pixel.
    #[inline]
    pub fn ms_to_px(&self, ms: i64) -> i64 {
        (ms as f64 * self.px_per_ms()).round() as i64
    }

    /// Convert pixels to milliseconds, rounded to the nearest millisecond.
    #[inline]
    pub fn px_to_ms(&self, px: i64) -> i64 {
        (px as f64 / self.px_per_ms()).round() as i64
    }

    /// Float-pixel variant for painting (no rounding).
    #[inline]
    pub fn ms_to_px_f(&self, ms: i64) -> f32 {
        (ms as f64 * self.px_per_ms()) as f32
    }

    /// Float-pixel inverse for cursor positions.
    #[inline]
    pub fn px_f_to_ms(&self, px: f32) -> i64 {
        (px as f64 / self.px_per_ms()).round() as i64
    }
}

impl Default for TimeMapper {
    fn default() -> Self {
        Self::new(4.0)
    }
}
