#![forbid(unsafe_code)]

//! Scroll position to catalog index mapping.
//!
//! The wrapper section is engaged while its top edge is at or above the
//! viewport top and its bottom edge is still below the viewport midpoint.
//! While engaged:
//!
//! ```text
//! progress  = (viewport_height - section_top) / (section_height + viewport_height)
//! raw_index = floor(progress * len)
//! index     = min(len - 1, raw_index)
//! ```
//!
//! There is no lower clamp. A negative `raw_index` (only reachable with
//! degenerate geometry) is reported as [`ScrollMapping::Rejected`] instead of
//! being folded into range.

use crate::geometry::ScrollMetrics;

/// Why an engaged sample did not produce an index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// `section_height + viewport_height` is zero or the result is NaN/infinite.
    NonFiniteProgress,
    /// `floor(progress * len)` fell below zero.
    NegativeIndex(i64),
}

/// Outcome of mapping one scroll sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollMapping {
    /// Outside the engaged window; state must not change.
    Disengaged,
    /// Target index, already clamped to `len - 1`.
    Index(usize),
    /// Engaged, but the geometry cannot yield a valid index.
    Rejected(RejectReason),
}

impl ScrollMapping {
    /// The mapped index, if any.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            ScrollMapping::Index(i) => Some(i),
            _ => None,
        }
    }
}

/// Whether the section is inside the engaged window.
#[inline]
pub fn is_engaged(metrics: &ScrollMetrics) -> bool {
    metrics.section_top <= 0.0 && metrics.section_bottom() > metrics.viewport_midpoint()
}

/// Normalized progress through the section; roughly 0 when just engaged,
/// approaching and passing 1 near the end.
#[inline]
pub fn scroll_progress(metrics: &ScrollMetrics) -> f64 {
    (metrics.viewport_height - metrics.section_top)
        / (metrics.section_height + metrics.viewport_height)
}

/// Unclamped index for a progress value, or `None` if progress is not finite.
#[inline]
pub fn raw_index(progress: f64, len: usize) -> Option<i64> {
    let scaled = (progress * len as f64).floor();
    scaled.is_finite().then_some(scaled as i64)
}

/// Map a scroll sample onto a catalog of `len` records.
///
/// `len` must be non-zero.
pub fn map_scroll(metrics: &ScrollMetrics, len: usize) -> ScrollMapping {
    debug_assert!(len > 0, "catalog length must be non-zero");
    if !is_engaged(metrics) {
        return ScrollMapping::Disengaged;
    }

    let progress = scroll_progress(metrics);
    let Some(raw) = raw_index(progress, len) else {
        return ScrollMapping::Rejected(RejectReason::NonFiniteProgress);
    };
    match clamp_index(raw, len) {
        Ok(index) => ScrollMapping::Index(index),
        Err(reason) => ScrollMapping::Rejected(reason),
    }
}

/// Apply the upper clamp `min(len - 1, raw)`. Negative values are rejected.
#[inline]
pub fn clamp_index(raw: i64, len: usize) -> Result<usize, RejectReason> {
    let last = len.saturating_sub(1);
    match usize::try_from(raw) {
        Ok(r) => Ok(r.min(last)),
        Err(_) => Err(RejectReason::NegativeIndex(raw)),
    }
}
