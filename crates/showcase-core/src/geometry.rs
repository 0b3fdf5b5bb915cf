#![forbid(unsafe_code)]

//! Scroll geometry and the provider seam through which it is queried.

/// Geometry of the wrapper section relative to the viewport, sampled at
/// event time. Never stored.
///
/// Uses viewport coordinates: `section_top` is the distance from the
/// viewport's top edge to the section's top edge, negative once the section
/// has scrolled past the top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Top edge of the section relative to the viewport top.
    pub section_top: f64,
    /// Full height of the section.
    pub section_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Create a new metrics sample.
    #[inline]
    pub const fn new(section_top: f64, section_height: f64, viewport_height: f64) -> Self {
        Self {
            section_top,
            section_height,
            viewport_height,
        }
    }

    /// Bottom edge of the section relative to the viewport top.
    #[inline]
    pub fn section_bottom(&self) -> f64 {
        self.section_top + self.section_height
    }

    /// Vertical midpoint of the viewport.
    #[inline]
    pub fn viewport_midpoint(&self) -> f64 {
        self.viewport_height / 2.0
    }
}

/// Read-only source of the current scroll geometry.
///
/// Returns `None` when the section cannot be measured yet (not laid out,
/// detached). Callers treat that as a skipped event, not a failure.
pub trait GeometryProvider {
    /// Sample the geometry as of now.
    fn scroll_metrics(&self) -> Option<ScrollMetrics>;
}

impl<F> GeometryProvider for F
where
    F: Fn() -> Option<ScrollMetrics>,
{
    fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        self()
    }
}

/// A provider that always reports the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedGeometry(pub Option<ScrollMetrics>);

impl GeometryProvider for FixedGeometry {
    fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        self.0
    }
}
