#![forbid(unsafe_code)]

//! Simulated document hosting the showcase section.
//!
//! ```text
//! ┌──────────────┐  offset 0
//! │ intro        │  one viewport tall
//! ├──────────────┤
//! │ showcase     │  `section_screens` viewports tall
//! │ section      │
//! ├──────────────┤
//! │ outro        │  one viewport tall
//! └──────────────┘
//! ```
//!
//! All distances are terminal rows. The scroll offset is clamped to
//! `[0, document_height - viewport_rows]`.

use std::cell::RefCell;
use std::rc::Rc;

use showcase_core::mapping::{is_engaged, scroll_progress};
use showcase_core::{GeometryProvider, ScrollMetrics};

/// Scrollable page geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPage {
    viewport_rows: u16,
    section_screens: u16,
    offset: u32,
}

impl VirtualPage {
    /// Create a page scrolled to the top.
    pub fn new(viewport_rows: u16, section_screens: u16) -> Self {
        Self {
            viewport_rows,
            section_screens: section_screens.max(1),
            offset: 0,
        }
    }

    /// Rows above the section.
    pub fn intro_height(&self) -> u32 {
        u32::from(self.viewport_rows)
    }

    /// Height of the showcase section.
    pub fn section_height(&self) -> u32 {
        u32::from(self.viewport_rows) * u32::from(self.section_screens)
    }

    /// Total document height.
    pub fn document_height(&self) -> u32 {
        self.intro_height() + self.section_height() + u32::from(self.viewport_rows)
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> u32 {
        self.document_height()
            .saturating_sub(u32::from(self.viewport_rows))
    }

    /// Current scroll offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Viewport height in rows.
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Scroll by `delta` rows. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = i64::from(self.offset) + i64::from(delta);
        let clamped = target.clamp(0, i64::from(self.max_offset())) as u32;
        self.set_offset(clamped)
    }

    /// Jump to the top of the document.
    pub fn scroll_to_start(&mut self) -> bool {
        self.set_offset(0)
    }

    /// Jump to the bottom of the document.
    pub fn scroll_to_end(&mut self) -> bool {
        let end = self.max_offset();
        self.set_offset(end)
    }

    /// Adopt a new viewport height, keeping the offset in range.
    pub fn resize(&mut self, viewport_rows: u16) {
        self.viewport_rows = viewport_rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Section geometry relative to the viewport, or `None` before the
    /// terminal has reported a size.
    pub fn metrics(&self) -> Option<ScrollMetrics> {
        if self.viewport_rows == 0 {
            return None;
        }
        Some(ScrollMetrics::new(
            f64::from(self.intro_height()) - f64::from(self.offset),
            f64::from(self.section_height()),
            f64::from(self.viewport_rows),
        ))
    }

    /// Summary for the status line.
    pub fn status(&self) -> PageStatus {
        let metrics = self.metrics();
        PageStatus {
            offset: self.offset,
            max_offset: self.max_offset(),
            engaged: metrics.as_ref().is_some_and(is_engaged),
            progress: metrics.as_ref().filter(|m| is_engaged(m)).map(scroll_progress),
        }
    }

    fn set_offset(&mut self, offset: u32) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }
}

/// Scroll position summary for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStatus {
    /// Current offset in rows.
    pub offset: u32,
    /// Maximum offset in rows.
    pub max_offset: u32,
    /// Whether the section is in its engaged window.
    pub engaged: bool,
    /// Scroll progress through the section, when engaged.
    pub progress: Option<f64>,
}

impl PageStatus {
    /// Document position as a whole percentage.
    pub fn percent(&self) -> u32 {
        if self.max_offset == 0 {
            return 0;
        }
        ((u64::from(self.offset) * 100) / u64::from(self.max_offset)) as u32
    }
}

/// Shared handle to the page, read by the geometry provider and written by
/// the input loop.
pub type SharedPage = Rc<RefCell<VirtualPage>>;

/// [`GeometryProvider`] backed by a [`SharedPage`].
#[derive(Debug, Clone)]
pub struct PageGeometry(pub SharedPage);

impl GeometryProvider for PageGeometry {
    fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        self.0.try_borrow().ok().and_then(|page| page.metrics())
    }
}
