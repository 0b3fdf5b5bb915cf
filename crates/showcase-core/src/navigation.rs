#![forbid(unsafe_code)]

//! Active-index state and its wrapping transitions.

use std::fmt;

/// Wrapping predecessor of `active` in a catalog of `len` records.
#[inline]
pub fn previous_index(active: usize, len: usize) -> usize {
    if active == 0 {
        len.saturating_sub(1)
    } else {
        active - 1
    }
}

/// Wrapping successor of `active` in a catalog of `len` records.
#[inline]
pub fn next_index(active: usize, len: usize) -> usize {
    if active + 1 >= len { 0 } else { active + 1 }
}

/// What caused an active-index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Scroll mapping recomputed the index.
    Scroll,
    /// Previous command.
    Previous,
    /// Next command.
    Next,
    /// Direct selection of an index.
    Jump,
}

impl fmt::Display for ChangeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeCause::Scroll => "scroll",
            ChangeCause::Previous => "previous",
            ChangeCause::Next => "next",
            ChangeCause::Jump => "jump",
        };
        f.write_str(name)
    }
}

/// The single mutable piece of the showcase.
///
/// `active < len` holds after every method. `generation` counts actual
/// changes and doubles as a redraw signal for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseState {
    active: usize,
    len: usize,
    generation: u64,
}

impl ShowcaseState {
    /// Fresh state at index 0 for a catalog of `len` records.
    ///
    /// `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "showcase needs at least one record");
        Self {
            active: 0,
            len,
            generation: 0,
        }
    }

    /// Currently active index.
    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of selectable indices.
    #[inline]
    pub fn catalog_len(&self) -> usize {
        self.len
    }

    /// Number of changes applied so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Step back, wrapping to the last index.
    pub fn previous(&mut self) -> bool {
        self.set(previous_index(self.active, self.len), ChangeCause::Previous)
    }

    /// Step forward, wrapping to 0.
    pub fn next(&mut self) -> bool {
        self.set(next_index(self.active, self.len), ChangeCause::Next)
    }

    /// Select `index` directly. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            crate::warn!(index, len = self.len, "ignoring out-of-range jump");
            return false;
        }
        self.set(index, ChangeCause::Jump)
    }

    /// Apply a scroll-mapped index. The mapping already clamps to `len - 1`.
    pub(crate) fn apply_scroll(&mut self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.set(index.min(self.len - 1), ChangeCause::Scroll)
    }

    /// Write `index` if it differs. Returns whether anything changed.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn set(&mut self, index: usize, cause: ChangeCause) -> bool {
        if index == self.active {
            return false;
        }
        crate::debug!(from = self.active, to = index, %cause, "active feature changed");
        self.active = index;
        self.generation += 1;
        true
    }
}
