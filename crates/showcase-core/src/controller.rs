#![forbid(unsafe_code)]

//! Showcase controller: owns the active index, reacts to scroll events, and
//! exposes navigation commands to the renderer.
//!
//! # Lifecycle
//!
//! ```text
//! Unattached --mount--> Attached --unmount/drop--> Detached
//!                          |  ^
//!                          +--+ scroll event: remap, never changes attachment
//! ```
//!
//! Mounting registers the controller with a [`ScrollEventSource`] and keeps
//! the returned [`Subscription`]. Unmounting (or dropping the controller)
//! releases it, so no scroll event reaches the controller afterwards.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::catalog::{Catalog, FeatureRecord};
use crate::geometry::{GeometryProvider, ScrollMetrics};
use crate::mapping::{ScrollMapping, map_scroll};
use crate::navigation::ShowcaseState;
use crate::scroll_source::{ListenerHandle, ScrollEventSource, ScrollListener, Subscription};
use crate::snapshot::ShowcaseSnapshot;

/// Attachment state of the scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Not yet mounted.
    Unattached,
    /// Receiving scroll events.
    Attached,
    /// Torn down; terminal.
    Detached,
}

/// Misuse of the mount/unmount protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// `mount` called while already attached.
    AlreadyMounted,
    /// `mount` called after teardown.
    TornDown,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::AlreadyMounted => write!(f, "showcase is already mounted"),
            LifecycleError::TornDown => write!(f, "showcase was unmounted and cannot remount"),
        }
    }
}

impl std::error::Error for LifecycleError {}

/// Result of handling one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// Geometry could not be measured; nothing happened.
    Unmeasured,
    /// Mapping ran; `changed` tells whether the active index moved.
    Mapped {
        mapping: ScrollMapping,
        changed: bool,
    },
}

impl ScrollOutcome {
    /// Whether the active index moved.
    pub fn changed(&self) -> bool {
        matches!(self, ScrollOutcome::Mapped { changed: true, .. })
    }
}

/// Catalog, state, and geometry source. Shared between the controller and
/// its registered listener.
struct Showcase<P> {
    catalog: Catalog,
    state: ShowcaseState,
    geometry: P,
}

impl<P: GeometryProvider> Showcase<P> {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn apply_metrics(&mut self, metrics: &ScrollMetrics) -> ScrollOutcome {
        let mapping = map_scroll(metrics, self.catalog.len());
        let changed = match mapping {
            ScrollMapping::Index(index) => self.state.apply_scroll(index),
            ScrollMapping::Disengaged => {
                crate::trace!(top = metrics.section_top, "scroll outside engaged window");
                false
            }
            ScrollMapping::Rejected(reason) => {
                crate::warn!(
                    ?reason,
                    top = metrics.section_top,
                    height = metrics.section_height,
                    viewport = metrics.viewport_height,
                    "scroll geometry produced no valid index"
                );
                false
            }
        };
        ScrollOutcome::Mapped { mapping, changed }
    }

    fn handle_scroll(&mut self) -> ScrollOutcome {
        match self.geometry.scroll_metrics() {
            Some(metrics) => self.apply_metrics(&metrics),
            None => {
                crate::trace!("scroll geometry unavailable");
                ScrollOutcome::Unmeasured
            }
        }
    }
}

impl<P: GeometryProvider> ScrollListener for Showcase<P> {
    fn on_scroll(&mut self) {
        self.handle_scroll();
    }
}

/// The scroll-driven feature carousel.
///
/// Single-threaded. All reads and writes go through `&self`/`&mut self` on
/// the host's event loop.
pub struct ShowcaseController<P: GeometryProvider + 'static> {
    inner: Rc<RefCell<Showcase<P>>>,
    subscription: Option<Subscription>,
    listener: ListenerState,
}

impl<P: GeometryProvider + 'static> fmt::Debug for ShowcaseController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ShowcaseController")
            .field("active", &inner.state.active())
            .field("generation", &inner.state.generation())
            .field("records", &inner.catalog.len())
            .field("listener", &self.listener)
            .finish()
    }
}

impl<P: GeometryProvider + 'static> ShowcaseController<P> {
    /// Create an unmounted controller at index 0.
    pub fn new(catalog: Catalog, geometry: P) -> Self {
        let state = ShowcaseState::new(catalog.len());
        Self {
            inner: Rc::new(RefCell::new(Showcase {
                catalog,
                state,
                geometry,
            })),
            subscription: None,
            listener: ListenerState::Unattached,
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Start listening to `source`.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::AlreadyMounted`] if attached,
    /// [`LifecycleError::TornDown`] after [`unmount`](Self::unmount).
    pub fn mount(&mut self, source: &ScrollEventSource) -> Result<(), LifecycleError> {
        match self.listener {
            ListenerState::Attached => return Err(LifecycleError::AlreadyMounted),
            ListenerState::Detached => return Err(LifecycleError::TornDown),
            ListenerState::Unattached => {}
        }
        let handle: ListenerHandle = self.inner.clone();
        let subscription = source.subscribe(handle);
        crate::debug!(listener_id = subscription.id(), "showcase mounted");
        self.subscription = Some(subscription);
        self.listener = ListenerState::Attached;
        Ok(())
    }

    /// Stop listening. A second call is a no-op.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            crate::debug!(listener_id = subscription.id(), "showcase unmounted");
            subscription.cancel();
        }
        if self.listener == ListenerState::Attached {
            self.listener = ListenerState::Detached;
        }
    }

    /// Current attachment state.
    pub fn listener_state(&self) -> ListenerState {
        self.listener
    }

    /// Whether scroll events currently reach this controller.
    pub fn is_mounted(&self) -> bool {
        self.listener == ListenerState::Attached
    }

    // ── Scroll ──────────────────────────────────────────────────────────

    /// Run the scroll mapping against the current geometry, as a
    /// dispatched event would. Ignored unless mounted.
    pub fn handle_scroll(&mut self) -> Option<ScrollOutcome> {
        if !self.is_mounted() {
            return None;
        }
        Some(self.inner.borrow_mut().handle_scroll())
    }

    /// Run the mapping against explicit metrics. Ignored unless mounted.
    pub fn apply_metrics(&mut self, metrics: &ScrollMetrics) -> Option<ScrollOutcome> {
        if !self.is_mounted() {
            return None;
        }
        Some(self.inner.borrow_mut().apply_metrics(metrics))
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Step back, wrapping from the first record to the last.
    pub fn previous(&mut self) -> bool {
        self.inner.borrow_mut().state.previous()
    }

    /// Step forward, wrapping from the last record to the first.
    pub fn next(&mut self) -> bool {
        self.inner.borrow_mut().state.next()
    }

    /// Select a record by index. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.inner.borrow_mut().state.jump_to(index)
    }

    /// Select a record by id. Unknown ids are ignored.
    pub fn jump_to_id(&mut self, id: u32) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.catalog.position_of(id) {
            Some(index) => inner.state.jump_to(index),
            None => {
                crate::warn!(id, "ignoring jump to unknown feature id");
                false
            }
        }
    }

    // ── Read side ───────────────────────────────────────────────────────

    /// Active index.
    pub fn active(&self) -> usize {
        self.inner.borrow().state.active()
    }

    /// Change counter; compare against the last drawn value to decide on a
    /// redraw.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().state.generation()
    }

    /// The active record.
    pub fn active_record(&self) -> Ref<'_, FeatureRecord> {
        Ref::map(self.inner.borrow(), |s| &s.catalog[s.state.active()])
    }

    /// Borrow the catalog.
    pub fn catalog(&self) -> Ref<'_, Catalog> {
        Ref::map(self.inner.borrow(), |s| &s.catalog)
    }

    /// Everything a renderer needs for one frame.
    pub fn snapshot(&self) -> ShowcaseSnapshot {
        let inner = self.inner.borrow();
        ShowcaseSnapshot::capture(&inner.catalog, &inner.state)
    }
}

impl<P: GeometryProvider + 'static> Drop for ShowcaseController<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}
