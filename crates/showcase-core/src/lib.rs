#![forbid(unsafe_code)]

//! Showcase core: feature catalog, scroll-to-index mapping, wrapping
//! navigation, and the scroll listener lifecycle.
//!
//! The renderer owns a [`ScrollEventSource`], mounts a
//! [`ShowcaseController`] against it, dispatches an event whenever the page
//! scrolls, and redraws when [`ShowcaseController::generation`] changes.
//!
//! ```
//! use showcase_core::{Catalog, ScrollEventSource, ScrollMetrics, ShowcaseController};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let top = Rc::new(Cell::new(0.0));
//! let reader = Rc::clone(&top);
//! let geometry = move || Some(ScrollMetrics::new(reader.get(), 4000.0, 1000.0));
//!
//! let source = ScrollEventSource::new();
//! let mut showcase = ShowcaseController::new(Catalog::builtin(), geometry);
//! showcase.mount(&source).unwrap();
//!
//! top.set(-2000.0);
//! source.dispatch();
//! assert_eq!(showcase.active(), 3);
//!
//! showcase.next();
//! assert_eq!(showcase.active(), 4);
//! ```

pub mod catalog;
pub mod controller;
pub mod geometry;
pub mod logging;
pub mod mapping;
pub mod navigation;
pub mod scroll_source;
pub mod snapshot;

pub use catalog::{Catalog, CatalogError, CatalogResult, FeatureRecord};
pub use controller::{LifecycleError, ListenerState, ScrollOutcome, ShowcaseController};
pub use geometry::{FixedGeometry, GeometryProvider, ScrollMetrics};
pub use mapping::{RejectReason, ScrollMapping, map_scroll};
pub use navigation::{ChangeCause, ShowcaseState};
pub use scroll_source::{ScrollEventSource, ScrollListener, Subscription};
pub use snapshot::{FeatureLabel, ShowcaseSnapshot};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
