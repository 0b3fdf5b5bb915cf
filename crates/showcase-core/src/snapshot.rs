#![forbid(unsafe_code)]

//! Render-ready view of the showcase.

use crate::catalog::{Catalog, FeatureRecord};
use crate::navigation::ShowcaseState;

/// One entry of the selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLabel {
    /// Catalog index, suitable for `jump_to`.
    pub index: usize,
    /// Record id.
    pub id: u32,
    /// Label text.
    pub title: String,
    /// Whether this entry carries the selection marker.
    pub selected: bool,
}

/// Owned copy of what a renderer draws for one frame: the selected feature
/// and the label list with a marker on the selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseSnapshot {
    /// Active index.
    pub active: usize,
    /// Change counter at capture time.
    pub generation: u64,
    /// The selected record.
    pub selected: FeatureRecord,
    /// All labels in catalog order.
    pub labels: Vec<FeatureLabel>,
}

impl ShowcaseSnapshot {
    pub(crate) fn capture(catalog: &Catalog, state: &ShowcaseState) -> Self {
        let active = state.active();
        let labels = catalog
            .iter()
            .enumerate()
            .map(|(index, record)| FeatureLabel {
                index,
                id: record.id,
                title: record.title.clone(),
                selected: index == active,
            })
            .collect();
        Self {
            active,
            generation: state.generation(),
            selected: catalog[active].clone(),
            labels,
        }
    }

    /// Position of the selection as `(1-based, total)`.
    pub fn position(&self) -> (usize, usize) {
        (self.active + 1, self.labels.len())
    }
}
