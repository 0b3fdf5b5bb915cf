#![forbid(unsafe_code)]

//! Terminal host for the feature showcase.
//!
//! Simulates a scrolling page in the terminal, mounts a
//! [`showcase_core::ShowcaseController`] against it, and renders the active
//! feature with its label list.

pub mod app;
pub mod cli;
pub mod input;
pub mod logging;
pub mod page;
pub mod terminal;
pub mod view;

use std::path::Path;

use showcase_core::{Catalog, CatalogResult};

/// Load the catalog named on the command line, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> CatalogResult<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_json_file(path)?;
            tracing::info!(path = %path.display(), records = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}
