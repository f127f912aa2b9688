//! Hand-authored levels and the validated catalog.
//!
//! Every level entering a catalog is run through the solver; a level the
//! solver cannot finish within its bounds is rejected at load time rather
//! than discovered mid-play.

pub mod builtin;
pub mod catalog;

pub use builtin::campaign;
pub use catalog::{CatalogEntry, CatalogError, LevelCatalog};
