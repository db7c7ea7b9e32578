//! Routed pages

mod listings;

pub use listings::*;
