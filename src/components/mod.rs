//! Reusable UI components

mod layout;
mod listing_form;

pub use layout::*;
pub use listing_form::*;
