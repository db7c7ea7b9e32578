//! Framework-free form core
//!
//! Draft state, validation, and payload normalization live here so they can
//! be exercised without a renderer. The Dioxus component layer in
//! `components::listing_form` is a thin binding over this module.

mod controller;
mod normalize;
mod validate;

pub use controller::*;
pub use normalize::*;
pub use validate::*;
