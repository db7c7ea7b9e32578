//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::LayoutWrapper;
use crate::pages::Listings;

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(LayoutWrapper)]
        #[route("/")]
        Listings {},
}
