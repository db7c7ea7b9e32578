//! Marketplace Listings - Dioxus Web Application
//!
//! A browser-based form for creating and editing marketplace listings
//! (sale, rental, or auction). There is no backend in this repository:
//! reference data is supplied by the hosting page and submission goes
//! through an injected callback.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release
//! ```

#![allow(non_snake_case)]

mod app;
mod components;
mod form;
mod pages;
mod routes;
mod submit;
mod types;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    dioxus::launch(app::App);
}
