//! Page layout shell
//!
//! Wraps routed content in the shared frame. Pure composition, no logic.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn LayoutWrapper() -> Element {
    rsx! {
        div {
            class: "min-h-screen bg-gray-100",

            header {
                class: "bg-white border-b border-gray-200",
                div {
                    class: "max-w-4xl mx-auto px-4 py-4",
                    h1 { class: "text-xl font-semibold text-gray-900", "Marketplace" }
                }
            }

            main {
                class: "py-8",
                Outlet::<Route> {}
            }
        }
    }
}
