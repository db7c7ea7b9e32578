//! Listing management page
//!
//! Hosts the listing form: supplies the reference-data tables and the edit
//! target, and injects the submission callback. The submitter here is a
//! stand-in that logs the payload and resolves; a real deployment swaps in
//! one that talks to the marketplace backend.

use dioxus::prelude::*;

use crate::components::ListingForm;
use crate::submit::{ImageResolver, SubmitError, SubmitHandler};
use crate::types::{
    AttributeKey, AttributePair, AttributeValue, Category, Condition, DeliveryMode, GeoPoint,
    Listing, ListingDetails, ListingPayload, ReferenceData, SellDetails, Subcategory,
};

/// Listing management page
#[component]
pub fn Listings() -> Element {
    let mut show_form = use_signal(|| true);
    let mut edit_target = use_signal(|| None::<Listing>);

    let submit_handler = use_hook(|| SubmitHandler::new(submit_listing));
    // This demo keeps file names as-is; a real deployment resolves them to
    // blob or CDN URLs here.
    let image_resolver = use_hook(ImageResolver::passthrough);

    let reference = mock_reference_data();

    rsx! {
        if show_form() {
            ListingForm {
                listing: edit_target(),
                reference,
                on_submit: submit_handler,
                resolve_images: image_resolver,
                on_saved: move |_| {
                    show_form.set(false);
                    edit_target.set(None);
                },
                on_cancel: move |_| {
                    show_form.set(false);
                    edit_target.set(None);
                },
                on_image_released: move |reference: String| {
                    tracing::debug!(%reference, "image reference released");
                },
            }
        } else {
            div {
                class: "max-w-4xl mx-auto p-6 text-center",
                h2 { class: "text-2xl font-bold text-gray-900 mb-4", "Listing Management" }
                div {
                    class: "space-x-4",
                    button {
                        class: "px-6 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700",
                        onclick: move |_| {
                            edit_target.set(None);
                            show_form.set(true);
                        },
                        "Create New Listing"
                    }
                    button {
                        class: "px-6 py-2 bg-green-600 text-white rounded-md hover:bg-green-700",
                        onclick: move |_| {
                            edit_target.set(Some(sample_listing()));
                            show_form.set(true);
                        },
                        "Edit Sample Listing"
                    }
                }
            }
        }
    }
}

/// Stand-in submission callback: logs the normalized payload and succeeds.
async fn submit_listing(payload: ListingPayload) -> Result<(), SubmitError> {
    record_listing(&payload).map_err(|err| SubmitError::new(err.to_string()))
}

fn record_listing(payload: &ListingPayload) -> anyhow::Result<()> {
    let body = serde_json::to_string(payload)?;
    tracing::info!(listing = %body, "submitting listing");
    Ok(())
}

fn mock_reference_data() -> ReferenceData {
    let category = |id: &str, name: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
    };
    let subcategory = |id: &str, name: &str, parent_id: &str| Subcategory {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: parent_id.to_string(),
    };
    let key = |id: &str, name: &str| AttributeKey {
        id: id.to_string(),
        name: name.to_string(),
    };
    let value = |id: &str, key_id: &str, value: &str| AttributeValue {
        id: id.to_string(),
        key_id: key_id.to_string(),
        value: value.to_string(),
    };

    ReferenceData {
        categories: vec![
            category("1", "Electronics"),
            category("2", "Clothing"),
            category("3", "Home & Garden"),
        ],
        subcategories: vec![
            subcategory("11", "Smartphones", "1"),
            subcategory("12", "Laptops", "1"),
            subcategory("21", "Men's Clothing", "2"),
            subcategory("22", "Women's Clothing", "2"),
            subcategory("31", "Furniture", "3"),
            subcategory("32", "Garden Tools", "3"),
        ],
        attribute_keys: vec![
            key("k1", "Brand"),
            key("k2", "Color"),
            key("k3", "Size"),
            key("k4", "Material"),
        ],
        attribute_values: vec![
            value("v1", "k1", "Apple"),
            value("v2", "k1", "Samsung"),
            value("v3", "k1", "Sony"),
            value("v4", "k2", "Red"),
            value("v5", "k2", "Blue"),
            value("v6", "k2", "Black"),
            value("v7", "k3", "Small"),
            value("v8", "k3", "Medium"),
            value("v9", "k3", "Large"),
            value("v10", "k4", "Cotton"),
            value("v11", "k4", "Polyester"),
            value("v12", "k4", "Leather"),
        ],
    }
}

/// Canned record for exercising the edit path.
fn sample_listing() -> Listing {
    Listing {
        id: "123".to_string(),
        payload: ListingPayload {
            name: "iPhone 14 Pro".to_string(),
            category_id: "1".to_string(),
            subcategory_id: "11".to_string(),
            condition: Condition::Used,
            delivery_mode: DeliveryMode::Both,
            pickup_address: Some("123 Main Street, City".to_string()),
            location: GeoPoint::new(-122.4194, 37.7749),
            attributes: vec![
                AttributePair {
                    key: "k1".to_string(),
                    value: "v1".to_string(),
                },
                AttributePair {
                    key: "k2".to_string(),
                    value: "v6".to_string(),
                },
            ],
            images: Vec::new(),
            details: ListingDetails::Sell(SellDetails { price: 999.0 }),
        },
    }
}
