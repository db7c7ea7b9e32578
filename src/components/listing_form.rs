//! Listing form component
//!
//! Collects structured data for a marketplace listing (sale, rental, or
//! auction), validates on submit, and hands the normalized payload to the
//! injected submission callback. All mutable state lives in one
//! [`FormController`] signal; this file only binds it to the DOM.

use dioxus::prelude::*;

use crate::form::{Coordinate, Field, FormController};
use crate::submit::{ImageResolver, SubmitHandler};
use crate::types::{Condition, DeliveryMode, Listing, ListingKind, RentDuration, ReferenceData};

#[derive(Props, Clone, PartialEq)]
pub struct ListingFormProps {
    /// Edit target; `None` starts a fresh listing.
    #[props(!optional)]
    pub listing: Option<Listing>,
    /// Read-only taxonomy tables, owned by the caller.
    pub reference: ReferenceData,
    /// Sole exit path for the normalized payload.
    pub on_submit: SubmitHandler,
    /// Turns selected file names into displayable image references before
    /// they enter the draft.
    pub resolve_images: ImageResolver,
    /// Fired when the user abandons editing.
    pub on_cancel: EventHandler<()>,
    /// Fired after the submission callback resolves successfully, so the
    /// host can dismiss the form.
    pub on_saved: EventHandler<()>,
    /// Fired with each image reference dropped from the draft, so the host
    /// can release the underlying resource.
    pub on_image_released: EventHandler<String>,
}

/// Listing create/edit form.
#[component]
pub fn ListingForm(props: ListingFormProps) -> Element {
    let is_edit = props.listing.is_some();

    let mut form = use_signal({
        let listing = props.listing.clone();
        move || {
            listing
                .as_ref()
                .map(FormController::for_listing)
                .unwrap_or_else(FormController::new)
        }
    });

    let on_submit = props.on_submit.clone();
    let resolve_images = props.resolve_images.clone();
    let on_saved = props.on_saved;
    let on_cancel = props.on_cancel;
    let on_image_released = props.on_image_released;
    let subcategories = props.reference.subcategories.clone();

    // Any path that discards the draft hands the remaining image
    // references back to the host for release.
    let mut release_remaining_images = move || {
        for reference in form.write().release_images() {
            on_image_released.call(reference);
        }
    };

    use_drop(release_remaining_images);

    let handle_submit = move |_| {
        let Some(payload) = form.write().begin_submit() else {
            return;
        };
        let handler = on_submit.clone();
        spawn(async move {
            let result = handler.call(payload).await;
            let succeeded = result.is_ok();
            form.write().finish_submit(result);
            if succeeded {
                release_remaining_images();
                on_saved.call(());
            }
        });
    };

    let state = form.read();
    let draft = &state.draft;

    let kind_value = draft.kind.as_str();
    let condition_value = draft.condition.map(|condition| condition.as_str()).unwrap_or_default();
    let delivery_value = draft
        .delivery_mode
        .map(|mode| mode.as_str())
        .unwrap_or_default();

    // Attribute rows with ids resolved to display names up front, so the
    // markup below stays plain field interpolation.
    let attribute_rows: Vec<(usize, String, String)> = draft
        .attributes
        .iter()
        .enumerate()
        .map(|(index, attr)| {
            (
                index,
                props.reference.attribute_key_name(&attr.key).to_string(),
                props
                    .reference
                    .attribute_value_label(&attr.value)
                    .to_string(),
            )
        })
        .collect();

    let submit_label = match (state.is_submitting(), is_edit) {
        (true, true) => "Updating...",
        (true, false) => "Creating...",
        (false, true) => "Update Listing",
        (false, false) => "Create Listing",
    };

    rsx! {
        div {
            class: "max-w-4xl mx-auto p-6 bg-white rounded-lg shadow-lg",

            div {
                class: "mb-6",
                h2 {
                    class: "text-2xl font-bold text-gray-900",
                    if is_edit { "Update Listing" } else { "Create New Listing" }
                }
                p {
                    class: "text-gray-600 mt-1",
                    if is_edit { "Modify your listing details" } else { "Fill in the details to list your item" }
                }
            }

            form {
                class: "space-y-6",
                onsubmit: handle_submit,

                // Basic information
                div {
                    class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    div {
                        FieldLabel { text: "Listing Name", required: true }
                        input {
                            r#type: "text",
                            value: "{draft.name}",
                            oninput: move |e| form.write().set_field(Field::Name, &e.value()),
                            placeholder: "Enter listing name",
                            class: input_class(state.errors.get(Field::Name).is_some()),
                        }
                        FieldError { message: state.errors.get(Field::Name).map(str::to_string) }
                    }

                    div {
                        FieldLabel { text: "Listing Type", required: true }
                        select {
                            value: "{kind_value}",
                            onchange: move |e| form.write().set_field(Field::Kind, &e.value()),
                            class: input_class(false),
                            for (value, label) in ListingKind::variants().iter().map(|k| (k.as_str(), k.label())) {
                                option { value: "{value}", "{label}" }
                            }
                        }
                    }
                }

                // Category selection
                div {
                    class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    div {
                        FieldLabel { text: "Category", required: true }
                        select {
                            value: "{draft.category_id}",
                            onchange: move |e| form.write().set_category(&e.value(), &subcategories),
                            class: input_class(state.errors.get(Field::Category).is_some()),
                            option { value: "", "Select Category" }
                            for category in props.reference.categories.iter() {
                                option { value: "{category.id}", "{category.name}" }
                            }
                        }
                        FieldError { message: state.errors.get(Field::Category).map(str::to_string) }
                    }

                    div {
                        FieldLabel { text: "Subcategory", required: true }
                        select {
                            value: "{draft.subcategory_id}",
                            onchange: move |e| form.write().set_field(Field::Subcategory, &e.value()),
                            class: input_class(state.errors.get(Field::Subcategory).is_some()),
                            option { value: "", "Select Subcategory" }
                            for sub in props.reference.subcategories_of(&draft.category_id) {
                                option { value: "{sub.id}", "{sub.name}" }
                            }
                        }
                        FieldError { message: state.errors.get(Field::Subcategory).map(str::to_string) }
                    }
                }

                // Condition and delivery
                div {
                    class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    div {
                        FieldLabel { text: "Condition", required: true }
                        select {
                            value: "{condition_value}",
                            onchange: move |e| form.write().set_field(Field::Condition, &e.value()),
                            class: input_class(state.errors.get(Field::Condition).is_some()),
                            option { value: "", "Select Condition" }
                            for (value, label) in Condition::variants().iter().map(|c| (c.as_str(), c.label())) {
                                option { value: "{value}", "{label}" }
                            }
                        }
                        FieldError { message: state.errors.get(Field::Condition).map(str::to_string) }
                    }

                    div {
                        FieldLabel { text: "Delivery Mode", required: true }
                        select {
                            value: "{delivery_value}",
                            onchange: move |e| form.write().set_field(Field::DeliveryMode, &e.value()),
                            class: input_class(state.errors.get(Field::DeliveryMode).is_some()),
                            option { value: "", "Select Delivery Mode" }
                            for (value, label) in DeliveryMode::variants().iter().map(|m| (m.as_str(), m.label())) {
                                option { value: "{value}", "{label}" }
                            }
                        }
                        FieldError { message: state.errors.get(Field::DeliveryMode).map(str::to_string) }
                    }
                }

                // Pickup address, only when the buyer collects the item
                if draft.delivery_mode == Some(DeliveryMode::BuyerPickup) {
                    div {
                        FieldLabel { text: "Pickup Address", required: true }
                        textarea {
                            value: "{draft.pickup_address}",
                            oninput: move |e| form.write().set_field(Field::PickupAddress, &e.value()),
                            rows: "3",
                            placeholder: "Enter pickup address",
                            class: input_class(state.errors.get(Field::PickupAddress).is_some()),
                        }
                        FieldError { message: state.errors.get(Field::PickupAddress).map(str::to_string) }
                    }
                }

                // Sale price
                if draft.kind == ListingKind::Sell {
                    div {
                        FieldLabel { text: "Price", required: true }
                        input {
                            r#type: "number",
                            value: "{draft.price}",
                            oninput: move |e| form.write().set_field(Field::Price, &e.value()),
                            min: "0",
                            step: "0.01",
                            placeholder: "Enter price",
                            class: input_class(state.errors.get(Field::Price).is_some()),
                        }
                        FieldError { message: state.errors.get(Field::Price).map(str::to_string) }
                    }
                }

                // Rent details
                if draft.kind == ListingKind::Rent {
                    div {
                        class: "space-y-4",
                        h3 { class: "text-lg font-medium text-gray-900", "Rent Details" }
                        div {
                            class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                            div {
                                FieldLabel { text: "Rent Price", required: true }
                                input {
                                    r#type: "number",
                                    value: "{draft.rent.rent_price}",
                                    oninput: move |e| form.write().set_field(Field::RentPrice, &e.value()),
                                    min: "0",
                                    step: "0.01",
                                    placeholder: "Monthly rent",
                                    class: input_class(state.errors.get(Field::RentPrice).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::RentPrice).map(str::to_string) }
                            }

                            div {
                                FieldLabel { text: "Duration (months)", required: true }
                                select {
                                    value: "{draft.rent.duration}",
                                    onchange: move |e| form.write().set_field(Field::RentDuration, &e.value()),
                                    class: input_class(state.errors.get(Field::RentDuration).is_some()),
                                    option { value: "", "Select Duration" }
                                    for (months, label) in RentDuration::variants().iter().map(|d| (d.months(), d.label())) {
                                        option { value: "{months}", "{label}" }
                                    }
                                }
                                FieldError { message: state.errors.get(Field::RentDuration).map(str::to_string) }
                            }

                            div {
                                FieldLabel { text: "Security Amount", required: false }
                                input {
                                    r#type: "number",
                                    value: "{draft.rent.security_amount}",
                                    oninput: move |e| form.write().set_field(Field::SecurityAmount, &e.value()),
                                    min: "0",
                                    step: "0.01",
                                    placeholder: "Optional deposit",
                                    class: input_class(state.errors.get(Field::SecurityAmount).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::SecurityAmount).map(str::to_string) }
                            }
                        }
                    }
                }

                // Auction details
                if draft.kind == ListingKind::Auction {
                    div {
                        class: "space-y-4",
                        h3 { class: "text-lg font-medium text-gray-900", "Auction Details" }
                        div {
                            class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                            div {
                                FieldLabel { text: "Start Price", required: true }
                                input {
                                    r#type: "number",
                                    value: "{draft.auction.start_price}",
                                    oninput: move |e| form.write().set_field(Field::StartPrice, &e.value()),
                                    min: "0",
                                    step: "0.01",
                                    class: input_class(state.errors.get(Field::StartPrice).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::StartPrice).map(str::to_string) }
                            }

                            div {
                                FieldLabel { text: "Reserve Price", required: true }
                                input {
                                    r#type: "number",
                                    value: "{draft.auction.reserve_price}",
                                    oninput: move |e| form.write().set_field(Field::ReservePrice, &e.value()),
                                    min: "0",
                                    step: "0.01",
                                    class: input_class(state.errors.get(Field::ReservePrice).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::ReservePrice).map(str::to_string) }
                            }

                            div {
                                FieldLabel { text: "Bid Increment", required: true }
                                input {
                                    r#type: "number",
                                    value: "{draft.auction.bid_increment}",
                                    oninput: move |e| form.write().set_field(Field::BidIncrement, &e.value()),
                                    min: "1",
                                    step: "0.01",
                                    class: input_class(state.errors.get(Field::BidIncrement).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::BidIncrement).map(str::to_string) }
                            }
                        }

                        div {
                            class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                            div {
                                FieldLabel { text: "Start Time", required: true }
                                input {
                                    r#type: "datetime-local",
                                    value: "{draft.auction.start_time}",
                                    oninput: move |e| form.write().set_field(Field::StartTime, &e.value()),
                                    class: input_class(state.errors.get(Field::StartTime).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::StartTime).map(str::to_string) }
                            }

                            div {
                                FieldLabel { text: "End Time", required: true }
                                input {
                                    r#type: "datetime-local",
                                    value: "{draft.auction.end_time}",
                                    oninput: move |e| form.write().set_field(Field::EndTime, &e.value()),
                                    class: input_class(state.errors.get(Field::EndTime).is_some()),
                                }
                                FieldError { message: state.errors.get(Field::EndTime).map(str::to_string) }
                            }
                        }
                    }
                }

                // Location
                div {
                    h3 { class: "text-lg font-medium text-gray-900 mb-4", "Location" }
                    div {
                        class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                        div {
                            FieldLabel { text: "Longitude", required: false }
                            input {
                                r#type: "number",
                                value: "{draft.location.longitude}",
                                oninput: move |e| form.write().set_coordinate(Coordinate::Longitude, &e.value()),
                                min: "-180",
                                max: "180",
                                step: "any",
                                class: input_class(state.errors.get(Field::Location).is_some()),
                            }
                        }
                        div {
                            FieldLabel { text: "Latitude", required: false }
                            input {
                                r#type: "number",
                                value: "{draft.location.latitude}",
                                oninput: move |e| form.write().set_coordinate(Coordinate::Latitude, &e.value()),
                                min: "-90",
                                max: "90",
                                step: "any",
                                class: input_class(state.errors.get(Field::Location).is_some()),
                            }
                        }
                    }
                    FieldError { message: state.errors.get(Field::Location).map(str::to_string) }
                    p {
                        class: "mt-2 text-sm text-gray-500",
                        "Current: [{draft.location.longitude}, {draft.location.latitude}]"
                    }
                }

                // Attributes
                div {
                    h3 { class: "text-lg font-medium text-gray-900 mb-4", "Attributes" }

                    div {
                        class: "grid grid-cols-1 md:grid-cols-3 gap-4 mb-4",
                        div {
                            FieldLabel { text: "Attribute Key", required: false }
                            select {
                                value: "{state.attribute_draft.key}",
                                onchange: move |e| form.write().stage_attribute_key(&e.value()),
                                class: input_class(false),
                                option { value: "", "Select Attribute" }
                                for key in props.reference.attribute_keys.iter() {
                                    option { value: "{key.id}", "{key.name}" }
                                }
                            }
                        }

                        div {
                            FieldLabel { text: "Attribute Value", required: false }
                            select {
                                value: "{state.attribute_draft.value}",
                                onchange: move |e| form.write().stage_attribute_value(&e.value()),
                                disabled: state.attribute_draft.key.is_empty(),
                                class: input_class(false),
                                option { value: "", "Select Value" }
                                for value in props.reference.values_of(&state.attribute_draft.key) {
                                    option { value: "{value.id}", "{value.value}" }
                                }
                            }
                        }

                        div {
                            class: "flex items-end",
                            button {
                                r#type: "button",
                                onclick: move |_| form.write().add_attribute(),
                                disabled: state.attribute_draft.key.is_empty() || state.attribute_draft.value.is_empty(),
                                class: "w-full px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:bg-gray-400 disabled:cursor-not-allowed",
                                "+ Add Attribute"
                            }
                        }
                    }

                    if !attribute_rows.is_empty() {
                        div {
                            class: "space-y-2",
                            h4 { class: "text-sm font-medium text-gray-700", "Current Attributes:" }
                            for (index, key_name, value_label) in attribute_rows {
                                div {
                                    key: "{index}",
                                    class: "flex items-center justify-between bg-gray-50 px-3 py-2 rounded-md",
                                    span {
                                        class: "text-sm",
                                        strong { "{key_name}: " }
                                        "{value_label}"
                                    }
                                    button {
                                        r#type: "button",
                                        onclick: move |_| form.write().remove_attribute(index),
                                        class: "text-red-600 hover:text-red-800",
                                        "\u{2715}"
                                    }
                                }
                            }
                        }
                    }
                }

                // Images
                div {
                    h3 { class: "text-lg font-medium text-gray-900 mb-4", "Images" }

                    div {
                        class: "mb-4",
                        label {
                            class: "flex flex-col items-center justify-center w-full h-32 border-2 border-gray-300 border-dashed rounded-lg cursor-pointer bg-gray-50 hover:bg-gray-100",
                            div {
                                class: "flex flex-col items-center justify-center pt-5 pb-6",
                                p {
                                    class: "mb-2 text-sm text-gray-500",
                                    span { class: "font-semibold", "Click to upload" }
                                    " images"
                                }
                                p { class: "text-xs text-gray-500", "PNG, JPG or JPEG" }
                            }
                            // Selected file names go through the host-supplied
                            // resolver before entering the draft; the component
                            // never touches blob or upload machinery itself.
                            input {
                                r#type: "file",
                                multiple: true,
                                accept: "image/*",
                                class: "hidden",
                                onchange: move |e| {
                                    if let Some(engine) = e.files() {
                                        let resolved = resolve_images.resolve(engine.files());
                                        form.write().add_images(resolved);
                                    }
                                },
                            }
                        }
                    }

                    if !draft.images.is_empty() {
                        div {
                            class: "grid grid-cols-2 md:grid-cols-4 gap-4",
                            for (index, image) in draft.images.iter().enumerate() {
                                div {
                                    key: "{index}",
                                    class: "relative",
                                    img {
                                        src: "{image}",
                                        alt: "Listing image {index}",
                                        class: "w-full h-24 object-cover rounded-md",
                                    }
                                    button {
                                        r#type: "button",
                                        onclick: move |_| {
                                            if let Some(released) = form.write().remove_image(index) {
                                                on_image_released.call(released);
                                            }
                                        },
                                        class: "absolute -top-2 -right-2 bg-red-600 text-white rounded-full px-1.5 hover:bg-red-700",
                                        "\u{2715}"
                                    }
                                }
                            }
                        }
                    }
                }

                // Submission error banner
                if let Some(banner) = state.banner.as_ref() {
                    div {
                        class: "bg-red-50 border border-red-200 text-red-700 p-4 rounded-lg",
                        "{banner}"
                    }
                }

                // Form actions
                div {
                    class: "flex justify-end space-x-4 pt-6 border-t border-gray-200",
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            release_remaining_images();
                            on_cancel.call(());
                        },
                        class: "px-6 py-2 border border-gray-300 text-gray-700 rounded-md hover:bg-gray-50",
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        disabled: state.is_submitting(),
                        class: "px-6 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:bg-blue-400 disabled:cursor-not-allowed",
                        "{submit_label}"
                    }
                }
            }
        }
    }
}

fn input_class(has_error: bool) -> &'static str {
    if has_error {
        "w-full px-3 py-2 border border-red-500 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
    } else {
        "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
    }
}

#[derive(Props, Clone, PartialEq)]
struct FieldLabelProps {
    text: &'static str,
    required: bool,
}

#[component]
fn FieldLabel(props: FieldLabelProps) -> Element {
    rsx! {
        label {
            class: "block text-sm font-medium text-gray-700 mb-2",
            "{props.text} "
            if props.required {
                span { class: "text-red-500", "*" }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FieldErrorProps {
    #[props(!optional)]
    message: Option<String>,
}

/// Inline per-field validation message.
#[component]
fn FieldError(props: FieldErrorProps) -> Element {
    rsx! {
        if let Some(message) = props.message.as_ref() {
            p { class: "mt-1 text-sm text-red-600", "{message}" }
        }
    }
}
