//! Form state controller
//!
//! Owns the working copy of a listing plus the transient UI state (error
//! map, submit phase, banner, staged attribute). All mutation goes through
//! the operations here so the component layer stays declarative.

use crate::submit::SubmitError;
use crate::types::{
    AttributePair, Condition, DeliveryMode, GeoPoint, Listing, ListingDetails, ListingKind,
    ListingPayload, Subcategory,
};

use super::normalize::normalize;
use super::validate::{validate, Field, ValidationErrors};

/// String-typed working copy of the rent detail section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentDraft {
    pub rent_price: String,
    pub duration: String,
    pub security_amount: String,
}

/// String-typed working copy of the auction detail section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionDraft {
    pub start_price: String,
    pub reserve_price: String,
    pub bid_increment: String,
    pub start_time: String,
    pub end_time: String,
}

/// The listing as the user is editing it. Numeric and date fields stay
/// strings until normalization so partial input never corrupts state.
///
/// All three detail sections are kept so entered values survive switching
/// the listing kind back and forth; only the active one is validated and
/// submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub kind: ListingKind,
    pub category_id: String,
    pub subcategory_id: String,
    pub condition: Option<Condition>,
    pub price: String,
    pub rent: RentDraft,
    pub auction: AuctionDraft,
    pub delivery_mode: Option<DeliveryMode>,
    pub pickup_address: String,
    pub attributes: Vec<AttributePair>,
    pub location: GeoPoint,
    pub images: Vec<String>,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ListingKind::Sell,
            category_id: String::new(),
            subcategory_id: String::new(),
            condition: None,
            price: String::new(),
            rent: RentDraft::default(),
            auction: AuctionDraft::default(),
            delivery_mode: None,
            pickup_address: String::new(),
            attributes: Vec::new(),
            location: GeoPoint::default(),
            images: Vec::new(),
        }
    }
}

impl ListingDraft {
    /// Hydrate a draft from an existing listing for editing.
    pub fn from_listing(listing: &Listing) -> Self {
        let payload = &listing.payload;
        let mut draft = Self {
            name: payload.name.clone(),
            kind: payload.kind(),
            category_id: payload.category_id.clone(),
            subcategory_id: payload.subcategory_id.clone(),
            condition: Some(payload.condition),
            delivery_mode: Some(payload.delivery_mode),
            pickup_address: payload.pickup_address.clone().unwrap_or_default(),
            attributes: payload.attributes.clone(),
            location: payload.location,
            images: payload.images.clone(),
            ..Self::default()
        };

        match &payload.details {
            ListingDetails::Sell(sell) => {
                draft.price = format_amount(sell.price);
            }
            ListingDetails::Rent(rent) => {
                draft.rent.rent_price = format_amount(rent.rent_price);
                draft.rent.duration = rent.duration.months().to_string();
                draft.rent.security_amount = rent
                    .security_amount
                    .map(format_amount)
                    .unwrap_or_default();
            }
            ListingDetails::Auction(auction) => {
                draft.auction.start_price = format_amount(auction.start_price);
                draft.auction.reserve_price = format_amount(auction.reserve_price);
                draft.auction.bid_increment = format_amount(auction.bid_increment);
                draft.auction.start_time = format_local_datetime(auction.start_time);
                draft.auction.end_time = format_local_datetime(auction.end_time);
            }
        }

        draft
    }
}

/// Render an amount back into an input value without a trailing ".0".
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Render a UTC timestamp back into a `datetime-local` input value.
fn format_local_datetime(value: chrono::DateTime<chrono::Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

/// Longitude or latitude input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    Longitude,
    Latitude,
}

/// Staged attribute (key, value) pair not yet added to the listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDraft {
    pub key: String,
    pub value: String,
}

/// Submission phase. Submit is only invocable from `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    pub draft: ListingDraft,
    pub errors: ValidationErrors,
    pub phase: SubmitPhase,
    /// Top-level submission error, rendered as a banner.
    pub banner: Option<String>,
    pub attribute_draft: AttributeDraft,
}

impl FormController {
    /// Controller for a brand-new listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller hydrated from an existing listing.
    pub fn for_listing(listing: &Listing) -> Self {
        Self {
            draft: ListingDraft::from_listing(listing),
            ..Self::default()
        }
    }

    /// Generic field update; clears any existing error for that field.
    ///
    /// Category and coordinates have dedicated operations below.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Kind => {
                if let Some(kind) = ListingKind::parse(value) {
                    self.draft.kind = kind;
                }
            }
            Field::Subcategory => self.draft.subcategory_id = value.to_string(),
            Field::Condition => self.draft.condition = Condition::parse(value),
            Field::DeliveryMode => self.draft.delivery_mode = DeliveryMode::parse(value),
            Field::PickupAddress => self.draft.pickup_address = value.to_string(),
            Field::Price => self.draft.price = value.to_string(),
            Field::RentPrice => self.draft.rent.rent_price = value.to_string(),
            Field::RentDuration => self.draft.rent.duration = value.to_string(),
            Field::SecurityAmount => self.draft.rent.security_amount = value.to_string(),
            Field::StartPrice => self.draft.auction.start_price = value.to_string(),
            Field::ReservePrice => self.draft.auction.reserve_price = value.to_string(),
            Field::BidIncrement => self.draft.auction.bid_increment = value.to_string(),
            Field::StartTime => self.draft.auction.start_time = value.to_string(),
            Field::EndTime => self.draft.auction.end_time = value.to_string(),
            Field::Category | Field::Location => return,
        }
        self.errors.clear(field);
    }

    /// Select a category. A previously selected subcategory is kept only if
    /// it belongs to the new category.
    pub fn set_category(&mut self, category_id: &str, subcategories: &[Subcategory]) {
        let keeps_subcategory = subcategories
            .iter()
            .any(|sub| sub.id == self.draft.subcategory_id && sub.parent_id == category_id);
        if !keeps_subcategory {
            self.draft.subcategory_id.clear();
        }
        self.draft.category_id = category_id.to_string();
        self.errors.clear(Field::Category);
    }

    /// Update longitude or latitude. Non-numeric input coerces to 0.
    pub fn set_coordinate(&mut self, coordinate: Coordinate, raw: &str) {
        let value = raw.trim().parse::<f64>().unwrap_or(0.0);
        match coordinate {
            Coordinate::Longitude => self.draft.location.longitude = value,
            Coordinate::Latitude => self.draft.location.latitude = value,
        }
    }

    /// Stage the attribute key. Switching keys discards a staged value that
    /// belonged to the previous key.
    pub fn stage_attribute_key(&mut self, key: &str) {
        if self.attribute_draft.key != key {
            self.attribute_draft.value.clear();
        }
        self.attribute_draft.key = key.to_string();
    }

    pub fn stage_attribute_value(&mut self, value: &str) {
        self.attribute_draft.value = value.to_string();
    }

    /// Append the staged pair to the listing if both halves are set, then
    /// clear the stage.
    pub fn add_attribute(&mut self) {
        if self.attribute_draft.key.is_empty() || self.attribute_draft.value.is_empty() {
            return;
        }
        self.draft.attributes.push(AttributePair {
            key: std::mem::take(&mut self.attribute_draft.key),
            value: std::mem::take(&mut self.attribute_draft.value),
        });
    }

    pub fn remove_attribute(&mut self, index: usize) {
        if index < self.draft.attributes.len() {
            self.draft.attributes.remove(index);
        }
    }

    /// Append already-resolved image references.
    pub fn add_images(&mut self, references: Vec<String>) {
        self.draft.images.extend(references);
    }

    /// Remove an image by position, returning the released reference so the
    /// host can revoke it.
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.draft.images.len()).then(|| self.draft.images.remove(index))
    }

    /// Drain every remaining image reference for release when the form is
    /// discarded (cancel, successful save, or unmount).
    pub fn release_images(&mut self) -> Vec<String> {
        std::mem::take(&mut self.draft.images)
    }

    /// Validate and normalize. Returns the payload to hand to the submission
    /// callback, or `None` when validation failed (error map populated) or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ListingPayload> {
        if self.phase != SubmitPhase::Idle {
            return None;
        }

        self.banner = None;
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors = ValidationErrors::default();

        match normalize(&self.draft) {
            Ok(payload) => {
                self.phase = SubmitPhase::Submitting;
                Some(payload)
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                None
            }
        }
    }

    /// Record the submission outcome and return to `Idle`. A failure becomes
    /// the banner message; the form stays editable for a manual retry.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if let Err(err) = result {
            self.banner = Some(err.to_string());
        }
        self.phase = SubmitPhase::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuctionDetails, SellDetails};
    use chrono::TimeZone;

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

    fn subcategories() -> Vec<Subcategory> {
        vec![
            Subcategory {
                id: "11".to_string(),
                name: "Smartphones".to_string(),
                parent_id: "1".to_string(),
            },
            Subcategory {
                id: "12".to_string(),
                name: "Laptops".to_string(),
                parent_id: "1".to_string(),
            },
            Subcategory {
                id: "21".to_string(),
                name: "Men's Clothing".to_string(),
                parent_id: "2".to_string(),
            },
        ]
    }

    fn fill_valid_sell(form: &mut FormController) {
        form.set_field(Field::Name, "iPhone 14 Pro");
        form.set_field(Field::Kind, "SELL");
        form.set_category("1", &subcategories());
        form.set_field(Field::Subcategory, "11");
        form.set_field(Field::Condition, "USED");
        form.set_field(Field::Price, "999");
        form.set_field(Field::DeliveryMode, "BOTH");
        form.set_coordinate(Coordinate::Longitude, "-122.4194");
        form.set_coordinate(Coordinate::Latitude, "37.7749");
    }

    #[test]
    fn test_new_form_defaults_to_sell() {
        let form = FormController::new();
        assert_eq!(form.draft.kind, ListingKind::Sell);
        assert_eq!(form.phase, SubmitPhase::Idle);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_hydration_from_existing_listing() {
        let form = FormController::for_listing(&sample_listing());
        assert_eq!(form.draft.name, "iPhone 14 Pro");
        assert_eq!(form.draft.kind, ListingKind::Sell);
        assert_eq!(form.draft.price, "999");
        assert_eq!(form.draft.condition, Some(Condition::Used));
        assert_eq!(form.draft.pickup_address, "123 Main Street, City");
        assert_eq!(form.draft.attributes.len(), 2);
        // Untouched sections stay at their defaults.
        assert_eq!(form.draft.rent, RentDraft::default());
    }

    #[test]
    fn test_hydration_renders_auction_times_for_datetime_inputs() {
        let mut listing = sample_listing();
        listing.payload.details = ListingDetails::Auction(AuctionDetails {
            start_price: 100.0,
            reserve_price: 150.0,
            bid_increment: 5.0,
            start_time: chrono::Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            end_time: chrono::Utc.with_ymd_and_hms(2025, 6, 8, 10, 30, 0).unwrap(),
        });

        let form = FormController::for_listing(&listing);
        assert_eq!(form.draft.auction.start_time, "2025-06-01T10:00");
        assert_eq!(form.draft.auction.end_time, "2025-06-08T10:30");
        assert_eq!(form.draft.auction.bid_increment, "5");
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut form = FormController::new();
        assert!(form.begin_submit().is_none());
        assert!(form.errors.get(Field::Name).is_some());

        form.set_field(Field::Name, "Lawn Mower");
        assert!(form.errors.get(Field::Name).is_none());
        // Other errors stay until their fields are edited.
        assert!(form.errors.get(Field::Category).is_some());
    }

    #[test]
    fn test_changing_category_drops_foreign_subcategory() {
        let subs = subcategories();
        let mut form = FormController::new();
        form.set_category("1", &subs);
        form.set_field(Field::Subcategory, "11");

        // Sibling category: "11" does not belong to "2".
        form.set_category("2", &subs);
        assert_eq!(form.draft.subcategory_id, "");

        // A subcategory of the selected category survives re-selection.
        form.set_category("1", &subs);
        form.set_field(Field::Subcategory, "12");
        form.set_category("1", &subs);
        assert_eq!(form.draft.subcategory_id, "12");
    }

    #[test]
    fn test_non_numeric_coordinate_coerces_to_zero() {
        let mut form = FormController::new();
        form.set_coordinate(Coordinate::Longitude, "-122.4194");
        form.set_coordinate(Coordinate::Latitude, "not a number");
        assert_eq!(form.draft.location.coordinates(), [-122.4194, 0.0]);
    }

    #[test]
    fn test_attribute_staging_and_add() {
        let mut form = FormController::new();

        // Both halves are required.
        form.stage_attribute_key("k1");
        form.add_attribute();
        assert!(form.draft.attributes.is_empty());

        form.stage_attribute_value("v1");
        form.add_attribute();
        assert_eq!(form.draft.attributes.len(), 1);
        assert_eq!(form.attribute_draft, AttributeDraft::default());

        // Switching keys discards the stale staged value.
        form.stage_attribute_key("k2");
        form.stage_attribute_value("v6");
        form.stage_attribute_key("k3");
        assert_eq!(form.attribute_draft.value, "");
    }

    #[test]
    fn test_remove_attribute_by_position() {
        let mut form = FormController::for_listing(&sample_listing());
        form.remove_attribute(0);
        assert_eq!(form.draft.attributes.len(), 1);
        assert_eq!(form.draft.attributes[0].key, "k2");

        // Out of range is a no-op.
        form.remove_attribute(5);
        assert_eq!(form.draft.attributes.len(), 1);
    }

    #[test]
    fn test_images_append_and_release() {
        let mut form = FormController::new();
        form.add_images(vec!["one.png".to_string(), "two.png".to_string()]);
        assert_eq!(form.draft.images.len(), 2);

        assert_eq!(form.remove_image(0), Some("one.png".to_string()));
        assert_eq!(form.draft.images, vec!["two.png".to_string()]);
        assert_eq!(form.remove_image(7), None);
    }

    #[test]
    fn test_release_images_drains_remaining_references() {
        let mut form = FormController::new();
        form.add_images(vec![
            "one.png".to_string(),
            "two.png".to_string(),
            "three.png".to_string(),
        ]);
        assert_eq!(form.remove_image(0), Some("one.png".to_string()));

        // Discarding the form hands back everything still held.
        let released = form.release_images();
        assert_eq!(
            released,
            vec!["two.png".to_string(), "three.png".to_string()]
        );
        assert!(form.draft.images.is_empty());

        // Draining twice is harmless.
        assert!(form.release_images().is_empty());
    }

    #[test]
    fn test_begin_submit_blocks_on_validation_errors() {
        let mut form = FormController::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase, SubmitPhase::Idle);
        assert!(!form.errors.is_empty());
    }

    #[test]
    fn test_begin_submit_produces_payload_and_enters_submitting() {
        let mut form = FormController::new();
        fill_valid_sell(&mut form);

        let payload = form.begin_submit().expect("valid draft should submit");
        assert_eq!(payload.kind(), ListingKind::Sell);
        assert_eq!(
            payload.details,
            ListingDetails::Sell(SellDetails { price: 999.0 })
        );
        assert!(form.is_submitting());
    }

    #[test]
    fn test_duplicate_submit_is_suppressed_while_in_flight() {
        let mut form = FormController::new();
        fill_valid_sell(&mut form);

        assert!(form.begin_submit().is_some());
        // Second invocation is a no-op until the first resolves.
        assert!(form.begin_submit().is_none());

        form.finish_submit(Ok(()));
        assert_eq!(form.phase, SubmitPhase::Idle);
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_failed_submission_sets_banner_and_reenables_form() {
        let mut form = FormController::new();
        fill_valid_sell(&mut form);

        assert!(form.begin_submit().is_some());
        form.finish_submit(Err(SubmitError::new("backend unavailable")));
        assert_eq!(form.banner.as_deref(), Some("backend unavailable"));
        assert_eq!(form.phase, SubmitPhase::Idle);

        // Retrying clears the banner.
        assert!(form.begin_submit().is_some());
        assert_eq!(form.banner, None);
    }
}
