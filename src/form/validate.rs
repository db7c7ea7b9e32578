//! Submit-time validation
//!
//! Every rule is evaluated independently per field; nothing short-circuits
//! across fields. Only the detail section matching the selected listing kind
//! is validated.

use std::collections::BTreeMap;

use crate::types::{DeliveryMode, ListingKind, RentDuration};

use super::controller::ListingDraft;

/// Identifies a single form field for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Kind,
    Category,
    Subcategory,
    Condition,
    Price,
    RentPrice,
    RentDuration,
    SecurityAmount,
    StartPrice,
    ReservePrice,
    BidIncrement,
    StartTime,
    EndTime,
    DeliveryMode,
    PickupAddress,
    Location,
}

/// Field-keyed validation error map. Validation succeeds iff it is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validate the whole draft, producing one message per offending field.
pub fn validate(draft: &ListingDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, "Listing name is required");
    }

    // `draft.kind` is an enum, so an out-of-range kind is unrepresentable.

    if draft.category_id.is_empty() {
        errors.insert(Field::Category, "Category is required");
    }

    if draft.subcategory_id.is_empty() {
        errors.insert(Field::Subcategory, "Subcategory is required");
    }

    if draft.condition.is_none() {
        errors.insert(Field::Condition, "Condition is required");
    }

    match draft.kind {
        ListingKind::Sell => validate_sell(draft, &mut errors),
        ListingKind::Rent => validate_rent(draft, &mut errors),
        ListingKind::Auction => validate_auction(draft, &mut errors),
    }

    if draft.delivery_mode.is_none() {
        errors.insert(Field::DeliveryMode, "Delivery mode is required");
    }

    if draft.delivery_mode == Some(DeliveryMode::BuyerPickup)
        && draft.pickup_address.trim().is_empty()
    {
        errors.insert(
            Field::PickupAddress,
            "Pickup address is required when buyer pickup is selected",
        );
    }

    let [longitude, latitude] = draft.location.coordinates();
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        errors.insert(Field::Location, "Coordinates must be within valid ranges");
    }

    errors
}

fn validate_sell(draft: &ListingDraft, errors: &mut ValidationErrors) {
    if !is_non_negative_amount(&draft.price) {
        errors.insert(Field::Price, "Valid price is required for sell listings");
    }
}

fn validate_rent(draft: &ListingDraft, errors: &mut ValidationErrors) {
    let rent = &draft.rent;

    if !is_non_negative_amount(&rent.rent_price) {
        errors.insert(Field::RentPrice, "Rent price is required");
    }

    let duration = rent
        .duration
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(RentDuration::from_months);
    if duration.is_none() {
        errors.insert(Field::RentDuration, "Valid duration is required");
    }

    // Security deposit is optional, but must be non-negative when given.
    if !rent.security_amount.trim().is_empty() && !is_non_negative_amount(&rent.security_amount) {
        errors.insert(Field::SecurityAmount, "Security amount must be positive");
    }
}

fn validate_auction(draft: &ListingDraft, errors: &mut ValidationErrors) {
    let auction = &draft.auction;

    let start_price = parse_amount(&auction.start_price);
    if !matches!(start_price, Some(value) if value >= 0.0) {
        errors.insert(Field::StartPrice, "Start price is required");
    }

    let reserve_price = parse_amount(&auction.reserve_price);
    let reserve_ok = match (reserve_price, start_price) {
        (Some(reserve), Some(start)) => reserve > start,
        (Some(_), None) => true,
        (None, _) => false,
    };
    if !reserve_ok {
        errors.insert(
            Field::ReservePrice,
            "Reserve price must be greater than start price",
        );
    }

    if !matches!(parse_amount(&auction.bid_increment), Some(value) if value >= 1.0) {
        errors.insert(Field::BidIncrement, "Bid increment must be at least 1");
    }

    let start_time = super::normalize::parse_local_datetime(&auction.start_time);
    if start_time.is_none() {
        errors.insert(Field::StartTime, "Start time is required");
    }

    let end_time = super::normalize::parse_local_datetime(&auction.end_time);
    let end_ok = match (end_time, start_time) {
        (Some(end), Some(start)) => end > start,
        (Some(_), None) => true,
        (None, _) => false,
    };
    if !end_ok {
        errors.insert(Field::EndTime, "End time must be after start time");
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn is_non_negative_amount(raw: &str) -> bool {
    matches!(parse_amount(raw), Some(value) if value >= 0.0)
}
