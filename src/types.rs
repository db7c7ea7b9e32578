//! Domain types for marketplace listings
//!
//! These mirror the payload shape expected by the submission collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerated Field Values
// ============================================================================

/// How a listing is offered: fixed-price sale, rental, or auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingKind {
    Sell,
    Rent,
    Auction,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Sell => "SELL",
            ListingKind::Rent => "RENT",
            ListingKind::Auction => "AUCTION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SELL" => Some(ListingKind::Sell),
            "RENT" => Some(ListingKind::Rent),
            "AUCTION" => Some(ListingKind::Auction),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::Sell => "Sell",
            ListingKind::Rent => "Rent",
            ListingKind::Auction => "Auction",
        }
    }

    pub fn variants() -> &'static [ListingKind] {
        &[ListingKind::Sell, ListingKind::Rent, ListingKind::Auction]
    }
}

/// Physical condition of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    New,
    Used,
    Refurbished,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Used => "USED",
            Condition::Refurbished => "REFURBISHED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NEW" => Some(Condition::New),
            "USED" => Some(Condition::Used),
            "REFURBISHED" => Some(Condition::Refurbished),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::Refurbished => "Refurbished",
        }
    }

    pub fn variants() -> &'static [Condition] {
        &[Condition::New, Condition::Used, Condition::Refurbished]
    }
}

/// How the item reaches the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    SellerDelivery,
    BuyerPickup,
    Both,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::SellerDelivery => "SELLER_DELIVERY",
            DeliveryMode::BuyerPickup => "BUYER_PICKUP",
            DeliveryMode::Both => "BOTH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SELLER_DELIVERY" => Some(DeliveryMode::SellerDelivery),
            "BUYER_PICKUP" => Some(DeliveryMode::BuyerPickup),
            "BOTH" => Some(DeliveryMode::Both),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMode::SellerDelivery => "Seller Delivery",
            DeliveryMode::BuyerPickup => "Buyer Pickup",
            DeliveryMode::Both => "Both",
        }
    }

    pub fn variants() -> &'static [DeliveryMode] {
        &[
            DeliveryMode::SellerDelivery,
            DeliveryMode::BuyerPickup,
            DeliveryMode::Both,
        ]
    }
}

/// Allowed rental durations, in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum RentDuration {
    One,
    Three,
    Six,
    Twelve,
}

impl RentDuration {
    pub fn months(&self) -> u32 {
        match self {
            RentDuration::One => 1,
            RentDuration::Three => 3,
            RentDuration::Six => 6,
            RentDuration::Twelve => 12,
        }
    }

    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            1 => Some(RentDuration::One),
            3 => Some(RentDuration::Three),
            6 => Some(RentDuration::Six),
            12 => Some(RentDuration::Twelve),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        let months = self.months();
        if months == 1 {
            "1 month".to_string()
        } else {
            format!("{months} months")
        }
    }

    pub fn variants() -> &'static [RentDuration] {
        &[
            RentDuration::One,
            RentDuration::Three,
            RentDuration::Six,
            RentDuration::Twelve,
        ]
    }
}

impl From<RentDuration> for u32 {
    fn from(duration: RentDuration) -> u32 {
        duration.months()
    }
}

impl TryFrom<u32> for RentDuration {
    type Error = String;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        RentDuration::from_months(months).ok_or_else(|| format!("invalid rent duration: {months}"))
    }
}

// ============================================================================
// Reference Data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeKey {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub id: String,
    pub key_id: String,
    pub value: String,
}

/// Read-only taxonomy tables supplied by the hosting page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub attribute_keys: Vec<AttributeKey>,
    pub attribute_values: Vec<AttributeValue>,
}

impl ReferenceData {
    /// Subcategories belonging to the given category.
    pub fn subcategories_of<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Subcategory> {
        self.subcategories
            .iter()
            .filter(move |sub| sub.parent_id == category_id)
    }

    /// Attribute values belonging to the given attribute key.
    pub fn values_of<'a>(&'a self, key_id: &'a str) -> impl Iterator<Item = &'a AttributeValue> {
        self.attribute_values
            .iter()
            .filter(move |value| value.key_id == key_id)
    }

    /// Display name for an attribute key id, falling back to the id itself.
    pub fn attribute_key_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.attribute_keys
            .iter()
            .find(|key| key.id == id)
            .map(|key| key.name.as_str())
            .unwrap_or(id)
    }

    /// Display label for an attribute value id, falling back to the id itself.
    pub fn attribute_value_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.attribute_values
            .iter()
            .find(|value| value.id == id)
            .map(|value| value.value.as_str())
            .unwrap_or(id)
    }
}

// ============================================================================
// Listing Payload
// ============================================================================

/// A taxonomy (key, value) descriptor attached to a listing, e.g. Brand=Apple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributePair {
    pub key: String,
    pub value: String,
}

/// Geographic point; longitude in [-180, 180], latitude in [-90, 90].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellDetails {
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentDetails {
    pub rent_price: f64,
    pub duration: RentDuration,
    pub security_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetails {
    pub start_price: f64,
    pub reserve_price: f64,
    pub bid_increment: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Kind-specific detail record. Exactly one variant is ever present,
/// selected by the listing kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingDetails {
    Sell(SellDetails),
    Rent(RentDetails),
    Auction(AuctionDetails),
}

impl ListingDetails {
    pub fn kind(&self) -> ListingKind {
        match self {
            ListingDetails::Sell(_) => ListingKind::Sell,
            ListingDetails::Rent(_) => ListingKind::Rent,
            ListingDetails::Auction(_) => ListingKind::Auction,
        }
    }
}

/// Normalized listing data handed to the submission callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    pub name: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub condition: Condition,
    pub delivery_mode: DeliveryMode,
    pub pickup_address: Option<String>,
    pub location: GeoPoint,
    pub attributes: Vec<AttributePair>,
    pub images: Vec<String>,
    pub details: ListingDetails,
}

impl ListingPayload {
    pub fn kind(&self) -> ListingKind {
        self.details.kind()
    }
}

/// An existing listing being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    #[serde(flatten)]
    pub payload: ListingPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names_round_trip() {
        for kind in ListingKind::variants() {
            assert_eq!(ListingKind::parse(kind.as_str()), Some(*kind));
        }
        for condition in Condition::variants() {
            assert_eq!(Condition::parse(condition.as_str()), Some(*condition));
        }
        for mode in DeliveryMode::variants() {
            assert_eq!(DeliveryMode::parse(mode.as_str()), Some(*mode));
        }
        assert_eq!(ListingKind::parse("LEASE"), None);
    }

    #[test]
    fn test_rent_duration_allowed_set() {
        for duration in RentDuration::variants() {
            assert_eq!(
                RentDuration::from_months(duration.months()),
                Some(*duration)
            );
        }
        assert_eq!(RentDuration::from_months(2), None);
        assert_eq!(RentDuration::from_months(0), None);
    }

    #[test]
    fn test_details_serialize_tagged_by_kind() {
        let details = ListingDetails::Sell(SellDetails { price: 999.0 });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["kind"], "SELL");
        assert_eq!(json["price"], 999.0);
    }
}
