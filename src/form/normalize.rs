//! Submission normalizer
//!
//! Converts the string-typed draft into the payload shape expected by the
//! submission collaborator. Runs only after validation succeeds and never
//! mutates the draft.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::types::{
    AuctionDetails, ListingDetails, ListingKind, ListingPayload, RentDetails, RentDuration,
    SellDetails,
};

use super::controller::ListingDraft;

/// Raised when a draft that passed validation still fails to convert.
#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid {0}: {1:?}")]
    Amount(&'static str, String),
    #[error("invalid timestamp: {0:?}")]
    Timestamp(String),
    #[error("invalid rent duration: {0:?}")]
    Duration(String),
}

/// Parse a `datetime-local` input value ("YYYY-MM-DDTHH:MM", optionally with
/// seconds) into an absolute UTC timestamp.
pub(super) fn parse_local_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Build the submission payload from the draft.
pub fn normalize(draft: &ListingDraft) -> Result<ListingPayload, NormalizeError> {
    let details = match draft.kind {
        ListingKind::Sell => ListingDetails::Sell(SellDetails {
            price: amount("price", &draft.price)?,
        }),
        ListingKind::Rent => {
            let rent = &draft.rent;
            let months: u32 = rent
                .duration
                .trim()
                .parse()
                .map_err(|_| NormalizeError::Duration(rent.duration.clone()))?;
            ListingDetails::Rent(RentDetails {
                rent_price: amount("rent price", &rent.rent_price)?,
                duration: RentDuration::from_months(months)
                    .ok_or_else(|| NormalizeError::Duration(rent.duration.clone()))?,
                security_amount: optional_amount("security amount", &rent.security_amount)?,
            })
        }
        ListingKind::Auction => {
            let auction = &draft.auction;
            ListingDetails::Auction(AuctionDetails {
                start_price: amount("start price", &auction.start_price)?,
                reserve_price: amount("reserve price", &auction.reserve_price)?,
                bid_increment: amount("bid increment", &auction.bid_increment)?,
                start_time: timestamp(&auction.start_time)?,
                end_time: timestamp(&auction.end_time)?,
            })
        }
    };

    let pickup_address = draft.pickup_address.trim();

    Ok(ListingPayload {
        name: draft.name.trim().to_string(),
        category_id: draft.category_id.clone(),
        subcategory_id: draft.subcategory_id.clone(),
        condition: draft.condition.ok_or(NormalizeError::Missing("condition"))?,
        delivery_mode: draft
            .delivery_mode
            .ok_or(NormalizeError::Missing("delivery mode"))?,
        pickup_address: (!pickup_address.is_empty()).then(|| pickup_address.to_string()),
        location: draft.location,
        attributes: draft.attributes.clone(),
        images: draft.images.clone(),
        details,
    })
}

fn amount(label: &'static str, raw: &str) -> Result<f64, NormalizeError> {
    raw.trim()
        .parse()
        .map_err(|_| NormalizeError::Amount(label, raw.to_string()))
}

fn timestamp(raw: &str) -> Result<DateTime<Utc>, NormalizeError> {
    parse_local_datetime(raw).ok_or_else(|| NormalizeError::Timestamp(raw.to_string()))
}

fn optional_amount(label: &'static str, raw: &str) -> Result<Option<f64>, NormalizeError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        amount(label, raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, DeliveryMode};

    fn sell_draft() -> ListingDraft {
        let mut draft = ListingDraft::default();
        draft.name = " iPhone 14 Pro ".to_string();
        draft.kind = ListingKind::Sell;
        draft.category_id = "1".to_string();
        draft.subcategory_id = "11".to_string();
        draft.condition = Some(Condition::Used);
        draft.price = "999".to_string();
        draft.delivery_mode = Some(DeliveryMode::Both);
        draft.location.longitude = -122.4194;
        draft.location.latitude = 37.7749;
        draft
    }

    #[test]
    fn test_sell_payload_parses_price_and_trims_name() {
        let payload = normalize(&sell_draft()).unwrap();
        assert_eq!(payload.name, "iPhone 14 Pro");
        assert_eq!(payload.kind(), ListingKind::Sell);
        assert_eq!(
            payload.details,
            ListingDetails::Sell(SellDetails { price: 999.0 })
        );
        assert_eq!(payload.pickup_address, None);
        assert_eq!(payload.location.coordinates(), [-122.4194, 37.7749]);
    }

    #[test]
    fn test_rent_payload_parses_duration_and_optional_deposit() {
        let mut draft = sell_draft();
        draft.kind = ListingKind::Rent;
        draft.rent.rent_price = "45.5".to_string();
        draft.rent.duration = "6".to_string();
        draft.rent.security_amount = String::new();

        let payload = normalize(&draft).unwrap();
        assert_eq!(
            payload.details,
            ListingDetails::Rent(RentDetails {
                rent_price: 45.5,
                duration: RentDuration::Six,
                security_amount: None,
            })
        );

        draft.rent.security_amount = "100".to_string();
        let payload = normalize(&draft).unwrap();
        match payload.details {
            ListingDetails::Rent(rent) => assert_eq!(rent.security_amount, Some(100.0)),
            other => panic!("expected rent details, got {other:?}"),
        }
    }

    #[test]
    fn test_auction_payload_converts_local_times_to_utc() {
        let mut draft = sell_draft();
        draft.kind = ListingKind::Auction;
        draft.auction.start_price = "100".to_string();
        draft.auction.reserve_price = "150".to_string();
        draft.auction.bid_increment = "5".to_string();
        draft.auction.start_time = "2025-06-01T10:00".to_string();
        draft.auction.end_time = "2025-06-08T10:30".to_string();

        let payload = normalize(&draft).unwrap();
        match payload.details {
            ListingDetails::Auction(auction) => {
                assert_eq!(auction.start_time.to_rfc3339(), "2025-06-01T10:00:00+00:00");
                assert_eq!(auction.end_time.to_rfc3339(), "2025-06-08T10:30:00+00:00");
                assert!(auction.end_time > auction.start_time);
            }
            other => panic!("expected auction details, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_amount_is_an_error_not_a_panic() {
        let mut draft = sell_draft();
        draft.price = "a lot".to_string();
        assert!(matches!(
            normalize(&draft),
            Err(NormalizeError::Amount("price", _))
        ));
    }

    #[test]
    fn test_pickup_address_carried_when_present() {
        let mut draft = sell_draft();
        draft.pickup_address = " 123 Main Street, City ".to_string();
        let payload = normalize(&draft).unwrap();
        assert_eq!(
            payload.pickup_address.as_deref(),
            Some("123 Main Street, City")
        );
    }
}
