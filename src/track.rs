// Domain model projected from one resolved shipment fragment.
use chrono::{DateTime, FixedOffset};

use crate::response::{OtherIdentifier, TrackDetail, TrackEvent};

/// One scan event in a shipment's movement history.
#[derive(Debug, Clone)]
pub struct Event {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub event_type: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub state_or_province: Option<String>,
    pub country: Option<String>,
}

impl Event {
    fn from_fragment(raw: &TrackEvent) -> Self {
        let address = raw.address.as_ref();
        Self {
            timestamp: raw.timestamp.as_deref().and_then(parse_timestamp),
            event_type: raw.event_type.clone().unwrap_or_default(),
            description: raw.event_description.clone(),
            city: address.and_then(|a| a.city.clone()),
            state_or_province: address.and_then(|a| a.state_or_province_code.clone()),
            country: address.and_then(|a| a.country_code.clone()),
        }
    }
}

/// Tracking snapshot for a single resolved shipment. Built once from a parsed
/// fragment and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TrackingRecord {
    pub tracking_number: String,
    pub unique_tracking_number: Option<String>,
    pub signature_name: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<String>,
    pub status_code: Option<String>,
    /// Present iff the fragment carries an ACTUAL_DELIVERY dated entry.
    pub delivery_at: Option<DateTime<FixedOffset>>,
    pub other_identifiers: Vec<OtherIdentifier>,
    pub events: Vec<Event>,
    /// The parsed fragment itself, kept for callers that need fields not
    /// lifted into the record.
    pub details: TrackDetail,
}

impl TrackingRecord {
    pub fn from_details(details: &TrackDetail) -> Self {
        let delivery_at = details
            .dates_or_times
            .iter()
            .find(|entry| entry.kind.as_deref() == Some("ACTUAL_DELIVERY"))
            .and_then(|entry| entry.date_or_timestamp.as_deref())
            .and_then(parse_timestamp);
        Self {
            tracking_number: details.tracking_number.clone().unwrap_or_default(),
            unique_tracking_number: details.tracking_number_unique_identifier.clone(),
            signature_name: details.delivery_signature_name.clone(),
            service_type: details.service.as_ref().and_then(|s| s.kind.clone()),
            status: details
                .status_detail
                .as_ref()
                .and_then(|s| s.description.clone()),
            status_code: details.status_detail.as_ref().and_then(|s| s.code.clone()),
            delivery_at,
            other_identifiers: details.other_identifiers.clone(),
            events: details.events.iter().map(Event::from_fragment).collect(),
            details: details.clone(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{parse_reply, SAMPLE_DELIVERED_REPLY};

    fn delivered_detail() -> TrackDetail {
        parse_reply(SAMPLE_DELIVERED_REPLY)
            .unwrap()
            .body
            .track_reply
            .unwrap()
            .completed_track_details
            .unwrap()
            .track_details
            .remove(0)
    }

    #[test]
    fn record_fields_match_the_fragment() {
        let record = TrackingRecord::from_details(&delivered_detail());
        assert_eq!(record.tracking_number, "123456789012");
        assert_eq!(
            record.unique_tracking_number.as_deref(),
            Some("2457710000~123456789012~FX")
        );
        assert_eq!(record.signature_name.as_deref(), Some("J.SMITH"));
        assert_eq!(record.service_type.as_deref(), Some("FEDEX_GROUND"));
        assert_eq!(record.status.as_deref(), Some("Delivered"));
        assert_eq!(record.status_code.as_deref(), Some("DL"));
        assert_eq!(record.other_identifiers.len(), 1);
    }

    #[test]
    fn delivery_at_comes_from_the_actual_delivery_entry() {
        let record = TrackingRecord::from_details(&delivered_detail());
        let expected = DateTime::parse_from_rfc3339("2023-01-05T10:00:00Z").unwrap();
        assert_eq!(record.delivery_at, Some(expected));
    }

    #[test]
    fn delivery_at_is_absent_without_an_actual_delivery_entry() {
        let mut detail = delivered_detail();
        detail
            .dates_or_times
            .retain(|entry| entry.kind.as_deref() != Some("ACTUAL_DELIVERY"));
        let record = TrackingRecord::from_details(&detail);
        assert!(record.delivery_at.is_none());
    }

    #[test]
    fn events_keep_document_order_and_locations() {
        let record = TrackingRecord::from_details(&delivered_detail());
        assert_eq!(record.events.len(), 2);
        assert_eq!(record.events[0].event_type, "DL");
        assert_eq!(record.events[0].city.as_deref(), Some("SEATTLE"));
        assert_eq!(record.events[1].event_type, "OD");
        assert!(record.events[1].city.is_none());
        assert!(record.events[1].timestamp.is_some());
    }
}
