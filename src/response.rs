// Typed schema for the carrier's tracking reply. Every field the contract
// marks optional is an Option here; shape problems surface at parse time or
// as a failure classification, never as a panic inside business logic.
use serde::{Deserialize, Deserializer};

use crate::error::TrackError;

/// Deserializes raw response bytes into the typed envelope.
pub fn parse_reply(raw: &str) -> Result<TrackEnvelope, TrackError> {
    quick_xml::de::from_str(raw).map_err(|e| TrackError::Parse(e.to_string()))
}

/// Outcome classification the carrier attaches to each notification.
/// Unrecognized values map to `Unknown` rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Note,
    Warning,
    Error,
    Failure,
    Unknown,
}

impl Severity {
    /// WARNING and NOTE still carry usable track data; everything outside the
    /// {SUCCESS, WARNING, NOTE} set is a failure severity.
    pub fn usable(self) -> bool {
        matches!(self, Severity::Success | Severity::Warning | Severity::Note)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "SUCCESS" => Severity::Success,
            "NOTE" => Severity::Note,
            "WARNING" => Severity::Warning,
            "ERROR" => Severity::Error,
            "FAILURE" => Severity::Failure,
            _ => Severity::Unknown,
        })
    }
}

// The carrier serializes booleans as "true"/"false" text. Decided once here,
// at the parse boundary.
fn xml_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackEnvelope {
    #[serde(alias = "soapenv:Body", alias = "SOAP-ENV:Body")]
    pub body: TrackBody,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackBody {
    pub track_reply: Option<TrackReply>,
    #[serde(alias = "soapenv:Fault", alias = "SOAP-ENV:Fault")]
    pub fault: Option<SoapFault>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackReply {
    pub highest_severity: Option<Severity>,
    pub notifications: Vec<Notification>,
    pub completed_track_details: Option<CompletedTrackDetails>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Notification {
    pub severity: Option<Severity>,
    pub source: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CompletedTrackDetails {
    pub highest_severity: Option<Severity>,
    /// Set when several shipments share the submitted identifier; the
    /// accompanying `TrackDetails` are then references, not full records.
    #[serde(deserialize_with = "xml_bool")]
    pub duplicate_waybill: bool,
    pub track_details: Vec<TrackDetail>,
}

/// One shipment fragment. For duplicate-waybill replies only the tracking
/// number and its unique identifier are populated.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackDetail {
    pub notification: Option<Notification>,
    pub tracking_number: Option<String>,
    pub tracking_number_unique_identifier: Option<String>,
    pub status_detail: Option<StatusDetail>,
    pub service: Option<ServiceDetail>,
    pub delivery_signature_name: Option<String>,
    pub other_identifiers: Vec<OtherIdentifier>,
    pub dates_or_times: Vec<TrackingDateOrTimestamp>,
    pub events: Vec<TrackEvent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StatusDetail {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceDetail {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OtherIdentifier {
    pub package_identifier: Option<ReplyPackageIdentifier>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReplyPackageIdentifier {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackingDateOrTimestamp {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub date_or_timestamp: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrackEvent {
    pub timestamp: Option<String>,
    pub event_type: Option<String>,
    pub event_description: Option<String>,
    pub status_exception_code: Option<String>,
    pub status_exception_description: Option<String>,
    pub address: Option<EventAddress>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EventAddress {
    pub city: Option<String>,
    pub state_or_province_code: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

// SOAP 1.1 fault with the carrier's fault-detail extension.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SoapFault {
    #[serde(rename = "faultcode")]
    pub code: Option<String>,
    #[serde(rename = "faultstring")]
    pub reason: Option<String>,
    #[serde(rename = "detail")]
    pub detail: Option<FaultDetail>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FaultDetail {
    #[serde(rename = "fault")]
    pub fault: Option<CarrierFault>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CarrierFault {
    #[serde(rename = "reason")]
    pub reason: Option<String>,
    #[serde(rename = "details")]
    pub details: Option<CarrierFaultDetails>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CarrierFaultDetails {
    #[serde(rename = "ValidationFailureDetail")]
    pub validation_failure_detail: Option<ValidationFailureDetail>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationFailureDetail {
    #[serde(rename = "message")]
    pub messages: Vec<String>,
}

// A delivered-shipment reply, used across the test modules.
pub const SAMPLE_DELIVERED_REPLY: &str = r#"
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <TrackReply>
      <HighestSeverity>SUCCESS</HighestSeverity>
      <Notifications>
        <Severity>SUCCESS</Severity>
        <Source>trck</Source>
        <Code>0</Code>
        <Message>Request was successfully processed.</Message>
      </Notifications>
      <CompletedTrackDetails>
        <HighestSeverity>SUCCESS</HighestSeverity>
        <DuplicateWaybill>false</DuplicateWaybill>
        <TrackDetails>
          <Notification>
            <Severity>SUCCESS</Severity>
            <Message>Request was successfully processed.</Message>
          </Notification>
          <TrackingNumber>123456789012</TrackingNumber>
          <TrackingNumberUniqueIdentifier>2457710000~123456789012~FX</TrackingNumberUniqueIdentifier>
          <StatusDetail>
            <Code>DL</Code>
            <Description>Delivered</Description>
          </StatusDetail>
          <Service>
            <Type>FEDEX_GROUND</Type>
            <Description>FedEx Ground</Description>
          </Service>
          <DeliverySignatureName>J.SMITH</DeliverySignatureName>
          <OtherIdentifiers>
            <PackageIdentifier>
              <Type>CUSTOMER_REFERENCE</Type>
              <Value>PO-7788</Value>
            </PackageIdentifier>
          </OtherIdentifiers>
          <DatesOrTimes>
            <Type>ACTUAL_DELIVERY</Type>
            <DateOrTimestamp>2023-01-05T10:00:00Z</DateOrTimestamp>
          </DatesOrTimes>
          <DatesOrTimes>
            <Type>SHIP</Type>
            <DateOrTimestamp>2023-01-02T08:00:00Z</DateOrTimestamp>
          </DatesOrTimes>
          <Events>
            <Timestamp>2023-01-05T10:00:00Z</Timestamp>
            <EventType>DL</EventType>
            <EventDescription>Delivered</EventDescription>
            <Address>
              <City>SEATTLE</City>
              <StateOrProvinceCode>WA</StateOrProvinceCode>
              <CountryCode>US</CountryCode>
            </Address>
          </Events>
          <Events>
            <Timestamp>2023-01-04T18:12:00Z</Timestamp>
            <EventType>OD</EventType>
            <EventDescription>On FedEx vehicle for delivery</EventDescription>
          </Events>
        </TrackDetails>
      </CompletedTrackDetails>
    </TrackReply>
  </soapenv:Body>
</soapenv:Envelope>
"#;
