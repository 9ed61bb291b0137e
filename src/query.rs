use std::fmt;
use std::str::FromStr;

use crate::error::TrackError;

/// Identifier kinds the carrier accepts in a tracking query. The set is fixed
/// by the tracking WSDL; anything else is rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageIdentifierType {
    BillOfLading,
    CodReturnTrackingNumber,
    CustomerAuthorizationNumber,
    CustomerReference,
    Department,
    FreeFormReference,
    GroundInternational,
    GroundShipmentId,
    GroupMps,
    Invoice,
    JobGlobalTrackingNumber,
    OrderGlobalTrackingNumber,
    OrderToPayNumber,
    PartnerCarrierNumber,
    PartNumber,
    PurchaseOrder,
    ReturnMaterialsAuthorization,
    ReturnedToShipperTrackingNumber,
    TrackingControlNumber,
    TrackingNumberOrDoortag,
    TransportationControlNumber,
    ShipperReference,
    StandardMps,
}

impl PackageIdentifierType {
    pub const ALL: [PackageIdentifierType; 23] = [
        Self::BillOfLading,
        Self::CodReturnTrackingNumber,
        Self::CustomerAuthorizationNumber,
        Self::CustomerReference,
        Self::Department,
        Self::FreeFormReference,
        Self::GroundInternational,
        Self::GroundShipmentId,
        Self::GroupMps,
        Self::Invoice,
        Self::JobGlobalTrackingNumber,
        Self::OrderGlobalTrackingNumber,
        Self::OrderToPayNumber,
        Self::PartnerCarrierNumber,
        Self::PartNumber,
        Self::PurchaseOrder,
        Self::ReturnMaterialsAuthorization,
        Self::ReturnedToShipperTrackingNumber,
        Self::TrackingControlNumber,
        Self::TrackingNumberOrDoortag,
        Self::TransportationControlNumber,
        Self::ShipperReference,
        Self::StandardMps,
    ];

    /// Wire name as it appears in the `PackageIdentifier/Type` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BillOfLading => "BILL_OF_LADING",
            Self::CodReturnTrackingNumber => "COD_RETURN_TRACKING_NUMBER",
            Self::CustomerAuthorizationNumber => "CUSTOMER_AUTHORIZATION_NUMBER",
            Self::CustomerReference => "CUSTOMER_REFERENCE",
            Self::Department => "DEPARTMENT",
            Self::FreeFormReference => "FREE_FORM_REFERENCE",
            Self::GroundInternational => "GROUND_INTERNATIONAL",
            Self::GroundShipmentId => "GROUND_SHIPMENT_ID",
            Self::GroupMps => "GROUP_MPS",
            Self::Invoice => "INVOICE",
            Self::JobGlobalTrackingNumber => "JOB_GLOBAL_TRACKING_NUMBER",
            Self::OrderGlobalTrackingNumber => "ORDER_GLOBAL_TRACKING_NUMBER",
            Self::OrderToPayNumber => "ORDER_TO_PAY_NUMBER",
            Self::PartnerCarrierNumber => "PARTNER_CARRIER_NUMBER",
            Self::PartNumber => "PART_NUMBER",
            Self::PurchaseOrder => "PURCHASE_ORDER",
            Self::ReturnMaterialsAuthorization => "RETURN_MATERIALS_AUTHORIZATION",
            Self::ReturnedToShipperTrackingNumber => "RETURNED_TO_SHIPPER_TRACKING_NUMBER",
            Self::TrackingControlNumber => "TRACKING_CONTROL_NUMBER",
            Self::TrackingNumberOrDoortag => "TRACKING_NUMBER_OR_DOORTAG",
            Self::TransportationControlNumber => "TRANSPORTATION_CONTROL_NUMBER",
            Self::ShipperReference => "SHIPPER_REFERENCE",
            Self::StandardMps => "STANDARD_MPS",
        }
    }
}

impl FromStr for PackageIdentifierType {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TrackError::Validation(format!("unknown package identifier type '{s}'")))
    }
}

impl fmt::Display for PackageIdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracking query as submitted to the carrier. Validated on construction,
/// immutable afterwards; discarded once the request document is built.
#[derive(Debug, Clone)]
pub struct TrackingQuery {
    pub identifier: String,
    pub identifier_type: PackageIdentifierType,
    pub include_detailed_scans: bool,
    pub unique_tracking_id: Option<String>,
    pub paging_token: Option<String>,
}

impl TrackingQuery {
    pub fn new(identifier: impl Into<String>, identifier_type: &str) -> Result<Self, TrackError> {
        Self::with_type(identifier, identifier_type.parse()?)
    }

    pub fn with_type(
        identifier: impl Into<String>,
        identifier_type: PackageIdentifierType,
    ) -> Result<Self, TrackError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(TrackError::Validation(
                "package identifier value is required".to_string(),
            ));
        }
        Ok(Self {
            identifier,
            identifier_type,
            include_detailed_scans: true,
            unique_tracking_id: None,
            paging_token: None,
        })
    }

    /// Shortcut for the common case of tracking by number or door tag.
    pub fn tracking_number(number: impl Into<String>) -> Result<Self, TrackError> {
        Self::with_type(number, PackageIdentifierType::TrackingNumberOrDoortag)
    }

    /// Pins the query to one shipment when several share the same
    /// human-facing tracking number.
    pub fn unique_tracking_id(mut self, id: impl Into<String>) -> Self {
        self.unique_tracking_id = Some(id.into());
        self
    }

    /// Carries the carrier's continuation cursor for paged result sets.
    pub fn paging_token(mut self, token: impl Into<String>) -> Self {
        self.paging_token = Some(token.into());
        self
    }

    pub fn detailed_scans(mut self, include: bool) -> Self {
        self.include_detailed_scans = include;
        self
    }
}
