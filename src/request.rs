// Request construction for the tracking operation. Element names and nesting
// order are part of the carrier's SOAP contract and must match the WSDL.
use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::TrackError;
use crate::query::TrackingQuery;

/// Version of the tracking WSDL this client speaks.
pub const TRACK_API_VERSION: u32 = 20;
pub const TRACK_SERVICE_ID: &str = "trck";

const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Serializes a validated query into the SOAP request document.
pub fn build_track_request(
    query: &TrackingQuery,
    credentials: &Credentials,
) -> Result<String, TrackError> {
    let envelope = Envelope {
        xmlns: format!("http://fedex.com/ws/track/v{TRACK_API_VERSION}"),
        xmlns_soapenv: SOAP_ENVELOPE_NS,
        body: Body {
            track_request: TrackRequest {
                web_authentication_detail: WebAuthenticationDetail {
                    user_credential: UserCredential {
                        key: credentials.key.clone(),
                        password: credentials.password.clone(),
                    },
                },
                client_detail: ClientDetail {
                    account_number: credentials.account_number.clone(),
                    meter_number: credentials.meter_number.clone(),
                    localization: Localization {
                        language_code: "en",
                        locale_code: "us",
                    },
                },
                version: VersionId {
                    service_id: TRACK_SERVICE_ID,
                    major: TRACK_API_VERSION,
                    intermediate: 0,
                    minor: 0,
                },
                selection_details: SelectionDetails {
                    package_identifier: PackageIdentifier {
                        kind: query.identifier_type.as_str(),
                        value: query.identifier.clone(),
                    },
                    tracking_number_unique_identifier: query.unique_tracking_id.clone(),
                    paging_detail: query.paging_token.clone().map(|token| PagingDetail {
                        paging_token: token,
                    }),
                },
                processing_options: query
                    .include_detailed_scans
                    .then_some("INCLUDE_DETAILED_SCANS"),
            },
        },
    };
    quick_xml::se::to_string(&envelope)
        .map_err(|e| TrackError::Parse(format!("request serialization: {e}")))
}

#[derive(Debug, Serialize)]
#[serde(rename = "Envelope")]
struct Envelope {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    #[serde(rename = "@xmlns:soapenv")]
    xmlns_soapenv: &'static str,
    #[serde(rename = "soapenv:Body")]
    body: Body,
}

#[derive(Debug, Serialize)]
struct Body {
    #[serde(rename = "TrackRequest")]
    track_request: TrackRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TrackRequest {
    web_authentication_detail: WebAuthenticationDetail,
    client_detail: ClientDetail,
    version: VersionId,
    selection_details: SelectionDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    processing_options: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WebAuthenticationDetail {
    user_credential: UserCredential,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserCredential {
    key: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ClientDetail {
    account_number: String,
    meter_number: String,
    localization: Localization,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Localization {
    language_code: &'static str,
    locale_code: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct VersionId {
    service_id: &'static str,
    major: u32,
    intermediate: u32,
    minor: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SelectionDetails {
    package_identifier: PackageIdentifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracking_number_unique_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paging_detail: Option<PagingDetail>,
}

#[derive(Debug, Serialize)]
struct PackageIdentifier {
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PagingDetail {
    paging_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PackageIdentifierType;

    fn credentials() -> Credentials {
        Credentials::new("xkey", "xpassword", "123456789", "207000000")
    }

    #[test]
    fn every_identifier_type_yields_exactly_one_package_identifier() {
        for kind in PackageIdentifierType::ALL {
            let query = TrackingQuery::with_type("REF-0042", kind).unwrap();
            let xml = build_track_request(&query, &credentials()).unwrap();
            assert_eq!(xml.matches("<PackageIdentifier>").count(), 1, "{kind}");
            assert!(xml.contains(&format!("<Type>{kind}</Type>")));
            assert!(xml.contains("<Value>REF-0042</Value>"));
        }
    }

    #[test]
    fn envelope_declares_versioned_namespace_and_soap_body() {
        let query = TrackingQuery::tracking_number("123456789012").unwrap();
        let xml = build_track_request(&query, &credentials()).unwrap();
        assert!(xml.contains(r#"xmlns="http://fedex.com/ws/track/v20""#));
        assert!(xml.contains(r#"xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains("<soapenv:Body><TrackRequest>"));
        assert!(xml.contains("<ServiceId>trck</ServiceId>"));
        assert!(xml.contains("<Major>20</Major><Intermediate>0</Intermediate><Minor>0</Minor>"));
    }

    #[test]
    fn credentials_are_injected() {
        let query = TrackingQuery::tracking_number("123456789012").unwrap();
        let xml = build_track_request(&query, &credentials()).unwrap();
        assert!(xml.contains("<Key>xkey</Key><Password>xpassword</Password>"));
        assert!(xml.contains("<AccountNumber>123456789</AccountNumber>"));
        assert!(xml.contains("<MeterNumber>207000000</MeterNumber>"));
        assert!(xml.contains("<LanguageCode>en</LanguageCode>"));
    }

    #[test]
    fn optional_elements_appear_only_when_set() {
        let bare = build_track_request(
            &TrackingQuery::tracking_number("123456789012").unwrap(),
            &credentials(),
        )
        .unwrap();
        assert!(!bare.contains("TrackingNumberUniqueIdentifier"));
        assert!(!bare.contains("PagingDetail"));

        let full = build_track_request(
            &TrackingQuery::tracking_number("123456789012")
                .unwrap()
                .unique_tracking_id("2457710000~123456789012~FX")
                .paging_token("NEXT-PAGE"),
            &credentials(),
        )
        .unwrap();
        assert!(full.contains(
            "<TrackingNumberUniqueIdentifier>2457710000~123456789012~FX</TrackingNumberUniqueIdentifier>"
        ));
        assert!(full.contains("<PagingDetail><PagingToken>NEXT-PAGE</PagingToken></PagingDetail>"));
    }

    #[test]
    fn detailed_scans_toggle_controls_processing_options() {
        let on = build_track_request(
            &TrackingQuery::tracking_number("123456789012").unwrap(),
            &credentials(),
        )
        .unwrap();
        assert!(on.contains("<ProcessingOptions>INCLUDE_DETAILED_SCANS</ProcessingOptions>"));

        let off = build_track_request(
            &TrackingQuery::tracking_number("123456789012")
                .unwrap()
                .detailed_scans(false),
            &credentials(),
        )
        .unwrap();
        assert!(!off.contains("ProcessingOptions"));
    }
}
