// Client for the FedEx tracking SOAP web service: request construction,
// response classification and duplicate-waybill resolution.

pub mod classify;
pub mod client;
pub mod credentials;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod track;

// Re-export key types for convenience
pub use classify::{classify, Classification};
pub use client::{HttpTransport, TrackingClient, Transport, PRODUCTION_URL, SANDBOX_URL};
pub use credentials::Credentials;
pub use error::TrackError;
pub use query::{PackageIdentifierType, TrackingQuery};
pub use request::{build_track_request, TRACK_API_VERSION, TRACK_SERVICE_ID};
pub use response::{parse_reply, Severity, TrackEnvelope};
pub use track::{Event, TrackingRecord};
