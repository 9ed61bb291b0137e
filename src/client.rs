// Query execution: send, classify, and resolve duplicate waybills into
// concrete tracking records.
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::classify::{classify, Classification};
use crate::credentials::Credentials;
use crate::error::TrackError;
use crate::query::TrackingQuery;
use crate::request::build_track_request;
use crate::response::parse_reply;
use crate::track::TrackingRecord;

pub const PRODUCTION_URL: &str = "https://ws.fedex.com:443/xml/";
pub const SANDBOX_URL: &str = "https://wsbeta.fedex.com:443/xml/";

/// Delivers one request document to the carrier and returns the raw reply
/// body. Implementations own connection setup, TLS, timeouts and retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request_xml: &str) -> Result<String, TrackError>;
}

/// Transport backed by reqwest. Carrier faults ride on non-2xx statuses with
/// a SOAP body, so the status code is not filtered here; classification
/// decides from the body.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION_URL)
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_URL)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request_xml: &str) -> Result<String, TrackError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(request_xml.to_owned())
            .send()
            .await
            .map_err(|e| TrackError::Transport(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| TrackError::Transport(e.to_string()))
    }
}

// Duplicate fan-out is carrier driven; a reply keyed by a unique tracking
// identifier must resolve to concrete records, so anything deeper than this
// is a misbehaving upstream.
const MAX_DUPLICATE_DEPTH: usize = 4;

/// Executes tracking queries against the carrier, resolving duplicate-waybill
/// replies into a flat, order-preserving list of records.
pub struct TrackingClient<T: Transport> {
    credentials: Credentials,
    transport: T,
}

impl<T: Transport> TrackingClient<T> {
    pub fn new(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Resolves one query into tracking records. Fails on carrier rejection,
    /// malformed replies and transport errors alike; no retries.
    pub async fn track(&self, query: &TrackingQuery) -> Result<Vec<TrackingRecord>, TrackError> {
        self.execute(query.clone(), 0).await
    }

    // Boxed so duplicate resolution can recurse; sub-queries run
    // sequentially to keep the carrier's listing order.
    fn execute(
        &self,
        query: TrackingQuery,
        depth: usize,
    ) -> BoxFuture<'_, Result<Vec<TrackingRecord>, TrackError>> {
        async move {
            if depth > MAX_DUPLICATE_DEPTH {
                return Err(TrackError::Protocol {
                    message: Some(format!(
                        "duplicate waybill resolution exceeded {MAX_DUPLICATE_DEPTH} levels"
                    )),
                });
            }

            let request = build_track_request(&query, &self.credentials)?;
            let raw = self.transport.send(&request).await?;
            let envelope = parse_reply(&raw)?;

            let details = match classify(&envelope) {
                Classification::Success(details) => details,
                Classification::PartialFailure { message }
                | Classification::HardFailure { message } => {
                    return Err(TrackError::Protocol { message });
                }
            };

            if !details.duplicate_waybill {
                return Ok(details
                    .track_details
                    .iter()
                    .map(TrackingRecord::from_details)
                    .collect());
            }

            debug!(
                identifier = %query.identifier,
                duplicates = details.track_details.len(),
                "resolving duplicate waybill"
            );
            let mut records = Vec::new();
            for duplicate in &details.track_details {
                let Some(uuid) = duplicate.tracking_number_unique_identifier.as_deref() else {
                    return Err(TrackError::Protocol {
                        message: Some(
                            "duplicate waybill entry without a unique tracking identifier"
                                .to_string(),
                        ),
                    });
                };
                let sub_query =
                    TrackingQuery::tracking_number(query.identifier.clone())?.unique_tracking_id(uuid);
                records.extend(self.execute(sub_query, depth + 1).await?);
            }
            Ok(records)
        }
        .boxed()
    }
}
