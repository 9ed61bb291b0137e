// Response classification. Mirrors the carrier's severity semantics: WARNING
// and NOTE are usable-success, anything else (or a missing reply) is a failure.
use crate::response::{CompletedTrackDetails, Severity, SoapFault, TrackEnvelope};

/// How the executor should treat a parsed reply.
#[derive(Debug)]
pub enum Classification<'a> {
    /// Reply carries usable track details (possibly duplicate references).
    Success(&'a CompletedTrackDetails),
    /// The reply itself was accepted but this package lookup was rejected.
    PartialFailure { message: Option<String> },
    /// Protocol-level fault; no usable reply was produced.
    HardFailure { message: Option<String> },
}

pub fn classify(envelope: &TrackEnvelope) -> Classification<'_> {
    match envelope.body.track_reply.as_ref() {
        Some(reply) if reply.highest_severity.is_some_and(Severity::usable) => {
            match reply.completed_track_details.as_ref() {
                Some(details) if package_accepted(details) => Classification::Success(details),
                Some(details) => Classification::PartialFailure {
                    message: package_message(details),
                },
                None => Classification::PartialFailure { message: None },
            }
        }
        _ => Classification::HardFailure {
            message: failure_message(envelope),
        },
    }
}

fn package_accepted(details: &CompletedTrackDetails) -> bool {
    details
        .track_details
        .first()
        .and_then(|detail| detail.notification.as_ref())
        .and_then(|notification| notification.severity)
        .is_some_and(Severity::usable)
}

fn package_message(details: &CompletedTrackDetails) -> Option<String> {
    details
        .track_details
        .first()?
        .notification
        .as_ref()?
        .message
        .clone()
}

// Total extraction: a malformed failure payload yields None, never a panic.
fn failure_message(envelope: &TrackEnvelope) -> Option<String> {
    if let Some(fault) = envelope.body.fault.as_ref() {
        return carrier_fault_message(fault).or_else(|| fault.reason.clone());
    }
    envelope
        .body
        .track_reply
        .as_ref()?
        .notifications
        .first()?
        .message
        .clone()
}

fn carrier_fault_message(fault: &SoapFault) -> Option<String> {
    let carrier = fault.detail.as_ref()?.fault.as_ref()?;
    let mut message = carrier.reason.clone()?;
    if let Some(validation) = carrier
        .details
        .as_ref()
        .and_then(|details| details.validation_failure_detail.as_ref())
    {
        for line in &validation.messages {
            message.push_str("\n--");
            message.push_str(line);
        }
    }
    Some(message)
}
