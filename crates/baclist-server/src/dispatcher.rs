use crate::{ListElementHandler, PeerAddress, ServerError};
use baclist_core::apdu::confirmed::ABORT_SEGMENTATION_NOT_SUPPORTED;
use baclist_core::apdu::{AbortPdu, ApduType, ConfirmedRequestHeader, RejectPdu, SimpleAck};
use baclist_core::encoding::{
    reader::Reader,
    writer::{encode_to_vec, Writer},
};
use baclist_core::services::{ListElementRequest, ListElementService};
use baclist_core::types::RejectReason;
use baclist_core::{DecodeError, EncodeError};
use std::sync::Arc;

/// Largest APDU a BACnet/IP device accepts without segmentation.
pub const DEFAULT_MAX_APDU_OCTETS: usize = 1476;

/// Answers confirmed list-element requests with encoded response APDUs.
#[derive(Debug, Clone)]
pub struct ServiceDispatcher {
    handler: Arc<ListElementHandler>,
    max_apdu_octets: usize,
    blocking_workers: bool,
}

impl ServiceDispatcher {
    pub fn new(handler: ListElementHandler) -> Self {
        Self {
            handler: Arc::new(handler),
            max_apdu_octets: DEFAULT_MAX_APDU_OCTETS,
            blocking_workers: true,
        }
    }

    pub fn with_max_apdu_octets(mut self, max_apdu_octets: usize) -> Self {
        self.max_apdu_octets = max_apdu_octets;
        self
    }

    /// Runs the handler on tokio's blocking pool (the default) or inline.
    pub fn with_blocking_workers(mut self, enabled: bool) -> Self {
        self.blocking_workers = enabled;
        self
    }

    pub fn handler(&self) -> &ListElementHandler {
        &self.handler
    }

    /// Handles one APDU from `source`.
    ///
    /// Returns the response to send, or `None` for traffic that gets no
    /// answer (unconfirmed requests, responses, truncated headers).
    pub async fn handle_apdu(
        &self,
        apdu: &[u8],
        source: PeerAddress,
    ) -> Result<Option<Vec<u8>>, ServerError> {
        let Some(&first) = apdu.first() else {
            return Ok(None);
        };
        if ApduType::of(first) != Some(ApduType::ConfirmedRequest) {
            log::debug!("ignoring {:?} APDU from {source}", ApduType::of(first));
            return Ok(None);
        }

        let mut r = Reader::new(apdu);
        let header = match ConfirmedRequestHeader::decode(&mut r) {
            Ok(header) => header,
            Err(e) => {
                log::warn!("dropping truncated confirmed request from {source}: {e}");
                return Ok(None);
            }
        };
        let invoke_id = header.invoke_id;

        if header.segmented {
            log::warn!("aborting segmented request {invoke_id} from {source}");
            let abort = AbortPdu {
                server: true,
                invoke_id,
                reason: ABORT_SEGMENTATION_NOT_SUPPORTED,
            };
            return self.encode_response(|w| abort.encode(w)).map(Some);
        }

        let Some(service) = ListElementService::from_service_choice(header.service_choice) else {
            log::warn!(
                "rejecting unrecognized service {} from {source}",
                header.service_choice
            );
            let reject = RejectPdu::new(invoke_id, RejectReason::UnrecognizedService);
            return self.encode_response(|w| reject.encode(w)).map(Some);
        };

        let registry = self.handler.registry();
        let request = match ListElementRequest::decode_body(&mut r, service, invoke_id, registry) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("rejecting malformed {service:?} request from {source}: {e}");
                let reject = RejectPdu::new(invoke_id, reject_reason(e));
                return self.encode_response(|w| reject.encode(w)).map(Some);
            }
        };

        let outcome = if self.blocking_workers {
            let handler = Arc::clone(&self.handler);
            tokio::task::spawn_blocking(move || handler.handle(&request, &source)).await?
        } else {
            self.handler.handle(&request, &source)
        };

        let response = match outcome {
            Ok(()) => {
                let ack = SimpleAck {
                    invoke_id,
                    service_choice: service.service_choice(),
                };
                self.encode_response(|w| ack.encode(w))?
            }
            Err(err) => self.encode_response(|w| err.encode_apdu(w, invoke_id))?,
        };
        Ok(Some(response))
    }

    fn encode_response<F>(&self, encode: F) -> Result<Vec<u8>, ServerError>
    where
        F: FnMut(&mut Writer<'_>) -> Result<(), EncodeError>,
    {
        encode_to_vec(self.max_apdu_octets, encode).map_err(|e| match e {
            EncodeError::BufferTooSmall => ServerError::ResponseTooLarge {
                limit: self.max_apdu_octets,
            },
            other => other.into(),
        })
    }
}

/// Reject reason reported for a request body that failed to decode.
pub fn reject_reason(err: DecodeError) -> RejectReason {
    match err {
        DecodeError::InvalidTag => RejectReason::InvalidTag,
        DecodeError::UnexpectedEof | DecodeError::MissingContextTag(_) => {
            RejectReason::MissingRequiredParameter
        }
        DecodeError::TrailingData => RejectReason::TooManyArguments,
        DecodeError::InvalidLength | DecodeError::InvalidValue | DecodeError::Unsupported => {
            RejectReason::InvalidParameterDataType
        }
        DecodeError::CountMismatch { .. } | DecodeError::Message(_) => RejectReason::Other,
    }
}
