use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::RejectReason;
use crate::{DecodeError, EncodeError};

const FLAG_SEGMENTED: u8 = 0b0000_1000;
const FLAG_MORE_FOLLOWS: u8 = 0b0000_0100;
const FLAG_SEGMENTED_RESPONSE_ACCEPTED: u8 = 0b0000_0010;
const FLAG_SERVER: u8 = 0b0000_0001;

/// Abort reason sent when a peer starts a segmented request.
pub const ABORT_SEGMENTATION_NOT_SUPPORTED: u8 = 4;

/// Reads the first APDU octet and checks its type nibble.
fn read_first_octet(r: &mut Reader<'_>, expected: ApduType) -> Result<u8, DecodeError> {
    let b0 = r.read_u8()?;
    if ApduType::of(b0) == Some(expected) {
        Ok(b0)
    } else {
        Err(DecodeError::InvalidValue)
    }
}

const fn first_octet(apdu_type: ApduType, flags: u8) -> u8 {
    ((apdu_type as u8) << 4) | flags
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRequestHeader {
    pub segmented: bool,
    pub more_follows: bool,
    pub segmented_response_accepted: bool,
    pub max_segments: u8,
    pub max_apdu: u8,
    pub invoke_id: u8,
    pub sequence_number: Option<u8>,
    pub proposed_window_size: Option<u8>,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    /// Header for an unsegmented request accepting responses up to 1476 octets.
    pub const fn unsegmented(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            segmented: false,
            more_follows: false,
            segmented_response_accepted: false,
            max_segments: 0,
            max_apdu: 5,
            invoke_id,
            sequence_number: None,
            proposed_window_size: None,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let flags = [
            (self.segmented, FLAG_SEGMENTED),
            (self.more_follows, FLAG_MORE_FOLLOWS),
            (self.segmented_response_accepted, FLAG_SEGMENTED_RESPONSE_ACCEPTED),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |acc, (_, bit)| acc | bit);

        w.write_u8(first_octet(ApduType::ConfirmedRequest, flags))?;
        w.write_u8((self.max_segments << 4) | (self.max_apdu & 0x0F))?;
        w.write_u8(self.invoke_id)?;
        if self.segmented {
            w.write_u8(self.sequence_number.unwrap_or(0))?;
            w.write_u8(self.proposed_window_size.unwrap_or(1))?;
        }
        w.write_u8(self.service_choice)
    }

    /// Reads the fixed header up to and including the service choice.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = read_first_octet(r, ApduType::ConfirmedRequest)?;
        let segmented = b0 & FLAG_SEGMENTED != 0;
        let limits = r.read_u8()?;
        let invoke_id = r.read_u8()?;
        let mut sequence_number = None;
        let mut proposed_window_size = None;
        if segmented {
            sequence_number = Some(r.read_u8()?);
            proposed_window_size = Some(r.read_u8()?);
        }
        Ok(Self {
            segmented,
            more_follows: b0 & FLAG_MORE_FOLLOWS != 0,
            segmented_response_accepted: b0 & FLAG_SEGMENTED_RESPONSE_ACCEPTED != 0,
            max_segments: limits >> 4,
            max_apdu: limits & 0x0F,
            invoke_id,
            sequence_number,
            proposed_window_size,
            service_choice: r.read_u8()?,
        })
    }
}

/// Positive acknowledgement of a confirmed request that returns no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleAck {
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl SimpleAck {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[
            first_octet(ApduType::SimpleAck, 0),
            self.invoke_id,
            self.service_choice,
        ])
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        read_first_octet(r, ApduType::SimpleAck)?;
        let [invoke_id, service_choice] = r.read_array()?;
        Ok(Self {
            invoke_id,
            service_choice,
        })
    }
}

/// Header of an Error PDU.
///
/// The service-specific error body (for the list-element services, a
/// `ChangeListError`) follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPdu {
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ErrorPdu {
    /// Writes the three header octets; the caller appends the body.
    pub fn encode_header(
        w: &mut Writer<'_>,
        invoke_id: u8,
        service_choice: u8,
    ) -> Result<(), EncodeError> {
        w.write_all(&[first_octet(ApduType::Error, 0), invoke_id, service_choice])
    }

    /// Reads the header and leaves the cursor at the start of the body.
    pub fn decode_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        read_first_octet(r, ApduType::Error)?;
        let [invoke_id, service_choice] = r.read_array()?;
        Ok(Self {
            invoke_id,
            service_choice,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectPdu {
    pub invoke_id: u8,
    pub reason: u8,
}

impl RejectPdu {
    pub const fn new(invoke_id: u8, reason: RejectReason) -> Self {
        Self {
            invoke_id,
            reason: reason.to_u8(),
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[first_octet(ApduType::Reject, 0), self.invoke_id, self.reason])
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        read_first_octet(r, ApduType::Reject)?;
        let [invoke_id, reason] = r.read_array()?;
        Ok(Self { invoke_id, reason })
    }

    /// `None` for reasons outside the standard table.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        RejectReason::from_u8(self.reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortPdu {
    pub server: bool,
    pub invoke_id: u8,
    pub reason: u8,
}

impl AbortPdu {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let flags = if self.server { FLAG_SERVER } else { 0 };
        w.write_all(&[first_octet(ApduType::Abort, flags), self.invoke_id, self.reason])
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let b0 = read_first_octet(r, ApduType::Abort)?;
        let [invoke_id, reason] = r.read_array()?;
        Ok(Self {
            server: b0 & FLAG_SERVER != 0,
            invoke_id,
            reason,
        })
    }
}
