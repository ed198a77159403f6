use crate::apdu::ErrorPdu;
use crate::encoding::{
    primitives::{decode_ctx_unsigned, encode_ctx_unsigned},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::{BacnetError, ErrorClass, ErrorCode};
use crate::{DecodeError, EncodeError};
use core::fmt;

/// Failure of an AddListElement or RemoveListElement request.
///
/// `first_failed_element_number` is the 1-based position of the offending
/// element in the request, or 0 when the failure is not tied to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeListError {
    pub service_choice: u8,
    pub error: BacnetError,
    pub first_failed_element_number: u32,
}

impl ChangeListError {
    pub const fn new(
        service_choice: u8,
        error_class: ErrorClass,
        error_code: ErrorCode,
        first_failed_element_number: u32,
    ) -> Self {
        Self {
            service_choice,
            error: BacnetError::new(error_class, error_code),
            first_failed_element_number,
        }
    }

    pub const fn error_class(&self) -> ErrorClass {
        self.error.error_class
    }

    pub const fn error_code(&self) -> ErrorCode {
        self.error.error_code
    }

    /// Writes the body: `[0] { class, code } [1] first-failed-element-number`.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        Tag::Opening { tag_num: 0 }.encode(w)?;
        self.error.encode(w)?;
        Tag::Closing { tag_num: 0 }.encode(w)?;
        encode_ctx_unsigned(w, 1, self.first_failed_element_number)
    }

    /// Writes a complete Error PDU answering `invoke_id`.
    pub fn encode_apdu(&self, w: &mut Writer<'_>, invoke_id: u8) -> Result<(), EncodeError> {
        ErrorPdu::encode_header(w, invoke_id, self.service_choice)?;
        self.encode(w)
    }

    pub fn decode(r: &mut Reader<'_>, service_choice: u8) -> Result<Self, DecodeError> {
        Tag::expect_opening(r, 0)?;
        let error = BacnetError::decode(r)?;
        Tag::expect_closing(r, 0)?;
        Ok(Self {
            service_choice,
            error,
            first_failed_element_number: decode_ctx_unsigned(r, 1)?,
        })
    }

    /// Reads a complete Error PDU, returning its invoke id and body.
    pub fn decode_apdu(r: &mut Reader<'_>) -> Result<(u8, Self), DecodeError> {
        let header = ErrorPdu::decode_header(r)?;
        let body = Self::decode(r, header.service_choice)?;
        r.finish()?;
        Ok((header.invoke_id, body))
    }
}

impl fmt::Display for ChangeListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if self.first_failed_element_number != 0 {
            write!(f, " at element {}", self.first_failed_element_number)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChangeListError {}
