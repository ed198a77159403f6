use crate::encoding::{
    primitives::{decode_app_enumerated, encode_app_enumerated},
    reader::Reader,
    writer::Writer,
};
use crate::types::{ErrorClass, ErrorCode};
use crate::{DecodeError, EncodeError};
use core::fmt;

/// The `Error` datatype: an (error-class, error-code) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacnetError {
    pub error_class: ErrorClass,
    pub error_code: ErrorCode,
}

impl BacnetError {
    pub const fn new(error_class: ErrorClass, error_code: ErrorCode) -> Self {
        Self {
            error_class,
            error_code,
        }
    }

    /// Writes the two application-tagged enumerations.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_app_enumerated(w, self.error_class.to_u32())?;
        encode_app_enumerated(w, self.error_code.to_u32())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let error_class =
            ErrorClass::from_u32(decode_app_enumerated(r)?).ok_or(DecodeError::InvalidValue)?;
        let error_code =
            ErrorCode::from_u32(decode_app_enumerated(r)?).ok_or(DecodeError::InvalidValue)?;
        Ok(Self::new(error_class, error_code))
    }
}

impl fmt::Display for BacnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.error_class, self.error_code)
    }
}
