use baclist_core::types::{BacnetError, ErrorClass, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("encode error: {0}")]
    Encode(#[from] baclist_core::EncodeError),
    #[error("decode error: {0}")]
    Decode(#[from] baclist_core::DecodeError),
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("response payload exceeded {limit} bytes")]
    ResponseTooLarge { limit: usize },
}

/// Failure reported by a [`BacnetObject`](crate::BacnetObject) when a new
/// property value cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("property is read-only")]
    ReadOnly,
    #[error("no space to store {len} elements (limit {limit})")]
    NoSpace { len: usize, limit: usize },
    #[error("value rejected: {0}")]
    Rejected(String),
}

impl WriteError {
    /// Class and code reported to the peer.
    pub const fn bacnet_error(&self) -> BacnetError {
        match self {
            Self::ReadOnly => BacnetError::new(ErrorClass::Property, ErrorCode::WriteAccessDenied),
            Self::NoSpace { .. } => {
                BacnetError::new(ErrorClass::Resources, ErrorCode::NoSpaceToAddListElement)
            }
            Self::Rejected(_) => BacnetError::new(ErrorClass::Property, ErrorCode::ValueOutOfRange),
        }
    }
}
