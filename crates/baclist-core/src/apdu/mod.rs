/// Confirmed-service request header and the responses this service sends.
pub mod confirmed;
/// APDU type discriminant.
pub mod pdu;

pub use confirmed::{AbortPdu, ConfirmedRequestHeader, ErrorPdu, RejectPdu, SimpleAck};
pub use pdu::ApduType;
