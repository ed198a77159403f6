use crate::types::{DataValue, PropertyId};

/// Describes one attempted property write; handed to access-control and
/// notification hooks and then discarded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyValue {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub value: DataValue,
    pub priority: Option<u8>,
}
