use crate::registry::ElementType;
use crate::types::{
    BacnetError, BitString, Date, DeviceObjectPropertyReference, DeviceObjectReference,
    FixedArray, ObjectId, SequenceOf, Time,
};
use alloc::string::String;
use alloc::vec::Vec;

/// An owned BACnet value.
///
/// Primitive application datatypes, the composite element types stored in
/// list and array properties, the `Error` datatype, and the two container
/// shapes. [`List`](Self::List) and [`Array`](Self::Array) are disjoint: a
/// value is never both.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataValue {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString(String),
    BitString(BitString),
    Enumerated(u32),
    Date(Date),
    Time(Time),
    ObjectId(ObjectId),
    DeviceObjectReference(DeviceObjectReference),
    DeviceObjectPropertyReference(DeviceObjectPropertyReference),
    Error(BacnetError),
    List(SequenceOf<DataValue>),
    Array(FixedArray<DataValue>),
}

impl DataValue {
    /// The element type this value satisfies exactly, or `None` for containers.
    pub const fn element_type(&self) -> Option<ElementType> {
        Some(match self {
            Self::Null => ElementType::Null,
            Self::Boolean(_) => ElementType::Boolean,
            Self::Unsigned(_) => ElementType::Unsigned,
            Self::Signed(_) => ElementType::Signed,
            Self::Real(_) => ElementType::Real,
            Self::Double(_) => ElementType::Double,
            Self::OctetString(_) => ElementType::OctetString,
            Self::CharacterString(_) => ElementType::CharacterString,
            Self::BitString(_) => ElementType::BitString,
            Self::Enumerated(_) => ElementType::Enumerated,
            Self::Date(_) => ElementType::Date,
            Self::Time(_) => ElementType::Time,
            Self::ObjectId(_) => ElementType::ObjectId,
            Self::DeviceObjectReference(_) => ElementType::DeviceObjectReference,
            Self::DeviceObjectPropertyReference(_) => ElementType::DeviceObjectPropertyReference,
            Self::Error(_) => ElementType::Error,
            Self::List(_) | Self::Array(_) => return None,
        })
    }

    /// True for values carried by a single application tag.
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Boolean(_)
                | Self::Unsigned(_)
                | Self::Signed(_)
                | Self::Real(_)
                | Self::Double(_)
                | Self::OctetString(_)
                | Self::CharacterString(_)
                | Self::BitString(_)
                | Self::Enumerated(_)
                | Self::Date(_)
                | Self::Time(_)
                | Self::ObjectId(_)
        )
    }
}

impl From<SequenceOf<DataValue>> for DataValue {
    fn from(list: SequenceOf<DataValue>) -> Self {
        Self::List(list)
    }
}

impl From<FixedArray<DataValue>> for DataValue {
    fn from(array: FixedArray<DataValue>) -> Self {
        Self::Array(array)
    }
}
