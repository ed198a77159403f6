//! Property type registry.
//!
//! The list-element services are typed by the target property, not by the
//! request: a [`TypeRegistry`] answers, for an (object type, property) pair,
//! which element type is expected and whether the property is a single
//! value, a list, or an array. Request decoding and element validation both
//! go through the returned [`PropertyTypeDefinition`].

use crate::encoding::tag::AppTag;
use crate::types::{DataValue, ObjectType, PropertyId};
use alloc::collections::BTreeMap;

/// Expected type of a property value or of each list/array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    Null,
    Boolean,
    Unsigned,
    Signed,
    Real,
    Double,
    OctetString,
    CharacterString,
    BitString,
    Enumerated,
    Date,
    Time,
    ObjectId,
    /// Any primitive application datatype, e.g. priority-array slots.
    AnyPrimitive,
    DeviceObjectReference,
    DeviceObjectPropertyReference,
    Error,
}

impl ElementType {
    /// Whether `value` satisfies this type.
    pub fn accepts(self, value: &DataValue) -> bool {
        match self {
            Self::AnyPrimitive => value.is_primitive(),
            expected => value.element_type() == Some(expected),
        }
    }

    /// Application tag of a primitive type; `None` for types encoded as a
    /// constructed value.
    pub const fn app_tag(self) -> Option<AppTag> {
        Some(match self {
            Self::Null => AppTag::Null,
            Self::Boolean => AppTag::Boolean,
            Self::Unsigned => AppTag::UnsignedInt,
            Self::Signed => AppTag::SignedInt,
            Self::Real => AppTag::Real,
            Self::Double => AppTag::Double,
            Self::OctetString => AppTag::OctetString,
            Self::CharacterString => AppTag::CharacterString,
            Self::BitString => AppTag::BitString,
            Self::Enumerated => AppTag::Enumerated,
            Self::Date => AppTag::Date,
            Self::Time => AppTag::Time,
            Self::ObjectId => AppTag::ObjectId,
            Self::AnyPrimitive
            | Self::DeviceObjectReference
            | Self::DeviceObjectPropertyReference
            | Self::Error => return None,
        })
    }
}

/// Multiplicity of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyShape {
    Single,
    List,
    /// `length` is set for arrays with a fixed number of slots.
    Array { length: Option<u32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyTypeDefinition {
    pub element: ElementType,
    pub shape: PropertyShape,
}

impl PropertyTypeDefinition {
    pub const fn single(element: ElementType) -> Self {
        Self {
            element,
            shape: PropertyShape::Single,
        }
    }

    pub const fn list(element: ElementType) -> Self {
        Self {
            element,
            shape: PropertyShape::List,
        }
    }

    pub const fn array(element: ElementType) -> Self {
        Self {
            element,
            shape: PropertyShape::Array { length: None },
        }
    }

    pub const fn fixed_array(element: ElementType, length: u32) -> Self {
        Self {
            element,
            shape: PropertyShape::Array {
                length: Some(length),
            },
        }
    }

    pub const fn is_list(&self) -> bool {
        matches!(self.shape, PropertyShape::List)
    }

    pub const fn is_array(&self) -> bool {
        matches!(self.shape, PropertyShape::Array { .. })
    }

    pub fn accepts_element(&self, value: &DataValue) -> bool {
        self.element.accepts(value)
    }
}

/// Lookup contract for property type definitions.
pub trait TypeRegistry {
    fn lookup(
        &self,
        object_type: ObjectType,
        property_id: PropertyId,
    ) -> Option<PropertyTypeDefinition>;
}

impl<T: TypeRegistry + ?Sized> TypeRegistry for &T {
    fn lookup(
        &self,
        object_type: ObjectType,
        property_id: PropertyId,
    ) -> Option<PropertyTypeDefinition> {
        (**self).lookup(object_type, property_id)
    }
}

/// Built-in table of standard list/array properties, with per-device
/// additions and overrides for proprietary properties.
#[derive(Debug, Clone, Default)]
pub struct StandardRegistry {
    overrides: BTreeMap<(u16, u32), PropertyTypeDefinition>,
}

impl StandardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the definition for `(object_type, property_id)`,
    /// returning the previously registered override.
    pub fn register(
        &mut self,
        object_type: ObjectType,
        property_id: PropertyId,
        definition: PropertyTypeDefinition,
    ) -> Option<PropertyTypeDefinition> {
        self.overrides
            .insert((object_type.to_u16(), property_id.to_u32()), definition)
    }
}

impl TypeRegistry for StandardRegistry {
    fn lookup(
        &self,
        object_type: ObjectType,
        property_id: PropertyId,
    ) -> Option<PropertyTypeDefinition> {
        self.overrides
            .get(&(object_type.to_u16(), property_id.to_u32()))
            .copied()
            .or_else(|| standard_definition(object_type, property_id))
    }
}

fn standard_definition(
    object_type: ObjectType,
    property_id: PropertyId,
) -> Option<PropertyTypeDefinition> {
    use ElementType as E;
    use ObjectType as O;
    use PropertyId as P;
    type D = PropertyTypeDefinition;

    let commandable = matches!(
        object_type,
        O::AnalogOutput
            | O::AnalogValue
            | O::BinaryOutput
            | O::BinaryValue
            | O::MultiStateOutput
            | O::MultiStateValue
    );
    let multi_state = matches!(
        object_type,
        O::MultiStateInput | O::MultiStateOutput | O::MultiStateValue
    );

    Some(match (object_type, property_id) {
        (_, P::ObjectIdentifier) => D::single(E::ObjectId),
        (_, P::ObjectName) | (_, P::Description) => D::single(E::CharacterString),
        (_, P::ObjectType) => D::single(E::Enumerated),
        (_, P::StatusFlags) => D::single(E::BitString),
        (_, P::OutOfService) => D::single(E::Boolean),

        (O::Device, P::ObjectList) | (O::Device, P::StructuredObjectList) => D::array(E::ObjectId),
        (O::Device, P::VendorName) => D::single(E::CharacterString),

        (O::StructuredView, P::SubordinateList) => D::array(E::DeviceObjectReference),
        (O::StructuredView, P::SubordinateAnnotations) => D::array(E::CharacterString),

        (O::LifeSafetyZone, P::ZoneMembers)
        | (O::LifeSafetyPoint, P::MemberOf)
        | (O::LifeSafetyZone, P::MemberOf) => D::list(E::DeviceObjectReference),

        (O::Schedule, P::ListOfObjectPropertyReferences) => {
            D::list(E::DeviceObjectPropertyReference)
        }
        (O::TrendLog, P::LogDeviceObjectProperty) => D::single(E::DeviceObjectPropertyReference),

        (_, P::StateText) if multi_state => D::array(E::CharacterString),
        (O::MultiStateInput, P::AlarmValues)
        | (O::MultiStateValue, P::AlarmValues)
        | (O::MultiStateInput, P::FaultValues)
        | (O::MultiStateValue, P::FaultValues) => D::list(E::Unsigned),

        (_, P::PriorityArray) if commandable => D::fixed_array(E::AnyPrimitive, 16),

        (O::AnalogInput | O::AnalogOutput | O::AnalogValue, P::PresentValue)
        | (O::AnalogOutput | O::AnalogValue, P::RelinquishDefault) => D::single(E::Real),
        (O::AnalogInput | O::AnalogOutput | O::AnalogValue, P::Units) => {
            D::single(E::Enumerated)
        }
        (O::BinaryInput | O::BinaryOutput | O::BinaryValue, P::PresentValue)
        | (O::BinaryOutput | O::BinaryValue, P::RelinquishDefault) => D::single(E::Enumerated),
        (_, P::PresentValue) | (_, P::RelinquishDefault) if multi_state => {
            D::single(E::Unsigned)
        }

        _ => return None,
    })
}
