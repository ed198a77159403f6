use crate::apdu::ConfirmedRequestHeader;
use crate::encoding::{
    primitives::{
        decode_ctx_object_id, decode_ctx_unsigned, decode_optional_ctx_unsigned,
        encode_ctx_object_id, encode_ctx_unsigned,
    },
    reader::Reader,
    writer::Writer,
};
use crate::registry::{ElementType, TypeRegistry};
use crate::services::value_codec::{decode_sequence_of, encode_sequence_of};
use crate::types::{DataValue, ObjectId, PropertyId, SequenceOf};
use crate::{DecodeError, EncodeError};

pub const SERVICE_ADD_LIST_ELEMENT: u8 = 0x08;
pub const SERVICE_REMOVE_LIST_ELEMENT: u8 = 0x09;

/// The two structurally identical list-element services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListElementService {
    Add,
    Remove,
}

impl ListElementService {
    pub const fn service_choice(self) -> u8 {
        match self {
            Self::Add => SERVICE_ADD_LIST_ELEMENT,
            Self::Remove => SERVICE_REMOVE_LIST_ELEMENT,
        }
    }

    pub const fn from_service_choice(value: u8) -> Option<Self> {
        match value {
            SERVICE_ADD_LIST_ELEMENT => Some(Self::Add),
            SERVICE_REMOVE_LIST_ELEMENT => Some(Self::Remove),
            _ => None,
        }
    }
}

/// A decoded AddListElement or RemoveListElement request.
///
/// Absence of `array_index` selects list mode; a present index selects
/// array mode starting at that 1-based slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ListElementRequest {
    pub service: ListElementService,
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub elements: SequenceOf<DataValue>,
    pub invoke_id: u8,
}

impl ListElementRequest {
    pub fn add(
        object_id: ObjectId,
        property_id: PropertyId,
        elements: impl Into<SequenceOf<DataValue>>,
    ) -> Self {
        Self {
            service: ListElementService::Add,
            object_id,
            property_id,
            array_index: None,
            elements: elements.into(),
            invoke_id: 0,
        }
    }

    pub fn remove(
        object_id: ObjectId,
        property_id: PropertyId,
        elements: impl Into<SequenceOf<DataValue>>,
    ) -> Self {
        Self {
            service: ListElementService::Remove,
            ..Self::add(object_id, property_id, elements)
        }
    }

    pub fn with_array_index(mut self, array_index: u32) -> Self {
        self.array_index = Some(array_index);
        self
    }

    pub fn with_invoke_id(mut self, invoke_id: u8) -> Self {
        self.invoke_id = invoke_id;
        self
    }

    /// Writes the confirmed-request header followed by the body.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        ConfirmedRequestHeader::unsegmented(self.invoke_id, self.service.service_choice())
            .encode(w)?;
        self.encode_body(w)
    }

    pub fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_ctx_object_id(w, 0, self.object_id)?;
        encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
        if let Some(array_index) = self.array_index {
            encode_ctx_unsigned(w, 2, array_index)?;
        }
        encode_sequence_of(w, 3, self.elements.as_slice())
    }

    /// Decodes a complete confirmed-request APDU.
    pub fn decode<R: TypeRegistry + ?Sized>(
        r: &mut Reader<'_>,
        registry: &R,
    ) -> Result<Self, DecodeError> {
        let header = ConfirmedRequestHeader::decode(r)?;
        if header.segmented {
            return Err(DecodeError::Unsupported);
        }
        let service = ListElementService::from_service_choice(header.service_choice)
            .ok_or(DecodeError::Unsupported)?;
        Self::decode_body(r, service, header.invoke_id, registry)
    }

    /// Decodes the service body; the whole remaining input must be consumed.
    ///
    /// The element list is typed by looking up the already decoded object
    /// type and property in `registry`. Properties without a definition
    /// decode their elements as untyped application primitives.
    pub fn decode_body<R: TypeRegistry + ?Sized>(
        r: &mut Reader<'_>,
        service: ListElementService,
        invoke_id: u8,
        registry: &R,
    ) -> Result<Self, DecodeError> {
        let object_id = decode_ctx_object_id(r, 0)?;
        let property_id = PropertyId::from_u32(decode_ctx_unsigned(r, 1)?);
        let array_index = decode_optional_ctx_unsigned(r, 2)?;
        let element = registry
            .lookup(object_id.object_type(), property_id)
            .map_or(ElementType::AnyPrimitive, |definition| definition.element);
        let elements = decode_sequence_of(r, 3, element)?;
        r.finish()?;
        Ok(Self {
            service,
            object_id,
            property_id,
            array_index,
            elements,
            invoke_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ListElementRequest, ListElementService, SERVICE_ADD_LIST_ELEMENT};
    use crate::apdu::ConfirmedRequestHeader;
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::registry::StandardRegistry;
    use crate::types::{
        DataValue, DeviceObjectReference, ObjectId, ObjectType, PropertyId,
    };
    use crate::DecodeError;
    use alloc::vec;

    fn encode(req: &ListElementRequest) -> alloc::vec::Vec<u8> {
        let mut buf = [0u8; 128];
        let mut w = Writer::new(&mut buf);
        req.encode(&mut w).unwrap();
        w.as_written().to_vec()
    }

    #[test]
    fn add_request_bytes() {
        let req = ListElementRequest::add(
            ObjectId::new(ObjectType::MultiStateValue, 1),
            PropertyId::AlarmValues,
            vec![DataValue::Unsigned(2), DataValue::Unsigned(3)],
        )
        .with_invoke_id(7);
        assert_eq!(
            encode(&req),
            [
                0x00, 0x05, 0x07, 0x08, 0x0C, 0x04, 0xC0, 0x00, 0x01, 0x19, 0x07, 0x3E, 0x21,
                0x02, 0x21, 0x03, 0x3F
            ]
        );
    }

    #[test]
    fn decode_uses_registry_for_composite_elements() {
        let members = vec![
            DataValue::DeviceObjectReference(DeviceObjectReference::local(ObjectId::new(
                ObjectType::LifeSafetyPoint,
                4,
            ))),
            DataValue::DeviceObjectReference(DeviceObjectReference {
                device_id: Some(ObjectId::new(ObjectType::Device, 12)),
                object_id: ObjectId::new(ObjectType::LifeSafetyPoint, 5),
            }),
        ];
        let req = ListElementRequest::remove(
            ObjectId::new(ObjectType::LifeSafetyZone, 1),
            PropertyId::ZoneMembers,
            members,
        )
        .with_invoke_id(3);
        let bytes = encode(&req);
        let mut r = Reader::new(&bytes);
        assert_eq!(
            ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap(),
            req
        );
    }

    #[test]
    fn array_index_roundtrip() {
        let req = ListElementRequest::add(
            ObjectId::new(ObjectType::Device, 9),
            PropertyId::ObjectList,
            vec![DataValue::ObjectId(ObjectId::new(ObjectType::AnalogInput, 1))],
        )
        .with_array_index(2);
        let bytes = encode(&req);
        let mut r = Reader::new(&bytes);
        let decoded = ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap();
        assert_eq!(decoded.array_index, Some(2));
        assert_eq!(decoded, req);
    }

    #[test]
    fn unknown_property_decodes_untyped_primitives() {
        let req = ListElementRequest::add(
            ObjectId::new(ObjectType::AnalogValue, 1),
            PropertyId::Proprietary(600),
            vec![DataValue::Real(1.5), DataValue::CharacterString("a".into())],
        );
        let bytes = encode(&req);
        let mut r = Reader::new(&bytes);
        assert_eq!(
            ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap(),
            req
        );
    }

    #[test]
    fn missing_element_list_is_malformed() {
        let mut buf = [0u8; 32];
        let mut w = Writer::new(&mut buf);
        ConfirmedRequestHeader::unsegmented(1, SERVICE_ADD_LIST_ELEMENT)
            .encode(&mut w)
            .unwrap();
        w.write_all(&[0x0C, 0x04, 0xC0, 0x00, 0x01, 0x19, 0x07]).unwrap();
        let mut r = Reader::new(w.as_written());
        assert_eq!(
            ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap_err(),
            DecodeError::UnexpectedEof
        );
    }

    #[test]
    fn trailing_octets_are_malformed() {
        let req = ListElementRequest::add(
            ObjectId::new(ObjectType::MultiStateValue, 1),
            PropertyId::AlarmValues,
            vec![DataValue::Unsigned(2)],
        );
        let mut bytes = encode(&req);
        bytes.push(0x21);
        let mut r = Reader::new(&bytes);
        assert_eq!(
            ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap_err(),
            DecodeError::TrailingData
        );
    }

    #[test]
    fn service_choice_mapping() {
        assert_eq!(
            ListElementService::from_service_choice(9),
            Some(ListElementService::Remove)
        );
        assert_eq!(ListElementService::from_service_choice(15), None);
        assert_eq!(ListElementService::Add.service_choice(), 8);
    }
}
