use crate::encoding::{
    primitives::{
        decode_ctx_object_id, decode_ctx_unsigned, decode_optional_ctx_object_id,
        decode_optional_ctx_unsigned, encode_ctx_object_id, encode_ctx_unsigned,
    },
    reader::Reader,
    writer::Writer,
};
use crate::types::{ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

/// `BACnetDeviceObjectReference`: an object, optionally qualified by device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceObjectReference {
    pub device_id: Option<ObjectId>,
    pub object_id: ObjectId,
}

impl DeviceObjectReference {
    pub const fn local(object_id: ObjectId) -> Self {
        Self {
            device_id: None,
            object_id,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if let Some(device_id) = self.device_id {
            encode_ctx_object_id(w, 0, device_id)?;
        }
        encode_ctx_object_id(w, 1, self.object_id)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            device_id: decode_optional_ctx_object_id(r, 0)?,
            object_id: decode_ctx_object_id(r, 1)?,
        })
    }
}

/// `BACnetDeviceObjectPropertyReference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceObjectPropertyReference {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub device_id: Option<ObjectId>,
}

impl DeviceObjectPropertyReference {
    pub const fn new(object_id: ObjectId, property_id: PropertyId) -> Self {
        Self {
            object_id,
            property_id,
            array_index: None,
            device_id: None,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_ctx_object_id(w, 0, self.object_id)?;
        encode_ctx_unsigned(w, 1, self.property_id.to_u32())?;
        if let Some(index) = self.array_index {
            encode_ctx_unsigned(w, 2, index)?;
        }
        if let Some(device_id) = self.device_id {
            encode_ctx_object_id(w, 3, device_id)?;
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            object_id: decode_ctx_object_id(r, 0)?,
            property_id: PropertyId::from_u32(decode_ctx_unsigned(r, 1)?),
            array_index: decode_optional_ctx_unsigned(r, 2)?,
            device_id: decode_optional_ctx_object_id(r, 3)?,
        })
    }
}
