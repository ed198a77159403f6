//! Application- and context-tagged encoding of [`DataValue`].
//!
//! Primitive values under a context tag carry the same content octets as
//! their application encoding but cannot be decoded without knowing the
//! expected [`ElementType`]. Everything else (composites, `Error`, lists,
//! arrays) is bracketed by an opening/closing tag pair when context tagged.

use crate::encoding::{
    primitives::{decode_signed, decode_unsigned, encode_signed, encode_unsigned},
    primitives::{signed_len, unsigned_len},
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::registry::ElementType;
use crate::types::{
    BacnetError, BitString, DataValue, Date, DeviceObjectPropertyReference,
    DeviceObjectReference, FixedArray, ObjectId, SequenceOf, Time,
};
use crate::{DecodeError, EncodeError};
use alloc::string::String;
use alloc::vec::Vec;

fn u32_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange)
}

/// Application tag and content length of a primitive value.
fn primitive_header(value: &DataValue) -> Result<(AppTag, u32), EncodeError> {
    Ok(match value {
        DataValue::Null => (AppTag::Null, 0),
        DataValue::Boolean(_) => (AppTag::Boolean, 1),
        DataValue::Unsigned(v) => (AppTag::UnsignedInt, unsigned_len(*v)),
        DataValue::Signed(v) => (AppTag::SignedInt, signed_len(*v)),
        DataValue::Real(_) => (AppTag::Real, 4),
        DataValue::Double(_) => (AppTag::Double, 8),
        DataValue::OctetString(v) => (AppTag::OctetString, u32_len(v.len())?),
        DataValue::CharacterString(v) => {
            (AppTag::CharacterString, u32_len(v.len().saturating_add(1))?)
        }
        DataValue::BitString(v) => {
            if v.unused_bits > 7 {
                return Err(EncodeError::ValueOutOfRange);
            }
            (AppTag::BitString, u32_len(v.data.len().saturating_add(1))?)
        }
        DataValue::Enumerated(v) => (AppTag::Enumerated, unsigned_len(*v)),
        DataValue::Date(_) => (AppTag::Date, 4),
        DataValue::Time(_) => (AppTag::Time, 4),
        DataValue::ObjectId(_) => (AppTag::ObjectId, 4),
        _ => return Err(EncodeError::Message("value is not primitive")),
    })
}

fn write_primitive_content(w: &mut Writer<'_>, value: &DataValue) -> Result<(), EncodeError> {
    match value {
        DataValue::Null => Ok(()),
        DataValue::Boolean(v) => w.write_u8(*v as u8),
        DataValue::Unsigned(v) | DataValue::Enumerated(v) => encode_unsigned(w, *v).map(|_| ()),
        DataValue::Signed(v) => encode_signed(w, *v).map(|_| ()),
        DataValue::Real(v) => w.write_all(&v.to_be_bytes()),
        DataValue::Double(v) => w.write_all(&v.to_be_bytes()),
        DataValue::OctetString(v) => w.write_all(v),
        DataValue::CharacterString(v) => {
            // Character set 0: UTF-8.
            w.write_u8(0)?;
            w.write_all(v.as_bytes())
        }
        DataValue::BitString(v) => {
            w.write_u8(v.unused_bits)?;
            w.write_all(&v.data)
        }
        DataValue::Date(v) => w.write_all(&v.to_bytes()),
        DataValue::Time(v) => w.write_all(&v.to_bytes()),
        DataValue::ObjectId(v) => w.write_be_u32(v.raw()),
        _ => Err(EncodeError::Message("value is not primitive")),
    }
}

/// Writes `value` in its application encoding.
///
/// Lists and arrays are written as the concatenation of their elements, the
/// form they take inside a property-value bracket.
pub fn encode_application_value(w: &mut Writer<'_>, value: &DataValue) -> Result<(), EncodeError> {
    match value {
        DataValue::DeviceObjectReference(v) => v.encode(w),
        DataValue::DeviceObjectPropertyReference(v) => v.encode(w),
        DataValue::Error(v) => v.encode(w),
        DataValue::List(list) => encode_elements(w, list.as_slice()),
        DataValue::Array(array) => encode_elements(w, array.as_slice()),
        DataValue::Boolean(v) => Tag::Application {
            tag: AppTag::Boolean,
            len: *v as u32,
        }
        .encode(w),
        primitive => {
            let (tag, len) = primitive_header(primitive)?;
            Tag::Application { tag, len }.encode(w)?;
            write_primitive_content(w, primitive)
        }
    }
}

/// Writes `value` under context tag `tag_num`.
pub fn encode_context_value(
    w: &mut Writer<'_>,
    tag_num: u8,
    value: &DataValue,
) -> Result<(), EncodeError> {
    if value.is_primitive() {
        let (_, len) = primitive_header(value)?;
        Tag::Context { tag_num, len }.encode(w)?;
        return write_primitive_content(w, value);
    }
    Tag::Opening { tag_num }.encode(w)?;
    encode_application_value(w, value)?;
    Tag::Closing { tag_num }.encode(w)
}

/// Writes `elements` bracketed by opening/closing tag `tag_num`.
pub fn encode_sequence_of(
    w: &mut Writer<'_>,
    tag_num: u8,
    elements: &[DataValue],
) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)?;
    encode_elements(w, elements)?;
    Tag::Closing { tag_num }.encode(w)
}

fn encode_elements(w: &mut Writer<'_>, elements: &[DataValue]) -> Result<(), EncodeError> {
    elements
        .iter()
        .try_for_each(|element| encode_application_value(w, element))
}

fn decode_primitive_content(
    r: &mut Reader<'_>,
    tag: AppTag,
    len: u32,
) -> Result<DataValue, DecodeError> {
    let len = len as usize;
    let fixed = |expected: usize| {
        if len == expected {
            Ok(())
        } else {
            Err(DecodeError::InvalidLength)
        }
    };
    Ok(match tag {
        AppTag::Null => {
            fixed(0)?;
            DataValue::Null
        }
        AppTag::Boolean => {
            fixed(1)?;
            match r.read_u8()? {
                0 => DataValue::Boolean(false),
                1 => DataValue::Boolean(true),
                _ => return Err(DecodeError::InvalidValue),
            }
        }
        AppTag::UnsignedInt => DataValue::Unsigned(decode_unsigned(r, len)?),
        AppTag::SignedInt => DataValue::Signed(decode_signed(r, len)?),
        AppTag::Real => {
            fixed(4)?;
            DataValue::Real(f32::from_be_bytes(r.read_array()?))
        }
        AppTag::Double => {
            fixed(8)?;
            DataValue::Double(f64::from_be_bytes(r.read_array()?))
        }
        AppTag::OctetString => DataValue::OctetString(r.read_exact(len)?.to_vec()),
        AppTag::CharacterString => {
            if len == 0 {
                return Err(DecodeError::InvalidLength);
            }
            let raw = r.read_exact(len)?;
            if raw[0] != 0 {
                return Err(DecodeError::Unsupported);
            }
            let text = core::str::from_utf8(&raw[1..]).map_err(|_| DecodeError::InvalidValue)?;
            DataValue::CharacterString(String::from(text))
        }
        AppTag::BitString => {
            if len == 0 {
                return Err(DecodeError::InvalidLength);
            }
            let raw = r.read_exact(len)?;
            if raw[0] > 7 {
                return Err(DecodeError::InvalidValue);
            }
            DataValue::BitString(BitString::new(raw[0], raw[1..].to_vec()))
        }
        AppTag::Enumerated => DataValue::Enumerated(decode_unsigned(r, len)?),
        AppTag::Date => {
            fixed(4)?;
            DataValue::Date(Date::from_bytes(r.read_array()?))
        }
        AppTag::Time => {
            fixed(4)?;
            DataValue::Time(Time::from_bytes(r.read_array()?))
        }
        AppTag::ObjectId => {
            fixed(4)?;
            DataValue::ObjectId(ObjectId::from_raw(r.read_be_u32()?))
        }
    })
}

/// Decodes one application-tagged primitive of any type.
pub fn decode_application_value(r: &mut Reader<'_>) -> Result<DataValue, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Boolean,
            len,
        } => Ok(DataValue::Boolean(len != 0)),
        Tag::Application { tag, len } => decode_primitive_content(r, tag, len),
        _ => Err(DecodeError::InvalidTag),
    }
}

/// Decodes one list or array element of the given type.
///
/// Primitive element types accept any application-tagged primitive so that
/// a wrong-typed element is reported by validation rather than as a
/// malformed message. The same applies to an application-tagged value where
/// a composite was expected. `Error` is the exception: its fields are
/// themselves application tagged.
pub fn decode_element(r: &mut Reader<'_>, element: ElementType) -> Result<DataValue, DecodeError> {
    if element.app_tag().is_some()
        || element == ElementType::AnyPrimitive
        || (element != ElementType::Error && matches!(Tag::peek(r)?, Tag::Application { .. }))
    {
        return decode_application_value(r);
    }
    match element {
        ElementType::DeviceObjectReference => {
            DeviceObjectReference::decode(r).map(DataValue::DeviceObjectReference)
        }
        ElementType::DeviceObjectPropertyReference => {
            DeviceObjectPropertyReference::decode(r).map(DataValue::DeviceObjectPropertyReference)
        }
        ElementType::Error => BacnetError::decode(r).map(DataValue::Error),
        _ => Err(DecodeError::Unsupported),
    }
}

/// Decodes a required value under context tag `tag_num`.
pub fn decode_context_value(
    r: &mut Reader<'_>,
    tag_num: u8,
    element: ElementType,
) -> Result<DataValue, DecodeError> {
    match element.app_tag() {
        Some(app_tag) => match Tag::decode(r)? {
            Tag::Context { tag_num: n, len } if n == tag_num => {
                decode_primitive_content(r, app_tag, len)
            }
            _ => Err(DecodeError::MissingContextTag(tag_num)),
        },
        None => {
            Tag::expect_opening(r, tag_num)?;
            let value = decode_element(r, element)?;
            Tag::expect_closing(r, tag_num)?;
            Ok(value)
        }
    }
}

/// Decodes a value under context tag `tag_num` if present; the cursor is
/// left untouched when the next tag carries another number.
pub fn decode_optional_context_value(
    r: &mut Reader<'_>,
    tag_num: u8,
    element: ElementType,
) -> Result<Option<DataValue>, DecodeError> {
    if r.is_empty() || Tag::peek(r)?.context_number() != Some(tag_num) {
        return Ok(None);
    }
    if matches!(Tag::peek(r)?, Tag::Closing { .. }) {
        return Ok(None);
    }
    decode_context_value(r, tag_num, element).map(Some)
}

/// Decodes elements bracketed by opening/closing tag `tag_num` until the
/// matching closing tag.
pub fn decode_sequence_of(
    r: &mut Reader<'_>,
    tag_num: u8,
    element: ElementType,
) -> Result<SequenceOf<DataValue>, DecodeError> {
    Tag::expect_opening(r, tag_num)?;
    let mut values = Vec::new();
    while Tag::peek(r)? != (Tag::Closing { tag_num }) {
        values.push(decode_element(r, element)?);
    }
    Tag::decode(r)?;
    Ok(SequenceOf::from(values))
}

/// Like [`decode_sequence_of`], additionally checking the element count
/// against `length` when the array has a fixed size.
pub fn decode_fixed_array(
    r: &mut Reader<'_>,
    tag_num: u8,
    element: ElementType,
    length: Option<u32>,
) -> Result<FixedArray<DataValue>, DecodeError> {
    let values = decode_sequence_of(r, tag_num, element)?.into_vec();
    if let Some(expected) = length {
        let actual = u32::try_from(values.len()).map_err(|_| DecodeError::InvalidLength)?;
        if actual != expected {
            return Err(DecodeError::CountMismatch { expected, actual });
        }
    }
    Ok(FixedArray::new(values))
}
