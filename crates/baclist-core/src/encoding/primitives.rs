use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::ObjectId;
use crate::{DecodeError, EncodeError};

/// Number of content octets for an unsigned value in its minimal encoding.
pub const fn unsigned_len(value: u32) -> u32 {
    if value <= 0xFF {
        1
    } else if value <= 0xFFFF {
        2
    } else if value <= 0xFF_FFFF {
        3
    } else {
        4
    }
}

/// Number of content octets for a signed value in its minimal encoding.
pub const fn signed_len(value: i32) -> u32 {
    if value >= -128 && value <= 127 {
        1
    } else if value >= -32_768 && value <= 32_767 {
        2
    } else if value >= -8_388_608 && value <= 8_388_607 {
        3
    } else {
        4
    }
}

pub fn encode_unsigned(w: &mut Writer<'_>, value: u32) -> Result<usize, EncodeError> {
    let len = unsigned_len(value) as usize;
    w.write_all(&value.to_be_bytes()[4 - len..])?;
    Ok(len)
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    if len == 0 || len > 4 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(r
        .read_exact(len)?
        .iter()
        .fold(0u32, |acc, b| (acc << 8) | *b as u32))
}

pub fn encode_signed(w: &mut Writer<'_>, value: i32) -> Result<usize, EncodeError> {
    let len = signed_len(value) as usize;
    w.write_all(&value.to_be_bytes()[4 - len..])?;
    Ok(len)
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i32, DecodeError> {
    if len == 0 || len > 4 {
        return Err(DecodeError::InvalidLength);
    }
    let bytes = r.read_exact(len)?;
    let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 4];
    out[4 - len..].copy_from_slice(bytes);
    Ok(i32::from_be_bytes(out))
}

pub fn encode_ctx_unsigned(w: &mut Writer<'_>, tag_num: u8, value: u32) -> Result<(), EncodeError> {
    Tag::Context {
        tag_num,
        len: unsigned_len(value),
    }
    .encode(w)?;
    encode_unsigned(w, value).map(|_| ())
}

pub fn encode_ctx_object_id(
    w: &mut Writer<'_>,
    tag_num: u8,
    object_id: ObjectId,
) -> Result<(), EncodeError> {
    Tag::Context { tag_num, len: 4 }.encode(w)?;
    w.write_be_u32(object_id.raw())
}

pub fn encode_opening_tag(w: &mut Writer<'_>, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)
}

pub fn encode_closing_tag(w: &mut Writer<'_>, tag_num: u8) -> Result<(), EncodeError> {
    Tag::Closing { tag_num }.encode(w)
}

pub fn encode_app_enumerated(w: &mut Writer<'_>, value: u32) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::Enumerated,
        len: unsigned_len(value),
    }
    .encode(w)?;
    encode_unsigned(w, value).map(|_| ())
}

pub fn decode_app_enumerated(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::Enumerated,
            len,
        } => decode_unsigned(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

/// Decodes a required context-tagged unsigned integer.
///
/// A different tag (or none) at this position is a malformed message.
pub fn decode_ctx_unsigned(r: &mut Reader<'_>, tag_num: u8) -> Result<u32, DecodeError> {
    decode_optional_ctx_unsigned(r, tag_num)?.ok_or(DecodeError::MissingContextTag(tag_num))
}

/// Decodes a context-tagged unsigned integer if the next tag carries `tag_num`.
///
/// Leaves the cursor untouched when the field is absent.
pub fn decode_optional_ctx_unsigned(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Option<u32>, DecodeError> {
    if r.is_empty() {
        return Ok(None);
    }
    match Tag::peek(r)? {
        Tag::Context { tag_num: n, len } if n == tag_num => {
            Tag::decode(r)?;
            decode_unsigned(r, len as usize).map(Some)
        }
        _ => Ok(None),
    }
}

pub fn decode_ctx_object_id(r: &mut Reader<'_>, tag_num: u8) -> Result<ObjectId, DecodeError> {
    decode_optional_ctx_object_id(r, tag_num)?.ok_or(DecodeError::MissingContextTag(tag_num))
}

pub fn decode_optional_ctx_object_id(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Option<ObjectId>, DecodeError> {
    if r.is_empty() {
        return Ok(None);
    }
    match Tag::peek(r)? {
        Tag::Context { tag_num: n, len } if n == tag_num => {
            Tag::decode(r)?;
            if len != 4 {
                return Err(DecodeError::InvalidLength);
            }
            Ok(Some(ObjectId::from_raw(r.read_be_u32()?)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        decode_ctx_object_id, decode_ctx_unsigned, decode_optional_ctx_unsigned, decode_signed,
        decode_unsigned, encode_ctx_object_id, encode_ctx_unsigned, encode_signed,
        encode_unsigned,
    };
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::types::{ObjectId, ObjectType};
    use crate::DecodeError;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unsigned_roundtrip(v in any::<u32>()) {
            let mut b = [0u8; 8];
            let mut w = Writer::new(&mut b);
            let len = encode_unsigned(&mut w, v).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_unsigned(&mut r, len).unwrap(), v);
        }

        #[test]
        fn signed_roundtrip(v in any::<i32>()) {
            let mut b = [0u8; 8];
            let mut w = Writer::new(&mut b);
            let len = encode_signed(&mut w, v).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_signed(&mut r, len).unwrap(), v);
        }

        #[test]
        fn ctx_unsigned_roundtrip(tag_num in 0u8..=254, v in any::<u32>()) {
            let mut b = [0u8; 16];
            let mut w = Writer::new(&mut b);
            encode_ctx_unsigned(&mut w, tag_num, v).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_ctx_unsigned(&mut r, tag_num).unwrap(), v);
            prop_assert!(r.is_empty());
        }
    }

    #[test]
    fn unsigned_uses_minimal_octets() {
        for (value, expected) in [(0u32, 1usize), (255, 1), (256, 2), (65_536, 3), (1 << 24, 4)] {
            let mut b = [0u8; 4];
            let mut w = Writer::new(&mut b);
            assert_eq!(encode_unsigned(&mut w, value).unwrap(), expected);
        }
    }

    #[test]
    fn optional_field_absent_leaves_cursor() {
        let mut b = [0u8; 16];
        let mut w = Writer::new(&mut b);
        encode_ctx_unsigned(&mut w, 3, 9).unwrap();
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_optional_ctx_unsigned(&mut r, 2).unwrap(), None);
        assert_eq!(r.position(), 0);
        assert_eq!(
            decode_ctx_unsigned(&mut r, 2).unwrap_err(),
            DecodeError::MissingContextTag(2)
        );
        assert_eq!(decode_ctx_unsigned(&mut r, 3).unwrap(), 9);
    }

    #[test]
    fn ctx_object_id_roundtrip() {
        let id = ObjectId::new(ObjectType::Device, 1234);
        let mut b = [0u8; 8];
        let mut w = Writer::new(&mut b);
        encode_ctx_object_id(&mut w, 0, id).unwrap();
        assert_eq!(w.as_written(), &[0x0C, 0x02, 0x00, 0x04, 0xD2]);
        let mut r = Reader::new(w.as_written());
        assert_eq!(decode_ctx_object_id(&mut r, 0).unwrap(), id);
    }
}
