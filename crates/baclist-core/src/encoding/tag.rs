use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

const CLASS_CONTEXT: u8 = 0b0000_1000;
const LVT_EXTENDED_LEN: u8 = 5;
const LVT_OPENING: u8 = 6;
const LVT_CLOSING: u8 = 7;
const EXTENDED_TAG_NUM: u8 = 0x0F;

/// Application tag numbers for the primitive BACnet datatypes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    UnsignedInt = 2,
    SignedInt = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectId = 12,
}

impl AppTag {
    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {
        Ok(match value {
            0 => Self::Null,
            1 => Self::Boolean,
            2 => Self::UnsignedInt,
            3 => Self::SignedInt,
            4 => Self::Real,
            5 => Self::Double,
            6 => Self::OctetString,
            7 => Self::CharacterString,
            8 => Self::BitString,
            9 => Self::Enumerated,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::ObjectId,
            _ => return Err(DecodeError::InvalidTag),
        })
    }
}

/// A decoded tag header.
///
/// For `Application { tag: AppTag::Boolean, .. }` the `len` field carries the
/// boolean value itself; no content octets follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: AppTag, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    /// Context tag number, or `None` for application tags.
    pub const fn context_number(self) -> Option<u8> {
        match self {
            Tag::Context { tag_num, .. }
            | Tag::Opening { tag_num }
            | Tag::Closing { tag_num } => Some(tag_num),
            Tag::Application { .. } => None,
        }
    }

    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        match self {
            Tag::Application { tag, len } => write_tag(w, tag as u8, 0, len),
            Tag::Context { tag_num, len } => write_tag(w, tag_num, CLASS_CONTEXT, len),
            Tag::Opening { tag_num } => write_first_octets(w, tag_num, CLASS_CONTEXT | LVT_OPENING),
            Tag::Closing { tag_num } => write_first_octets(w, tag_num, CLASS_CONTEXT | LVT_CLOSING),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let tag_num = match first >> 4 {
            EXTENDED_TAG_NUM => match r.read_u8()? {
                0xFF => return Err(DecodeError::InvalidTag),
                n => n,
            },
            n => n,
        };
        let lvt = first & 0x07;

        if first & CLASS_CONTEXT == 0 {
            if lvt > LVT_EXTENDED_LEN {
                return Err(DecodeError::InvalidTag);
            }
            let tag = AppTag::from_u8(tag_num)?;
            let len = if tag == AppTag::Boolean {
                if lvt > 1 {
                    return Err(DecodeError::InvalidValue);
                }
                lvt as u32
            } else {
                read_len(r, lvt)?
            };
            return Ok(Tag::Application { tag, len });
        }

        match lvt {
            LVT_OPENING => Ok(Tag::Opening { tag_num }),
            LVT_CLOSING => Ok(Tag::Closing { tag_num }),
            _ => Ok(Tag::Context {
                tag_num,
                len: read_len(r, lvt)?,
            }),
        }
    }

    /// Decodes the next tag without advancing `r`.
    pub fn peek(r: &Reader<'_>) -> Result<Self, DecodeError> {
        let mut lookahead = *r;
        Self::decode(&mut lookahead)
    }

    /// Consumes an opening tag with the given number.
    pub fn expect_opening(r: &mut Reader<'_>, tag_num: u8) -> Result<(), DecodeError> {
        match Self::decode(r)? {
            Tag::Opening { tag_num: n } if n == tag_num => Ok(()),
            _ => Err(DecodeError::MissingContextTag(tag_num)),
        }
    }

    /// Consumes a closing tag with the given number.
    pub fn expect_closing(r: &mut Reader<'_>, tag_num: u8) -> Result<(), DecodeError> {
        match Self::decode(r)? {
            Tag::Closing { tag_num: n } if n == tag_num => Ok(()),
            _ => Err(DecodeError::InvalidTag),
        }
    }
}

fn write_first_octets(w: &mut Writer<'_>, tag_num: u8, low_bits: u8) -> Result<(), EncodeError> {
    if tag_num <= 14 {
        w.write_u8((tag_num << 4) | low_bits)
    } else if tag_num == 0xFF {
        Err(EncodeError::ValueOutOfRange)
    } else {
        w.write_u8((EXTENDED_TAG_NUM << 4) | low_bits)?;
        w.write_u8(tag_num)
    }
}

fn write_tag(w: &mut Writer<'_>, tag_num: u8, class: u8, len: u32) -> Result<(), EncodeError> {
    if len <= 4 {
        return write_first_octets(w, tag_num, class | len as u8);
    }
    write_first_octets(w, tag_num, class | LVT_EXTENDED_LEN)?;
    match len {
        5..=253 => w.write_u8(len as u8),
        254..=0xFFFF => {
            w.write_u8(254)?;
            w.write_be_u16(len as u16)
        }
        _ => {
            w.write_u8(255)?;
            w.write_be_u32(len)
        }
    }
}

fn read_len(r: &mut Reader<'_>, lvt: u8) -> Result<u32, DecodeError> {
    match lvt {
        0..=4 => Ok(lvt as u32),
        LVT_EXTENDED_LEN => match r.read_u8()? {
            254 => Ok(r.read_be_u16()? as u32),
            255 => r.read_be_u32(),
            v => Ok(v as u32),
        },
        _ => Err(DecodeError::InvalidLength),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppTag, Tag};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;

    fn encoded(tag: Tag) -> ([u8; 8], usize) {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        tag.encode(&mut w).unwrap();
        let n = w.position();
        (buf, n)
    }

    #[test]
    fn context_tag_inline_number_and_length() {
        let (buf, n) = encoded(Tag::Context { tag_num: 2, len: 1 });
        assert_eq!(&buf[..n], &[0x29]);
    }

    #[test]
    fn extended_tag_number_uses_second_octet() {
        let tag = Tag::Context {
            tag_num: 30,
            len: 300,
        };
        let (buf, n) = encoded(tag);
        assert_eq!(&buf[..n], &[0xFD, 30, 254, 0x01, 0x2C]);
        let mut r = Reader::new(&buf[..n]);
        assert_eq!(Tag::decode(&mut r).unwrap(), tag);
    }

    #[test]
    fn opening_and_closing_tags() {
        let (buf, n) = encoded(Tag::Opening { tag_num: 3 });
        assert_eq!(&buf[..n], &[0x3E]);
        let (buf, n) = encoded(Tag::Closing { tag_num: 15 });
        assert_eq!(&buf[..n], &[0xFF, 15]);
        let mut r = Reader::new(&buf[..n]);
        assert_eq!(Tag::decode(&mut r).unwrap(), Tag::Closing { tag_num: 15 });
    }

    #[test]
    fn application_boolean_carries_value_in_length() {
        let mut r = Reader::new(&[0x11]);
        assert_eq!(
            Tag::decode(&mut r).unwrap(),
            Tag::Application {
                tag: AppTag::Boolean,
                len: 1
            }
        );
    }

    #[test]
    fn peek_does_not_advance() {
        let r = Reader::new(&[0x0C, 0, 0, 0, 1]);
        assert_eq!(Tag::peek(&r).unwrap(), Tag::Context { tag_num: 0, len: 4 });
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn rejects_reserved_and_truncated_tags() {
        let mut r = Reader::new(&[0xF9, 0xFF]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::InvalidTag);
        let mut r = Reader::new(&[0xD2]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::InvalidTag);
        let mut r = Reader::new(&[0x0D]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::UnexpectedEof);
    }
}
