//! Tags inside network payloads.
//!
//! Network tags carry no root name: a type byte followed by the payload. A
//! type byte of zero (`TAG_End`) marks an absent tag.

use crate::buffer::NetworkBuffer;
use mdminecraft_core::{CodecError, CodecResult, Compound, Tag};

/// Deepest nesting accepted when reading.
pub const MAX_DEPTH: usize = 512;

const TAG_END: u8 = 0;

/// Write an unnamed root tag.
pub fn write_tag(buf: &mut NetworkBuffer, tag: &Tag) -> CodecResult<()> {
    buf.write_byte(tag.type_id() as i8);
    write_payload(buf, tag)
}

/// Read an unnamed root tag; `None` for an explicit end tag.
pub fn read_optional_tag(buf: &mut NetworkBuffer) -> CodecResult<Option<Tag>> {
    let type_id = buf.read_byte()? as u8;
    if type_id == TAG_END {
        return Ok(None);
    }
    read_payload(buf, type_id, 0).map(Some)
}

/// Read an unnamed root tag that must be present.
pub fn read_tag(buf: &mut NetworkBuffer) -> CodecResult<Tag> {
    read_optional_tag(buf)?.ok_or(CodecError::InvalidDiscriminant {
        kind: "tag type",
        value: i32::from(TAG_END),
    })
}

// Names and string payloads use Java's modified UTF-8: NUL takes two bytes
// and characters outside the BMP are written as two three-byte surrogates.
fn write_name(buf: &mut NetworkBuffer, value: &str) -> CodecResult<()> {
    let bytes = encode_modified_utf8(value);
    let len = u16::try_from(bytes.len()).map_err(|_| CodecError::StringTooLong {
        len: bytes.len(),
        max: usize::from(u16::MAX),
    })?;
    buf.write_short(len as i16);
    buf.write_bytes(&bytes);
    Ok(())
}

fn read_name(buf: &mut NetworkBuffer) -> CodecResult<String> {
    let len = buf.read_short()? as u16;
    let bytes = buf.read_bytes(usize::from(len))?;
    decode_modified_utf8(&bytes)
}

fn encode_modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

fn decode_modified_utf8(bytes: &[u8]) -> CodecResult<String> {
    let continuation = |at: usize| match bytes.get(at) {
        Some(&byte) if byte & 0xC0 == 0x80 => Ok(u16::from(byte & 0x3F)),
        _ => Err(CodecError::InvalidUtf8),
    };
    let mut units = Vec::with_capacity(bytes.len());
    let mut at = 0;
    while at < bytes.len() {
        let lead = bytes[at];
        if lead & 0x80 == 0 {
            units.push(u16::from(lead));
            at += 1;
        } else if lead & 0xE0 == 0xC0 {
            units.push((u16::from(lead & 0x1F) << 6) | continuation(at + 1)?);
            at += 2;
        } else if lead & 0xF0 == 0xE0 {
            units.push(
                (u16::from(lead & 0x0F) << 12)
                    | (continuation(at + 1)? << 6)
                    | continuation(at + 2)?,
            );
            at += 3;
        } else {
            return Err(CodecError::InvalidUtf8);
        }
    }
    String::from_utf16(&units).map_err(|_| CodecError::InvalidUtf8)
}

fn write_len(buf: &mut NetworkBuffer, len: usize) -> CodecResult<()> {
    let len = i32::try_from(len).map_err(|_| CodecError::ListTooLong {
        len,
        max: i32::MAX as usize,
    })?;
    buf.write_int(len);
    Ok(())
}

fn read_len(buf: &mut NetworkBuffer, element_size: usize) -> CodecResult<usize> {
    let len = buf.read_int()?;
    let len = usize::try_from(len).map_err(|_| CodecError::InvalidDiscriminant {
        kind: "tag array length",
        value: len,
    })?;
    // Every element needs at least `element_size` bytes, so a length the
    // buffer cannot hold is rejected before allocating.
    let max = buf.remaining() / element_size.max(1);
    if len > max {
        return Err(CodecError::ListTooLong { len, max });
    }
    Ok(len)
}

fn write_payload(buf: &mut NetworkBuffer, tag: &Tag) -> CodecResult<()> {
    match tag {
        Tag::Byte(v) => buf.write_byte(*v),
        Tag::Short(v) => buf.write_short(*v),
        Tag::Int(v) => buf.write_int(*v),
        Tag::Long(v) => buf.write_long(*v),
        Tag::Float(v) => buf.write_float(*v),
        Tag::Double(v) => buf.write_double(*v),
        Tag::ByteArray(values) => {
            write_len(buf, values.len())?;
            for v in values {
                buf.write_byte(*v);
            }
        }
        Tag::String(s) => write_name(buf, s)?,
        Tag::List(items) => {
            let element_type = items.first().map_or(TAG_END, Tag::type_id);
            if items.iter().any(|item| item.type_id() != element_type) {
                return Err(CodecError::TagType {
                    expected: "homogeneous list",
                    found: "mixed list",
                });
            }
            buf.write_byte(element_type as i8);
            write_len(buf, items.len())?;
            for item in items {
                write_payload(buf, item)?;
            }
        }
        Tag::Compound(children) => {
            for (name, child) in children {
                buf.write_byte(child.type_id() as i8);
                write_name(buf, name)?;
                write_payload(buf, child)?;
            }
            buf.write_byte(TAG_END as i8);
        }
        Tag::IntArray(values) => {
            write_len(buf, values.len())?;
            for v in values {
                buf.write_int(*v);
            }
        }
        Tag::LongArray(values) => {
            write_len(buf, values.len())?;
            for v in values {
                buf.write_long(*v);
            }
        }
    }
    Ok(())
}

fn read_payload(buf: &mut NetworkBuffer, type_id: u8, depth: usize) -> CodecResult<Tag> {
    if depth > MAX_DEPTH {
        return Err(CodecError::NestingTooDeep(MAX_DEPTH));
    }
    let tag = match type_id {
        1 => Tag::Byte(buf.read_byte()?),
        2 => Tag::Short(buf.read_short()?),
        3 => Tag::Int(buf.read_int()?),
        4 => Tag::Long(buf.read_long()?),
        5 => Tag::Float(buf.read_float()?),
        6 => Tag::Double(buf.read_double()?),
        7 => {
            let len = read_len(buf, 1)?;
            let bytes = buf.read_bytes(len)?;
            Tag::ByteArray(bytes.iter().map(|b| *b as i8).collect())
        }
        8 => Tag::String(read_name(buf)?),
        9 => {
            let element_type = buf.read_byte()? as u8;
            let len = read_len(buf, 1)?;
            if element_type == TAG_END && len > 0 {
                return Err(CodecError::InvalidDiscriminant {
                    kind: "list element type",
                    value: i32::from(element_type),
                });
            }
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(read_payload(buf, element_type, depth + 1)?);
            }
            Tag::List(items)
        }
        10 => {
            let mut children = Compound::new();
            loop {
                let child_type = buf.read_byte()? as u8;
                if child_type == TAG_END {
                    break;
                }
                let name = read_name(buf)?;
                let child = read_payload(buf, child_type, depth + 1)?;
                children.insert(name, child);
            }
            Tag::Compound(children)
        }
        11 => {
            let len = read_len(buf, 4)?;
            let values = (0..len).map(|_| buf.read_int()).collect::<CodecResult<_>>()?;
            Tag::IntArray(values)
        }
        12 => {
            let len = read_len(buf, 8)?;
            let values = (0..len).map(|_| buf.read_long()).collect::<CodecResult<_>>()?;
            Tag::LongArray(values)
        }
        other => {
            return Err(CodecError::InvalidDiscriminant {
                kind: "tag type",
                value: i32::from(other),
            })
        }
    };
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdminecraft_core::CompoundBuilder;

    fn round_trip(tag: &Tag) -> Tag {
        let mut buf = NetworkBuffer::new();
        write_tag(&mut buf, tag).unwrap();
        let back = read_tag(&mut buf).unwrap();
        assert!(buf.is_empty());
        back
    }

    #[test]
    fn compound_round_trips() {
        let tag = CompoundBuilder::new()
            .put("name", "Steve")
            .put("level", 30)
            .put("scores", Tag::IntArray(vec![1, 2, 3]))
            .put("nested", CompoundBuilder::new().put("x", 1.5f64).build())
            .put("list", vec![Tag::Short(1), Tag::Short(2)])
            .build();
        assert_eq!(round_trip(&tag), tag);
    }

    #[test]
    fn strings_use_modified_utf8() {
        let mut buf = NetworkBuffer::new();
        write_tag(&mut buf, &Tag::String("a\0b".to_string())).unwrap();
        assert_eq!(buf.as_slice(), &[8, 0, 4, b'a', 0xC0, 0x80, b'b']);

        let mut buf = NetworkBuffer::new();
        write_tag(&mut buf, &Tag::String("\u{1F600}".to_string())).unwrap();
        assert_eq!(buf.as_slice(), &[8, 0, 6, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]);
    }

    #[test]
    fn modified_utf8_round_trips() {
        for text in ["plain", "a\0b", "caf\u{e9}", "\u{20AC}", "\u{1F600} x"] {
            let tag = Tag::String(text.to_string());
            assert_eq!(round_trip(&tag), tag);
        }
    }

    #[test]
    fn lone_surrogates_are_rejected() {
        let mut buf = NetworkBuffer::from_bytes(&[8, 0, 3, 0xED, 0xA0, 0xBD]);
        assert!(matches!(read_tag(&mut buf), Err(CodecError::InvalidUtf8)));
        let mut buf = NetworkBuffer::from_bytes(&[8, 0, 1, 0xC0]);
        assert!(matches!(read_tag(&mut buf), Err(CodecError::InvalidUtf8)));
    }

    #[test]
    fn root_has_no_name() {
        let mut buf = NetworkBuffer::new();
        write_tag(&mut buf, &Tag::Int(7)).unwrap();
        assert_eq!(buf.as_slice(), &[3, 0, 0, 0, 7]);
    }

    #[test]
    fn end_tag_reads_as_absent() {
        let mut buf = NetworkBuffer::from_bytes(&[0]);
        assert_eq!(read_optional_tag(&mut buf).unwrap(), None);
        let mut buf = NetworkBuffer::from_bytes(&[0]);
        assert!(read_tag(&mut buf).is_err());
    }

    #[test]
    fn mixed_lists_are_rejected_on_write() {
        let mut buf = NetworkBuffer::new();
        let tag = Tag::List(vec![Tag::Int(1), Tag::Byte(1)]);
        assert!(write_tag(&mut buf, &tag).is_err());
    }

    #[test]
    fn huge_array_length_is_rejected_before_allocating() {
        let mut buf = NetworkBuffer::new();
        buf.write_byte(11);
        buf.write_int(i32::MAX);
        assert!(matches!(read_tag(&mut buf), Err(CodecError::ListTooLong { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut buf = NetworkBuffer::new();
        buf.write_byte(9);
        for _ in 0..=MAX_DEPTH {
            buf.write_byte(9);
            buf.write_int(1);
        }
        buf.write_bytes(&[0; 4]);
        assert!(matches!(read_tag(&mut buf), Err(CodecError::NestingTooDeep(_))));
    }
}
