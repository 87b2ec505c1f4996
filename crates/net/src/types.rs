//! Composable binary codecs.
//!
//! A [`NetworkType`] is a cheap, cloneable pair of read/write functions for one
//! value type. Primitive types are free functions (`types::var_int()`,
//! `types::string()`, ...) and larger codecs are assembled with
//! [`NetworkType::list`], [`NetworkType::optional`], and [`NetworkType::map`].

use crate::buffer::NetworkBuffer;
use crate::nbt;
use mdminecraft_core::{
    BlockPosition, CodecError, CodecResult, Color, Compound, ItemStack, ProtocolEnum, Tag, Text,
};
use std::sync::Arc;
use uuid::Uuid;

type ReadFn<T> = dyn Fn(&mut NetworkBuffer) -> CodecResult<T> + Send + Sync;
type WriteFn<T> = dyn Fn(&mut NetworkBuffer, &T) -> CodecResult<()> + Send + Sync;

/// Reader/writer pair for one value type on the binary channel.
pub struct NetworkType<T> {
    read: Arc<ReadFn<T>>,
    write: Arc<WriteFn<T>>,
}

impl<T> Clone for NetworkType<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T> std::fmt::Debug for NetworkType<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkType")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> NetworkType<T> {
    /// Build a codec from a reader and a writer.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&mut NetworkBuffer) -> CodecResult<T> + Send + Sync + 'static,
        W: Fn(&mut NetworkBuffer, &T) -> CodecResult<()> + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
            write: Arc::new(write),
        }
    }

    /// Decode a value from the front of `buf`.
    pub fn read(&self, buf: &mut NetworkBuffer) -> CodecResult<T> {
        (self.read)(buf)
    }

    /// Append `value` to `buf`.
    pub fn write(&self, buf: &mut NetworkBuffer, value: &T) -> CodecResult<()> {
        (self.write)(buf, value)
    }

    /// Var-int length followed by at most `max` elements.
    ///
    /// A longer declared length fails the read before any element is decoded.
    pub fn list(self, max: usize) -> NetworkType<Vec<T>> {
        let element = self.clone();
        NetworkType::new(
            move |buf| {
                let len = buf.read_length(max)?;
                let mut values = Vec::with_capacity(len.min(buf.remaining()));
                for _ in 0..len {
                    values.push(self.read(buf)?);
                }
                Ok(values)
            },
            move |buf, values: &Vec<T>| {
                if values.len() > max {
                    return Err(CodecError::ListTooLong {
                        len: values.len(),
                        max,
                    });
                }
                buf.write_var_int(values.len() as i32);
                values.iter().try_for_each(|value| element.write(buf, value))
            },
        )
    }

    /// Boolean presence flag followed by the value when present.
    pub fn optional(self) -> NetworkType<Option<T>> {
        let inner = self.clone();
        NetworkType::new(
            move |buf| {
                if buf.read_bool()? {
                    self.read(buf).map(Some)
                } else {
                    Ok(None)
                }
            },
            move |buf, value: &Option<T>| {
                buf.write_bool(value.is_some());
                match value {
                    Some(value) => inner.write(buf, value),
                    None => Ok(()),
                }
            },
        )
    }

    /// Bidirectional mapping onto another value type.
    pub fn map<U, F, G>(self, to: F, from: G) -> NetworkType<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok(to(value)), from)
    }

    /// Mapping whose forward direction can reject values.
    pub fn try_map<U, F, G>(self, to: F, from: G) -> NetworkType<U>
    where
        U: 'static,
        F: Fn(T) -> CodecResult<U> + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        let inner = self.clone();
        NetworkType::new(
            move |buf| to(self.read(buf)?),
            move |buf, value: &U| inner.write(buf, &from(value)),
        )
    }
}

/// Variable-length 32-bit integer.
pub fn var_int() -> NetworkType<i32> {
    NetworkType::new(NetworkBuffer::read_var_int, |buf, v| {
        buf.write_var_int(*v);
        Ok(())
    })
}

/// Fixed 32-bit integer.
pub fn int() -> NetworkType<i32> {
    NetworkType::new(NetworkBuffer::read_int, |buf, v| {
        buf.write_int(*v);
        Ok(())
    })
}

/// Fixed 64-bit integer.
pub fn long() -> NetworkType<i64> {
    NetworkType::new(NetworkBuffer::read_long, |buf, v| {
        buf.write_long(*v);
        Ok(())
    })
}

/// 32-bit float.
pub fn float() -> NetworkType<f32> {
    NetworkType::new(NetworkBuffer::read_float, |buf, v| {
        buf.write_float(*v);
        Ok(())
    })
}

/// 64-bit float.
pub fn double() -> NetworkType<f64> {
    NetworkType::new(NetworkBuffer::read_double, |buf, v| {
        buf.write_double(*v);
        Ok(())
    })
}

/// Single-byte boolean.
pub fn boolean() -> NetworkType<bool> {
    NetworkType::new(NetworkBuffer::read_bool, |buf, v| {
        buf.write_bool(*v);
        Ok(())
    })
}

/// Length-prefixed UTF-8 string.
pub fn string() -> NetworkType<String> {
    NetworkType::new(NetworkBuffer::read_string, |buf, v: &String| {
        buf.write_string(v)
    })
}

/// No bytes at all; used by marker components.
pub fn nothing() -> NetworkType<()> {
    NetworkType::new(|_| Ok(()), |_, _| Ok(()))
}

/// UUID as two longs.
pub fn uuid() -> NetworkType<Uuid> {
    NetworkType::new(NetworkBuffer::read_uuid, |buf, v| {
        buf.write_uuid(v);
        Ok(())
    })
}

/// Packed block position.
pub fn block_position() -> NetworkType<BlockPosition> {
    NetworkType::new(NetworkBuffer::read_block_position, |buf, v| {
        buf.write_block_position(*v);
        Ok(())
    })
}

/// Enum as its var-int ordinal.
pub fn ordinal<E: ProtocolEnum>() -> NetworkType<E> {
    NetworkType::new(NetworkBuffer::read_enum::<E>, |buf, v: &E| {
        buf.write_enum(*v);
        Ok(())
    })
}

/// Color as a packed `0xRRGGBB` int.
pub fn color() -> NetworkType<Color> {
    int().map(Color::from_rgb, |color: &Color| color.as_rgb())
}

/// Any unnamed network tag.
pub fn nbt() -> NetworkType<Tag> {
    NetworkType::new(nbt::read_tag, nbt::write_tag)
}

/// Network tag that must be a compound.
pub fn compound() -> NetworkType<Compound> {
    nbt().try_map(
        |tag| match tag {
            Tag::Compound(children) => Ok(children),
            other => Err(CodecError::TagType {
                expected: "compound",
                found: other.type_name(),
            }),
        },
        |children: &Compound| Tag::Compound(children.clone()),
    )
}

/// Text component as a network tag: a string tag for plain text, a
/// compound otherwise.
pub fn text() -> NetworkType<Text> {
    nbt().map(|tag| Text::from_tag(&tag), Text::to_tag)
}

/// Item stack without component patches: count, then the id for non-empty
/// stacks, then two zero patch counts.
pub fn item_stack() -> NetworkType<ItemStack> {
    NetworkType::new(
        |buf| {
            let count = buf.read_var_int()?;
            if count <= 0 {
                return Ok(ItemStack::AIR);
            }
            let id = buf.read_var_int()?;
            for _ in 0..2 {
                let patches = buf.read_var_int()?;
                if patches != 0 {
                    return Err(CodecError::InvalidDiscriminant {
                        kind: "item component patch count",
                        value: patches,
                    });
                }
            }
            Ok(ItemStack::new(id, count))
        },
        |buf, stack: &ItemStack| {
            if stack.is_air() {
                buf.write_var_int(0);
                return Ok(());
            }
            buf.write_var_int(stack.count);
            buf.write_var_int(stack.id);
            buf.write_var_int(0);
            buf.write_var_int(0);
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: 'static>(ty: &NetworkType<T>, value: &T) -> NetworkBuffer {
        let mut buf = NetworkBuffer::new();
        ty.write(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn bounded_list_round_trips_within_limit() {
        let ty = var_int().list(4);
        let mut buf = encode(&ty, &vec![1, 2, 300]);
        assert_eq!(buf.as_slice(), &[3, 1, 2, 0xAC, 0x02]);
        assert_eq!(ty.read(&mut buf).unwrap(), vec![1, 2, 300]);
    }

    #[test]
    fn bounded_list_rejects_oversized_length_on_read() {
        let ty = string().list(2);
        let mut buf = NetworkBuffer::new();
        buf.write_var_int(3);
        for s in ["a", "b", "c"] {
            buf.write_string(s).unwrap();
        }
        assert!(matches!(
            ty.read(&mut buf),
            Err(CodecError::ListTooLong { len: 3, max: 2 })
        ));
    }

    #[test]
    fn bounded_list_rejects_oversized_value_on_write() {
        let ty = var_int().list(1);
        let mut buf = NetworkBuffer::new();
        assert!(ty.write(&mut buf, &vec![1, 2]).is_err());
    }

    #[test]
    fn optional_writes_presence_flag() {
        let ty = var_int().optional();
        assert_eq!(encode(&ty, &None).as_slice(), &[0]);
        let mut buf = encode(&ty, &Some(5));
        assert_eq!(buf.as_slice(), &[1, 5]);
        assert_eq!(ty.read(&mut buf).unwrap(), Some(5));
    }

    #[test]
    fn color_is_a_fixed_int() {
        let mut buf = encode(&color(), &Color::new(0x12, 0x34, 0x56));
        assert_eq!(buf.as_slice(), &[0x00, 0x12, 0x34, 0x56]);
        assert_eq!(color().read(&mut buf).unwrap(), Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn item_stack_encodes_empty_as_zero_count() {
        assert_eq!(encode(&item_stack(), &ItemStack::AIR).as_slice(), &[0]);
        let mut buf = encode(&item_stack(), &ItemStack::new(7, 2));
        assert_eq!(buf.as_slice(), &[2, 7, 0, 0]);
        assert_eq!(item_stack().read(&mut buf).unwrap(), ItemStack::new(7, 2));
    }

    #[test]
    fn empty_stacks_agree_across_channels() {
        let tag = mdminecraft_core::item::item_tag();
        for stack in [ItemStack { id: 5, count: 0 }, ItemStack { id: 0, count: 3 }] {
            let mut buf = encode(&item_stack(), &stack);
            assert_eq!(item_stack().read(&mut buf).unwrap(), ItemStack::AIR);
            assert_eq!(tag.read(&tag.write(&stack)).unwrap(), ItemStack::AIR);
        }
    }

    #[test]
    fn item_stack_rejects_component_patches() {
        let mut buf = NetworkBuffer::from_bytes(&[1, 7, 1, 0]);
        assert!(item_stack().read(&mut buf).is_err());
    }

    #[test]
    fn plain_text_is_an_unnamed_string_tag() {
        let mut buf = encode(&text(), &Text::plain("Hi"));
        assert_eq!(buf.as_slice(), &[0x08, 0x00, 0x02, 0x48, 0x69]);
        assert_eq!(text().read(&mut buf).unwrap(), Text::plain("Hi"));
    }

    #[test]
    fn structured_text_is_a_compound_tag() {
        let value = Text::from_json(r#"{"text":"A","bold":true}"#).unwrap();
        let mut buf = encode(&text(), &value);
        assert_eq!(
            buf.as_slice(),
            &[
                0x0A, // compound
                0x01, 0x00, 0x04, b'b', b'o', b'l', b'd', 0x01, // bold: 1b
                0x08, 0x00, 0x04, b't', b'e', b'x', b't', 0x00, 0x01, b'A', // text: "A"
                0x00, // end
            ]
        );
        assert_eq!(text().read(&mut buf).unwrap(), value);
    }

    #[test]
    fn text_rejects_absent_tag() {
        let mut buf = NetworkBuffer::from_bytes(&[0x00]);
        assert!(text().read(&mut buf).is_err());
    }
}
