//! Tree-structured tag channel.
//!
//! [`Tag`] is the persistent representation of component values: a small typed
//! tree of scalars, arrays, lists, and string-keyed compounds. Compounds use a
//! `BTreeMap` so that serialized output is deterministic.
//!
//! [`TagSerializer`] pairs a reader and a writer for one value type. The
//! primitive serializers live as free functions in this module (`tag::int()`,
//! `tag::string()`, ...) and compose through [`TagSerializer::list`] and
//! [`TagSerializer::map`].

use crate::error::{CodecError, CodecResult};
use crate::text::Text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named children of a compound tag.
pub type Compound = BTreeMap<String, Tag>;

/// A node in the tag tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Tag {
    /// Signed byte, also used for booleans.
    Byte(i8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Raw byte array.
    ByteArray(Vec<i8>),
    /// UTF-8 string.
    String(String),
    /// Homogeneous list of tags.
    List(Vec<Tag>),
    /// String-keyed children.
    Compound(Compound),
    /// Array of 32-bit integers.
    IntArray(Vec<i32>),
    /// Array of 64-bit integers.
    LongArray(Vec<i64>),
}

impl Tag {
    /// Numeric type id used by the binary tag encoding.
    pub fn type_id(&self) -> u8 {
        match self {
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List(_) => 9,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
            Tag::LongArray(_) => 12,
        }
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Tag::Byte(_) => "byte",
            Tag::Short(_) => "short",
            Tag::Int(_) => "int",
            Tag::Long(_) => "long",
            Tag::Float(_) => "float",
            Tag::Double(_) => "double",
            Tag::ByteArray(_) => "byte_array",
            Tag::String(_) => "string",
            Tag::List(_) => "list",
            Tag::Compound(_) => "compound",
            Tag::IntArray(_) => "int_array",
            Tag::LongArray(_) => "long_array",
        }
    }

    /// Empty compound.
    pub fn empty_compound() -> Self {
        Tag::Compound(Compound::new())
    }

    fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::TagType {
            expected,
            found: self.type_name(),
        }
    }

    /// Integer value of any integral tag that fits in 32 bits.
    pub fn as_int(&self) -> CodecResult<i32> {
        match *self {
            Tag::Byte(v) => Ok(i32::from(v)),
            Tag::Short(v) => Ok(i32::from(v)),
            Tag::Int(v) => Ok(v),
            _ => Err(self.mismatch("int")),
        }
    }

    /// Integer value of any integral tag.
    pub fn as_long(&self) -> CodecResult<i64> {
        match *self {
            Tag::Long(v) => Ok(v),
            _ => self.as_int().map(i64::from).map_err(|_| self.mismatch("long")),
        }
    }

    /// Float value of any numeric tag.
    pub fn as_float(&self) -> CodecResult<f32> {
        match *self {
            Tag::Float(v) => Ok(v),
            Tag::Double(v) => Ok(v as f32),
            _ => self.as_int().map(|v| v as f32).map_err(|_| self.mismatch("float")),
        }
    }

    /// Double value of any numeric tag.
    pub fn as_double(&self) -> CodecResult<f64> {
        match *self {
            Tag::Double(v) => Ok(v),
            Tag::Float(v) => Ok(f64::from(v)),
            _ => self.as_long().map(|v| v as f64).map_err(|_| self.mismatch("double")),
        }
    }

    /// Boolean stored as a non-zero byte.
    pub fn as_bool(&self) -> CodecResult<bool> {
        self.as_int().map(|v| v != 0).map_err(|_| self.mismatch("byte"))
    }

    /// Borrow a string tag.
    pub fn as_str(&self) -> CodecResult<&str> {
        match self {
            Tag::String(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    /// Borrow list elements.
    pub fn as_list(&self) -> CodecResult<&[Tag]> {
        match self {
            Tag::List(items) => Ok(items),
            _ => Err(self.mismatch("list")),
        }
    }

    /// Borrow compound children.
    pub fn as_compound(&self) -> CodecResult<&Compound> {
        match self {
            Tag::Compound(map) => Ok(map),
            _ => Err(self.mismatch("compound")),
        }
    }

    /// Borrow an int array.
    pub fn as_int_array(&self) -> CodecResult<&[i32]> {
        match self {
            Tag::IntArray(values) => Ok(values),
            _ => Err(self.mismatch("int_array")),
        }
    }

    /// Typed field access for a compound tag.
    pub fn reader(&self) -> CodecResult<CompoundReader<'_>> {
        self.as_compound().map(|compound| CompoundReader { compound })
    }
}

impl From<i8> for Tag {
    fn from(value: i8) -> Self {
        Tag::Byte(value)
    }
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Byte(i8::from(value))
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<f32> for Tag {
    fn from(value: f32) -> Self {
        Tag::Float(value)
    }
}

impl From<f64> for Tag {
    fn from(value: f64) -> Self {
        Tag::Double(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_string())
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(value: Vec<Tag>) -> Self {
        Tag::List(value)
    }
}

impl From<Compound> for Tag {
    fn from(value: Compound) -> Self {
        Tag::Compound(value)
    }
}

/// Fluent construction of compound tags.
#[derive(Debug, Default)]
pub struct CompoundBuilder(Compound);

impl CompoundBuilder {
    /// Start an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn put(mut self, name: &str, value: impl Into<Tag>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Set a field only when a value is present.
    pub fn put_opt(self, name: &str, value: Option<impl Into<Tag>>) -> Self {
        match value {
            Some(value) => self.put(name, value),
            None => self,
        }
    }

    /// Finish as a [`Tag::Compound`].
    pub fn build(self) -> Tag {
        Tag::Compound(self.0)
    }
}

/// Typed accessors over the fields of a compound.
#[derive(Debug, Clone, Copy)]
pub struct CompoundReader<'a> {
    compound: &'a Compound,
}

impl<'a> CompoundReader<'a> {
    /// Field that must be present.
    pub fn required(&self, name: &str) -> CodecResult<&'a Tag> {
        self.compound
            .get(name)
            .ok_or_else(|| CodecError::MissingField(name.to_string()))
    }

    /// Field that may be absent.
    pub fn optional(&self, name: &str) -> Option<&'a Tag> {
        self.compound.get(name)
    }

    /// Required int field.
    pub fn int(&self, name: &str) -> CodecResult<i32> {
        self.required(name)?.as_int()
    }

    /// Int field with a default.
    pub fn int_or(&self, name: &str, default: i32) -> CodecResult<i32> {
        self.optional(name).map_or(Ok(default), Tag::as_int)
    }

    /// Required long field.
    pub fn long(&self, name: &str) -> CodecResult<i64> {
        self.required(name)?.as_long()
    }

    /// Float field with a default.
    pub fn float_or(&self, name: &str, default: f32) -> CodecResult<f32> {
        self.optional(name).map_or(Ok(default), Tag::as_float)
    }

    /// Required double field.
    pub fn double(&self, name: &str) -> CodecResult<f64> {
        self.required(name)?.as_double()
    }

    /// Boolean field with a default.
    pub fn bool_or(&self, name: &str, default: bool) -> CodecResult<bool> {
        self.optional(name).map_or(Ok(default), Tag::as_bool)
    }

    /// Required string field.
    pub fn string(&self, name: &str) -> CodecResult<String> {
        self.required(name)?.as_str().map(str::to_string)
    }

    /// Optional string field.
    pub fn opt_string(&self, name: &str) -> CodecResult<Option<String>> {
        self.optional(name)
            .map(|tag| tag.as_str().map(str::to_string))
            .transpose()
    }

    /// Required field decoded with `serializer`.
    pub fn read<T: 'static>(&self, name: &str, serializer: &TagSerializer<T>) -> CodecResult<T> {
        serializer.read(self.required(name)?)
    }

    /// Optional field decoded with `serializer`.
    pub fn read_opt<T: 'static>(
        &self,
        name: &str,
        serializer: &TagSerializer<T>,
    ) -> CodecResult<Option<T>> {
        self.optional(name).map(|tag| serializer.read(tag)).transpose()
    }

    /// Field decoded with `serializer`, or `default` when absent.
    pub fn read_or<T: 'static>(
        &self,
        name: &str,
        serializer: &TagSerializer<T>,
        default: T,
    ) -> CodecResult<T> {
        Ok(self.read_opt(name, serializer)?.unwrap_or(default))
    }
}

type ReadFn<T> = dyn Fn(&Tag) -> CodecResult<T> + Send + Sync;
type WriteFn<T> = dyn Fn(&T) -> Tag + Send + Sync;

/// Reader/writer pair for one value type on the tag channel.
pub struct TagSerializer<T> {
    read: Arc<ReadFn<T>>,
    write: Arc<WriteFn<T>>,
}

impl<T> Clone for TagSerializer<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T> std::fmt::Debug for TagSerializer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSerializer")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> TagSerializer<T> {
    /// Build a serializer from a reader and a writer.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&Tag) -> CodecResult<T> + Send + Sync + 'static,
        W: Fn(&T) -> Tag + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
            write: Arc::new(write),
        }
    }

    /// Decode a value.
    pub fn read(&self, tag: &Tag) -> CodecResult<T> {
        (self.read)(tag)
    }

    /// Encode a value.
    pub fn write(&self, value: &T) -> Tag {
        (self.write)(value)
    }

    /// Serializer for a list of values.
    pub fn list(self) -> TagSerializer<Vec<T>> {
        let element = self.clone();
        TagSerializer::new(
            move |tag| tag.as_list()?.iter().map(|item| self.read(item)).collect(),
            move |values: &Vec<T>| Tag::List(values.iter().map(|v| element.write(v)).collect()),
        )
    }

    /// Bidirectional mapping onto another value type.
    pub fn map<U, F, G>(self, to: F, from: G) -> TagSerializer<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok(to(value)), from)
    }

    /// Mapping whose forward direction can reject values.
    pub fn try_map<U, F, G>(self, to: F, from: G) -> TagSerializer<U>
    where
        U: 'static,
        F: Fn(T) -> CodecResult<U> + Send + Sync + 'static,
        G: Fn(&U) -> T + Send + Sync + 'static,
    {
        let inner = self.clone();
        TagSerializer::new(
            move |tag| to(self.read(tag)?),
            move |value: &U| inner.write(&from(value)),
        )
    }
}

/// Int tag.
pub fn int() -> TagSerializer<i32> {
    TagSerializer::new(Tag::as_int, |v| Tag::Int(*v))
}

/// Long tag.
pub fn long() -> TagSerializer<i64> {
    TagSerializer::new(Tag::as_long, |v| Tag::Long(*v))
}

/// Float tag.
pub fn float() -> TagSerializer<f32> {
    TagSerializer::new(Tag::as_float, |v| Tag::Float(*v))
}

/// Double tag.
pub fn double() -> TagSerializer<f64> {
    TagSerializer::new(Tag::as_double, |v| Tag::Double(*v))
}

/// Boolean stored as a byte tag.
pub fn boolean() -> TagSerializer<bool> {
    TagSerializer::new(Tag::as_bool, |v| Tag::from(*v))
}

/// String tag.
pub fn string() -> TagSerializer<String> {
    TagSerializer::new(|tag| tag.as_str().map(str::to_string), |v| Tag::String(v.clone()))
}

/// Compound tag kept as-is.
pub fn compound() -> TagSerializer<Compound> {
    TagSerializer::new(|tag| tag.as_compound().cloned(), |v| Tag::Compound(v.clone()))
}

/// Marker with no payload; written as an empty compound and read from anything.
pub fn nothing() -> TagSerializer<()> {
    TagSerializer::new(|_| Ok(()), |_| Tag::empty_compound())
}

/// JSON text component stored as its serialized string.
pub fn text() -> TagSerializer<Text> {
    TagSerializer::new(
        |tag| Text::from_json(tag.as_str()?),
        |value: &Text| Tag::String(value.to_json()),
    )
}
