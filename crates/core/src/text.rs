//! JSON text components (item names, lore lines, book pages).

use crate::error::CodecResult;
use crate::tag::{Compound, Tag};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A chat/text component held as its JSON tree.
///
/// The tree is not interpreted here; it only has to be valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text(Value);

impl Text {
    /// Plain literal text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    /// Wrap an existing JSON tree.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse serialized JSON.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        Ok(Self(serde_json::from_str(json)?))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Borrow the JSON tree.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Tag form carried inside network payloads.
    ///
    /// Plain text becomes a string tag and objects become compounds. Booleans
    /// are bytes, and lists whose elements differ in type wrap each element
    /// in a compound under the empty key.
    pub fn to_tag(&self) -> Tag {
        value_to_tag(&self.0)
    }

    /// Inverse of [`Text::to_tag`].
    pub fn from_tag(tag: &Tag) -> Self {
        Self(tag_to_value(tag))
    }
}

fn value_to_tag(value: &Value) -> Tag {
    match value {
        Value::Null => Tag::String(String::new()),
        Value::Bool(flag) => Tag::Byte(i8::from(*flag)),
        Value::Number(number) => number_to_tag(number),
        Value::String(text) => Tag::String(text.clone()),
        Value::Array(items) => list_to_tag(items),
        Value::Object(fields) => Tag::Compound(
            fields
                .iter()
                .filter(|(_, field)| !field.is_null())
                .map(|(name, field)| (name.clone(), value_to_tag(field)))
                .collect(),
        ),
    }
}

fn number_to_tag(number: &Number) -> Tag {
    match number.as_i64() {
        Some(value) => i32::try_from(value).map_or(Tag::Long(value), Tag::Int),
        None => Tag::Double(number.as_f64().unwrap_or_default()),
    }
}

fn list_to_tag(items: &[Value]) -> Tag {
    let tags: Vec<Tag> = items.iter().map(value_to_tag).collect();
    let homogeneous = tags
        .first()
        .map_or(true, |first| tags.iter().all(|tag| tag.type_id() == first.type_id()));
    if homogeneous {
        return Tag::List(tags);
    }
    Tag::List(
        tags.into_iter()
            .map(|tag| match tag {
                Tag::Compound(children) => Tag::Compound(children),
                other => Tag::Compound(Compound::from([(String::new(), other)])),
            })
            .collect(),
    )
}

fn tag_to_value(tag: &Tag) -> Value {
    match tag {
        Tag::Byte(0) => Value::Bool(false),
        Tag::Byte(1) => Value::Bool(true),
        Tag::Byte(value) => Value::from(*value),
        Tag::Short(value) => Value::from(*value),
        Tag::Int(value) => Value::from(*value),
        Tag::Long(value) => Value::from(*value),
        Tag::Float(value) => Value::from(f64::from(*value)),
        Tag::Double(value) => Value::from(*value),
        Tag::ByteArray(values) => values.iter().copied().map(Value::from).collect(),
        Tag::String(text) => Value::String(text.clone()),
        Tag::List(items) => items.iter().map(list_element_to_value).collect(),
        Tag::Compound(children) => Value::Object(
            children
                .iter()
                .map(|(name, child)| (name.clone(), tag_to_value(child)))
                .collect(),
        ),
        Tag::IntArray(values) => values.iter().copied().map(Value::from).collect(),
        Tag::LongArray(values) => values.iter().copied().map(Value::from).collect(),
    }
}

fn list_element_to_value(tag: &Tag) -> Value {
    match tag {
        Tag::Compound(children) if children.len() == 1 => match children.get("") {
            Some(inner) => tag_to_value(inner),
            None => tag_to_value(tag),
        },
        other => tag_to_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn plain_text_is_a_json_string() {
        assert_eq!(Text::plain("Hi").to_json(), "\"Hi\"");
    }

    #[test]
    fn parses_structured_components() {
        let text = Text::from_json(r#"{"text":"Sword","color":"gold"}"#).unwrap();
        assert_eq!(text.as_value()["color"], "gold");
        assert_eq!(Text::from_json(&text.to_json()).unwrap(), text);
    }

    #[test]
    fn plain_text_is_a_string_tag() {
        let tag = Text::plain("Hi").to_tag();
        assert_eq!(tag, Tag::String("Hi".to_string()));
        assert_eq!(Text::from_tag(&tag), Text::plain("Hi"));
    }

    #[test]
    fn structured_text_becomes_a_compound() {
        let text = Text::from_json(r#"{"text":"Sword","bold":true,"color":"gold"}"#).unwrap();
        let Tag::Compound(children) = text.to_tag() else {
            panic!("expected a compound");
        };
        assert_eq!(children["bold"], Tag::Byte(1));
        assert_eq!(children["text"], Tag::String("Sword".to_string()));
        assert_eq!(Text::from_tag(&Tag::Compound(children)), text);
    }

    #[test]
    fn mixed_extra_lists_are_wrapped() {
        let text = Text::from_json(r#"{"text":"","extra":["a",{"text":"b","italic":false}]}"#)
            .unwrap();
        let Tag::Compound(children) = text.to_tag() else {
            panic!("expected a compound");
        };
        let Tag::List(extra) = &children["extra"] else {
            panic!("expected a list");
        };
        assert!(extra.iter().all(|tag| tag.type_id() == 10));
        assert_eq!(Text::from_tag(&Tag::Compound(children)), text);
    }

    #[test]
    fn numbers_keep_their_width() {
        let text = Text::from_json(r#"{"text":"x","n":7,"big":5000000000,"f":1.5}"#).unwrap();
        let Tag::Compound(children) = text.to_tag() else {
            panic!("expected a compound");
        };
        assert_eq!(children["n"], Tag::Int(7));
        assert_eq!(children["big"], Tag::Long(5_000_000_000));
        assert_eq!(children["f"], Tag::Double(1.5));
        assert_eq!(Text::from_tag(&Tag::Compound(children)), text);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            Text::from_json("{not json"),
            Err(CodecError::InvalidText(_))
        ));
    }
}
