//! Item data components.
//!
//! Every component is a [`DataComponent<T>`]: a registry key, the protocol id
//! it was assigned in declaration order, and up to two codecs. A missing codec
//! means the component never travels on that channel, and using it there is a
//! [`CodecError::UnsupportedChannel`].
//!
//! Code that only knows a component's id or name works through the erased
//! [`AnyComponent`] view; code that knows the value type asks the catalog for
//! the typed definition with [`ComponentCatalog::typed`].

mod basic;
mod book;
mod catalog;
mod consumable;
mod enchant;
mod firework;
mod map;

pub use basic::{
    uuid_tag, ArmorTrim, Bee, CustomData, DebugStickState, DyedItemColor, HeadProfile,
    ItemBlockState, ItemRarity, PotDecorations, ProfileProperty, SeededContainerLoot, Unbreakable,
};
pub use book::{FilteredText, WritableBookContent, WrittenBookContent, MAX_PAGES};
pub use catalog::{ComponentCatalog, ComponentCatalogBuilder};
pub use consumable::{
    EffectDetails, EffectInstance, Food, FoodEffect, PotionContents, StewEffect,
    SuspiciousStewEffects,
};
pub use enchant::{
    AttributeList, AttributeModifier, AttributeOperation, BlockPredicate, BlockPredicates,
    EnchantmentList, EquipmentSlotGroup, Tool, ToolRule,
};
pub use firework::{FireworkExplosion, FireworkList, FireworkShape, MAX_EXPLOSIONS};
pub use map::{GlobalPosition, LodestoneTracker, MapDecoration, MapDecorations, MapPostProcessing};

use crate::buffer::NetworkBuffer;
use crate::types::NetworkType;
use mdminecraft_core::{Channel, CodecError, CodecResult, RegistryKey, Tag, TagSerializer};
use std::any::{type_name, Any};
use std::fmt;

/// Bound for lists whose size is limited only by the protocol's short range.
pub(crate) const MAX_ENTRIES: usize = i16::MAX as usize;

/// A type-erased component value.
pub type ComponentValue = Box<dyn Any + Send + Sync>;

/// A declared component with a value type `T`.
pub struct DataComponent<T> {
    key: RegistryKey,
    id: i32,
    network: Option<NetworkType<T>>,
    tag: Option<TagSerializer<T>>,
}

impl<T> fmt::Debug for DataComponent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataComponent")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("networked", &self.network.is_some())
            .field("persisted", &self.tag.is_some())
            .finish()
    }
}

impl<T: Send + Sync + 'static> DataComponent<T> {
    pub(crate) fn new(
        key: RegistryKey,
        id: i32,
        network: Option<NetworkType<T>>,
        tag: Option<TagSerializer<T>>,
    ) -> Self {
        Self {
            key,
            id,
            network,
            tag,
        }
    }

    /// Namespaced key.
    pub fn key(&self) -> &RegistryKey {
        &self.key
    }

    /// Protocol id.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Whether the component can be sent to clients.
    pub fn is_networked(&self) -> bool {
        self.network.is_some()
    }

    /// Whether the component can be stored in tags.
    pub fn is_persisted(&self) -> bool {
        self.tag.is_some()
    }

    fn unsupported(&self, channel: Channel) -> CodecError {
        CodecError::UnsupportedChannel {
            component: self.key.clone(),
            channel,
        }
    }

    fn network(&self) -> CodecResult<&NetworkType<T>> {
        self.network
            .as_ref()
            .ok_or_else(|| self.unsupported(Channel::Network))
    }

    fn tag(&self) -> CodecResult<&TagSerializer<T>> {
        self.tag.as_ref().ok_or_else(|| self.unsupported(Channel::Tag))
    }

    /// Decode a value from the binary channel.
    pub fn read_network(&self, buf: &mut NetworkBuffer) -> CodecResult<T> {
        self.network()?.read(buf)
    }

    /// Encode a value on the binary channel.
    pub fn write_network(&self, buf: &mut NetworkBuffer, value: &T) -> CodecResult<()> {
        self.network()?.write(buf, value)
    }

    /// Decode a value from its tag.
    pub fn read_tag(&self, tag: &Tag) -> CodecResult<T> {
        self.tag()?.read(tag)
    }

    /// Encode a value as a tag.
    pub fn write_tag(&self, value: &T) -> CodecResult<Tag> {
        Ok(self.tag()?.write(value))
    }

    fn downcast<'a>(&self, value: &'a dyn Any) -> CodecResult<&'a T> {
        value.downcast_ref::<T>().ok_or_else(|| CodecError::ValueType {
            component: self.key.clone(),
            expected: type_name::<T>(),
        })
    }
}

/// Object-safe view of a [`DataComponent`] whose value type is not known
/// statically.
pub trait AnyComponent: fmt::Debug + Send + Sync {
    /// Namespaced key.
    fn key(&self) -> &RegistryKey;

    /// Protocol id.
    fn id(&self) -> i32;

    /// Whether a binary codec is present.
    fn is_networked(&self) -> bool;

    /// Whether a tag codec is present.
    fn is_persisted(&self) -> bool;

    /// Rust name of the value type.
    fn value_type(&self) -> &'static str;

    /// Decode a value from the binary channel.
    fn read_network_any(&self, buf: &mut NetworkBuffer) -> CodecResult<ComponentValue>;

    /// Encode a value on the binary channel; fails with
    /// [`CodecError::ValueType`] if `value` has the wrong type.
    fn write_network_any(&self, buf: &mut NetworkBuffer, value: &dyn Any) -> CodecResult<()>;

    /// Decode a value from its tag.
    fn read_tag_any(&self, tag: &Tag) -> CodecResult<ComponentValue>;

    /// Encode a value as a tag.
    fn write_tag_any(&self, value: &dyn Any) -> CodecResult<Tag>;

    /// The concrete definition, for downcasting to `DataComponent<T>`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Send + Sync + 'static> AnyComponent for DataComponent<T> {
    fn key(&self) -> &RegistryKey {
        &self.key
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn is_networked(&self) -> bool {
        DataComponent::is_networked(self)
    }

    fn is_persisted(&self) -> bool {
        DataComponent::is_persisted(self)
    }

    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn read_network_any(&self, buf: &mut NetworkBuffer) -> CodecResult<ComponentValue> {
        Ok(Box::new(self.read_network(buf)?))
    }

    fn write_network_any(&self, buf: &mut NetworkBuffer, value: &dyn Any) -> CodecResult<()> {
        let network = self.network()?;
        network.write(buf, self.downcast(value)?)
    }

    fn read_tag_any(&self, tag: &Tag) -> CodecResult<ComponentValue> {
        Ok(Box::new(self.read_tag(tag)?))
    }

    fn write_tag_any(&self, value: &dyn Any) -> CodecResult<Tag> {
        let tag = self.tag()?;
        Ok(tag.write(self.downcast(value)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;
    use mdminecraft_core::tag;

    fn max_damage() -> DataComponent<i32> {
        DataComponent::new(
            RegistryKey::minecraft("max_damage"),
            2,
            Some(types::var_int()),
            Some(tag::int()),
        )
    }

    #[test]
    fn missing_codec_is_unsupported_channel() {
        let lock: DataComponent<String> =
            DataComponent::new(RegistryKey::minecraft("lock"), 54, None, Some(tag::string()));
        let mut buf = NetworkBuffer::new();
        let err = lock.write_network(&mut buf, &"key".to_string()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedChannel {
                channel: Channel::Network,
                ..
            }
        ));
        assert!(!err.is_malformed());
        assert!(buf.is_empty());
        assert!(lock.write_tag(&"key".to_string()).is_ok());
    }

    #[test]
    fn erased_write_checks_value_type() {
        let component = max_damage();
        let mut buf = NetworkBuffer::new();
        let err = component
            .write_network_any(&mut buf, &"not an int".to_string())
            .unwrap_err();
        assert!(matches!(err, CodecError::ValueType { .. }));

        component.write_network_any(&mut buf, &250i32).unwrap();
        let value = component.read_network_any(&mut buf).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&250));
    }

    #[test]
    fn erased_tag_round_trip() {
        let component: &dyn AnyComponent = &max_damage();
        let tag = component.write_tag_any(&7i32).unwrap();
        assert_eq!(tag, Tag::Int(7));
        let value = component.read_tag_any(&tag).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&7));
        assert!(component
            .as_any()
            .downcast_ref::<DataComponent<i32>>()
            .is_some());
    }
}
