//! The ordered set of vanilla item components.

use super::basic::{
    ArmorTrim, Bee, CustomData, DebugStickState, DyedItemColor, HeadProfile, ItemBlockState,
    ItemRarity, PotDecorations, SeededContainerLoot, Unbreakable,
};
use super::book::{WritableBookContent, WrittenBookContent};
use super::consumable::{Food, PotionContents, SuspiciousStewEffects};
use super::enchant::{AttributeList, BlockPredicates, EnchantmentList, Tool};
use super::firework::{FireworkExplosion, FireworkList};
use super::map::{LodestoneTracker, MapDecorations, MapPostProcessing};
use super::{AnyComponent, DataComponent, MAX_ENTRIES};
use crate::types::{self, NetworkType};
use mdminecraft_core::color::rgb_tag;
use mdminecraft_core::enums::named;
use mdminecraft_core::item::item_tag;
use mdminecraft_core::tag::{self, TagSerializer};
use mdminecraft_core::{DyeColor, IdRegistry, ItemStack, RegistryError, RegistryKey, Text};
use tracing::{debug, info};

/// Longest lore and container lists.
const MAX_LORE_LINES: usize = 256;
const MAX_CONTAINER_SLOTS: usize = 256;

/// Frozen component registry.
///
/// Ids follow declaration order and are part of the wire format: inserting,
/// removing, or reordering a declaration is a protocol change.
#[derive(Debug)]
pub struct ComponentCatalog {
    registry: IdRegistry<Box<dyn AnyComponent>>,
}

impl ComponentCatalog {
    /// Start an empty catalog.
    pub fn builder() -> ComponentCatalogBuilder {
        ComponentCatalogBuilder::default()
    }

    /// The vanilla component set.
    pub fn vanilla() -> Result<Self, RegistryError> {
        let mut b = Self::builder();

        b.declare(
            "custom_data",
            Some(CustomData::network_type()),
            Some(CustomData::tag_serializer()),
        )?;
        b.declare("max_stack_size", Some(types::var_int()), Some(tag::int()))?;
        b.declare("max_damage", Some(types::var_int()), Some(tag::int()))?;
        b.declare("damage", Some(types::var_int()), Some(tag::int()))?;
        b.declare(
            "unbreakable",
            Some(Unbreakable::network_type()),
            Some(Unbreakable::tag_serializer()),
        )?;
        b.declare("custom_name", Some(types::text()), Some(tag::text()))?;
        b.declare("item_name", Some(types::text()), Some(tag::text()))?;
        b.declare::<Vec<Text>>(
            "lore",
            Some(types::text().list(MAX_LORE_LINES)),
            Some(tag::text().list()),
        )?;
        b.declare("rarity", Some(ItemRarity::network_type()), Some(ItemRarity::tag_serializer()))?;
        b.declare(
            "enchantments",
            Some(EnchantmentList::network_type()),
            Some(EnchantmentList::tag_serializer()),
        )?;
        b.declare(
            "can_place_on",
            Some(BlockPredicates::network_type()),
            Some(BlockPredicates::tag_serializer()),
        )?;
        b.declare(
            "can_break",
            Some(BlockPredicates::network_type()),
            Some(BlockPredicates::tag_serializer()),
        )?;
        b.declare(
            "attribute_modifiers",
            Some(AttributeList::network_type()),
            Some(AttributeList::tag_serializer()),
        )?;
        b.declare("custom_model_data", Some(types::var_int()), Some(tag::int()))?;
        b.declare("hide_additional_tooltip", Some(types::nothing()), Some(tag::nothing()))?;
        b.declare("hide_tooltip", Some(types::nothing()), Some(tag::nothing()))?;
        b.declare("repair_cost", Some(types::var_int()), Some(tag::int()))?;
        b.declare::<()>("creative_slot_lock", Some(types::nothing()), None)?;
        b.declare("enchantment_glint_override", Some(types::boolean()), Some(tag::boolean()))?;
        b.declare::<()>("intangible_projectile", None, Some(tag::nothing()))?;
        b.declare("food", Some(Food::network_type()), Some(Food::tag_serializer()))?;
        b.declare("fire_resistant", Some(types::nothing()), Some(tag::nothing()))?;
        b.declare("tool", Some(Tool::network_type()), Some(Tool::tag_serializer()))?;
        b.declare(
            "stored_enchantments",
            Some(EnchantmentList::network_type()),
            Some(EnchantmentList::tag_serializer()),
        )?;
        b.declare(
            "dyed_color",
            Some(DyedItemColor::network_type()),
            Some(DyedItemColor::tag_serializer()),
        )?;
        b.declare("map_color", Some(types::color()), Some(rgb_tag()))?;
        b.declare("map_id", Some(types::var_int()), Some(tag::int()))?;
        b.declare::<MapDecorations>(
            "map_decorations",
            None,
            Some(MapDecorations::tag_serializer()),
        )?;
        b.declare::<MapPostProcessing>(
            "map_post_processing",
            Some(MapPostProcessing::network_type()),
            None,
        )?;
        b.declare("charged_projectiles", Some(item_list(MAX_ENTRIES)), Some(item_tag().list()))?;
        b.declare("bundle_contents", Some(item_list(MAX_ENTRIES)), Some(item_tag().list()))?;
        b.declare(
            "potion_contents",
            Some(PotionContents::network_type()),
            Some(PotionContents::tag_serializer()),
        )?;
        b.declare(
            "suspicious_stew_effects",
            Some(SuspiciousStewEffects::network_type()),
            Some(SuspiciousStewEffects::tag_serializer()),
        )?;
        b.declare(
            "writable_book_content",
            Some(WritableBookContent::network_type()),
            Some(WritableBookContent::tag_serializer()),
        )?;
        b.declare(
            "written_book_content",
            Some(WrittenBookContent::network_type()),
            Some(WrittenBookContent::tag_serializer()),
        )?;
        b.declare("trim", Some(ArmorTrim::network_type()), Some(ArmorTrim::tag_serializer()))?;
        b.declare::<DebugStickState>(
            "debug_stick_state",
            None,
            Some(DebugStickState::tag_serializer()),
        )?;
        b.declare(
            "entity_data",
            Some(CustomData::network_type()),
            Some(CustomData::tag_serializer()),
        )?;
        b.declare(
            "bucket_entity_data",
            Some(CustomData::network_type()),
            Some(CustomData::tag_serializer()),
        )?;
        b.declare(
            "block_entity_data",
            Some(CustomData::network_type()),
            Some(CustomData::tag_serializer()),
        )?;
        b.declare("instrument", Some(types::string()), Some(tag::string()))?;
        b.declare("ominous_bottle_amplifier", Some(types::var_int()), Some(tag::int()))?;
        b.declare::<Vec<String>>(
            "recipes",
            Some(types::string().list(MAX_ENTRIES)),
            Some(tag::string().list()),
        )?;
        b.declare(
            "lodestone_tracker",
            Some(LodestoneTracker::network_type()),
            Some(LodestoneTracker::tag_serializer()),
        )?;
        b.declare(
            "firework_explosion",
            Some(FireworkExplosion::network_type()),
            Some(FireworkExplosion::tag_serializer()),
        )?;
        b.declare(
            "fireworks",
            Some(FireworkList::network_type()),
            Some(FireworkList::tag_serializer()),
        )?;
        b.declare(
            "profile",
            Some(HeadProfile::network_type()),
            Some(HeadProfile::tag_serializer()),
        )?;
        b.declare("note_block_sound", Some(types::string()), Some(tag::string()))?;
        // Patterns reference a registry that is not modelled yet.
        b.declare::<()>("banner_patterns", None, None)?;
        b.declare::<DyeColor>("base_color", Some(types::ordinal()), Some(named()))?;
        b.declare(
            "pot_decorations",
            Some(PotDecorations::network_type()),
            Some(PotDecorations::tag_serializer()),
        )?;
        b.declare("container", Some(item_list(MAX_CONTAINER_SLOTS)), Some(item_tag().list()))?;
        b.declare(
            "block_state",
            Some(ItemBlockState::network_type()),
            Some(ItemBlockState::tag_serializer()),
        )?;
        b.declare::<Vec<Bee>>(
            "bees",
            Some(Bee::network_type().list(MAX_ENTRIES)),
            Some(Bee::tag_serializer().list()),
        )?;
        b.declare::<String>("lock", None, Some(tag::string()))?;
        b.declare::<SeededContainerLoot>(
            "container_loot",
            None,
            Some(SeededContainerLoot::tag_serializer()),
        )?;

        let catalog = b.build();
        info!(components = catalog.len(), "component catalog ready");
        Ok(catalog)
    }

    /// Erased definition by name; a bare path resolves in `minecraft`.
    pub fn by_name(&self, name: &str) -> Option<&dyn AnyComponent> {
        self.registry.by_name(name).map(|component| &**component)
    }

    /// Erased definition by protocol id.
    pub fn by_id(&self, id: i32) -> Option<&dyn AnyComponent> {
        self.registry.by_id(id).map(|component| &**component)
    }

    /// Typed definition by name; `None` if unknown or if `T` is not its
    /// value type.
    pub fn typed<T: Send + Sync + 'static>(&self, name: &str) -> Option<&DataComponent<T>> {
        self.by_name(name)?.as_any().downcast_ref()
    }

    /// Definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn AnyComponent> {
        self.registry.iter().map(|(_, _, component)| &**component)
    }

    /// Number of declared components.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Declares components in order, assigning sequential ids.
#[derive(Debug, Default)]
pub struct ComponentCatalogBuilder {
    registry: IdRegistry<Box<dyn AnyComponent>>,
}

impl ComponentCatalogBuilder {
    /// Declare the next component. Names without a namespace go in
    /// `minecraft`.
    pub fn declare<T: Send + Sync + 'static>(
        &mut self,
        name: &str,
        network: Option<NetworkType<T>>,
        tag: Option<TagSerializer<T>>,
    ) -> Result<i32, RegistryError> {
        let key = RegistryKey::parse(name)?;
        let component = self.registry.register_with(key.clone(), |id| {
            Box::new(DataComponent::new(key, id, network, tag)) as Box<dyn AnyComponent>
        })?;
        debug!(
            name = %component.key(),
            id = component.id(),
            networked = component.is_networked(),
            persisted = component.is_persisted(),
            "declared component"
        );
        Ok(component.id())
    }

    /// Freeze the catalog.
    pub fn build(self) -> ComponentCatalog {
        ComponentCatalog {
            registry: self.registry,
        }
    }
}

fn item_list(max: usize) -> NetworkType<Vec<ItemStack>> {
    types::item_stack().list(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkBuffer;
    use mdminecraft_core::{Channel, CodecError, Tag};

    const ORDER: [&str; 56] = [
        "custom_data",
        "max_stack_size",
        "max_damage",
        "damage",
        "unbreakable",
        "custom_name",
        "item_name",
        "lore",
        "rarity",
        "enchantments",
        "can_place_on",
        "can_break",
        "attribute_modifiers",
        "custom_model_data",
        "hide_additional_tooltip",
        "hide_tooltip",
        "repair_cost",
        "creative_slot_lock",
        "enchantment_glint_override",
        "intangible_projectile",
        "food",
        "fire_resistant",
        "tool",
        "stored_enchantments",
        "dyed_color",
        "map_color",
        "map_id",
        "map_decorations",
        "map_post_processing",
        "charged_projectiles",
        "bundle_contents",
        "potion_contents",
        "suspicious_stew_effects",
        "writable_book_content",
        "written_book_content",
        "trim",
        "debug_stick_state",
        "entity_data",
        "bucket_entity_data",
        "block_entity_data",
        "instrument",
        "ominous_bottle_amplifier",
        "recipes",
        "lodestone_tracker",
        "firework_explosion",
        "fireworks",
        "profile",
        "note_block_sound",
        "banner_patterns",
        "base_color",
        "pot_decorations",
        "container",
        "block_state",
        "bees",
        "lock",
        "container_loot",
    ];

    fn catalog() -> ComponentCatalog {
        ComponentCatalog::vanilla().unwrap()
    }

    #[test]
    fn ids_follow_declaration_order() {
        let catalog = catalog();
        assert_eq!(catalog.len(), ORDER.len());
        for (id, name) in ORDER.iter().enumerate() {
            let component = catalog.by_id(id as i32).unwrap();
            assert_eq!(component.key().path(), *name);
            assert_eq!(component.id(), id as i32);
        }
    }

    #[test]
    fn name_and_id_lookups_agree() {
        let catalog = catalog();
        for component in catalog.iter() {
            let by_name = catalog.by_name(&component.key().to_string()).unwrap();
            assert_eq!(by_name.id(), component.id());
            let by_id = catalog.by_id(component.id()).unwrap();
            assert_eq!(by_id.key(), component.key());
        }
    }

    #[test]
    fn unknown_lookups_are_absent() {
        let catalog = catalog();
        assert!(catalog.by_id(56).is_none());
        assert!(catalog.by_id(-1).is_none());
        assert!(catalog.by_name("minecraft:not_a_component").is_none());
        assert!(catalog.by_name("Not A Key").is_none());
    }

    #[test]
    fn channel_support_matches_declarations() {
        let catalog = catalog();
        let network_less: Vec<&str> = catalog
            .iter()
            .filter(|c| !c.is_networked())
            .map(|c| c.key().path())
            .collect();
        assert_eq!(
            network_less,
            [
                "intangible_projectile",
                "map_decorations",
                "debug_stick_state",
                "banner_patterns",
                "lock",
                "container_loot"
            ]
        );
        let tag_less: Vec<&str> = catalog
            .iter()
            .filter(|c| !c.is_persisted())
            .map(|c| c.key().path())
            .collect();
        assert_eq!(
            tag_less,
            ["creative_slot_lock", "map_post_processing", "banner_patterns"]
        );
    }

    #[test]
    fn unsupported_channel_is_a_typed_error() {
        let catalog = catalog();
        let lock = catalog.typed::<String>("lock").unwrap();
        let mut buf = NetworkBuffer::new();
        assert!(matches!(
            lock.read_network(&mut buf),
            Err(CodecError::UnsupportedChannel {
                channel: Channel::Network,
                ..
            })
        ));
        let slot_lock = catalog.by_name("creative_slot_lock").unwrap();
        assert!(matches!(
            slot_lock.read_tag_any(&Tag::empty_compound()),
            Err(CodecError::UnsupportedChannel {
                channel: Channel::Tag,
                ..
            })
        ));
    }

    #[test]
    fn typed_lookup_checks_value_type() {
        let catalog = catalog();
        assert!(catalog.typed::<i32>("max_damage").is_some());
        assert!(catalog.typed::<String>("max_damage").is_none());
    }

    #[test]
    fn lore_rejects_more_than_256_lines() {
        let catalog = catalog();
        let lore = catalog.typed::<Vec<Text>>("lore").unwrap();
        let mut buf = NetworkBuffer::new();
        buf.write_var_int(257);
        let err = lore.read_network(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::ListTooLong { len: 257, max: 256 }));
        assert!(err.is_malformed());
    }

    #[test]
    fn container_round_trips_items() {
        let catalog = catalog();
        let container = catalog.typed::<Vec<ItemStack>>("container").unwrap();
        let items = vec![ItemStack::new(1, 64), ItemStack::AIR, ItemStack::new(820, 1)];
        let mut buf = NetworkBuffer::new();
        container.write_network(&mut buf, &items).unwrap();
        assert_eq!(container.read_network(&mut buf).unwrap(), items);

        let tag = container.write_tag(&items).unwrap();
        assert_eq!(container.read_tag(&tag).unwrap(), items);
    }

    #[test]
    fn duplicate_declaration_fails() {
        let mut b = ComponentCatalog::builder();
        b.declare("damage", Some(types::var_int()), Some(tag::int())).unwrap();
        let err = b
            .declare("minecraft:damage", Some(types::var_int()), None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRegistration { existing: 0, .. }));
    }
}
