//! Enchantments, adventure-mode predicates, attribute modifiers, and tools.
//!
//! Enchantment, attribute, and block references are protocol ids; the
//! registries that name them are owned by the game layer.

use super::MAX_ENTRIES;
use crate::types::{self, NetworkType};
use mdminecraft_core::enums::named;
use mdminecraft_core::tag::{self, CompoundBuilder, TagSerializer};
use mdminecraft_core::{protocol_enum, Compound};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::basic::uuid_tag;

/// Enchantment levels keyed by enchantment id.
///
/// Entries are written in id order. A payload that names the same
/// enchantment twice keeps the later level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentList {
    /// Level per enchantment id.
    pub enchantments: BTreeMap<i32, i32>,
    /// Whether the tooltip lines are shown.
    pub show_in_tooltip: bool,
}

impl Default for EnchantmentList {
    fn default() -> Self {
        Self {
            enchantments: BTreeMap::new(),
            show_in_tooltip: true,
        }
    }
}

impl EnchantmentList {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                let len = buf.read_length(MAX_ENTRIES)?;
                let mut enchantments = BTreeMap::new();
                for _ in 0..len {
                    let id = buf.read_var_int()?;
                    enchantments.insert(id, buf.read_var_int()?);
                }
                Ok(EnchantmentList {
                    enchantments,
                    show_in_tooltip: buf.read_bool()?,
                })
            },
            |buf, list: &EnchantmentList| {
                buf.write_var_int(list.enchantments.len() as i32);
                for (&id, &level) in &list.enchantments {
                    buf.write_var_int(id);
                    buf.write_var_int(level);
                }
                buf.write_bool(list.show_in_tooltip);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let level = TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok((fields.int("id")?, fields.int("level")?))
            },
            |&(id, level): &(i32, i32)| {
                CompoundBuilder::new().put("id", id).put("level", level).build()
            },
        )
        .list();
        let level_out = level.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(EnchantmentList {
                    enchantments: fields
                        .read_or("levels", &level, Vec::new())?
                        .into_iter()
                        .collect(),
                    show_in_tooltip: fields.bool_or("show_in_tooltip", true)?,
                })
            },
            move |list: &EnchantmentList| {
                let levels: Vec<(i32, i32)> = list
                    .enchantments
                    .iter()
                    .map(|(&id, &lvl)| (id, lvl))
                    .collect();
                CompoundBuilder::new()
                    .put("levels", level_out.write(&levels))
                    .put("show_in_tooltip", list.show_in_tooltip)
                    .build()
            },
        )
    }
}

/// One adventure-mode block predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPredicate {
    /// Matching block ids; `None` matches any block.
    pub blocks: Option<Vec<i32>>,
    /// Block entity data that must be present.
    pub nbt: Option<Compound>,
}

impl BlockPredicate {
    fn network_type() -> NetworkType<Self> {
        let blocks = types::var_int().list(MAX_ENTRIES).optional();
        let nbt = types::compound().optional();
        let (blocks_out, nbt_out) = (blocks.clone(), nbt.clone());
        NetworkType::new(
            move |buf| {
                Ok(BlockPredicate {
                    blocks: blocks.read(buf)?,
                    nbt: nbt.read(buf)?,
                })
            },
            move |buf, predicate: &BlockPredicate| {
                blocks_out.write(buf, &predicate.blocks)?;
                nbt_out.write(buf, &predicate.nbt)
            },
        )
    }

    fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(BlockPredicate {
                    blocks: fields.read_opt("blocks", &tag::int().list())?,
                    nbt: fields.read_opt("nbt", &tag::compound())?,
                })
            },
            |predicate: &BlockPredicate| {
                CompoundBuilder::new()
                    .put_opt(
                        "blocks",
                        predicate.blocks.as_ref().map(|ids| tag::int().list().write(ids)),
                    )
                    .put_opt("nbt", predicate.nbt.clone())
                    .build()
            },
        )
    }
}

/// Blocks an item may be placed on or may break in adventure mode.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPredicates {
    /// Predicates; any match allows the action.
    pub predicates: Vec<BlockPredicate>,
    /// Whether the tooltip lines are shown.
    pub show_in_tooltip: bool,
}

impl BlockPredicates {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let predicates = BlockPredicate::network_type().list(MAX_ENTRIES);
        let predicates_out = predicates.clone();
        NetworkType::new(
            move |buf| {
                Ok(BlockPredicates {
                    predicates: predicates.read(buf)?,
                    show_in_tooltip: buf.read_bool()?,
                })
            },
            move |buf, value: &BlockPredicates| {
                predicates_out.write(buf, &value.predicates)?;
                buf.write_bool(value.show_in_tooltip);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let predicates = BlockPredicate::tag_serializer().list();
        let predicates_out = predicates.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(BlockPredicates {
                    predicates: fields.read("predicates", &predicates)?,
                    show_in_tooltip: fields.bool_or("show_in_tooltip", true)?,
                })
            },
            move |value: &BlockPredicates| {
                CompoundBuilder::new()
                    .put("predicates", predicates_out.write(&value.predicates))
                    .put("show_in_tooltip", value.show_in_tooltip)
                    .build()
            },
        )
    }
}

protocol_enum! {
    /// How a modifier combines with the base value.
    pub enum AttributeOperation("attribute operation") {
        /// Adds the amount.
        AddValue => "add_value",
        /// Adds amount × base.
        AddMultipliedBase => "add_multiplied_base",
        /// Multiplies the total by 1 + amount.
        AddMultipliedTotal => "add_multiplied_total",
    }
}

protocol_enum! {
    /// Equipment slots a modifier is active in.
    pub enum EquipmentSlotGroup("equipment slot group") {
        /// Any slot.
        Any => "any",
        /// Main hand.
        MainHand => "mainhand",
        /// Off hand.
        OffHand => "offhand",
        /// Either hand.
        Hand => "hand",
        /// Boots.
        Feet => "feet",
        /// Leggings.
        Legs => "legs",
        /// Chestplate.
        Chest => "chest",
        /// Helmet.
        Head => "head",
        /// Any armor slot.
        Armor => "armor",
        /// Animal body armor.
        Body => "body",
    }
}

/// One attribute modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    /// Attribute id.
    pub attribute: i32,
    /// Modifier uuid.
    pub uuid: Uuid,
    /// Modifier name.
    pub name: String,
    /// Amount.
    pub amount: f64,
    /// Combination rule.
    pub operation: AttributeOperation,
    /// Active slots.
    pub slot: EquipmentSlotGroup,
}

impl AttributeModifier {
    fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(AttributeModifier {
                    attribute: buf.read_var_int()?,
                    uuid: buf.read_uuid()?,
                    name: buf.read_string()?,
                    amount: buf.read_double()?,
                    operation: buf.read_enum()?,
                    slot: buf.read_enum()?,
                })
            },
            |buf, modifier: &AttributeModifier| {
                buf.write_var_int(modifier.attribute);
                buf.write_uuid(&modifier.uuid);
                buf.write_string(&modifier.name)?;
                buf.write_double(modifier.amount);
                buf.write_enum(modifier.operation);
                buf.write_enum(modifier.slot);
                Ok(())
            },
        )
    }

    fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(AttributeModifier {
                    attribute: fields.int("type")?,
                    uuid: fields.read("uuid", &uuid_tag())?,
                    name: fields.string("name")?,
                    amount: fields.double("amount")?,
                    operation: fields.read("operation", &named())?,
                    slot: fields.read_or("slot", &named(), EquipmentSlotGroup::Any)?,
                })
            },
            |modifier: &AttributeModifier| {
                CompoundBuilder::new()
                    .put("type", modifier.attribute)
                    .put("uuid", uuid_tag().write(&modifier.uuid))
                    .put("name", modifier.name.as_str())
                    .put("amount", modifier.amount)
                    .put("operation", named().write(&modifier.operation))
                    .put("slot", named().write(&modifier.slot))
                    .build()
            },
        )
    }
}

/// Attribute modifiers granted while the item is equipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeList {
    /// Modifiers in application order.
    pub modifiers: Vec<AttributeModifier>,
    /// Whether the tooltip lines are shown.
    pub show_in_tooltip: bool,
}

impl AttributeList {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let modifiers = AttributeModifier::network_type().list(MAX_ENTRIES);
        let modifiers_out = modifiers.clone();
        NetworkType::new(
            move |buf| {
                Ok(AttributeList {
                    modifiers: modifiers.read(buf)?,
                    show_in_tooltip: buf.read_bool()?,
                })
            },
            move |buf, list: &AttributeList| {
                modifiers_out.write(buf, &list.modifiers)?;
                buf.write_bool(list.show_in_tooltip);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let modifiers = AttributeModifier::tag_serializer().list();
        let modifiers_out = modifiers.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(AttributeList {
                    modifiers: fields.read_or("modifiers", &modifiers, Vec::new())?,
                    show_in_tooltip: fields.bool_or("show_in_tooltip", true)?,
                })
            },
            move |list: &AttributeList| {
                CompoundBuilder::new()
                    .put("modifiers", modifiers_out.write(&list.modifiers))
                    .put("show_in_tooltip", list.show_in_tooltip)
                    .build()
            },
        )
    }
}

/// Mining behavior for a set of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRule {
    /// Block ids the rule applies to.
    pub blocks: Vec<i32>,
    /// Mining speed override.
    pub speed: Option<f32>,
    /// Whether drops are produced.
    pub correct_for_drops: Option<bool>,
}

/// Mining tool properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    /// Rules, first match wins.
    pub rules: Vec<ToolRule>,
    /// Speed when no rule matches.
    pub default_mining_speed: f32,
    /// Durability lost per block mined.
    pub damage_per_block: i32,
}

impl Tool {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let blocks = types::var_int().list(MAX_ENTRIES);
        let speed = types::float().optional();
        let drops = types::boolean().optional();
        let (blocks_out, speed_out, drops_out) = (blocks.clone(), speed.clone(), drops.clone());
        let rule = NetworkType::new(
            move |buf| {
                Ok(ToolRule {
                    blocks: blocks.read(buf)?,
                    speed: speed.read(buf)?,
                    correct_for_drops: drops.read(buf)?,
                })
            },
            move |buf, rule: &ToolRule| {
                blocks_out.write(buf, &rule.blocks)?;
                speed_out.write(buf, &rule.speed)?;
                drops_out.write(buf, &rule.correct_for_drops)
            },
        );
        let rules = rule.list(MAX_ENTRIES);
        let rules_out = rules.clone();
        NetworkType::new(
            move |buf| {
                Ok(Tool {
                    rules: rules.read(buf)?,
                    default_mining_speed: buf.read_float()?,
                    damage_per_block: buf.read_var_int()?,
                })
            },
            move |buf, tool: &Tool| {
                rules_out.write(buf, &tool.rules)?;
                buf.write_float(tool.default_mining_speed);
                buf.write_var_int(tool.damage_per_block);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let rule = TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(ToolRule {
                    blocks: fields.read("blocks", &tag::int().list())?,
                    speed: fields.read_opt("speed", &tag::float())?,
                    correct_for_drops: fields.read_opt("correct_for_drops", &tag::boolean())?,
                })
            },
            |rule: &ToolRule| {
                CompoundBuilder::new()
                    .put("blocks", tag::int().list().write(&rule.blocks))
                    .put_opt("speed", rule.speed)
                    .put_opt("correct_for_drops", rule.correct_for_drops)
                    .build()
            },
        )
        .list();
        let rule_out = rule.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(Tool {
                    rules: fields.read("rules", &rule)?,
                    default_mining_speed: fields.float_or("default_mining_speed", 1.0)?,
                    damage_per_block: fields.int_or("damage_per_block", 1)?,
                })
            },
            move |tool: &Tool| {
                CompoundBuilder::new()
                    .put("rules", rule_out.write(&tool.rules))
                    .put("default_mining_speed", tool.default_mining_speed)
                    .put("damage_per_block", tool.damage_per_block)
                    .build()
            },
        )
    }
}
