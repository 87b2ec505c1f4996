//! Small component payloads: markers, tooltips, colors, containers.

use crate::types::{self, NetworkType};
use mdminecraft_core::color::rgb_tag;
use mdminecraft_core::enums::named;
use mdminecraft_core::tag::{self, CompoundBuilder, TagSerializer};
use mdminecraft_core::{protocol_enum, CodecError, Color, Compound, Tag};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Arbitrary compound data attached to an item, entity, or block entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomData(pub Compound);

impl CustomData {
    /// Binary codec: a network compound tag.
    pub fn network_type() -> NetworkType<Self> {
        types::compound().map(CustomData, |data: &CustomData| data.0.clone())
    }

    /// Tag codec: the compound itself.
    pub fn tag_serializer() -> TagSerializer<Self> {
        tag::compound().map(CustomData, |data: &CustomData| data.0.clone())
    }
}

/// Marks an item as never taking durability damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbreakable {
    /// Whether the tooltip line is shown.
    pub show_in_tooltip: bool,
}

impl Default for Unbreakable {
    fn default() -> Self {
        Self {
            show_in_tooltip: true,
        }
    }
}

impl Unbreakable {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        types::boolean().map(
            |show_in_tooltip| Unbreakable { show_in_tooltip },
            |value: &Unbreakable| value.show_in_tooltip,
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                Ok(Unbreakable {
                    show_in_tooltip: tag.reader()?.bool_or("show_in_tooltip", true)?,
                })
            },
            |value: &Unbreakable| {
                CompoundBuilder::new()
                    .put("show_in_tooltip", value.show_in_tooltip)
                    .build()
            },
        )
    }
}

protocol_enum! {
    /// Item name color tier.
    pub enum ItemRarity("rarity") {
        /// White name.
        Common => "common",
        /// Yellow name.
        Uncommon => "uncommon",
        /// Aqua name.
        Rare => "rare",
        /// Light purple name.
        Epic => "epic",
    }
}

impl ItemRarity {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        types::ordinal()
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        named()
    }
}

/// Leather-armor style dye color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DyedItemColor {
    /// Dye color.
    pub color: Color,
    /// Whether the tooltip line is shown.
    pub show_in_tooltip: bool,
}

impl DyedItemColor {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(DyedItemColor {
                    color: Color::from_rgb(buf.read_int()?),
                    show_in_tooltip: buf.read_bool()?,
                })
            },
            |buf, value: &DyedItemColor| {
                buf.write_int(value.color.as_rgb());
                buf.write_bool(value.show_in_tooltip);
                Ok(())
            },
        )
    }

    /// Tag codec; a bare int is accepted as the color with the tooltip shown.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                if let Tag::Int(rgb) = tag {
                    return Ok(DyedItemColor {
                        color: Color::from_rgb(*rgb),
                        show_in_tooltip: true,
                    });
                }
                let fields = tag.reader()?;
                Ok(DyedItemColor {
                    color: fields.read("rgb", &rgb_tag())?,
                    show_in_tooltip: fields.bool_or("show_in_tooltip", true)?,
                })
            },
            |value: &DyedItemColor| {
                CompoundBuilder::new()
                    .put("rgb", value.color.as_rgb())
                    .put("show_in_tooltip", value.show_in_tooltip)
                    .build()
            },
        )
    }
}

/// Armor trim by material and pattern protocol ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorTrim {
    /// Trim material id.
    pub material: i32,
    /// Trim pattern id.
    pub pattern: i32,
    /// Whether the tooltip line is shown.
    pub show_in_tooltip: bool,
}

impl ArmorTrim {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(ArmorTrim {
                    material: buf.read_var_int()?,
                    pattern: buf.read_var_int()?,
                    show_in_tooltip: buf.read_bool()?,
                })
            },
            |buf, value: &ArmorTrim| {
                buf.write_var_int(value.material);
                buf.write_var_int(value.pattern);
                buf.write_bool(value.show_in_tooltip);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(ArmorTrim {
                    material: fields.int("material")?,
                    pattern: fields.int("pattern")?,
                    show_in_tooltip: fields.bool_or("show_in_tooltip", true)?,
                })
            },
            |value: &ArmorTrim| {
                CompoundBuilder::new()
                    .put("material", value.material)
                    .put("pattern", value.pattern)
                    .put("show_in_tooltip", value.show_in_tooltip)
                    .build()
            },
        )
    }
}

/// Block state properties applied when the item is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemBlockState(pub BTreeMap<String, String>);

impl ItemBlockState {
    /// Binary codec: var-int count then name/value string pairs.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                let len = buf.read_length(usize::from(u16::MAX))?;
                let mut properties = BTreeMap::new();
                for _ in 0..len {
                    let name = buf.read_string()?;
                    properties.insert(name, buf.read_string()?);
                }
                Ok(ItemBlockState(properties))
            },
            |buf, value: &ItemBlockState| {
                buf.write_var_int(value.0.len() as i32);
                for (name, property) in &value.0 {
                    buf.write_string(name)?;
                    buf.write_string(property)?;
                }
                Ok(())
            },
        )
    }

    /// Tag codec: a compound of string tags.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                tag.as_compound()?
                    .iter()
                    .map(|(name, value)| -> Result<(String, String), CodecError> {
                        Ok((name.clone(), value.as_str()?.to_string()))
                    })
                    .collect::<Result<_, _>>()
                    .map(ItemBlockState)
            },
            |value: &ItemBlockState| {
                Tag::Compound(
                    value
                        .0
                        .iter()
                        .map(|(name, property)| (name.clone(), Tag::String(property.clone())))
                        .collect(),
                )
            },
        )
    }
}

/// Sherds on the four faces of a decorated pot, as item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotDecorations(pub Vec<i32>);

impl PotDecorations {
    /// At most one decoration per face.
    pub const MAX_FACES: usize = 4;

    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        types::var_int()
            .list(Self::MAX_FACES)
            .map(PotDecorations, |value: &PotDecorations| value.0.clone())
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        tag::int().list().try_map(
            |faces| {
                if faces.len() > Self::MAX_FACES {
                    return Err(CodecError::ListTooLong {
                        len: faces.len(),
                        max: Self::MAX_FACES,
                    });
                }
                Ok(PotDecorations(faces))
            },
            |value: &PotDecorations| value.0.clone(),
        )
    }
}

/// A bee stored inside a hive item.
#[derive(Debug, Clone, PartialEq)]
pub struct Bee {
    /// Saved entity data.
    pub entity_data: CustomData,
    /// Ticks spent in the hive so far.
    pub ticks_in_hive: i32,
    /// Minimum ticks before the bee may leave.
    pub min_ticks_in_hive: i32,
}

impl Bee {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let data = CustomData::network_type();
        let data_out = data.clone();
        NetworkType::new(
            move |buf| {
                Ok(Bee {
                    entity_data: data.read(buf)?,
                    ticks_in_hive: buf.read_var_int()?,
                    min_ticks_in_hive: buf.read_var_int()?,
                })
            },
            move |buf, bee: &Bee| {
                data_out.write(buf, &bee.entity_data)?;
                buf.write_var_int(bee.ticks_in_hive);
                buf.write_var_int(bee.min_ticks_in_hive);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(Bee {
                    entity_data: fields.read_or(
                        "entity_data",
                        &CustomData::tag_serializer(),
                        CustomData::default(),
                    )?,
                    ticks_in_hive: fields.int("ticks_in_hive")?,
                    min_ticks_in_hive: fields.int("min_ticks_in_hive")?,
                })
            },
            |bee: &Bee| {
                CompoundBuilder::new()
                    .put("entity_data", bee.entity_data.0.clone())
                    .put("ticks_in_hive", bee.ticks_in_hive)
                    .put("min_ticks_in_hive", bee.min_ticks_in_hive)
                    .build()
            },
        )
    }
}

/// Loot table a container rolls when first opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededContainerLoot {
    /// Loot table key.
    pub loot_table: String,
    /// Roll seed; zero picks a random seed.
    pub seed: i64,
}

impl SeededContainerLoot {
    /// Tag codec; this component is never sent to clients.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(SeededContainerLoot {
                    loot_table: fields.string("loot_table")?,
                    seed: fields.optional("seed").map_or(Ok(0), Tag::as_long)?,
                })
            },
            |value: &SeededContainerLoot| {
                CompoundBuilder::new()
                    .put("loot_table", value.loot_table.as_str())
                    .put("seed", value.seed)
                    .build()
            },
        )
    }
}

/// Selected property per block for the debug stick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugStickState(pub BTreeMap<String, String>);

impl DebugStickState {
    /// Tag codec; this component is never sent to clients.
    pub fn tag_serializer() -> TagSerializer<Self> {
        ItemBlockState::tag_serializer().map(
            |state| DebugStickState(state.0),
            |value: &DebugStickState| ItemBlockState(value.0.clone()),
        )
    }
}

/// A signed game-profile property (skin textures and the like).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
    /// Optional signature.
    pub signature: Option<String>,
}

/// Player head owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadProfile {
    /// Player name.
    pub name: Option<String>,
    /// Player uuid.
    pub uuid: Option<Uuid>,
    /// Profile properties.
    pub properties: Vec<ProfileProperty>,
}

impl HeadProfile {
    /// Maximum number of properties.
    pub const MAX_PROPERTIES: usize = 16;

    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let property = NetworkType::new(
            |buf| {
                Ok(ProfileProperty {
                    name: buf.read_string()?,
                    value: buf.read_string()?,
                    signature: types::string().optional().read(buf)?,
                })
            },
            |buf, property: &ProfileProperty| {
                buf.write_string(&property.name)?;
                buf.write_string(&property.value)?;
                types::string().optional().write(buf, &property.signature)
            },
        );
        let properties = property.list(Self::MAX_PROPERTIES);
        let properties_out = properties.clone();
        NetworkType::new(
            move |buf| {
                Ok(HeadProfile {
                    name: types::string().optional().read(buf)?,
                    uuid: types::uuid().optional().read(buf)?,
                    properties: properties.read(buf)?,
                })
            },
            move |buf, profile: &HeadProfile| {
                types::string().optional().write(buf, &profile.name)?;
                types::uuid().optional().write(buf, &profile.uuid)?;
                properties_out.write(buf, &profile.properties)
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let property = TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(ProfileProperty {
                    name: fields.string("name")?,
                    value: fields.string("value")?,
                    signature: fields.opt_string("signature")?,
                })
            },
            |property: &ProfileProperty| {
                CompoundBuilder::new()
                    .put("name", property.name.as_str())
                    .put("value", property.value.as_str())
                    .put_opt("signature", property.signature.clone())
                    .build()
            },
        )
        .list();
        let properties_out = property.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(HeadProfile {
                    name: fields.opt_string("name")?,
                    uuid: fields.read_opt("id", &uuid_tag())?,
                    properties: fields.read_or("properties", &property, Vec::new())?,
                })
            },
            move |profile: &HeadProfile| {
                CompoundBuilder::new()
                    .put_opt("name", profile.name.clone())
                    .put_opt("id", profile.uuid.map(|id| uuid_tag().write(&id)))
                    .put("properties", properties_out.write(&profile.properties))
                    .build()
            },
        )
    }
}

/// UUID stored as four big-endian ints.
pub fn uuid_tag() -> TagSerializer<Uuid> {
    TagSerializer::new(
        |tag| match tag.as_int_array()? {
            [a, b, c, d] => Ok(Uuid::from_u128(
                (u128::from(*a as u32) << 96)
                    | (u128::from(*b as u32) << 64)
                    | (u128::from(*c as u32) << 32)
                    | u128::from(*d as u32),
            )),
            other => Err(CodecError::ListTooLong {
                len: other.len(),
                max: 4,
            }),
        },
        |id: &Uuid| {
            let bits = id.as_u128();
            Tag::IntArray(vec![
                (bits >> 96) as u32 as i32,
                (bits >> 64) as u32 as i32,
                (bits >> 32) as u32 as i32,
                bits as u32 as i32,
            ])
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkBuffer;

    #[test]
    fn unbreakable_tag_defaults_to_shown() {
        let value = Unbreakable::tag_serializer()
            .read(&Tag::empty_compound())
            .unwrap();
        assert!(value.show_in_tooltip);
    }

    #[test]
    fn dyed_color_accepts_bare_int() {
        let value = DyedItemColor::tag_serializer().read(&Tag::Int(0xA06540)).unwrap();
        assert_eq!(value.color, Color::from_rgb(0xA06540));
        assert!(value.show_in_tooltip);
    }

    #[test]
    fn pot_decorations_reject_a_fifth_face() {
        let mut buf = NetworkBuffer::new();
        buf.write_var_int(5);
        for id in 0..5 {
            buf.write_var_int(id);
        }
        assert!(matches!(
            PotDecorations::network_type().read(&mut buf),
            Err(CodecError::ListTooLong { len: 5, max: 4 })
        ));
        let tag = Tag::List((0..5).map(Tag::Int).collect());
        assert!(PotDecorations::tag_serializer().read(&tag).is_err());
    }

    #[test]
    fn uuid_tag_splits_into_four_ints() {
        let id = Uuid::from_u128(0x0000_0001_0000_0002_0000_0003_FFFF_FFFF);
        let tag = uuid_tag().write(&id);
        assert_eq!(tag, Tag::IntArray(vec![1, 2, 3, -1]));
        assert_eq!(uuid_tag().read(&tag).unwrap(), id);
    }

    #[test]
    fn head_profile_round_trips_on_both_channels() {
        let profile = HeadProfile {
            name: Some("Notch".to_string()),
            uuid: Some(Uuid::from_u128(42)),
            properties: vec![ProfileProperty {
                name: "textures".to_string(),
                value: "e30=".to_string(),
                signature: None,
            }],
        };
        let mut buf = NetworkBuffer::new();
        HeadProfile::network_type().write(&mut buf, &profile).unwrap();
        assert_eq!(HeadProfile::network_type().read(&mut buf).unwrap(), profile);
        assert!(buf.is_empty());

        let tag = HeadProfile::tag_serializer().write(&profile);
        assert_eq!(HeadProfile::tag_serializer().read(&tag).unwrap(), profile);
    }
}
