//! End-to-end codec checks against the vanilla catalogs and fixture states.

use mdminecraft_core::{BlockPosition, Color, Compound, DyeColor, ItemStack, Tag, Text};
use mdminecraft_net::component::*;
use mdminecraft_net::{types, ComponentCatalog, NetworkBuffer, Particle, ProtocolRegistries};
use mdminecraft_testkit::{sample_items, FixedBlockStates, FIXED_STATES};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use uuid::Uuid;

#[test]
fn container_items_survive_both_channels() {
    let registries = ProtocolRegistries::vanilla().unwrap();
    let container = registries
        .components()
        .typed::<Vec<ItemStack>>("minecraft:container")
        .unwrap();
    let items = sample_items();

    let mut buf = NetworkBuffer::new();
    container.write_network(&mut buf, &items).unwrap();
    assert_eq!(container.read_network(&mut buf).unwrap(), items);
    assert!(buf.is_empty());

    let tag = container.write_tag(&items).unwrap();
    assert!(matches!(tag, Tag::List(_)));
    assert_eq!(container.read_tag(&tag).unwrap(), items);
}

#[test]
fn every_fixture_state_round_trips_through_block_particles() {
    let registries = ProtocolRegistries::vanilla().unwrap();
    let states = FixedBlockStates::new();
    let prototype = registries.particles().by_name("falling_dust").unwrap();

    for (state, _) in FIXED_STATES {
        let particle = match prototype {
            Particle::FallingDust(p) => Particle::FallingDust(p.with_block(states.block(state))),
            other => panic!("unexpected prototype {other:?}"),
        };
        let mut buf = NetworkBuffer::new();
        particle.write_data(&mut buf).unwrap();
        let decoded = prototype.read_data(&mut buf, &states).unwrap();
        assert_eq!(decoded, particle);
        assert_eq!(decoded.id(), prototype.id());
    }
}

#[test]
fn item_particles_carry_sample_items() {
    let registries = ProtocolRegistries::vanilla().unwrap();
    let states = FixedBlockStates::new();
    let prototype = registries.particles().by_name("minecraft:item").unwrap();

    for item in sample_items() {
        let particle = match prototype {
            Particle::Item(p) => Particle::Item(p.with_item(item)),
            other => panic!("unexpected prototype {other:?}"),
        };
        let mut buf = NetworkBuffer::new();
        particle.write_data(&mut buf).unwrap();
        assert_eq!(prototype.read_data(&mut buf, &states).unwrap(), particle);
    }
}

#[test]
fn erased_values_move_between_channels() {
    let registries = ProtocolRegistries::vanilla().unwrap();
    let repair_cost = registries.components().by_name("repair_cost").unwrap();

    let value = repair_cost.read_tag_any(&Tag::Int(39)).unwrap();
    let mut buf = NetworkBuffer::new();
    repair_cost.write_network_any(&mut buf, &*value).unwrap();
    assert_eq!(buf.as_slice(), &[39]);

    let decoded = repair_cost.read_network_any(&mut buf).unwrap();
    assert_eq!(decoded.downcast_ref::<i32>(), Some(&39));
}

/// Encodes `value` on every channel `name` supports and expects it back
/// unchanged. Stored tags also go through binary NBT.
fn assert_round_trips<T>(
    catalog: &ComponentCatalog,
    name: &str,
    value: T,
    covered: &mut BTreeSet<String>,
) where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    let component = catalog
        .typed::<T>(name)
        .unwrap_or_else(|| panic!("{name} is not declared with this value type"));

    if component.is_networked() {
        let mut buf = NetworkBuffer::new();
        component.write_network(&mut buf, &value).unwrap();
        assert_eq!(component.read_network(&mut buf).unwrap(), value, "{name} over the network");
        assert!(buf.is_empty(), "{name} left unread bytes");
    }
    if component.is_persisted() {
        let tag = component.write_tag(&value).unwrap();
        let mut buf = NetworkBuffer::new();
        types::nbt().write(&mut buf, &tag).unwrap();
        let stored = types::nbt().read(&mut buf).unwrap();
        assert_eq!(stored, tag, "{name} through NBT");
        assert_eq!(component.read_tag(&stored).unwrap(), value, "{name} as a tag");
    }
    covered.insert(component.key().to_string());
}

fn compound(entries: &[(&str, Tag)]) -> Compound {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn strings(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn every_component_round_trips_on_its_channels() {
    let registries = ProtocolRegistries::vanilla().unwrap();
    let catalog = registries.components();
    let mut covered = BTreeSet::new();
    let c = &mut covered;

    let pig = CustomData(compound(&[
        ("id", Tag::String("minecraft:pig".into())),
        ("Health", Tag::Float(4.5)),
        ("Tags", Tag::List(vec![Tag::String("saddled".into())])),
    ]));
    let chest = CustomData(compound(&[("Lock", Tag::String("vault key".into()))]));
    let regeneration = EffectInstance {
        effect: 10,
        details: EffectDetails {
            amplifier: 1,
            duration: 600,
            ambient: false,
            show_particles: false,
            show_icon: true,
            hidden_effect: Some(Box::new(EffectDetails {
                amplifier: 0,
                duration: 1200,
                ..EffectDetails::default()
            })),
        },
    };
    let creeper_burst = FireworkExplosion {
        shape: FireworkShape::Creeper,
        colors: vec![Color::new(0x11, 0x22, 0x33), Color::RED],
        fade_colors: vec![Color::WHITE],
        has_trail: true,
        has_twinkle: false,
    };
    let styled = Text::from_json(r#"{"text":"Blade","italic":false,"color":"gold"}"#).unwrap();

    assert_round_trips(catalog, "custom_data", pig.clone(), c);
    assert_round_trips(catalog, "max_stack_size", 16, c);
    assert_round_trips(catalog, "max_damage", 250, c);
    assert_round_trips(catalog, "damage", 12, c);
    assert_round_trips(catalog, "unbreakable", Unbreakable { show_in_tooltip: false }, c);
    assert_round_trips(catalog, "custom_name", Text::plain("Excalibur"), c);
    assert_round_trips(catalog, "item_name", styled.clone(), c);
    assert_round_trips(catalog, "lore", vec![Text::plain("first line"), styled.clone()], c);
    assert_round_trips(catalog, "rarity", ItemRarity::Epic, c);
    assert_round_trips(
        catalog,
        "enchantments",
        EnchantmentList {
            enchantments: [(9, 5), (16, 2)].into_iter().collect(),
            show_in_tooltip: false,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "can_place_on",
        BlockPredicates {
            predicates: vec![
                BlockPredicate {
                    blocks: Some(vec![1, 2, 3]),
                    nbt: None,
                },
                BlockPredicate {
                    blocks: None,
                    nbt: Some(chest.0.clone()),
                },
            ],
            show_in_tooltip: false,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "can_break",
        BlockPredicates {
            predicates: vec![BlockPredicate {
                blocks: Some(vec![7]),
                nbt: None,
            }],
            show_in_tooltip: true,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "attribute_modifiers",
        AttributeList {
            modifiers: vec![AttributeModifier {
                attribute: 2,
                uuid: Uuid::from_u128(0x91ae_ea56_6f1b_4b5e_9d4c_4a2b_1f0e_77c3),
                name: "sprint bonus".into(),
                amount: 0.25,
                operation: AttributeOperation::AddMultipliedBase,
                slot: EquipmentSlotGroup::MainHand,
            }],
            show_in_tooltip: true,
        },
        c,
    );
    assert_round_trips(catalog, "custom_model_data", 7001, c);
    assert_round_trips(catalog, "hide_additional_tooltip", (), c);
    assert_round_trips(catalog, "hide_tooltip", (), c);
    assert_round_trips(catalog, "repair_cost", 39, c);
    assert_round_trips(catalog, "creative_slot_lock", (), c);
    assert_round_trips(catalog, "enchantment_glint_override", false, c);
    assert_round_trips(catalog, "intangible_projectile", (), c);
    assert_round_trips(
        catalog,
        "food",
        Food {
            nutrition: 4,
            saturation: 2.5,
            can_always_eat: true,
            eat_seconds: 0.75,
            effects: vec![FoodEffect {
                effect: regeneration.clone(),
                probability: 0.5,
            }],
        },
        c,
    );
    assert_round_trips(catalog, "fire_resistant", (), c);
    assert_round_trips(
        catalog,
        "tool",
        Tool {
            rules: vec![
                ToolRule {
                    blocks: vec![10, 11],
                    speed: Some(8.0),
                    correct_for_drops: Some(true),
                },
                ToolRule {
                    blocks: vec![12],
                    speed: None,
                    correct_for_drops: None,
                },
            ],
            default_mining_speed: 1.5,
            damage_per_block: 2,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "stored_enchantments",
        EnchantmentList {
            enchantments: [(20, 1)].into_iter().collect(),
            show_in_tooltip: true,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "dyed_color",
        DyedItemColor {
            color: Color::new(0xA0, 0x65, 0x40),
            show_in_tooltip: false,
        },
        c,
    );
    assert_round_trips(catalog, "map_color", Color::new(0x46, 0x40, 0x2E), c);
    assert_round_trips(catalog, "map_id", 42, c);
    assert_round_trips(
        catalog,
        "map_decorations",
        MapDecorations(
            [(
                "home".to_string(),
                MapDecoration {
                    kind: "minecraft:red_x".into(),
                    x: 128.5,
                    z: -64.0,
                    rotation: 180.0,
                },
            )]
            .into_iter()
            .collect(),
        ),
        c,
    );
    assert_round_trips(catalog, "map_post_processing", MapPostProcessing::Scale, c);
    assert_round_trips(catalog, "charged_projectiles", vec![ItemStack::new(802, 1)], c);
    assert_round_trips(
        catalog,
        "bundle_contents",
        vec![ItemStack::new(1, 32), ItemStack::new(5, 1)],
        c,
    );
    assert_round_trips(
        catalog,
        "potion_contents",
        PotionContents {
            potion: Some(21),
            custom_color: Some(Color::new(0x38, 0x5D, 0xC6)),
            custom_effects: vec![EffectInstance {
                effect: 1,
                details: EffectDetails {
                    amplifier: 2,
                    duration: -1,
                    ambient: true,
                    ..EffectDetails::default()
                },
            }],
        },
        c,
    );
    assert_round_trips(
        catalog,
        "suspicious_stew_effects",
        SuspiciousStewEffects(vec![StewEffect {
            effect: 15,
            duration: 80,
        }]),
        c,
    );
    assert_round_trips(
        catalog,
        "writable_book_content",
        WritableBookContent {
            pages: vec![
                FilteredText::plain("draft".to_string()),
                FilteredText {
                    raw: "darn".to_string(),
                    filtered: Some("****".to_string()),
                },
            ],
        },
        c,
    );
    assert_round_trips(
        catalog,
        "written_book_content",
        WrittenBookContent {
            title: FilteredText::plain("Journal".to_string()),
            author: "Alex".into(),
            generation: 1,
            pages: vec![
                FilteredText::plain(Text::plain("Day one")),
                FilteredText {
                    raw: styled.clone(),
                    filtered: Some(Text::plain("hidden")),
                },
            ],
            resolved: true,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "trim",
        ArmorTrim {
            material: 3,
            pattern: 11,
            show_in_tooltip: false,
        },
        c,
    );
    assert_round_trips(
        catalog,
        "debug_stick_state",
        DebugStickState(strings(&[("minecraft:oak_stairs", "facing")])),
        c,
    );
    assert_round_trips(catalog, "entity_data", pig.clone(), c);
    assert_round_trips(catalog, "bucket_entity_data", pig.clone(), c);
    assert_round_trips(catalog, "block_entity_data", chest, c);
    assert_round_trips(catalog, "instrument", "minecraft:ponder_goat_horn".to_string(), c);
    assert_round_trips(catalog, "ominous_bottle_amplifier", 3, c);
    assert_round_trips(
        catalog,
        "recipes",
        vec!["minecraft:torch".to_string(), "minecraft:lantern".to_string()],
        c,
    );
    assert_round_trips(
        catalog,
        "lodestone_tracker",
        LodestoneTracker {
            target: Some(GlobalPosition {
                dimension: "minecraft:the_nether".into(),
                position: BlockPosition::new(12, 64, -300),
            }),
            tracked: false,
        },
        c,
    );
    assert_round_trips(catalog, "firework_explosion", creeper_burst.clone(), c);
    assert_round_trips(
        catalog,
        "fireworks",
        FireworkList {
            flight_duration: 2,
            explosions: vec![
                creeper_burst,
                FireworkExplosion {
                    shape: FireworkShape::Star,
                    colors: vec![Color::new(0xF0, 0xF0, 0x00)],
                    fade_colors: Vec::new(),
                    has_trail: false,
                    has_twinkle: true,
                },
            ],
        },
        c,
    );
    assert_round_trips(
        catalog,
        "profile",
        HeadProfile {
            name: Some("Notch".into()),
            uuid: Some(Uuid::from_u128(0x069a_79f4_44e9_4726_a5be_fca9_0e38_aaf5)),
            properties: vec![ProfileProperty {
                name: "textures".into(),
                value: "e3RleHR1cmVzOnt9fQ==".into(),
                signature: None,
            }],
        },
        c,
    );
    let sound = "minecraft:entity.creeper.primed".to_string();
    assert_round_trips(catalog, "note_block_sound", sound, c);
    assert_round_trips(catalog, "banner_patterns", (), c);
    assert_round_trips(catalog, "base_color", DyeColor::Cyan, c);
    assert_round_trips(catalog, "pot_decorations", PotDecorations(vec![800, 801, 0, 802]), c);
    assert_round_trips(catalog, "container", sample_items(), c);
    assert_round_trips(
        catalog,
        "block_state",
        ItemBlockState(strings(&[("half", "top"), ("waterlogged", "true")])),
        c,
    );
    assert_round_trips(
        catalog,
        "bees",
        vec![Bee {
            entity_data: pig,
            ticks_in_hive: 120,
            min_ticks_in_hive: 600,
        }],
        c,
    );
    assert_round_trips(catalog, "lock", "vault key".to_string(), c);
    assert_round_trips(
        catalog,
        "container_loot",
        SeededContainerLoot {
            loot_table: "minecraft:chests/simple_dungeon".into(),
            seed: -77,
        },
        c,
    );

    let declared: BTreeSet<String> =
        catalog.iter().map(|component| component.key().to_string()).collect();
    assert_eq!(covered, declared);
}
