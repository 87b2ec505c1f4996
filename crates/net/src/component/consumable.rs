//! Food, potions, and the status effects they carry.

use super::MAX_ENTRIES;
use crate::buffer::NetworkBuffer;
use crate::nbt::MAX_DEPTH;
use crate::types::{self, NetworkType};
use mdminecraft_core::color::rgb_tag;
use mdminecraft_core::tag::{self, CompoundBuilder, TagSerializer};
use mdminecraft_core::{CodecError, CodecResult, Color, Tag};

/// Parameters of an effect; may chain a weaker effect hidden beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectDetails {
    /// Level minus one.
    pub amplifier: i32,
    /// Remaining ticks; -1 for infinite.
    pub duration: i32,
    /// Beacon-style ambient effect.
    pub ambient: bool,
    /// Whether particles are emitted.
    pub show_particles: bool,
    /// Whether the HUD icon is shown.
    pub show_icon: bool,
    /// Effect restored when this one expires.
    pub hidden_effect: Option<Box<EffectDetails>>,
}

impl Default for EffectDetails {
    fn default() -> Self {
        Self {
            amplifier: 0,
            duration: 0,
            ambient: false,
            show_particles: true,
            show_icon: true,
            hidden_effect: None,
        }
    }
}

impl EffectDetails {
    fn read(buf: &mut NetworkBuffer, depth: usize) -> CodecResult<Self> {
        let amplifier = buf.read_var_int()?;
        let duration = buf.read_var_int()?;
        let ambient = buf.read_bool()?;
        let show_particles = buf.read_bool()?;
        let show_icon = buf.read_bool()?;
        let hidden_effect = if buf.read_bool()? {
            if depth >= MAX_DEPTH {
                return Err(CodecError::NestingTooDeep(MAX_DEPTH));
            }
            Some(Box::new(Self::read(buf, depth + 1)?))
        } else {
            None
        };
        Ok(Self {
            amplifier,
            duration,
            ambient,
            show_particles,
            show_icon,
            hidden_effect,
        })
    }

    fn write(&self, buf: &mut NetworkBuffer) {
        buf.write_var_int(self.amplifier);
        buf.write_var_int(self.duration);
        buf.write_bool(self.ambient);
        buf.write_bool(self.show_particles);
        buf.write_bool(self.show_icon);
        buf.write_bool(self.hidden_effect.is_some());
        if let Some(hidden) = &self.hidden_effect {
            hidden.write(buf);
        }
    }

    fn from_tag(tag: &Tag) -> CodecResult<Self> {
        let fields = tag.reader()?;
        let show_particles = fields.bool_or("show_particles", true)?;
        Ok(Self {
            amplifier: fields.int_or("amplifier", 0)?,
            duration: fields.int_or("duration", 0)?,
            ambient: fields.bool_or("ambient", false)?,
            show_particles,
            show_icon: fields.bool_or("show_icon", show_particles)?,
            hidden_effect: fields
                .optional("hidden_effect")
                .map(|hidden| Self::from_tag(hidden).map(Box::new))
                .transpose()?,
        })
    }

    fn to_builder(&self) -> CompoundBuilder {
        CompoundBuilder::new()
            .put("amplifier", self.amplifier)
            .put("duration", self.duration)
            .put("ambient", self.ambient)
            .put("show_particles", self.show_particles)
            .put("show_icon", self.show_icon)
            .put_opt(
                "hidden_effect",
                self.hidden_effect.as_ref().map(|hidden| hidden.to_builder().build()),
            )
    }
}

/// A status effect applied to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInstance {
    /// Effect id.
    pub effect: i32,
    /// Strength and display flags.
    pub details: EffectDetails,
}

impl EffectInstance {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(EffectInstance {
                    effect: buf.read_var_int()?,
                    details: EffectDetails::read(buf, 0)?,
                })
            },
            |buf, instance: &EffectInstance| {
                buf.write_var_int(instance.effect);
                instance.details.write(buf);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                Ok(EffectInstance {
                    effect: tag.reader()?.int("id")?,
                    details: EffectDetails::from_tag(tag)?,
                })
            },
            |instance: &EffectInstance| {
                instance.details.to_builder().put("id", instance.effect).build()
            },
        )
    }
}

/// An effect a food may apply, with its chance.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodEffect {
    /// Applied effect.
    pub effect: EffectInstance,
    /// Chance in `0.0..=1.0`.
    pub probability: f32,
}

/// Makes an item edible.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    /// Hunger restored.
    pub nutrition: i32,
    /// Saturation restored.
    pub saturation: f32,
    /// Edible with a full hunger bar.
    pub can_always_eat: bool,
    /// Eating time.
    pub eat_seconds: f32,
    /// Effects rolled on eating.
    pub effects: Vec<FoodEffect>,
}

impl Food {
    /// Default eating time.
    pub const DEFAULT_EAT_SECONDS: f32 = 1.6;

    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let effect = EffectInstance::network_type();
        let effects = NetworkType::new(
            move |buf| {
                Ok(FoodEffect {
                    effect: effect.read(buf)?,
                    probability: buf.read_float()?,
                })
            },
            |buf, food_effect: &FoodEffect| {
                EffectInstance::network_type().write(buf, &food_effect.effect)?;
                buf.write_float(food_effect.probability);
                Ok(())
            },
        )
        .list(MAX_ENTRIES);
        let effects_out = effects.clone();
        NetworkType::new(
            move |buf| {
                Ok(Food {
                    nutrition: buf.read_var_int()?,
                    saturation: buf.read_float()?,
                    can_always_eat: buf.read_bool()?,
                    eat_seconds: buf.read_float()?,
                    effects: effects.read(buf)?,
                })
            },
            move |buf, food: &Food| {
                buf.write_var_int(food.nutrition);
                buf.write_float(food.saturation);
                buf.write_bool(food.can_always_eat);
                buf.write_float(food.eat_seconds);
                effects_out.write(buf, &food.effects)
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let effects = TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(FoodEffect {
                    effect: fields.read("effect", &EffectInstance::tag_serializer())?,
                    probability: fields.float_or("probability", 1.0)?,
                })
            },
            |food_effect: &FoodEffect| {
                CompoundBuilder::new()
                    .put("effect", EffectInstance::tag_serializer().write(&food_effect.effect))
                    .put("probability", food_effect.probability)
                    .build()
            },
        )
        .list();
        let effects_out = effects.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                Ok(Food {
                    nutrition: fields.int("nutrition")?,
                    saturation: fields.float_or("saturation", 0.0)?,
                    can_always_eat: fields.bool_or("can_always_eat", false)?,
                    eat_seconds: fields.float_or("eat_seconds", Self::DEFAULT_EAT_SECONDS)?,
                    effects: fields.read_or("effects", &effects, Vec::new())?,
                })
            },
            move |food: &Food| {
                CompoundBuilder::new()
                    .put("nutrition", food.nutrition)
                    .put("saturation", food.saturation)
                    .put("can_always_eat", food.can_always_eat)
                    .put("eat_seconds", food.eat_seconds)
                    .put("effects", effects_out.write(&food.effects))
                    .build()
            },
        )
    }
}

/// Potion, tint, and extra effects of a potion-like item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PotionContents {
    /// Base potion id.
    pub potion: Option<i32>,
    /// Tint overriding the effect-derived color.
    pub custom_color: Option<Color>,
    /// Effects on top of the base potion.
    pub custom_effects: Vec<EffectInstance>,
}

impl PotionContents {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let potion = types::var_int().optional();
        let color = types::color().optional();
        let effects = EffectInstance::network_type().list(MAX_ENTRIES);
        let (potion_out, color_out, effects_out) = (potion.clone(), color.clone(), effects.clone());
        NetworkType::new(
            move |buf| {
                Ok(PotionContents {
                    potion: potion.read(buf)?,
                    custom_color: color.read(buf)?,
                    custom_effects: effects.read(buf)?,
                })
            },
            move |buf, contents: &PotionContents| {
                potion_out.write(buf, &contents.potion)?;
                color_out.write(buf, &contents.custom_color)?;
                effects_out.write(buf, &contents.custom_effects)
            },
        )
    }

    /// Tag codec; a bare int is read as the base potion.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let effects = EffectInstance::tag_serializer().list();
        let effects_out = effects.clone();
        TagSerializer::new(
            move |tag| {
                if let Tag::Int(potion) = tag {
                    return Ok(PotionContents {
                        potion: Some(*potion),
                        ..PotionContents::default()
                    });
                }
                let fields = tag.reader()?;
                Ok(PotionContents {
                    potion: fields.read_opt("potion", &tag::int())?,
                    custom_color: fields.read_opt("custom_color", &rgb_tag())?,
                    custom_effects: fields.read_or("custom_effects", &effects, Vec::new())?,
                })
            },
            move |contents: &PotionContents| {
                CompoundBuilder::new()
                    .put_opt("potion", contents.potion)
                    .put_opt("custom_color", contents.custom_color.map(Color::as_rgb))
                    .put("custom_effects", effects_out.write(&contents.custom_effects))
                    .build()
            },
        )
    }
}

/// One effect of a suspicious stew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StewEffect {
    /// Effect id.
    pub effect: i32,
    /// Duration in ticks.
    pub duration: i32,
}

impl StewEffect {
    /// Duration used when a stored entry omits it.
    pub const DEFAULT_DURATION: i32 = 160;
}

/// Effects granted by a suspicious stew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspiciousStewEffects(pub Vec<StewEffect>);

impl SuspiciousStewEffects {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        NetworkType::new(
            |buf| {
                Ok(StewEffect {
                    effect: buf.read_var_int()?,
                    duration: buf.read_var_int()?,
                })
            },
            |buf, effect: &StewEffect| {
                buf.write_var_int(effect.effect);
                buf.write_var_int(effect.duration);
                Ok(())
            },
        )
        .list(MAX_ENTRIES)
        .map(SuspiciousStewEffects, |stew: &SuspiciousStewEffects| stew.0.clone())
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(StewEffect {
                    effect: fields.int("id")?,
                    duration: fields.int_or("duration", StewEffect::DEFAULT_DURATION)?,
                })
            },
            |effect: &StewEffect| {
                CompoundBuilder::new()
                    .put("id", effect.effect)
                    .put("duration", effect.duration)
                    .build()
            },
        )
        .list()
        .map(SuspiciousStewEffects, |stew: &SuspiciousStewEffects| stew.0.clone())
    }
}
