//! Firework stars and rockets.

use super::MAX_ENTRIES;
use crate::types::{self, NetworkType};
use mdminecraft_core::enums::named;
use mdminecraft_core::tag::{CompoundBuilder, TagSerializer};
use mdminecraft_core::{protocol_enum, CodecError, Color, Tag};

/// Most explosions a rocket may carry.
pub const MAX_EXPLOSIONS: usize = 256;

protocol_enum! {
    /// Burst pattern of a firework explosion.
    pub enum FireworkShape("firework shape") {
        /// Small sphere.
        SmallBall => "small_ball",
        /// Large sphere.
        LargeBall => "large_ball",
        /// Star.
        Star => "star",
        /// Creeper face.
        Creeper => "creeper",
        /// Burst.
        Burst => "burst",
    }
}

/// One firework explosion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireworkExplosion {
    /// Burst pattern.
    pub shape: FireworkShape,
    /// Initial colors.
    pub colors: Vec<Color>,
    /// Colors faded to.
    pub fade_colors: Vec<Color>,
    /// Leaves a trail.
    pub has_trail: bool,
    /// Crackles after bursting.
    pub has_twinkle: bool,
}

fn color_list() -> NetworkType<Vec<Color>> {
    types::int()
        .list(MAX_ENTRIES)
        .map(|rgb| rgb.into_iter().map(Color::from_rgb).collect(), |colors: &Vec<Color>| {
            colors.iter().map(|color| color.as_rgb()).collect()
        })
}

fn color_array() -> TagSerializer<Vec<Color>> {
    TagSerializer::new(
        |tag| Ok(tag.as_int_array()?.iter().copied().map(Color::from_rgb).collect()),
        |colors: &Vec<Color>| Tag::IntArray(colors.iter().map(|color| color.as_rgb()).collect()),
    )
}

impl FireworkExplosion {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let colors = color_list();
        let colors_out = colors.clone();
        NetworkType::new(
            move |buf| {
                Ok(FireworkExplosion {
                    shape: buf.read_enum()?,
                    colors: colors.read(buf)?,
                    fade_colors: colors.read(buf)?,
                    has_trail: buf.read_bool()?,
                    has_twinkle: buf.read_bool()?,
                })
            },
            move |buf, explosion: &FireworkExplosion| {
                buf.write_enum(explosion.shape);
                colors_out.write(buf, &explosion.colors)?;
                colors_out.write(buf, &explosion.fade_colors)?;
                buf.write_bool(explosion.has_trail);
                buf.write_bool(explosion.has_twinkle);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        TagSerializer::new(
            |tag| {
                let fields = tag.reader()?;
                Ok(FireworkExplosion {
                    shape: fields.read("shape", &named())?,
                    colors: fields.read_or("colors", &color_array(), Vec::new())?,
                    fade_colors: fields.read_or("fade_colors", &color_array(), Vec::new())?,
                    has_trail: fields.bool_or("has_trail", false)?,
                    has_twinkle: fields.bool_or("has_twinkle", false)?,
                })
            },
            |explosion: &FireworkExplosion| {
                CompoundBuilder::new()
                    .put("shape", named().write(&explosion.shape))
                    .put("colors", color_array().write(&explosion.colors))
                    .put("fade_colors", color_array().write(&explosion.fade_colors))
                    .put("has_trail", explosion.has_trail)
                    .put("has_twinkle", explosion.has_twinkle)
                    .build()
            },
        )
    }
}

/// Flight and payload of a firework rocket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireworkList {
    /// Flight duration in gunpowder units.
    pub flight_duration: i32,
    /// Explosions on detonation.
    pub explosions: Vec<FireworkExplosion>,
}

impl FireworkList {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let explosions = FireworkExplosion::network_type().list(MAX_EXPLOSIONS);
        let explosions_out = explosions.clone();
        NetworkType::new(
            move |buf| {
                Ok(FireworkList {
                    flight_duration: buf.read_var_int()?,
                    explosions: explosions.read(buf)?,
                })
            },
            move |buf, rocket: &FireworkList| {
                buf.write_var_int(rocket.flight_duration);
                explosions_out.write(buf, &rocket.explosions)
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let explosions = FireworkExplosion::tag_serializer().list();
        let explosions_out = explosions.clone();
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                let explosions = fields.read_or("explosions", &explosions, Vec::new())?;
                if explosions.len() > MAX_EXPLOSIONS {
                    return Err(CodecError::ListTooLong {
                        len: explosions.len(),
                        max: MAX_EXPLOSIONS,
                    });
                }
                Ok(FireworkList {
                    flight_duration: fields.int_or("flight_duration", 0)?,
                    explosions,
                })
            },
            move |rocket: &FireworkList| {
                CompoundBuilder::new()
                    .put("flight_duration", rocket.flight_duration as i8)
                    .put("explosions", explosions_out.write(&rocket.explosions))
                    .build()
            },
        )
    }
}
