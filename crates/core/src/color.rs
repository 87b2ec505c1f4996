//! RGB colors and the sixteen dye colors.

use crate::error::{CodecError, CodecResult};
use crate::protocol_enum;
use crate::tag::{self, TagSerializer};
use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);

    /// Color from channel bytes.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Color from integer channels, rejecting anything outside `0..=255`.
    pub fn try_new(red: i32, green: i32, blue: i32) -> CodecResult<Self> {
        let channel = |value: i32| u8::try_from(value).map_err(|_| CodecError::InvalidColor(value));
        Ok(Self::new(channel(red)?, channel(green)?, channel(blue)?))
    }

    /// Color from a packed `0xRRGGBB` integer; higher bits are ignored.
    pub const fn from_rgb(rgb: i32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Packed `0xRRGGBB` integer.
    pub const fn as_rgb(self) -> i32 {
        ((self.red as i32) << 16) | ((self.green as i32) << 8) | self.blue as i32
    }
}

/// Tag serializer storing a color as its packed int.
pub fn rgb_tag() -> TagSerializer<Color> {
    tag::int().map(Color::from_rgb, |color: &Color| color.as_rgb())
}

protocol_enum! {
    /// Dye colors in protocol order.
    pub enum DyeColor("dye color") {
        /// White dye.
        White => "white",
        /// Orange dye.
        Orange => "orange",
        /// Magenta dye.
        Magenta => "magenta",
        /// Light blue dye.
        LightBlue => "light_blue",
        /// Yellow dye.
        Yellow => "yellow",
        /// Lime dye.
        Lime => "lime",
        /// Pink dye.
        Pink => "pink",
        /// Gray dye.
        Gray => "gray",
        /// Light gray dye.
        LightGray => "light_gray",
        /// Cyan dye.
        Cyan => "cyan",
        /// Purple dye.
        Purple => "purple",
        /// Blue dye.
        Blue => "blue",
        /// Brown dye.
        Brown => "brown",
        /// Green dye.
        Green => "green",
        /// Red dye.
        Red => "red",
        /// Black dye.
        Black => "black",
    }
}
