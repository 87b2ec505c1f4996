//! Integer block coordinates.

use serde::{Deserialize, Serialize};

/// A block position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPosition {
    /// X coordinate (26 significant bits when packed).
    pub x: i32,
    /// Y coordinate (12 significant bits when packed).
    pub y: i32,
    /// Z coordinate (26 significant bits when packed).
    pub z: i32,
}

impl BlockPosition {
    /// Position from coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Pack into the 64-bit `x:26 | z:26 | y:12` layout.
    pub fn pack(self) -> i64 {
        ((i64::from(self.x) & 0x3FF_FFFF) << 38)
            | ((i64::from(self.z) & 0x3FF_FFFF) << 12)
            | (i64::from(self.y) & 0xFFF)
    }

    /// Unpack from the 64-bit layout, sign-extending each field.
    pub fn unpack(packed: i64) -> Self {
        Self {
            x: (packed >> 38) as i32,
            y: ((packed << 52) >> 52) as i32,
            z: ((packed << 26) >> 38) as i32,
        }
    }

    /// Coordinates as an array, the layout used in tags.
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_round_trips_negative_coordinates() {
        for pos in [
            BlockPosition::new(10, 64, -3),
            BlockPosition::new(-33_554_432, -2048, 33_554_431),
            BlockPosition::new(0, 0, 0),
        ] {
            assert_eq!(BlockPosition::unpack(pos.pack()), pos);
        }
    }

    #[test]
    fn pack_layout_places_y_in_low_bits() {
        assert_eq!(BlockPosition::new(0, 5, 0).pack(), 5);
        assert_eq!(BlockPosition::new(1, 0, 0).pack(), 1 << 38);
        assert_eq!(BlockPosition::new(0, 0, 1).pack(), 1 << 12);
    }
}
