//! Item stacks as seen by component and particle codecs.
//!
//! Full item-stack marshaling (component patches included) is owned by the
//! inventory layer; codecs here only carry the item id and the count.

use crate::tag::{CompoundBuilder, TagSerializer};
use serde::{Deserialize, Serialize};

/// An item id with a stack size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Protocol id of the item.
    pub id: i32,
    /// Number of items; zero or less is the empty stack.
    pub count: i32,
}

impl ItemStack {
    /// The empty stack.
    pub const AIR: Self = Self { id: 0, count: 0 };

    /// Stack of `count` items. A zero id or a count of zero or less is
    /// [`ItemStack::AIR`], so every empty stack compares equal.
    pub const fn new(id: i32, count: i32) -> Self {
        if id == 0 || count <= 0 {
            return Self::AIR;
        }
        Self { id, count }
    }

    /// Returns true for the empty stack.
    pub fn is_air(&self) -> bool {
        self.count <= 0 || self.id == 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::AIR
    }
}

/// Tag serializer for item stacks: `{id, count}` with count defaulting to one.
pub fn item_tag() -> TagSerializer<ItemStack> {
    TagSerializer::new(
        |tag| {
            let fields = tag.reader()?;
            Ok(ItemStack::new(fields.int("id")?, fields.int_or("count", 1)?))
        },
        |stack: &ItemStack| {
            CompoundBuilder::new()
                .put("id", stack.id)
                .put("count", stack.count)
                .build()
        },
    )
}
