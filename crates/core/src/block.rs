//! Block-state references.
//!
//! The block-state registry itself is owned elsewhere; codecs only need to turn
//! a state id into a [`Block`] and back, which is what [`BlockStates`] exposes.

use crate::RegistryKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resolved block state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    key: RegistryKey,
    state_id: i32,
}

impl Block {
    /// Block state with its registry key.
    pub fn new(key: RegistryKey, state_id: i32) -> Self {
        Self { key, state_id }
    }

    /// `minecraft:air`, state 0.
    pub fn air() -> Self {
        Self::new(RegistryKey::minecraft("air"), 0)
    }

    /// `minecraft:stone`, state 1.
    pub fn stone() -> Self {
        Self::new(RegistryKey::minecraft("stone"), 1)
    }

    /// Block key.
    pub fn key(&self) -> &RegistryKey {
        &self.key
    }

    /// Protocol state id.
    pub fn state_id(&self) -> i32 {
        self.state_id
    }
}

/// Resolves protocol state ids.
pub trait BlockStates: Send + Sync {
    /// Block for `state_id`, or `None` if no such state exists.
    fn from_state_id(&self, state_id: i32) -> Option<Block>;
}

/// In-memory [`BlockStates`] backed by a map.
#[derive(Debug, Clone, Default)]
pub struct BlockStateTable {
    states: HashMap<i32, Block>,
}

impl BlockStateTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a state.
    pub fn insert(&mut self, block: Block) {
        self.states.insert(block.state_id(), block);
    }

    /// Number of known states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no states are known.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<Block> for BlockStateTable {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        let mut table = Self::new();
        for block in iter {
            table.insert(block);
        }
        table
    }
}

impl BlockStates for BlockStateTable {
    fn from_state_id(&self, state_id: i32) -> Option<Block> {
        self.states.get(&state_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_resolves_known_states_only() {
        let table: BlockStateTable = [Block::air(), Block::stone()].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.from_state_id(1), Some(Block::stone()));
        assert_eq!(table.from_state_id(2), None);
        assert_eq!(table.from_state_id(-1), None);
    }
}
