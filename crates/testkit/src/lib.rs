#![warn(missing_docs)]
//! Deterministic fixtures for codec tests: a fixed block-state table, sample
//! item stacks, and JSON sinks for CI artifacts.

use anyhow::Result;
use mdminecraft_core::{Block, BlockStateTable, BlockStates, ItemStack, RegistryKey};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// State ids known to [`FixedBlockStates`], with their block keys.
pub const FIXED_STATES: [(i32, &str); 8] = [
    (0, "air"),
    (1, "stone"),
    (2, "granite"),
    (9, "grass_block"),
    (10, "dirt"),
    (118, "sand"),
    (2044, "glass"),
    (12_345, "redstone_wire"),
];

/// A small, fixed block-state table.
///
/// Anything outside [`FIXED_STATES`] is unknown, which is what tests for
/// invalid-state handling rely on.
#[derive(Debug, Clone)]
pub struct FixedBlockStates {
    table: BlockStateTable,
}

impl FixedBlockStates {
    /// Table holding exactly [`FIXED_STATES`].
    pub fn new() -> Self {
        let table = FIXED_STATES
            .iter()
            .map(|&(state, path)| Block::new(RegistryKey::minecraft(path), state))
            .collect();
        Self { table }
    }

    /// Block for a known state; panics on unknown ids, for test setup only.
    pub fn block(&self, state_id: i32) -> Block {
        match self.table.from_state_id(state_id) {
            Some(block) => block,
            None => panic!("state {state_id} is not a fixture state"),
        }
    }
}

impl Default for FixedBlockStates {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStates for FixedBlockStates {
    fn from_state_id(&self, state_id: i32) -> Option<Block> {
        self.table.from_state_id(state_id)
    }
}

/// Stacks covering the empty stack, single items, and full stacks.
pub fn sample_items() -> Vec<ItemStack> {
    vec![
        ItemStack::AIR,
        ItemStack::new(1, 1),
        ItemStack::new(1, 64),
        ItemStack::new(820, 1),
        ItemStack::new(1_000, 16),
    ]
}

/// One codec event captured by a test run.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Position in the run.
    pub sequence: u64,
    /// Short label, e.g. `"encode"`.
    pub kind: &'a str,
    /// Registry key the event concerns.
    pub key: &'a str,
    /// Free-form payload, usually hex bytes.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Writes a catalog listing as pretty JSON, e.g. for diffing between builds.
pub struct SnapshotSink {
    file: File,
}

impl SnapshotSink {
    /// Create a sink pointed at the supplied path, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Persist the rows.
    pub fn write<T: Serialize>(&mut self, rows: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        self.file.write_all(json.as_bytes())?;
        debug!(rows = rows.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "{name}-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn fixed_states_resolve_only_fixtures() {
        let states = FixedBlockStates::new();
        assert_eq!(states.block(118).key().path(), "sand");
        assert!(states.from_state_id(3).is_none());
        assert!(states.from_state_id(-1).is_none());
    }

    #[test]
    fn sample_items_start_with_air() {
        let items = sample_items();
        assert!(items[0].is_air());
        assert!(items[1..].iter().all(|item| !item.is_air()));
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = temp_path("events.jsonl");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for sequence in 0..2 {
            sink.write(&EventRecord {
                sequence,
                kind: "encode",
                key: "minecraft:dust",
                payload: "3f800000",
            })
            .expect("write succeeds");
        }
        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"key\":\"minecraft:dust\""));
    }

    #[test]
    fn snapshot_sink_writes_file() {
        #[derive(Serialize)]
        struct Row {
            id: i32,
            name: &'static str,
        }
        let path = temp_path("snapshots").join("rows.json");
        let mut sink = SnapshotSink::create(&path).expect("sink create");
        sink.write(&[Row {
            id: 0,
            name: "minecraft:custom_data",
        }])
        .expect("write succeeds");
        let contents = fs::read_to_string(&path).expect("file readable");
        assert!(contents.contains("custom_data"));
    }
}
