//! Per-process input blocks.
//!
//! A process sheet is split into numbered input blocks. Each block keeps a
//! yield count, the material in use and an unsaved maintenance draft. The
//! list is stored as one JSON array per (process, shift) and grows on demand
//! when a block beyond its end is addressed, up to [`MAX_BLOCKS`].

use crate::db::store::{read_json, write_json, KeyValueStore, StoreKey};
use crate::libs::error::EntryError;
use crate::libs::shift::{ProcessId, Shift};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Unsaved maintenance input kept with its block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEntry {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub description: String,
}

/// Blocks a process sheet may hold.
pub const MAX_BLOCKS: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockState {
    #[serde(default, rename = "yield", skip_serializing_if = "Option::is_none")]
    pub yield_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftEntry>,
}

pub struct Blocks<S> {
    store: S,
}

impl<S: KeyValueStore> Blocks<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&self, process: &ProcessId, shift: Shift) -> Result<Vec<BlockState>> {
        Ok(read_json(&self.store, &StoreKey::blocks(process.clone(), shift))?.unwrap_or_default())
    }

    pub fn set_yield(&self, process: &ProcessId, shift: Shift, block: usize, count: u32) -> Result<Vec<BlockState>> {
        self.update(process, shift, block, |state| state.yield_count = Some(count))
    }

    /// Sets the material; a blank value clears it.
    pub fn set_material(&self, process: &ProcessId, shift: Shift, block: usize, material: &str) -> Result<Vec<BlockState>> {
        let material = material.trim();
        self.update(process, shift, block, |state| {
            state.material = (!material.is_empty()).then(|| material.to_string())
        })
    }

    /// Stores a draft; an all-blank draft clears it.
    pub fn save_draft(&self, process: &ProcessId, shift: Shift, block: usize, draft: DraftEntry) -> Result<Vec<BlockState>> {
        let blank = draft.start.trim().is_empty() && draft.end.trim().is_empty() && draft.description.trim().is_empty();
        self.update(process, shift, block, |state| state.draft = (!blank).then_some(draft))
    }

    fn update<F>(&self, process: &ProcessId, shift: Shift, block: usize, apply: F) -> Result<Vec<BlockState>>
    where
        F: FnOnce(&mut BlockState),
    {
        if block >= MAX_BLOCKS {
            return Err(EntryError::BlockOutOfRange { index: block, max: MAX_BLOCKS - 1 }.into());
        }
        let key = StoreKey::blocks(process.clone(), shift);
        let mut blocks: Vec<BlockState> = read_json(&self.store, &key)?.unwrap_or_default();
        if blocks.len() <= block {
            blocks.resize_with(block + 1, BlockState::default);
        }
        apply(&mut blocks[block]);
        write_json(&self.store, &key, &blocks)?;
        tracing::debug!(key = %key, block, "updated block");
        Ok(blocks)
    }
}
