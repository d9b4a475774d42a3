//! Single-slot block clipboard.
//!
//! A copy or cut overwrites whatever the slot held. The slot lives behind a
//! [`ClipboardBackend`], so it survives navigation (and, with
//! [`FileClipboard`], process restarts).
//!
//! Every paste mints a brand-new id for each block and each nested item.
//! The ids captured at copy time are never handed out again, however many
//! times the same payload is pasted. The payload's age is informational
//! only: nothing expires.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vitrina_types::{Block, BlockId, Document, SchemaError, now_millis, walk};

use crate::error::{KernelError, Result};

/// How the payload got into the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipSource {
    Cut,
    Copy,
}

/// Contents of the slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipboardPayload {
    /// Blocks as captured, original ids included.
    pub blocks: Vec<Block>,
    /// Unix milliseconds at capture.
    pub timestamp: u64,
    pub source: ClipSource,
}

impl ClipboardPayload {
    pub fn new(blocks: Vec<Block>, source: ClipSource) -> Self {
        Self {
            blocks,
            timestamp: now_millis(),
            source,
        }
    }

    /// Time since capture, relative to `now` (Unix ms).
    pub fn age_at(&self, now: u64) -> Duration {
        Duration::from_millis(now.saturating_sub(self.timestamp))
    }
}

// ============================================================================
// Backends
// ============================================================================

/// Storage for the single clipboard slot.
pub trait ClipboardBackend: Send + Sync {
    /// Current payload, `None` when the slot is empty.
    fn get(&self) -> Result<Option<ClipboardPayload>>;

    /// Overwrite the slot.
    fn set(&self, payload: &ClipboardPayload) -> Result<()>;

    /// Empty the slot.
    fn clear(&self) -> Result<()>;
}

/// Process-local slot.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    slot: Mutex<Option<ClipboardPayload>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn get(&self) -> Result<Option<ClipboardPayload>> {
        Ok(self.slot.lock().clone())
    }

    fn set(&self, payload: &ClipboardPayload) -> Result<()> {
        *self.slot.lock() = Some(payload.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.lock().take();
        Ok(())
    }
}

/// Slot persisted as a JSON file.
///
/// Writes go to a sibling temp file and are renamed into place. A slot file
/// that no longer parses reads as empty.
#[derive(Clone, Debug)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ClipboardBackend for FileClipboard {
    fn get(&self) -> Result<Option<ClipboardPayload>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable clipboard slot, treating as empty");
                Ok(None)
            }
        }
    }

    fn set(&self, payload: &ClipboardPayload) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, serde_json::to_vec(payload)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "clipboard slot written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Copy / cut / paste over an injected backend.
pub struct ClipboardStore<B: ClipboardBackend> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Put `blocks` in the slot. Returns the number of blocks held.
    pub fn copy(&self, blocks: &[Block]) -> Result<usize> {
        self.put(blocks.to_vec(), ClipSource::Copy)
    }

    /// Copy the blocks with the given ids, in document order.
    pub fn copy_from(&self, document: &Document, ids: &[BlockId]) -> Result<usize> {
        let blocks = select(document, ids)?;
        self.put(blocks, ClipSource::Copy)
    }

    /// Put the blocks with the given ids in the slot and remove them from
    /// `document`. Repeated ids count once. Neither the slot nor the
    /// document changes if any id is missing or the slot write fails.
    pub fn cut(&self, document: &mut Document, ids: &[BlockId]) -> Result<usize> {
        let blocks = select(document, ids)?;
        let mut remaining = document.clone();
        for block in &blocks {
            remaining.remove(&block.id)?;
        }
        let count = self.put(blocks, ClipSource::Cut)?;
        *document = remaining;
        Ok(count)
    }

    /// A fresh copy of the held blocks, with new ids at every level.
    pub fn paste(&self) -> Result<Vec<Block>> {
        let payload = self.backend.get()?.ok_or(KernelError::EmptyClipboard)?;
        let mut blocks = payload.blocks;
        let minted = walk::refresh_ids(&mut blocks);
        info!(blocks = blocks.len(), minted, "clipboard paste");
        Ok(blocks)
    }

    /// Paste into `document` at `pos`. Returns the new block ids.
    pub fn paste_into(&self, document: &mut Document, pos: usize) -> Result<Vec<BlockId>> {
        let blocks = self.paste()?;
        let ids = blocks.iter().map(|b| b.id.clone()).collect();
        document.insert_many(pos, blocks)?;
        Ok(ids)
    }

    /// Current payload without minting anything.
    pub fn peek(&self) -> Result<Option<ClipboardPayload>> {
        self.backend.get()
    }

    pub fn clear(&self) -> Result<()> {
        self.backend.clear()?;
        info!("clipboard cleared");
        Ok(())
    }

    /// Age of the held payload, `None` when empty.
    pub fn age(&self) -> Result<Option<Duration>> {
        Ok(self.peek()?.map(|p| p.age_at(now_millis())))
    }

    /// Human-readable age ("just now", "5 minutes ago"), `None` when empty.
    pub fn describe_age(&self) -> Result<Option<String>> {
        Ok(self.age()?.map(describe_duration))
    }

    fn put(&self, blocks: Vec<Block>, source: ClipSource) -> Result<usize> {
        let count = blocks.len();
        self.backend.set(&ClipboardPayload::new(blocks, source))?;
        info!(blocks = count, source = ?source, "clipboard set");
        Ok(count)
    }
}

fn select(document: &Document, ids: &[BlockId]) -> Result<Vec<Block>> {
    let mut positions = Vec::with_capacity(ids.len());
    for id in ids {
        let pos = document
            .position(id)
            .ok_or_else(|| SchemaError::BlockNotFound(id.clone()))?;
        positions.push(pos);
    }
    positions.sort_unstable();
    positions.dedup();
    Ok(positions
        .into_iter()
        .map(|pos| document.blocks()[pos].clone())
        .collect())
}

/// Coarse relative time.
pub fn describe_duration(age: Duration) -> String {
    let secs = age.as_secs();
    let (n, unit) = match secs {
        0..60 => return "just now".to_string(),
        60..3600 => (secs / 60, "minute"),
        3600..86_400 => (secs / 3600, "hour"),
        _ => (secs / 86_400, "day"),
    };
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

// ============================================================================
// Tests
// ============================================================================
