//! Reference resolution for card and grid blocks.
//!
//! `program-card` / `blog-card` resolve one foreign id; the grids resolve a
//! list and keep the *requested* order, silently dropping ids that do not
//! resolve. Each block instance resolves inside its own [`ReferenceSlot`]:
//! `Loading` until the lookup completes, then terminal `Resolved` or
//! `Empty`. Unmounting cancels the slot; a late completion is ignored.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vitrina_types::{BlockData, BlockId};

/// What a foreign id points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Program,
    Blog,
}

/// A resolved foreign record, as shown on a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The lookup a referential block needs: record kind and requested ids
/// (blank ids removed). `None` for non-referential blocks.
pub fn reference_request(data: &BlockData) -> Option<(RecordKind, Vec<String>)> {
    let (kind, ids): (RecordKind, Vec<&String>) = match data {
        BlockData::ProgramCard(d) => (RecordKind::Program, vec![&d.program_id]),
        BlockData::ProgramsGrid(d) => (RecordKind::Program, d.program_ids.iter().collect()),
        BlockData::BlogCard(d) => (RecordKind::Blog, vec![&d.blog_id]),
        BlockData::BlogsGrid(d) => (RecordKind::Blog, d.blog_ids.iter().collect()),
        _ => return None,
    };
    let ids = ids
        .into_iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    Some((kind, ids))
}

/// Re-order fetched records to the requested id order, dropping misses.
pub fn order_by_request(ids: &[String], fetched: Vec<Record>) -> Vec<Record> {
    let by_id: HashMap<String, Record> = fetched
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();
    ids.iter()
        .filter_map(|id| {
            let found = by_id.get(id).cloned();
            if found.is_none() {
                debug!(id = %id, "reference did not resolve, dropping");
            }
            found
        })
        .collect()
}

/// Looks up foreign records.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Resolve one id.
    async fn resolve(&self, kind: RecordKind, id: &str) -> Option<Record>;

    /// Bulk fetch; result order is unspecified and misses are omitted.
    async fn fetch(&self, kind: RecordKind, ids: &[String]) -> Vec<Record> {
        join_all(ids.iter().map(|id| self.resolve(kind, id)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Resolve a list in requested order, silently dropping misses.
    async fn resolve_many(&self, kind: RecordKind, ids: &[String]) -> Vec<Record> {
        let fetched = self.fetch(kind, ids).await;
        order_by_request(ids, fetched)
    }
}

/// In-memory resolver (CLI fixtures and tests).
///
/// `fetch` returns records in insertion order, like a database `IN (...)`
/// query would, so grids exercise the re-ordering path.
#[derive(Clone, Debug, Default)]
pub struct InMemoryResolver {
    records: Vec<(RecordKind, Record)>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RecordKind, record: Record) {
        self.records.retain(|(k, r)| !(*k == kind && r.id == record.id));
        self.records.push((kind, record));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, kind: RecordKind, record: Record) -> Self {
        self.insert(kind, record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryResolver {
    async fn resolve(&self, kind: RecordKind, id: &str) -> Option<Record> {
        self.records
            .iter()
            .find(|(k, r)| *k == kind && r.id == id)
            .map(|(_, r)| r.clone())
    }

    async fn fetch(&self, kind: RecordKind, ids: &[String]) -> Vec<Record> {
        self.records
            .iter()
            .filter(|(k, r)| *k == kind && ids.contains(&r.id))
            .map(|(_, r)| r.clone())
            .collect()
    }
}

// ============================================================================
// Per-instance slot
// ============================================================================

/// Resolution state of one block instance.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotState {
    Loading,
    Resolved(Vec<Record>),
    /// Nothing resolved (or nothing requested).
    Empty,
}

impl SlotState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SlotState::Loading)
    }
}

/// Reference resolution bound to a mounted block instance.
#[derive(Debug)]
pub struct ReferenceSlot {
    block_id: BlockId,
    token: CancellationToken,
    state: SlotState,
}

impl ReferenceSlot {
    pub fn new(block_id: BlockId) -> Self {
        Self {
            block_id,
            token: CancellationToken::new(),
            state: SlotState::Loading,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn into_state(self) -> SlotState {
        self.state
    }

    /// Token that unmounts this slot when cancelled.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// The block instance went away.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Apply a finished lookup. Ignored after unmount or once terminal.
    pub fn complete(&mut self, records: Vec<Record>) -> bool {
        if !self.is_mounted() {
            debug!(block_id = %self.block_id, "stale resolution after unmount, ignoring");
            return false;
        }
        if self.state.is_terminal() {
            return false;
        }
        self.state = if records.is_empty() {
            warn!(block_id = %self.block_id, "no references resolved");
            SlotState::Empty
        } else {
            SlotState::Resolved(records)
        };
        true
    }

    /// Run the lookup unless the slot is unmounted first.
    pub async fn resolve(
        &mut self,
        resolver: &dyn ReferenceResolver,
        kind: RecordKind,
        ids: &[String],
    ) -> &SlotState {
        if ids.is_empty() {
            self.complete(Vec::new());
            return &self.state;
        }
        let token = self.token.clone();
        tokio::select! {
            records = resolver.resolve_many(kind, ids) => {
                self.complete(records);
            }
            _ = token.cancelled() => {
                debug!(block_id = %self.block_id, "slot unmounted during resolution");
            }
        }
        &self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
