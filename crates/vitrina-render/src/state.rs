//! Interactive state local to one rendered block instance.
//!
//! All transitions are pure and synchronous; nothing here touches the
//! document.

use std::collections::HashSet;

use vitrina_types::{AccordionData, BlockId, TabsData};

/// `tabs`: exactly one tab active, the first one initially.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsState {
    ids: Vec<BlockId>,
    active: usize,
}

impl TabsState {
    pub fn new(data: &TabsData) -> Self {
        Self {
            ids: data.items.iter().map(|item| item.id.clone()).collect(),
            active: 0,
        }
    }

    /// Active tab id (`None` only for an empty tab set).
    pub fn active(&self) -> Option<&BlockId> {
        self.ids.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, id: &BlockId) -> bool {
        self.active() == Some(id)
    }

    /// Activate the tab with `id`. Unknown ids leave the state unchanged.
    pub fn select(&mut self, id: &BlockId) -> bool {
        match self.ids.iter().position(|candidate| candidate == id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// Activate by position. Out-of-range indices leave the state unchanged.
    pub fn select_index(&mut self, idx: usize) -> bool {
        if idx < self.ids.len() {
            self.active = idx;
            true
        } else {
            false
        }
    }
}

/// `accordion`: every panel toggles independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccordionState {
    ids: Vec<BlockId>,
    open: HashSet<BlockId>,
}

impl AccordionState {
    /// All panels start closed.
    pub fn new(data: &AccordionData) -> Self {
        Self {
            ids: data.items.iter().map(|item| item.id.clone()).collect(),
            open: HashSet::new(),
        }
    }

    /// Flip one panel. Returns its new open state (`false` for unknown ids).
    pub fn toggle(&mut self, id: &BlockId) -> bool {
        if !self.ids.contains(id) {
            return false;
        }
        if self.open.remove(id) {
            false
        } else {
            self.open.insert(id.clone());
            true
        }
    }

    pub fn is_open(&self, id: &BlockId) -> bool {
        self.open.contains(id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

/// Whether page scrolling is suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollLock {
    Suspended,
    Restored,
}

/// Lightbox overlays for `image`/`video` blocks, one per block instance.
///
/// Scrolling is suspended while any lightbox is open and restored when the
/// last one closes.
#[derive(Clone, Debug, Default)]
pub struct LightboxRegistry {
    open: HashSet<BlockId>,
}

impl LightboxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the lightbox of block `id`.
    pub fn open(&mut self, id: &BlockId) -> ScrollLock {
        self.open.insert(id.clone());
        self.scroll()
    }

    /// Close the lightbox of block `id` (no-op if not open).
    pub fn close(&mut self, id: &BlockId) -> ScrollLock {
        self.open.remove(id);
        self.scroll()
    }

    pub fn is_open(&self, id: &BlockId) -> bool {
        self.open.contains(id)
    }

    pub fn scroll(&self) -> ScrollLock {
        if self.open.is_empty() {
            ScrollLock::Restored
        } else {
            ScrollLock::Suspended
        }
    }
}
