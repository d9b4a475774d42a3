//! Generic id tree walk over blocks and their nested id-bearing lists.
//!
//! One walk, two policies:
//!
//! - [`refresh_ids`]: mint a brand-new id everywhere (clipboard paste,
//!   template instantiation). Source ids are never reused.
//! - [`fill_missing_ids`]: mint only where no id is present (import commit);
//!   existing ids are preserved verbatim.
//!
//! [`fill_missing_ids_json`] applies the import policy to raw JSON before it
//! is decoded, driven by [`BlockKind::nested_id_fields`].

use serde_json::Value;

use crate::{Block, BlockId, BlockKind};

/// Where an id lives in the block tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdSlot {
    /// Index of the owning top-level block.
    pub block: usize,
    /// Index within the nested list, `None` for the block id itself.
    pub item: Option<usize>,
}

impl IdSlot {
    /// Dotted position (`"3"` or `"3.1"`) for positional minting.
    pub fn position(&self) -> String {
        match self.item {
            Some(item) => format!("{}.{}", self.block, item),
            None => self.block.to_string(),
        }
    }
}

/// Visit every block id and every nested item id, in document order.
pub fn for_each_id_mut(blocks: &mut [Block], mut f: impl FnMut(IdSlot, &mut BlockId)) {
    for (block_idx, block) in blocks.iter_mut().enumerate() {
        f(
            IdSlot {
                block: block_idx,
                item: None,
            },
            &mut block.id,
        );
        for (item_idx, id) in block.data.nested_ids_mut().into_iter().enumerate() {
            f(
                IdSlot {
                    block: block_idx,
                    item: Some(item_idx),
                },
                id,
            );
        }
    }
}

/// Every id (blocks and nested items) in document order.
pub fn collect_ids(blocks: &[Block]) -> Vec<BlockId> {
    let mut ids = Vec::new();
    for block in blocks {
        ids.push(block.id.clone());
        ids.extend(block.data.nested_ids().into_iter().cloned());
    }
    ids
}

/// Replace every id with a freshly minted one. Returns the number of ids minted.
pub fn refresh_ids(blocks: &mut [Block]) -> usize {
    let mut minted = 0;
    for_each_id_mut(blocks, |_, id| {
        *id = BlockId::mint();
        minted += 1;
    });
    minted
}

/// Mint positional ids where none are present. Returns the number minted.
pub fn fill_missing_ids(blocks: &mut [Block]) -> usize {
    let mut minted = 0;
    for_each_id_mut(blocks, |slot, id| {
        if id.is_empty() {
            *id = BlockId::mint_positional(&slot.position());
            minted += 1;
        }
    });
    minted
}

fn needs_id(obj: &serde_json::Map<String, Value>) -> bool {
    match obj.get("id") {
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(_)) => false,
        _ => true,
    }
}

/// Import policy on raw JSON: `blocks` must be the `bloques` array.
///
/// Non-object entries are skipped (validation reports them). Numeric ids
/// are kept, rewritten as strings.
pub fn fill_missing_ids_json(blocks: &mut Value) -> usize {
    let Some(array) = blocks.as_array_mut() else {
        return 0;
    };
    let mut minted = 0;
    for (block_idx, block) in array.iter_mut().enumerate() {
        let Some(obj) = block.as_object_mut() else {
            continue;
        };
        if needs_id(obj) {
            obj.insert(
                "id".into(),
                Value::String(BlockId::mint_positional(&block_idx.to_string()).to_string()),
            );
            minted += 1;
        } else if let Some(Value::Number(n)) = obj.get("id") {
            let id = n.to_string();
            obj.insert("id".into(), Value::String(id));
        }

        let Some(kind) = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(BlockKind::from_str)
        else {
            continue;
        };
        let Some(data) = obj.get_mut("data").and_then(Value::as_object_mut) else {
            continue;
        };
        for field in kind.nested_id_fields() {
            let Some(items) = data.get_mut(*field).and_then(Value::as_array_mut) else {
                continue;
            };
            for (item_idx, item) in items.iter_mut().enumerate() {
                let Some(item) = item.as_object_mut() else {
                    continue;
                };
                if needs_id(item) {
                    let slot = IdSlot {
                        block: block_idx,
                        item: Some(item_idx),
                    };
                    item.insert(
                        "id".into(),
                        Value::String(BlockId::mint_positional(&slot.position()).to_string()),
                    );
                    minted += 1;
                } else if let Some(Value::Number(n)) = item.get("id") {
                    let id = n.to_string();
                    item.insert("id".into(), Value::String(id));
                }
            }
        }
    }
    minted
}

// ============================================================================
// Tests
// ============================================================================
