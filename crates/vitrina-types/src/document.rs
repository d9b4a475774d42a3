//! Documents: ordered block sequences plus their metadata header.
//!
//! Order is render order and is semantically meaningful. All mutations are
//! whole-block: insert, replace (id kept, payload swapped), remove, move.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Block, BlockId, Result, SchemaError};

/// An ordered sequence of blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing block sequence.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block ids in document order.
    pub fn ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().map(|b| &b.id).collect()
    }

    /// Look up a block by id.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Index of a block by id.
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Append a block at the end.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert a block at `pos` (0..=len).
    pub fn insert(&mut self, pos: usize, block: Block) -> Result<()> {
        if pos > self.blocks.len() {
            return Err(SchemaError::PositionOutOfBounds {
                pos,
                len: self.blocks.len(),
            });
        }
        self.blocks.insert(pos, block);
        Ok(())
    }

    /// Insert several blocks at `pos`, keeping their relative order.
    pub fn insert_many(&mut self, pos: usize, blocks: Vec<Block>) -> Result<()> {
        if pos > self.blocks.len() {
            return Err(SchemaError::PositionOutOfBounds {
                pos,
                len: self.blocks.len(),
            });
        }
        let tail = self.blocks.split_off(pos);
        self.blocks.extend(blocks);
        self.blocks.extend(tail);
        Ok(())
    }

    /// Replace the block with `id`, keeping the id and position.
    ///
    /// Returns the previous block.
    pub fn replace(&mut self, id: &BlockId, mut block: Block) -> Result<Block> {
        let pos = self
            .position(id)
            .ok_or_else(|| SchemaError::BlockNotFound(id.clone()))?;
        block.id = id.clone();
        Ok(std::mem::replace(&mut self.blocks[pos], block))
    }

    /// Remove the block with `id`.
    pub fn remove(&mut self, id: &BlockId) -> Result<Block> {
        let pos = self
            .position(id)
            .ok_or_else(|| SchemaError::BlockNotFound(id.clone()))?;
        Ok(self.blocks.remove(pos))
    }

    /// Move the block with `id` so it ends up at index `to`.
    pub fn move_block(&mut self, id: &BlockId, to: usize) -> Result<()> {
        let from = self
            .position(id)
            .ok_or_else(|| SchemaError::BlockNotFound(id.clone()))?;
        if to >= self.blocks.len() {
            return Err(SchemaError::PositionOutOfBounds {
                pos: to,
                len: self.blocks.len(),
            });
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Check id invariants: every id present, block ids unique across the
    /// document, nested ids unique within their parent block.
    pub fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if block.id.is_empty() {
                return Err(SchemaError::MissingId(format!("block {idx}")));
            }
            if !seen.insert(&block.id) {
                return Err(SchemaError::duplicate(block.id.clone(), "document"));
            }
            let mut nested = HashSet::new();
            for item_id in block.data.nested_ids() {
                if item_id.is_empty() {
                    return Err(SchemaError::MissingId(format!("block {} item", block.id)));
                }
                if !nested.insert(item_id) {
                    return Err(SchemaError::duplicate(item_id.clone(), format!("block {}", block.id)));
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Metadata header of a published piece (wire names follow the stored schema).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub titulo: String,
    pub slug: String,
    pub descripcion_corta: String,
    pub autor: String,
    pub tags: Vec<String>,
    pub imagen_portada_url: String,
    pub imagen_portada_alt: String,
    pub publicado: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_publicacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_actualizacion: Option<String>,
}

/// Metadata plus block sequence: the persisted and exchanged shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub bloques: Document,
}

impl BlogDocument {
    pub fn new(metadata: DocumentMetadata, bloques: Document) -> Self {
        Self { metadata, bloques }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockData, FaqData, FaqItem, TextFormat};

    fn doc_abc() -> Document {
        Document::from_blocks(vec![
            Block::with_id("a", BlockData::Text(Default::default())),
            Block::with_id("b", BlockData::Text(Default::default())),
            Block::with_id("c", BlockData::Text(Default::default())),
        ])
    }

    fn order(doc: &Document) -> Vec<&str> {
        doc.ids().into_iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_insert_and_bounds() {
        let mut doc = doc_abc();
        doc.insert(3, Block::with_id("d", BlockData::Text(Default::default())))
            .unwrap();
        assert_eq!(order(&doc), ["a", "b", "c", "d"]);
        let err = doc
            .insert(9, Block::with_id("e", BlockData::Text(Default::default())))
            .unwrap_err();
        assert_eq!(err, SchemaError::PositionOutOfBounds { pos: 9, len: 4 });
    }

    #[test]
    fn test_insert_many_keeps_order() {
        let mut doc = doc_abc();
        let pasted = vec![
            Block::with_id("x", BlockData::Text(Default::default())),
            Block::with_id("y", BlockData::Text(Default::default())),
        ];
        doc.insert_many(1, pasted).unwrap();
        assert_eq!(order(&doc), ["a", "x", "y", "b", "c"]);
    }

    #[test]
    fn test_replace_preserves_id_and_position() {
        let mut doc = doc_abc();
        let replacement = Block::text(TextFormat::H2, "Nuevo");
        let old = doc.replace(&BlockId::new("b"), replacement).unwrap();
        assert_eq!(old.id.as_str(), "b");
        assert_eq!(order(&doc), ["a", "b", "c"]);
        let BlockData::Text(t) = &doc.blocks()[1].data else {
            panic!("expected text");
        };
        assert_eq!(t.content, "Nuevo");
    }

    #[test]
    fn test_remove_and_move() {
        let mut doc = doc_abc();
        doc.move_block(&BlockId::new("a"), 2).unwrap();
        assert_eq!(order(&doc), ["b", "c", "a"]);
        doc.remove(&BlockId::new("c")).unwrap();
        assert_eq!(order(&doc), ["b", "a"]);
        assert!(matches!(
            doc.remove(&BlockId::new("c")),
            Err(SchemaError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_check_unique_ids_top_level() {
        let mut doc = doc_abc();
        assert!(doc.check_unique_ids().is_ok());
        doc.push(Block::with_id("a", BlockData::Text(Default::default())));
        assert!(matches!(
            doc.check_unique_ids(),
            Err(SchemaError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_check_unique_ids_nested_scope() {
        let faq = |ids: [&str; 2]| {
            BlockData::Faq(FaqData {
                title: None,
                items: ids
                    .iter()
                    .map(|id| FaqItem {
                        id: BlockId::new(*id),
                        ..Default::default()
                    })
                    .collect(),
            })
        };
        // Same nested id in two different parents is fine.
        let doc = Document::from_blocks(vec![
            Block::with_id("f1", faq(["q1", "q2"])),
            Block::with_id("f2", faq(["q1", "q2"])),
        ]);
        assert!(doc.check_unique_ids().is_ok());

        let doc = Document::from_blocks(vec![Block::with_id("f1", faq(["q1", "q1"]))]);
        assert!(doc.check_unique_ids().is_err());
    }

    #[test]
    fn test_blog_document_wire_names() {
        let doc = BlogDocument::new(
            DocumentMetadata {
                titulo: "X".into(),
                slug: "x".into(),
                ..Default::default()
            },
            doc_abc(),
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["metadata"]["titulo"], "X");
        assert_eq!(value["bloques"].as_array().map(Vec::len), Some(3));
        assert!(value["metadata"].get("fecha_publicacion").is_none());
    }
}
