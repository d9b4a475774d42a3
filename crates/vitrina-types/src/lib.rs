//! Block schema and document types for Vitrina.
//!
//! This crate is the contract every other crate builds on: typed block ids,
//! the closed block taxonomy, per-kind payloads, documents, and the generic
//! nested-id tree walk. It has **no internal vitrina dependencies**.
//!
//! # Overview
//!
//! ```text
//! BlogDocument
//!     └── metadata: DocumentMetadata (titulo, slug, descripcion_corta, ...)
//!     └── bloques: Document (ordered Vec<Block>)
//!             └── Block { id: BlockId, data: BlockData, style: Option<BlockStyle> }
//!                     └── BlockData::Tabs(TabsData { items: [TabItem { id, .. }] })
//!                     └── BlockData::Unknown(UnknownBlock)  ← unrecognized tags survive
//! ```
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`BlockId`]       | Opaque block / nested-item identifier        |
//! | [`BlockKind`]     | Closed set of 40 wire tags                   |
//! | [`BlockData`]     | Tagged payload, one variant per kind         |
//! | [`Block`]         | Atomic content unit (id + payload + style)   |
//! | [`Document`]      | Ordered block sequence                       |
//! | [`BlogDocument`]  | Metadata header + document (the JSON shape)  |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod document;
pub mod error;
pub mod ids;
pub mod payload;
pub mod walk;

// Re-export primary types at crate root for convenience.
pub use block::{Align, Block, BlockData, BlockKind, BlockStyle, UnknownBlock, Width};
pub use document::{BlogDocument, Document, DocumentMetadata};
pub use error::{Result, SchemaError};
pub use ids::BlockId;
pub use payload::*;

/// Current time as Unix milliseconds.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
