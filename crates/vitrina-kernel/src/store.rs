//! Document persistence collaborator.
//!
//! The engine only needs `load` / `save` by document id (the slug). Two
//! sessions saving the same id are not coordinated: the later save replaces
//! the earlier one.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use vitrina_types::BlogDocument;

use crate::error::{KernelError, Result};

/// Persistence for whole documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, id: &str) -> Result<BlogDocument>;

    async fn save(&self, id: &str, document: &BlogDocument) -> Result<()>;

    /// Stored ids, sorted.
    async fn list(&self) -> Result<Vec<String>>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, BlogDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, id: &str) -> Result<BlogDocument> {
        self.documents
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| KernelError::not_found(format!("document {id}")))
    }

    async fn save(&self, id: &str, document: &BlogDocument) -> Result<()> {
        self.documents.write().insert(id.to_string(), document.clone());
        debug!(id, blocks = document.bloques.len(), "document saved");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.documents.read().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// One JSON file per document under a root directory (`{root}/{id}.json`).
#[derive(Clone, Debug)]
pub struct DirDocumentStore {
    root: PathBuf,
}

impl DirDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KernelError::not_found(format!("invalid document id {id:?}")));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

#[async_trait]
impl DocumentStore for DirDocumentStore {
    async fn load(&self, id: &str) -> Result<BlogDocument> {
        let path = self.path_for(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KernelError::not_found(format!("document {id}")));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, id: &str, document: &BlogDocument) -> Result<()> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(document)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(id, path = %path.display(), "document saved");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
