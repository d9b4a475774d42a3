//! Editing services for Vitrina documents.
//!
//! - [`ClipboardStore`]: single-slot copy / cut / paste with a pluggable
//!   [`ClipboardBackend`]; every paste mints fresh ids.
//! - [`TemplateLibrary`]: category-tagged block templates, including the
//!   procedurally generated numbered lists.
//! - [`analyze`]: word counts, reading time, readability, SEO score and
//!   keyword density.
//! - [`DocumentStore`]: the persistence collaborator.
//! - [`VitrinaConfig`]: `vitrina.toml`.

pub mod analyzer;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod store;
pub mod templates;

pub use analyzer::{
    AnalyzerConfig, ContentAnalysis, KeywordDensity, SeoSuggestion, analyze, analyze_document,
};
pub use clipboard::{
    ClipSource, ClipboardBackend, ClipboardPayload, ClipboardStore, FileClipboard,
    MemoryClipboard,
};
pub use config::{ClipboardConfig, LogConfig, VitrinaConfig};
pub use error::{ClipboardError, KernelError, Result};
pub use store::{DirDocumentStore, DocumentStore, MemoryDocumentStore};
pub use templates::{Template, TemplateCategory, TemplateLibrary, list_numbered};
