//! Render dispatcher: document → ordered rendered blocks.
//!
//! Dispatch is total over the closed kind set. Each block renders inside its
//! own failure boundary: an error or panic in block *k* becomes an inline
//! error placeholder for *k* only.
//!
//! ```text
//! Document ──▶ Dispatcher::render ──────────▶ [RenderedBlock; n]   (references: Loading)
//!          └─▶ Dispatcher::render_resolved ─▶ [RenderedBlock; n]   (one ReferenceSlot per block,
//!                                                                    resolved concurrently)
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};
use vitrina_types::{Block, BlockData, BlockId, BlockStyle, Document};

use crate::error::RenderError;
use crate::icons::{BuiltinIcons, IconLookup};
use crate::node::{Element, Node, el};
use crate::resolve::{Record, ReferenceResolver, ReferenceSlot, SlotState, reference_request};
use crate::views::{Ctx, render_data};

/// What happened to one block.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Rendered(Node),
    /// Unrecognized type tag.
    Unsupported,
    /// Contained error (bad payload, missing field, or panic).
    Failed(RenderError),
    /// Reference lookup pending.
    Loading,
    /// Reference lookup produced nothing.
    NothingSelected,
}

/// One entry of the rendered sequence, in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBlock {
    pub index: usize,
    pub block_id: BlockId,
    pub kind_tag: String,
    pub style: Option<BlockStyle>,
    pub outcome: RenderOutcome,
}

impl RenderedBlock {
    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Rendered(_))
    }

    /// Style wrapper, identical for every kind.
    fn wrapper(&self) -> Element {
        let style = self.style.unwrap_or_default();
        el("div")
            .class(format!(
                "block block-{} align-{} width-{}",
                self.kind_tag,
                style.align.unwrap_or_default().as_str(),
                style.width.unwrap_or_default().as_str()
            ))
            .attr("data-block-id", self.block_id.as_str())
    }

    fn placeholder(&self, class: &str, message: String) -> Node {
        el("div")
            .class(format!("placeholder placeholder-{class}"))
            .attr("data-block-index", self.index.to_string())
            .text(message)
            .into()
    }

    /// The wrapped node, placeholders included.
    pub fn node(&self) -> Node {
        let inner = match &self.outcome {
            RenderOutcome::Rendered(node) => node.clone(),
            RenderOutcome::Unsupported => {
                self.placeholder("unsupported", format!("Unsupported block: {}", self.kind_tag))
            }
            RenderOutcome::Failed(err) => self.placeholder("error", err.to_string()),
            RenderOutcome::Loading => self.placeholder("loading", "Loading…".to_string()),
            RenderOutcome::NothingSelected => {
                self.placeholder("empty", "Nothing selected".to_string())
            }
        };
        self.wrapper().child(inner).into()
    }
}

/// Serialize a rendered sequence to HTML.
pub fn to_html(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.node().to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders documents.
#[derive(Clone)]
pub struct Dispatcher {
    icons: Arc<dyn IconLookup>,
    resolver: Option<Arc<dyn ReferenceResolver>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            icons: Arc::new(BuiltinIcons),
            resolver: None,
        }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icons(mut self, icons: impl IconLookup + 'static) -> Self {
        self.icons = Arc::new(icons);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Synchronous pass: referential blocks stay `Loading`.
    pub fn render(&self, doc: &Document) -> Vec<RenderedBlock> {
        doc.blocks()
            .iter()
            .enumerate()
            .map(|(index, block)| self.render_block(index, block, None))
            .collect()
    }

    /// Full pass: every referential block resolves in its own slot,
    /// concurrently.
    pub async fn render_resolved(&self, doc: &Document) -> Vec<RenderedBlock> {
        let passes = doc.blocks().iter().enumerate().map(|(index, block)| async move {
            let state = self.resolve_slot(block).await;
            self.render_block(index, block, state.as_ref())
        });
        join_all(passes).await
    }

    async fn resolve_slot(&self, block: &Block) -> Option<SlotState> {
        let (kind, ids) = reference_request(&block.data)?;
        let Some(resolver) = &self.resolver else {
            warn!(block_id = %block.id, block_type = block.tag(), "no reference resolver configured");
            return Some(SlotState::Empty);
        };
        let mut slot = ReferenceSlot::new(block.id.clone());
        slot.resolve(resolver.as_ref(), kind, &ids).await;
        Some(slot.into_state())
    }

    fn render_block(&self, index: usize, block: &Block, slot: Option<&SlotState>) -> RenderedBlock {
        let outcome = match &block.data {
            BlockData::Unknown(unknown) if unknown.is_unrecognized() => {
                warn!(block_index = index, block_type = %unknown.kind, "unsupported block type");
                RenderOutcome::Unsupported
            }
            BlockData::Unknown(unknown) => {
                let err = RenderError::Malformed {
                    block_type: unknown.kind.clone(),
                    index,
                    message: unknown.error.clone().unwrap_or_default(),
                };
                warn!(block_index = index, error = %err, "malformed block payload");
                RenderOutcome::Failed(err)
            }
            data => match reference_request(data) {
                Some((_, ids)) if ids.is_empty() => RenderOutcome::NothingSelected,
                Some(_) => match slot {
                    None | Some(SlotState::Loading) => RenderOutcome::Loading,
                    Some(SlotState::Empty) => RenderOutcome::NothingSelected,
                    Some(SlotState::Resolved(records)) => self.contained(index, block, records),
                },
                None => self.contained(index, block, &[]),
            },
        };
        debug!(block_index = index, block_type = block.tag(), "dispatched");
        RenderedBlock {
            index,
            block_id: block.id.clone(),
            kind_tag: block.tag().to_string(),
            style: block.style,
            outcome,
        }
    }

    /// Failure boundary around one view.
    fn contained(&self, index: usize, block: &Block, records: &[Record]) -> RenderOutcome {
        let cx = Ctx {
            icons: self.icons.as_ref(),
            records,
        };
        match catch_unwind(AssertUnwindSafe(|| render_data(&block.data, &cx))) {
            Ok(Ok(node)) => RenderOutcome::Rendered(node),
            Ok(Err(err)) => {
                warn!(block_index = index, block_type = block.tag(), error = %err, "block failed to render");
                RenderOutcome::Failed(err)
            }
            Err(payload) => {
                let err = RenderError::panicked(block.tag(), index, payload.as_ref());
                warn!(block_index = index, block_type = block.tag(), error = %err, "block renderer panicked");
                RenderOutcome::Failed(err)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::Icon;
    use crate::resolve::{InMemoryResolver, RecordKind};
    use serde_json::json;
    use strum::IntoEnumIterator;
    use vitrina_types::*;

    fn block(id: &str, tag: &str, data: serde_json::Value) -> Block {
        Block::with_id(id, BlockData::from_tagged(tag, data))
    }

    fn doc(blocks: Vec<Block>) -> Document {
        Document::from_blocks(blocks)
    }

    fn resolver() -> Arc<dyn ReferenceResolver> {
        let record = |id: &str| Record {
            id: id.into(),
            title: format!("Programa {id}"),
            url: Some(format!("/programas/{id}")),
            ..Default::default()
        };
        Arc::new(
            InMemoryResolver::new()
                .with(RecordKind::Program, record("figma"))
                .with(RecordKind::Program, record("penpot"))
                .with(RecordKind::Program, record("sketch")),
        )
    }

    struct PanickyIcons;

    impl IconLookup for PanickyIcons {
        fn lookup(&self, _name: &str) -> Icon {
            panic!("icon table corrupted");
        }
    }

    // ── Totality & containment ──────────────────────────────────────────

    #[test]
    fn test_every_kind_dispatches_without_panic() {
        let blocks: Vec<Block> = BlockKind::iter()
            .enumerate()
            .map(|(i, kind)| block(&format!("b{i}"), kind.as_str(), json!({})))
            .collect();
        let rendered = Dispatcher::new().render(&doc(blocks));
        assert_eq!(rendered.len(), 40);
        for (i, r) in rendered.iter().enumerate() {
            assert_eq!(r.index, i);
            assert!(
                !matches!(r.outcome, RenderOutcome::Failed(RenderError::Panicked { .. })),
                "{} panicked",
                r.kind_tag
            );
        }
    }

    #[test]
    fn test_unknown_type_is_placeholder_and_siblings_survive() {
        let rendered = Dispatcher::new().render(&doc(vec![
            block("a", "text", json!({"format": "h2", "content": "Hola"})),
            block("b", "hologram", json!({"beam": 1})),
            block("c", "separator", json!({})),
        ]));
        assert!(rendered[0].is_rendered());
        assert_eq!(rendered[1].outcome, RenderOutcome::Unsupported);
        assert!(rendered[2].is_rendered());
        assert!(rendered[1].node().to_html().contains("Unsupported block: hologram"));
    }

    #[test]
    fn test_malformed_known_type_fails_inline() {
        let rendered = Dispatcher::new().render(&doc(vec![
            block("a", "stats", json!({"items": "not a list"})),
            block("b", "separator", json!({})),
        ]));
        assert!(matches!(
            &rendered[0].outcome,
            RenderOutcome::Failed(RenderError::Malformed { block_type, index: 0, .. }) if block_type == "stats"
        ));
        assert!(rendered[1].is_rendered());
    }

    #[test]
    fn test_panic_is_contained_to_its_block() {
        let dispatcher = Dispatcher::new().with_icons(PanickyIcons);
        let rendered = dispatcher.render(&doc(vec![
            block("a", "text", json!({"format": "paragraph", "content": "uno"})),
            block("b", "stats", json!({"items": [{"label": "Usuarios", "value": "10k", "icon": "users"}]})),
            block("c", "text", json!({"format": "paragraph", "content": "tres"})),
        ]));
        assert!(rendered[0].is_rendered());
        assert!(rendered[2].is_rendered());
        let RenderOutcome::Failed(RenderError::Panicked {
            block_type,
            index,
            message,
        }) = &rendered[1].outcome
        else {
            panic!("expected contained panic, got {:?}", rendered[1].outcome);
        };
        assert_eq!((block_type.as_str(), *index), ("stats", 1));
        assert_eq!(message, "icon table corrupted");
        let html = rendered[1].node().to_html();
        assert!(html.contains("placeholder-error"));
        assert!(html.contains("block 1 (stats)"));
    }

    #[test]
    fn test_missing_required_field_fails_inline() {
        let rendered = Dispatcher::new().render(&doc(vec![block("a", "image", json!({"alt": "x"}))]));
        assert_eq!(
            rendered[0].outcome,
            RenderOutcome::Failed(RenderError::missing_field("image", "url"))
        );
    }

    // ── Markup ──────────────────────────────────────────────────────────

    #[test]
    fn test_style_wrapper_and_heading() {
        let styled = block("h", "text", json!({"format": "h2", "content": "Hola"})).styled(BlockStyle {
            align: Some(Align::Center),
            width: Some(Width::Full),
        });
        let rendered = Dispatcher::new().render(&doc(vec![styled]));
        assert_eq!(
            rendered[0].node().to_html(),
            "<div class=\"block block-text align-center width-full\" data-block-id=\"h\"><h2>Hola</h2></div>"
        );
    }

    #[test]
    fn test_default_style_wrapper() {
        let rendered = Dispatcher::new().render(&doc(vec![block("s", "separator", json!({}))]));
        assert!(
            rendered[0]
                .node()
                .to_html()
                .starts_with("<div class=\"block block-separator align-left width-content\"")
        );
    }

    #[test]
    fn test_comparison_three_rows_two_columns() {
        let rendered = Dispatcher::new().render(&doc(vec![block(
            "cmp",
            "comparison",
            json!({
                "features": ["Precio", "Colaboración", "Plugins"],
                "items": [
                    {"name": "Figma", "features": {"Precio": "12 €", "Colaboración": true, "Plugins": true}},
                    {"name": "Sketch", "features": {"Precio": "9 €", "Colaboración": false}}
                ]
            }),
        )]));
        let RenderOutcome::Rendered(node) = &rendered[0].outcome else {
            panic!("comparison should render");
        };
        let mut bodies = Vec::new();
        node.find_all("tbody", &mut bodies);
        let rows: Vec<&Node> = bodies[0].children.iter().collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            let mut cells = Vec::new();
            row.find_all("td", &mut cells);
            assert_eq!(cells.len(), 2);
        }
        let html = node.to_html();
        assert!(html.contains("<td class=\"cell-check\">✓</td><td class=\"cell-cross\">✗</td>"));
        assert!(html.contains("<td class=\"cell-missing\">-</td>"));
    }

    #[test]
    fn test_tabs_first_active() {
        let rendered = Dispatcher::new().render(&doc(vec![block(
            "t",
            "tabs",
            json!({"items": [
                {"id": "one", "label": "Uno", "content": "a"},
                {"id": "two", "label": "Dos", "content": "b"}
            ]}),
        )]));
        let html = rendered[0].node().to_html();
        assert!(html.contains("data-tab-id=\"one\" aria-selected=\"true\""));
        assert!(html.contains("data-tab-id=\"two\" aria-selected=\"false\""));
        assert!(html.contains("<div role=\"tabpanel\" data-tab-id=\"two\" hidden=\"\">b</div>"));
    }

    #[test]
    fn test_video_unsupported_url_placeholder() {
        let rendered = Dispatcher::new().render(&doc(vec![block(
            "v",
            "video",
            json!({"url": "https://example.com/watch"}),
        )]));
        assert!(
            rendered[0]
                .node()
                .to_html()
                .contains("Unsupported or invalid video URL")
        );
    }

    #[test]
    fn test_stats_unknown_icon_uses_default() {
        let rendered = Dispatcher::new().render(&doc(vec![block(
            "s",
            "stats",
            json!({"items": [{"label": "x", "value": "1", "icon": "definitely-not-an-icon"}]}),
        )]));
        assert!(rendered[0].node().to_html().contains("data-icon=\"sparkles\""));
    }

    #[test]
    fn test_rich_text_is_sanitized() {
        let rendered = Dispatcher::new().render(&doc(vec![block(
            "p",
            "text",
            json!({"format": "paragraph", "content": "<p>ok</p><script>alert(1)</script>"}),
        )]));
        let html = rendered[0].node().to_html();
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("script"));
    }

    // ── References ──────────────────────────────────────────────────────

    #[test]
    fn test_sync_render_leaves_references_loading() {
        let rendered = Dispatcher::new().with_resolver(resolver()).render(&doc(vec![
            block("g", "programs-grid", json!({"programIds": ["figma"]})),
            block("e", "program-card", json!({"programId": ""})),
        ]));
        assert_eq!(rendered[0].outcome, RenderOutcome::Loading);
        assert_eq!(rendered[1].outcome, RenderOutcome::NothingSelected);
    }

    #[tokio::test]
    async fn test_grid_keeps_requested_order_dropping_misses() {
        let rendered = Dispatcher::new()
            .with_resolver(resolver())
            .render_resolved(&doc(vec![block(
                "g",
                "programs-grid",
                json!({"programIds": ["sketch", "ghost", "figma"], "columns": 2}),
            )]))
            .await;
        let RenderOutcome::Rendered(node) = &rendered[0].outcome else {
            panic!("grid should render, got {:?}", rendered[0].outcome);
        };
        let mut cards = Vec::new();
        node.find_all("article", &mut cards);
        let order: Vec<&str> = cards
            .iter()
            .filter_map(|card| card.get_attr("data-record-id"))
            .collect();
        assert_eq!(order, ["sketch", "figma"]);
    }

    #[tokio::test]
    async fn test_unresolvable_reference_is_nothing_selected() {
        let rendered = Dispatcher::new()
            .with_resolver(resolver())
            .render_resolved(&doc(vec![
                block("c", "program-card", json!({"programId": "ghost"})),
                block("b", "blog-card", json!({"blogId": "figma"})),
                block("t", "text", json!({"format": "paragraph", "content": "x"})),
            ]))
            .await;
        assert_eq!(rendered[0].outcome, RenderOutcome::NothingSelected);
        assert_eq!(rendered[1].outcome, RenderOutcome::NothingSelected);
        assert!(rendered[2].is_rendered());
    }

    #[tokio::test]
    async fn test_without_resolver_references_are_empty() {
        let rendered = Dispatcher::new()
            .render_resolved(&doc(vec![block("c", "blog-card", json!({"blogId": "x"}))]))
            .await;
        assert_eq!(rendered[0].outcome, RenderOutcome::NothingSelected);
    }

    #[test]
    fn test_to_html_joins_in_order() {
        let rendered = Dispatcher::new().render(&doc(vec![
            block("a", "divider-text", json!({"text": "o"})),
            block("b", "separator", json!({"variant": "dashed"})),
        ]));
        let html = to_html(&rendered);
        let a = html.find("data-block-id=\"a\"").unwrap();
        let b = html.find("data-block-id=\"b\"").unwrap();
        assert!(a < b);
        assert!(html.contains("separator-dashed"));
    }
}
