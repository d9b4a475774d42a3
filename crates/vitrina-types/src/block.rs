//! Block taxonomy: kinds, tagged payloads, and the cross-cutting style.
//!
//! ## Design: closed kind set + lenient decode
//!
//! `BlockKind` is the closed set of 40 wire tags. `BlockData` carries one
//! variant per kind, so every consumer matches exhaustively; adding a kind
//! fails to compile until the dispatcher, exporter, and analyzer handle it.
//!
//! Decoding never fails a whole document. A block whose tag is unknown, or
//! whose payload does not fit its kind, decodes as [`BlockData::Unknown`]
//! with the original tag and payload preserved verbatim, so it re-exports
//! losslessly and renders as a placeholder.
//!
//! Wire shape: `{ "id": "...", "type": "text", "data": {...}, "style": {...} }`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::BlockId;
use crate::payload::*;

/// What a block *is* (wire `type` tag).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BlockKind {
    Text,
    Image,
    Video,
    Code,
    Table,
    Alert,
    Tabs,
    Accordion,
    Separator,
    Quote,
    Stats,
    Timeline,
    Comparison,
    Callout,
    Button,
    Embed,
    Tweet,
    FileDownload,
    Faq,
    ProsCons,
    FeatureList,
    BeforeAfter,
    IconGrid,
    CategoryCard,
    AuthorBio,
    Poll,
    ProgressBar,
    Checklist,
    Changelog,
    PricingTable,
    Testimonial,
    TipBox,
    CtaBanner,
    ProductShowcase,
    ProgramCard,
    ProgramsGrid,
    BlogCard,
    BlogsGrid,
    ImagesGrid,
    DividerText,
}

impl BlockKind {
    /// Parse a wire tag (exact, kebab-case).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Field names of nested lists whose records carry their own `id`.
    ///
    /// This is the descriptor table driving the generic id walk: both the
    /// typed walk in [`crate::walk`] and the raw-JSON walk used on import
    /// consult it, so no kind has its own id-regeneration code.
    pub fn nested_id_fields(&self) -> &'static [&'static str] {
        match self {
            BlockKind::Tabs
            | BlockKind::Accordion
            | BlockKind::Faq
            | BlockKind::FeatureList
            | BlockKind::IconGrid
            | BlockKind::Timeline
            | BlockKind::ProgressBar
            | BlockKind::Checklist => &["items"],
            BlockKind::Changelog => &["entries"],
            BlockKind::PricingTable => &["plans"],
            BlockKind::Poll => &["options"],
            _ => &[],
        }
    }

    /// Kinds that point at external URLs or ids the importer cannot verify.
    pub fn needs_manual_reference(&self) -> bool {
        matches!(
            self,
            BlockKind::Image
                | BlockKind::ProgramCard
                | BlockKind::ProgramsGrid
                | BlockKind::BlogCard
                | BlockKind::BlogsGrid
                | BlockKind::CategoryCard
                | BlockKind::AuthorBio
        )
    }

    /// Kinds resolved against the reference resolver at render time.
    pub fn resolves_references(&self) -> bool {
        matches!(
            self,
            BlockKind::ProgramCard | BlockKind::ProgramsGrid | BlockKind::BlogCard | BlockKind::BlogsGrid
        )
    }

    /// Kinds whose text feeds the content analyzer.
    pub fn is_prose(&self) -> bool {
        matches!(
            self,
            BlockKind::Text | BlockKind::Alert | BlockKind::Tabs | BlockKind::Accordion
        )
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A block whose tag is unrecognized or whose payload did not decode.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownBlock {
    /// Original wire tag.
    pub kind: String,
    /// Original payload, kept verbatim.
    pub data: Value,
    /// Decode error when the tag was known but the payload malformed.
    pub error: Option<String>,
}

impl UnknownBlock {
    /// Whether the tag itself is outside the closed set.
    pub fn is_unrecognized(&self) -> bool {
        BlockKind::from_str(&self.kind).is_none()
    }
}

macro_rules! block_data {
    ($($Variant:ident($Payload:ty)),* $(,)?) => {
        /// Variant-specific payload, one variant per [`BlockKind`].
        #[derive(Clone, Debug, PartialEq)]
        pub enum BlockData {
            $($Variant($Payload),)*
            /// Unrecognized tag or malformed payload (see [`UnknownBlock`]).
            Unknown(UnknownBlock),
        }

        impl BlockData {
            /// The kind, or `None` for [`BlockData::Unknown`].
            pub fn kind(&self) -> Option<BlockKind> {
                match self {
                    $(BlockData::$Variant(_) => Some(BlockKind::$Variant),)*
                    BlockData::Unknown(_) => None,
                }
            }

            fn decode_known(kind: BlockKind, data: Value) -> Result<Self, serde_json::Error> {
                match kind {
                    $(BlockKind::$Variant => serde_json::from_value(data).map(BlockData::$Variant),)*
                }
            }

            /// Payload as JSON (unknown payloads are returned verbatim).
            pub fn to_value(&self) -> Value {
                match self {
                    $(BlockData::$Variant(d) => serde_json::to_value(d).unwrap_or(Value::Null),)*
                    BlockData::Unknown(u) => u.data.clone(),
                }
            }
        }
    };
}

block_data!(
    Text(TextData),
    Image(ImageData),
    Video(VideoData),
    Code(CodeData),
    Table(TableData),
    Alert(AlertData),
    Tabs(TabsData),
    Accordion(AccordionData),
    Separator(SeparatorData),
    Quote(QuoteData),
    Stats(StatsData),
    Timeline(TimelineData),
    Comparison(ComparisonData),
    Callout(CalloutData),
    Button(ButtonData),
    Embed(EmbedData),
    Tweet(TweetData),
    FileDownload(FileDownloadData),
    Faq(FaqData),
    ProsCons(ProsConsData),
    FeatureList(FeatureListData),
    BeforeAfter(BeforeAfterData),
    IconGrid(IconGridData),
    CategoryCard(CategoryCardData),
    AuthorBio(AuthorBioData),
    Poll(PollData),
    ProgressBar(ProgressBarData),
    Checklist(ChecklistData),
    Changelog(ChangelogData),
    PricingTable(PricingTableData),
    Testimonial(TestimonialData),
    TipBox(TipBoxData),
    CtaBanner(CtaBannerData),
    ProductShowcase(ProductShowcaseData),
    ProgramCard(ProgramCardData),
    ProgramsGrid(ProgramsGridData),
    BlogCard(BlogCardData),
    BlogsGrid(BlogsGridData),
    ImagesGrid(ImagesGridData),
    DividerText(DividerTextData),
);

fn ids_of<T: NestedItem>(items: &[T]) -> Vec<&BlockId> {
    items.iter().map(NestedItem::id).collect()
}

fn ids_of_mut<T: NestedItem>(items: &mut [T]) -> Vec<&mut BlockId> {
    items.iter_mut().map(NestedItem::id_mut).collect()
}

impl BlockData {
    /// Decode a payload for a wire tag. Never fails: see module docs.
    pub fn from_tagged(tag: &str, data: Value) -> Self {
        let data = if data.is_null() {
            Value::Object(Default::default())
        } else {
            data
        };
        let Some(kind) = BlockKind::from_str(tag) else {
            return BlockData::Unknown(UnknownBlock {
                kind: tag.to_string(),
                data,
                error: None,
            });
        };
        match Self::decode_known(kind, data.clone()) {
            Ok(decoded) => decoded,
            Err(e) => BlockData::Unknown(UnknownBlock {
                kind: tag.to_string(),
                data,
                error: Some(e.to_string()),
            }),
        }
    }

    /// Wire tag (original tag for unknown blocks).
    pub fn tag(&self) -> &str {
        match self {
            BlockData::Unknown(u) => &u.kind,
            other => other.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Ids of nested records, in list order.
    pub fn nested_ids(&self) -> Vec<&BlockId> {
        match self {
            BlockData::Tabs(d) => ids_of(&d.items),
            BlockData::Accordion(d) => ids_of(&d.items),
            BlockData::Faq(d) => ids_of(&d.items),
            BlockData::FeatureList(d) => ids_of(&d.items),
            BlockData::IconGrid(d) => ids_of(&d.items),
            BlockData::Timeline(d) => ids_of(&d.items),
            BlockData::Changelog(d) => ids_of(&d.entries),
            BlockData::PricingTable(d) => ids_of(&d.plans),
            BlockData::ProgressBar(d) => ids_of(&d.items),
            BlockData::Checklist(d) => ids_of(&d.items),
            BlockData::Poll(d) => ids_of(&d.options),
            _ => Vec::new(),
        }
    }

    /// Mutable ids of nested records, in list order.
    pub fn nested_ids_mut(&mut self) -> Vec<&mut BlockId> {
        match self {
            BlockData::Tabs(d) => ids_of_mut(&mut d.items),
            BlockData::Accordion(d) => ids_of_mut(&mut d.items),
            BlockData::Faq(d) => ids_of_mut(&mut d.items),
            BlockData::FeatureList(d) => ids_of_mut(&mut d.items),
            BlockData::IconGrid(d) => ids_of_mut(&mut d.items),
            BlockData::Timeline(d) => ids_of_mut(&mut d.items),
            BlockData::Changelog(d) => ids_of_mut(&mut d.entries),
            BlockData::PricingTable(d) => ids_of_mut(&mut d.plans),
            BlockData::ProgressBar(d) => ids_of_mut(&mut d.items),
            BlockData::Checklist(d) => ids_of_mut(&mut d.items),
            BlockData::Poll(d) => ids_of_mut(&mut d.options),
            _ => Vec::new(),
        }
    }
}

/// Horizontal alignment applied by the block wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Width applied by the block wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    Full,
    #[default]
    Content,
}

/// Cross-cutting presentation, independent of the block kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl Width {
    pub fn as_str(&self) -> &'static str {
        match self {
            Width::Full => "full",
            Width::Content => "content",
        }
    }
}

/// The atomic content unit.
///
/// Mutation at the API boundary is whole-block replacement: keep the id,
/// swap the payload (see [`crate::Document::replace`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub data: BlockData,
    pub style: Option<BlockStyle>,
}

/// Wire form of a [`Block`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: BlockId,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<BlockStyle>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            id: raw.id,
            data: BlockData::from_tagged(&raw.kind, raw.data),
            style: raw.style,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        Self {
            kind: block.data.tag().to_string(),
            data: block.data.to_value(),
            id: block.id,
            style: block.style,
        }
    }
}

impl Block {
    /// Create a block with a freshly minted id.
    pub fn new(data: BlockData) -> Self {
        Self {
            id: BlockId::mint(),
            data,
            style: None,
        }
    }

    /// Create a block with an explicit id.
    pub fn with_id(id: impl Into<BlockId>, data: BlockData) -> Self {
        Self {
            id: id.into(),
            data,
            style: None,
        }
    }

    /// Create a `text` block with a freshly minted id.
    pub fn text(format: TextFormat, content: impl Into<String>) -> Self {
        Self::new(BlockData::Text(TextData {
            format,
            content: content.into(),
        }))
    }

    /// Set the style wrapper.
    pub fn styled(mut self, style: BlockStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// The kind, or `None` for unknown blocks.
    pub fn kind(&self) -> Option<BlockKind> {
        self.data.kind()
    }

    /// Wire tag.
    pub fn tag(&self) -> &str {
        self.data.tag()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    // ── BlockKind ───────────────────────────────────────────────────────

    #[test]
    fn test_kind_count_and_tags_roundtrip() {
        assert_eq!(BlockKind::iter().count(), 40);
        for kind in BlockKind::iter() {
            assert_eq!(BlockKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kebab_case_tags() {
        assert_eq!(BlockKind::FileDownload.as_str(), "file-download");
        assert_eq!(BlockKind::ProsCons.as_str(), "pros-cons");
        assert_eq!(BlockKind::CtaBanner.as_str(), "cta-banner");
        assert_eq!(BlockKind::from_str("divider-text"), Some(BlockKind::DividerText));
        assert_eq!(BlockKind::from_str("carousel"), None);
    }

    #[test]
    fn test_descriptor_matches_typed_walk() {
        // Every kind listed in the descriptor must expose exactly one nested
        // id when built from a one-item list under that field name.
        for kind in BlockKind::iter() {
            let fields = kind.nested_id_fields();
            let mut payload = serde_json::Map::new();
            for field in fields {
                payload.insert(field.to_string(), json!([{ "id": "x" }]));
            }
            let data = BlockData::from_tagged(kind.as_str(), Value::Object(payload));
            assert_eq!(data.kind(), Some(kind), "{kind} failed to decode");
            assert_eq!(data.nested_ids().len(), fields.len(), "{kind}");
        }
    }

    // ── Decode ──────────────────────────────────────────────────────────

    #[test]
    fn test_block_wire_shape() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "text",
            "data": {"format": "h2", "content": "Hola"},
            "style": {"align": "center"}
        }))
        .unwrap();
        assert_eq!(block.id.as_str(), "b1");
        assert_eq!(block.kind(), Some(BlockKind::Text));
        assert_eq!(block.style.and_then(|s| s.align), Some(Align::Center));
        match &block.data {
            BlockData::Text(t) => {
                assert_eq!(t.format, TextFormat::H2);
                assert_eq!(t.content, "Hola");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_survives_roundtrip() {
        let input = json!({"id": "z", "type": "hologram", "data": {"beam": 3}});
        let block: Block = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(block.kind(), None);
        assert_eq!(block.tag(), "hologram");
        let BlockData::Unknown(u) = &block.data else {
            panic!("expected unknown");
        };
        assert!(u.is_unrecognized());
        assert_eq!(serde_json::to_value(&block).unwrap(), input);
    }

    #[test]
    fn test_malformed_known_payload_keeps_error() {
        let block: Block = serde_json::from_value(json!({
            "id": "t",
            "type": "text",
            "data": {"format": "h9", "content": "x"}
        }))
        .unwrap();
        let BlockData::Unknown(u) = &block.data else {
            panic!("expected unknown");
        };
        assert!(!u.is_unrecognized());
        assert!(u.error.is_some());
        assert_eq!(block.tag(), "text");
    }

    #[test]
    fn test_missing_data_decodes_defaults() {
        let block: Block = serde_json::from_value(json!({"id": "s", "type": "separator"})).unwrap();
        assert_eq!(block.data, BlockData::Separator(SeparatorData::default()));
    }

    #[test]
    fn test_missing_id_decodes_empty() {
        let block: Block =
            serde_json::from_value(json!({"type": "quote", "data": {"text": "x"}})).unwrap();
        assert!(block.id.is_empty());
    }

    #[test]
    fn test_style_omitted_when_absent() {
        let block = Block::with_id("a", BlockData::DividerText(DividerTextData { text: "o".into() }));
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("style").is_none());
        assert_eq!(value["type"], "divider-text");
    }

    // ── Classification ──────────────────────────────────────────────────

    #[test]
    fn test_reference_classification() {
        assert!(BlockKind::Image.needs_manual_reference());
        assert!(!BlockKind::Image.resolves_references());
        assert!(BlockKind::BlogsGrid.resolves_references());
        assert!(BlockKind::AuthorBio.needs_manual_reference());
        assert!(!BlockKind::Text.needs_manual_reference());
    }
}
