//! Per-kind block payloads.
//!
//! Every payload struct decodes leniently: all fields default, so partially
//! authored or machine-generated blocks still decode. Wire names are
//! camelCase. Nested collections whose records carry their own `id` implement
//! [`NestedItem`] and are listed in [`BlockKind::nested_id_fields`].
//!
//! [`BlockKind::nested_id_fields`]: crate::BlockKind::nested_id_fields

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::BlockId;

/// A nested record that carries its own id (unique within its parent list).
pub trait NestedItem {
    fn id(&self) -> &BlockId;
    fn id_mut(&mut self) -> &mut BlockId;
}

macro_rules! nested_item {
    ($($T:ty),* $(,)?) => {
        $(
            impl NestedItem for $T {
                fn id(&self) -> &BlockId {
                    &self.id
                }

                fn id_mut(&mut self) -> &mut BlockId {
                    &mut self.id
                }
            }
        )*
    };
}

/// Helper for `#[serde(skip_serializing_if)]` on bool fields.
fn is_false(v: &bool) -> bool {
    !v
}

// ============================================================================
// Text
// ============================================================================

/// Semantic container of a `text` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Paragraph,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Ul,
    Ol,
    Quote,
    Code,
}

impl TextFormat {
    /// Parse from its wire tag. Case-sensitive, like the serde decoder.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::Paragraph => "paragraph",
            TextFormat::H1 => "h1",
            TextFormat::H2 => "h2",
            TextFormat::H3 => "h3",
            TextFormat::H4 => "h4",
            TextFormat::H5 => "h5",
            TextFormat::H6 => "h6",
            TextFormat::Ul => "ul",
            TextFormat::Ol => "ol",
            TextFormat::Quote => "quote",
            TextFormat::Code => "code",
        }
    }

    /// Heading level (1–6) for `h1`…`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            TextFormat::H1 => Some(1),
            TextFormat::H2 => Some(2),
            TextFormat::H3 => Some(3),
            TextFormat::H4 => Some(4),
            TextFormat::H5 => Some(5),
            TextFormat::H6 => Some(6),
            _ => None,
        }
    }
}

impl std::fmt::Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `text`: pre-rendered rich markup in a semantic container.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextData {
    pub format: TextFormat,
    pub content: String,
}

// ============================================================================
// Media
// ============================================================================

/// `image`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageData {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// `video`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoData {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// One entry of an `images-grid`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridImage {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// `images-grid`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagesGridData {
    pub images: Vec<GridImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

/// `before-after`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeforeAfterData {
    pub before_url: String,
    pub after_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_label: Option<String>,
}

/// `embed`: third-party iframe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedData {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// `tweet`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TweetData {
    pub url: String,
}

/// `file-download`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileDownloadData {
    pub url: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Code & tables
// ============================================================================

/// `code`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeData {
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// `table`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

// ============================================================================
// Notices
// ============================================================================

/// Severity of `alert`, `callout` and `tip-box` blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Variant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Variant {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Info => "info",
            Variant::Success => "success",
            Variant::Warning => "warning",
            Variant::Error => "error",
        }
    }
}

/// `alert`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertData {
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

/// `callout`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalloutData {
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// `tip-box`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TipBoxData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

// ============================================================================
// Collections with nested ids
// ============================================================================

/// One tab of a `tabs` block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabItem {
    pub id: BlockId,
    pub label: String,
    pub content: String,
}

/// `tabs`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsData {
    pub items: Vec<TabItem>,
}

/// One panel of an `accordion` block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionItem {
    pub id: BlockId,
    pub title: String,
    pub content: String,
}

/// `accordion`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionData {
    pub items: Vec<AccordionItem>,
}

/// `faq` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub id: BlockId,
    pub question: String,
    pub answer: String,
}

/// `faq`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FaqItem>,
}

/// `feature-list` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureItem {
    pub id: BlockId,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// `feature-list`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureListData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FeatureItem>,
}

/// `icon-grid` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconGridItem {
    pub id: BlockId,
    pub icon: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `icon-grid`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconGridData {
    pub items: Vec<IconGridItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

/// `timeline` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineItem {
    pub id: BlockId,
    pub date: String,
    pub title: String,
    pub description: String,
}

/// `timeline`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineData {
    pub items: Vec<TimelineItem>,
}

/// `changelog` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangelogEntry {
    pub id: BlockId,
    pub version: String,
    pub date: String,
    pub changes: Vec<String>,
}

/// `changelog`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangelogData {
    pub entries: Vec<ChangelogEntry>,
}

/// `pricing-table` plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub id: BlockId,
    pub name: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

/// `pricing-table`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingTableData {
    pub plans: Vec<PricingPlan>,
}

/// `progress-bar` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressItem {
    pub id: BlockId,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// `progress-bar`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBarData {
    pub items: Vec<ProgressItem>,
}

/// `checklist` entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistItem {
    pub id: BlockId,
    pub text: String,
    pub checked: bool,
}

/// `checklist`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<ChecklistItem>,
}

/// `poll` option.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollOption {
    pub id: BlockId,
    pub label: String,
    pub votes: u64,
}

/// `poll`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollData {
    pub question: String,
    pub options: Vec<PollOption>,
}

nested_item!(
    TabItem,
    AccordionItem,
    FaqItem,
    FeatureItem,
    IconGridItem,
    TimelineItem,
    ChangelogEntry,
    PricingPlan,
    ProgressItem,
    ChecklistItem,
    PollOption,
);

// ============================================================================
// Structured projections
// ============================================================================

/// Line style of a `separator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SeparatorStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Space,
}

/// `separator`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeparatorData {
    pub variant: SeparatorStyle,
}

/// `divider-text`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerTextData {
    pub text: String,
}

/// `quote`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteData {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// `stats` entry. `icon` is an icon name resolved through the icon lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `stats`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsData {
    pub items: Vec<StatItem>,
}

/// One column of a `comparison` block: feature label → value.
///
/// Values are kept as raw JSON: booleans render as check/cross glyphs,
/// everything else verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonItem {
    pub name: String,
    pub features: IndexMap<String, serde_json::Value>,
}

/// `comparison`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonData {
    /// Ordered feature labels (one matrix row each).
    pub features: Vec<String>,
    pub items: Vec<ComparisonItem>,
}

/// `pros-cons`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProsConsData {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pros_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cons_title: Option<String>,
}

// ============================================================================
// Calls to action & cards
// ============================================================================

/// `button`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonData {
    pub label: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub new_tab: bool,
}

/// `cta-banner`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaBannerData {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub button_label: String,
    pub button_url: String,
}

/// `testimonial`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialData {
    pub quote: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// `product-showcase`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductShowcaseData {
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub features: Vec<String>,
}

/// `author-bio`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorBioData {
    pub name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// `category-card`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryCardData {
    pub category_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Referential blocks (foreign ids resolved at render time)
// ============================================================================

/// `program-card`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramCardData {
    pub program_id: String,
}

/// `programs-grid`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramsGridData {
    pub program_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

/// `blog-card`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogCardData {
    pub blog_id: String,
}

/// `blogs-grid`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogsGridData {
    pub blog_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format_parse_matches_wire_tags() {
        assert_eq!(TextFormat::from_str("h2"), Some(TextFormat::H2));
        assert_eq!(TextFormat::from_str("paragraph"), Some(TextFormat::Paragraph));
        assert_eq!(TextFormat::from_str("h7"), None);
        assert_eq!(TextFormat::from_str("H2"), None);
        assert!(serde_json::from_str::<TextFormat>("\"H2\"").is_err());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(TextFormat::H1.heading_level(), Some(1));
        assert_eq!(TextFormat::H6.heading_level(), Some(6));
        assert_eq!(TextFormat::Ul.heading_level(), None);
    }

    #[test]
    fn test_partial_payload_defaults() {
        let data: ImageData = serde_json::from_value(serde_json::json!({"url": "a.png"})).unwrap();
        assert_eq!(data.url, "a.png");
        assert!(data.alt.is_empty());
        assert!(data.caption.is_none());
    }

    #[test]
    fn test_nested_items_default_to_empty_id() {
        let data: FaqData = serde_json::from_value(serde_json::json!({
            "items": [{"question": "¿Qué?", "answer": "Eso."}]
        }))
        .unwrap();
        assert!(data.items[0].id().is_empty());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let data = CtaBannerData {
            title: "Únete".into(),
            description: None,
            button_label: "Entrar".into(),
            button_url: "/registro".into(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["buttonLabel"], "Entrar");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_comparison_preserves_feature_order() {
        let data: ComparisonData = serde_json::from_value(serde_json::json!({
            "features": ["Precio", "Exportar"],
            "items": [{"name": "Figma", "features": {"Exportar": true, "Precio": "Gratis"}}]
        }))
        .unwrap();
        let keys: Vec<&String> = data.items[0].features.keys().collect();
        assert_eq!(keys, vec!["Exportar", "Precio"]);
    }
}
