//! Reusable block sequences.
//!
//! A template is a named, category-tagged block sequence. Instantiating one
//! follows the clipboard rule: a full deep copy with a fresh id at every
//! level, so the same template can be dropped into a document any number of
//! times.
//!
//! Enumerated-list templates are generated, not hand-authored: see
//! [`list_numbered`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{EnumIter, EnumString, IntoEnumIterator};
use tracing::info;
use vitrina_types::{
    AlertData, Block, BlockData, BlockId, ChecklistData, ChecklistItem, CodeData, ComparisonData,
    ComparisonItem, CtaBannerData, FaqData, FaqItem, FeatureItem, FeatureListData, GridImage,
    ImageData, ImagesGridData, ProductShowcaseData, ProsConsData, QuoteData, SeparatorData,
    StatItem, StatsData, TestimonialData, TextFormat, Variant, walk,
};

use crate::error::{KernelError, Result};

/// What kind of post a template scaffolds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TemplateCategory {
    List,
    Tutorial,
    Comparison,
    Guide,
    Review,
    Showcase,
}

impl TemplateCategory {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::List => "list",
            TemplateCategory::Tutorial => "tutorial",
            TemplateCategory::Comparison => "comparison",
            TemplateCategory::Guide => "guide",
            TemplateCategory::Review => "review",
            TemplateCategory::Showcase => "showcase",
        }
    }

    pub fn all() -> impl Iterator<Item = TemplateCategory> {
        Self::iter()
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named block sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub description: String,
    pub blocks: Vec<Block>,
}

impl Template {
    /// Deep copy with fresh ids everywhere.
    pub fn instantiate(&self) -> Vec<Block> {
        let mut blocks = self.blocks.clone();
        let minted = walk::refresh_ids(&mut blocks);
        info!(template = %self.id, blocks = blocks.len(), minted, "template instantiated");
        blocks
    }
}

/// Blocks before the repeating unit of [`list_numbered`].
pub const LIST_INTRO_BLOCKS: usize = 2;
/// Blocks per list entry in [`list_numbered`].
pub const LIST_UNIT_BLOCKS: usize = 4;
/// Blocks after the repeating unit of [`list_numbered`].
pub const LIST_OUTRO_BLOCKS: usize = 3;

/// Enumerated-list post with `n` entries.
///
/// Each entry is a heading with its ordinal, an image placeholder, a
/// descriptive paragraph and a separator.
pub fn list_numbered(n: usize) -> Template {
    let mut blocks = Vec::with_capacity(LIST_INTRO_BLOCKS + n * LIST_UNIT_BLOCKS + LIST_OUTRO_BLOCKS);
    blocks.push(paragraph(format!(
        "Presenta la lista: qué reúnen estos {n} elementos y por qué merece la pena conocerlos."
    )));
    blocks.push(alert(
        Variant::Info,
        "Cómo leer esta lista",
        "Los elementos no siguen un orden de preferencia.",
    ));

    for i in 1..=n {
        blocks.push(Block::text(TextFormat::H2, format!("{i}. Elemento {i}")));
        blocks.push(Block::new(BlockData::Image(ImageData {
            url: format!("https://placehold.co/800x450?text=Elemento+{i}"),
            alt: format!("Imagen del elemento {i}"),
            ..Default::default()
        })));
        blocks.push(paragraph(format!(
            "Describe el elemento {i}: qué es, qué lo hace destacar y para quién es."
        )));
        blocks.push(separator());
    }

    blocks.push(Block::text(TextFormat::H2, "Conclusión"));
    blocks.push(paragraph("Resume la lista y recomienda un punto de partida."));
    blocks.push(cta(
        "¿Te ha resultado útil?",
        "Descubre más contenidos",
        "https://example.com",
    ));

    Template {
        id: format!("list-{n}"),
        name: format!("Lista de {n} elementos"),
        category: TemplateCategory::List,
        description: format!("Lista numerada de {n} entradas con imagen y descripción"),
        blocks,
    }
}

/// Template catalog.
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog: at least one template per category.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register(list_numbered(10));
        library.register(list_numbered(30));
        library.register(tutorial());
        library.register(comparison());
        library.register(guide());
        library.register(review());
        library.register(showcase());
        library
    }

    /// Add a template, replacing any with the same id.
    pub fn register(&mut self, template: Template) {
        self.templates.retain(|t| t.id != template.id);
        self.templates.push(template);
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn by_category(&self, category: TemplateCategory) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Fresh blocks for the template `id`.
    pub fn instantiate(&self, id: &str) -> Result<Vec<Block>> {
        self.get(id)
            .map(Template::instantiate)
            .ok_or_else(|| KernelError::not_found(format!("template {id}")))
    }
}

// ============================================================================
// Built-in templates
// ============================================================================

fn paragraph(content: impl Into<String>) -> Block {
    Block::text(TextFormat::Paragraph, content)
}

fn separator() -> Block {
    Block::new(BlockData::Separator(SeparatorData::default()))
}

fn alert(variant: Variant, title: &str, message: &str) -> Block {
    Block::new(BlockData::Alert(AlertData {
        variant,
        title: Some(title.into()),
        message: message.into(),
    }))
}

fn cta(title: &str, label: &str, url: &str) -> Block {
    Block::new(BlockData::CtaBanner(CtaBannerData {
        title: title.into(),
        description: None,
        button_label: label.into(),
        button_url: url.into(),
    }))
}

fn pros_cons() -> Block {
    Block::new(BlockData::ProsCons(ProsConsData {
        pros: vec!["Primera ventaja".into(), "Segunda ventaja".into()],
        cons: vec!["Primera desventaja".into()],
        ..Default::default()
    }))
}

fn tutorial() -> Template {
    let checklist = ChecklistData {
        title: Some("Lo que necesitas".into()),
        items: ["Requisito 1", "Requisito 2", "Requisito 3"]
            .into_iter()
            .map(|text| ChecklistItem {
                id: BlockId::mint(),
                text: text.into(),
                checked: false,
            })
            .collect(),
    };
    Template {
        id: "tutorial".into(),
        name: "Tutorial paso a paso".into(),
        category: TemplateCategory::Tutorial,
        description: "Requisitos, pasos numerados con código y conclusión".into(),
        blocks: vec![
            paragraph("Explica qué se va a conseguir al terminar el tutorial."),
            Block::new(BlockData::Checklist(checklist)),
            Block::text(TextFormat::H2, "Paso 1"),
            paragraph("Describe el primer paso."),
            Block::new(BlockData::Code(CodeData {
                code: "# tu código aquí".into(),
                language: "bash".into(),
                filename: None,
            })),
            Block::text(TextFormat::H2, "Paso 2"),
            paragraph("Describe el segundo paso."),
            alert(Variant::Warning, "Atención", "Señala el error más habitual en este paso."),
            Block::text(TextFormat::H2, "Conclusión"),
            paragraph("Resume lo aprendido y propone el siguiente paso."),
        ],
    }
}

fn comparison() -> Template {
    let features = vec!["Precio".to_string(), "Facilidad de uso".into(), "Soporte".into()];
    let items = ["Opción A", "Opción B"]
        .into_iter()
        .map(|name| ComparisonItem {
            name: name.into(),
            features: features
                .iter()
                .map(|f| (f.clone(), json!(true)))
                .collect(),
        })
        .collect();
    Template {
        id: "comparison".into(),
        name: "Comparativa".into(),
        category: TemplateCategory::Comparison,
        description: "Tabla comparativa, ventajas y desventajas y veredicto".into(),
        blocks: vec![
            paragraph("Presenta las opciones que se comparan y el criterio."),
            Block::new(BlockData::Comparison(ComparisonData { features, items })),
            pros_cons(),
            Block::text(TextFormat::H2, "Veredicto"),
            paragraph("Recomienda una opción según el perfil del lector."),
        ],
    }
}

fn guide() -> Template {
    let faq = FaqData {
        title: Some("Preguntas frecuentes".into()),
        items: (1..=3)
            .map(|i| FaqItem {
                id: BlockId::mint(),
                question: format!("Pregunta {i}"),
                answer: format!("Respuesta {i}"),
            })
            .collect(),
    };
    Template {
        id: "guide".into(),
        name: "Guía completa".into(),
        category: TemplateCategory::Guide,
        description: "Secciones temáticas con preguntas frecuentes al final".into(),
        blocks: vec![
            paragraph("Introduce el tema y a quién va dirigida la guía."),
            Block::text(TextFormat::H2, "Qué es"),
            paragraph("Define el concepto principal."),
            Block::text(TextFormat::H2, "Cómo empezar"),
            paragraph("Da los primeros pasos concretos."),
            Block::new(BlockData::Quote(QuoteData {
                text: "Una cita que resuma la idea central.".into(),
                author: None,
                source: None,
            })),
            Block::new(BlockData::Faq(faq)),
        ],
    }
}

fn review() -> Template {
    Template {
        id: "review".into(),
        name: "Reseña".into(),
        category: TemplateCategory::Review,
        description: "Valoración con datos clave, pros y contras y opinión".into(),
        blocks: vec![
            Block::new(BlockData::Image(ImageData {
                url: "https://placehold.co/1200x630?text=Producto".into(),
                alt: "Imagen del producto reseñado".into(),
                ..Default::default()
            })),
            paragraph("Presenta el producto y el contexto de la prueba."),
            Block::new(BlockData::Stats(StatsData {
                items: ["Precio", "Valoración", "Duración de la prueba"]
                    .into_iter()
                    .map(|label| StatItem {
                        label: label.into(),
                        value: "-".into(),
                        ..Default::default()
                    })
                    .collect(),
            })),
            pros_cons(),
            Block::new(BlockData::Testimonial(TestimonialData {
                quote: "Opinión de un usuario real.".into(),
                author: "Nombre".into(),
                ..Default::default()
            })),
            Block::text(TextFormat::H2, "Nuestra opinión"),
            paragraph("Cierra con una recomendación clara."),
        ],
    }
}

fn showcase() -> Template {
    Template {
        id: "showcase".into(),
        name: "Escaparate de producto".into(),
        category: TemplateCategory::Showcase,
        description: "Producto destacado, galería, características y llamada a la acción".into(),
        blocks: vec![
            Block::new(BlockData::ProductShowcase(ProductShowcaseData {
                name: "Producto".into(),
                description: "Describe el producto en una frase.".into(),
                image_url: "https://placehold.co/800x800?text=Producto".into(),
                features: vec!["Característica 1".into(), "Característica 2".into()],
                ..Default::default()
            })),
            Block::new(BlockData::ImagesGrid(ImagesGridData {
                images: (1..=3)
                    .map(|i| GridImage {
                        url: format!("https://placehold.co/600x400?text=Foto+{i}"),
                        alt: format!("Foto {i}"),
                        caption: None,
                    })
                    .collect(),
                columns: Some(3),
            })),
            Block::new(BlockData::FeatureList(FeatureListData {
                title: Some("Características".into()),
                items: (1..=3)
                    .map(|i| FeatureItem {
                        id: BlockId::mint(),
                        title: format!("Característica {i}"),
                        description: "Qué aporta al usuario.".into(),
                        icon: Some("check".into()),
                    })
                    .collect(),
            })),
            cta("¿Lo quieres?", "Comprar ahora", "https://example.com"),
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use vitrina_types::{BlockKind, walk::collect_ids};

    fn assert_unique(blocks: &[Block]) {
        let ids = collect_ids(blocks);
        let distinct: HashSet<&BlockId> = ids.iter().collect();
        assert_eq!(distinct.len(), ids.len(), "duplicate ids");
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    // ── procedural list ──

    #[test]
    fn test_list_numbered_thirty_items() {
        let template = list_numbered(30);
        assert_eq!(
            template.blocks.len(),
            30 * 4 + LIST_INTRO_BLOCKS + LIST_OUTRO_BLOCKS
        );
        let blocks = template.instantiate();
        assert_eq!(blocks.len(), 125);
        assert_unique(&blocks);
    }

    #[test]
    fn test_list_unit_shape_and_numbering() {
        let blocks = list_numbered(3).blocks;
        let unit = &blocks[LIST_INTRO_BLOCKS + LIST_UNIT_BLOCKS..LIST_INTRO_BLOCKS + 2 * LIST_UNIT_BLOCKS];
        let kinds: Vec<Option<BlockKind>> = unit.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            [
                Some(BlockKind::Text),
                Some(BlockKind::Image),
                Some(BlockKind::Text),
                Some(BlockKind::Separator)
            ]
        );
        match &unit[0].data {
            BlockData::Text(t) => {
                assert_eq!(t.format, TextFormat::H2);
                assert!(t.content.starts_with("2. "));
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn test_list_numbered_zero_is_intro_and_outro() {
        assert_eq!(list_numbered(0).blocks.len(), LIST_INTRO_BLOCKS + LIST_OUTRO_BLOCKS);
    }

    // ── library ──

    #[test]
    fn test_builtin_covers_every_category() {
        let library = TemplateLibrary::builtin();
        for category in TemplateCategory::all() {
            assert!(
                !library.by_category(category).is_empty(),
                "no template for {category}"
            );
        }
        assert!(library.get("list-30").is_some());
        assert_eq!(TemplateCategory::from_str("Review"), Some(TemplateCategory::Review));
    }

    #[test]
    fn test_instantiate_twice_never_shares_ids() {
        let library = TemplateLibrary::builtin();
        let source = collect_ids(&library.get("guide").unwrap().blocks);
        let a = library.instantiate("guide").unwrap();
        let b = library.instantiate("guide").unwrap();
        let mut all = a.clone();
        all.extend(b);
        assert_unique(&all);
        assert!(collect_ids(&all).iter().all(|id| !source.contains(id)));
        // Nested faq items are refreshed too.
        assert_eq!(collect_ids(&a).len(), source.len());
    }

    #[test]
    fn test_instantiate_unknown_template() {
        let library = TemplateLibrary::builtin();
        assert!(matches!(
            library.instantiate("nope"),
            Err(KernelError::NotFound(_))
        ));
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut library = TemplateLibrary::new();
        library.register(list_numbered(5));
        let mut custom = list_numbered(2);
        custom.id = "list-5".into();
        library.register(custom);
        assert_eq!(library.list().len(), 1);
        assert_eq!(library.get("list-5").unwrap().blocks.len(), 13);
    }
}
