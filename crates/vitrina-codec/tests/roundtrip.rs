//! End-to-end codec behavior: export → import round-trips and Markdown
//! projection checked with a real CommonMark parser.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use serde_json::{Value, json};
use strum::IntoEnumIterator;
use vitrina_codec::{ImportOptions, commit, export_json, export_json_string, export_markdown, import_str};
use vitrina_types::*;

fn rich_document() -> BlogDocument {
    let blocks = vec![
        Block::with_id(
            "intro",
            BlockData::Text(TextData {
                format: TextFormat::H2,
                content: "Hola".into(),
            }),
        ),
        Block::with_id(
            "p1",
            BlockData::Text(TextData {
                format: TextFormat::Paragraph,
                content: "<p>Usa <strong>Figma</strong> o <a href=\"https://penpot.app\">Penpot</a>.</p>".into(),
            }),
        )
        .styled(BlockStyle {
            align: Some(Align::Center),
            width: Some(Width::Full),
        }),
        Block::with_id(
            "img",
            BlockData::Image(ImageData {
                url: "https://cdn.example.com/cover.png".into(),
                alt: "Portada".into(),
                caption: Some("La portada".into()),
                link: None,
            }),
        ),
        Block::with_id(
            "faq",
            BlockData::Faq(FaqData {
                title: Some("Preguntas".into()),
                items: vec![
                    FaqItem {
                        id: BlockId::new("q1"),
                        question: "¿Es gratis?".into(),
                        answer: "Sí.".into(),
                    },
                    FaqItem {
                        id: BlockId::new("q2"),
                        question: "¿Funciona offline?".into(),
                        answer: "No.".into(),
                    },
                ],
            }),
        ),
        Block::with_id(
            "grid",
            BlockData::ProgramsGrid(ProgramsGridData {
                program_ids: vec!["figma".into(), "penpot".into()],
                columns: Some(2),
            }),
        ),
        Block::with_id(
            "tbl",
            BlockData::Table(TableData {
                headers: vec!["Plan".into(), "Precio".into()],
                rows: vec![vec!["Pro".into(), "12 €".into()]],
                caption: None,
            }),
        ),
        Block::with_id(
            "alien",
            BlockData::from_tagged("hologram", json!({"beam": [1, 2, 3]})),
        ),
    ];
    BlogDocument::new(
        DocumentMetadata {
            titulo: "Las mejores herramientas de diseño para 2024".into(),
            slug: "mejores-herramientas-diseno-2024".into(),
            descripcion_corta: "Comparamos las herramientas de diseño más usadas.".into(),
            autor: "Equipo".into(),
            tags: vec!["diseño".into(), "herramientas".into()],
            imagen_portada_url: "https://cdn.example.com/cover.png".into(),
            imagen_portada_alt: "Portada".into(),
            publicado: true,
            fecha_publicacion: Some("2024-05-01".into()),
            fecha_actualizacion: None,
        },
        Document::from_blocks(blocks),
    )
}

// ============================================================================
// JSON round-trip
// ============================================================================

#[test]
fn test_export_import_roundtrip_is_clean() {
    let doc = rich_document();
    let imported = commit(export_json(&doc), &ImportOptions::default()).expect("own export imports");

    assert!(imported.report.errors.is_empty());
    assert!(imported.report.manual_fields.is_empty());
    assert_eq!(imported.minted_ids, 0);
    assert_eq!(imported.document, doc);
}

/// A payload with every field set, including optional ones.
fn populated_payload(kind: BlockKind) -> Value {
    match kind {
        BlockKind::Text => json!({"format": "h3", "content": "<p>Texto <em>rico</em></p>"}),
        BlockKind::Image => json!({
            "url": "https://cdn.example.com/a.png", "alt": "A",
            "caption": "Pie", "link": "https://example.com"
        }),
        BlockKind::Video => json!({
            "url": "https://www.youtube.com/watch?v=abc123", "title": "Demo",
            "caption": "Pie", "poster": "https://cdn.example.com/p.png"
        }),
        BlockKind::Code => json!({"code": "fn main() {}", "language": "rust", "filename": "main.rs"}),
        BlockKind::Table => json!({
            "headers": ["Plan", "Precio"], "rows": [["Pro", "12 €"], ["Team", "30 €"]],
            "caption": "Precios"
        }),
        BlockKind::Alert => json!({"variant": "warning", "title": "Ojo", "message": "Cuidado."}),
        BlockKind::Tabs => json!({"items": [
            {"id": "t1", "label": "Uno", "content": "<p>1</p>"},
            {"id": "t2", "label": "Dos", "content": "<p>2</p>"}
        ]}),
        BlockKind::Accordion => json!({"items": [
            {"id": "a1", "title": "Uno", "content": "<p>1</p>"}
        ]}),
        BlockKind::Separator => json!({"variant": "dotted"}),
        BlockKind::Quote => json!({"text": "Menos es más.", "author": "Mies", "source": "Entrevista"}),
        BlockKind::Stats => json!({"items": [
            {"label": "Usuarios", "value": "10k", "icon": "users", "description": "Activos"}
        ]}),
        BlockKind::Timeline => json!({"items": [
            {"id": "tl1", "date": "2023", "title": "Inicio", "description": "Arranque"}
        ]}),
        BlockKind::Comparison => json!({
            "features": ["Precio", "Offline"],
            "items": [
                {"name": "Figma", "features": {"Precio": "Gratis", "Offline": false}},
                {"name": "Sketch", "features": {"Precio": 99, "Offline": true}}
            ]
        }),
        BlockKind::Callout => json!({
            "variant": "success", "title": "Bien", "content": "<p>Hecho</p>", "icon": "check"
        }),
        BlockKind::Button => json!({
            "label": "Ir", "url": "https://example.com", "variant": "primary", "newTab": true
        }),
        BlockKind::Embed => json!({"url": "https://codepen.io/x", "title": "Pen", "height": 480}),
        BlockKind::Tweet => json!({"url": "https://x.com/a/status/1"}),
        BlockKind::FileDownload => json!({
            "url": "https://cdn.example.com/guia.pdf", "fileName": "guia.pdf",
            "fileSize": "2 MB", "description": "Guía"
        }),
        BlockKind::Faq => json!({"title": "Preguntas", "items": [
            {"id": "q1", "question": "¿Sí?", "answer": "Sí."}
        ]}),
        BlockKind::ProsCons => json!({
            "pros": ["Rápido"], "cons": ["Caro"], "prosTitle": "A favor", "consTitle": "En contra"
        }),
        BlockKind::FeatureList => json!({"title": "Funciones", "items": [
            {"id": "f1", "title": "Sync", "description": "En la nube", "icon": "cloud"}
        ]}),
        BlockKind::BeforeAfter => json!({
            "beforeUrl": "https://cdn.example.com/b.png", "afterUrl": "https://cdn.example.com/a.png",
            "beforeLabel": "Antes", "afterLabel": "Después"
        }),
        BlockKind::IconGrid => json!({"columns": 3, "items": [
            {"id": "i1", "icon": "star", "title": "Estrella", "description": "Brilla"}
        ]}),
        BlockKind::CategoryCard => json!({
            "categoryId": "diseno", "title": "Diseño", "description": "Todo diseño",
            "imageUrl": "https://cdn.example.com/c.png", "url": "/categorias/diseno"
        }),
        BlockKind::AuthorBio => json!({
            "name": "Ana", "bio": "Diseñadora.", "avatarUrl": "https://cdn.example.com/ana.png",
            "role": "Editora", "website": "https://ana.dev"
        }),
        BlockKind::Poll => json!({"question": "¿Cuál?", "options": [
            {"id": "o1", "label": "Figma", "votes": 12},
            {"id": "o2", "label": "Penpot", "votes": 7}
        ]}),
        BlockKind::ProgressBar => json!({"items": [
            {"id": "p1", "label": "Rust", "value": 42.5, "max": 50.0}
        ]}),
        BlockKind::Checklist => json!({"title": "Pasos", "items": [
            {"id": "c1", "text": "Instalar", "checked": true},
            {"id": "c2", "text": "Configurar", "checked": false}
        ]}),
        BlockKind::Changelog => json!({"entries": [
            {"id": "v1", "version": "1.0.0", "date": "2024-01-01", "changes": ["Inicial"]}
        ]}),
        BlockKind::PricingTable => json!({"plans": [{
            "id": "pl1", "name": "Pro", "price": "12 €", "period": "mes",
            "features": ["Todo"], "highlighted": true,
            "ctaLabel": "Comprar", "ctaUrl": "https://example.com/pro"
        }]}),
        BlockKind::Testimonial => json!({
            "quote": "Genial.", "author": "Luis", "role": "CTO",
            "avatarUrl": "https://cdn.example.com/l.png", "rating": 5
        }),
        BlockKind::TipBox => json!({"title": "Consejo", "content": "<p>Guarda a menudo</p>"}),
        BlockKind::CtaBanner => json!({
            "title": "Únete", "description": "Gratis", "buttonLabel": "Entrar",
            "buttonUrl": "https://example.com/alta"
        }),
        BlockKind::ProductShowcase => json!({
            "name": "Tableta", "description": "Para dibujar", "imageUrl": "https://cdn.example.com/t.png",
            "price": "199 €", "url": "https://example.com/t", "features": ["Presión", "Bluetooth"]
        }),
        BlockKind::ProgramCard => json!({"programId": "figma"}),
        BlockKind::ProgramsGrid => json!({"programIds": ["figma", "penpot"], "columns": 2}),
        BlockKind::BlogCard => json!({"blogId": "post-1"}),
        BlockKind::BlogsGrid => json!({"blogIds": ["post-1", "post-2"], "columns": 3}),
        BlockKind::ImagesGrid => json!({"columns": 2, "images": [
            {"url": "https://cdn.example.com/1.png", "alt": "1", "caption": "Uno"},
            {"url": "https://cdn.example.com/2.png", "alt": "2"}
        ]}),
        BlockKind::DividerText => json!({"text": "o bien"}),
    }
}

#[test]
fn test_every_kind_roundtrips_populated() {
    let blocks: Vec<Block> = BlockKind::iter()
        .map(|kind| {
            let data = BlockData::from_tagged(kind.as_str(), populated_payload(kind));
            assert_eq!(data.kind(), Some(kind), "{kind} payload failed to decode");
            assert_ne!(
                data,
                BlockData::from_tagged(kind.as_str(), json!({})),
                "{kind} payload is empty"
            );
            Block::with_id(format!("b-{kind}"), data)
        })
        .collect();
    let doc = BlogDocument::new(rich_document().metadata, Document::from_blocks(blocks));

    let imported = commit(export_json(&doc), &ImportOptions::default()).expect("own export imports");
    assert!(imported.report.warnings.is_empty(), "{:?}", imported.report.warnings);
    assert!(imported.report.manual_fields.is_empty());
    assert_eq!(imported.minted_ids, 0);
    assert_eq!(imported.document, doc);
}

#[test]
fn test_roundtrip_through_text() {
    let doc = rich_document();
    let text = export_json_string(&doc);
    let imported = import_str(&text, &ImportOptions::default()).unwrap();
    assert_eq!(imported.document, doc);
    assert_eq!(export_json_string(&imported.document), text);
}

#[test]
fn test_missing_slug_single_error() {
    let input = json!({
        "metadata": {"titulo": "Título", "descripcion_corta": "Desc"},
        "bloques": []
    });
    let err = commit(input, &ImportOptions::default()).unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].path.contains("slug"));
}

#[test]
fn test_foreign_document_flags_references() {
    let mut value = export_json(&rich_document());
    value.as_object_mut().unwrap().remove("origen");
    let imported = commit(value, &ImportOptions::default()).unwrap();
    let flagged: Vec<&str> = imported
        .report
        .manual_fields
        .iter()
        .map(|m| m.path.as_str())
        .collect();
    assert_eq!(flagged, ["bloques[2]", "bloques[4]"]);
}

// ============================================================================
// Markdown projection
// ============================================================================

fn parse(md: &str) -> Vec<Event<'_>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    Parser::new_ext(md, options).collect()
}

#[test]
fn test_markdown_structure_parses() {
    let md = export_markdown(&rich_document());
    let events = parse(&md);

    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::Start(Tag::MetadataBlock(_))))
    );
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Start(Tag::Heading {
            level: HeadingLevel::H2,
            ..
        })
    )));
    assert!(events.iter().any(
        |e| matches!(e, Event::Start(Tag::Image { dest_url, .. }) if dest_url.as_ref() == "https://cdn.example.com/cover.png")
    ));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::Start(Tag::Table(_))))
    );
    assert!(events.iter().any(|e| matches!(e, Event::Start(Tag::Strong))));
    assert!(events.iter().any(
        |e| matches!(e, Event::Start(Tag::Link { dest_url, .. }) if dest_url.as_ref() == "https://penpot.app")
    ));
}

#[test]
fn test_markdown_never_drops_blocks() {
    let md = export_markdown(&rich_document());
    assert!(md.contains("<!-- unsupported block: programs-grid -->"));
    assert!(md.contains("<!-- unsupported block: hologram -->"));
    assert!(md.contains("## Hola\n\n"));
}
