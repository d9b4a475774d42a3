//! One-way Markdown projection.
//!
//! Intentionally lossy: styles, ids and interactive widgets do not survive.
//! Every block produces *something*; kinds without a Markdown idiom degrade
//! to an HTML comment naming the omitted type.

use std::fmt::Write;

use serde_json::Value;
use vitrina_types::{Block, BlockData, BlogDocument, DocumentMetadata, TextFormat};

use crate::inline;

/// Render a whole document: frontmatter, then each block in order.
pub fn export_markdown(doc: &BlogDocument) -> String {
    let mut out = frontmatter(&doc.metadata);
    for block in &doc.bloques {
        out.push_str(&block_to_markdown(block));
    }
    out
}

/// Quote a frontmatter scalar (JSON string syntax is valid YAML).
fn yaml_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn frontmatter(meta: &DocumentMetadata) -> String {
    let tags = meta
        .tags
        .iter()
        .map(|t| yaml_str(t))
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = String::from("---\n");
    let _ = writeln!(out, "title: {}", yaml_str(&meta.titulo));
    let _ = writeln!(out, "slug: {}", yaml_str(&meta.slug));
    let _ = writeln!(out, "description: {}", yaml_str(&meta.descripcion_corta));
    let _ = writeln!(out, "author: {}", yaml_str(&meta.autor));
    let _ = writeln!(
        out,
        "date: {}",
        yaml_str(meta.fecha_publicacion.as_deref().unwrap_or_default())
    );
    let _ = writeln!(out, "published: {}", meta.publicado);
    let _ = writeln!(out, "tags: [{tags}]");
    let _ = writeln!(out, "cover: {}", yaml_str(&meta.imagen_portada_url));
    let _ = writeln!(out, "coverAlt: {}", yaml_str(&meta.imagen_portada_alt));
    out.push_str("---\n\n");
    out
}

// ============================================================================
// Helpers
// ============================================================================

fn unsupported(tag: &str) -> String {
    format!("<!-- unsupported block: {tag} -->")
}

/// Prefix every line with `> ` (blank lines become `>`).
fn blockquote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn titled_quote(title: Option<&str>, body_html: &str) -> String {
    let body = inline::to_markdown(body_html);
    match title.filter(|t| !t.trim().is_empty()) {
        Some(title) => blockquote(&format!("**{}**\n\n{body}", title.trim())),
        None => blockquote(&body),
    }
}

fn link(label: &str, url: &str) -> String {
    let label = if label.trim().is_empty() { url } else { label.trim() };
    format!("[{label}]({url})")
}

fn image(alt: &str, url: &str) -> String {
    format!("![{alt}]({url})")
}

fn caption_line(out: &mut String, caption: Option<&str>) {
    if let Some(caption) = caption.map(str::trim).filter(|c| !c.is_empty()) {
        let _ = write!(out, "\n*{caption}*");
    }
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn pipe_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let width = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if width == 0 {
        return String::new();
    }
    let row_line = |cells: &[String]| {
        let mut line = String::from("|");
        for idx in 0..width {
            let value = cells.get(idx).map(String::as_str).unwrap_or_default();
            let _ = write!(line, " {} |", cell(value));
        }
        line
    };
    let mut lines = vec![row_line(headers), format!("|{}", " --- |".repeat(width))];
    lines.extend(rows.iter().map(|r| row_line(r)));
    lines.join("\n")
}

fn comparison_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(true)) => "✓".to_string(),
        Some(Value::Bool(false)) => "✗".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

fn bullets<I: IntoIterator<Item = String>>(items: I) -> String {
    items
        .into_iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_block(format: TextFormat, content: &str) -> String {
    match format {
        TextFormat::Paragraph => inline::to_markdown(content),
        TextFormat::Ul => bullets(
            inline::list_items(content)
                .iter()
                .map(|item| inline::to_markdown(item)),
        ),
        TextFormat::Ol => inline::list_items(content)
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{}. {}", idx + 1, inline::to_markdown(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        TextFormat::Quote => blockquote(&inline::to_markdown(content)),
        TextFormat::Code => format!("```\n{}\n```", inline::strip_tags(content).trim_end()),
        heading => {
            let level = heading.heading_level().unwrap_or(1) as usize;
            let text = inline::to_markdown(content).replace('\n', " ");
            format!("{} {text}", "#".repeat(level))
        }
    }
}

// ============================================================================
// Per-block mapping
// ============================================================================

/// Markdown for one block, always terminated by a blank line.
pub fn block_to_markdown(block: &Block) -> String {
    let body = match &block.data {
        BlockData::Text(d) => text_block(d.format, &d.content),
        BlockData::Image(d) => {
            let mut out = image(&d.alt, &d.url);
            caption_line(&mut out, d.caption.as_deref());
            out
        }
        BlockData::ImagesGrid(d) => d
            .images
            .iter()
            .map(|img| image(&img.alt, &img.url))
            .collect::<Vec<_>>()
            .join("\n"),
        BlockData::BeforeAfter(d) => [
            image(d.before_label.as_deref().unwrap_or("Antes"), &d.before_url),
            image(d.after_label.as_deref().unwrap_or("Después"), &d.after_url),
        ]
        .join("\n"),
        BlockData::Video(d) => {
            let mut out = link(d.title.as_deref().unwrap_or_default(), &d.url);
            caption_line(&mut out, d.caption.as_deref());
            out
        }
        BlockData::Embed(d) => link(d.title.as_deref().unwrap_or_default(), &d.url),
        BlockData::Tweet(d) => link("", &d.url),
        BlockData::FileDownload(d) => {
            let mut out = link(&d.file_name, &d.url);
            if let Some(size) = d.file_size.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(out, " ({size})");
            }
            if let Some(description) = d.description.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(out, "\n\n{description}");
            }
            out
        }
        BlockData::Code(d) => format!("```{}\n{}\n```", d.language.trim(), d.code.trim_end()),
        BlockData::Table(d) => {
            let mut out = pipe_table(&d.headers, &d.rows);
            if let Some(caption) = d.caption.as_deref().filter(|c| !c.trim().is_empty()) {
                let _ = write!(out, "\n\n*{}*", caption.trim());
            }
            out
        }
        BlockData::Alert(d) => titled_quote(d.title.as_deref(), &d.message),
        BlockData::Callout(d) => titled_quote(d.title.as_deref(), &d.content),
        BlockData::TipBox(d) => titled_quote(d.title.as_deref(), &d.content),
        BlockData::Separator(_) => "---".to_string(),
        BlockData::DividerText(d) => format!("--- {} ---", d.text.trim()),
        BlockData::Quote(d) => {
            let mut text = inline::to_markdown(&d.text);
            let attribution: Vec<&str> = [d.author.as_deref(), d.source.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.trim().is_empty())
                .collect();
            if !attribution.is_empty() {
                let _ = write!(text, "\n\n— {}", attribution.join(", "));
            }
            blockquote(&text)
        }
        BlockData::Testimonial(d) => {
            let mut text = inline::to_markdown(&d.quote);
            let _ = write!(text, "\n\n— {}", d.author.trim());
            if let Some(role) = d.role.as_deref().filter(|r| !r.trim().is_empty()) {
                let _ = write!(text, ", {}", role.trim());
            }
            blockquote(&text)
        }
        BlockData::Faq(d) => {
            let mut parts = Vec::new();
            if let Some(title) = d.title.as_deref().filter(|t| !t.trim().is_empty()) {
                parts.push(format!("### {}", title.trim()));
            }
            for item in &d.items {
                parts.push(format!("**{}**", item.question.trim()));
                parts.push(inline::to_markdown(&item.answer));
            }
            parts.join("\n\n")
        }
        BlockData::ProsCons(d) => format!(
            "**{}**\n\n{}\n\n**{}**\n\n{}",
            d.pros_title.as_deref().unwrap_or("Ventajas"),
            bullets(d.pros.iter().map(|p| format!("✓ {p}"))),
            d.cons_title.as_deref().unwrap_or("Desventajas"),
            bullets(d.cons.iter().map(|c| format!("✗ {c}"))),
        ),
        BlockData::Comparison(d) => {
            let mut headers = vec!["Característica".to_string()];
            headers.extend(d.items.iter().map(|item| item.name.clone()));
            let rows: Vec<Vec<String>> = d
                .features
                .iter()
                .map(|feature| {
                    let mut row = vec![feature.clone()];
                    row.extend(
                        d.items
                            .iter()
                            .map(|item| comparison_cell(item.features.get(feature))),
                    );
                    row
                })
                .collect();
            pipe_table(&headers, &rows)
        }
        BlockData::FeatureList(d) => {
            let list = bullets(d.items.iter().map(|item| {
                if item.description.trim().is_empty() {
                    format!("**{}**", item.title.trim())
                } else {
                    format!("**{}**: {}", item.title.trim(), item.description.trim())
                }
            }));
            match d.title.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(title) => format!("### {}\n\n{list}", title.trim()),
                None => list,
            }
        }
        BlockData::Checklist(d) => {
            let list = d
                .items
                .iter()
                .map(|item| format!("- [{}] {}", if item.checked { "x" } else { " " }, item.text))
                .collect::<Vec<_>>()
                .join("\n");
            match d.title.as_deref().filter(|t| !t.trim().is_empty()) {
                Some(title) => format!("**{}**\n\n{list}", title.trim()),
                None => list,
            }
        }
        BlockData::Stats(d) => bullets(
            d.items
                .iter()
                .map(|stat| format!("**{}** {}", stat.value, stat.label)),
        ),
        BlockData::Timeline(d) => bullets(d.items.iter().map(|item| {
            let mut line = format!("**{}** {}", item.date, item.title);
            if !item.description.trim().is_empty() {
                let _ = write!(line, ": {}", inline::to_markdown(&item.description));
            }
            line
        })),
        BlockData::Changelog(d) => d
            .entries
            .iter()
            .map(|entry| {
                let mut out = format!("- **{}** ({})", entry.version, entry.date);
                for change in &entry.changes {
                    let _ = write!(out, "\n  - {change}");
                }
                out
            })
            .collect::<Vec<_>>()
            .join("\n"),
        BlockData::Button(d) => link(&d.label, &d.url),
        BlockData::CtaBanner(d) => {
            let mut out = format!("**{}**", d.title.trim());
            if let Some(description) = d.description.as_deref().filter(|s| !s.trim().is_empty()) {
                let _ = write!(out, "\n\n{}", description.trim());
            }
            let _ = write!(out, "\n\n{}", link(&d.button_label, &d.button_url));
            out
        }
        BlockData::Tabs(_)
        | BlockData::Accordion(_)
        | BlockData::IconGrid(_)
        | BlockData::CategoryCard(_)
        | BlockData::AuthorBio(_)
        | BlockData::Poll(_)
        | BlockData::ProgressBar(_)
        | BlockData::PricingTable(_)
        | BlockData::ProductShowcase(_)
        | BlockData::ProgramCard(_)
        | BlockData::ProgramsGrid(_)
        | BlockData::BlogCard(_)
        | BlockData::BlogsGrid(_)
        | BlockData::Unknown(_) => unsupported(block.tag()),
    };
    format!("{body}\n\n")
}

// ============================================================================
// Tests
// ============================================================================
