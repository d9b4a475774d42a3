//! Per-kind views: one function per block kind, each producing a [`Node`].
//!
//! Views may return [`RenderError`] for payloads they cannot show at all;
//! the dispatcher turns that (or a panic) into an inline placeholder.

use vitrina_types::*;

use crate::comparison::{Cell, ComparisonMatrix};
use crate::error::{RenderError, Result};
use crate::icons::IconLookup;
use crate::node::{Element, Node, el, text};
use crate::resolve::Record;
use crate::state::{AccordionState, TabsState};
use crate::video::VideoSource;

/// What a view may consult besides its payload.
pub(crate) struct Ctx<'a> {
    pub icons: &'a dyn IconLookup,
    /// Resolved records for referential kinds, in requested order.
    pub records: &'a [Record],
}

impl Ctx<'_> {
    fn icon(&self, name: &str) -> Node {
        let icon = self.icons.lookup(name);
        el("span")
            .class("icon")
            .attr("data-icon", icon.as_str())
            .attr("aria-hidden", "true")
            .text(icon.glyph())
            .into()
    }
}

fn require(block_type: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(RenderError::missing_field(block_type, field))
    } else {
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn columns_attr(element: Element, columns: Option<u8>) -> Element {
    element.attr("data-columns", columns.unwrap_or(3).clamp(1, 6).to_string())
}

fn figcaption(caption: Option<&str>) -> Option<Node> {
    non_empty(caption).map(|c| el("figcaption").text(c).into())
}

// ============================================================================
// Dispatch
// ============================================================================

pub(crate) fn render_data(data: &BlockData, cx: &Ctx<'_>) -> Result<Node> {
    let node = match data {
        BlockData::Text(d) => text_block(d),
        BlockData::Image(d) => image(d)?,
        BlockData::Video(d) => video(d),
        BlockData::Code(d) => code(d),
        BlockData::Table(d) => table(d),
        BlockData::Alert(d) => alert(d),
        BlockData::Tabs(d) => tabs(d),
        BlockData::Accordion(d) => accordion(d),
        BlockData::Separator(d) => separator(d),
        BlockData::Quote(d) => quote(d),
        BlockData::Stats(d) => stats(d, cx),
        BlockData::Timeline(d) => timeline(d),
        BlockData::Comparison(d) => comparison(d),
        BlockData::Callout(d) => callout(d, cx),
        BlockData::Button(d) => button(d)?,
        BlockData::Embed(d) => embed(d)?,
        BlockData::Tweet(d) => tweet(d)?,
        BlockData::FileDownload(d) => file_download(d)?,
        BlockData::Faq(d) => faq(d),
        BlockData::ProsCons(d) => pros_cons(d),
        BlockData::FeatureList(d) => feature_list(d, cx),
        BlockData::BeforeAfter(d) => before_after(d)?,
        BlockData::IconGrid(d) => icon_grid(d, cx),
        BlockData::CategoryCard(d) => category_card(d),
        BlockData::AuthorBio(d) => author_bio(d),
        BlockData::Poll(d) => poll(d),
        BlockData::ProgressBar(d) => progress_bar(d),
        BlockData::Checklist(d) => checklist(d),
        BlockData::Changelog(d) => changelog(d),
        BlockData::PricingTable(d) => pricing_table(d),
        BlockData::Testimonial(d) => testimonial(d),
        BlockData::TipBox(d) => tip_box(d, cx),
        BlockData::CtaBanner(d) => cta_banner(d),
        BlockData::ProductShowcase(d) => product_showcase(d),
        BlockData::ProgramCard(_) | BlockData::BlogCard(_) => {
            cx.records.first().map(card).unwrap_or_else(|| text(""))
        }
        BlockData::ProgramsGrid(d) => card_grid(cx.records, d.columns),
        BlockData::BlogsGrid(d) => card_grid(cx.records, d.columns),
        BlockData::ImagesGrid(d) => images_grid(d),
        BlockData::DividerText(d) => divider_text(d),
        BlockData::Unknown(u) => {
            return Err(RenderError::Malformed {
                block_type: u.kind.clone(),
                index: 0,
                message: u.error.clone().unwrap_or_default(),
            });
        }
    };
    Ok(node)
}

// ============================================================================
// Text & media
// ============================================================================

fn list(tag: &'static str, content: &str) -> Node {
    let trimmed = content.trim_start();
    if trimmed.starts_with("<ul") || trimmed.starts_with("<ol") {
        return el("div").class("text-list").child(Node::rich(content)).into();
    }
    if content.contains("<li") {
        return el(tag).child(Node::rich(content)).into();
    }
    el(tag)
        .children(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| el("li").child(Node::rich(line))),
        )
        .into()
}

fn text_block(d: &TextData) -> Node {
    match d.format {
        TextFormat::Paragraph => el("div").class("text-paragraph").child(Node::rich(&d.content)).into(),
        TextFormat::H1 => el("h1").child(Node::rich(&d.content)).into(),
        TextFormat::H2 => el("h2").child(Node::rich(&d.content)).into(),
        TextFormat::H3 => el("h3").child(Node::rich(&d.content)).into(),
        TextFormat::H4 => el("h4").child(Node::rich(&d.content)).into(),
        TextFormat::H5 => el("h5").child(Node::rich(&d.content)).into(),
        TextFormat::H6 => el("h6").child(Node::rich(&d.content)).into(),
        TextFormat::Ul => list("ul", &d.content),
        TextFormat::Ol => list("ol", &d.content),
        TextFormat::Quote => el("blockquote").child(Node::rich(&d.content)).into(),
        TextFormat::Code => el("pre").child(el("code").child(Node::rich(&d.content))).into(),
    }
}

fn image(d: &ImageData) -> Result<Node> {
    require("image", "url", &d.url)?;
    let img = el("img")
        .attr("src", &d.url)
        .attr("alt", &d.alt)
        .attr("loading", "lazy")
        .attr("data-lightbox", "true");
    let media: Node = match non_empty(d.link.as_deref()) {
        Some(href) => el("a").attr("href", href).child(img).into(),
        None => img.into(),
    };
    Ok(el("figure")
        .class("image")
        .child(media)
        .child_opt(figcaption(d.caption.as_deref()))
        .into())
}

fn video(d: &VideoData) -> Node {
    let player: Node = match VideoSource::classify(&d.url) {
        VideoSource::Native(src) => el("video")
            .attr("src", src)
            .attr("controls", "")
            .attr("preload", "metadata")
            .attr_opt("poster", d.poster.as_deref())
            .attr("data-lightbox", "true")
            .into(),
        VideoSource::Embed {
            platform,
            embed_url,
        } => el("iframe")
            .attr("src", embed_url)
            .attr("title", d.title.as_deref().unwrap_or(platform.as_str()))
            .attr("data-platform", platform.as_str())
            .attr("allowfullscreen", "")
            .attr("loading", "lazy")
            .into(),
        VideoSource::Unsupported => {
            return el("div")
                .class("placeholder placeholder-video")
                .text("Unsupported or invalid video URL")
                .into();
        }
    };
    el("figure")
        .class("video")
        .child(player)
        .child_opt(figcaption(d.caption.as_deref()))
        .into()
}

fn images_grid(d: &ImagesGridData) -> Node {
    columns_attr(el("div").class("images-grid"), d.columns)
        .children(d.images.iter().filter(|img| !img.url.trim().is_empty()).map(|img| {
            el("figure")
                .child(
                    el("img")
                        .attr("src", &img.url)
                        .attr("alt", &img.alt)
                        .attr("loading", "lazy"),
                )
                .child_opt(figcaption(img.caption.as_deref()))
        }))
        .into()
}

fn before_after(d: &BeforeAfterData) -> Result<Node> {
    require("before-after", "beforeUrl", &d.before_url)?;
    require("before-after", "afterUrl", &d.after_url)?;
    let side = |class: &'static str, url: &str, label: Option<&str>, fallback: &str| {
        el("figure")
            .class(class)
            .child(el("img").attr("src", url).attr("alt", label.unwrap_or(fallback)))
            .child(el("figcaption").text(label.unwrap_or(fallback)))
    };
    Ok(el("div")
        .class("before-after")
        .child(side("before", &d.before_url, non_empty(d.before_label.as_deref()), "Antes"))
        .child(side("after", &d.after_url, non_empty(d.after_label.as_deref()), "Después"))
        .into())
}

fn embed(d: &EmbedData) -> Result<Node> {
    require("embed", "url", &d.url)?;
    Ok(el("div")
        .class("embed")
        .child(
            el("iframe")
                .attr("src", &d.url)
                .attr_opt("title", d.title.as_deref())
                .attr("height", d.height.unwrap_or(400).to_string())
                .attr("loading", "lazy"),
        )
        .into())
}

fn tweet(d: &TweetData) -> Result<Node> {
    require("tweet", "url", &d.url)?;
    Ok(el("blockquote")
        .class("twitter-tweet")
        .child(el("a").attr("href", &d.url).text(&d.url))
        .into())
}

fn file_download(d: &FileDownloadData) -> Result<Node> {
    require("file-download", "url", &d.url)?;
    let name = if d.file_name.trim().is_empty() { &d.url } else { &d.file_name };
    Ok(el("div")
        .class("file-download")
        .child(
            el("a")
                .attr("href", &d.url)
                .attr("download", "")
                .child(el("span").class("file-name").text(name))
                .child_opt(
                    non_empty(d.file_size.as_deref())
                        .map(|size| el("span").class("file-size").text(size)),
                ),
        )
        .child_opt(non_empty(d.description.as_deref()).map(|desc| el("p").text(desc)))
        .into())
}

// ============================================================================
// Code & tables
// ============================================================================

fn code(d: &CodeData) -> Node {
    let language = if d.language.trim().is_empty() {
        "plaintext"
    } else {
        d.language.trim()
    };
    el("figure")
        .class("code")
        .child_opt(non_empty(d.filename.as_deref()).map(|f| el("figcaption").text(f)))
        .child(
            el("pre").child(
                el("code")
                    .class(format!("language-{language}"))
                    .text(&d.code),
            ),
        )
        .into()
}

fn table(d: &TableData) -> Node {
    let head = (!d.headers.is_empty()).then(|| {
        el("thead").child(el("tr").children(d.headers.iter().map(|h| el("th").text(h))))
    });
    el("table")
        .class("table")
        .child_opt(non_empty(d.caption.as_deref()).map(|c| el("caption").text(c)))
        .child_opt(head)
        .child(el("tbody").children(d.rows.iter().map(|row| {
            el("tr").children(row.iter().map(|cell| el("td").text(cell)))
        })))
        .into()
}

fn comparison(d: &ComparisonData) -> Node {
    let matrix = ComparisonMatrix::pivot(d);
    let head = el("tr")
        .child(el("th"))
        .children(matrix.columns.iter().map(|name| el("th").text(name)));
    let rows = matrix.rows.iter().map(|(label, cells)| {
        el("tr").child(el("th").text(label)).children(cells.iter().map(|cell| {
            let class = match cell {
                Cell::Check => "cell-check",
                Cell::Cross => "cell-cross",
                Cell::Text(_) => "cell-text",
                Cell::Missing => "cell-missing",
            };
            el("td").class(class).text(cell.display())
        }))
    });
    el("table")
        .class("comparison")
        .child(el("thead").child(head))
        .child(el("tbody").children(rows))
        .into()
}

// ============================================================================
// Notices
// ============================================================================

fn alert(d: &AlertData) -> Node {
    el("div")
        .class(format!("alert alert-{}", d.variant.as_str()))
        .attr("role", "alert")
        .child_opt(non_empty(d.title.as_deref()).map(|t| el("strong").text(t)))
        .child(el("div").child(Node::rich(&d.message)))
        .into()
}

fn callout(d: &CalloutData, cx: &Ctx<'_>) -> Node {
    let icon = non_empty(d.icon.as_deref()).unwrap_or(match d.variant {
        Variant::Info => "info",
        Variant::Success => "check",
        Variant::Warning | Variant::Error => "warning",
    });
    el("aside")
        .class(format!("callout callout-{}", d.variant.as_str()))
        .child(cx.icon(icon))
        .child_opt(non_empty(d.title.as_deref()).map(|t| el("strong").text(t)))
        .child(el("div").child(Node::rich(&d.content)))
        .into()
}

fn tip_box(d: &TipBoxData, cx: &Ctx<'_>) -> Node {
    el("aside")
        .class("tip-box")
        .child(cx.icon("lightbulb"))
        .child(el("strong").text(non_empty(d.title.as_deref()).unwrap_or("Consejo")))
        .child(el("div").child(Node::rich(&d.content)))
        .into()
}

// ============================================================================
// Interactive collections
// ============================================================================

fn tabs(d: &TabsData) -> Node {
    let state = TabsState::new(d);
    let list = el("div").attr("role", "tablist").children(d.items.iter().map(|item| {
        el("button")
            .attr("role", "tab")
            .attr("data-tab-id", item.id.as_str())
            .attr("aria-selected", state.is_active(&item.id).to_string())
            .text(&item.label)
    }));
    let panels = d.items.iter().map(|item| {
        let panel = el("div")
            .attr("role", "tabpanel")
            .attr("data-tab-id", item.id.as_str());
        let panel = if state.is_active(&item.id) {
            panel
        } else {
            panel.attr("hidden", "")
        };
        panel.child(Node::rich(&item.content))
    });
    el("div").class("tabs").child(list).children(panels).into()
}

fn accordion(d: &AccordionData) -> Node {
    let state = AccordionState::new(d);
    el("div")
        .class("accordion")
        .children(d.items.iter().map(|item| {
            let details = el("details").attr("data-item-id", item.id.as_str());
            let details = if state.is_open(&item.id) {
                details.attr("open", "")
            } else {
                details
            };
            details
                .child(el("summary").text(&item.title))
                .child(el("div").child(Node::rich(&item.content)))
        }))
        .into()
}

fn faq(d: &FaqData) -> Node {
    el("section")
        .class("faq")
        .child_opt(non_empty(d.title.as_deref()).map(|t| el("h3").text(t)))
        .children(d.items.iter().map(|item| {
            el("details")
                .attr("data-item-id", item.id.as_str())
                .child(el("summary").text(&item.question))
                .child(el("div").child(Node::rich(&item.answer)))
        }))
        .into()
}

fn checklist(d: &ChecklistData) -> Node {
    el("div")
        .class("checklist")
        .child_opt(non_empty(d.title.as_deref()).map(|t| el("h4").text(t)))
        .child(el("ul").children(d.items.iter().map(|item| {
            let input = el("input").attr("type", "checkbox").attr("disabled", "");
            let input = if item.checked {
                input.attr("checked", "")
            } else {
                input
            };
            el("li")
                .attr("data-item-id", item.id.as_str())
                .child(input)
                .child(el("span").text(&item.text))
        })))
        .into()
}

fn percent(value: f64, max: f64) -> u32 {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / max) * 100.0).clamp(0.0, 100.0).round() as u32
}

fn poll(d: &PollData) -> Node {
    let total: u64 = d.options.iter().map(|o| o.votes).sum();
    el("div")
        .class("poll")
        .child(el("p").class("poll-question").text(&d.question))
        .child(el("ul").children(d.options.iter().map(|option| {
            let pct = percent(option.votes as f64, total as f64);
            el("li")
                .attr("data-item-id", option.id.as_str())
                .child(el("span").text(&option.label))
                .child(el("span").class("poll-percent").text(format!("{pct}%")))
        })))
        .into()
}

fn progress_bar(d: &ProgressBarData) -> Node {
    el("div")
        .class("progress-list")
        .children(d.items.iter().map(|item| {
            let max = item.max.filter(|m| *m > 0.0).unwrap_or(100.0);
            let value = item.value.clamp(0.0, max);
            el("div")
                .class("progress-item")
                .attr("data-item-id", item.id.as_str())
                .child(el("span").text(&item.label))
                .child(
                    el("progress")
                        .attr("value", value.to_string())
                        .attr("max", max.to_string()),
                )
                .child(el("span").text(format!("{}%", percent(value, max))))
        }))
        .into()
}

// ============================================================================
// Structured projections
// ============================================================================

fn separator(d: &SeparatorData) -> Node {
    let style = match d.variant {
        SeparatorStyle::Solid => "solid",
        SeparatorStyle::Dashed => "dashed",
        SeparatorStyle::Dotted => "dotted",
        SeparatorStyle::Space => "space",
    };
    el("hr").class(format!("separator separator-{style}")).into()
}

fn divider_text(d: &DividerTextData) -> Node {
    el("div")
        .class("divider-text")
        .attr("role", "separator")
        .child(el("span").text(&d.text))
        .into()
}

fn quote(d: &QuoteData) -> Node {
    let attribution = match (non_empty(d.author.as_deref()), non_empty(d.source.as_deref())) {
        (None, None) => None,
        (author, source) => Some(
            el("footer")
                .child_opt(author.map(|a| el("span").class("author").text(a)))
                .child_opt(source.map(|s| el("cite").text(s))),
        ),
    };
    el("blockquote")
        .class("quote")
        .child(el("p").child(Node::rich(&d.text)))
        .child_opt(attribution)
        .into()
}

fn stats(d: &StatsData, cx: &Ctx<'_>) -> Node {
    el("div")
        .class("stats")
        .children(d.items.iter().map(|stat| {
            el("div")
                .class("stat")
                .child_opt(non_empty(stat.icon.as_deref()).map(|name| cx.icon(name)))
                .child(el("strong").text(&stat.value))
                .child(el("span").text(&stat.label))
                .child_opt(non_empty(stat.description.as_deref()).map(|desc| el("p").text(desc)))
        }))
        .into()
}

fn timeline(d: &TimelineData) -> Node {
    el("ol")
        .class("timeline")
        .children(d.items.iter().map(|item| {
            el("li")
                .attr("data-item-id", item.id.as_str())
                .child(el("time").text(&item.date))
                .child(el("h4").text(&item.title))
                .child(el("div").child(Node::rich(&item.description)))
        }))
        .into()
}

fn changelog(d: &ChangelogData) -> Node {
    el("section")
        .class("changelog")
        .children(d.entries.iter().map(|entry| {
            el("article")
                .attr("data-item-id", entry.id.as_str())
                .child(el("h4").text(&entry.version))
                .child(el("time").text(&entry.date))
                .child(el("ul").children(entry.changes.iter().map(|c| el("li").text(c))))
        }))
        .into()
}

fn pros_cons(d: &ProsConsData) -> Node {
    let column = |class: &'static str, title: &str, mark: &str, items: &[String]| {
        el("div")
            .class(class)
            .child(el("h4").text(title))
            .child(el("ul").children(items.iter().map(|item| {
                el("li")
                    .child(el("span").attr("aria-hidden", "true").text(mark))
                    .text(format!(" {item}"))
            })))
    };
    el("div")
        .class("pros-cons")
        .child(column(
            "pros",
            non_empty(d.pros_title.as_deref()).unwrap_or("Ventajas"),
            "✓",
            &d.pros,
        ))
        .child(column(
            "cons",
            non_empty(d.cons_title.as_deref()).unwrap_or("Desventajas"),
            "✗",
            &d.cons,
        ))
        .into()
}

fn feature_list(d: &FeatureListData, cx: &Ctx<'_>) -> Node {
    el("section")
        .class("feature-list")
        .child_opt(non_empty(d.title.as_deref()).map(|t| el("h3").text(t)))
        .child(el("ul").children(d.items.iter().map(|item| {
            el("li")
                .attr("data-item-id", item.id.as_str())
                .child_opt(non_empty(item.icon.as_deref()).map(|name| cx.icon(name)))
                .child(el("strong").text(&item.title))
                .child(el("p").child(Node::rich(&item.description)))
        })))
        .into()
}

fn icon_grid(d: &IconGridData, cx: &Ctx<'_>) -> Node {
    columns_attr(el("div").class("icon-grid"), d.columns)
        .children(d.items.iter().map(|item| {
            el("div")
                .class("icon-item")
                .attr("data-item-id", item.id.as_str())
                .child(cx.icon(&item.icon))
                .child(el("h4").text(&item.title))
                .child_opt(non_empty(item.description.as_deref()).map(|desc| el("p").text(desc)))
        }))
        .into()
}

// ============================================================================
// Calls to action & cards
// ============================================================================

fn button(d: &ButtonData) -> Result<Node> {
    require("button", "url", &d.url)?;
    let variant = non_empty(d.variant.as_deref()).unwrap_or("primary");
    let link = el("a")
        .class(format!("button button-{variant}"))
        .attr("href", &d.url);
    let link = if d.new_tab {
        link.attr("target", "_blank").attr("rel", "noopener noreferrer")
    } else {
        link
    };
    Ok(link.text(&d.label).into())
}

fn cta_banner(d: &CtaBannerData) -> Node {
    el("section")
        .class("cta-banner")
        .child(el("h3").text(&d.title))
        .child_opt(non_empty(d.description.as_deref()).map(|desc| el("p").text(desc)))
        .child_opt((!d.button_url.trim().is_empty()).then(|| {
            el("a")
                .class("button button-primary")
                .attr("href", &d.button_url)
                .text(&d.button_label)
        }))
        .into()
}

fn testimonial(d: &TestimonialData) -> Node {
    let rating = d.rating.map(|r| {
        let r = usize::from(r.min(5));
        el("span")
            .class("rating")
            .attr("aria-label", format!("{r}/5"))
            .text(format!("{}{}", "★".repeat(r), "☆".repeat(5 - r)))
    });
    el("figure")
        .class("testimonial")
        .child(el("blockquote").child(Node::rich(&d.quote)))
        .child(
            el("figcaption")
                .child_opt(
                    non_empty(d.avatar_url.as_deref())
                        .map(|src| el("img").attr("src", src).attr("alt", &d.author)),
                )
                .child(el("strong").text(&d.author))
                .child_opt(non_empty(d.role.as_deref()).map(|role| el("span").text(role)))
                .child_opt(rating),
        )
        .into()
}

fn product_showcase(d: &ProductShowcaseData) -> Node {
    el("article")
        .class("product-showcase")
        .child_opt(
            (!d.image_url.trim().is_empty())
                .then(|| el("img").attr("src", &d.image_url).attr("alt", &d.name)),
        )
        .child(el("h4").text(&d.name))
        .child(el("div").child(Node::rich(&d.description)))
        .child_opt(non_empty(d.price.as_deref()).map(|p| el("p").class("price").text(p)))
        .child(el("ul").children(d.features.iter().map(|f| el("li").text(f))))
        .child_opt(non_empty(d.url.as_deref()).map(|href| {
            el("a")
                .class("button button-primary")
                .attr("href", href)
                .text("Ver producto")
        }))
        .into()
}

fn pricing_table(d: &PricingTableData) -> Node {
    el("div")
        .class("pricing-table")
        .children(d.plans.iter().map(|plan| {
            let class = if plan.highlighted {
                "plan plan-highlighted"
            } else {
                "plan"
            };
            el("div")
                .class(class)
                .attr("data-item-id", plan.id.as_str())
                .child(el("h4").text(&plan.name))
                .child(
                    el("p")
                        .class("price")
                        .text(&plan.price)
                        .child_opt(
                            non_empty(plan.period.as_deref())
                                .map(|p| el("span").class("period").text(format!("/{p}"))),
                        ),
                )
                .child(el("ul").children(plan.features.iter().map(|f| el("li").text(f))))
                .child_opt(non_empty(plan.cta_url.as_deref()).map(|href| {
                    el("a")
                        .class("button")
                        .attr("href", href)
                        .text(non_empty(plan.cta_label.as_deref()).unwrap_or("Elegir"))
                }))
        }))
        .into()
}

fn author_bio(d: &AuthorBioData) -> Node {
    el("aside")
        .class("author-bio")
        .child_opt(
            non_empty(d.avatar_url.as_deref())
                .map(|src| el("img").attr("src", src).attr("alt", &d.name)),
        )
        .child(
            el("div")
                .child(el("strong").text(&d.name))
                .child_opt(non_empty(d.role.as_deref()).map(|role| el("span").text(role)))
                .child(el("div").child(Node::rich(&d.bio)))
                .child_opt(
                    non_empty(d.website.as_deref())
                        .map(|href| el("a").attr("href", href).text(href)),
                ),
        )
        .into()
}

fn category_card(d: &CategoryCardData) -> Node {
    let root = match non_empty(d.url.as_deref()) {
        Some(href) => el("a").attr("href", href),
        None => el("div"),
    };
    root.class("category-card")
        .attr("data-category-id", &d.category_id)
        .child_opt(
            non_empty(d.image_url.as_deref())
                .map(|src| el("img").attr("src", src).attr("alt", &d.title)),
        )
        .child(el("h4").text(&d.title))
        .child_opt(non_empty(d.description.as_deref()).map(|desc| el("p").text(desc)))
        .into()
}

fn card(record: &Record) -> Node {
    let title: Node = match non_empty(record.url.as_deref()) {
        Some(href) => el("a").attr("href", href).text(&record.title).into(),
        None => text(&record.title),
    };
    el("article")
        .class("card")
        .attr("data-record-id", &record.id)
        .child_opt(
            non_empty(record.image_url.as_deref())
                .map(|src| el("img").attr("src", src).attr("alt", &record.title)),
        )
        .child(el("h4").child(title))
        .child_opt(non_empty(record.summary.as_deref()).map(|s| el("p").text(s)))
        .into()
}

fn card_grid(records: &[Record], columns: Option<u8>) -> Node {
    columns_attr(el("div").class("card-grid"), columns)
        .children(records.iter().map(card))
        .into()
}
