//! Allow-list sanitizer for pre-rendered rich-text fields.
//!
//! Tags outside [`ALLOWED_TAGS`] are dropped with their content kept;
//! `script` and `style` are dropped together with their content. Only
//! [`ALLOWED_ATTRS`] survive, and `href`s with an executable scheme are
//! removed.

use std::sync::LazyLock;

use regex::Regex;

pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "s", "a", "ul", "ol", "li", "code", "pre",
    "blockquote", "span", "h1", "h2", "h3", "h4", "h5", "h6", "sub", "sup", "mark",
];

pub const ALLOWED_ATTRS: &[&str] = &["href", "title", "target", "rel"];

const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("static regex")
});

static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("static regex"));

static UNCLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b.*$").expect("static regex"));

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").expect("static regex")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("static regex")
});

fn is_unsafe_href(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    UNSAFE_SCHEMES.iter().any(|scheme| compact.starts_with(scheme))
}

fn escape_loose_text(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

fn clean_attrs(raw: &str) -> String {
    let mut out = String::new();
    for caps in ATTR.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        if !ALLOWED_ATTRS.contains(&name.as_str()) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if name == "href" && is_unsafe_href(value) {
            continue;
        }
        let value = value
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        out.push_str(&format!(" {name}=\"{value}\""));
    }
    out
}

/// Sanitize a rich-text fragment.
pub fn sanitize(html: &str) -> String {
    let html = SCRIPT.replace_all(html, "");
    let html = STYLE.replace_all(&html, "");
    let html = UNCLOSED.replace_all(&html, "");

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in TOKEN.captures_iter(&html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape_loose_text(&html[last..whole.start()]));
        last = whole.end();

        let Some(name) = caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) else {
            // comment
            continue;
        };
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            if name != "br" {
                out.push_str(&format!("</{name}>"));
            }
        } else {
            let attrs = caps.get(3).map(|m| clean_attrs(m.as_str())).unwrap_or_default();
            out.push_str(&format!("<{name}{attrs}>"));
        }
    }
    out.push_str(&escape_loose_text(&html[last..]));
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_markup_passes() {
        let html = r#"<p>Hola <strong>mundo</strong> <a href="https://x.dev" target="_blank" rel="noopener">x</a></p>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_disallowed_tags_keep_content() {
        assert_eq!(
            sanitize("<div><font color=red>rojo</font></div>"),
            "rojo"
        );
    }

    #[test]
    fn test_script_and_style_dropped_with_content() {
        assert_eq!(
            sanitize("a<script>alert(1)</script>b<style>p{}</style>c"),
            "abc"
        );
        assert_eq!(sanitize("ok<script>never closed"), "ok");
    }

    #[test]
    fn test_event_handlers_and_styles_removed() {
        assert_eq!(
            sanitize(r#"<p onclick="steal()" style="color:red" class="x">t</p>"#),
            "<p>t</p>"
        );
    }

    #[test]
    fn test_javascript_href_removed() {
        assert_eq!(
            sanitize(r#"<a href=" JaVa script:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize("<a href='data:text/html,evil'>x</a>"),
            "<a>x</a>"
        );
    }

    #[test]
    fn test_comments_and_loose_brackets() {
        assert_eq!(sanitize("1 < 2 <!-- hidden --> y 3 > 2"), "1 &lt; 2  y 3 &gt; 2");
    }

    #[test]
    fn test_self_closing_break() {
        assert_eq!(sanitize("a<br/>b<BR>c"), "a<br>b<br>c");
    }
}
