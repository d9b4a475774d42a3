//! Projections of pre-rendered rich-text fields.
//!
//! Block text fields hold small HTML fragments produced by the editor
//! (`<strong>`, `<em>`, `<a href>`, lists). These helpers project them to
//! plain text (for analysis) or inline Markdown (for export). They are not a
//! general HTML parser.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|tr)>").expect("static regex")
});

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#).expect("static regex")
});

static ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\s[^>]*href\s*="#).expect("static regex"));

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(strong|b)(\s[^>]*)?>(.*?)</(strong|b)>").expect("static regex"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(em|i)(\s[^>]*)?>(.*?)</(em|i)>").expect("static regex"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<code(\s[^>]*)?>(.*?)</code>").expect("static regex"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li(\s[^>]*)?>(.*?)</li>").expect("static regex"));

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("static regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Decode the entities the editor emits (named basics + numeric).
pub fn decode_entities(s: &str) -> String {
    let s = NUMERIC_ENTITY.replace_all(s, |caps: &regex::Captures<'_>| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Strip markup to whitespace-normalized plain text.
pub fn to_plain_text(html: &str) -> String {
    let broken = BLOCK_BREAK.replace_all(html, " ");
    let stripped = TAG.replace_all(&broken, "");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Strip tags but keep line structure (code listings).
pub fn strip_tags(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

/// Project inline markup to Markdown (`**`, `*`, `` ` ``, links); other tags
/// are dropped, line breaks kept.
pub fn to_markdown(html: &str) -> String {
    let s = ANCHOR.replace_all(html, "[$2]($1)");
    let s = STRONG.replace_all(&s, "**$3**");
    let s = EMPHASIS.replace_all(&s, "*$3*");
    let s = INLINE_CODE.replace_all(&s, "`$2`");
    let s = BLOCK_BREAK.replace_all(&s, "\n");
    let s = TAG.replace_all(&s, "");
    let decoded = decode_entities(&s);
    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Items of a list fragment (`<li>` contents), falling back to one item per
/// non-empty line when the content carries no `<li>`.
pub fn list_items(html: &str) -> Vec<String> {
    let items: Vec<String> = LIST_ITEM
        .captures_iter(html)
        .map(|caps| caps[2].to_string())
        .collect();
    if !items.is_empty() {
        return items;
    }
    html.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of anchors with an `href` in a fragment.
pub fn count_links(html: &str) -> usize {
    ANCHOR_OPEN.find_iter(html).count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_and_normalizes() {
        let html = "<p>Hola <strong>mundo</strong></p><p>Adiós&nbsp;&amp; gracias</p>";
        assert_eq!(to_plain_text(html), "Hola mundo Adiós & gracias");
    }

    #[test]
    fn test_plain_text_numeric_entities() {
        assert_eq!(to_plain_text("caf&#233; &#x41;"), "café A");
    }

    #[test]
    fn test_markdown_inline_projection() {
        let html = r#"Usa <strong>Figma</strong> o <em>Penpot</em>: <a href="https://penpot.app">web</a> y <code>npm i</code>"#;
        assert_eq!(
            to_markdown(html),
            "Usa **Figma** o *Penpot*: [web](https://penpot.app) y `npm i`"
        );
    }

    #[test]
    fn test_markdown_keeps_breaks() {
        assert_eq!(to_markdown("uno<br>dos<br/>tres"), "uno\ndos\ntres");
    }

    #[test]
    fn test_strip_tags_keeps_lines() {
        assert_eq!(strip_tags("<pre>fn a() {\n  1 &lt; 2\n}</pre>"), "fn a() {\n  1 < 2\n}");
    }

    #[test]
    fn test_list_items() {
        assert_eq!(list_items("<ul><li>a</li><li>b</li></ul>"), ["a", "b"]);
        assert_eq!(list_items("a\n\nb\n"), ["a", "b"]);
    }

    #[test]
    fn test_count_links() {
        let html = r#"<a href="/a">a</a> <a class="x" href='/b'>b</a> <a name="c">c</a>"#;
        assert_eq!(count_links(html), 2);
    }
}
