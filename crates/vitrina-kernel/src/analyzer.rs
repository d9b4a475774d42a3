//! Content analysis: counts, reading time, readability, SEO, keywords.
//!
//! [`analyze`] is a pure function of the blocks plus the title and short
//! description. Text comes from the prose-bearing kinds only (`text`,
//! `alert`, `tabs`, `accordion`), with markup stripped first.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use vitrina_codec::inline;
use vitrina_types::{Block, BlockData, BlogDocument, TextFormat};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("static regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?…]+").expect("static regex"));

/// Vowels for syllable estimation, accented Spanish forms included.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ü', 'y'];

/// Analyzer tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub words_per_minute: u32,
    pub min_keyword_len: usize,
    /// Percent of all words.
    pub min_keyword_density: f64,
    pub max_keywords: usize,
    pub title_min_len: usize,
    pub title_max_len: usize,
    pub description_min_len: usize,
    pub description_max_len: usize,
    pub min_words: usize,
    pub min_words_per_image: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            min_keyword_len: 4,
            min_keyword_density: 1.0,
            max_keywords: 10,
            title_min_len: 30,
            title_max_len: 60,
            description_min_len: 120,
            description_max_len: 160,
            min_words: 300,
            min_words_per_image: 75,
        }
    }
}

/// One triggered SEO rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeoSuggestion {
    /// Points deducted from 100.
    pub penalty: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub word: String,
    pub count: usize,
    /// Percent of all words.
    pub density: f64,
}

/// Result of [`analyze`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub char_count: usize,
    pub paragraph_count: usize,
    pub heading_count: usize,
    pub image_count: usize,
    pub link_count: usize,
    pub reading_time_minutes: u32,
    /// Flesch reading ease, 0–100.
    pub readability_score: f64,
    pub readability_label: &'static str,
    /// 0–100.
    pub seo_score: u32,
    pub seo_suggestions: Vec<SeoSuggestion>,
    pub keyword_density: Vec<KeywordDensity>,
}

/// Analyze a block sequence.
pub fn analyze(
    blocks: &[Block],
    title: &str,
    description: &str,
    config: &AnalyzerConfig,
) -> ContentAnalysis {
    let text = extract_text(blocks);
    let words: Vec<&str> = WORD.find_iter(&text).map(|m| m.as_str()).collect();
    let counts = count_structure(blocks);

    let readability_score = flesch_reading_ease(&text);
    let mut analysis = ContentAnalysis {
        word_count: words.len(),
        char_count: text.chars().count(),
        paragraph_count: counts.paragraphs,
        heading_count: counts.headings,
        image_count: counts.images,
        link_count: counts.links,
        reading_time_minutes: reading_time(words.len(), config.words_per_minute),
        readability_score,
        readability_label: readability_label(readability_score),
        seo_score: 100,
        seo_suggestions: Vec::new(),
        keyword_density: keyword_density(&words, config),
    };
    analysis.seo_suggestions = seo_suggestions(&analysis, title, description, config);
    let deducted: u32 = analysis.seo_suggestions.iter().map(|s| s.penalty).sum();
    analysis.seo_score = 100u32.saturating_sub(deducted);
    analysis
}

/// [`analyze`] with the title and description taken from the metadata.
pub fn analyze_document(document: &BlogDocument, config: &AnalyzerConfig) -> ContentAnalysis {
    analyze(
        document.bloques.blocks(),
        &document.metadata.titulo,
        &document.metadata.descripcion_corta,
        config,
    )
}

// ============================================================================
// Extraction and counts
// ============================================================================

/// Plain text of the prose-bearing blocks, one fragment per field.
pub fn extract_text(blocks: &[Block]) -> String {
    let mut fragments: Vec<String> = Vec::new();
    let mut push = |html: &str| {
        let plain = inline::to_plain_text(html);
        if !plain.is_empty() {
            fragments.push(plain);
        }
    };
    for block in blocks {
        match &block.data {
            BlockData::Text(d) => push(&d.content),
            BlockData::Alert(d) => {
                if let Some(title) = &d.title {
                    push(title);
                }
                push(&d.message);
            }
            BlockData::Tabs(d) => {
                for item in &d.items {
                    push(&item.label);
                    push(&item.content);
                }
            }
            BlockData::Accordion(d) => {
                for item in &d.items {
                    push(&item.title);
                    push(&item.content);
                }
            }
            _ => {}
        }
    }
    fragments.join(" ")
}

#[derive(Default)]
struct StructureCounts {
    paragraphs: usize,
    headings: usize,
    images: usize,
    links: usize,
}

fn count_structure(blocks: &[Block]) -> StructureCounts {
    let mut counts = StructureCounts::default();
    for block in blocks {
        match &block.data {
            BlockData::Text(d) => {
                if d.format == TextFormat::Paragraph {
                    counts.paragraphs += 1;
                }
                if d.format.heading_level().is_some_and(|level| level <= 4) {
                    counts.headings += 1;
                }
                counts.links += inline::count_links(&d.content);
            }
            BlockData::Alert(d) => counts.links += inline::count_links(&d.message),
            BlockData::Tabs(d) => {
                counts.links += d.items.iter().map(|i| inline::count_links(&i.content)).sum::<usize>();
            }
            BlockData::Accordion(d) => {
                counts.links += d.items.iter().map(|i| inline::count_links(&i.content)).sum::<usize>();
            }
            BlockData::Image(_) => counts.images += 1,
            BlockData::ImagesGrid(d) => counts.images += d.images.len(),
            _ => {}
        }
    }
    counts
}

/// Minutes at `wpm`, rounded up, never below 1.
pub fn reading_time(words: usize, wpm: u32) -> u32 {
    let wpm = wpm.max(1) as usize;
    words.div_ceil(wpm).max(1) as u32
}

// ============================================================================
// Readability
// ============================================================================

/// Contiguous vowel runs, at least one per word.
pub fn count_syllables(word: &str) -> usize {
    let mut runs = 0;
    let mut in_vowel = false;
    for c in word.chars().flat_map(char::to_lowercase) {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !in_vowel {
            runs += 1;
        }
        in_vowel = is_vowel;
    }
    runs.max(1)
}

/// Flesch reading ease clamped to `[0, 100]`; 0 for text without words.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentences = SENTENCE_END
        .split(text)
        .filter(|s| WORD.is_match(s))
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0)
}

pub fn readability_label(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "very easy",
        s if s >= 80.0 => "easy",
        s if s >= 70.0 => "fairly easy",
        s if s >= 60.0 => "standard",
        s if s >= 50.0 => "fairly difficult",
        s if s >= 30.0 => "difficult",
        _ => "very difficult",
    }
}

// ============================================================================
// SEO
// ============================================================================

fn seo_suggestions(
    analysis: &ContentAnalysis,
    title: &str,
    description: &str,
    config: &AnalyzerConfig,
) -> Vec<SeoSuggestion> {
    let mut out = Vec::new();
    let mut deduct = |penalty: u32, message: String| out.push(SeoSuggestion { penalty, message });

    let title_len = title.trim().chars().count();
    if title_len == 0 {
        deduct(20, "Add a title".into());
    } else if title_len < config.title_min_len {
        deduct(10, format!("Lengthen the title to at least {} characters", config.title_min_len));
    } else if title_len > config.title_max_len {
        deduct(5, format!("Shorten the title to at most {} characters", config.title_max_len));
    }

    let description_len = description.trim().chars().count();
    if description_len == 0 {
        deduct(15, "Add a short description".into());
    } else if description_len < config.description_min_len {
        deduct(
            10,
            format!("Lengthen the description to at least {} characters", config.description_min_len),
        );
    } else if description_len > config.description_max_len {
        deduct(
            5,
            format!("Shorten the description to at most {} characters", config.description_max_len),
        );
    }

    if analysis.word_count < config.min_words {
        deduct(15, format!("Write at least {} words", config.min_words));
    }
    if analysis.heading_count == 0 {
        deduct(10, "Add headings to structure the content".into());
    }
    if analysis.image_count == 0 {
        deduct(10, "Add at least one image".into());
    } else if analysis.word_count / analysis.image_count < config.min_words_per_image {
        deduct(
            5,
            format!("Add more text: aim for {} words per image", config.min_words_per_image),
        );
    }
    if analysis.link_count == 0 {
        deduct(5, "Add links to related content".into());
    }
    out
}

// ============================================================================
// Keywords
// ============================================================================

fn keyword_density(words: &[&str], config: &AnalyzerConfig) -> Vec<KeywordDensity> {
    if words.is_empty() {
        return Vec::new();
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in words {
        if word.chars().count() >= config.min_keyword_len {
            *counts.entry(word.to_lowercase()).or_default() += 1;
        }
    }

    let total = words.len() as f64;
    let mut keywords: Vec<KeywordDensity> = counts
        .into_iter()
        .map(|(word, count)| KeywordDensity {
            word,
            count,
            density: count as f64 / total * 100.0,
        })
        .filter(|k| k.density >= config.min_keyword_density)
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    keywords.truncate(config.max_keywords);
    keywords
}

// ============================================================================
// Tests
// ============================================================================
