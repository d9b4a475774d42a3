//! Video source classification.
//!
//! Three shapes: a direct file (native player), a known platform page
//! (rewritten to its embeddable URL), or anything else (explicit
//! placeholder, no guessing).

use std::sync::LazyLock;

use regex::Regex;

static FILE_EXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mp4|webm|ogg|ogv|mov|m4v)(\?[^#]*)?(#.*)?$").expect("static regex")
});

static CLOUDINARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://res\.cloudinary\.com/[^/]+/video/upload/").expect("static regex")
});

static SUPABASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[a-z0-9-]+\.supabase\.co/storage/v1/object/").expect("static regex")
});

static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("static regex")
});

static VIMEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.|player\.)?vimeo\.com/(?:video/)?(\d+)").expect("static regex")
});

static LOOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?loom\.com/(?:share|embed)/([A-Za-z0-9]+)")
        .expect("static regex")
});

/// External video platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Vimeo,
    Loom,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Vimeo => "vimeo",
            Platform::Loom => "loom",
        }
    }
}

/// How a `video` URL is played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoSource {
    /// Direct file or recognized hosted-video URL.
    Native(String),
    /// Platform page rewritten to its embeddable player.
    Embed { platform: Platform, embed_url: String },
    /// Unrecognized or invalid URL.
    Unsupported,
}

impl VideoSource {
    pub fn classify(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() {
            return VideoSource::Unsupported;
        }
        if let Some(caps) = YOUTUBE.captures(url) {
            return VideoSource::Embed {
                platform: Platform::YouTube,
                embed_url: format!("https://www.youtube.com/embed/{}", &caps[1]),
            };
        }
        if let Some(caps) = VIMEO.captures(url) {
            return VideoSource::Embed {
                platform: Platform::Vimeo,
                embed_url: format!("https://player.vimeo.com/video/{}", &caps[1]),
            };
        }
        if let Some(caps) = LOOM.captures(url) {
            return VideoSource::Embed {
                platform: Platform::Loom,
                embed_url: format!("https://www.loom.com/embed/{}", &caps[1]),
            };
        }
        if FILE_EXT.is_match(url) || CLOUDINARY.is_match(url) || SUPABASE.is_match(url) {
            return VideoSource::Native(url.to_string());
        }
        VideoSource::Unsupported
    }
}
