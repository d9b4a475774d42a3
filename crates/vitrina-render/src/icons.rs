//! Icon-name lookup for `stats`, `callout`, `feature-list` and `icon-grid`.
//!
//! Lookups never fail: unknown names resolve to [`Icon::default()`].

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Built-in icon set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Icon {
    #[default]
    Sparkles,
    Star,
    Users,
    Clock,
    Check,
    Chart,
    Trophy,
    Heart,
    Rocket,
    Globe,
    Book,
    Download,
    Zap,
    Shield,
    #[strum(to_string = "dollar", serialize = "money")]
    Dollar,
    Info,
    Warning,
    Lightbulb,
    Code,
    Palette,
}

impl Icon {
    /// Parse an icon name; `None` when unknown.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s.trim()).ok()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Glyph used by the HTML output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sparkles => "✨",
            Icon::Star => "⭐",
            Icon::Users => "👥",
            Icon::Clock => "⏱",
            Icon::Check => "✔",
            Icon::Chart => "📈",
            Icon::Trophy => "🏆",
            Icon::Heart => "❤",
            Icon::Rocket => "🚀",
            Icon::Globe => "🌐",
            Icon::Book => "📘",
            Icon::Download => "⬇",
            Icon::Zap => "⚡",
            Icon::Shield => "🛡",
            Icon::Dollar => "💲",
            Icon::Info => "ℹ",
            Icon::Warning => "⚠",
            Icon::Lightbulb => "💡",
            Icon::Code => "⌨",
            Icon::Palette => "🎨",
        }
    }
}

/// Resolves icon names. Implementations must degrade, never fail.
pub trait IconLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Icon;
}

/// The built-in [`Icon`] set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinIcons;

impl IconLookup for BuiltinIcons {
    fn lookup(&self, name: &str) -> Icon {
        Icon::from_str(name).unwrap_or_else(|| {
            tracing::debug!(icon = name, "unknown icon name, using default");
            Icon::default()
        })
    }
}
