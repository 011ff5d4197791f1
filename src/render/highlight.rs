//! Syntax highlighting to 24-bit terminal escapes using syntect + two-face.
//!
//! The theme is chosen once when the [`SyntaxHighlighter`] is built and is
//! never read from global state. The syntax and theme sets themselves are
//! immutable and loaded lazily on first use.
//!
//! # Theme Support
//!
//! Built-in themes (from two-face):
//! - `monokai` - Sublime Text classic (default)
//! - `base16-ocean-dark` - Ocean-inspired colors
//! - `solarized-dark` / `solarized-light` - Precision colors
//! - `gruvbox-dark` / `gruvbox-light` - Warm retro groove colors
//! - And many more (see `VALID_THEMES`)

use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// All valid theme names that can be used in configuration.
pub const VALID_THEMES: &[&str] = &[
    "ansi",
    "base16",
    "base16-256",
    "base16-eighties-dark",
    "base16-mocha-dark",
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-cold",
    "coldark-dark",
    "dark-neon",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "inspired-github",
    "leet",
    "monokai",
    "monokai-bright",
    "monokai-light",
    "monokai-origin",
    "nord",
    "one-half-dark",
    "one-half-light",
    "solarized-dark",
    "solarized-light",
    "sublime-snazzy",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

/// Default theme name.
pub const DEFAULT_THEME: &str = "monokai";

/// Resets all terminal attributes at the end of each highlighted line.
const ANSI_RESET: &str = "\x1b[0m";

/// Lazy-loaded theme set containing all two-face themes.
static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

/// Syntax definitions, built for lines that keep their `\n`.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

/// Map a theme name string to the corresponding EmbeddedThemeName.
fn theme_name_to_embedded(name: &str) -> Option<EmbeddedThemeName> {
    match name {
        "ansi" => Some(EmbeddedThemeName::Ansi),
        "base16" => Some(EmbeddedThemeName::Base16),
        "base16-256" => Some(EmbeddedThemeName::Base16_256),
        "base16-eighties-dark" => Some(EmbeddedThemeName::Base16EightiesDark),
        "base16-mocha-dark" => Some(EmbeddedThemeName::Base16MochaDark),
        "base16-ocean-dark" | "base16-ocean" => Some(EmbeddedThemeName::Base16OceanDark),
        "base16-ocean-light" => Some(EmbeddedThemeName::Base16OceanLight),
        "coldark-cold" => Some(EmbeddedThemeName::ColdarkCold),
        "coldark-dark" => Some(EmbeddedThemeName::ColdarkDark),
        "dark-neon" => Some(EmbeddedThemeName::DarkNeon),
        "dracula" => Some(EmbeddedThemeName::Dracula),
        "github" => Some(EmbeddedThemeName::Github),
        "gruvbox-dark" => Some(EmbeddedThemeName::GruvboxDark),
        "gruvbox-light" => Some(EmbeddedThemeName::GruvboxLight),
        "inspired-github" => Some(EmbeddedThemeName::InspiredGithub),
        "leet" => Some(EmbeddedThemeName::Leet),
        "monokai" | "monokai-extended" => Some(EmbeddedThemeName::MonokaiExtended),
        "monokai-bright" => Some(EmbeddedThemeName::MonokaiExtendedBright),
        "monokai-light" => Some(EmbeddedThemeName::MonokaiExtendedLight),
        "monokai-origin" => Some(EmbeddedThemeName::MonokaiExtendedOrigin),
        "nord" => Some(EmbeddedThemeName::Nord),
        "one-half-dark" => Some(EmbeddedThemeName::OneHalfDark),
        "one-half-light" => Some(EmbeddedThemeName::OneHalfLight),
        "solarized-dark" => Some(EmbeddedThemeName::SolarizedDark),
        "solarized-light" => Some(EmbeddedThemeName::SolarizedLight),
        "sublime-snazzy" => Some(EmbeddedThemeName::SublimeSnazzy),
        "two-dark" => Some(EmbeddedThemeName::TwoDark),
        "visual-studio-dark-plus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
        "zenburn" => Some(EmbeddedThemeName::Zenburn),
        _ => None,
    }
}

/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    theme_name_to_embedded(name).is_some()
}

/// Guess the language of free text.
///
/// Tries, in order: first-line detection (shebangs, XML prologs, modelines),
/// a JSON sniff, and a Markdown code-fence sniff. Returns `None` when the
/// text looks like plain prose, which callers leave uncolored.
pub fn detect_syntax(source: &str) -> Option<&'static SyntaxReference> {
    let syntaxes: &'static SyntaxSet = &SYNTAX_SET;

    let first_line = source.lines().next().unwrap_or_default();
    if let Some(syntax) = syntaxes.find_syntax_by_first_line(first_line) {
        if syntax.name != syntaxes.find_syntax_plain_text().name {
            return Some(syntax);
        }
    }

    let trimmed = source.trim();
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok()
    {
        return syntaxes.find_syntax_by_token("json");
    }

    if source.lines().any(|l| l.trim_start().starts_with("```")) {
        return syntaxes.find_syntax_by_token("md");
    }

    None
}

/// Syntax highlighter with a fixed theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxHighlighter {
    theme_name: EmbeddedThemeName,
}

impl SyntaxHighlighter {
    /// Create a new highlighter with the specified theme.
    ///
    /// If the theme name is invalid, falls back to the default theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name_to_embedded(theme_name)
                .unwrap_or(EmbeddedThemeName::MonokaiExtended),
        }
    }

    /// Create a highlighter with the default theme.
    pub fn default_theme() -> Self {
        Self::new(DEFAULT_THEME)
    }

    /// Highlight pretty-printed JSON.
    ///
    /// Returns one escaped string per `\n`-separated line of `source`, or
    /// `None` if highlighting failed.
    pub fn highlight_json(&self, source: &str) -> Option<Vec<String>> {
        let syntax = SYNTAX_SET.find_syntax_by_token("json")?;
        self.highlight_with(source, syntax)
    }

    /// Highlight free text in whatever language [`detect_syntax`] guesses.
    ///
    /// Returns `None` for plain text or on any highlighting failure.
    pub fn highlight_detected(&self, source: &str) -> Option<Vec<String>> {
        let syntax = detect_syntax(source)?;
        self.highlight_with(source, syntax)
    }

    fn highlight_with(&self, source: &str, syntax: &SyntaxReference) -> Option<Vec<String>> {
        let theme = THEME_SET.get(self.theme_name);
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(source) {
            let ranges = highlighter.highlight_line(line, &SYNTAX_SET).ok()?;
            let escaped = as_24_bit_terminal_escaped(&ranges, false);
            let escaped = escaped.strip_suffix('\n').unwrap_or(&escaped);
            lines.push(format!("{}{}", escaped, ANSI_RESET));
        }

        // Keep the same line count as `source.split('\n')`.
        if source.is_empty() || source.ends_with('\n') {
            lines.push(String::new());
        }

        Some(lines)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::default_theme()
    }
}
