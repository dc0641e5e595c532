//! Terminal styling and syntax highlighting for quire.
//!
//! The CLI uses this crate for two things: highlighting structured text it prints
//! (configuration TOML, artifact JSON, page source) and styling its own report lines
//! (headers, dimmed details, warnings).

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Indentation applied by [`indent_content`].
const INDENT: &str = "   ";

/// Highlights source text for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and Markdown from the two-face extras.
    syntax_set: SyntaxSet,
    /// Available color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme used for every highlight.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights a TOML document, such as the effective configuration.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON, such as a record from one of the build artifacts.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights page source.
    ///
    /// MDX has no grammar of its own here; Markdown covers the front-matter and body well
    /// enough for reading.
    pub fn highlight_page(&self, content: &str) -> String {
        self.highlight(content, "md")
    }

    /// Highlights content with the named syntax (extension or language name).
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self.find_syntax(syntax_name);
        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }

    /// Looks up a syntax by extension, then by name.
    fn find_syntax(&self, syntax_name: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// ANSI escape codes used by the styling helpers.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text.
    pub const RED: &str = "\x1b[31m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape codes followed by a reset.
fn styled(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Formats a header (bold cyan), used for category names and page titles.
pub fn header(text: &str) -> String {
    styled(&[colors::BOLD, colors::CYAN], text)
}

/// Formats a subheader (bold), used for report section labels.
pub fn subheader(text: &str) -> String {
    styled(&[colors::BOLD], text)
}

/// Formats secondary detail such as paths and slugs.
pub fn dim(text: &str) -> String {
    styled(&[colors::DIM], text)
}

/// Formats a success message.
pub fn success(text: &str) -> String {
    styled(&[colors::GREEN], text)
}

/// Formats a warning.
pub fn warning(text: &str) -> String {
    styled(&[colors::YELLOW], text)
}

/// Formats an error.
pub fn error(text: &str) -> String {
    styled(&[colors::RED], text)
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every non-empty line of `content`.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[search]\nlimit = 10\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
        assert!(output.contains("limit"));
    }

    #[test]
    fn test_highlight_json() {
        let hl = Highlighter::new();
        let output = hl.highlight_json("{\"slug\": \"intro\"}\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("intro"));
    }

    #[test]
    fn test_highlight_page() {
        let hl = Highlighter::new();
        let output = hl.highlight_page("---\ntitle: Intro\n---\n## Setup\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("Setup"));
    }

    #[test]
    fn test_unknown_syntax_is_plain() {
        let hl = Highlighter::new();
        let output = hl.highlight("plain words\n", "no-such-syntax");
        assert!(output.contains("plain words"));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_syntaxes_available() {
        let ss = extra_syntaxes();
        for ext in ["toml", "json", "md"] {
            assert!(ss.find_syntax_by_extension(ext).is_some(), "missing {ext}");
        }
    }

    #[test]
    fn test_styling_helpers() {
        let h = header("Audio");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));

        assert_eq!(dim("x"), format!("{}x{}", colors::DIM, colors::RESET));
        assert!(warning("w").contains(colors::YELLOW));
        assert!(error("e").contains(colors::RED));
        assert!(success("s").contains(colors::GREEN));
    }

    #[test]
    fn test_rule_width() {
        let r = rule(3);
        assert!(r.contains("───"));
        assert!(!r.contains("────"));
    }

    #[test]
    fn test_indent_content() {
        assert_eq!(indent_content("a\n\nb"), "   a\n\n   b");
        assert_eq!(indent_content(""), "");
    }
}
