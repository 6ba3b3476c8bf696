//! Language hints derived from file extensions.
//!
//! The buffer never tokenizes anything itself. The language only picks a
//! syntax for the highlighter and the characters that open an indented
//! block when a line is split.

use std::ffi::OsStr;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Plain,
    Python,
    JavaScript,
    Html,
    Css,
    Markdown,
}

impl Language {
    const DETECTABLE: [Self; 5] = [
        Self::Python,
        Self::JavaScript,
        Self::Html,
        Self::Css,
        Self::Markdown,
    ];

    /// Display name shown in the status bar.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain text",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Markdown => "markdown",
        }
    }

    /// Token syntect uses to look up a syntax definition.
    pub const fn syntax_token(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Python => Some("py"),
            Self::JavaScript => Some("js"),
            Self::Html => Some("html"),
            Self::Css => Some("css"),
            Self::Markdown => Some("md"),
        }
    }

    /// Trailing characters that make the next line one level deeper.
    pub const fn indent_openers(self) -> &'static [char] {
        match self {
            Self::JavaScript | Self::Css => &['{', '[', '('],
            Self::Plain | Self::Python | Self::Html | Self::Markdown => &[':'],
        }
    }

    const fn file_exts(self) -> &'static [&'static str] {
        match self {
            Self::Plain => &[],
            Self::Python => &["py"],
            Self::JavaScript => &["js"],
            Self::Html => &["html"],
            Self::Css => &["css"],
            Self::Markdown => &["md", "markdown"],
        }
    }

    /// Detect the language from a path's extension, falling back to plain text.
    pub fn detect<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(OsStr::to_str) else {
            return Self::Plain;
        };
        let ext = ext.to_ascii_lowercase();
        Self::DETECTABLE
            .into_iter()
            .find(|lang| lang.file_exts().contains(&ext.as_str()))
            .unwrap_or(Self::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_extensions() {
        assert_eq!(Language::detect("main.py"), Language::Python);
        assert_eq!(Language::detect("app.js"), Language::JavaScript);
        assert_eq!(Language::detect("index.html"), Language::Html);
        assert_eq!(Language::detect("site.css"), Language::Css);
        assert_eq!(Language::detect("README.md"), Language::Markdown);
        assert_eq!(Language::detect("notes.markdown"), Language::Markdown);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(Language::detect("SCRIPT.PY"), Language::Python);
    }

    #[test]
    fn test_detect_unknown_or_missing_extension_is_plain() {
        assert_eq!(Language::detect("Makefile"), Language::Plain);
        assert_eq!(Language::detect("data.csv"), Language::Plain);
        assert_eq!(Language::detect(""), Language::Plain);
    }

    #[test]
    fn test_plain_has_no_syntax() {
        assert_eq!(Language::Plain.syntax_token(), None);
        assert_eq!(Language::Python.syntax_token(), Some("py"));
    }

    #[test]
    fn test_brace_languages_open_on_braces() {
        assert!(Language::JavaScript.indent_openers().contains(&'{'));
        assert_eq!(Language::Python.indent_openers(), &[':']);
    }
}
