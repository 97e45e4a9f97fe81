//! Language identification for documents.
//!
//! A document's language is resolved from, in order of preference, an explicit
//! identifier (an LSP `languageId` or a command-line flag), its file path, and
//! finally a `#!` line at the top of its text.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static SHEBANG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#!\s*\S*?(?:/env\s+(?:-\S+\s+)*)?/?(?P<interp>[A-Za-z]+)[\d.]*(?:\s|$)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    PlainText,
    Python,
    Rust,
    Json,
    Toml,
    Markdown,
    Shell,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::PlainText,
        Language::Python,
        Language::Rust,
        Language::Json,
        Language::Toml,
        Language::Markdown,
        Language::Shell,
    ];

    /// Canonical identifier, matching the LSP `languageId` convention.
    pub fn id(self) -> &'static str {
        match self {
            Language::PlainText => "plaintext",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Json => "json",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::Shell => "shellscript",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::PlainText => "Plain Text",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Json => "JSON",
            Language::Toml => "TOML",
            Language::Markdown => "Markdown",
            Language::Shell => "Shell",
        }
    }

    /// Parse an identifier such as an LSP `languageId` or a settings value.
    ///
    /// Matching is case-insensitive and accepts a few common aliases.
    pub fn from_id(id: &str) -> Option<Language> {
        let lang = match id.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "plain" | "text" | "txt" => Language::PlainText,
            "python" | "py" | "python3" => Language::Python,
            "rust" | "rs" => Language::Rust,
            "json" | "jsonc" => Language::Json,
            "toml" => Language::Toml,
            "markdown" | "md" => Language::Markdown,
            "shellscript" | "shell" | "sh" | "bash" | "zsh" => Language::Shell,
            _ => return None,
        };
        Some(lang)
    }

    /// Detect the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Language> {
        let lang = match ext.to_ascii_lowercase().as_str() {
            "py" | "pyw" | "pyi" => Language::Python,
            "rs" => Language::Rust,
            "json" => Language::Json,
            "toml" => Language::Toml,
            "md" | "markdown" => Language::Markdown,
            "sh" | "bash" | "zsh" => Language::Shell,
            "txt" | "text" => Language::PlainText,
            _ => return None,
        };
        Some(lang)
    }

    /// Detect the language from a file path.
    pub fn from_path(path: &Path) -> Option<Language> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let by_name = match name {
            "Cargo.lock" | "Pipfile" => Some(Language::Toml),
            ".bashrc" | ".bash_profile" | ".profile" | ".zshrc" => Some(Language::Shell),
            _ => None,
        };
        if by_name.is_some() {
            return by_name;
        }

        Language::from_extension(path.extension()?.to_str()?)
    }

    /// Detect the language from a `#!` interpreter line at the start of `text`.
    pub fn from_shebang(text: &str) -> Option<Language> {
        let first_line = text.lines().next()?;
        let captures = SHEBANG_PATTERN.captures(first_line)?;
        let interp = captures.name("interp")?.as_str();
        match interp {
            "python" | "pypy" => Some(Language::Python),
            "sh" | "bash" | "zsh" | "dash" | "ksh" => Some(Language::Shell),
            _ => None,
        }
    }

    /// Resolve a document's language from everything known about it.
    pub fn detect(id: Option<&str>, path: Option<&Path>, text: &str) -> Language {
        id.and_then(Language::from_id)
            .or_else(|| path.and_then(Language::from_path))
            .or_else(|| Language::from_shebang(text))
            .unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
