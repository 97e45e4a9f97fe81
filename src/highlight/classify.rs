//! The highlighting pass: text in, partition of classified tokens out.
//!
//! A [`Highlighter`] owns a registry of tokenizers keyed by [`Language`].
//! [`Highlighter::classify`] runs the matching tokenizer once and returns a
//! [`Classified`] result whose iterator walks the tokenizer output lazily,
//! filling every gap with a plain token so that the emitted tokens always
//! partition the text exactly.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::lexers::{JsonTokenizer, PythonTokenizer, RustTokenizer};
use super::{HighlightError, Language, Token, TokenKind};

/// A lexer for one language.
///
/// Implementations report each token's absolute byte range in the text they
/// were given. Ranges must be in ascending order; gaps between them are fine
/// and are classified as plain.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, HighlightError>;
}

/// Classifies document text using a per-instance set of tokenizers.
#[derive(Clone, Default)]
pub struct Highlighter {
    tokenizers: HashMap<Language, Arc<dyn Tokenizer>>,
}

impl fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut languages: Vec<_> = self.tokenizers.keys().map(|l| l.id()).collect();
        languages.sort_unstable();
        f.debug_struct("Highlighter")
            .field("languages", &languages)
            .finish()
    }
}

impl Highlighter {
    /// A highlighter with no tokenizers; every language gets the plain fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A highlighter with the built-in Python, Rust and JSON tokenizers.
    pub fn builtin() -> Self {
        let mut highlighter = Self::new();
        highlighter.register(Language::Python, PythonTokenizer);
        highlighter.register(Language::Rust, RustTokenizer);
        highlighter.register(Language::Json, JsonTokenizer);
        highlighter
    }

    /// Register (or replace) the tokenizer for `language`.
    pub fn register<T: Tokenizer + 'static>(&mut self, language: Language, tokenizer: T) {
        self.tokenizers.insert(language, Arc::new(tokenizer));
    }

    pub fn supports(&self, language: Language) -> bool {
        self.tokenizers.contains_key(&language)
    }

    fn tokenizer(&self, language: Language) -> Result<&dyn Tokenizer, HighlightError> {
        self.tokenizers
            .get(&language)
            .map(|t| t.as_ref())
            .ok_or(HighlightError::TokenizerUnavailable { language })
    }

    /// Classify `text` as `language`.
    ///
    /// Never fails: a missing or failing tokenizer yields a single plain token
    /// covering the whole text.
    pub fn classify<'t>(&self, text: &'t str, language: Language) -> Classified<'t> {
        let lexemes = match self.tokenizer(language).and_then(|t| t.tokenize(text)) {
            Ok(lexemes) => lexemes,
            Err(err) => {
                tracing::debug!(%err, language = language.id(), "using plain classification");
                Vec::new()
            }
        };

        Classified {
            text,
            lexemes: lexemes.into(),
        }
    }
}

/// Classify `text` with the built-in tokenizers.
pub fn classify(text: &str, language: Language) -> Classified<'_> {
    Highlighter::builtin().classify(text, language)
}

/// The result of one classification pass.
///
/// Iterating is lazy and can be restarted any number of times; every
/// iteration yields the same tokens.
#[derive(Debug, Clone)]
pub struct Classified<'t> {
    text: &'t str,
    lexemes: Arc<[Token]>,
}

impl<'t> Classified<'t> {
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn iter(&self) -> Tokens<'t> {
        Tokens {
            text: self.text,
            lexemes: Arc::clone(&self.lexemes),
            next_lexeme: 0,
            cursor: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<Token> {
        self.iter().collect()
    }
}

impl<'t> IntoIterator for &Classified<'t> {
    type Item = Token;
    type IntoIter = Tokens<'t>;

    fn into_iter(self) -> Tokens<'t> {
        self.iter()
    }
}

impl<'t> IntoIterator for Classified<'t> {
    type Item = Token;
    type IntoIter = Tokens<'t>;

    fn into_iter(self) -> Tokens<'t> {
        Tokens {
            text: self.text,
            lexemes: self.lexemes,
            next_lexeme: 0,
            cursor: 0,
        }
    }
}

/// Iterator over the tokens of a [`Classified`] text.
#[derive(Debug, Clone)]
pub struct Tokens<'t> {
    text: &'t str,
    lexemes: Arc<[Token]>,
    next_lexeme: usize,
    /// Byte offset up to which tokens have been emitted.
    cursor: usize,
}

impl Tokens<'_> {
    /// Check a tokenizer range against the text and the tokens already emitted.
    fn validate(&self, lexeme: &Token) -> Result<(), HighlightError> {
        let len = self.text.len();
        let in_bounds = lexeme.start >= self.cursor
            && lexeme.end <= len
            && self.text.is_char_boundary(lexeme.start)
            && self.text.is_char_boundary(lexeme.end);
        if in_bounds {
            Ok(())
        } else {
            Err(HighlightError::InvalidRange {
                start: lexeme.start,
                end: lexeme.end,
                len,
            })
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let len = self.text.len();

        loop {
            if self.cursor >= len {
                return None;
            }

            let Some(lexeme) = self.lexemes.get(self.next_lexeme) else {
                // Tail after the last lexeme.
                let token = Token::new(TokenKind::Plain, self.cursor..len);
                self.cursor = len;
                return Some(token);
            };

            if lexeme.is_empty() {
                self.next_lexeme += 1;
                continue;
            }

            if let Err(err) = self.validate(lexeme) {
                tracing::trace!(%err, "dropping token");
                self.next_lexeme += 1;
                continue;
            }

            if lexeme.start > self.cursor {
                let token = Token::new(TokenKind::Plain, self.cursor..lexeme.start);
                self.cursor = lexeme.start;
                return Some(token);
            }

            let token = lexeme.clone();
            self.next_lexeme += 1;
            self.cursor = token.end;
            return Some(token);
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits a fixed list of tokens regardless of input.
    struct Scripted(Vec<Token>);

    impl Tokenizer for Scripted {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>, HighlightError> {
            Ok(self.0.clone())
        }
    }

    /// Always fails.
    struct Broken;

    impl Tokenizer for Broken {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>, HighlightError> {
            Err(HighlightError::TokenizerUnavailable {
                language: Language::Python,
            })
        }
    }

    /// Classifies every whitespace-separated `foo` as a keyword by position.
    struct FooKeywords;

    impl Tokenizer for FooKeywords {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>, HighlightError> {
            Ok(text
                .match_indices("foo")
                .map(|(i, m)| Token::new(TokenKind::Keyword, i..i + m.len()))
                .collect())
        }
    }

    fn scripted(tokens: Vec<Token>) -> Highlighter {
        let mut h = Highlighter::new();
        h.register(Language::Python, Scripted(tokens));
        h
    }

    fn kw(range: std::ops::Range<usize>) -> Token {
        Token::new(TokenKind::Keyword, range)
    }

    fn plain(range: std::ops::Range<usize>) -> Token {
        Token::new(TokenKind::Plain, range)
    }

    fn assert_partition(text: &str, tokens: &[Token]) {
        let mut expected_start = 0;
        for token in tokens {
            assert_eq!(token.start, expected_start, "gap or overlap at {token:?}");
            assert!(!token.is_empty(), "empty token {token:?}");
            expected_start = token.end;
        }
        assert_eq!(expected_start, text.len());
    }

    #[test]
    fn repeated_tokens_get_their_own_ranges() {
        let mut h = Highlighter::new();
        h.register(Language::Python, FooKeywords);
        let tokens = h.classify("foo foo", Language::Python).to_vec();
        assert_eq!(tokens, vec![kw(0..3), plain(3..4), kw(4..7)]);
    }

    #[test]
    fn fallback_without_tokenizer() {
        let h = Highlighter::new();
        let tokens = h.classify("fn main() {}", Language::Rust).to_vec();
        assert_eq!(tokens, vec![plain(0..12)]);
    }

    #[test]
    fn fallback_when_tokenizer_fails() {
        let mut h = Highlighter::new();
        h.register(Language::Python, Broken);
        let tokens = h.classify("import os", Language::Python).to_vec();
        assert_eq!(tokens, vec![plain(0..9)]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let h = Highlighter::builtin();
        for lang in Language::ALL {
            assert_eq!(h.classify("", lang).iter().count(), 0);
        }
        let classified = Highlighter::new().classify("", Language::Python);
        assert_eq!(classified.iter().count(), 0);
    }

    #[test]
    fn zero_length_tokens_are_skipped() {
        let h = scripted(vec![kw(0..0), kw(0..2), kw(2..2), kw(3..3)]);
        let tokens = h.classify("if x", Language::Python).to_vec();
        assert_eq!(tokens, vec![kw(0..2), plain(2..4)]);
    }

    #[test]
    fn out_of_range_tokens_are_dropped() {
        let h = scripted(vec![kw(0..2), kw(3..99)]);
        let tokens = h.classify("if x", Language::Python).to_vec();
        assert_eq!(tokens, vec![kw(0..2), plain(2..4)]);
    }

    #[test]
    fn overlapping_tokens_are_dropped() {
        let h = scripted(vec![kw(0..3), kw(2..5), kw(6..8)]);
        let text = "abc def gh";
        let tokens = h.classify(text, Language::Python).to_vec();
        assert_eq!(tokens, vec![kw(0..3), plain(3..6), kw(6..8), plain(8..10)]);
        assert_partition(text, &tokens);
    }

    #[test]
    fn tokens_splitting_a_char_are_dropped() {
        // 'é' is two bytes.
        let h = scripted(vec![kw(0..1)]);
        let tokens = h.classify("éa", Language::Python).to_vec();
        assert_eq!(tokens, vec![plain(0..3)]);
    }

    #[test]
    fn iteration_is_restartable() {
        let h = Highlighter::builtin();
        let classified = h.classify("def f(x):\n    return 'x' # done\n", Language::Python);
        let mut iter = classified.iter();
        let first = iter.next();
        let again: Vec<_> = classified.iter().collect();
        assert_eq!(again.first().cloned(), first);
        assert_eq!(again, classified.to_vec());
        let rest: Vec<_> = iter.collect();
        assert_eq!(rest.len() + 1, again.len());
    }

    #[test]
    fn classification_is_idempotent_and_partitions() {
        let h = Highlighter::builtin();
        let samples = [
            (Language::Python, "class A:\n    x = \"s\"  # c\n"),
            (Language::Rust, "fn main() { let s = \"hi\"; /* c */ }"),
            (Language::Json, "{\"a\": [1, true, null]}"),
            (Language::Markdown, "# title\n\ntext"),
        ];
        for (lang, text) in samples {
            let first = h.classify(text, lang).to_vec();
            let second = h.classify(text, lang).to_vec();
            assert_eq!(first, second);
            assert_partition(text, &first);
        }
    }

    #[test]
    fn free_function_uses_builtin_tokenizers() {
        let tokens = classify("None", Language::Python).to_vec();
        assert_eq!(tokens, vec![kw(0..4)]);
    }

    #[test]
    fn debug_lists_languages() {
        let h = Highlighter::builtin();
        assert_eq!(
            format!("{h:?}"),
            r#"Highlighter { languages: ["json", "python", "rust"] }"#
        );
        assert!(h.supports(Language::Rust));
        assert!(!h.supports(Language::Toml));
    }
}
