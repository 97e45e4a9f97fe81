use logos::Logos;

use super::{bump_past, collect, Classify};
use crate::highlight::{HighlightError, Token, TokenKind, Tokenizer};

/// JSON tokenizer. Accepts the `//` and `/* */` comments of JSONC.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTokenizer;

impl Tokenizer for JsonTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, HighlightError> {
        Ok(collect(JsonLexeme::lexer(text)))
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum JsonLexeme {
    #[token("true")]
    #[token("false")]
    #[token("null")]
    Keyword,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"?"#)]
    String,

    #[regex(r"//[^\r\n]*")]
    #[token("/*", |lex| bump_past(lex, "*/"))]
    Comment,

    #[token(":")]
    #[token(",")]
    Operator,

    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Bare,
}

impl Classify for JsonLexeme {
    fn kind(&self) -> TokenKind {
        match self {
            JsonLexeme::Keyword => TokenKind::Keyword,
            JsonLexeme::String => TokenKind::String,
            JsonLexeme::Comment => TokenKind::Comment,
            JsonLexeme::Operator => TokenKind::Operator,
            JsonLexeme::Number | JsonLexeme::Bare => TokenKind::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<(TokenKind, &str)> {
        JsonTokenizer
            .tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, &text[t.range()]))
            .collect()
    }

    #[test]
    fn object() {
        assert_eq!(
            lex(r#"{"a": [1, true, null], "b\"": "x"}"#),
            vec![
                (TokenKind::String, r#""a""#),
                (TokenKind::Operator, ":"),
                (TokenKind::Operator, ","),
                (TokenKind::Keyword, "true"),
                (TokenKind::Operator, ","),
                (TokenKind::Keyword, "null"),
                (TokenKind::Operator, ","),
                (TokenKind::String, r#""b\"""#),
                (TokenKind::Operator, ":"),
                (TokenKind::String, r#""x""#),
            ]
        );
    }

    #[test]
    fn separators_are_operators() {
        assert_eq!(lex("[1, 2]"), vec![(TokenKind::Operator, ",")]);
        let tokens = JsonTokenizer.tokenize("[1, 2]").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Operator, 2..3)]);
    }

    #[test]
    fn bare_words_are_not_keywords() {
        assert_eq!(lex("nullable truthy"), vec![]);
    }

    #[test]
    fn comments() {
        assert_eq!(
            lex("// head\n{ /* a\nb */ \"k\": false }"),
            vec![
                (TokenKind::Comment, "// head"),
                (TokenKind::Comment, "/* a\nb */"),
                (TokenKind::String, "\"k\""),
                (TokenKind::Operator, ":"),
                (TokenKind::Keyword, "false"),
            ]
        );
    }
}
