use logos::{Lexer, Logos};

use super::{collect, Classify};
use crate::highlight::{HighlightError, Token, TokenKind, Tokenizer};

/// Python tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTokenizer;

impl Tokenizer for PythonTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, HighlightError> {
        Ok(collect(PyLexeme::lexer(text)))
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum PyLexeme {
    #[token("False")]
    #[token("None")]
    #[token("True")]
    #[token("and")]
    #[token("as")]
    #[token("assert")]
    #[token("async")]
    #[token("await")]
    #[token("break")]
    #[token("class")]
    #[token("continue")]
    #[token("def")]
    #[token("del")]
    #[token("elif")]
    #[token("else")]
    #[token("except")]
    #[token("finally")]
    #[token("for")]
    #[token("from")]
    #[token("global")]
    #[token("if")]
    #[token("import")]
    #[token("in")]
    #[token("is")]
    #[token("lambda")]
    #[token("nonlocal")]
    #[token("not")]
    #[token("or")]
    #[token("pass")]
    #[token("raise")]
    #[token("return")]
    #[token("try")]
    #[token("while")]
    #[token("with")]
    #[token("yield")]
    Keyword,

    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?'''"#, |lex| close_triple(lex, b'\''))]
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?""""#, |lex| close_triple(lex, b'"'))]
    TripleString,

    // Unterminated strings stop at the end of the line.
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?'([^'\\\r\n]|\\[^\r\n])*'?"#)]
    #[regex(r#"([rRbBuUfF]|[rR][bBfF]|[bBfF][rR])?"([^"\\\r\n]|\\[^\r\n])*"?"#)]
    String,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r"\*\*=?|//=?|<<=?|>>=?|->|:=|[-+*/%@&|^<>=!]=|[-+*/%@&|^~<>=]")]
    Operator,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9a-zA-Z_]*)?")]
    Number,
}

impl Classify for PyLexeme {
    fn kind(&self) -> TokenKind {
        match self {
            PyLexeme::Keyword => TokenKind::Keyword,
            PyLexeme::TripleString | PyLexeme::String => TokenKind::String,
            PyLexeme::Comment => TokenKind::Comment,
            PyLexeme::Operator => TokenKind::Operator,
            PyLexeme::Ident | PyLexeme::Number => TokenKind::Plain,
        }
    }
}

/// Extend a triple-quoted string past its closing quotes, honouring
/// backslash escapes. Unterminated strings run to the end of input.
fn close_triple(lex: &mut Lexer<'_, PyLexeme>, quote: u8) {
    let rest = lex.remainder().as_bytes();
    let closing = [quote; 3];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            _ if rest[i..].starts_with(&closing) => {
                lex.bump(i + closing.len());
                return;
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
}
