//! Built-in tokenizers, one logos lexer per language.
//!
//! Each lexer classifies only what it recognises. Identifiers, numbers and
//! punctuation are lexed so that keywords are never matched inside longer
//! words, then dropped; they come back as plain gap tokens in the
//! classification pass.

mod json;
mod python;
mod rust;

pub use json::JsonTokenizer;
pub use python::PythonTokenizer;
pub use rust::RustTokenizer;

use logos::{Lexer, Logos};

use super::{Token, TokenKind};

/// Maps a lexeme to its highlighting class.
trait Classify {
    fn kind(&self) -> TokenKind;
}

/// Run `lexer` to the end, keeping every non-plain lexeme with its span.
///
/// Input the lexer does not recognise is skipped.
fn collect<'s, T>(lexer: Lexer<'s, T>) -> Vec<Token>
where
    T: Logos<'s, Source = str> + Classify,
{
    lexer
        .spanned()
        .filter_map(|(lexeme, span)| {
            let kind = lexeme.ok()?.kind();
            (kind != TokenKind::Plain).then(|| Token::new(kind, span))
        })
        .collect()
}

/// Extend the current lexeme past the next occurrence of `closing`, or to
/// the end of input when there is none.
fn bump_past<'s, T>(lex: &mut Lexer<'s, T>, closing: &str)
where
    T: Logos<'s, Source = str>,
{
    let rest = lex.remainder();
    let n = rest
        .find(closing)
        .map(|i| i + closing.len())
        .unwrap_or(rest.len());
    lex.bump(n);
}
