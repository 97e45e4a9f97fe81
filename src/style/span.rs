use std::ops::Range;

use super::{Color, Theme};
use crate::highlight::{Token, TokenKind};

/// A token range with the colour it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub kind: TokenKind,
    pub range: Range<usize>,
    pub color: Color,
}

/// Derive the styled spans for `tokens` under `theme`.
///
/// Tokens without a theme colour (plain text) produce no span.
pub fn style_spans<'a, I>(tokens: I, theme: &'a Theme) -> impl Iterator<Item = StyleSpan> + 'a
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    tokens.into_iter().filter_map(move |token| {
        let color = theme.color_for(token.kind)?;
        Some(StyleSpan {
            kind: token.kind,
            range: token.range(),
            color,
        })
    })
}
