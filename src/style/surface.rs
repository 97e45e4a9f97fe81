//! Applying highlight styles to an editor view.

use std::ops::Range;

use super::{style_spans, Color, Theme};
use crate::highlight::{Highlighter, Language};

/// A view that shows document text and can colour ranges of it.
///
/// Ranges are byte offsets into the text returned by [`StyleSurface::text`].
pub trait StyleSurface {
    fn text(&self) -> String;
    fn clear_styles(&mut self);
    fn apply_style(&mut self, range: Range<usize>, color: Color);

    /// Set the default text and background colours of the whole view.
    fn set_base_colors(&mut self, _foreground: Color, _background: Color) {}
}

/// Recolour `surface` from scratch.
///
/// Clears every previously applied style, sets the theme's foreground and
/// background, classifies the current text and applies one style per
/// non-plain token. Returns the number of styles applied.
pub fn restyle<S>(
    surface: &mut S,
    highlighter: &Highlighter,
    language: Language,
    theme: &Theme,
) -> usize
where
    S: StyleSurface + ?Sized,
{
    let text = surface.text();
    let classified = highlighter.classify(&text, language);

    surface.clear_styles();
    surface.set_base_colors(theme.foreground, theme.background);
    let mut applied = 0;
    for span in style_spans(&classified, theme) {
        surface.apply_style(span.range, span.color);
        applied += 1;
    }

    tracing::trace!(language = language.id(), applied, "restyled surface");
    applied
}
