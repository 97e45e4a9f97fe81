//! A [`StyleSurface`] that renders to 24-bit ANSI terminal output.

use std::fmt::Write;
use std::ops::Range;

use owo_colors::OwoColorize;

use super::{Color, StyleSurface};

/// Holds a text and its applied styles until rendered.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    text: String,
    styles: Vec<(Range<usize>, Color)>,
    /// Foreground and background for the whole text, once a theme is applied.
    base: Option<(Color, Color)>,
}

impl TerminalSurface {
    pub fn new(text: String) -> Self {
        Self {
            text,
            styles: Vec::new(),
            base: None,
        }
    }

    pub fn styles(&self) -> &[(Range<usize>, Color)] {
        &self.styles
    }

    /// Render the text with its styles as ANSI escape sequences.
    ///
    /// Unstyled text is drawn in the base foreground, and everything on the
    /// base background. Styles overlapping an earlier style are ignored.
    pub fn render(&self) -> String {
        let mut styles = self.styles.clone();
        styles.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(self.text.len() * 2);
        let mut cursor = 0;
        for (range, color) in styles {
            if range.start < cursor {
                continue;
            }
            let before = self.text.get(cursor..range.start);
            let styled = self.text.get(range.clone());
            let (Some(before), Some(styled)) = (before, styled) else {
                continue;
            };
            self.paint(&mut out, before, None);
            self.paint(&mut out, styled, Some(color));
            cursor = range.end;
        }
        self.paint(&mut out, &self.text[cursor..], None);
        out
    }

    /// Append `text` in `color`, falling back to the base colours.
    fn paint(&self, out: &mut String, text: &str, color: Option<Color>) {
        if text.is_empty() {
            return;
        }
        let Some(fg) = color.or(self.base.map(|(fg, _)| fg)) else {
            out.push_str(text);
            return;
        };
        let styled = text.truecolor(fg.r, fg.g, fg.b);
        let _ = match self.base {
            Some((_, bg)) => write!(out, "{}", styled.on_truecolor(bg.r, bg.g, bg.b)),
            None => write!(out, "{}", styled),
        };
    }

    /// The text without any styling.
    pub fn render_plain(&self) -> &str {
        &self.text
    }
}

impl StyleSurface for TerminalSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn clear_styles(&mut self) {
        self.styles.clear();
        self.base = None;
    }

    fn apply_style(&mut self, range: Range<usize>, color: Color) {
        self.styles.push((range, color));
    }

    fn set_base_colors(&mut self, foreground: Color, background: Color) {
        self.base = Some((foreground, background));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Highlighter, Language};
    use crate::style::{restyle, Theme};

    fn rendered(text: &str, language: Language, theme: &Theme) -> String {
        let mut surface = TerminalSurface::new(text.to_string());
        restyle(&mut surface, &Highlighter::builtin(), language, theme);
        surface.render()
    }

    #[test]
    fn renders_styled_ranges() {
        let mut surface = TerminalSurface::new("if x: pass".to_string());
        restyle(
            &mut surface,
            &Highlighter::builtin(),
            Language::Python,
            &Theme::light(),
        );
        assert_eq!(surface.styles().len(), 2);

        let out = surface.render();
        // keyword: blue on white
        assert!(out.starts_with("\x1b[48;2;255;255;255m\x1b[38;2;0;0;255mif"));
        assert!(out.contains(" x: "));
        assert!(out.contains("pass"));
        assert_eq!(surface.render_plain(), "if x: pass");
    }

    #[test]
    fn theme_base_colors_apply_to_plain_text() {
        let light = rendered("hello world\n", Language::PlainText, &Theme::light());
        let dark = rendered("hello world\n", Language::PlainText, &Theme::dark());
        assert_ne!(light, dark);

        assert!(light.contains("\x1b[38;2;0;0;0m"));
        assert!(light.contains("\x1b[48;2;255;255;255m"));
        assert!(dark.contains("\x1b[38;2;255;255;255m"));
        assert!(dark.contains("\x1b[48;2;0;0;0m"));
        assert!(dark.contains("hello world\n"));
    }

    #[test]
    fn unstyled_text_renders_verbatim() {
        let surface = TerminalSurface::new("plain words\n".to_string());
        assert_eq!(surface.render(), "plain words\n");
    }

    #[test]
    fn overlapping_and_invalid_styles_are_skipped() {
        let mut surface = TerminalSurface::new("abcdef".to_string());
        surface.apply_style(0..3, Color::BLUE);
        surface.apply_style(2..4, Color::GREEN);
        surface.apply_style(4..40, Color::GRAY);
        let out = surface.render();
        assert!(!out.contains("\x1b[38;2;0;128;0m"));
        assert!(!out.contains("\x1b[38;2;128;128;128m"));
        assert!(out.ends_with("def"));
    }
}
