//! ui::style
//!
//! Terminal styling: colors, ANSI-aware measurement and bordered blocks.
//!
//! # Design
//!
//! Blocks are rendered in-process instead of by an external styling program,
//! so rendering is a pure function of its input and the exact number of
//! produced lines is known. All widths are display widths of the text with
//! ANSI escape sequences removed.
//!
//! A block has a one-column margin on each side, a rounded border and
//! two columns of padding inside the border:
//!
//! ```text
//!  ╭──────────╮
//!  │  text    │
//!  ╰──────────╯
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use crossterm::style::{Color, StyledContent, Stylize};
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Brand color used for borders, headers and prompts.
pub const PRIMARY: Color = Color::Rgb {
    r: 0xff,
    g: 0x88,
    b: 0xff,
};

/// Darker shade of [`PRIMARY`].
pub const PRIMARY_DARKER: Color = Color::Rgb {
    r: 0x80,
    g: 0x44,
    b: 0x80,
};

/// Hex form of [`PRIMARY`] for external programs.
pub const PRIMARY_HEX: &str = "#ff88ff";

/// Hex form of [`PRIMARY_DARKER`] for external programs.
pub const PRIMARY_DARKER_HEX: &str = "#804480";

const MARGIN: usize = 1;
const PADDING: usize = 2;

/// Columns a block adds around its content (padding on both sides).
pub const BLOCK_PADDING: usize = 2 * PADDING;

/// Style `text` in the primary color.
pub fn primary<D: std::fmt::Display>(text: D) -> StyledContent<D> {
    crossterm::style::style(text).with(PRIMARY)
}

fn ansi_regex() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
    })
}

/// Remove ANSI escape sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ansi_regex().replace_all(text, "")
}

/// Display width of `text`, ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text)
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

/// Split a styled line into lines of at most `width` display columns.
///
/// Escape sequences are kept with the text that follows them and never
/// count towards the width. Always returns at least one line.
pub fn wrap_styled(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    let mut push_text = |text: &str, current: &mut String, current_width: &mut usize| {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if *current_width + w > width && *current_width > 0 {
                lines.push(std::mem::take(current));
                *current_width = 0;
            }
            current.push(c);
            *current_width += w;
        }
    };

    let mut last = 0;
    for escape in ansi_regex().find_iter(line) {
        push_text(&line[last..escape.start()], &mut current, &mut current_width);
        current.push_str(escape.as_str());
        last = escape.end();
    }
    push_text(&line[last..], &mut current, &mut current_width);

    lines.push(current);
    lines
}

/// Rounded-border block with a fixed outer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Width of the block including padding, excluding border and margin
    pub width: usize,
    pub border: Color,
}

impl Block {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(BLOCK_PADDING + 1),
            border: PRIMARY,
        }
    }

    /// Width available to content lines.
    pub fn content_width(&self) -> usize {
        self.width - BLOCK_PADDING
    }

    /// Width of the block including border and margin on both sides.
    pub fn outer_width(&self) -> usize {
        self.width + 2 + 2 * MARGIN
    }

    /// Render `lines` inside the block. Long lines wrap.
    pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let margin = " ".repeat(MARGIN);
        let padding = " ".repeat(PADDING);
        let horizontal = "─".repeat(self.width);
        let side = "│".with(self.border).to_string();

        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push(format!(
            "{margin}{}",
            format!("╭{horizontal}╮").with(self.border)
        ));
        for line in lines {
            for wrapped in wrap_styled(line.as_ref(), self.content_width()) {
                let fill = " ".repeat(self.content_width().saturating_sub(visible_width(&wrapped)));
                out.push(format!(
                    "{margin}{side}{padding}{wrapped}{fill}{padding}{side}"
                ));
            }
        }
        out.push(format!(
            "{margin}{}",
            format!("╰{horizontal}╯").with(self.border)
        ));
        out
    }
}

/// Left padding that centers text of `text_width` columns over `width`.
pub fn center_offset(width: usize, text_width: usize) -> usize {
    let offset = (width as f64 / 2.0 - text_width as f64 / 2.0).round();
    if offset > 0.0 {
        offset as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod measurement {
        use super::*;

        #[test]
        fn strips_colors() {
            let styled = format!("{} and {}", "red".red(), "bold".bold());
            assert_eq!(strip_ansi(&styled), "red and bold");
            assert_eq!(visible_width(&styled), 12);
        }

        #[test]
        fn wide_characters() {
            assert_eq!(visible_width("✔"), 1);
            assert_eq!(visible_width("日本"), 4);
        }

        #[test]
        fn plain_text_unchanged() {
            assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        }
    }

    mod wrapping {
        use super::*;

        #[test]
        fn short_line_is_single() {
            assert_eq!(wrap_styled("abc", 10), vec!["abc"]);
            assert_eq!(wrap_styled("", 10), vec![""]);
        }

        #[test]
        fn long_line_splits_at_width() {
            assert_eq!(wrap_styled("abcdefg", 3), vec!["abc", "def", "g"]);
        }

        #[test]
        fn escapes_do_not_count() {
            let styled = format!("{}{}", "abc".red(), "def".blue());
            let lines = wrap_styled(&styled, 3);
            assert_eq!(lines.len(), 2);
            assert_eq!(strip_ansi(&lines[0]), "abc");
            assert_eq!(strip_ansi(&lines[1]), "def");
        }
    }

    mod block {
        use super::*;

        #[test]
        fn layout() {
            let rendered: Vec<String> = Block::new(9)
                .render(&["hello"])
                .iter()
                .map(|l| strip_ansi(l).into_owned())
                .collect();
            assert_eq!(
                rendered,
                vec![" ╭─────────╮", " │  hello  │", " ╰─────────╯"]
            );
            assert_eq!(Block::new(9).outer_width(), 13);
        }

        #[test]
        fn wraps_overlong_content() {
            let rendered = Block::new(7).render(&["abcdef"]);
            assert_eq!(rendered.len(), 4);
            assert!(rendered
                .iter()
                .all(|l| visible_width(l) == visible_width(&rendered[0])));
        }
    }

    #[test]
    fn centering() {
        assert_eq!(center_offset(40, 10), 15);
        assert_eq!(center_offset(5, 10), 0);
        assert_eq!(center_offset(11, 4), 4);
    }
}
