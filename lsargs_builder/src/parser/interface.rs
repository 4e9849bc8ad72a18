use terminal_size::{terminal_size, Width};

/// The width of the attached terminal, if there is one.
pub(crate) fn terminal_width() -> Option<usize> {
    if let Some((Width(terminal_width), _)) = terminal_size() {
        Some(terminal_width as usize)
    } else {
        None
    }
}

/// A single wrapped line; `hyphen` marks a word broken across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'t> {
    pub text: &'t str,
    pub hyphen: bool,
}

/// Splits a paragraph into lines of at most `width` characters, breaking on spaces.
///
/// Words longer than the width are hyphenated (the hyphen counts towards the width).
/// The lines borrow from the paragraph, so wrapping never allocates.
pub(crate) struct Wrap<'t> {
    rest: &'t str,
    width: usize,
}

impl<'t> Wrap<'t> {
    pub(crate) fn new(paragraph: &'t str, width: Option<usize>) -> Self {
        Self {
            rest: paragraph,
            // Width must be at least 2, so we can hyphenate.
            width: width.unwrap_or(usize::MAX).max(2),
        }
    }
}

impl<'t> Iterator for Wrap<'t> {
    type Item = Line<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start_matches(' ');

        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        let mut line_end = 0;
        let mut line_width = 0;
        let mut offset = 0;

        for word in rest.split(' ') {
            let start = offset;
            offset += word.len() + 1;

            if word.is_empty() {
                continue;
            }

            let word_width = word.chars().count();

            if line_width == 0 {
                if word_width > self.width {
                    let (cut, _) = word
                        .char_indices()
                        .nth(self.width - 1)
                        .expect("internal error - the word is wider than the cut");
                    self.rest = &rest[start + cut..];
                    return Some(Line {
                        text: &rest[start..start + cut],
                        hyphen: true,
                    });
                }

                line_width = word_width;
            } else {
                // Spaces are single byte, so the gap in bytes is also its width.
                let gap = start - line_end;

                if line_width
                    .saturating_add(gap)
                    .saturating_add(word_width)
                    > self.width
                {
                    break;
                }

                line_width += gap + word_width;
            }

            line_end = start + word.len();
        }

        self.rest = &rest[line_end..];
        Some(Line {
            text: &rest[..line_end],
            hyphen: false,
        })
    }
}
