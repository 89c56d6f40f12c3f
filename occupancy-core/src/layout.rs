//! Text-Layout: Zeilenumbruch in Zeilen fester Breite
//!
//! Unabhängig vom Inhalt nutzbar. Der Text wird in aufeinanderfolgende
//! Stücke von höchstens `max_chars_per_line` Zeichen geteilt, jedes Stück
//! bekommt seine eigene Textzeile.

/// Ein Stück Text mit Zielposition in Pixeln
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLine<'t> {
    pub x: i32,
    pub y: i32,
    pub text: &'t str,
}

/// Zeilenumbruch-Parameter für ein Display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextLayout {
    max_chars_per_line: usize,
    line_height_px: i32,
}

impl TextLayout {
    pub const fn new(max_chars_per_line: usize, line_height_px: i32) -> Self {
        Self {
            max_chars_per_line,
            line_height_px,
        }
    }

    /// Layout aus Display-Breite und geschätzter Zeichenbreite
    ///
    /// 128 px / 6 px ergibt 21 Zeichen pro Zeile.
    pub const fn for_display(width_px: u32, char_width_px: u32, line_height_px: i32) -> Self {
        let max = if char_width_px == 0 {
            0
        } else {
            (width_px / char_width_px) as usize
        };
        Self::new(max, line_height_px)
    }

    pub fn max_chars_per_line(&self) -> usize {
        self.max_chars_per_line
    }

    pub fn line_height_px(&self) -> i32 {
        self.line_height_px
    }

    /// Anzahl Zeilen, die `text` belegt
    pub fn line_count(&self, text: &str) -> usize {
        self.lines(text).count()
    }

    /// Zerlegt `text` in platzierte Zeilen, beginnend bei y = 0
    ///
    /// Passt der Text in eine Zeile (oder ist die Zeilenbreite 0), gibt es
    /// genau eine Zeile.
    pub fn lines<'t>(&self, text: &'t str) -> Lines<'t> {
        Lines {
            rest: text,
            max_chars: self.max_chars_per_line,
            line_height_px: self.line_height_px,
            y: 0,
            first: true,
        }
    }
}

/// Iterator über die Zeilen eines umbrochenen Textes
pub struct Lines<'t> {
    rest: &'t str,
    max_chars: usize,
    line_height_px: i32,
    y: i32,
    first: bool,
}

impl<'t> Iterator for Lines<'t> {
    type Item = PlacedLine<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() && !self.first {
            return None;
        }
        self.first = false;

        let split = if self.max_chars == 0 {
            self.rest.len()
        } else {
            self.rest
                .char_indices()
                .nth(self.max_chars)
                .map_or(self.rest.len(), |(idx, _)| idx)
        };

        let (chunk, rest) = self.rest.split_at(split);
        self.rest = rest;

        let line = PlacedLine {
            x: 0,
            y: self.y,
            text: chunk,
        };
        self.y += self.line_height_px;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_metrics() {
        let layout = TextLayout::for_display(128, 6, 8);
        assert_eq!(layout.max_chars_per_line(), 21);
    }

    #[test]
    fn test_short_text_single_line_at_top() {
        let layout = TextLayout::new(21, 8);
        let mut lines = layout.lines("Occupancy: 3");
        assert_eq!(
            lines.next(),
            Some(PlacedLine {
                x: 0,
                y: 0,
                text: "Occupancy: 3"
            })
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_exact_fit_is_single_line() {
        let layout = TextLayout::new(4, 8);
        assert_eq!(layout.line_count("abcd"), 1);
    }

    #[test]
    fn test_long_text_wraps_in_chunks() {
        let layout = TextLayout::new(4, 8);
        let mut lines = layout.lines("abcdefghij");
        assert_eq!(lines.next().map(|l| (l.y, l.text)), Some((0, "abcd")));
        assert_eq!(lines.next().map(|l| (l.y, l.text)), Some((8, "efgh")));
        assert_eq!(lines.next().map(|l| (l.y, l.text)), Some((16, "ij")));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_multibyte_chars_are_not_split() {
        let layout = TextLayout::new(2, 8);
        let mut lines = layout.lines("äöü");
        assert_eq!(lines.next().map(|l| l.text), Some("äö"));
        assert_eq!(lines.next().map(|l| l.text), Some("ü"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        let layout = TextLayout::new(21, 8);
        assert_eq!(layout.line_count(""), 1);
    }
}
