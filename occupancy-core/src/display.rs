//! Text-Ausgabe der Belegung auf dem Pixel-Display

use core::fmt::Write;

use heapless::String;

use crate::layout::TextLayout;
use crate::telemetry::LinkStatus;
use crate::traits::{DisplayError, TextDisplay};

/// Display-Breite in Pixeln
pub const DISPLAY_WIDTH_PX: u32 = 128;

/// Display-Höhe in Pixeln
pub const DISPLAY_HEIGHT_PX: u32 = 32;

/// Geschätzte Zeichenbreite für den Zeilenumbruch
pub const APPROX_CHAR_WIDTH_PX: u32 = 6;

/// Zeilenhöhe (8 px Font)
pub const LINE_HEIGHT_PX: i32 = 8;

/// Präfix vor dem Zählerstand
pub const COUNT_PREFIX: &str = "Occupancy: ";

/// Puffergröße für den Zähler-Text
pub const COUNT_TEXT_CAPACITY: usize = 24;

// Präfix + "255" muss immer passen
const _: () = assert!(COUNT_PREFIX.len() + 3 <= COUNT_TEXT_CAPACITY);

/// Statuszeile wenn die Telemetrie offline ist
pub const OFFLINE_TEXT: &str = "Telemetry offline";

/// Zeichnet "Occupancy: N" und ggf. die Offline-Zeile
pub struct DisplayRenderer {
    layout: TextLayout,
    status_y: i32,
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new(
            TextLayout::for_display(DISPLAY_WIDTH_PX, APPROX_CHAR_WIDTH_PX, LINE_HEIGHT_PX),
            DISPLAY_HEIGHT_PX as i32 - LINE_HEIGHT_PX,
        )
    }
}

impl DisplayRenderer {
    /// `status_y`: Oberkante der Offline-Statuszeile
    pub const fn new(layout: TextLayout, status_y: i32) -> Self {
        Self { layout, status_y }
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Formatiert den Zähler-Text
    pub fn format_count(count: u8) -> String<COUNT_TEXT_CAPACITY> {
        let mut text = String::new();
        write!(text, "{}{}", COUNT_PREFIX, count).ok();
        text
    }

    /// Zeichnet den kompletten Bildschirm neu
    pub fn render<D: TextDisplay>(
        &self,
        display: &mut D,
        count: u8,
        link: LinkStatus,
    ) -> Result<(), DisplayError> {
        let text = Self::format_count(count);

        display.clear()?;
        for line in self.layout.lines(&text) {
            display.draw_text(line.x, line.y, line.text)?;
        }
        if link == LinkStatus::Offline {
            display.draw_text(0, self.status_y, OFFLINE_TEXT)?;
        }
        display.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(DisplayRenderer::format_count(0).as_str(), "Occupancy: 0");
        assert_eq!(DisplayRenderer::format_count(255).as_str(), "Occupancy: 255");
    }

    #[test]
    fn test_default_layout_fits_count_on_one_line() {
        let renderer = DisplayRenderer::default();
        let text = DisplayRenderer::format_count(10);
        assert_eq!(renderer.layout().line_count(&text), 1);
    }
}
