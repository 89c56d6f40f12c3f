//! 5×5 LED-Matrix: Muster-Auswahl und Serpentinen-Adressierung
//!
//! Die LEDs sind als durchgehender Strip im Zickzack über die Zeilen
//! verdrahtet. [`led_index`] rechnet (Zeile, Spalte) in die Position auf
//! dem Strip um, die Mustertabellen selbst sind zeilenweise notiert.

use rgb::RGB8;

use crate::traits::{LedError, SmartLedWriter};

/// Kantenlänge der Matrix
pub const MATRIX_SIZE: usize = 5;

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

/// Alarm-Frequenz beim Erreichen der Kapazität
pub const ALARM_TONE_HZ: u32 = 1_000;

/// Alarm-Dauer in Millisekunden
pub const ALARM_DURATION_MS: u32 = 500;

/// Semantischer Zustand der Belegung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapacityState {
    /// Es ist noch Platz frei
    Normal,
    /// Kapazität erreicht
    Full,
}

impl CapacityState {
    pub fn of(count: u8, capacity: u8) -> Self {
        if count >= capacity {
            CapacityState::Full
        } else {
            CapacityState::Normal
        }
    }
}

/// Zeilenweise Mustertabelle, `pattern[row][col]`
pub type Pattern = [[RGB8; MATRIX_SIZE]; MATRIX_SIZE];

const O: RGB8 = RGB8::new(0, 0, 0);
const G: RGB8 = RGB8::new(0, 255, 0);
const R: RGB8 = RGB8::new(255, 0, 0);

/// Grünes "Smiley" (V-Form) solange Platz frei ist
pub const NORMAL_PATTERN: Pattern = [
    [O, O, O, O, O],
    [G, O, O, O, G],
    [O, G, O, G, O],
    [O, O, G, O, O],
    [O, O, O, O, O],
];

/// Rotes "X" bei voller Belegung
pub const FULL_PATTERN: Pattern = [
    [R, O, O, O, R],
    [O, R, O, R, O],
    [O, O, R, O, O],
    [O, R, O, R, O],
    [R, O, O, O, R],
];

/// Mustertabelle für einen Belegungszustand
pub const fn pattern(state: CapacityState) -> &'static Pattern {
    match state {
        CapacityState::Normal => &NORMAL_PATTERN,
        CapacityState::Full => &FULL_PATTERN,
    }
}

/// Rechnet (Zeile, Spalte) in den Strip-Index um
///
/// Gerade Zeilen laufen vom Zeilen-Basisindex abwärts, ungerade Zeilen
/// gespiegelt. Ergebnis ist eine Bijektion auf `0..LED_COUNT`.
///
/// ```
/// # use occupancy_core::matrix::led_index;
/// assert_eq!(led_index(0, 0), 24);
/// assert_eq!(led_index(1, 0), 15);
/// assert_eq!(led_index(4, 4), 0);
/// ```
pub const fn led_index(row: usize, col: usize) -> usize {
    let base = (LED_COUNT - 1) - row * MATRIX_SIZE;
    if row % 2 == 0 {
        base - col
    } else {
        base - (MATRIX_SIZE - 1 - col)
    }
}

/// Kompletter Satz Pixel-Farben in Strip-Reihenfolge
///
/// Wird bei jeder Änderung komplett neu aus einer Mustertabelle erzeugt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFrame {
    pixels: [RGB8; LED_COUNT],
}

impl RenderFrame {
    pub fn from_pattern(pattern: &Pattern) -> Self {
        let mut pixels = [RGB8::default(); LED_COUNT];
        for (row, line) in pattern.iter().enumerate() {
            for (col, color) in line.iter().enumerate() {
                pixels[led_index(row, col)] = *color;
            }
        }
        Self { pixels }
    }

    pub fn for_state(state: CapacityState) -> Self {
        Self::from_pattern(pattern(state))
    }

    /// Pixel in Strip-Reihenfolge (Index 0 = erste LED an der Datenleitung)
    pub fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.pixels
    }

    /// Farbe an Matrix-Position (Zeile, Spalte)
    pub fn at(&self, row: usize, col: usize) -> RGB8 {
        self.pixels[led_index(row, col)]
    }

    /// Gedimmte Kopie, `brightness` 255 = unverändert
    pub fn scaled(&self, brightness: u8) -> Self {
        let scale = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
        let mut pixels = self.pixels;
        for px in pixels.iter_mut() {
            *px = RGB8::new(scale(px.r), scale(px.g), scale(px.b));
        }
        Self { pixels }
    }
}

/// Anforderung für einen einzelnen Alarm-Ton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmPulse {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

impl AlarmPulse {
    pub const CAPACITY_REACHED: Self = Self {
        freq_hz: ALARM_TONE_HZ,
        duration_ms: ALARM_DURATION_MS,
    };
}

/// Ergebnis eines Matrix-Updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOutcome {
    /// Gesetzt beim Übergang in [`CapacityState::Full`]
    pub alarm: Option<AlarmPulse>,
    pub written: Result<(), LedError>,
}

/// Wählt das Muster und merkt sich den letzten Zustand für den Alarm
pub struct MatrixRenderer {
    brightness: u8,
    last_state: Option<CapacityState>,
}

impl MatrixRenderer {
    pub const fn new(brightness: u8) -> Self {
        Self {
            brightness,
            last_state: None,
        }
    }

    /// Schreibt das Muster für `state` auf die Matrix
    ///
    /// Der Alarm wird nur beim Wechsel in den vollen Zustand angefordert,
    /// auch wenn das Schreiben der Pixel fehlschlägt.
    pub fn render<L: SmartLedWriter>(&mut self, state: CapacityState, led: &mut L) -> MatrixOutcome {
        let frame = RenderFrame::for_state(state).scaled(self.brightness);
        let written = led.write(frame.pixels());

        let alarm = (state == CapacityState::Full && self.last_state != Some(CapacityState::Full))
            .then_some(AlarmPulse::CAPACITY_REACHED);
        self.last_state = Some(state);

        MatrixOutcome { alarm, written }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_index_is_bijection() {
        let mut seen = [false; LED_COUNT];
        for row in 0..MATRIX_SIZE {
            for col in 0..MATRIX_SIZE {
                let idx = led_index(row, col);
                assert!(idx < LED_COUNT);
                assert!(!seen[idx], "index {} used twice", idx);
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_led_index_serpentine_rows() {
        // Zeile 0: 24, 23, 22, 21, 20
        assert_eq!(led_index(0, 0), 24);
        assert_eq!(led_index(0, 4), 20);
        // Zeile 1 gespiegelt: 15, 16, 17, 18, 19
        assert_eq!(led_index(1, 0), 15);
        assert_eq!(led_index(1, 4), 19);
        assert_eq!(led_index(2, 0), 14);
    }

    #[test]
    fn test_capacity_state_of() {
        assert_eq!(CapacityState::of(0, 10), CapacityState::Normal);
        assert_eq!(CapacityState::of(9, 10), CapacityState::Normal);
        assert_eq!(CapacityState::of(10, 10), CapacityState::Full);
    }

    #[test]
    fn test_frame_places_pattern_by_row_and_col() {
        let frame = RenderFrame::for_state(CapacityState::Normal);
        assert_eq!(frame.at(1, 0), G);
        assert_eq!(frame.at(3, 2), G);
        assert_eq!(frame.at(0, 0), O);
        assert_eq!(frame.pixels()[led_index(2, 3)], G);
    }

    #[test]
    fn test_scaled_dims_channels() {
        let frame = RenderFrame::for_state(CapacityState::Full).scaled(10);
        assert_eq!(frame.at(0, 0), RGB8::new(10, 0, 0));
        assert_eq!(frame.at(0, 1), O);
    }
}
