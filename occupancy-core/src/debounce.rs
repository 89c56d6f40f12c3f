//! Button-Entprellung
//!
//! Filtert die rohen Pegel eines Tasters (active-low, interner Pull-up)
//! zu sauberen Druck-Events. Jeder Taster hat seinen eigenen Kanal mit
//! eigenem Zeitstempel, es gibt keinen gemeinsamen Debounce-Timer.

/// Mindestabstand zwischen zwei erkannten Flanken in Mikrosekunden
pub const DEBOUNCE_US: u64 = 200_000;

/// Welcher Taster ein Event ausgelöst hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// Person betritt den Raum
    Admit,
    /// Person verlässt den Raum
    Release,
}

/// Zustand eines einzelnen Taster-Kanals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    event: PressEvent,
    debounced_pressed: bool,
    previous_pressed: bool,
    last_edge_us: u64,
}

impl ButtonChannel {
    /// Erstellt einen Kanal im Zustand "losgelassen"
    pub const fn new(event: PressEvent) -> Self {
        Self {
            event,
            debounced_pressed: false,
            previous_pressed: false,
            last_edge_us: 0,
        }
    }

    /// Tastet den rohen Pin-Pegel ab
    ///
    /// `raw_level_high` ist der elektrische Pegel: `false` bedeutet gedrückt.
    /// Ein Event entsteht nur auf der Flanke losgelassen → gedrückt und nur
    /// wenn seit der letzten erkannten Flanke mindestens [`DEBOUNCE_US`]
    /// vergangen sind. Der vorherige Pegel wird bei jedem Aufruf übernommen.
    pub fn poll(&mut self, raw_level_high: bool, now_us: u64) -> Option<PressEvent> {
        let pressed = !raw_level_high;
        let elapsed = now_us.saturating_sub(self.last_edge_us);

        let fired = pressed && !self.previous_pressed && elapsed >= DEBOUNCE_US;
        if fired {
            self.last_edge_us = now_us;
            self.debounced_pressed = true;
        } else if !pressed {
            self.debounced_pressed = false;
        }

        self.previous_pressed = pressed;
        fired.then_some(self.event)
    }

    /// Entprellter Zustand: `true` solange ein erkannter Druck gehalten wird
    pub fn is_pressed(&self) -> bool {
        self.debounced_pressed
    }

    /// Zeitstempel der letzten erkannten Flanke
    pub fn last_edge_us(&self) -> u64 {
        self.last_edge_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: bool = true;
    const LOW: bool = false;

    #[test]
    fn test_press_after_window_fires() {
        let mut ch = ButtonChannel::new(PressEvent::Admit);
        assert_eq!(ch.poll(HIGH, 250_000), None);
        assert_eq!(ch.poll(LOW, 300_000), Some(PressEvent::Admit));
        assert_eq!(ch.last_edge_us(), 300_000);
        assert!(ch.is_pressed());
    }

    #[test]
    fn test_held_button_fires_once() {
        let mut ch = ButtonChannel::new(PressEvent::Release);
        assert_eq!(ch.poll(LOW, 1_000_000), Some(PressEvent::Release));
        assert_eq!(ch.poll(LOW, 1_500_000), None);
        assert_eq!(ch.poll(LOW, 5_000_000), None);
    }

    #[test]
    fn test_bounce_inside_window_is_ignored() {
        let mut ch = ButtonChannel::new(PressEvent::Admit);
        assert!(ch.poll(LOW, 1_000_000).is_some());
        assert_eq!(ch.poll(HIGH, 1_050_000), None);
        assert_eq!(ch.poll(LOW, 1_100_000), None);
        assert!(!ch.is_pressed());
        assert_eq!(ch.last_edge_us(), 1_000_000);
    }

    #[test]
    fn test_exact_window_boundary_fires() {
        let mut ch = ButtonChannel::new(PressEvent::Admit);
        assert!(ch.poll(LOW, 1_000_000).is_some());
        ch.poll(HIGH, 1_100_000);
        assert_eq!(ch.poll(LOW, 1_200_000), Some(PressEvent::Admit));
    }

    #[test]
    fn test_press_right_after_boot_is_suppressed() {
        let mut ch = ButtonChannel::new(PressEvent::Admit);
        assert_eq!(ch.poll(LOW, 10_000), None);
    }
}
