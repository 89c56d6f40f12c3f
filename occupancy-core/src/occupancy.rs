//! Belegungszähler mit Kapazitätsgrenze

use crate::matrix::CapacityState;

/// Maximale Anzahl Personen im Raum
pub const CAPACITY: u8 = 10;

/// Aktuelle Belegung
///
/// Invariante: `0 <= count <= capacity`. Wird ausschließlich durch
/// [`admit`](Self::admit) und [`release`](Self::release) verändert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OccupancyState {
    count: u8,
    capacity: u8,
}

impl Default for OccupancyState {
    fn default() -> Self {
        Self::new(CAPACITY)
    }
}

impl OccupancyState {
    /// Leerer Raum mit der gegebenen Kapazität (mindestens 1)
    pub const fn new(capacity: u8) -> Self {
        let capacity = if capacity == 0 { 1 } else { capacity };
        Self { count: 0, capacity }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn capacity_state(&self) -> CapacityState {
        CapacityState::of(self.count, self.capacity)
    }

    /// Eine Person kommt herein
    ///
    /// Gibt `true` zurück wenn sich der Zähler geändert hat.
    /// Bei voller Belegung passiert nichts.
    pub fn admit(&mut self) -> bool {
        if self.count < self.capacity {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Eine Person geht hinaus
    ///
    /// Bei voller Belegung wird der Zähler auf `capacity - 1` gesetzt,
    /// sonst um eins verringert. Bei 0 passiert nichts.
    pub fn release(&mut self) -> bool {
        if self.count == self.capacity {
            self.count = self.capacity - 1;
            true
        } else if self.count > 0 {
            self.count -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_until_full() {
        let mut state = OccupancyState::default();
        for expected in 1..=CAPACITY {
            assert!(state.admit());
            assert_eq!(state.count(), expected);
        }
        assert!(state.is_full());
        assert!(!state.admit());
        assert_eq!(state.count(), CAPACITY);
    }

    #[test]
    fn test_release_from_full_steps_to_capacity_minus_one() {
        let mut state = OccupancyState::default();
        while state.admit() {}
        assert!(state.release());
        assert_eq!(state.count(), CAPACITY - 1);
    }

    #[test]
    fn test_release_at_zero_is_noop() {
        let mut state = OccupancyState::default();
        assert!(!state.release());
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut state = OccupancyState::new(0);
        assert_eq!(state.capacity(), 1);
        assert!(state.admit());
        assert!(state.is_full());
    }
}
