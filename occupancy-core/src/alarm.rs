//! Alarm-Ton: ein einzelner Rechteck-Puls über den Buzzer

use embedded_hal_async::delay::DelayNs;

use crate::matrix::AlarmPulse;
use crate::traits::{Buzzer, BuzzerError};

/// Spielt `pulse` ab: Ton an, warten, Ton aus
///
/// `off()` wird in jedem Fall aufgerufen, auch wenn das Einschalten
/// fehlschlägt. Dann entfällt die Wartezeit. Zurückgegeben wird der
/// erste aufgetretene Fehler.
pub async fn play_alarm<B: Buzzer, D: DelayNs>(
    buzzer: &mut B,
    delay: &mut D,
    pulse: AlarmPulse,
) -> Result<(), BuzzerError> {
    let started = buzzer.on(pulse.freq_hz);
    if started.is_ok() {
        delay.delay_ms(pulse.duration_ms).await;
    }
    let stopped = buzzer.off();
    started.and(stopped)
}
