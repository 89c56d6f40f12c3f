// PWM Buzzer über LEDC
//
// Der LEDC-Timer wird einmal auf die Alarm-Frequenz gestimmt. Ein- und
// Ausschalten passiert über das Tastverhältnis des Kanals (50 % / 0 %).

use esp_hal::gpio::DriveMode;
use esp_hal::ledc::channel::{self, Channel, ChannelIFace};
use esp_hal::ledc::timer::{self, Timer, TimerIFace};
use esp_hal::ledc::{Ledc, LowSpeed};
use esp_hal::time::Rate;
use occupancy_core::{Buzzer, BuzzerError};

use crate::config::BUZZER_DUTY_PCT;

/// Konfiguriert LEDC Low-Speed Timer 0 auf die Ton-Frequenz
pub fn tone_timer<'d>(ledc: &Ledc<'d>, freq_hz: u32) -> Result<Timer<'d, LowSpeed>, BuzzerError> {
    let mut tone_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    tone_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(freq_hz),
        })
        .map_err(|_| BuzzerError::PwmFailed)?;
    Ok(tone_timer)
}

/// Buzzer an einem LEDC-Kanal mit fest gestimmtem Timer
pub struct PwmBuzzer<'d> {
    channel: Channel<'d, LowSpeed>,
    freq_hz: u32,
}

impl<'d> PwmBuzzer<'d> {
    /// Erstellt den Buzzer (stumm)
    ///
    /// # Parameter
    /// - `ledc`: LEDC Treiber
    /// - `tone_timer`: mit [`tone_timer`] konfigurierter Timer
    /// - `pin`: GPIO3 für den Buzzer
    /// - `freq_hz`: Frequenz, auf die der Timer gestimmt ist
    pub fn new(
        ledc: &Ledc<'d>,
        tone_timer: &'d Timer<'d, LowSpeed>,
        pin: esp_hal::peripherals::GPIO3<'d>,
        freq_hz: u32,
    ) -> Result<Self, BuzzerError> {
        let mut channel = ledc.channel(channel::Number::Channel0, pin);
        channel
            .configure(channel::config::Config {
                timer: tone_timer,
                duty_pct: 0,
                drive_mode: DriveMode::PushPull,
            })
            .map_err(|_| BuzzerError::PwmFailed)?;

        Ok(Self { channel, freq_hz })
    }
}

impl Buzzer for PwmBuzzer<'_> {
    fn on(&mut self, freq_hz: u32) -> Result<(), BuzzerError> {
        if freq_hz != self.freq_hz {
            return Err(BuzzerError::UnsupportedFrequency(freq_hz));
        }
        self.channel
            .set_duty(BUZZER_DUTY_PCT)
            .map_err(|_| BuzzerError::PwmFailed)
    }

    fn off(&mut self) -> Result<(), BuzzerError> {
        self.channel.set_duty(0).map_err(|_| BuzzerError::PwmFailed)
    }
}
