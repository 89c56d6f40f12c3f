// Zähler Task - Taster abtasten, Zähler führen, Display/Matrix/Buzzer ansteuern
use defmt::{error, info, warn};
use embassy_time::{Delay, Duration, Instant, Timer};
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal_smartled::smart_led_buffer;
use occupancy_core::matrix::LED_COUNT;
use occupancy_core::{AlarmPulse, Tick, play_alarm};

use crate::config::{LED_BRIGHTNESS, POLL_IDLE_MS, POLL_SETTLE_MS, RMT_CLOCK_MHZ};
use crate::hal::{OledDisplay, PwmBuzzer, RmtLedWriter};
use crate::{
    Buzzer, ControlLoop, CountSender, LinkStatusReceiver, OccupancyState, SmartLedWriter,
    TextDisplay,
};

/// Zähler Logic - Hardware nur über Traits
///
/// Läuft endlos:
/// - Übernimmt Statuswechsel der Telemetrie (non-blocking)
/// - Tastet beide Taster ab und führt einen Durchlauf der ControlLoop aus
/// - Spielt beim Übergang in "voll" den Alarm ab
/// - Meldet geänderte Zählerstände an den Telemetrie-Task
///
/// # Parameter
/// - `control`: ControlLoop mit Display und Matrix
/// - `buzzer`: Tongeber für den Alarm
/// - `admit` / `release`: Taster-Eingänge (active-low)
/// - `count_sender`: Watch Sender für den Zählerstand
/// - `status_receiver`: Channel Receiver für den Telemetrie-Status
pub async fn counter_logic<D: TextDisplay, L: SmartLedWriter, B: Buzzer>(
    mut control: ControlLoop<D, L>,
    mut buzzer: B,
    admit: Input<'_>,
    release: Input<'_>,
    count_sender: CountSender,
    status_receiver: LinkStatusReceiver,
) {
    let tick = control.start();
    info!("Counter: Started with {} / {}", tick.count, control.state().capacity());
    handle_tick(&tick, &mut buzzer).await;
    count_sender.send(tick.count);

    loop {
        if let Ok(status) = status_receiver.try_receive() {
            info!("Counter: Telemetry status {}", status);
            if let Some(Err(e)) = control.set_link_status(status) {
                warn!("Counter: Display update failed: {}", e);
            }
        }

        let tick = control.tick(
            admit.is_high(),
            release.is_high(),
            Instant::now().as_micros(),
        );

        if tick.changed {
            info!("Counter: Occupancy {}", tick.count);
            count_sender.send(tick.count);
        }
        handle_tick(&tick, &mut buzzer).await;

        Timer::after(Duration::from_millis(POLL_SETTLE_MS)).await;
        Timer::after(Duration::from_millis(POLL_IDLE_MS)).await;
    }
}

async fn handle_tick<B: Buzzer>(tick: &Tick, buzzer: &mut B) {
    if let Err(e) = tick.render {
        warn!("Counter: Render failed: {}", e);
    }
    if let Some(pulse) = tick.alarm {
        sound_alarm(buzzer, pulse).await;
    }
}

/// Spielt einen Alarm-Ton ab (blockiert den Zähler für die Dauer des Tons)
pub async fn sound_alarm<B: Buzzer>(buzzer: &mut B, pulse: AlarmPulse) {
    info!("Counter: Capacity reached, alarm {} Hz", pulse.freq_hz);
    if let Err(e) = play_alarm(buzzer, &mut Delay, pulse).await {
        warn!("Buzzer: Alarm failed: {}", e);
    }
}

/// Zähler Task - Embassy Task für parallele Ausführung
///
/// Übernimmt die Hardware-Initialisierung von Tastern und Matrix und ruft
/// dann die `counter_logic()` Funktion auf.
///
/// # Parameter
/// - `admit_pin`: GPIO4 für den Eintritts-Taster
/// - `release_pin`: GPIO5 für den Austritts-Taster
/// - `gpio8`: GPIO8 Peripheral für die Matrix-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `display`: initialisiertes OLED Display
/// - `buzzer`: initialisierter PWM Buzzer
/// - `count_sender`: Watch Sender für den Zählerstand
/// - `status_receiver`: Channel Receiver für den Telemetrie-Status
#[embassy_executor::task]
#[allow(clippy::too_many_arguments)]
pub async fn counter_task(
    admit_pin: esp_hal::peripherals::GPIO4<'static>,
    release_pin: esp_hal::peripherals::GPIO5<'static>,
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    display: OledDisplay,
    buzzer: PwmBuzzer<'static>,
    count_sender: CountSender,
    status_receiver: LinkStatusReceiver,
) {
    // Taster sind active-low mit internem Pull-up
    let input_config = InputConfig::default().with_pull(Pull::Up);
    let admit = Input::new(admit_pin, input_config);
    let release = Input::new(release_pin, input_config);

    // Buffer für SmartLED Daten erstellen (25 LEDs)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(LED_COUNT);

    let led = match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(led) => led,
        Err(e) => {
            error!("Counter: LED matrix init failed: {}", e);
            return;
        }
    };

    let control = ControlLoop::new(OccupancyState::default(), display, led, LED_BRIGHTNESS);

    counter_logic(control, buzzer, admit, release, count_sender, status_receiver).await;
}
