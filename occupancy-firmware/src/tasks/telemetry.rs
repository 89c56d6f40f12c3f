// Telemetrie Task - Sendet den Zählerstand periodisch per HTTP GET
use defmt::{error, info, warn};
use embassy_time::{Instant, Timer};
use occupancy_core::{LinkStatus, TelemetryConfig, TelemetryUploader};

use crate::config::{TELEMETRY_API_KEY, TELEMETRY_HOST};
use crate::hal::WifiTelemetryLink;
use crate::{CountReceiver, LinkStatusSender, TelemetryLink};

/// Telemetrie Logic - Netzwerk nur über den TelemetryLink Trait
///
/// Läuft endlos und unabhängig vom Zähler-Task:
/// - Schläft bis der nächste Upload fällig ist (inklusive Backoff)
/// - Liest den aktuellen Zählerstand aus dem Watch
/// - Führt genau einen Upload-Versuch aus
/// - Meldet Statuswechsel (Online/Offline) an den Zähler-Task
///
/// # Parameter
/// - `link`: Netzwerk-Zugang (WLAN, DNS, TCP)
/// - `count_receiver`: Watch Receiver für den Zählerstand
/// - `status_sender`: Channel Sender für den Telemetrie-Status
pub async fn telemetry_logic<L: TelemetryLink>(
    mut link: L,
    mut count_receiver: CountReceiver,
    status_sender: LinkStatusSender,
) {
    let config = TelemetryConfig::new(TELEMETRY_API_KEY, TELEMETRY_HOST);
    let mut uploader = TelemetryUploader::new(config);
    let mut reported = LinkStatus::Pending;

    info!("Telemetry: Task started, host {}", TELEMETRY_HOST);

    loop {
        Timer::at(Instant::from_micros(uploader.timer().next_due_us())).await;

        let count = count_receiver.try_get().unwrap_or(0);
        let now_us = Instant::now().as_micros();

        match uploader.maybe_send(&mut link, count, now_us).await {
            None => continue,
            Some(Ok(())) => info!("Telemetry: Sent occupancy {}", count),
            Some(Err(e)) => error!(
                "Telemetry: Upload failed: {} ({} in a row)",
                e,
                uploader.timer().consecutive_failures()
            ),
        }

        let status = uploader.status();
        if status != reported {
            if status == LinkStatus::Offline {
                warn!("Telemetry: Going offline, next attempt with backoff");
            }
            status_sender.send(status).await;
            reported = status;
        }
    }
}

/// Telemetrie Task - Embassy Task für parallele Ausführung
///
/// # Parameter
/// - `link`: WiFi Link mit Controller und Netzwerk-Stack
/// - `count_receiver`: Watch Receiver für den Zählerstand
/// - `status_sender`: Channel Sender für den Telemetrie-Status
#[embassy_executor::task]
pub async fn telemetry_task(
    link: WifiTelemetryLink,
    count_receiver: CountReceiver,
    status_sender: LinkStatusSender,
) {
    telemetry_logic(link, count_receiver, status_sender).await;
}
