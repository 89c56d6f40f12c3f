// Netzwerk-Task - treibt den embassy-net Stack
use embassy_net::Runner;
use esp_radio::wifi::WifiDevice;

/// Network Task
///
/// Überwacht den Netzwerk-Stack:
/// - Prozessiert Netzwerk-Pakete
/// - Managed DHCP, DNS und TCP
///
/// Läuft auch während das WLAN getrennt ist, der Telemetrie-Link
/// verbindet nur für die Dauer eines Uploads.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}
