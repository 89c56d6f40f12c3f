// Hardware Abstraction Layer (HAL) Module
//
// Konkrete Implementierungen der Traits aus occupancy-core für den ESP32-C6.
// Die Logik in occupancy-core kennt nur die Traits und bleibt damit testbar.

pub mod buzzer;
pub mod display;
pub mod led_writer;
pub mod wifi_link;

pub use buzzer::{PwmBuzzer, tone_timer};
pub use display::OledDisplay;
pub use led_writer::RmtLedWriter;
pub use wifi_link::{TcpConnection, WifiTelemetryLink};
