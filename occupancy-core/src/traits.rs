//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** `occupancy-counter` (esp-hal Treiber, embassy-net)
//! - **Testing:** In-memory Mocks in `occupancy-tests`

use core::net::Ipv4Addr;

use rgb::RGB8;

use crate::telemetry::TelemetryError;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf die RGB LED-Matrix (WS2812/Neopixel).
/// Die Pixel werden in Strip-Reihenfolge übergeben und in genau dieser
/// Reihenfolge auf die Datenleitung geschrieben.
pub trait SmartLedWriter: Send {
    /// Schreibt alle Pixel auf einmal auf den Strip
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError>;
}

/// Fehler-Typ für Display-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// I²C Transfer zum Display fehlgeschlagen
    BusFailed,
    /// Text konnte nicht in den Framebuffer gezeichnet werden
    DrawFailed,
}

/// Trait für Text-Displays mit Framebuffer (z.B. SSD1306)
///
/// Koordinaten sind Pixel, `y` ist die Oberkante der Textzeile.
pub trait TextDisplay {
    /// Löscht den Framebuffer (ohne zu flushen)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Zeichnet eine Textzeile an Position (x, y) in den Framebuffer
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Überträgt den Framebuffer auf das Panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Fehler-Typ für den Buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerError {
    /// Die Hardware ist auf eine andere Frequenz konfiguriert
    UnsupportedFrequency(u32),
    /// PWM-Kanal konnte nicht umgeschaltet werden
    PwmFailed,
}

/// Trait für einen Rechteck-Tongeber (PWM Buzzer)
pub trait Buzzer {
    /// Schaltet den Ton mit der gegebenen Frequenz ein
    fn on(&mut self, freq_hz: u32) -> Result<(), BuzzerError>;

    /// Schaltet den Ton aus
    fn off(&mut self) -> Result<(), BuzzerError>;
}

/// Netzwerk-Zugang für den Telemetrie-Upload
///
/// Bildet die Schritte eines Uploads ab: WLAN-Assoziation, DNS-Auflösung,
/// TCP-Verbindung. Implementierungen sind selbst für Timeouts zuständig.
#[allow(async_fn_in_trait)]
pub trait TelemetryLink {
    /// Offene Transport-Verbindung, geliehen vom Link
    type Connection<'a>: TelemetryConnection
    where
        Self: 'a;

    /// Baut die WLAN-Verbindung auf (Station-Mode + DHCP)
    async fn associate(&mut self) -> Result<(), TelemetryError>;

    /// Löst den Hostnamen zu einer IPv4-Adresse auf
    async fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, TelemetryError>;

    /// Öffnet eine TCP-Verbindung
    async fn connect(
        &mut self,
        addr: Ipv4Addr,
        port: u16,
    ) -> Result<Self::Connection<'_>, TelemetryError>;

    /// Trennt die WLAN-Verbindung wieder
    ///
    /// Wird nach jedem Versuch aufgerufen, auch wenn `associate` fehlschlug.
    async fn disassociate(&mut self);
}

/// Offene TCP-Verbindung zum Telemetrie-Endpunkt
#[allow(async_fn_in_trait)]
pub trait TelemetryConnection {
    /// Schreibt alle Bytes (blockiert bis alles im Sendepuffer ist)
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TelemetryError>;

    /// Schließt die Verbindung
    async fn close(self);
}
