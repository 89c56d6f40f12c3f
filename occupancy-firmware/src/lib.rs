// Library-Root: Firmware-Module des Belegungszählers
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von occupancy-core
pub use occupancy_core::{
    Buzzer, ControlLoop, LinkStatus, OccupancyState, SmartLedWriter, TelemetryLink, TextDisplay,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::watch::{self, Watch};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.
// Statt:  watch::Sender<'static, NoopRawMutex, u8, 1>
// Nutze:  CountSender

/// Watch für den aktuellen Zählerstand (Zähler → Telemetrie)
/// - Hält nur den letzten Wert, ältere Stände sind für den Upload egal
/// - 1: Maximale Anzahl Receiver
pub type CountWatch = Watch<NoopRawMutex, u8, 1>;

/// Sender für den Zählerstand (Zähler-Task)
pub type CountSender = watch::Sender<'static, NoopRawMutex, u8, 1>;

/// Receiver für den Zählerstand (Telemetrie-Task)
pub type CountReceiver = watch::Receiver<'static, NoopRawMutex, u8, 1>;

/// Channel für Telemetrie-Status (Telemetrie → Zähler)
/// - 1: Nachrichten-Kapazität (nur Statuswechsel werden gesendet)
pub type LinkStatusChannel = Channel<NoopRawMutex, LinkStatus, 1>;

/// Sender für Telemetrie-Status (Telemetrie-Task)
pub type LinkStatusSender = Sender<'static, NoopRawMutex, LinkStatus, 1>;

/// Receiver für Telemetrie-Status (Zähler-Task)
pub type LinkStatusReceiver = Receiver<'static, NoopRawMutex, LinkStatus, 1>;
