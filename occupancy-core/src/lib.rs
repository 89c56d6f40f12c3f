//! Occupancy Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits für die Hardware und die komplette Logik des
//! Belegungszählers: Entprellung, Zähler, Matrix-Muster, Alarm-Puls,
//! Text-Layout und Telemetrie-Policy.

#![no_std]

pub mod alarm;
pub mod control;
pub mod debounce;
pub mod display;
pub mod layout;
pub mod matrix;
pub mod occupancy;
pub mod telemetry;
pub mod traits;

// Re-exports für einfachen Zugriff
pub use alarm::play_alarm;
pub use control::{ControlLoop, RenderError, Tick};
pub use debounce::{ButtonChannel, PressEvent};
pub use display::DisplayRenderer;
pub use layout::{PlacedLine, TextLayout};
pub use matrix::{AlarmPulse, CapacityState, MatrixRenderer, RenderFrame, led_index};
pub use occupancy::{CAPACITY, OccupancyState};
pub use telemetry::{
    LinkStatus, TelemetryConfig, TelemetryError, TelemetryTimer, TelemetryUploader,
    update_request,
};
pub use traits::{
    Buzzer, BuzzerError, DisplayError, LedError, SmartLedWriter, TelemetryConnection,
    TelemetryLink, TextDisplay,
};
