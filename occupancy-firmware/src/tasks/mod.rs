// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Zähler → Telemetrie, Telemetrie → Zähler).

pub mod counter;
pub mod telemetry;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use counter::counter_task;
pub use telemetry::telemetry_task;
pub use wifi::net_task;
