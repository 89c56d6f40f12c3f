//! Telemetrie: gedrosselter HTTP-GET mit der aktuellen Belegung
//!
//! Pro Intervall höchstens ein Versuch. Fehlschläge verlängern das
//! Intervall (Backoff) und schalten nach mehreren Fehlern in den
//! Offline-Zustand, der auf dem Display angezeigt wird.

use core::fmt::Write;

use heapless::String;

use crate::traits::{TelemetryConnection, TelemetryLink};

/// Sendeintervall in Mikrosekunden (1 Minute)
pub const TELEMETRY_INTERVAL_US: u64 = 60_000_000;

/// Port des Telemetrie-Endpunkts (plain HTTP)
pub const TELEMETRY_PORT: u16 = 80;

/// Maximale Verdopplungen des Intervalls nach Fehlschlägen (Faktor 4)
pub const MAX_BACKOFF_SHIFT: u8 = 2;

/// Aufeinanderfolgende Fehlschläge bis zum Offline-Zustand
pub const OFFLINE_AFTER_FAILURES: u8 = 3;

/// Puffergröße für die HTTP-Anfrage
pub const REQUEST_BUFFER_SIZE: usize = 256;

/// Telemetrie Fehler-Typen
///
/// Jeder Schritt des Uploads wird einzeln erkannt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    AssociationFailed,
    AssociationTimeout,
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    WriteFailed,
    RequestTooLong,
}

/// Zugangsdaten und Ziel für den Upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig<'a> {
    pub api_key: &'a str,
    pub host: &'a str,
    pub port: u16,
}

impl<'a> TelemetryConfig<'a> {
    pub const fn new(api_key: &'a str, host: &'a str) -> Self {
        Self {
            api_key,
            host,
            port: TELEMETRY_PORT,
        }
    }
}

/// Baut die HTTP/1.1 GET-Anfrage für den Zählerstand
///
/// ```
/// # use occupancy_core::telemetry::{TelemetryConfig, update_request};
/// let config = TelemetryConfig::new("ABC", "api.example.com");
/// let request = update_request(&config, 3).unwrap();
/// assert_eq!(
///     request.as_str(),
///     "GET /update?api_key=ABC&field1=3 HTTP/1.1\r\nHost: api.example.com\r\n\r\n"
/// );
/// ```
pub fn update_request(
    config: &TelemetryConfig<'_>,
    count: u8,
) -> Result<String<REQUEST_BUFFER_SIZE>, TelemetryError> {
    let mut request = String::new();
    write!(
        request,
        "GET /update?api_key={}&field1={} HTTP/1.1\r\nHost: {}\r\n\r\n",
        config.api_key, count, config.host
    )
    .map_err(|_| TelemetryError::RequestTooLong)?;
    Ok(request)
}

/// Verbindungszustand aus Sicht der Telemetrie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Noch kein Versuch
    Pending,
    /// Letzter Versuch erfolgreich
    Online,
    /// Zu viele Fehlschläge in Folge
    Offline,
}

/// Zeitsteuerung für Uploads
///
/// Startet bei 0: der erste Versuch erfolgt ein Intervall nach dem Boot.
/// Jeder Versuch (erfolgreich oder nicht) setzt den Zeitstempel neu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryTimer {
    last_attempt_us: u64,
    interval_us: u64,
    consecutive_failures: u8,
    last_ok: bool,
}

impl TelemetryTimer {
    pub const fn new(interval_us: u64) -> Self {
        Self {
            last_attempt_us: 0,
            interval_us,
            consecutive_failures: 0,
            last_ok: false,
        }
    }

    /// Aktuelles Intervall inklusive Backoff
    pub fn effective_interval_us(&self) -> u64 {
        let shift = self.consecutive_failures.min(MAX_BACKOFF_SHIFT);
        self.interval_us.saturating_mul(1 << shift)
    }

    /// Ist ein neuer Versuch fällig?
    pub fn is_due(&self, now_us: u64) -> bool {
        now_us.saturating_sub(self.last_attempt_us) > self.effective_interval_us()
    }

    /// Frühester Zeitpunkt, zu dem [`is_due`](Self::is_due) wahr wird
    pub fn next_due_us(&self) -> u64 {
        self.last_attempt_us
            .saturating_add(self.effective_interval_us())
            .saturating_add(1)
    }

    /// Verbucht einen Versuch
    pub fn record(&mut self, now_us: u64, success: bool) {
        self.last_attempt_us = now_us;
        if success {
            self.consecutive_failures = 0;
            self.last_ok = true;
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        }
    }

    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive_failures
    }

    pub fn status(&self) -> LinkStatus {
        if self.consecutive_failures >= OFFLINE_AFTER_FAILURES {
            LinkStatus::Offline
        } else if self.last_ok {
            LinkStatus::Online
        } else {
            LinkStatus::Pending
        }
    }
}

/// Sendet den Zählerstand höchstens einmal pro Intervall
pub struct TelemetryUploader<'a> {
    config: TelemetryConfig<'a>,
    timer: TelemetryTimer,
}

impl<'a> TelemetryUploader<'a> {
    pub const fn new(config: TelemetryConfig<'a>) -> Self {
        Self::with_interval(config, TELEMETRY_INTERVAL_US)
    }

    pub const fn with_interval(config: TelemetryConfig<'a>, interval_us: u64) -> Self {
        Self {
            config,
            timer: TelemetryTimer::new(interval_us),
        }
    }

    pub fn timer(&self) -> &TelemetryTimer {
        &self.timer
    }

    pub fn status(&self) -> LinkStatus {
        self.timer.status()
    }

    /// Sendet `count`, falls das Intervall abgelaufen ist
    ///
    /// `None` wenn noch nicht fällig. Sonst das Ergebnis des Versuchs;
    /// der Timer wird in beiden Fällen weitergestellt.
    pub async fn maybe_send<L: TelemetryLink>(
        &mut self,
        link: &mut L,
        count: u8,
        now_us: u64,
    ) -> Option<Result<(), TelemetryError>> {
        if !self.timer.is_due(now_us) {
            return None;
        }

        let result = self.send(link, count).await;
        self.timer.record(now_us, result.is_ok());
        Some(result)
    }

    async fn send<L: TelemetryLink>(&self, link: &mut L, count: u8) -> Result<(), TelemetryError> {
        let request = update_request(&self.config, count)?;

        // Auch eine halb aufgebaute Assoziation wird wieder getrennt
        let result = match link.associate().await {
            Ok(()) => self.deliver(link, request.as_bytes()).await,
            Err(e) => Err(e),
        };
        link.disassociate().await;
        result
    }

    async fn deliver<L: TelemetryLink>(
        &self,
        link: &mut L,
        request: &[u8],
    ) -> Result<(), TelemetryError> {
        let addr = link.resolve(self.config.host).await?;
        let mut connection = link.connect(addr, self.config.port).await?;
        let written = connection.write_all(request).await;
        connection.close().await;
        written
    }
}
