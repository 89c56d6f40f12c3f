//! Gemeinsame Mocks für die Host-Tests
#![allow(dead_code)]

use core::net::Ipv4Addr;

use embedded_hal_async::delay::DelayNs;
use occupancy_core::{
    Buzzer, BuzzerError, DisplayError, LedError, SmartLedWriter, TelemetryConnection,
    TelemetryError, TelemetryLink, TextDisplay,
};
use rgb::RGB8;

// ============================================================================
// Mock LED Writer
// ============================================================================

#[derive(Default)]
pub struct MockLedWriter {
    pub last_frame: Option<Vec<RGB8>>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockLedWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartLedWriter for MockLedWriter {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_frame = Some(pixels.to_vec());
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Text(i32, i32, String),
    Flush,
}

#[derive(Default)]
pub struct MockDisplay {
    pub ops: Vec<DisplayOp>,
    pub fail_flush: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flush_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DisplayOp::Flush).count()
    }

    /// Text-Operationen seit dem letzten Clear
    pub fn screen(&self) -> Vec<(i32, i32, String)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |idx| idx + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text(x, y, text) => Some((*x, *y, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Clear);
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        self.ops.push(DisplayOp::Text(x, y, text.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.fail_flush {
            return Err(DisplayError::BusFailed);
        }
        self.ops.push(DisplayOp::Flush);
        Ok(())
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

#[derive(Default)]
pub struct MockBuzzer {
    /// `Some(freq)` für jedes erfolgreiche `on`, `None` für jedes `off`
    pub tones: Vec<Option<u32>>,
    pub sounding: bool,
    pub fail_on: bool,
}

impl Buzzer for MockBuzzer {
    fn on(&mut self, freq_hz: u32) -> Result<(), BuzzerError> {
        if self.fail_on {
            return Err(BuzzerError::PwmFailed);
        }
        self.tones.push(Some(freq_hz));
        self.sounding = true;
        Ok(())
    }

    fn off(&mut self) -> Result<(), BuzzerError> {
        self.tones.push(None);
        self.sounding = false;
        Ok(())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Wartet nicht, summiert nur die angeforderte Zeit
#[derive(Default)]
pub struct MockDelay {
    pub waited_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waited_ns += u64::from(ns);
    }
}

// ============================================================================
// Mock Telemetry Link
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStep {
    Associate,
    Resolve,
    Connect,
    Write,
    Close,
    Disassociate,
}

#[derive(Default)]
pub struct MockLink {
    pub steps: Vec<LinkStep>,
    pub written: Vec<u8>,
    pub fail_at: Option<LinkStep>,
    pub resolved_host: Option<String>,
    pub connected_to: Option<(Ipv4Addr, u16)>,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(step: LinkStep) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| **s == LinkStep::Associate)
            .count()
    }

    fn step(&mut self, step: LinkStep, err: TelemetryError) -> Result<(), TelemetryError> {
        self.steps.push(step);
        if self.fail_at == Some(step) {
            Err(err)
        } else {
            Ok(())
        }
    }
}

pub struct MockConnection<'a> {
    link: &'a mut MockLink,
}

impl TelemetryLink for MockLink {
    type Connection<'a> = MockConnection<'a>;

    async fn associate(&mut self) -> Result<(), TelemetryError> {
        self.step(LinkStep::Associate, TelemetryError::AssociationFailed)
    }

    async fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, TelemetryError> {
        self.step(LinkStep::Resolve, TelemetryError::DnsResolutionFailed)?;
        self.resolved_host = Some(host.to_string());
        Ok(Ipv4Addr::new(93, 184, 216, 34))
    }

    async fn connect(
        &mut self,
        addr: Ipv4Addr,
        port: u16,
    ) -> Result<MockConnection<'_>, TelemetryError> {
        self.step(LinkStep::Connect, TelemetryError::ConnectionFailed)?;
        self.connected_to = Some((addr, port));
        Ok(MockConnection { link: self })
    }

    async fn disassociate(&mut self) {
        self.steps.push(LinkStep::Disassociate);
    }
}

impl TelemetryConnection for MockConnection<'_> {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TelemetryError> {
        self.link
            .step(LinkStep::Write, TelemetryError::WriteFailed)?;
        self.link.written.extend_from_slice(bytes);
        Ok(())
    }

    async fn close(self) {
        self.link.steps.push(LinkStep::Close);
    }
}
