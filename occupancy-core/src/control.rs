//! Kontroll-Schleife: ein Durchlauf pro Abtast-Zyklus
//!
//! Besitzt den gesamten veränderlichen Zustand (Zähler, Taster-Kanäle,
//! Link-Status) und die beiden Ausgabe-Geräte. Die asynchrone Firmware
//! ruft [`ControlLoop::tick`] zyklisch auf, spielt angeforderte Alarme ab
//! und reicht den Zählerstand an die Telemetrie weiter.

use crate::debounce::{ButtonChannel, PressEvent};
use crate::display::DisplayRenderer;
use crate::matrix::{AlarmPulse, MatrixRenderer};
use crate::occupancy::OccupancyState;
use crate::telemetry::LinkStatus;
use crate::traits::{DisplayError, LedError, SmartLedWriter, TextDisplay};

/// Fehler beim Neuzeichnen von Display oder Matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    Display(DisplayError),
    Matrix(LedError),
}

impl From<DisplayError> for RenderError {
    fn from(e: DisplayError) -> Self {
        RenderError::Display(e)
    }
}

impl From<LedError> for RenderError {
    fn from(e: LedError) -> Self {
        RenderError::Matrix(e)
    }
}

/// Ergebnis eines Durchlaufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zählerstand nach dem Durchlauf
    pub count: u8,
    /// Hat sich der Zähler geändert?
    pub changed: bool,
    /// Abzuspielender Alarm (Übergang in "voll")
    pub alarm: Option<AlarmPulse>,
    /// Erster Render-Fehler dieses Durchlaufs
    pub render: Result<(), RenderError>,
}

pub struct ControlLoop<D, L> {
    state: OccupancyState,
    admit: ButtonChannel,
    release: ButtonChannel,
    link: LinkStatus,
    display: D,
    led: L,
    display_renderer: DisplayRenderer,
    matrix_renderer: MatrixRenderer,
}

impl<D: TextDisplay, L: SmartLedWriter> ControlLoop<D, L> {
    pub fn new(state: OccupancyState, display: D, led: L, matrix_brightness: u8) -> Self {
        Self {
            state,
            admit: ButtonChannel::new(PressEvent::Admit),
            release: ButtonChannel::new(PressEvent::Release),
            link: LinkStatus::Pending,
            display,
            led,
            display_renderer: DisplayRenderer::default(),
            matrix_renderer: MatrixRenderer::new(matrix_brightness),
        }
    }

    pub fn state(&self) -> &OccupancyState {
        &self.state
    }

    pub fn link_status(&self) -> LinkStatus {
        self.link
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    /// Erstes Zeichnen von Display und Matrix mit dem Startzustand
    pub fn start(&mut self) -> Tick {
        let (alarm, render) = self.render_all();
        Tick {
            count: self.state.count(),
            changed: false,
            alarm,
            render,
        }
    }

    /// Ein Durchlauf der Schleife
    ///
    /// Die Pegel sind elektrisch (active-low). Jede tatsächliche Änderung
    /// zeichnet Display und Matrix neu; danach wird das Display in jedem
    /// Fall noch einmal aufgefrischt.
    pub fn tick(&mut self, admit_level_high: bool, release_level_high: bool, now_us: u64) -> Tick {
        let mut changed = false;
        let mut alarm = None;
        let mut render = Ok(());

        if self.admit.poll(admit_level_high, now_us).is_some() && self.state.admit() {
            changed = true;
            let (a, r) = self.render_all();
            alarm = alarm.or(a);
            render = render.and(r);
        }

        if self.release.poll(release_level_high, now_us).is_some() && self.state.release() {
            changed = true;
            let (a, r) = self.render_all();
            alarm = alarm.or(a);
            render = render.and(r);
        }

        render = render.and(self.render_display());

        Tick {
            count: self.state.count(),
            changed,
            alarm,
            render,
        }
    }

    /// Übernimmt einen neuen Telemetrie-Status
    ///
    /// Zeichnet das Display nur neu, wenn sich der Status geändert hat.
    pub fn set_link_status(&mut self, status: LinkStatus) -> Option<Result<(), RenderError>> {
        if status == self.link {
            return None;
        }
        self.link = status;
        Some(self.render_display())
    }

    fn render_display(&mut self) -> Result<(), RenderError> {
        self.display_renderer
            .render(&mut self.display, self.state.count(), self.link)?;
        Ok(())
    }

    fn render_all(&mut self) -> (Option<AlarmPulse>, Result<(), RenderError>) {
        let display = self.render_display();
        let matrix = self
            .matrix_renderer
            .render(self.state.capacity_state(), &mut self.led);
        let render = display.and(matrix.written.map_err(RenderError::from));
        (matrix.alarm, render)
    }
}
