//! LCD brute force over every MOSI/SCLK/CS/DC/RST assignment
//!
//! The panel has no read-back, so a trial never "succeeds" here. Each trial
//! paints red, green and blue and the operator matches the colours on screen
//! to the last `TRY LCD` line in the log. The scan always runs to the end.

use std::fmt;

use embedded_hal::delay::DelayNs;

use crate::boards;
use crate::bus::{Panel, PanelTransport, SerialBus, SerialHost};
use crate::color;
use crate::config::ProbeConfig;
use crate::error::BusError;
use crate::pins::CandidatePool;
use crate::trial::{serial_trials, DataSelect, SerialTrial};

/// Where in the bring-up a trial stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialStep {
    Deselect,
    Bus,
    Transport,
    Panel,
    BringUp,
    Signal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialError {
    pub step: TrialStep,
    pub source: BusError,
}

impl TrialError {
    fn at(step: TrialStep) -> impl Fn(BusError) -> TrialError {
        move |source| TrialError { step, source }
    }
}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self.step {
            TrialStep::Deselect => "CS deselect",
            TrialStep::Bus => "SPI bus init",
            TrialStep::Transport => "panel IO",
            TrialStep::Panel => "panel driver",
            TrialStep::BringUp => "panel reset/init",
            TrialStep::Signal => "colour fill",
        };
        write!(f, "{}: {}", step, self.source)
    }
}

impl std::error::Error for TrialError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerialSummary {
    pub trials: usize,
    pub failed: usize,
}

pub struct SerialScanner<'c> {
    pool: &'c CandidatePool,
    config: &'c ProbeConfig,
    options: Vec<DataSelect>,
}

impl<'c> SerialScanner<'c> {
    pub fn new(pool: &'c CandidatePool, config: &'c ProbeConfig) -> Self {
        Self {
            pool,
            config,
            options: config.data_select(),
        }
    }

    pub fn run<H: SerialHost, D: DelayNs>(&self, host: &mut H, delay: &mut D) -> SerialSummary {
        log::info!("=== LCD brute force: watch the screen, note the last TRY line when colours show up ===");

        let mut summary = SerialSummary::default();
        for trial in serial_trials(self.pool, &self.options) {
            summary.trials += 1;

            match boards::match_serial(&trial) {
                Some(board) => log::warn!(
                    "TRY LCD: {} (if you see colours, THIS is the pinmap; matches {})",
                    trial,
                    board.name
                ),
                None => log::warn!("TRY LCD: {} (if you see colours, THIS is the pinmap)", trial),
            }

            if let Err(e) = self.run_trial(host, &trial, delay) {
                summary.failed += 1;
                log::warn!("{} skipped, {}", trial, e);
            }
        }

        log::error!(
            "Brute force done after {} tries ({} could not be driven). \
             No colours at all usually means a GPIO-controlled backlight: find BL/POWER and add it to hold_high.",
            summary.trials,
            summary.failed
        );
        summary
    }

    /// Bring up bus, transport and panel for one trial, show the signal, tear everything down.
    pub fn run_trial<H: SerialHost, D: DelayNs>(
        &self,
        host: &mut H,
        trial: &SerialTrial,
        delay: &mut D,
    ) -> Result<(), TrialError> {
        host.release();
        host.drive_high(trial.cs).map_err(TrialError::at(TrialStep::Deselect))?;

        // host stays borrowed while the init result is alive
        let err = match host.init_bus(&self.config.serial_bus_config(trial)) {
            Ok(mut bus) => {
                let result = self.on_bus(&mut bus, trial, delay);
                bus.free();
                return result;
            }
            Err(e) => e,
        };

        host.release();
        Err(TrialError::at(TrialStep::Bus)(err))
    }

    fn on_bus<B: SerialBus, D: DelayNs>(
        &self,
        bus: &mut B,
        trial: &SerialTrial,
        delay: &mut D,
    ) -> Result<(), TrialError> {
        let mut transport = bus
            .attach(&self.config.transport_config(trial))
            .map_err(TrialError::at(TrialStep::Transport))?;

        let result = self.on_transport(&mut transport, trial, delay);
        transport.delete();
        result
    }

    fn on_transport<T: PanelTransport, D: DelayNs>(
        &self,
        transport: &mut T,
        trial: &SerialTrial,
        delay: &mut D,
    ) -> Result<(), TrialError> {
        let mut panel = transport
            .attach(&self.config.panel_config(trial))
            .map_err(TrialError::at(TrialStep::Panel))?;

        let result = self.drive(&mut panel, delay);
        panel.delete();
        result
    }

    fn drive<P: Panel, D: DelayNs>(&self, panel: &mut P, delay: &mut D) -> Result<(), TrialError> {
        let serial = &self.config.serial;

        panel
            .reset()
            .and_then(|_| panel.init())
            .and_then(|_| panel.invert_colors(serial.invert_colors))
            .and_then(|_| panel.display_on(true))
            .map_err(TrialError::at(TrialStep::BringUp))?;

        color::show_signal(
            panel,
            delay,
            serial.width,
            serial.height,
            serial.max_transfer_bytes,
            serial.observe_ms,
        )
        .map_err(TrialError::at(TrialStep::Signal))
    }
}
