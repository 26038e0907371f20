//! Probe configuration, loaded from `probe.toml`
//!
//! Every field falls back to the values the probe was first written with, so an
//! empty document describes the stock ESP32-C3 search.

use anyhow::{bail, Context, Result};
use log::LevelFilter;
use serde::Deserialize;

use crate::bus::{ColorOrder, PanelConfig, SerialBusConfig, TransportConfig, TwoWireConfig};
use crate::gc9a01::{HEIGHT, WIDTH};
use crate::pins::{is_drivable, CandidatePool, Pin, DEFAULT_POOL};
use crate::trial::{DataSelect, SerialTrial, TwoWireTrial};

/// The configuration compiled into the firmware image
pub const EMBEDDED_CONFIG: &str = include_str!("../probe.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    pub log_level: LevelFilter,
    /// Delay between the two scans
    pub settle_ms: u32,
    /// Pins driven high before anything else runs
    pub hold_high: Vec<Pin>,
    pub pool: PoolConfig,
    pub two_wire: TwoWireSettings,
    pub serial: SerialSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    pub pins: Vec<Pin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwoWireSettings {
    /// 7-bit target addresses, probed in this order
    pub addresses: Vec<u8>,
    pub frequency_hz: u32,
    pub timeout_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialSettings {
    /// `[mosi, cs]` options
    pub data_select: Vec<[Pin; 2]>,
    pub clock_hz: u32,
    pub max_transfer_bytes: usize,
    /// How long each colour stays on screen
    pub observe_ms: u32,
    pub width: u16,
    pub height: u16,
    pub invert_colors: bool,
    pub bgr: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            settle_ms: 1000,
            hold_high: Vec::new(),
            pool: PoolConfig::default(),
            two_wire: TwoWireSettings::default(),
            serial: SerialSettings::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pins: DEFAULT_POOL.to_vec(),
        }
    }
}

impl Default for TwoWireSettings {
    fn default() -> Self {
        Self {
            addresses: vec![0x18, 0x19, 0x1A, 0x1B],
            frequency_hz: 400_000,
            timeout_ms: 30,
        }
    }
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            data_select: vec![[21, 20], [20, 21]],
            clock_hz: 10_000_000,
            // 40 scanlines per transfer
            max_transfer_bytes: usize::from(WIDTH) * 40 * 2,
            observe_ms: 700,
            width: WIDTH,
            height: HEIGHT,
            invert_colors: true,
            bgr: false,
        }
    }
}

impl ProbeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ProbeConfig = toml::from_str(text).context("Could not parse probe config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the embedded `probe.toml`, falling back to defaults when it is broken.
    ///
    /// The probe never refuses to run over a config problem.
    pub fn load_embedded() -> Self {
        match Self::from_toml(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid probe.toml, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        CandidatePool::new(&self.pool.pins)?;

        if self.two_wire.addresses.is_empty() {
            bail!("two_wire.addresses is empty");
        }
        if let Some(addr) = self.two_wire.addresses.iter().find(|a| **a > 0x7F) {
            bail!("0x{:02X} is not a 7-bit address", addr);
        }

        for [mosi, cs] in &self.serial.data_select {
            if mosi == cs {
                bail!("serial.data_select uses GPIO{} for both MOSI and CS", mosi);
            }
            if let Some(pin) = [mosi, cs].into_iter().find(|pin| !is_drivable(**pin)) {
                bail!("serial.data_select GPIO{} cannot be driven", pin);
            }
        }

        // A trial pin driver resets its GPIO when dropped, which would drop a held line
        for pin in &self.hold_high {
            if !is_drivable(*pin) {
                bail!("hold_high GPIO{} cannot be driven", pin);
            }
            if self.pool.pins.contains(pin) {
                bail!("GPIO{} is both held high and in the candidate pool", pin);
            }
            if self.serial.data_select.iter().any(|pair| pair.contains(pin)) {
                bail!("GPIO{} is both held high and a serial.data_select pin", pin);
            }
        }

        let line_bytes = usize::from(self.serial.width) * 2;
        if self.serial.width == 0 || self.serial.height == 0 {
            bail!("panel geometry must be non-zero");
        }
        if self.serial.max_transfer_bytes < line_bytes {
            bail!(
                "serial.max_transfer_bytes ({}) cannot hold one {}-pixel line",
                self.serial.max_transfer_bytes,
                self.serial.width
            );
        }

        Ok(())
    }

    /// Candidate pool; only valid after [`ProbeConfig::validate`] passed
    pub fn candidate_pool(&self) -> Result<CandidatePool> {
        CandidatePool::new(&self.pool.pins)
    }

    pub fn data_select(&self) -> Vec<DataSelect> {
        self.serial
            .data_select
            .iter()
            .map(|[mosi, cs]| DataSelect::new(*mosi, *cs))
            .collect()
    }

    pub fn two_wire_config(&self, trial: &TwoWireTrial) -> TwoWireConfig {
        TwoWireConfig {
            sda: trial.sda,
            scl: trial.scl,
            frequency_hz: self.two_wire.frequency_hz,
            pullups: true,
        }
    }

    pub fn serial_bus_config(&self, trial: &SerialTrial) -> SerialBusConfig {
        SerialBusConfig {
            mosi: trial.mosi,
            sclk: trial.sclk,
            max_transfer_bytes: self.serial.max_transfer_bytes,
        }
    }

    pub fn transport_config(&self, trial: &SerialTrial) -> TransportConfig {
        TransportConfig {
            cs: trial.cs,
            dc: trial.dc,
            clock_hz: self.serial.clock_hz,
        }
    }

    pub fn panel_config(&self, trial: &SerialTrial) -> PanelConfig {
        PanelConfig {
            reset: Some(trial.rst),
            width: self.serial.width,
            height: self.serial.height,
            color_order: if self.serial.bgr {
                ColorOrder::Bgr
            } else {
                ColorOrder::Rgb
            },
        }
    }
}
