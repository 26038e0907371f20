//! Candidate GPIO pool for the pin probe
//!
//! Only pins listed here are ever driven while probing. Everything else on the
//! ESP32-C3 is either a strapping pin, the on-chip USB-Serial-JTAG link or the
//! SPI flash bus.

use std::ops::RangeInclusive;

use anyhow::{bail, Result};

/// GPIO number as used by ESP-IDF
pub type Pin = u8;

/// Default probe pool.
///
/// Excludes GPIO2 (strapping, usually a WS2812), GPIO9 (BOOT button) and
/// GPIO18/19 (USB D-/D+, toggling them drops the serial monitor).
pub const DEFAULT_POOL: [Pin; 11] = [0, 1, 3, 4, 5, 6, 7, 8, 10, 20, 21];

/// Highest GPIO number on the ESP32-C3
pub const MAX_GPIO: Pin = 21;

/// Pins which are accepted in a custom pool but worth a warning, and the
/// flash pins which are never accepted
pub struct Reserved;

impl Reserved {
    /// Strapping pin, often carries the onboard RGB LED
    pub const STRAP_LED: Pin = 2;
    /// Strapping pin wired to the BOOT button
    pub const BOOT: Pin = 9;
    /// USB D-
    pub const USB_DM: Pin = 18;
    /// USB D+
    pub const USB_DP: Pin = 19;

    /// SPI flash bus (SPIHD, SPIWP, SPICS0, SPICLK, SPID, SPIQ)
    pub const FLASH: RangeInclusive<Pin> = 12..=17;

    const ALL: [Pin; 4] = [Self::STRAP_LED, Self::BOOT, Self::USB_DM, Self::USB_DP];

    pub fn contains(pin: Pin) -> bool {
        Self::ALL.contains(&pin)
    }

    pub fn is_flash(pin: Pin) -> bool {
        Self::FLASH.contains(&pin)
    }

    pub fn reason(pin: Pin) -> Option<&'static str> {
        match pin {
            Self::STRAP_LED => Some("strapping pin / RGB LED"),
            Self::BOOT => Some("BOOT strapping pin"),
            Self::USB_DM | Self::USB_DP => Some("USB-Serial-JTAG, monitor may drop"),
            _ => None,
        }
    }
}

/// Whether the probe may drive `pin` at all
pub fn is_drivable(pin: Pin) -> bool {
    pin <= MAX_GPIO && !Reserved::is_flash(pin)
}

/// Fixed, ordered set of pins eligible for probing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    pins: Vec<Pin>,
}

impl CandidatePool {
    /// Build a pool, keeping the given order.
    ///
    /// Reserved pins are allowed but logged.
    pub fn new(pins: &[Pin]) -> Result<Self> {
        if pins.is_empty() {
            bail!("candidate pool is empty");
        }

        for (i, pin) in pins.iter().enumerate() {
            if pins[..i].contains(pin) {
                bail!("GPIO{} appears twice in the candidate pool", pin);
            }
            if Reserved::is_flash(*pin) {
                bail!("GPIO{} belongs to the SPI flash bus", pin);
            }
            if *pin > MAX_GPIO {
                bail!("GPIO{} does not exist on the ESP32-C3", pin);
            }
            if let Some(reason) = Reserved::reason(*pin) {
                log::warn!("GPIO{} is in the candidate pool ({})", pin, reason);
            }
        }

        Ok(Self {
            pins: pins.to_vec(),
        })
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn contains(&self, pin: Pin) -> bool {
        self.pins.contains(&pin)
    }
}

impl Default for CandidatePool {
    fn default() -> Self {
        Self {
            pins: DEFAULT_POOL.to_vec(),
        }
    }
}
