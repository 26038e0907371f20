//! The two discovery passes and the probe session that runs them
//!
//! A session drives the hold-high pins, scans the two-wire bus, waits
//! `settle_ms`, then walks the LCD trials. Nothing is remembered between
//! sessions, so running one again replays the same hardware sequence.

pub mod serial;
pub mod two_wire;

#[cfg(test)]
mod mock;

use std::fmt;

use anyhow::Result;
use embedded_hal::delay::DelayNs;

use crate::bus::{GpioControl, SerialHost, TwoWireHost};
use crate::config::ProbeConfig;
use crate::pins::CandidatePool;

pub use serial::{SerialScanner, SerialSummary, TrialError, TrialStep};
pub use two_wire::{AddressAck, TwoWireHit, TwoWireOutcome, TwoWireScanner};

/// What one probe session saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub two_wire: TwoWireOutcome,
    pub serial: SerialSummary,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I2C: {}; LCD: {} trials, {} not driven",
            self.two_wire, self.serial.trials, self.serial.failed
        )
    }
}

pub struct Prober<'c> {
    config: &'c ProbeConfig,
    pool: CandidatePool,
}

impl<'c> Prober<'c> {
    pub fn new(config: &'c ProbeConfig) -> Result<Self> {
        config.validate()?;
        let pool = config.candidate_pool()?;
        Ok(Self { config, pool })
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    pub fn run<I, S, D>(&self, two_wire: &mut I, serial: &mut S, delay: &mut D) -> ProbeReport
    where
        I: TwoWireHost,
        S: SerialHost,
        D: DelayNs,
    {
        log::info!("Pin probe starting, pool {:?}", self.pool.pins());
        self.hold_high(serial);

        let two_wire = TwoWireScanner::new(&self.pool, self.config).run(two_wire);

        delay.delay_ms(self.config.settle_ms);

        let serial = SerialScanner::new(&self.pool, self.config).run(serial, delay);

        let report = ProbeReport { two_wire, serial };
        log::info!("Pin probe finished: {}", report);
        report
    }

    /// Power rails and backlights that must be up before anything is visible
    fn hold_high<G: GpioControl>(&self, gpio: &mut G) {
        for &pin in &self.config.hold_high {
            match gpio.drive_high(pin) {
                Ok(()) => log::info!("GPIO{} held high", pin),
                Err(e) => log::warn!("Could not hold GPIO{} high: {}", pin, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::mock::{Event, MockDelay, MockSerial, MockTwoWire};
    use crate::trial::TwoWireTrial;

    fn small_config() -> ProbeConfig {
        let mut config = ProbeConfig::default();
        config.pool.pins = vec![0, 3, 4];
        config.serial.data_select = vec![[21, 20]];
        config.serial.observe_ms = 5;
        config
    }

    #[test]
    fn runs_both_scans_with_settle_between() {
        let config = small_config();
        let prober = Prober::new(&config).unwrap();

        let mut i2c = MockTwoWire::default();
        i2c.acks.push((TwoWireTrial { sda: 3, scl: 4 }, 0x18));
        let mut spi = MockSerial::default();
        let mut delay = MockDelay::default();

        let report = prober.run(&mut i2c, &mut spi, &mut delay);

        let TwoWireOutcome::Found(hit) = &report.two_wire else {
            panic!("expected a hit, got {:?}", report.two_wire);
        };
        assert_eq!(hit.trial, TwoWireTrial { sda: 3, scl: 4 });
        assert_eq!(report.serial, SerialSummary { trials: 6, failed: 0 });

        // settle comes first, then three colours per trial
        assert_eq!(delay.calls[0], 1000);
        assert_eq!(delay.calls.len(), 1 + 6 * 3);
        assert_eq!(delay.total_ms, 1000 + 6 * 3 * 5);
    }

    #[test]
    fn hold_high_pins_are_driven_first() {
        let mut config = small_config();
        config.hold_high = vec![10, 8];
        let prober = Prober::new(&config).unwrap();

        let mut spi = MockSerial::default();
        prober.run(
            &mut MockTwoWire::default(),
            &mut spi,
            &mut MockDelay::default(),
        );

        assert_eq!(&spi.events[..2], &[Event::DriveHigh(10), Event::DriveHigh(8)]);
        assert_eq!(spi.events[2], Event::Release);
    }

    #[test]
    fn sessions_are_repeatable() {
        let config = small_config();
        let prober = Prober::new(&config).unwrap();

        let session = || {
            let mut i2c = MockTwoWire::default();
            let mut spi = MockSerial::default();
            let report = prober.run(&mut i2c, &mut spi, &mut MockDelay::default());
            (report, i2c.installs, i2c.probes, spi.events)
        };

        assert_eq!(session(), session());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ProbeConfig::default();
        config.pool.pins.clear();
        assert!(Prober::new(&config).is_err());
    }

    #[test]
    fn report_line() {
        let report = ProbeReport {
            two_wire: TwoWireOutcome::Exhausted { attempts: 110 },
            serial: SerialSummary {
                trials: 1008,
                failed: 2,
            },
        };
        assert_eq!(
            report.to_string(),
            "I2C: nothing answered after 110 pairs; LCD: 1008 trials, 2 not driven"
        );
    }
}
