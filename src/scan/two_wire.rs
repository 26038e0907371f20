//! I2C address scan over every SDA/SCL pair in the pool
//!
//! Stops at the first pair where any target address ACKs.

use std::fmt;

use crate::boards;
use crate::bus::{Probe, TwoWireBus, TwoWireHost};
use crate::config::ProbeConfig;
use crate::pins::CandidatePool;
use crate::trial::{two_wire_trials, TwoWireTrial};

/// Whether one target address answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressAck {
    pub address: u8,
    pub acked: bool,
}

/// Winning pair and the ACK record that made it win
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoWireHit {
    pub trial: TwoWireTrial,
    pub acks: Vec<AddressAck>,
    /// Trials run, including the winning one
    pub attempts: usize,
}

impl TwoWireHit {
    pub fn acked_addresses(&self) -> impl Iterator<Item = u8> + '_ {
        self.acks.iter().filter(|a| a.acked).map(|a| a.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwoWireOutcome {
    Found(TwoWireHit),
    Exhausted { attempts: usize },
}

impl fmt::Display for TwoWireOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoWireOutcome::Found(hit) => {
                write!(f, "{} (ACK:", hit.trial)?;
                for ack in &hit.acks {
                    write!(f, " 0x{:02X}={}", ack.address, u8::from(ack.acked))?;
                }
                write!(f, ")")
            }
            TwoWireOutcome::Exhausted { attempts } => {
                write!(f, "nothing answered after {} pairs", attempts)
            }
        }
    }
}

pub struct TwoWireScanner<'c> {
    pool: &'c CandidatePool,
    config: &'c ProbeConfig,
}

impl<'c> TwoWireScanner<'c> {
    pub fn new(pool: &'c CandidatePool, config: &'c ProbeConfig) -> Self {
        Self { pool, config }
    }

    pub fn run<H: TwoWireHost>(&self, host: &mut H) -> TwoWireOutcome {
        let addresses = &self.config.two_wire.addresses;
        log::info!(
            "=== I2C scan: looking for the codec at {:02X?} on {} pins ===",
            addresses,
            self.pool.len()
        );

        let mut attempts = 0;
        for trial in two_wire_trials(self.pool) {
            attempts += 1;

            let Some(acks) = self.try_pair(host, &trial) else {
                continue;
            };

            if acks.iter().any(|a| a.acked) {
                let hit = TwoWireHit {
                    trial,
                    acks,
                    attempts,
                };
                let outcome = TwoWireOutcome::Found(hit);
                log::error!(">>> Found I2C bus: {}", outcome);
                if let Some(board) = boards::match_two_wire(&trial) {
                    log::error!(">>> Same codec wiring as {}", board.name);
                }
                return outcome;
            }
        }

        log::error!(
            "No codec answered on any of the {} pin pairs. Try adding GPIO18/19 to the pool.",
            attempts
        );
        TwoWireOutcome::Exhausted { attempts }
    }

    /// One install/probe/uninstall cycle. `None` when the driver did not come up.
    fn try_pair<H: TwoWireHost>(&self, host: &mut H, trial: &TwoWireTrial) -> Option<Vec<AddressAck>> {
        log::debug!("Trying {}", trial);

        host.teardown();
        let mut bus = match host.install(&self.config.two_wire_config(trial)) {
            Ok(bus) => bus,
            Err(e) => {
                log::debug!("{}: install failed: {}", trial, e);
                return None;
            }
        };

        let timeout_ms = self.config.two_wire.timeout_ms;
        let acks = self
            .config
            .two_wire
            .addresses
            .iter()
            .map(|&address| {
                let probe = bus.probe(address, timeout_ms);
                if let Probe::Error(e) = &probe {
                    log::debug!("{}: 0x{:02X} probe error: {}", trial, address, e);
                }
                AddressAck {
                    address,
                    acked: probe.is_ack(),
                }
            })
            .collect();

        bus.uninstall();
        Some(acks)
    }
}
