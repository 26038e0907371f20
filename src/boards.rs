//! Wirings of boards that have already been brought up
//!
//! Used only to annotate scan output: a hit that matches a known layout is
//! almost certainly that board.

use crate::pins::Pin;
use crate::trial::{SerialTrial, TwoWireTrial};

/// LCD wiring of a known board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdWiring {
    pub mosi: Pin,
    pub sclk: Pin,
    pub cs: Pin,
    pub dc: Pin,
    /// `None` when the panel reset is not connected
    pub rst: Option<Pin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownBoard {
    pub name: &'static str,
    /// Codec I2C `(sda, scl)`, if the board has one
    pub codec: Option<TwoWireTrial>,
    pub lcd: LcdWiring,
}

pub static KNOWN_BOARDS: [KnownBoard; 2] = [
    KnownBoard {
        name: "kotty-esp32-c3",
        codec: Some(TwoWireTrial { sda: 3, scl: 4 }),
        lcd: LcdWiring {
            mosi: 21,
            sclk: 0,
            cs: 20,
            dc: 1,
            rst: None,
        },
    },
    KnownBoard {
        name: "toy-ai-core-c3-mini",
        codec: None,
        lcd: LcdWiring {
            mosi: 7,
            sclk: 6,
            cs: 10,
            dc: 5,
            rst: Some(4),
        },
    },
];

impl LcdWiring {
    /// A board without a reset line matches any reset candidate
    pub fn matches(&self, trial: &SerialTrial) -> bool {
        self.mosi == trial.mosi
            && self.sclk == trial.sclk
            && self.cs == trial.cs
            && self.dc == trial.dc
            && self.rst.map_or(true, |rst| rst == trial.rst)
    }
}

pub fn match_two_wire(trial: &TwoWireTrial) -> Option<&'static KnownBoard> {
    KNOWN_BOARDS.iter().find(|board| board.codec == Some(*trial))
}

pub fn match_serial(trial: &SerialTrial) -> Option<&'static KnownBoard> {
    KNOWN_BOARDS.iter().find(|board| board.lcd.matches(trial))
}
