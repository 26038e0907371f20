//! Candidate pin assignments and the generators that enumerate them
//!
//! Both generators are plain iterators over the pool, so calling them again
//! with the same inputs replays the exact same sequence.

use std::fmt;

use crate::pins::{CandidatePool, Pin};

/// One I2C wiring hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoWireTrial {
    pub sda: Pin,
    pub scl: Pin,
}

impl fmt::Display for TwoWireTrial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SDA={} SCL={}", self.sda, self.scl)
    }
}

/// `[data, select]` pair the serial search is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSelect {
    pub mosi: Pin,
    pub cs: Pin,
}

impl DataSelect {
    pub const fn new(mosi: Pin, cs: Pin) -> Self {
        Self { mosi, cs }
    }
}

/// One LCD wiring hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialTrial {
    pub mosi: Pin,
    pub sclk: Pin,
    pub cs: Pin,
    pub dc: Pin,
    pub rst: Pin,
}

impl SerialTrial {
    pub fn pins(&self) -> [Pin; 5] {
        [self.mosi, self.sclk, self.cs, self.dc, self.rst]
    }

    /// All five roles land on different GPIOs
    pub fn is_distinct(&self) -> bool {
        let pins = self.pins();
        pins.iter()
            .enumerate()
            .all(|(i, pin)| !pins[i + 1..].contains(pin))
    }
}

impl fmt::Display for SerialTrial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MOSI={} SCLK={} CS={} DC={} RST={}",
            self.mosi, self.sclk, self.cs, self.dc, self.rst
        )
    }
}

/// Every ordered `(sda, scl)` pair from the pool with `sda != scl`.
///
/// SDA is the outer loop, so a lower-index SDA always comes first.
pub fn two_wire_trials(pool: &CandidatePool) -> impl Iterator<Item = TwoWireTrial> + Clone + '_ {
    let pins = pool.pins();
    pins.iter().flat_map(move |&sda| {
        pins.iter()
            .filter(move |&&scl| scl != sda)
            .map(move |&scl| TwoWireTrial { sda, scl })
    })
}

/// Every `(sclk, dc, rst)` triple from the pool, crossed with each data/select
/// option in order.
///
/// One option is exhausted before the next begins; inside an option the order
/// is SCLK-major, then DC, then RST, all in pool order. Triples reusing a pin
/// already taken by another role are skipped.
pub fn serial_trials<'a>(
    pool: &'a CandidatePool,
    options: &'a [DataSelect],
) -> impl Iterator<Item = SerialTrial> + Clone + 'a {
    let pins = pool.pins();
    options.iter().flat_map(move |&DataSelect { mosi, cs }| {
        pins.iter().flat_map(move |&sclk| {
            pins.iter().flat_map(move |&dc| {
                pins.iter().map(move |&rst| SerialTrial {
                    mosi,
                    sclk,
                    cs,
                    dc,
                    rst,
                })
            })
        })
    })
    .filter(SerialTrial::is_distinct)
}
