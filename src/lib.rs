//! Pin-mapping probe for ESP32-C3 boards with an I2C audio codec and a round
//! GC9A01 LCD.
//!
//! The probe knows nothing about the board. It brute-forces the codec bus by
//! asking every SDA/SCL pair from a pool of free GPIOs for an ACK, then walks
//! every LCD wiring, painting red/green/blue each time, until the operator
//! sees colours and reads the matching `TRY LCD` line off the console.
//!
//! Hardware sits behind the traits in [`bus`]; [`esp`] implements them on
//! ESP-IDF and the scanners in [`scan`] are tested against recording fakes.

pub mod boards;
pub mod bus;
pub mod color;
pub mod config;
pub mod error;
pub mod gc9a01;
pub mod pins;
pub mod scan;
pub mod trial;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use config::ProbeConfig;
pub use error::BusError;
pub use scan::{ProbeReport, Prober};
