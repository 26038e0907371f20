//! GC9A01 round TFT driver
//!
//! Used on the 1.28" 240x240 round panels most ESP32-C3 toy boards ship with.
//!
//! The controller is write-only on these boards (no MISO), so the driver only
//! ever pushes commands and pixels:
//!
//! 1. [`interface::DisplayInterface`] frames bytes as command or data with the D/C line
//! 1. [`driver::Gc9a01`] runs reset, the vendor init table and window writes on top of it
//!
//! Pixels are RGB565 and go out big-endian, high byte first.

pub mod driver;
pub mod interface;

mod cmd;
mod flag;

pub use driver::Gc9a01;
pub use interface::DisplayInterface;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 240;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 240;
