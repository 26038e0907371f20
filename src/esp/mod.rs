//! ESP-IDF implementations of the bus traits
//!
//! Trial pins are picked at runtime, so GPIOs are built from their numbers
//! with `AnyIOPin::new`/`AnyOutputPin::new`. That is sound as long as nothing
//! else holds the pin singletons: `main` takes `Peripherals`, hands I2C0 and
//! SPI2 over to these hosts and never touches `peripherals.pins`.

mod serial;
mod two_wire;

pub use serial::{EspSerialBus, EspSerialHost, EspTransport};
pub use two_wire::{EspTwoWire, EspTwoWireBus};

use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin};
use esp_idf_svc::sys::EspError;

use crate::error::BusError;
use crate::pins::{self, Pin};

impl From<EspError> for BusError {
    fn from(e: EspError) -> Self {
        BusError::Driver(e.code())
    }
}

fn check(pin: Pin) -> Result<i32, BusError> {
    if !pins::is_drivable(pin) {
        return Err(BusError::InvalidPin(pin));
    }
    Ok(i32::from(pin))
}

fn output_pin(pin: Pin) -> Result<AnyOutputPin, BusError> {
    let gpio = check(pin)?;
    // SAFETY: see module docs, the pin singletons are never taken
    Ok(unsafe { AnyOutputPin::new(gpio) })
}

fn io_pin(pin: Pin) -> Result<AnyIOPin, BusError> {
    let gpio = check(pin)?;
    // SAFETY: see module docs, the pin singletons are never taken
    Ok(unsafe { AnyIOPin::new(gpio) })
}
