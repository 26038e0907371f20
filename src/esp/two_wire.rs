//! I2C0 driven through the ESP-IDF legacy I2C driver

use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::i2c::{I2c, I2cConfig, I2cDriver, I2C0};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{self, ESP_FAIL};

use super::io_pin;
use crate::bus::{Probe, TwoWireBus, TwoWireConfig, TwoWireHost};
use crate::error::BusError;

pub struct EspTwoWire {
    i2c: I2C0,
}

impl EspTwoWire {
    pub fn new(i2c: I2C0) -> Self {
        Self { i2c }
    }
}

pub struct EspTwoWireBus<'d> {
    driver: I2cDriver<'d>,
}

impl TwoWireHost for EspTwoWire {
    type Bus<'a> = EspTwoWireBus<'a> where Self: 'a;

    fn teardown(&mut self) {
        // ESP_ERR_INVALID_STATE just means nothing was installed
        let _ = unsafe { sys::i2c_driver_delete(I2C0::port()) };
    }

    fn install(&mut self, config: &TwoWireConfig) -> Result<EspTwoWireBus<'_>, BusError> {
        let i2c_config = I2cConfig::new()
            .baudrate(Hertz(config.frequency_hz))
            .sda_enable_pullup(config.pullups)
            .scl_enable_pullup(config.pullups);

        let driver = I2cDriver::new(
            &mut self.i2c,
            io_pin(config.sda)?,
            io_pin(config.scl)?,
            &i2c_config,
        )?;
        Ok(EspTwoWireBus { driver })
    }
}

impl TwoWireBus for EspTwoWireBus<'_> {
    fn probe(&mut self, address: u8, timeout_ms: u32) -> Probe {
        let timeout = TickType::new_millis(u64::from(timeout_ms)).ticks();
        match self.driver.write(address, &[], timeout) {
            Ok(()) => Probe::Ack,
            Err(e) if e.code() == ESP_FAIL => Probe::Nack,
            Err(e) => Probe::Error(e.into()),
        }
    }

    fn uninstall(self) {
        drop(self.driver);
    }
}
