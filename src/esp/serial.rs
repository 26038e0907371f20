//! SPI2 plus GPIO D/C and RST lines for the LCD trials

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
use esp_idf_svc::hal::spi::{
    Dma, Spi, SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig, SPI2,
};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{self, esp, gpio_mode_t_GPIO_MODE_OUTPUT};

use super::{check, output_pin};
use crate::bus::{
    GpioControl, PanelConfig, PanelTransport, SerialBus, SerialBusConfig, SerialHost,
    TransportConfig,
};
use crate::error::BusError;
use crate::gc9a01::{DisplayInterface, Gc9a01};
use crate::pins::Pin;

type EspSpiDevice<'t> = SpiDeviceDriver<'t, &'t SpiDriver<'t>>;
type EspOutput<'d> = PinDriver<'d, AnyOutputPin, Output>;

pub struct EspSerialHost {
    spi: SPI2,
}

impl EspSerialHost {
    pub fn new(spi: SPI2) -> Self {
        Self { spi }
    }
}

impl GpioControl for EspSerialHost {
    fn drive_high(&mut self, pin: Pin) -> Result<(), BusError> {
        let gpio = check(pin)?;
        // Raw calls so the level survives after this returns
        unsafe {
            esp!(sys::gpio_reset_pin(gpio))?;
            esp!(sys::gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT))?;
            esp!(sys::gpio_set_level(gpio, 1))?;
        }
        Ok(())
    }
}

impl SerialHost for EspSerialHost {
    type Bus<'a> = EspSerialBus<'a> where Self: 'a;

    fn release(&mut self) {
        // ESP_ERR_INVALID_STATE just means the bus was already free
        let _ = unsafe { sys::spi_bus_free(SPI2::device()) };
    }

    fn init_bus(&mut self, config: &SerialBusConfig) -> Result<EspSerialBus<'_>, BusError> {
        let driver = SpiDriver::new(
            &mut self.spi,
            output_pin(config.sclk)?,
            output_pin(config.mosi)?,
            Option::<AnyIOPin>::None, // write-only panel
            &SpiDriverConfig::new().dma(Dma::Auto(config.max_transfer_bytes)),
        )?;
        Ok(EspSerialBus { driver })
    }
}

pub struct EspSerialBus<'d> {
    driver: SpiDriver<'d>,
}

impl<'d> SerialBus for EspSerialBus<'d> {
    type Transport<'t> = EspTransport<'t> where Self: 't;

    fn attach(&mut self, config: &TransportConfig) -> Result<EspTransport<'_>, BusError> {
        let device = SpiDeviceDriver::new(
            &self.driver,
            Some(output_pin(config.cs)?),
            &SpiConfig::new().baudrate(Hertz(config.clock_hz)),
        )?;
        let dc = PinDriver::output(output_pin(config.dc)?)?;

        Ok(EspTransport {
            interface: DisplayInterface::new(device, dc),
        })
    }

    fn free(self) {
        drop(self.driver);
    }
}

pub struct EspTransport<'t> {
    interface: DisplayInterface<EspSpiDevice<'t>, EspOutput<'t>>,
}

impl<'t> PanelTransport for EspTransport<'t> {
    type Panel<'p> = Gc9a01<'p, EspSpiDevice<'t>, EspOutput<'t>, EspOutput<'static>, Delay>
    where
        Self: 'p;

    fn attach(&mut self, config: &PanelConfig) -> Result<Self::Panel<'_>, BusError> {
        let rst = config
            .reset
            .map(|pin| Ok::<_, BusError>(PinDriver::output(output_pin(pin)?)?))
            .transpose()?;

        Ok(Gc9a01::new(
            &mut self.interface,
            rst,
            Delay::default(),
            *config,
        ))
    }

    fn delete(self) {
        drop(self.interface);
    }
}
