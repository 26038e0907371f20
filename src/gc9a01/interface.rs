//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{digital::OutputPin, spi::SpiDevice};

/// SPI device plus the Data/Command line of a GC9A01 panel
pub struct DisplayInterface<SPI, DC> {
    /// SPI device, chip-select handled by the device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
}

impl<SPI, DC> DisplayInterface<SPI, DC> {
    pub fn new(spi: SPI, dc: DC) -> Self {
        DisplayInterface { spi, dc }
    }
}

impl<SPI, DC> DisplayInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.is_empty() {
            return Ok(());
        }
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send RGB565 pixels, high byte first
    pub(crate) fn pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError> {
        let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_be_bytes()).collect();
        self.data(&bytes)
    }
}
