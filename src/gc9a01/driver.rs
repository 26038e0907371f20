//! GC9A01 Display Driver Implementation
//!
//! The driver borrows an already attached [`DisplayInterface`], so a panel can
//! come and go while the SPI device and D/C line stay put. It owns the reset
//! line, which is given back when the driver is dropped.
//!
//! ## Bring-up
//!
//! 1. [`Panel::reset`] pulses RST, or sends a software reset when there is no RST line
//! 1. [`Panel::init`] plays the vendor register table, sets colour order and RGB565, leaves sleep
//! 1. [`Panel::invert_colors`] and [`Panel::display_on`]
//!
//! ### Inversion
//!
//! The round panels are built with an inverted LCD, so colours only come out
//! right with inversion ON.

use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

pub use display_interface::DisplayError;

use crate::bus::{ColorOrder, Panel, PanelConfig};
use crate::error::BusError;
use crate::gc9a01::interface::DisplayInterface;
use crate::gc9a01::{cmd::Cmd, flag::Flag};

const RESET_PULSE_MS: u32 = 10;
const SW_RESET_MS: u32 = 20;
const SLEEP_OUT_MS: u32 = 120;

/// Vendor register table, sent as-is after reset
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (Cmd::INTER_REGISTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (Cmd::INTER_REGISTER_ENABLE_1, &[]),
    (Cmd::INTER_REGISTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (0x84, &[0x40]),
    (0x85, &[0xFF]),
    (0x86, &[0xFF]),
    (0x87, &[0xFF]),
    (0x88, &[0x0A]),
    (0x89, &[0x21]),
    (0x8A, &[0x00]),
    (0x8B, &[0x80]),
    (0x8C, &[0x01]),
    (0x8D, &[0x01]),
    (0x8E, &[0xFF]),
    (0x8F, &[0xFF]),
    (0xB6, &[0x00, 0x20]),
    (0x90, &[0x08, 0x08, 0x08, 0x08]),
    (0xBD, &[0x06]),
    (0xBC, &[0x00]),
    (0xFF, &[0x60, 0x01, 0x04]),
    (0xC3, &[0x13]),
    (0xC4, &[0x13]),
    (0xC9, &[0x22]),
    (0xBE, &[0x11]),
    (0xE1, &[0x10, 0x0E]),
    (0xDF, &[0x21, 0x0C, 0x02]),
    (0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xED, &[0x1B, 0x0B]),
    (0xAE, &[0x77]),
    (0xCD, &[0x63]),
    (0x70, &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03]),
    (0xE8, &[0x34]),
    (
        0x62,
        &[0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70],
    ),
    (
        0x63,
        &[0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70],
    ),
    (0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    (0x66, &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00]),
    (0x67, &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98]),
    (0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    (0x98, &[0x3E, 0x07]),
    (0x35, &[]),
];

/// GC9A01 panel driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin, optional at runtime
/// - `DELAY` - Delay provider for timing
pub struct Gc9a01<'t, SPI, DC, RST, DELAY> {
    interface: &'t mut DisplayInterface<SPI, DC>,
    rst: Option<RST>,
    delay: DELAY,
    config: PanelConfig,
}

impl<'t, SPI, DC, RST, DELAY> Gc9a01<'t, SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(
        interface: &'t mut DisplayInterface<SPI, DC>,
        rst: Option<RST>,
        delay: DELAY,
        config: PanelConfig,
    ) -> Self {
        Gc9a01 {
            interface,
            rst,
            delay,
            config,
        }
    }

    fn memory_access_control(&self) -> u8 {
        match self.config.color_order {
            ColorOrder::Rgb => Flag::MADCTL_RGB,
            ColorOrder::Bgr => Flag::MADCTL_BGR,
        }
    }

    /// Column/row window for the next memory write, both ends inclusive
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let [xs_hi, xs_lo] = x0.to_be_bytes();
        let [xe_hi, xe_lo] = x1.to_be_bytes();
        self.interface
            .cmd_with_data(Cmd::COLUMN_ADDRESS_SET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;

        let [ys_hi, ys_lo] = y0.to_be_bytes();
        let [ye_hi, ye_lo] = y1.to_be_bytes();
        self.interface
            .cmd_with_data(Cmd::ROW_ADDRESS_SET, &[ys_hi, ys_lo, ye_hi, ye_lo])
    }
}

impl<'t, SPI, DC, RST, DELAY> Panel for Gc9a01<'t, SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn reset(&mut self) -> Result<(), BusError> {
        match self.rst.as_mut() {
            Some(rst) => {
                rst.set_low().map_err(|_| DisplayError::RSError)?;
                self.delay.delay_ms(RESET_PULSE_MS);
                rst.set_high().map_err(|_| DisplayError::RSError)?;
                self.delay.delay_ms(RESET_PULSE_MS);
            }
            None => {
                self.interface.cmd(Cmd::SW_RESET)?;
                self.delay.delay_ms(SW_RESET_MS);
            }
        }
        Ok(())
    }

    fn init(&mut self) -> Result<(), BusError> {
        log::debug!("GC9A01 init, {} vendor registers", INIT_SEQUENCE.len());
        for (command, data) in INIT_SEQUENCE {
            self.interface.cmd_with_data(*command, data)?;
        }

        let madctl = self.memory_access_control();
        self.interface
            .cmd_with_data(Cmd::MEMORY_ACCESS_CONTROL, &[madctl])?;
        self.interface
            .cmd_with_data(Cmd::PIXEL_FORMAT, &[Flag::COLMOD_16BIT])?;

        self.interface.cmd(Cmd::SLEEP_OUT)?;
        self.delay.delay_ms(SLEEP_OUT_MS);
        Ok(())
    }

    fn invert_colors(&mut self, invert: bool) -> Result<(), BusError> {
        let command = if invert {
            Cmd::INVERSION_ON
        } else {
            Cmd::INVERSION_OFF
        };
        Ok(self.interface.cmd(command)?)
    }

    fn display_on(&mut self, on: bool) -> Result<(), BusError> {
        let command = if on { Cmd::DISPLAY_ON } else { Cmd::DISPLAY_OFF };
        Ok(self.interface.cmd(command)?)
    }

    fn draw_bitmap(&mut self, area: Rectangle, pixels: &[u16]) -> Result<(), BusError> {
        let expected = area.size.width as usize * area.size.height as usize;
        if pixels.len() != expected {
            return Err(BusError::Geometry {
                expected,
                actual: pixels.len(),
            });
        }
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let x0 = area.top_left.x as u16;
        let y0 = area.top_left.y as u16;
        self.set_window(x0, y0, bottom_right.x as u16, bottom_right.y as u16)?;
        self.interface.cmd(Cmd::MEMORY_WRITE)?;
        self.interface.pixels(pixels)?;
        Ok(())
    }

    fn delete(self) {
        log::debug!("GC9A01 panel released");
    }
}
