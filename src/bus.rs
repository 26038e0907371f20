//! Hardware seams used by the scanners
//!
//! Each acquire step hands out a handle that borrows the controller it came
//! from, and every handle is given back by value. A trial therefore cannot
//! start a new claim while an older one is alive, and teardown always runs
//! panel -> transport -> bus.

use embedded_graphics::primitives::Rectangle;

use crate::error::BusError;
use crate::pins::Pin;

/// Result of addressing a device on the two-wire bus
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    Ack,
    Nack,
    Error(BusError),
}

impl Probe {
    pub fn is_ack(&self) -> bool {
        matches!(self, Probe::Ack)
    }
}

/// Two-wire bus configuration for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoWireConfig {
    pub sda: Pin,
    pub scl: Pin,
    pub frequency_hz: u32,
    /// Internal pull-ups on both lines
    pub pullups: bool,
}

/// Owner of the shared two-wire controller unit
pub trait TwoWireHost {
    type Bus<'a>: TwoWireBus
    where
        Self: 'a;

    /// Remove whatever driver sits on the controller. "Not installed" is not an error.
    fn teardown(&mut self);

    /// Configure and install a driver for the given pins
    fn install(&mut self, config: &TwoWireConfig) -> Result<Self::Bus<'_>, BusError>;
}

/// Installed two-wire driver
pub trait TwoWireBus {
    /// START, address + W, STOP
    fn probe(&mut self, address: u8, timeout_ms: u32) -> Probe;

    fn uninstall(self);
}

/// Direct GPIO level control
pub trait GpioControl {
    fn drive_high(&mut self, pin: Pin) -> Result<(), BusError>;
}

/// Serial bus configuration for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialBusConfig {
    pub mosi: Pin,
    pub sclk: Pin,
    pub max_transfer_bytes: usize,
}

/// Panel transport (command/data framing) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub cs: Pin,
    pub dc: Pin,
    pub clock_hz: u32,
}

/// Pixel order expected by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Panel device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// `None` when the reset line is not connected
    pub reset: Option<Pin>,
    pub width: u16,
    pub height: u16,
    pub color_order: ColorOrder,
}

/// Owner of the shared SPI host
pub trait SerialHost: GpioControl {
    type Bus<'a>: SerialBus
    where
        Self: 'a;

    /// Free any bus left on the host. Freeing an idle host is not an error.
    fn release(&mut self);

    fn init_bus(&mut self, config: &SerialBusConfig) -> Result<Self::Bus<'_>, BusError>;
}

/// Initialised serial bus
pub trait SerialBus {
    type Transport<'a>: PanelTransport
    where
        Self: 'a;

    fn attach(&mut self, config: &TransportConfig) -> Result<Self::Transport<'_>, BusError>;

    fn free(self);
}

/// Panel IO bound to a chip-select and a D/C line
pub trait PanelTransport {
    type Panel<'a>: Panel
    where
        Self: 'a;

    fn attach(&mut self, config: &PanelConfig) -> Result<Self::Panel<'_>, BusError>;

    fn delete(self);
}

/// Panel device driver
pub trait Panel {
    fn reset(&mut self) -> Result<(), BusError>;

    fn init(&mut self) -> Result<(), BusError>;

    fn invert_colors(&mut self, invert: bool) -> Result<(), BusError>;

    fn display_on(&mut self, on: bool) -> Result<(), BusError>;

    /// Write RGB565 pixels, row-major, into `area`
    fn draw_bitmap(&mut self, area: Rectangle, pixels: &[u16]) -> Result<(), BusError>;

    fn delete(self);
}
