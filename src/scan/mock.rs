//! Recording fakes for the bus traits
//!
//! A claim that is still held when the next acquire happens is answered with
//! `BusError::InUse` and counted, so tests can assert that nothing leaks.

use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;

use crate::bus::{
    GpioControl, Panel, PanelConfig, PanelTransport, Probe, SerialBus, SerialBusConfig, SerialHost,
    TransportConfig, TwoWireBus, TwoWireConfig, TwoWireHost,
};
use crate::error::BusError;
use crate::pins::Pin;
use crate::trial::{SerialTrial, TwoWireTrial};

#[derive(Default)]
pub struct MockDelay {
    pub total_ms: u64,
    pub calls: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        self.total_ms += u64::from(ms);
    }
}

#[derive(Default)]
pub struct MockTwoWire {
    /// `(pair, address)` combinations that ACK
    pub acks: Vec<(TwoWireTrial, u8)>,
    pub install_fails: Vec<TwoWireTrial>,
    pub probe_errors: Vec<(TwoWireTrial, BusError)>,

    pub installs: Vec<TwoWireTrial>,
    pub configs: Vec<TwoWireConfig>,
    pub probes: Vec<(TwoWireTrial, u8)>,
    pub timeouts: Vec<u32>,
    pub teardowns: usize,
    pub uninstalls: usize,
    /// Teardown found a driver nobody uninstalled
    pub leaked: usize,
    pub in_use: usize,
    claimed: bool,
}

pub struct MockTwoWireBus<'a> {
    host: &'a mut MockTwoWire,
    trial: TwoWireTrial,
}

impl TwoWireHost for MockTwoWire {
    type Bus<'a> = MockTwoWireBus<'a> where Self: 'a;

    fn teardown(&mut self) {
        self.teardowns += 1;
        if self.claimed {
            self.leaked += 1;
            self.claimed = false;
        }
    }

    fn install(&mut self, config: &TwoWireConfig) -> Result<MockTwoWireBus<'_>, BusError> {
        let trial = TwoWireTrial {
            sda: config.sda,
            scl: config.scl,
        };
        if self.claimed {
            self.in_use += 1;
            return Err(BusError::InUse);
        }
        if self.install_fails.contains(&trial) {
            return Err(BusError::Driver(0x102));
        }

        self.installs.push(trial);
        self.configs.push(*config);
        self.claimed = true;
        Ok(MockTwoWireBus { host: self, trial })
    }
}

impl TwoWireBus for MockTwoWireBus<'_> {
    fn probe(&mut self, address: u8, timeout_ms: u32) -> Probe {
        self.host.probes.push((self.trial, address));
        self.host.timeouts.push(timeout_ms);

        if let Some((_, err)) = self.host.probe_errors.iter().find(|(t, _)| *t == self.trial) {
            return Probe::Error(err.clone());
        }
        if self.host.acks.contains(&(self.trial, address)) {
            Probe::Ack
        } else {
            Probe::Nack
        }
    }

    fn uninstall(self) {
        self.host.uninstalls += 1;
        self.host.claimed = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Release,
    DriveHigh(Pin),
    InitBus {
        mosi: Pin,
        sclk: Pin,
        max_transfer_bytes: usize,
    },
    Attach {
        cs: Pin,
        dc: Pin,
        clock_hz: u32,
    },
    AttachPanel {
        reset: Option<Pin>,
    },
    Reset,
    Init,
    Invert(bool),
    DisplayOn(bool),
    Draw {
        y: i32,
        height: u32,
        color: u16,
    },
    DeletePanel,
    DeleteTransport,
    FreeBus,
}

#[derive(Default)]
pub struct MockSerial {
    pub fail_bus: Option<fn(&SerialBusConfig) -> bool>,
    pub fail_transport: Option<fn(&TransportConfig) -> bool>,
    pub fail_panel: Option<fn(&PanelConfig) -> bool>,
    /// Fail the n-th draw call over the whole run
    pub fail_draw_at: Option<usize>,

    pub events: Vec<Event>,
    pub in_use: usize,
    pub bus_claimed: bool,
    pub transport_live: bool,
    pub panel_live: bool,
    /// Draw calls so far, failed ones included
    pub draws: usize,
}

impl MockSerial {
    /// Trials that made it all the way to a panel, rebuilt from the event log
    pub fn trials(&self) -> Vec<SerialTrial> {
        let mut trials = Vec::new();
        let mut bus = None;
        let mut io = None;
        for event in &self.events {
            match *event {
                Event::InitBus { mosi, sclk, .. } => bus = Some((mosi, sclk)),
                Event::Attach { cs, dc, .. } => io = Some((cs, dc)),
                Event::AttachPanel { reset: Some(rst) } => {
                    if let (Some((mosi, sclk)), Some((cs, dc))) = (bus, io) {
                        trials.push(SerialTrial {
                            mosi,
                            sclk,
                            cs,
                            dc,
                            rst,
                        });
                    }
                }
                _ => {}
            }
        }
        trials
    }
}

impl GpioControl for MockSerial {
    fn drive_high(&mut self, pin: Pin) -> Result<(), BusError> {
        self.events.push(Event::DriveHigh(pin));
        Ok(())
    }
}

impl SerialHost for MockSerial {
    type Bus<'a> = MockSerialBus<'a> where Self: 'a;

    fn release(&mut self) {
        self.events.push(Event::Release);
    }

    fn init_bus(&mut self, config: &SerialBusConfig) -> Result<MockSerialBus<'_>, BusError> {
        self.events.push(Event::InitBus {
            mosi: config.mosi,
            sclk: config.sclk,
            max_transfer_bytes: config.max_transfer_bytes,
        });
        if self.bus_claimed {
            self.in_use += 1;
            return Err(BusError::InUse);
        }
        if self.fail_bus.is_some_and(|fail| fail(config)) {
            return Err(BusError::Driver(0x103));
        }

        self.bus_claimed = true;
        Ok(MockSerialBus { host: self })
    }
}

pub struct MockSerialBus<'a> {
    host: &'a mut MockSerial,
}

impl<'a> SerialBus for MockSerialBus<'a> {
    type Transport<'t> = MockTransport<'t> where Self: 't;

    fn attach(&mut self, config: &TransportConfig) -> Result<MockTransport<'_>, BusError> {
        let host = &mut *self.host;
        host.events.push(Event::Attach {
            cs: config.cs,
            dc: config.dc,
            clock_hz: config.clock_hz,
        });
        if host.transport_live {
            host.in_use += 1;
            return Err(BusError::InUse);
        }
        if host.fail_transport.is_some_and(|fail| fail(config)) {
            return Err(BusError::Driver(0x102));
        }

        host.transport_live = true;
        Ok(MockTransport { host })
    }

    fn free(self) {
        self.host.events.push(Event::FreeBus);
        self.host.bus_claimed = false;
    }
}

pub struct MockTransport<'t> {
    host: &'t mut MockSerial,
}

impl<'t> PanelTransport for MockTransport<'t> {
    type Panel<'p> = MockPanel<'p> where Self: 'p;

    fn attach(&mut self, config: &PanelConfig) -> Result<MockPanel<'_>, BusError> {
        let host = &mut *self.host;
        host.events.push(Event::AttachPanel {
            reset: config.reset,
        });
        if host.panel_live {
            host.in_use += 1;
            return Err(BusError::InUse);
        }
        if host.fail_panel.is_some_and(|fail| fail(config)) {
            return Err(BusError::InvalidPin(config.reset.unwrap_or(0)));
        }

        host.panel_live = true;
        Ok(MockPanel { host })
    }

    fn delete(self) {
        self.host.events.push(Event::DeleteTransport);
        self.host.transport_live = false;
    }
}

pub struct MockPanel<'p> {
    host: &'p mut MockSerial,
}

impl Panel for MockPanel<'_> {
    fn reset(&mut self) -> Result<(), BusError> {
        self.host.events.push(Event::Reset);
        Ok(())
    }

    fn init(&mut self) -> Result<(), BusError> {
        self.host.events.push(Event::Init);
        Ok(())
    }

    fn invert_colors(&mut self, invert: bool) -> Result<(), BusError> {
        self.host.events.push(Event::Invert(invert));
        Ok(())
    }

    fn display_on(&mut self, on: bool) -> Result<(), BusError> {
        self.host.events.push(Event::DisplayOn(on));
        Ok(())
    }

    fn draw_bitmap(&mut self, area: Rectangle, pixels: &[u16]) -> Result<(), BusError> {
        let n = self.host.draws;
        self.host.draws += 1;
        if self.host.fail_draw_at == Some(n) {
            return Err(BusError::Driver(-1));
        }

        self.host.events.push(Event::Draw {
            y: area.top_left.y,
            height: area.size.height,
            color: pixels[0],
        });
        Ok(())
    }

    fn delete(self) {
        self.host.events.push(Event::DeletePanel);
        self.host.panel_live = false;
    }
}
