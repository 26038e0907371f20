//! Solid colour fills used as the visible "this wiring works" signal

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, RgbColor};
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;

use crate::bus::Panel;
use crate::error::BusError;

/// Colours shown per trial, in order
pub const SIGNAL: [(&str, Rgb565); 3] = [
    ("red", Rgb565::RED),
    ("green", Rgb565::GREEN),
    ("blue", Rgb565::BLUE),
];

/// Rows written per `draw_bitmap` call so one call stays within `max_transfer_bytes`
pub fn band_rows(width: u16, height: u16, max_transfer_bytes: usize) -> u16 {
    let line_bytes = usize::from(width) * 2;
    let rows = (max_transfer_bytes / line_bytes.max(1)).max(1);
    rows.min(usize::from(height)) as u16
}

/// Paint the whole `width` x `height` frame with one colour, one band at a time
pub fn fill<P: Panel>(
    panel: &mut P,
    color: Rgb565,
    width: u16,
    height: u16,
    max_transfer_bytes: usize,
) -> Result<(), BusError> {
    let rows = band_rows(width, height, max_transfer_bytes);
    let band = vec![color.into_storage(); usize::from(width) * usize::from(rows)];

    let mut y = 0u16;
    while y < height {
        let h = rows.min(height - y);
        let area = Rectangle::new(
            Point::new(0, i32::from(y)),
            Size::new(u32::from(width), u32::from(h)),
        );
        log::debug!("Fill rows {}..{}", y, y + h);
        panel.draw_bitmap(area, &band[..usize::from(width) * usize::from(h)])?;
        y += h;
    }

    Ok(())
}

/// Red, green, blue, each held for `observe_ms`
pub fn show_signal<P: Panel, D: DelayNs>(
    panel: &mut P,
    delay: &mut D,
    width: u16,
    height: u16,
    max_transfer_bytes: usize,
    observe_ms: u32,
) -> Result<(), BusError> {
    for (name, color) in SIGNAL {
        log::debug!("Showing {}", name);
        fill(panel, color, width, height, max_transfer_bytes)?;
        delay.delay_ms(observe_ms);
    }
    Ok(())
}
