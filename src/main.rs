#[cfg(target_os = "espidf")]
use anyhow::Context;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::{Delay, FreeRtos};
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripherals::Peripherals;

#[cfg(target_os = "espidf")]
use pinprobe::esp::{EspSerialHost, EspTwoWire};
#[cfg(target_os = "espidf")]
use pinprobe::{ProbeConfig, Prober};

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = ProbeConfig::load_embedded();
    log::set_max_level(config.log_level);

    let reset_reason = esp_idf_svc::hal::reset::ResetReason::get();
    log::info!("Reset reason: {:?}", reset_reason);

    // Only I2C0 and SPI2 are handed out; trial pins are built from their numbers
    let peripherals = Peripherals::take().context("Could not take peripherals")?;
    let mut i2c = EspTwoWire::new(peripherals.i2c0);
    let mut spi = EspSerialHost::new(peripherals.spi2);
    let mut delay = Delay::default();

    let prober = Prober::new(&config).context("Probe config rejected")?;
    let report = prober.run(&mut i2c, &mut spi, &mut delay);
    log::info!("{}", report);

    // Keep the console and the held pins alive
    loop {
        FreeRtos::delay_ms(1000);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    println!("pinprobe only runs on ESP-IDF targets, build with --target riscv32imc-esp-espidf");
}
