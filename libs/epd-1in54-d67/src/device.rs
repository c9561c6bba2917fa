use crate::display_driver::Epd1in54d67;
pub use crate::error::{EpdResult, Error};
use crate::{common::Rotation, display::Display};
use linux_embedded_hal::{
    CdevPin, Delay, SpidevBus,
    gpio_cdev::{Chip, LineRequestFlags},
    spidev::{SpiModeFlags, SpidevOptions},
};
use log::info;

// Watchy wiring. Chip select (GPIO 5) is driven by the spidev device itself.
const DEFAULT_SPI_BUS_PATH: &str = "/dev/spidev0.0";
const DEFAULT_SPI_BITS_PER_WORD: u8 = 8;
const DEFAULT_SPI_MAX_SPEED_HZ: u32 = 4_000_000;
const DEFAULT_GPIO_CHIP_PATH: &str = "/dev/gpiochip0";
const DEFAULT_BUSY_PIN: u32 = 19;
const DEFAULT_DC_PIN: u32 = 10;
const DEFAULT_RST_PIN: u32 = 9;
const DEFAULT_ROTATION: Rotation = Rotation::Deg0;

const EPD_BUSY_CONSUMER: &str = "epd-busy";
const EPD_DC_CONSUMER: &str = "epd-dc";
const EPD_RST_CONSUMER: &str = "epd-rst";

#[derive(Default)]
pub struct DeviceConfig {
    pub spi_bus_path: Option<String>,
    pub spi_options: Option<SpidevOptions>,
    pub gpio_chip_path: Option<String>,
    pub busy_pin: Option<u32>,
    pub dc_pin: Option<u32>,
    pub rst_pin: Option<u32>,
    pub rotation: Option<Rotation>,
}

pub struct Device {
    pub display: Display,
}

impl Device {
    pub fn new(config: DeviceConfig) -> EpdResult<Self> {
        let rotation = config.rotation.unwrap_or(DEFAULT_ROTATION);
        let spi_bus_path = config
            .spi_bus_path
            .unwrap_or_else(|| DEFAULT_SPI_BUS_PATH.to_string());
        let spi_options = config.spi_options.unwrap_or_else(|| {
            SpidevOptions::new()
                .bits_per_word(DEFAULT_SPI_BITS_PER_WORD)
                .max_speed_hz(DEFAULT_SPI_MAX_SPEED_HZ)
                .mode(SpiModeFlags::SPI_MODE_0)
                .build()
        });
        let gpio_chip_path = config
            .gpio_chip_path
            .unwrap_or_else(|| DEFAULT_GPIO_CHIP_PATH.to_string());
        let busy_pin = config.busy_pin.unwrap_or(DEFAULT_BUSY_PIN);
        let dc_pin = config.dc_pin.unwrap_or(DEFAULT_DC_PIN);
        let rst_pin = config.rst_pin.unwrap_or(DEFAULT_RST_PIN);

        info!("Initializing display (busy={busy_pin}, dc={dc_pin}, rst={rst_pin}, {rotation:?})");

        let mut spi_bus = SpidevBus::open(spi_bus_path)?;
        spi_bus.configure(&spi_options)?;

        let mut chip = Chip::new(gpio_chip_path)?;
        let busy = CdevPin::new(chip.get_line(busy_pin)?.request(
            LineRequestFlags::INPUT,
            0,
            EPD_BUSY_CONSUMER,
        )?)?;
        let dc = CdevPin::new(chip.get_line(dc_pin)?.request(
            LineRequestFlags::OUTPUT,
            0,
            EPD_DC_CONSUMER,
        )?)?;
        let rst = CdevPin::new(chip.get_line(rst_pin)?.request(
            LineRequestFlags::OUTPUT,
            0,
            EPD_RST_CONSUMER,
        )?)?;
        let delay = Delay {};

        let epd_driver = Epd1in54d67::new(spi_bus, busy, dc, rst, delay)?;
        let display = Display::new(epd_driver, rotation);

        Ok(Self { display })
    }

    pub fn sleep(&mut self) -> EpdResult<()> {
        self.display.sleep()
    }
}
