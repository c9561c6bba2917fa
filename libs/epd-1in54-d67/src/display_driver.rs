use crate::common::{BUFFER_SIZE, HEIGHT, WIDTH};
use crate::error::{EpdResult, Error};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;
use linux_embedded_hal::{CdevPin, Delay, SpidevBus};
use log::{debug, trace};
use std::time::Instant;

// EPD (Display) constants
pub(crate) const RESET_DELAY_MS: u32 = 10;
pub(crate) const RESET_PULSE_MS: u32 = 10;
pub(crate) const SOFTWARE_RESET_DELAY_MS: u32 = 10;
pub(crate) const WAIT_IDLE_DELAY_MS: u32 = 10;
pub(crate) const WAIT_IDLE_TIMEOUT_MS: u32 = 10000;
pub(crate) const SLEEP_DELAY_MS: u32 = 100;

// Last addressable gate line and RAM column byte of the 200x200 panel.
const LAST_GATE: u16 = 199;
const LAST_COLUMN_BYTE: u8 = 24;
const _: () = assert!(LAST_GATE as u32 == HEIGHT - 1);
const _: () = assert!(LAST_COLUMN_BYTE as u32 == WIDTH / 8 - 1);
// Gate count (MUX = 200 - 1), scan from G0, interlaced off
const DRIVER_OUTPUT: [u8; 3] = [LAST_GATE.to_le_bytes()[0], LAST_GATE.to_le_bytes()[1], 0x00];

// --- SSD1681 Driver ---

#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum EpdCommand {
    DriverOutputControl = 0x01,
    DeepSleep = 0x10,
    DataEntryMode = 0x11,
    SoftwareReset = 0x12,
    TemperatureSensor = 0x18,
    ActivateDisplayUpdateSequence = 0x20,
    DisplayUpdateControl = 0x22,
    WriteRam = 0x24,
    WriteRamPrevious = 0x26,
    BorderWaveform = 0x3C,
    SetRamXAddress = 0x44,
    SetRamYAddress = 0x45,
    SetRamXAddressCounter = 0x4E,
    SetRamYAddressCounter = 0x4F,
}

pub enum EpdData {
    DriverOutputControl,
    DataEntryMode,
    BorderWaveform,
    TemperatureSensor,
    FullUpdate,
    DeepSleep,
}

impl EpdData {
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            EpdData::DriverOutputControl => &DRIVER_OUTPUT,
            // X increment, Y increment, address counter along X
            EpdData::DataEntryMode => &[0x03],
            EpdData::BorderWaveform => &[0x05],
            // Internal temperature sensor
            EpdData::TemperatureSensor => &[0x80],
            // Clock on, load temperature + LUT, display mode 1, clock off
            EpdData::FullUpdate => &[0xF7],
            EpdData::DeepSleep => &[0x01],
        }
    }
}

/// RAM X window in column bytes, inclusive on both ends.
fn ram_x_window() -> [u8; 2] {
    [0x00, LAST_COLUMN_BYTE]
}

/// RAM Y window in gate lines, little-endian start then end.
fn ram_y_window() -> [u8; 4] {
    let [end_lo, end_hi] = LAST_GATE.to_le_bytes();
    [0x00, 0x00, end_lo, end_hi]
}

pub struct Epd1in54d67 {
    spi: SpidevBus,
    busy: CdevPin,
    dc: CdevPin,
    rst: CdevPin,
    delay: Delay,
    initialized: bool,
}

impl Epd1in54d67 {
    pub fn new(
        spi: SpidevBus,
        busy: CdevPin,
        dc: CdevPin,
        rst: CdevPin,
        delay: Delay,
    ) -> EpdResult<Self> {
        let mut driver = Self {
            spi,
            busy,
            dc,
            rst,
            delay,
            initialized: false,
        };
        driver.init()?;
        Ok(driver)
    }

    /// Reset the controller and program the full-window configuration.
    fn init(&mut self) -> EpdResult<()> {
        self.hardware_reset()?;
        self.send_command(EpdCommand::SoftwareReset, None)?;
        self.delay.delay_ms(SOFTWARE_RESET_DELAY_MS);
        self.send_command(
            EpdCommand::DriverOutputControl,
            Some(EpdData::DriverOutputControl.as_slice()),
        )?;
        self.send_command(
            EpdCommand::BorderWaveform,
            Some(EpdData::BorderWaveform.as_slice()),
        )?;
        self.send_command(
            EpdCommand::TemperatureSensor,
            Some(EpdData::TemperatureSensor.as_slice()),
        )?;
        self.send_command(
            EpdCommand::DataEntryMode,
            Some(EpdData::DataEntryMode.as_slice()),
        )?;
        self.set_full_ram_window()?;
        self.initialized = true;
        debug!("EPD: controller initialized");
        Ok(())
    }

    fn hardware_reset(&mut self) -> EpdResult<()> {
        debug!("EPD: Hardware reset starting");
        self.rst.set_high()?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_low()?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high()?;
        self.delay.delay_ms(RESET_DELAY_MS);
        debug!("EPD: Hardware reset complete");
        Ok(())
    }

    fn send_command(&mut self, command: EpdCommand, data: Option<&[u8]>) -> EpdResult<()> {
        trace!("EPD: send_command {:?} (0x{:02X})", command, command as u8);
        match command {
            EpdCommand::ActivateDisplayUpdateSequence
            | EpdCommand::SoftwareReset
            | EpdCommand::DisplayUpdateControl
            | EpdCommand::WriteRam
            | EpdCommand::WriteRamPrevious
            | EpdCommand::DeepSleep => {
                self.wait_until_idle()?;
            }
            _ => {}
        }
        self.dc.set_low()?;
        self.spi.write(&[command as u8])?;

        if let Some(data) = data {
            self.send_data(data)?;
        }

        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> EpdResult<()> {
        self.dc.set_high()?;
        self.spi.write(data)?;
        trace!("EPD: sent {} bytes of data", data.len());
        Ok(())
    }

    fn wait_until_idle(&mut self) -> EpdResult<()> {
        let start = Instant::now();

        while self.busy.is_high()?
            && start.elapsed().as_millis() <= u128::from(WAIT_IDLE_TIMEOUT_MS)
        {
            self.delay.delay_ms(WAIT_IDLE_DELAY_MS);
        }

        let elapsed = start.elapsed().as_millis();
        if self.busy.is_high()? {
            debug!("EPD: wait_until_idle TIMEOUT after {elapsed}ms");
            Err(Error::Timeout)
        } else {
            trace!("EPD: wait_until_idle done in {elapsed}ms");
            Ok(())
        }
    }

    pub fn sleep(&mut self) -> EpdResult<()> {
        self.send_command(EpdCommand::DeepSleep, Some(EpdData::DeepSleep.as_slice()))?;
        self.delay.delay_ms(SLEEP_DELAY_MS);
        // Deep sleep can only be left through a hardware reset
        self.initialized = false;
        Ok(())
    }

    /// Write a full frame to both RAM banks and run the full-refresh waveform.
    ///
    /// Blocks until the panel reports idle again.
    pub fn display_full(&mut self, buffer: &[u8]) -> EpdResult<()> {
        if buffer.len() != BUFFER_SIZE {
            return Err(Error::FrameSize {
                expected: BUFFER_SIZE,
                actual: buffer.len(),
            });
        }
        if !self.initialized {
            debug!("EPD: waking controller before refresh");
            self.init()?;
        }
        debug!("EPD: full refresh, buffer_len={}", buffer.len());

        self.set_full_ram_window()?;
        self.send_command(EpdCommand::WriteRam, Some(buffer))?;
        // The previous-image bank must match, otherwise the next full
        // waveform drives from stale data.
        self.set_full_ram_window()?;
        self.send_command(EpdCommand::WriteRamPrevious, Some(buffer))?;
        self.send_command(
            EpdCommand::DisplayUpdateControl,
            Some(EpdData::FullUpdate.as_slice()),
        )?;
        self.send_command(EpdCommand::ActivateDisplayUpdateSequence, None)?;
        self.wait_until_idle()
    }

    fn set_full_ram_window(&mut self) -> EpdResult<()> {
        self.send_command(EpdCommand::SetRamXAddress, Some(&ram_x_window()))?;
        self.send_command(EpdCommand::SetRamYAddress, Some(&ram_y_window()))?;
        self.send_command(EpdCommand::SetRamXAddressCounter, Some(&[0]))?;
        self.send_command(EpdCommand::SetRamYAddressCounter, Some(&[0, 0]))
    }
}
