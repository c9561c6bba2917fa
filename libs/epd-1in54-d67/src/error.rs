use core::convert::Infallible;
use linux_embedded_hal::CdevPinError;
use linux_embedded_hal::SPIError;
use linux_embedded_hal::gpio_cdev::Error as GpioError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Timeout waiting for busy pin")]
    Timeout,
    #[error("Frame is {actual} bytes, panel RAM holds {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("SPI error: {0}")]
    Spi(#[from] SPIError),
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    #[error("GPIO error: {0}")]
    Gpio(#[from] GpioError),
    #[error("Cdev pin error: {0}")]
    CdevPin(#[from] CdevPinError),
    #[error("Infallible")]
    Infallible(#[from] Infallible),
}

pub type EpdResult<T> = Result<T, Error>;
