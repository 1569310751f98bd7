//! Driver error type
//!
//! Every fallible driver operation returns [`Result`]. The bus error of
//! the underlying HAL is carried verbatim in [`Error::Bus`]; pin and PWM
//! errors are reduced to their `embedded-hal` error kinds so a driver only
//! needs a single type parameter.

use embedded_hal::{digital, pwm};
use thiserror::Error;

use crate::protocol::frame::FrameError;
use crate::protocol::nmea::NmeaError;

/// Driver result with the bus error type `E`
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Errors reported by Click drivers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error<E> {
    /// The I2C/SPI/UART/ADC transaction failed
    #[error("bus error: {0:?}")]
    Bus(E),
    /// A GPIO pin operation failed
    #[error("pin error: {0:?}")]
    Pin(digital::ErrorKind),
    /// A PWM channel operation failed
    #[error("pwm error: {0:?}")]
    Pwm(pwm::ErrorKind),
    /// An argument was outside the range the device accepts
    #[error("invalid argument")]
    InvalidArgument,
    /// The device did not answer with the expected identification
    #[error("device not detected")]
    NotDetected,
    /// The device did not become ready in time
    #[error("timed out waiting for device")]
    Timeout,
    /// A received NMEA sentence could not be used
    #[error(transparent)]
    Nmea(#[from] NmeaError),
    /// A received packet could not be decoded
    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl<E> Error<E> {
    /// Reduce a GPIO error to its kind
    pub(crate) fn pin<P: digital::Error>(err: P) -> Self {
        Self::Pin(err.kind())
    }

    /// Reduce a PWM error to its kind
    pub(crate) fn pwm<P: pwm::Error>(err: P) -> Self {
        Self::Pwm(err.kind())
    }
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Debug2Format(self));
    }
}
