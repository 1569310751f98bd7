//! GNSS 7 Click Driver
//!
//! u-blox NEO-M8N receiver. Talks NMEA at 9600 baud out of reset; RST is
//! active low.

use core::ops::{Deref, DerefMut};

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, Write};

use super::gnss::{Gnss, GnssConfig};
use crate::config::{GNSS7_BAUD_RATE, GNSS_BOOT_TIME_MS, GNSS_RESET_PULSE_MS};
use crate::error::Result;
use crate::hal::gpio::PinLevel;

/// GNSS 7 settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gnss7Config {
    /// UART baud rate the caller should open the port with
    pub baud_rate: u32,
    /// RST pulse width in ms
    pub reset_pulse_ms: u32,
    /// Boot time after reset in ms
    pub boot_time_ms: u32,
}

impl Default for Gnss7Config {
    fn default() -> Self {
        Self {
            baud_rate: GNSS7_BAUD_RATE,
            reset_pulse_ms: GNSS_RESET_PULSE_MS,
            boot_time_ms: GNSS_BOOT_TIME_MS,
        }
    }
}

impl From<Gnss7Config> for GnssConfig {
    fn from(config: Gnss7Config) -> Self {
        Self {
            reset_pulse_ms: config.reset_pulse_ms,
            boot_time_ms: config.boot_time_ms,
            reset_active: PinLevel::Low,
            ..Self::default()
        }
    }
}

/// GNSS 7 Click
///
/// Derefs to the shared [`Gnss`] receiver for sentence access.
pub struct Gnss7<U, R, D> {
    receiver: Gnss<U, R, D>,
    baud_rate: u32,
}

impl<U, R, D> Gnss7<U, R, D>
where
    U: Read + Write,
    R: OutputPin,
    D: DelayNs,
{
    /// Take the UART opened at `config.baud_rate` and the RST pin
    pub fn new(uart: U, rst: R, delay: D, config: Gnss7Config) -> Result<Self, U::Error> {
        Ok(Self {
            receiver: Gnss::new(uart, rst, delay, config.into())?,
            baud_rate: config.baud_rate,
        })
    }

    /// Reset the receiver and wait for it to boot
    pub async fn init(&mut self) -> Result<(), U::Error> {
        self.receiver.reset().await
    }

    /// Configured baud rate
    #[must_use]
    pub const fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Unwrap the shared receiver
    pub fn into_inner(self) -> Gnss<U, R, D> {
        self.receiver
    }
}

impl<U, R, D> Deref for Gnss7<U, R, D> {
    type Target = Gnss<U, R, D>;

    fn deref(&self) -> &Self::Target {
        &self.receiver
    }
}

impl<U, R, D> DerefMut for Gnss7<U, R, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.receiver
    }
}
