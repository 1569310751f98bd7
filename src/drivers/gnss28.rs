//! GNSS 28 Click Driver
//!
//! Multi-constellation receiver at 115200 baud. Besides RST it routes a
//! wake-up input (WUP, on the PWM pin) that brings the module out of
//! backup mode on a rising edge.

use core::ops::{Deref, DerefMut};

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, Write};

use super::gnss::{Gnss, GnssConfig};
use crate::config::{GNSS28_BAUD_RATE, GNSS_BOOT_TIME_MS, GNSS_RESET_PULSE_MS};
use crate::error::{Error, Result};
use crate::hal::gpio::{DigitalOut, PinLevel};

/// GNSS 28 settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gnss28Config {
    /// UART baud rate the caller should open the port with
    pub baud_rate: u32,
    /// RST pulse width in ms
    pub reset_pulse_ms: u32,
    /// Boot time after reset in ms
    pub boot_time_ms: u32,
    /// WUP high time in ms
    pub wake_pulse_ms: u32,
}

impl Default for Gnss28Config {
    fn default() -> Self {
        Self {
            baud_rate: GNSS28_BAUD_RATE,
            reset_pulse_ms: GNSS_RESET_PULSE_MS,
            boot_time_ms: GNSS_BOOT_TIME_MS,
            wake_pulse_ms: 10,
        }
    }
}

impl From<Gnss28Config> for GnssConfig {
    fn from(config: Gnss28Config) -> Self {
        Self {
            reset_pulse_ms: config.reset_pulse_ms,
            boot_time_ms: config.boot_time_ms,
            reset_active: PinLevel::Low,
            ..Self::default()
        }
    }
}

/// GNSS 28 Click
///
/// Derefs to the shared [`Gnss`] receiver for sentence access.
pub struct Gnss28<U, R, W, D> {
    receiver: Gnss<U, R, D>,
    wup: DigitalOut<W>,
    config: Gnss28Config,
}

impl<U, R, W, D> Gnss28<U, R, W, D>
where
    U: Read + Write,
    R: OutputPin,
    W: OutputPin,
    D: DelayNs,
{
    /// Take the UART opened at `config.baud_rate`, RST and WUP
    pub fn new(uart: U, rst: R, wup: W, delay: D, config: Gnss28Config) -> Result<Self, U::Error> {
        Ok(Self {
            receiver: Gnss::new(uart, rst, delay, config.into())?,
            wup: DigitalOut::new(wup, PinLevel::Low).map_err(Error::Pin)?,
            config,
        })
    }

    /// Reset the receiver and wait for it to boot
    pub async fn init(&mut self) -> Result<(), U::Error> {
        self.receiver.reset().await
    }

    /// Pulse WUP to leave backup mode
    pub async fn wake_up(&mut self) -> Result<(), U::Error> {
        self.wup.set_high().map_err(Error::Pin)?;
        self.receiver.pause(self.config.wake_pulse_ms).await;
        self.wup.set_low().map_err(Error::Pin)?;
        debug!("gnss28 wake-up pulse");
        Ok(())
    }

    /// Configured baud rate
    #[must_use]
    pub const fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }

    /// Release the receiver and WUP pin
    pub fn into_parts(self) -> (Gnss<U, R, D>, W) {
        (self.receiver, self.wup.release())
    }
}

impl<U, R, W, D> Deref for Gnss28<U, R, W, D> {
    type Target = Gnss<U, R, D>;

    fn deref(&self) -> &Self::Target {
        &self.receiver
    }
}

impl<U, R, W, D> DerefMut for Gnss28<U, R, W, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.receiver
    }
}
