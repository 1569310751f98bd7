//! FT Click Driver
//!
//! Power-line communication transceiver. Packets in the
//! [`frame`](crate::protocol::frame) format are exchanged over UART; RST
//! is active low.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, Write};

use crate::config::{FT_BAUD_RATE, FT_BOOT_TIME_MS, FT_MAX_PAYLOAD, FT_RESET_PULSE_MS};
use crate::error::{Error, Result};
use crate::hal::gpio::{DigitalOut, PinLevel};
use crate::hal::uart::UartPort;
use crate::protocol::frame::{self, encoded_len, Frame, FrameDecoder, FrameError, FrameStatus};

/// Packet received from the FT Click
pub type FtFrame = Frame<FT_MAX_PAYLOAD>;

/// FT Click settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FtConfig {
    /// UART baud rate the caller should open the port with
    pub baud_rate: u32,
    /// RST pulse width in ms
    pub reset_pulse_ms: u32,
    /// Boot time after reset in ms
    pub boot_time_ms: u32,
}

impl Default for FtConfig {
    fn default() -> Self {
        Self {
            baud_rate: FT_BAUD_RATE,
            reset_pulse_ms: FT_RESET_PULSE_MS,
            boot_time_ms: FT_BOOT_TIME_MS,
        }
    }
}

/// FT Click
pub struct Ft<U, R, D> {
    uart: UartPort<U>,
    rst: DigitalOut<R>,
    delay: D,
    decoder: FrameDecoder<FT_MAX_PAYLOAD>,
    config: FtConfig,
}

impl<U, R, D> Ft<U, R, D>
where
    U: Read + Write,
    R: OutputPin,
    D: DelayNs,
{
    /// Take the UART and RST pin; the transceiver is released from reset
    pub fn new(uart: U, rst: R, delay: D, config: FtConfig) -> Result<Self, U::Error> {
        Ok(Self {
            uart: UartPort::new(uart),
            rst: DigitalOut::new(rst, PinLevel::High).map_err(Error::Pin)?,
            delay,
            decoder: FrameDecoder::new(),
            config,
        })
    }

    /// Current settings
    #[must_use]
    pub const fn config(&self) -> &FtConfig {
        &self.config
    }

    /// Pulse RST, wait for boot and drop any partial packet
    pub async fn reset(&mut self) -> Result<(), U::Error> {
        self.rst.set_low().map_err(Error::Pin)?;
        self.delay.delay_ms(self.config.reset_pulse_ms).await;
        self.rst.set_high().map_err(Error::Pin)?;
        self.delay.delay_ms(self.config.boot_time_ms).await;
        self.decoder.reset();
        info!("ft reset");
        Ok(())
    }

    /// Frame and send one payload
    pub async fn send_package(&mut self, payload: &[u8]) -> Result<(), U::Error> {
        if payload.len() > FT_MAX_PAYLOAD {
            return Err(Error::Frame(FrameError::TooLong(payload.len())));
        }
        let mut packet = [0u8; encoded_len(FT_MAX_PAYLOAD)];
        let len = frame::encode(payload, &mut packet)?;
        debug!("ft tx {} bytes", payload.len());
        self.uart.send(&packet[..len]).await.map_err(Error::Bus)
    }

    /// Receive and decode one byte
    ///
    /// Returns the packet the byte completed, if any. A packet that fails
    /// its length or CRC check is reported as [`Error::Frame`]. An ended
    /// stream is reported as [`Error::Timeout`].
    pub async fn poll(&mut self) -> Result<Option<FtFrame>, U::Error> {
        let Some(byte) = self.uart.read_byte().await.map_err(Error::Bus)? else {
            return Err(Error::Timeout);
        };
        match self.decoder.feed(byte) {
            Some(Ok(frame)) => {
                debug!("ft rx {} bytes", frame.len());
                Ok(Some(frame))
            }
            Some(Err(err)) => {
                warn!("ft: dropped packet");
                Err(Error::Frame(err))
            }
            None => Ok(None),
        }
    }

    /// Wait for the next packet
    pub async fn receive(&mut self) -> Result<FtFrame, U::Error> {
        loop {
            if let Some(frame) = self.poll().await? {
                return Ok(frame);
            }
        }
    }

    /// Receive state after the last byte
    #[must_use]
    pub const fn status(&self) -> FrameStatus {
        self.decoder.status()
    }

    /// Release the UART, RST pin and delay
    pub fn release(self) -> (U, R, D) {
        (self.uart.release(), self.rst.release(), self.delay)
    }
}
