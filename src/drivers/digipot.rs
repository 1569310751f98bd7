//! DIGI POT Click Driver
//!
//! MCP41xx single-channel digital potentiometer on SPI. Every command
//! starts with one byte:
//!
//! ```text
//! ┌─────────┬─────┬───────┐
//! │ A3..A0  │ C1C0│ D9 D8 │
//! └─────────┴─────┴───────┘
//! ```
//!
//! Writes and reads add a second byte with D7..D0. Increment and decrement
//! are single-byte commands. Wiper positions run 0..=256, so position 256
//! connects the wiper straight to terminal A.

use embedded_hal_async::spi::SpiDevice;

use crate::error::{Error, Result};
use crate::hal::spi::SpiPort;

/// Memory map addresses
mod reg {
    pub const VOLATILE_WIPER_0: u8 = 0x00;
    pub const NV_WIPER_0: u8 = 0x02;
    pub const TCON: u8 = 0x04;
}

/// Command bits
mod cmd {
    pub const WRITE: u8 = 0b00;
    pub const INCREMENT: u8 = 0b01;
    pub const DECREMENT: u8 = 0b10;
    pub const READ: u8 = 0b11;
}

/// Highest wiper position
pub const MAX_WIPER: u16 = 256;

/// Wiper position after power-on
pub const MID_SCALE: u16 = 128;

/// Terminal connect bits of TCON for wiper 0 (R0HW, R0A, R0W, R0B)
const TCON_ALL_CONNECTED: u16 = 0x00F;

const fn command_byte(address: u8, command: u8, data: u16) -> u8 {
    (address << 4) | (command << 2) | ((data >> 8) as u8 & 0x03)
}

/// Potentiometer settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigiPotConfig {
    /// End-to-end resistance R_AB in ohms
    pub full_scale_ohms: f32,
    /// Wiper resistance R_W in ohms
    pub wiper_ohms: f32,
}

impl Default for DigiPotConfig {
    fn default() -> Self {
        Self {
            full_scale_ohms: 10_000.0,
            wiper_ohms: 75.0,
        }
    }
}

/// DIGI POT Click
pub struct DigiPot<S> {
    spi: SpiPort<S>,
    config: DigiPotConfig,
    wiper: u16,
}

impl<S: SpiDevice> DigiPot<S> {
    /// Wrap the SPI device; the wiper is assumed at mid-scale until set
    #[must_use]
    pub fn new(spi: S, config: DigiPotConfig) -> Self {
        Self {
            spi: SpiPort::new(spi),
            config,
            wiper: MID_SCALE,
        }
    }

    /// Move the wiper to `position` (0..=256)
    pub async fn set_wiper(&mut self, position: u16) -> Result<(), S::Error> {
        self.write_register(reg::VOLATILE_WIPER_0, position).await?;
        self.wiper = position;
        debug!("digipot wiper {}", position);
        Ok(())
    }

    /// Store `position` as the power-on wiper position
    pub async fn store_wiper(&mut self, position: u16) -> Result<(), S::Error> {
        self.write_register(reg::NV_WIPER_0, position).await
    }

    /// Read the wiper position back from the device
    pub async fn wiper(&mut self) -> Result<u16, S::Error> {
        let position = self.read_register(reg::VOLATILE_WIPER_0).await?;
        self.wiper = position;
        Ok(position)
    }

    /// Last position written or read
    #[must_use]
    pub const fn cached_wiper(&self) -> u16 {
        self.wiper
    }

    /// Step the wiper one position towards terminal A
    pub async fn increment(&mut self) -> Result<(), S::Error> {
        let command = command_byte(reg::VOLATILE_WIPER_0, cmd::INCREMENT, 0);
        self.spi.write(&[command]).await.map_err(Error::Bus)?;
        self.wiper = (self.wiper + 1).min(MAX_WIPER);
        Ok(())
    }

    /// Step the wiper one position towards terminal B
    pub async fn decrement(&mut self) -> Result<(), S::Error> {
        let command = command_byte(reg::VOLATILE_WIPER_0, cmd::DECREMENT, 0);
        self.spi.write(&[command]).await.map_err(Error::Bus)?;
        self.wiper = self.wiper.saturating_sub(1);
        Ok(())
    }

    /// Connect or disconnect all wiper 0 terminals
    pub async fn set_connected(&mut self, connected: bool) -> Result<(), S::Error> {
        let tcon = self.read_register(reg::TCON).await?;
        let tcon = if connected {
            tcon | TCON_ALL_CONNECTED
        } else {
            tcon & !TCON_ALL_CONNECTED
        };
        self.write_register(reg::TCON, tcon).await
    }

    /// Wiper-to-B resistance at `position`
    #[must_use]
    pub fn resistance_ohms(&self, position: u16) -> f32 {
        let position = position.min(MAX_WIPER);
        self.config.full_scale_ohms * f32::from(position) / f32::from(MAX_WIPER)
            + self.config.wiper_ohms
    }

    /// Move the wiper to the position closest to `ohms` between W and B
    pub async fn set_resistance(&mut self, ohms: f32) -> Result<u16, S::Error> {
        if !(0.0..=self.config.full_scale_ohms + self.config.wiper_ohms).contains(&ohms) {
            return Err(Error::InvalidArgument);
        }
        let steps = (ohms - self.config.wiper_ohms).max(0.0) * f32::from(MAX_WIPER)
            / self.config.full_scale_ohms;
        let position = ((steps + 0.5) as u16).min(MAX_WIPER);
        self.set_wiper(position).await?;
        Ok(position)
    }

    /// Release the SPI device
    pub fn release(self) -> S {
        self.spi.release()
    }

    async fn write_register(&mut self, address: u8, value: u16) -> Result<(), S::Error> {
        if value > 0x1FF || (address != reg::TCON && value > MAX_WIPER) {
            return Err(Error::InvalidArgument);
        }
        let frame = [command_byte(address, cmd::WRITE, value), value as u8];
        self.spi.write(&frame).await.map_err(Error::Bus)
    }

    async fn read_register(&mut self, address: u8) -> Result<u16, S::Error> {
        let mut frame = [command_byte(address, cmd::READ, 0x3FF), 0xFF];
        self.spi.transfer(&mut frame).await.map_err(Error::Bus)?;
        Ok((u16::from(frame[0] & 0x01) << 8) | u16::from(frame[1]))
    }
}
