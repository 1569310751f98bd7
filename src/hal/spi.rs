//! SPI Helpers
//!
//! Command/response helpers over an `embedded-hal-async` [`SpiDevice`].
//! Chip select is owned by the device implementation.

use embedded_hal_async::spi::{Operation, SpiDevice};

/// SPI device wrapper
pub struct SpiPort<S> {
    spi: S,
}

impl<S: SpiDevice> SpiPort<S> {
    /// Wrap an SPI device
    #[must_use]
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Write bytes in one chip-select frame
    pub async fn write(&mut self, data: &[u8]) -> Result<(), S::Error> {
        self.spi.write(data).await
    }

    /// Read bytes in one chip-select frame
    pub async fn read(&mut self, buffer: &mut [u8]) -> Result<(), S::Error> {
        self.spi.read(buffer).await
    }

    /// Full-duplex transfer in place
    pub async fn transfer(&mut self, buffer: &mut [u8]) -> Result<(), S::Error> {
        self.spi.transfer_in_place(buffer).await
    }

    /// Write a command then read the response without releasing chip select
    pub async fn write_then_read(&mut self, command: &[u8], response: &mut [u8]) -> Result<(), S::Error> {
        self.spi
            .transaction(&mut [Operation::Write(command), Operation::Read(response)])
            .await
    }

    /// Exchange one 16-bit big-endian word
    pub async fn transfer_word(&mut self, word: u16) -> Result<u16, S::Error> {
        let mut buf = word.to_be_bytes();
        self.spi.transfer_in_place(&mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Release the device
    pub fn release(self) -> S {
        self.spi
    }
}
