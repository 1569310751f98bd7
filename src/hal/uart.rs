//! UART Helpers
//!
//! Byte-stream helpers over `embedded-io-async` serial ports.

use embedded_io_async::{Read, Write};

/// Serial port wrapper
pub struct UartPort<U> {
    uart: U,
}

impl<U: Read + Write> UartPort<U> {
    /// Wrap a serial port
    #[must_use]
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Write all bytes and flush
    pub async fn send(&mut self, data: &[u8]) -> Result<(), U::Error> {
        self.uart.write_all(data).await?;
        self.uart.flush().await
    }

    /// Write a string and flush
    pub async fn send_str(&mut self, text: &str) -> Result<(), U::Error> {
        self.send(text.as_bytes()).await
    }

    /// Read whatever is available, at least one byte
    pub async fn read_into(&mut self, buffer: &mut [u8]) -> Result<usize, U::Error> {
        self.uart.read(buffer).await
    }

    /// Read a single byte; `None` when the stream ended
    pub async fn read_byte(&mut self) -> Result<Option<u8>, U::Error> {
        let mut byte = [0u8];
        match self.uart.read(&mut byte).await? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Release the port
    pub fn release(self) -> U {
        self.uart
    }
}
