//! I2C Bus Abstractions
//!
//! Register-oriented helpers over any `embedded-hal-async` I2C bus.
//! Click boards address 8-bit registers; some (TouchPad 4) store 16-bit
//! little-endian words behind them.

use embedded_hal_async::i2c::I2c;

/// I2C operation result
pub type I2cResult<T, E> = Result<T, E>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper bound to one device address
pub struct I2cBus<I> {
    i2c: I,
    addr: I2cAddress,
}

impl<I: I2c> I2cBus<I> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I, addr: I2cAddress) -> Self {
        Self { i2c, addr }
    }

    /// Device address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.addr
    }

    /// Write bytes to the device
    pub async fn write(&mut self, data: &[u8]) -> I2cResult<(), I::Error> {
        self.i2c.write(self.addr.addr(), data).await
    }

    /// Read bytes from the device
    pub async fn read(&mut self, buffer: &mut [u8]) -> I2cResult<(), I::Error> {
        self.i2c.read(self.addr.addr(), buffer).await
    }

    /// Write then read (combined transaction)
    pub async fn write_read(&mut self, write: &[u8], read: &mut [u8]) -> I2cResult<(), I::Error> {
        self.i2c.write_read(self.addr.addr(), write, read).await
    }

    /// Write a single register
    pub async fn write_reg(&mut self, reg: u8, value: u8) -> I2cResult<(), I::Error> {
        self.i2c.write(self.addr.addr(), &[reg, value]).await
    }

    /// Read a single register
    pub async fn read_reg(&mut self, reg: u8) -> I2cResult<u8, I::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr.addr(), &[reg], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write multiple registers starting at base address
    ///
    /// Up to 16 values go out as one auto-incrementing burst. Longer runs
    /// are written one register per transaction.
    pub async fn write_regs(&mut self, base_reg: u8, values: &[u8]) -> I2cResult<(), I::Error> {
        // Short bursts go out as one transaction
        if values.len() <= 16 {
            let mut buf = [0u8; 17];
            buf[0] = base_reg;
            buf[1..=values.len()].copy_from_slice(values);
            self.i2c.write(self.addr.addr(), &buf[..=values.len()]).await
        } else {
            for (i, &value) in values.iter().enumerate() {
                self.write_reg(base_reg.wrapping_add(i as u8), value).await?;
            }
            Ok(())
        }
    }

    /// Read multiple registers starting at base address
    pub async fn read_regs(&mut self, base_reg: u8, buffer: &mut [u8]) -> I2cResult<(), I::Error> {
        self.i2c.write_read(self.addr.addr(), &[base_reg], buffer).await
    }

    /// Read a 16-bit little-endian register
    pub async fn read_reg_u16_le(&mut self, reg: u8) -> I2cResult<u16, I::Error> {
        let mut buf = [0u8; 2];
        self.read_regs(reg, &mut buf).await?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write a 16-bit little-endian register
    pub async fn write_reg_u16_le(&mut self, reg: u8, value: u16) -> I2cResult<(), I::Error> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c.write(self.addr.addr(), &[reg, lo, hi]).await
    }

    /// Read a 16-bit big-endian register
    pub async fn read_reg_u16_be(&mut self, reg: u8) -> I2cResult<u16, I::Error> {
        let mut buf = [0u8; 2];
        self.read_regs(reg, &mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Write a 16-bit big-endian register
    pub async fn write_reg_u16_be(&mut self, reg: u8, value: u16) -> I2cResult<(), I::Error> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c.write(self.addr.addr(), &[reg, hi, lo]).await
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

/// Scan a bus for responding devices
pub async fn scan<I: I2c>(i2c: &mut I) -> heapless::Vec<I2cAddress, 16> {
    let mut devices = heapless::Vec::new();

    for addr in 0x08..0x78 {
        let mut buf = [0u8; 1];
        if i2c.read(addr, &mut buf).await.is_ok() {
            let _ = devices.push(I2cAddress::new(addr));
        }
    }

    devices
}
