//! Temp&Hum 3 Click Driver
//!
//! TI HDC1000 temperature and humidity sensor on I2C. The driver runs the
//! sensor in sequential mode: a write of the temperature pointer starts
//! both conversions and a 4-byte read returns temperature then humidity,
//! each a big-endian 16-bit word.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::{TEMPHUM3_CONVERSION_MS, TEMPHUM3_I2C_ADDR};
use crate::error::{Error, Result};
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::types::{Celsius, RelativeHumidity};

/// HDC1000 register pointers
mod reg {
    pub const TEMPERATURE: u8 = 0x00;
    pub const CONFIGURATION: u8 = 0x02;
    pub const MANUFACTURER_ID: u8 = 0xFE;
    pub const DEVICE_ID: u8 = 0xFF;
}

/// Configuration register bits
mod cfg {
    pub const RESET: u16 = 1 << 15;
    pub const HEATER: u16 = 1 << 13;
    pub const SEQUENTIAL: u16 = 1 << 12;
    pub const BATTERY_LOW: u16 = 1 << 11;
    pub const TEMP_11BIT: u16 = 1 << 10;
    pub const HUM_11BIT: u16 = 1 << 8;
}

/// Manufacturer ID of Texas Instruments
pub const MANUFACTURER_ID: u16 = 0x5449;

/// HDC1000 device ID
pub const DEVICE_ID: u16 = 0x1000;

/// Conversion resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 14-bit temperature and humidity
    #[default]
    Bits14,
    /// 11-bit temperature and humidity
    Bits11,
}

/// Sensor settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TempHum3Config {
    /// 7-bit bus address
    pub address: I2cAddress,
    /// Enable the on-chip heater
    pub heater: bool,
    /// Conversion resolution
    pub resolution: Resolution,
}

impl Default for TempHum3Config {
    fn default() -> Self {
        Self {
            address: I2cAddress::new(TEMPHUM3_I2C_ADDR),
            heater: false,
            resolution: Resolution::Bits14,
        }
    }
}

impl TempHum3Config {
    fn register(&self) -> u16 {
        let mut value = cfg::SEQUENTIAL;
        if self.heater {
            value |= cfg::HEATER;
        }
        if self.resolution == Resolution::Bits11 {
            value |= cfg::TEMP_11BIT | cfg::HUM_11BIT;
        }
        value
    }
}

/// Convert a raw temperature word
#[must_use]
pub fn temperature_from_raw(raw: u16) -> Celsius {
    Celsius::new(f32::from(raw) / 65536.0 * 165.0 - 40.0)
}

/// Convert a raw humidity word
#[must_use]
pub fn humidity_from_raw(raw: u16) -> RelativeHumidity {
    RelativeHumidity::from_percent(f32::from(raw) / 65536.0 * 100.0)
}

/// Temp&Hum 3 Click
pub struct TempHum3<I, D> {
    bus: I2cBus<I>,
    delay: D,
    config: TempHum3Config,
}

impl<I: I2c, D: DelayNs> TempHum3<I, D> {
    /// Wrap the bus; call [`init`](Self::init) before measuring
    #[must_use]
    pub fn new(i2c: I, delay: D, config: TempHum3Config) -> Self {
        Self {
            bus: I2cBus::new(i2c, config.address),
            delay,
            config,
        }
    }

    /// Check the manufacturer ID and apply the configuration
    pub async fn init(&mut self) -> Result<(), I::Error> {
        let manufacturer = self.manufacturer_id().await?;
        if manufacturer != MANUFACTURER_ID {
            warn!("temphum3: unexpected manufacturer id {}", manufacturer);
            return Err(Error::NotDetected);
        }
        self.configure(self.config.register()).await?;
        info!("temphum3 ready at {}", self.config.address.addr());
        Ok(())
    }

    /// Soft reset, then restore the configuration
    pub async fn reset(&mut self) -> Result<(), I::Error> {
        self.configure(cfg::RESET).await?;
        self.delay.delay_ms(TEMPHUM3_CONVERSION_MS).await;
        self.configure(self.config.register()).await
    }

    /// Turn the heater on or off
    pub async fn set_heater(&mut self, on: bool) -> Result<(), I::Error> {
        self.config.heater = on;
        self.configure(self.config.register()).await
    }

    /// Manufacturer ID register
    pub async fn manufacturer_id(&mut self) -> Result<u16, I::Error> {
        self.bus
            .read_reg_u16_be(reg::MANUFACTURER_ID)
            .await
            .map_err(Error::Bus)
    }

    /// Device ID register
    pub async fn device_id(&mut self) -> Result<u16, I::Error> {
        self.bus
            .read_reg_u16_be(reg::DEVICE_ID)
            .await
            .map_err(Error::Bus)
    }

    /// True when the supply dropped below 2.8 V
    pub async fn battery_low(&mut self) -> Result<bool, I::Error> {
        let value = self
            .bus
            .read_reg_u16_be(reg::CONFIGURATION)
            .await
            .map_err(Error::Bus)?;
        Ok(value & cfg::BATTERY_LOW != 0)
    }

    /// Measure temperature and humidity together
    pub async fn read_both(&mut self) -> Result<(Celsius, RelativeHumidity), I::Error> {
        self.bus
            .write(&[reg::TEMPERATURE])
            .await
            .map_err(Error::Bus)?;
        self.delay.delay_ms(TEMPHUM3_CONVERSION_MS).await;

        let mut buf = [0u8; 4];
        self.bus.read(&mut buf).await.map_err(Error::Bus)?;

        let temperature = temperature_from_raw(u16::from_be_bytes([buf[0], buf[1]]));
        let humidity = humidity_from_raw(u16::from_be_bytes([buf[2], buf[3]]));
        trace!(
            "temphum3 {} C {} %RH",
            temperature.value(),
            humidity.percent()
        );
        Ok((temperature, humidity))
    }

    /// Measure temperature
    pub async fn read_temperature(&mut self) -> Result<Celsius, I::Error> {
        Ok(self.read_both().await?.0)
    }

    /// Measure relative humidity
    pub async fn read_humidity(&mut self) -> Result<RelativeHumidity, I::Error> {
        Ok(self.read_both().await?.1)
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.bus.release(), self.delay)
    }

    async fn configure(&mut self, value: u16) -> Result<(), I::Error> {
        self.bus
            .write_reg_u16_be(reg::CONFIGURATION, value)
            .await
            .map_err(Error::Bus)
    }
}
