//! ADC Abstractions
//!
//! `embedded-hal` 1.0 dropped its ADC trait, so analog Click boards read
//! through [`AnalogIn`], a single-channel "give me a raw sample" source.

use core::fmt::Debug;

use crate::error::{Error, Result};

/// Single analog channel
pub trait AnalogIn {
    /// Conversion error
    type Error: Debug;

    /// Take one raw conversion
    fn read_raw(&mut self) -> core::result::Result<u16, Self::Error>;

    /// Resolution of the raw value
    fn resolution(&self) -> AdcResolution {
        AdcResolution::Bits12
    }
}

impl<T: AnalogIn + ?Sized> AnalogIn for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> core::result::Result<u16, Self::Error> {
        T::read_raw(self)
    }

    fn resolution(&self) -> AdcResolution {
        T::resolution(self)
    }
}

/// ADC resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AdcResolution {
    /// 10-bit (0-1023)
    Bits10,
    /// 12-bit (0-4095)
    #[default]
    Bits12,
    /// 14-bit (0-16383)
    Bits14,
    /// 16-bit (0-65535)
    Bits16,
}

impl AdcResolution {
    /// Largest raw value
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Bits10 => 0x03FF,
            Self::Bits12 => 0x0FFF,
            Self::Bits14 => 0x3FFF,
            Self::Bits16 => 0xFFFF,
        }
    }

    /// Number of bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits10 => 10,
            Self::Bits12 => 12,
            Self::Bits14 => 14,
            Self::Bits16 => 16,
        }
    }
}

/// ADC reading result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcReading {
    raw: u16,
    resolution: AdcResolution,
}

impl AdcReading {
    /// Create a reading, clamping `raw` to the resolution's range
    #[must_use]
    pub fn from_raw(raw: u16, resolution: AdcResolution) -> Self {
        Self {
            raw: raw.min(resolution.max_value()),
            resolution,
        }
    }

    /// Raw conversion value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Resolution the value was taken at
    #[must_use]
    pub const fn resolution(self) -> AdcResolution {
        self.resolution
    }

    /// Fraction of full scale (0.0-1.0)
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        f32::from(self.raw) / f32::from(self.resolution.max_value())
    }

    /// Convert to voltage for the given reference
    #[must_use]
    pub fn as_voltage(self, vref: f32) -> f32 {
        self.as_fraction() * vref
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AdcReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({}/{})", self.raw, self.resolution.max_value());
    }
}

/// Analog input bound to a reference voltage
pub struct AnalogInput<A> {
    adc: A,
    vref: f32,
}

impl<A: AnalogIn> AnalogInput<A> {
    /// Wrap an analog channel
    #[must_use]
    pub fn new(adc: A, vref: f32) -> Self {
        Self { adc, vref }
    }

    /// Reference voltage
    #[must_use]
    pub const fn vref(&self) -> f32 {
        self.vref
    }

    /// Take one reading
    pub fn read(&mut self) -> Result<AdcReading, A::Error> {
        let raw = self.adc.read_raw().map_err(Error::Bus)?;
        Ok(AdcReading::from_raw(raw, self.adc.resolution()))
    }

    /// Take one reading and convert it to volts
    pub fn read_voltage(&mut self) -> Result<f32, A::Error> {
        Ok(self.read()?.as_voltage(self.vref))
    }

    /// Average `samples` readings
    pub fn read_averaged(&mut self, samples: u16) -> Result<AdcReading, A::Error> {
        if samples == 0 {
            return Err(Error::InvalidArgument);
        }

        let mut sum = 0u32;
        for _ in 0..samples {
            sum += u32::from(self.adc.read_raw().map_err(Error::Bus)?);
        }
        let mean = (sum + u32::from(samples) / 2) / u32::from(samples);

        Ok(AdcReading::from_raw(mean as u16, self.adc.resolution()))
    }

    /// Release the channel
    pub fn release(self) -> A {
        self.adc
    }
}
