//! GPIO Helpers
//!
//! Single-pin digital wrappers that remember the driven level, and the
//! sample-count debouncer used by button boards.

use embedded_hal::digital::{Error as _, ErrorKind, InputPin, OutputPin};

use crate::config::BUTTON_DEBOUNCE_SAMPLES;

/// Result of a GPIO helper operation
pub type GpioResult<T> = Result<T, ErrorKind>;

/// Logic level of a pin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PinLevel {
    /// Driven or read low
    #[default]
    Low,
    /// Driven or read high
    High,
}

impl PinLevel {
    /// Opposite level
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    /// True for [`PinLevel::High`]
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "LOW"),
            Self::High => defmt::write!(f, "HIGH"),
        }
    }
}

/// Digital output that tracks its driven level
pub struct DigitalOut<P> {
    pin: P,
    level: PinLevel,
}

impl<P: OutputPin> DigitalOut<P> {
    /// Take ownership of `pin` and drive it to `initial`
    pub fn new(pin: P, initial: PinLevel) -> GpioResult<Self> {
        let mut out = Self {
            pin,
            level: initial,
        };
        out.set(initial)?;
        Ok(out)
    }

    /// Drive the pin to `level`
    pub fn set(&mut self, level: PinLevel) -> GpioResult<()> {
        match level {
            PinLevel::Low => self.pin.set_low(),
            PinLevel::High => self.pin.set_high(),
        }
        .map_err(|e| e.kind())?;
        self.level = level;
        Ok(())
    }

    /// Drive the pin high
    pub fn set_high(&mut self) -> GpioResult<()> {
        self.set(PinLevel::High)
    }

    /// Drive the pin low
    pub fn set_low(&mut self) -> GpioResult<()> {
        self.set(PinLevel::Low)
    }

    /// Invert the driven level
    pub fn toggle(&mut self) -> GpioResult<()> {
        self.set(self.level.toggle())
    }

    /// Level last driven
    #[must_use]
    pub const fn level(&self) -> PinLevel {
        self.level
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

/// Digital input
pub struct DigitalIn<P> {
    pin: P,
}

impl<P: InputPin> DigitalIn<P> {
    /// Take ownership of `pin`
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sample the pin
    pub fn level(&mut self) -> GpioResult<PinLevel> {
        self.pin.is_high().map(PinLevel::from).map_err(|e| e.kind())
    }

    /// True if the pin reads high
    pub fn is_high(&mut self) -> GpioResult<bool> {
        self.pin.is_high().map_err(|e| e.kind())
    }

    /// True if the pin reads low
    pub fn is_low(&mut self) -> GpioResult<bool> {
        self.pin.is_low().map_err(|e| e.kind())
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

/// Sample-count debouncer
///
/// A new state is accepted after [`BUTTON_DEBOUNCE_SAMPLES`] consecutive
/// identical samples.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    state: bool,
    last_raw: bool,
    count: u8,
}

impl Debouncer {
    /// Create a debouncer in the given settled state
    #[must_use]
    pub const fn new(initial: bool) -> Self {
        Self {
            state: initial,
            last_raw: initial,
            count: 0,
        }
    }

    /// Feed one raw sample; returns the new state when it changes
    pub fn update(&mut self, raw: bool) -> Option<bool> {
        if raw == self.last_raw {
            if self.count < BUTTON_DEBOUNCE_SAMPLES {
                self.count += 1;
            }
        } else {
            self.count = 0;
            self.last_raw = raw;
        }

        if self.count >= BUTTON_DEBOUNCE_SAMPLES && raw != self.state {
            self.state = raw;
            return Some(raw);
        }

        None
    }

    /// Settled state
    #[must_use]
    pub const fn state(&self) -> bool {
        self.state
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(false)
    }
}
