//! PWM Helpers
//!
//! Hardware-independent duty cycle type and a start/stop wrapper over
//! [`SetDutyCycle`] channels.

use embedded_hal::pwm::{Error as _, ErrorKind, ErrorType, SetDutyCycle};

/// Result of a PWM helper operation
pub type PwmResult<T> = Result<T, ErrorKind>;

/// PWM duty cycle (0-65535)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DutyCycle(u16);

impl DutyCycle {
    /// 0% duty cycle
    pub const ZERO: Self = Self(0);

    /// 100% duty cycle
    pub const FULL: Self = Self(65535);

    /// 50% duty cycle
    pub const HALF: Self = Self(32768);

    /// Create from 16-bit value
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }

    /// Create from percentage (0-100, larger values clamp)
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        let value = (u32::from(percent.min(100)) * 65535) / 100;
        Self(value as u16)
    }

    /// Create from fraction (0.0-1.0)
    #[must_use]
    pub fn from_fraction(frac: f32) -> Self {
        let clamped = frac.clamp(0.0, 1.0);
        Self((clamped * 65535.0) as u16)
    }

    /// Get raw 16-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get as percentage (rounded)
    #[must_use]
    pub fn as_percent(self) -> u8 {
        ((u32::from(self.0) * 100 + 32767) / 65535) as u8
    }

    /// Get as fraction
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        f32::from(self.0) / 65535.0
    }

    /// Scale by another duty cycle
    #[must_use]
    pub fn scale(self, other: Self) -> Self {
        let product = (u32::from(self.0) * u32::from(other.0)) / 65535;
        Self(product as u16)
    }

    /// Map onto a channel whose full scale is `max`
    #[must_use]
    pub fn to_channel(self, max: u16) -> u16 {
        ((u32::from(self.0) * u32::from(max) + 32767) / 65535) as u16
    }

    /// True when the output is held low
    #[must_use]
    pub const fn is_off(self) -> bool {
        self.0 == 0
    }
}

impl Default for DutyCycle {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DutyCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", self.as_percent());
    }
}

/// PWM channel whose carrier frequency can be changed at runtime
///
/// Needed by tone generators such as the Buzz Click.
pub trait PwmFrequency: ErrorType {
    /// Set the carrier frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> core::result::Result<(), Self::Error>;
}

impl<T: PwmFrequency + ?Sized> PwmFrequency for &mut T {
    fn set_frequency(&mut self, hz: u32) -> core::result::Result<(), Self::Error> {
        T::set_frequency(self, hz)
    }
}

/// PWM output with start/stop semantics
///
/// `stop` drives the channel to 0% but remembers the configured duty so
/// `start` can restore it.
pub struct PwmOutput<P> {
    pwm: P,
    duty: DutyCycle,
    running: bool,
}

impl<P: SetDutyCycle> PwmOutput<P> {
    /// Wrap a channel, forcing it off
    pub fn new(mut pwm: P) -> PwmResult<Self> {
        pwm.set_duty_cycle_fully_off().map_err(|e| e.kind())?;
        Ok(Self {
            pwm,
            duty: DutyCycle::ZERO,
            running: false,
        })
    }

    /// Set the duty cycle; takes effect immediately when running
    pub fn set_duty(&mut self, duty: DutyCycle) -> PwmResult<()> {
        self.duty = duty;
        if self.running {
            self.apply(duty)?;
        }
        Ok(())
    }

    /// Start driving the configured duty cycle
    pub fn start(&mut self) -> PwmResult<()> {
        self.apply(self.duty)?;
        self.running = true;
        Ok(())
    }

    /// Drive the output low, keeping the configured duty cycle
    pub fn stop(&mut self) -> PwmResult<()> {
        self.pwm.set_duty_cycle_fully_off().map_err(|e| e.kind())?;
        self.running = false;
        Ok(())
    }

    /// Configured duty cycle
    #[must_use]
    pub const fn duty(&self) -> DutyCycle {
        self.duty
    }

    /// True between `start` and `stop`
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Access the underlying channel
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    /// Release the channel
    pub fn release(self) -> P {
        self.pwm
    }

    fn apply(&mut self, duty: DutyCycle) -> PwmResult<()> {
        let value = duty.to_channel(self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(value).map_err(|e| e.kind())
    }
}
