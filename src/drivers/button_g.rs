//! Button G Click Driver
//!
//! Push button with a green backlight. The switch is read on the INT
//! pin (high while pressed) and the backlight is dimmed through PWM.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{Error, Result};
use crate::hal::gpio::{Debouncer, DigitalIn};
use crate::hal::pwm::{DutyCycle, PwmOutput};

/// Debounced button transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Button went down
    Pressed,
    /// Button came up
    Released,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pressed => defmt::write!(f, "Pressed"),
            Self::Released => defmt::write!(f, "Released"),
        }
    }
}

/// Button G Click
pub struct ButtonG<I, P> {
    button: DigitalIn<I>,
    light: PwmOutput<P>,
    debouncer: Debouncer,
}

impl<I: InputPin, P: SetDutyCycle> ButtonG<I, P> {
    /// Take the INT and PWM pins; the backlight starts off
    pub fn new(int: I, pwm: P) -> Result<Self, Infallible> {
        Ok(Self {
            button: DigitalIn::new(int),
            light: PwmOutput::new(pwm).map_err(Error::Pwm)?,
            debouncer: Debouncer::new(false),
        })
    }

    /// Raw switch state, without debouncing
    pub fn is_pressed(&mut self) -> Result<bool, Infallible> {
        self.button.is_high().map_err(Error::Pin)
    }

    /// Sample the switch and report a debounced transition, if any
    ///
    /// Call at a steady rate; a change is reported once the new level has
    /// been stable for the debounce window.
    pub fn poll(&mut self) -> Result<Option<ButtonEvent>, Infallible> {
        let raw = self.is_pressed()?;
        let event = self.debouncer.update(raw).map(|pressed| {
            if pressed {
                ButtonEvent::Pressed
            } else {
                ButtonEvent::Released
            }
        });
        if event.is_some() {
            trace!("button pressed={}", raw);
        }
        Ok(event)
    }

    /// Debounced switch state
    #[must_use]
    pub const fn pressed(&self) -> bool {
        self.debouncer.state()
    }

    /// Light the backlight at `brightness`
    pub fn set_light(&mut self, brightness: DutyCycle) -> Result<(), Infallible> {
        self.light.set_duty(brightness).map_err(Error::Pwm)?;
        self.light.start().map_err(Error::Pwm)
    }

    /// Turn the backlight off
    pub fn light_off(&mut self) -> Result<(), Infallible> {
        self.light.stop().map_err(Error::Pwm)
    }

    /// Brightness currently driven, zero when off
    #[must_use]
    pub const fn light_level(&self) -> DutyCycle {
        if self.light.is_running() {
            self.light.duty()
        } else {
            DutyCycle::ZERO
        }
    }

    /// Release the pins
    pub fn release(self) -> (I, P) {
        (self.button.release(), self.light.release())
    }
}
