//! DC Motor Click Driver
//!
//! H-bridge for one brushed motor. IN1/IN2 select the bridge state, SLEEP
//! powers the bridge down when low, PWM sets the speed and the fault
//! output (active low) reports over-current or over-temperature.
//!
//! | IN1 | IN2 | Bridge  |
//! |-----|-----|---------|
//! |  0  |  0  | Coast   |
//! |  1  |  0  | Forward |
//! |  0  |  1  | Reverse |
//! |  1  |  1  | Brake   |

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{Error, Result};
use crate::hal::gpio::{DigitalIn, DigitalOut, PinLevel};
use crate::hal::pwm::{DutyCycle, PwmOutput};

/// Bridge state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Outputs floating, motor spins down freely
    #[default]
    Coast,
    /// Current flows OUT1 to OUT2
    Forward,
    /// Current flows OUT2 to OUT1
    Reverse,
    /// Outputs shorted, motor stops quickly
    Brake,
}

impl Direction {
    const fn inputs(self) -> (PinLevel, PinLevel) {
        match self {
            Self::Coast => (PinLevel::Low, PinLevel::Low),
            Self::Forward => (PinLevel::High, PinLevel::Low),
            Self::Reverse => (PinLevel::Low, PinLevel::High),
            Self::Brake => (PinLevel::High, PinLevel::High),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Coast => defmt::write!(f, "Coast"),
            Self::Forward => defmt::write!(f, "Forward"),
            Self::Reverse => defmt::write!(f, "Reverse"),
            Self::Brake => defmt::write!(f, "Brake"),
        }
    }
}

/// DC Motor Click
pub struct DcMotor<O, F, P> {
    in1: DigitalOut<O>,
    in2: DigitalOut<O>,
    sleep: DigitalOut<O>,
    fault: DigitalIn<F>,
    speed: PwmOutput<P>,
    direction: Direction,
}

impl<O, F, P> DcMotor<O, F, P>
where
    O: OutputPin,
    F: InputPin,
    P: SetDutyCycle,
{
    /// Take the bridge pins; the motor starts coasting with the bridge
    /// awake
    pub fn new(in1: O, in2: O, sleep: O, fault: F, pwm: P) -> Result<Self, Infallible> {
        Ok(Self {
            in1: DigitalOut::new(in1, PinLevel::Low).map_err(Error::Pin)?,
            in2: DigitalOut::new(in2, PinLevel::Low).map_err(Error::Pin)?,
            sleep: DigitalOut::new(sleep, PinLevel::High).map_err(Error::Pin)?,
            fault: DigitalIn::new(fault),
            speed: PwmOutput::new(pwm).map_err(Error::Pwm)?,
            direction: Direction::Coast,
        })
    }

    /// Drive forward at `speed`
    pub fn forward(&mut self, speed: DutyCycle) -> Result<(), Infallible> {
        self.drive(Direction::Forward, speed)
    }

    /// Drive in reverse at `speed`
    pub fn reverse(&mut self, speed: DutyCycle) -> Result<(), Infallible> {
        self.drive(Direction::Reverse, speed)
    }

    /// Short the windings
    pub fn brake(&mut self) -> Result<(), Infallible> {
        self.drive(Direction::Brake, DutyCycle::FULL)
    }

    /// Let the motor spin down
    pub fn coast(&mut self) -> Result<(), Infallible> {
        self.select(Direction::Coast)?;
        self.speed.stop().map_err(Error::Pwm)
    }

    /// Change speed without touching the direction
    pub fn set_speed(&mut self, speed: DutyCycle) -> Result<(), Infallible> {
        self.speed.set_duty(speed).map_err(Error::Pwm)
    }

    /// Put the bridge to sleep; the motor coasts
    pub fn sleep(&mut self) -> Result<(), Infallible> {
        self.coast()?;
        self.sleep.set_low().map_err(Error::Pin)
    }

    /// Wake the bridge
    pub fn wake(&mut self) -> Result<(), Infallible> {
        self.sleep.set_high().map_err(Error::Pin)
    }

    /// True while the bridge is powered down
    #[must_use]
    pub const fn is_asleep(&self) -> bool {
        !self.sleep.level().is_high()
    }

    /// Current bridge state
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Configured speed
    #[must_use]
    pub const fn speed(&self) -> DutyCycle {
        self.speed.duty()
    }

    /// True when the driver signals a fault
    pub fn has_fault(&mut self) -> Result<bool, Infallible> {
        self.fault.is_low().map_err(Error::Pin)
    }

    /// Release the pins as (IN1, IN2, SLEEP, FAULT, PWM)
    pub fn release(self) -> (O, O, O, F, P) {
        (
            self.in1.release(),
            self.in2.release(),
            self.sleep.release(),
            self.fault.release(),
            self.speed.release(),
        )
    }

    fn drive(&mut self, direction: Direction, speed: DutyCycle) -> Result<(), Infallible> {
        if self.is_asleep() {
            warn!("dc motor driven while asleep");
        }
        self.select(direction)?;
        self.speed.set_duty(speed).map_err(Error::Pwm)?;
        self.speed.start().map_err(Error::Pwm)
    }

    fn select(&mut self, direction: Direction) -> Result<(), Infallible> {
        let (in1, in2) = direction.inputs();
        // Pass through coast between directions
        if direction != self.direction {
            self.in1.set_low().map_err(Error::Pin)?;
            self.in2.set_low().map_err(Error::Pin)?;
        }
        self.in1.set(in1).map_err(Error::Pin)?;
        self.in2.set(in2).map_err(Error::Pin)?;
        self.direction = direction;
        debug!("dc motor direction {}", direction as u8);
        Ok(())
    }
}
