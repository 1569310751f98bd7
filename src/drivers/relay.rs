//! Relay Click Driver
//!
//! Two independent relays, RL1 on the PWM pin and RL2 on the CS pin of
//! the mikroBUS socket. A high level energizes the coil.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result};
use crate::hal::gpio::{DigitalOut, PinLevel};

/// Relay selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayId {
    /// RL1, driven by the PWM pin
    One,
    /// RL2, driven by the CS pin
    Two,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RelayId {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::One => defmt::write!(f, "RL1"),
            Self::Two => defmt::write!(f, "RL2"),
        }
    }
}

/// Contact state of one relay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RelayState {
    /// Coil released
    #[default]
    Off,
    /// Coil energized
    On,
}

impl RelayState {
    const fn level(self) -> PinLevel {
        match self {
            Self::Off => PinLevel::Low,
            Self::On => PinLevel::High,
        }
    }

    const fn from_level(level: PinLevel) -> Self {
        match level {
            PinLevel::Low => Self::Off,
            PinLevel::High => Self::On,
        }
    }
}

impl From<bool> for RelayState {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

/// Relay Click
pub struct Relay<P1, P2> {
    rl1: DigitalOut<P1>,
    rl2: DigitalOut<P2>,
}

impl<P1: OutputPin, P2: OutputPin> Relay<P1, P2> {
    /// Take the two coil pins; both relays start released
    pub fn new(rl1: P1, rl2: P2) -> Result<Self, Infallible> {
        let rl1 = DigitalOut::new(rl1, PinLevel::Low).map_err(Error::Pin)?;
        let rl2 = DigitalOut::new(rl2, PinLevel::Low).map_err(Error::Pin)?;
        Ok(Self { rl1, rl2 })
    }

    /// Switch one relay
    pub fn set(&mut self, relay: RelayId, state: RelayState) -> Result<(), Infallible> {
        debug!("relay {} -> {}", relay as u8 + 1, state == RelayState::On);
        match relay {
            RelayId::One => self.rl1.set(state.level()),
            RelayId::Two => self.rl2.set(state.level()),
        }
        .map_err(Error::Pin)
    }

    /// Last state driven onto one relay
    #[must_use]
    pub const fn state(&self, relay: RelayId) -> RelayState {
        match relay {
            RelayId::One => RelayState::from_level(self.rl1.level()),
            RelayId::Two => RelayState::from_level(self.rl2.level()),
        }
    }

    /// Flip one relay
    pub fn toggle(&mut self, relay: RelayId) -> Result<RelayState, Infallible> {
        let next = match self.state(relay) {
            RelayState::Off => RelayState::On,
            RelayState::On => RelayState::Off,
        };
        self.set(relay, next)?;
        Ok(next)
    }

    /// Release both relays
    pub fn all_off(&mut self) -> Result<(), Infallible> {
        self.set(RelayId::One, RelayState::Off)?;
        self.set(RelayId::Two, RelayState::Off)
    }

    /// Release the pins
    pub fn release(self) -> (P1, P2) {
        (self.rl1.release(), self.rl2.release())
    }
}
