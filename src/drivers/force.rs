//! Force Click Driver
//!
//! Force-sensing resistor (FSR) in a divider with a fixed resistor,
//! sampled on the AN pin. Pressing harder lowers the FSR resistance and
//! raises the output voltage.
//!
//! Force is estimated from the FSR conductance with the usual two-slope
//! approximation of the FSR 400 series curve:
//!
//! ```text
//! G <= 1000 uS:  F = G / 80          [N]
//! G >  1000 uS:  F = (G - 1000) / 30 [N]
//! ```

use crate::config::ADC_VREF;
use crate::error::Result;
use crate::hal::adc::{AnalogIn, AnalogInput};

/// Conductance where the force curve changes slope, in microsiemens
const KNEE_MICROSIEMENS: f32 = 1000.0;

/// Divider settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceConfig {
    /// ADC reference and divider supply in volts
    pub vref: f32,
    /// Fixed divider resistor in ohms
    pub divider_ohms: f32,
    /// Samples averaged per reading
    pub samples: u16,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            vref: ADC_VREF,
            divider_ohms: 10_000.0,
            samples: 4,
        }
    }
}

/// Estimated force in newtons for an FSR resistance
///
/// A shorted sensor (zero ohms) reads as infinite force.
#[must_use]
pub fn force_from_resistance(ohms: f32) -> f32 {
    if ohms <= 0.0 {
        return f32::INFINITY;
    }
    let microsiemens = 1_000_000.0 / ohms;
    if microsiemens <= KNEE_MICROSIEMENS {
        microsiemens / 80.0
    } else {
        (microsiemens - KNEE_MICROSIEMENS) / 30.0
    }
}

/// Force Click
pub struct Force<A> {
    input: AnalogInput<A>,
    config: ForceConfig,
}

impl<A: AnalogIn> Force<A> {
    /// Wrap the AN channel
    #[must_use]
    pub fn new(adc: A, config: ForceConfig) -> Self {
        Self {
            input: AnalogInput::new(adc, config.vref),
            config,
        }
    }

    /// Averaged raw conversion
    pub fn read_raw(&mut self) -> Result<u16, A::Error> {
        Ok(self.input.read_averaged(self.config.samples)?.raw())
    }

    /// Divider output in volts
    pub fn read_voltage(&mut self) -> Result<f32, A::Error> {
        Ok(self
            .input
            .read_averaged(self.config.samples)?
            .as_voltage(self.config.vref))
    }

    /// FSR resistance in ohms; `None` with no load (open sensor)
    pub fn read_resistance(&mut self) -> Result<Option<f32>, A::Error> {
        let volts = self.read_voltage()?;
        Ok(self.resistance_at(volts))
    }

    /// Force in newtons; `None` with no load
    pub fn read_force(&mut self) -> Result<Option<f32>, A::Error> {
        let force = self.read_resistance()?.map(force_from_resistance);
        if let Some(newtons) = force {
            trace!("force {} N", newtons);
        }
        Ok(force)
    }

    /// FSR resistance for a divider output voltage
    #[must_use]
    pub fn resistance_at(&self, volts: f32) -> Option<f32> {
        if volts <= 0.0 {
            return None;
        }
        let volts = volts.min(self.config.vref);
        Some(self.config.divider_ohms * (self.config.vref - volts) / volts)
    }

    /// Release the channel
    pub fn release(self) -> A {
        self.input.release()
    }
}
