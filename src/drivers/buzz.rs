//! Buzz Click Driver
//!
//! Piezo buzzer on the PWM pin. Pitch is the PWM carrier frequency and
//! loudness the duty cycle, loudest at 50%.

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_async::delay::DelayNs;

use crate::config::BUZZ_DEFAULT_VOLUME;
use crate::error::{Error, Result};
use crate::hal::pwm::{DutyCycle, PwmFrequency, PwmOutput};

/// Note frequencies in Hz, equal temperament
pub mod note {
    #![allow(missing_docs)]

    pub const C4: u32 = 262;
    pub const D4: u32 = 294;
    pub const E4: u32 = 330;
    pub const F4: u32 = 349;
    pub const G4: u32 = 392;
    pub const A4: u32 = 440;
    pub const B4: u32 = 494;
    pub const C5: u32 = 523;
    pub const D5: u32 = 587;
    pub const E5: u32 = 659;
    pub const F5: u32 = 698;
    pub const G5: u32 = 784;
    pub const A5: u32 = 880;
    pub const B5: u32 = 988;
    pub const C6: u32 = 1047;
    pub const D6: u32 = 1175;
    pub const E6: u32 = 1319;
    pub const F6: u32 = 1397;
    pub const G6: u32 = 1568;
    pub const A6: u32 = 1760;
    pub const B6: u32 = 1976;
    pub const C7: u32 = 2093;
}

/// One step of a melody
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    /// Pitch in Hz; zero is a rest
    pub frequency_hz: u32,
    /// Length in milliseconds
    pub duration_ms: u32,
}

impl Tone {
    /// Audible tone
    #[must_use]
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Silence
    #[must_use]
    pub const fn rest(duration_ms: u32) -> Self {
        Self::new(0, duration_ms)
    }
}

/// Buzzer settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuzzConfig {
    /// Volume used by [`Buzz::play_melody`], 0-100
    pub volume: u8,
    /// Gap inserted after each melody note in ms
    pub note_gap_ms: u32,
}

impl Default for BuzzConfig {
    fn default() -> Self {
        Self {
            volume: BUZZ_DEFAULT_VOLUME,
            note_gap_ms: 20,
        }
    }
}

/// Buzz Click
pub struct Buzz<P, D> {
    pwm: PwmOutput<P>,
    delay: D,
    config: BuzzConfig,
}

impl<P, D> Buzz<P, D>
where
    P: SetDutyCycle + PwmFrequency,
    D: DelayNs,
{
    /// Take the PWM channel; the buzzer starts silent
    pub fn new(pwm: P, delay: D, config: BuzzConfig) -> Result<Self, Infallible> {
        Ok(Self {
            pwm: PwmOutput::new(pwm).map_err(Error::Pwm)?,
            delay,
            config,
        })
    }

    /// Current settings
    #[must_use]
    pub const fn config(&self) -> &BuzzConfig {
        &self.config
    }

    /// Duty cycle for a volume in percent
    #[must_use]
    pub fn volume_duty(volume: u8) -> DutyCycle {
        DutyCycle::from_percent(volume.min(100)).scale(DutyCycle::HALF)
    }

    /// Start a tone without waiting
    pub fn start_tone(&mut self, frequency_hz: u32, volume: u8) -> Result<(), Infallible> {
        if frequency_hz == 0 {
            return Err(Error::InvalidArgument);
        }
        self.pwm
            .inner_mut()
            .set_frequency(frequency_hz)
            .map_err(Error::pwm)?;
        self.pwm
            .set_duty(Self::volume_duty(volume))
            .map_err(Error::Pwm)?;
        self.pwm.start().map_err(Error::Pwm)
    }

    /// Play one tone for `duration_ms`, then fall silent
    pub async fn play_sound(
        &mut self,
        frequency_hz: u32,
        volume: u8,
        duration_ms: u32,
    ) -> Result<(), Infallible> {
        debug!("buzz {} Hz for {} ms", frequency_hz, duration_ms);
        self.start_tone(frequency_hz, volume)?;
        self.delay.delay_ms(duration_ms).await;
        self.stop()
    }

    /// Play a sequence of tones at the configured volume
    pub async fn play_melody(&mut self, tones: &[Tone]) -> Result<(), Infallible> {
        for tone in tones {
            if tone.frequency_hz == 0 {
                self.stop()?;
                self.delay.delay_ms(tone.duration_ms).await;
            } else {
                self.play_sound(tone.frequency_hz, self.config.volume, tone.duration_ms)
                    .await?;
            }
            if self.config.note_gap_ms > 0 {
                self.delay.delay_ms(self.config.note_gap_ms).await;
            }
        }
        Ok(())
    }

    /// Silence the buzzer
    pub fn stop(&mut self) -> Result<(), Infallible> {
        self.pwm.stop().map_err(Error::Pwm)
    }

    /// True while a tone is sounding
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.pwm.is_running()
    }

    /// Release the channel and delay
    pub fn release(self) -> (P, D) {
        (self.pwm.release(), self.delay)
    }
}
