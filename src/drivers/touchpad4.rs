//! TouchPad 4 Click Driver
//!
//! Azoteq IQS7211A trackpad controller on I2C. Registers use 8-bit
//! addresses and hold 16-bit little-endian words. The controller opens a
//! communication window by pulling RDY low; MCLR is its active-low reset.
//!
//! Memory map used here:
//!
//! | Address     | Contents                                  |
//! |-------------|-------------------------------------------|
//! | 0x00        | Product number (0x0763)                   |
//! | 0x01..=0x02 | Firmware major / minor version            |
//! | 0x0A..=0x0B | Relative X / Y movement (signed)          |
//! | 0x0C..=0x0D | Gesture X / Y position                    |
//! | 0x0E        | Gesture flags                             |
//! | 0x0F        | Info flags                                |
//! | 0x10..=0x13 | Finger 1 X, Y, touch strength, area       |
//! | 0x14..=0x17 | Finger 2 X, Y, touch strength, area       |
//! | 0x50        | System control                            |

use bitflags::bitflags;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::{TOUCHPAD4_I2C_ADDR, TOUCHPAD4_RESET_PULSE_MS};
use crate::error::{Error, Result};
use crate::hal::gpio::DigitalIn;
use crate::hal::i2c::{I2cAddress, I2cBus};

/// IQS7211A register addresses
pub mod reg {
    #![allow(missing_docs)]

    pub const PRODUCT_NUMBER: u8 = 0x00;
    pub const MAJOR_VERSION: u8 = 0x01;
    pub const MINOR_VERSION: u8 = 0x02;
    pub const RELATIVE_X: u8 = 0x0A;
    pub const RELATIVE_Y: u8 = 0x0B;
    pub const GESTURE_X: u8 = 0x0C;
    pub const GESTURE_Y: u8 = 0x0D;
    pub const GESTURES: u8 = 0x0E;
    pub const INFO_FLAGS: u8 = 0x0F;
    pub const FINGER_1_X: u8 = 0x10;
    pub const FINGER_2_X: u8 = 0x14;
    pub const SYS_CONTROL: u8 = 0x50;
}

/// Product number reported by the IQS7211A
pub const PRODUCT_NUMBER: u16 = 0x0763;

/// Coordinate reported for an absent finger
pub const NO_FINGER: u16 = 0xFFFF;

/// System control bits
mod sys {
    pub const ACK_RESET: u16 = 1 << 7;
    pub const SW_RESET: u16 = 1 << 9;
}

/// Polls of RDY during [`Touchpad4::wait_ready`], one per millisecond
const READY_POLLS: u32 = 100;

bitflags! {
    /// Gesture event register
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Gestures: u16 {
        /// Single tap
        const SINGLE_TAP = 1 << 0;
        /// Double tap
        const DOUBLE_TAP = 1 << 1;
        /// Triple tap
        const TRIPLE_TAP = 1 << 2;
        /// Press and hold
        const PRESS_HOLD = 1 << 3;
        /// Palm covering the pad
        const PALM = 1 << 4;
        /// Swipe towards +X
        const SWIPE_X_POS = 1 << 8;
        /// Swipe towards -X
        const SWIPE_X_NEG = 1 << 9;
        /// Swipe towards +Y
        const SWIPE_Y_POS = 1 << 10;
        /// Swipe towards -Y
        const SWIPE_Y_NEG = 1 << 11;
        /// Swipe and hold towards +X
        const SWIPE_HOLD_X_POS = 1 << 12;
        /// Swipe and hold towards -X
        const SWIPE_HOLD_X_NEG = 1 << 13;
        /// Swipe and hold towards +Y
        const SWIPE_HOLD_Y_POS = 1 << 14;
        /// Swipe and hold towards -Y
        const SWIPE_HOLD_Y_NEG = 1 << 15;
    }
}

bitflags! {
    /// Status bits of the info flags register
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InfoFlags: u16 {
        /// Auto-tuning failed
        const ATI_ERROR = 1 << 3;
        /// Auto-tuning was repeated
        const RE_ATI = 1 << 4;
        /// Auto-tuning of the low-power channel failed
        const ALP_ATI_ERROR = 1 << 5;
        /// Low-power channel was re-tuned
        const ALP_RE_ATI = 1 << 6;
        /// A reset occurred and has not been acknowledged
        const SHOW_RESET = 1 << 7;
        /// Finger movement since the last window
        const MOVEMENT = 1 << 10;
        /// More fingers than the controller can track
        const TOO_MANY_FINGERS = 1 << 12;
        /// Low-power channel detected activity
        const ALP_OUTPUT = 1 << 14;
    }
}

/// Power mode reported in the info flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeMode {
    /// Full-rate scanning
    Active,
    /// Touch held, reduced rate
    IdleTouch,
    /// No touch, reduced rate
    Idle,
    /// Low power 1
    LowPower1,
    /// Low power 2
    LowPower2,
    /// Reserved encoding
    Unknown(u8),
}

impl ChargeMode {
    const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Active,
            1 => Self::IdleTouch,
            2 => Self::Idle,
            3 => Self::LowPower1,
            4 => Self::LowPower2,
            other => Self::Unknown(other),
        }
    }
}

/// Decoded info flags register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Info {
    /// Status bits
    pub flags: InfoFlags,
    /// Power mode
    pub charge_mode: ChargeMode,
    /// Fingers on the pad (0-2)
    pub fingers: u8,
}

impl Info {
    /// Decode the raw register
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self {
            flags: InfoFlags::from_bits_truncate(raw),
            charge_mode: ChargeMode::from_bits((raw & 0x07) as u8),
            fingers: ((raw >> 8) & 0x03) as u8,
        }
    }
}

/// One tracked finger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Finger {
    /// Absolute X position
    pub x: u16,
    /// Absolute Y position
    pub y: u16,
    /// Touch strength
    pub strength: u16,
    /// Contact area
    pub area: u16,
}

impl Finger {
    /// Decode four finger registers; `None` for an absent finger
    #[must_use]
    pub fn from_words(words: [u16; 4]) -> Option<Self> {
        if words[0] == NO_FINGER || words[1] == NO_FINGER {
            return None;
        }
        Some(Self {
            x: words[0],
            y: words[1],
            strength: words[2],
            area: words[3],
        })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Finger {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Finger({}, {})", self.x, self.y);
    }
}

/// Both finger slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Touch {
    /// First finger
    pub primary: Option<Finger>,
    /// Second finger
    pub secondary: Option<Finger>,
}

impl Touch {
    /// Number of fingers present
    #[must_use]
    pub fn count(&self) -> u8 {
        u8::from(self.primary.is_some()) + u8::from(self.secondary.is_some())
    }
}

/// Touchpad settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Touchpad4Config {
    /// 7-bit bus address
    pub address: I2cAddress,
}

impl Default for Touchpad4Config {
    fn default() -> Self {
        Self {
            address: I2cAddress::new(TOUCHPAD4_I2C_ADDR),
        }
    }
}

/// TouchPad 4 Click
pub struct Touchpad4<I, R, M, D> {
    bus: I2cBus<I>,
    rdy: DigitalIn<R>,
    mclr: M,
    delay: D,
}

impl<I, R, M, D> Touchpad4<I, R, M, D>
where
    I: I2c,
    R: InputPin,
    M: OutputPin,
    D: DelayNs,
{
    /// Take the bus, RDY (INT) and MCLR (RST) pins
    #[must_use]
    pub fn new(i2c: I, rdy: R, mclr: M, delay: D, config: Touchpad4Config) -> Self {
        Self {
            bus: I2cBus::new(i2c, config.address),
            rdy: DigitalIn::new(rdy),
            mclr,
            delay,
        }
    }

    /// Reset, check the product number and acknowledge the reset
    pub async fn init(&mut self) -> Result<(), I::Error> {
        self.hw_reset().await?;
        self.wait_ready().await?;

        let product = self.product_number().await?;
        if product != PRODUCT_NUMBER {
            warn!("touchpad4: unexpected product number {}", product);
            return Err(Error::NotDetected);
        }

        if self.info_flags().await?.flags.contains(InfoFlags::SHOW_RESET) {
            self.ack_reset().await?;
        }
        info!("touchpad4 ready, product {}", product);
        Ok(())
    }

    /// Pulse MCLR low
    pub async fn hw_reset(&mut self) -> Result<(), I::Error> {
        self.mclr.set_low().map_err(Error::pin)?;
        self.delay.delay_ms(TOUCHPAD4_RESET_PULSE_MS).await;
        self.mclr.set_high().map_err(Error::pin)?;
        self.delay.delay_ms(TOUCHPAD4_RESET_PULSE_MS).await;
        Ok(())
    }

    /// Request a software reset
    pub async fn sw_reset(&mut self) -> Result<(), I::Error> {
        self.update_sys_control(sys::SW_RESET).await
    }

    /// True while the controller holds a communication window open
    pub fn is_ready(&mut self) -> Result<bool, I::Error> {
        self.rdy.is_low().map_err(Error::Pin)
    }

    /// Wait up to 100 ms for a communication window
    pub async fn wait_ready(&mut self) -> Result<(), I::Error> {
        for _ in 0..READY_POLLS {
            if self.is_ready()? {
                return Ok(());
            }
            self.delay.delay_ms(1).await;
        }
        Err(Error::Timeout)
    }

    /// Product number register
    pub async fn product_number(&mut self) -> Result<u16, I::Error> {
        self.read_word(reg::PRODUCT_NUMBER).await
    }

    /// Firmware version as (major, minor)
    pub async fn version(&mut self) -> Result<(u16, u16), I::Error> {
        let mut buf = [0u8; 4];
        self.bus
            .read_regs(reg::MAJOR_VERSION, &mut buf)
            .await
            .map_err(Error::Bus)?;
        Ok((
            u16::from_le_bytes([buf[0], buf[1]]),
            u16::from_le_bytes([buf[2], buf[3]]),
        ))
    }

    /// Info flags register
    pub async fn info_flags(&mut self) -> Result<Info, I::Error> {
        Ok(Info::from_raw(self.read_word(reg::INFO_FLAGS).await?))
    }

    /// Gesture events since the last window
    pub async fn read_gestures(&mut self) -> Result<Gestures, I::Error> {
        let raw = self.read_word(reg::GESTURES).await?;
        Ok(Gestures::from_bits_truncate(raw))
    }

    /// Position where the last gesture happened
    pub async fn gesture_position(&mut self) -> Result<(u16, u16), I::Error> {
        let x = self.read_word(reg::GESTURE_X).await?;
        let y = self.read_word(reg::GESTURE_Y).await?;
        Ok((x, y))
    }

    /// Relative movement since the last window
    pub async fn read_relative(&mut self) -> Result<(i16, i16), I::Error> {
        let mut buf = [0u8; 4];
        self.bus
            .read_regs(reg::RELATIVE_X, &mut buf)
            .await
            .map_err(Error::Bus)?;
        Ok((
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
        ))
    }

    /// Read both finger slots in one transfer
    pub async fn read_touch(&mut self) -> Result<Touch, I::Error> {
        let mut buf = [0u8; 16];
        self.bus
            .read_regs(reg::FINGER_1_X, &mut buf)
            .await
            .map_err(Error::Bus)?;

        let mut words = [0u16; 8];
        for (word, bytes) in words.iter_mut().zip(buf.chunks_exact(2)) {
            *word = u16::from_le_bytes([bytes[0], bytes[1]]);
        }

        let touch = Touch {
            primary: Finger::from_words([words[0], words[1], words[2], words[3]]),
            secondary: Finger::from_words([words[4], words[5], words[6], words[7]]),
        };
        trace!("touchpad4 fingers {}", touch.count());
        Ok(touch)
    }

    /// Clear the reset indication
    pub async fn ack_reset(&mut self) -> Result<(), I::Error> {
        self.update_sys_control(sys::ACK_RESET).await
    }

    /// Release the bus, pins and delay
    pub fn release(self) -> (I, R, M, D) {
        (self.bus.release(), self.rdy.release(), self.mclr, self.delay)
    }

    async fn read_word(&mut self, register: u8) -> Result<u16, I::Error> {
        self.bus.read_reg_u16_le(register).await.map_err(Error::Bus)
    }

    async fn update_sys_control(&mut self, bits: u16) -> Result<(), I::Error> {
        let value = self.read_word(reg::SYS_CONTROL).await?;
        self.bus
            .write_reg_u16_le(reg::SYS_CONTROL, value | bits)
            .await
            .map_err(Error::Bus)
    }
}
