//! Click Board Driver Library
//!
//! `no_std` drivers for MikroElektronika Click boards on a mikroBUS
//! socket. Every driver is generic over the `embedded-hal` 1.0 traits, so
//! the same code runs on any MCU HAL and against host-side mocks.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       DRIVER LAYER                           │
//! │  Relay │ Button G │ Buzz │ DC Motor │ Force │ DIGI POT       │
//! │  Temp&Hum 3 │ TouchPad 4 │ GNSS 7 │ GNSS 28 │ FT             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PROTOCOL LAYER                           │
//! │  NMEA 0183  │  FT packet framing  │  CRC-16                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        HAL LAYER                             │
//! │  ADC  │  PWM  │  GPIO  │  I2C  │  SPI  │  UART               │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 embedded-hal / embedded-io                   │
//! │        (embassy-stm32 on target, mocks on the host)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Owned handles**: a driver owns its bus and pins and gives them
//!   back through `release`
//! - **Async buses**: I2C, SPI, UART and delays go through
//!   `embedded-hal-async`; GPIO, PWM and ADC access is synchronous
//! - **One error type**: every fallible operation returns
//!   [`error::Result`]
//! - **No allocation**: buffers are `heapless` and sized in [`config`]

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

/// System configuration and constants
pub mod config;

/// Shared types used across modules
pub mod types;

/// Driver error type
pub mod error;

/// Hardware Abstraction Layer
///
/// Helpers over the `embedded-hal` traits shared by all drivers.
pub mod hal;

/// Communication Protocols
///
/// NMEA parsing and FT Click packet framing.
pub mod protocol;

/// Click Board Drivers
///
/// One module per supported board.
pub mod drivers;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::types::*;

    pub use crate::hal::gpio::PinLevel;
    pub use crate::hal::i2c::I2cAddress;
    pub use crate::hal::pwm::DutyCycle;

    // Common traits
    pub use crate::hal::adc::AnalogIn;
    pub use crate::hal::pwm::PwmFrequency;
    pub use embedded_hal::digital::{InputPin, OutputPin};
    pub use embedded_hal::pwm::SetDutyCycle;
    pub use embedded_hal_async::delay::DelayNs;
    pub use embedded_hal_async::i2c::I2c;
    pub use embedded_hal_async::spi::SpiDevice;
}
