//! Hardware Abstraction Layer
//!
//! Thin helpers over the `embedded-hal` traits that every Click driver
//! builds on. Bus helpers are async; pin, PWM and ADC helpers are not.

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod spi;
pub mod uart;
