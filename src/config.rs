//! Driver defaults and board constants
//!
//! Bus addresses, baud rates, reset timings and buffer sizes used by the
//! drivers' `Config::default()` values, plus the socket pin maps of the
//! demo board. Everything is a compile-time constant.

use crate::types::{MikrobusSocket, PinRole};

/// Default ADC reference voltage
pub const ADC_VREF: f32 = 3.3;

/// Default ADC resolution in bits
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// I2C bus frequency used by the demo board
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// TouchPad 4 Click (IQS7211A) I2C address
pub const TOUCHPAD4_I2C_ADDR: u8 = 0x56;

/// Temp&Hum 3 Click (HDC1000) I2C address with ADR0/ADR1 low
pub const TEMPHUM3_I2C_ADDR: u8 = 0x40;

/// GNSS 7 Click UART baud rate
pub const GNSS7_BAUD_RATE: u32 = 9_600;

/// GNSS 28 Click UART baud rate
pub const GNSS28_BAUD_RATE: u32 = 115_200;

/// FT Click UART baud rate
pub const FT_BAUD_RATE: u32 = 115_200;

/// Longest standard NMEA 0183 sentence including `$` and CR/LF
pub const NMEA_MAX_SENTENCE: usize = 82;

/// Receive buffer size for raw GNSS reads
pub const GNSS_RX_BUFFER_SIZE: usize = 256;

/// Largest FT Click payload
pub const FT_MAX_PAYLOAD: usize = 256;

/// Reset pulse width for GNSS modules in milliseconds
pub const GNSS_RESET_PULSE_MS: u32 = 100;

/// Boot time after a GNSS module reset in milliseconds
pub const GNSS_BOOT_TIME_MS: u32 = 1_000;

/// FT Click reset pulse width in milliseconds
pub const FT_RESET_PULSE_MS: u32 = 100;

/// FT Click boot time after reset in milliseconds
pub const FT_BOOT_TIME_MS: u32 = 500;

/// TouchPad 4 MCLR pulse width in milliseconds
pub const TOUCHPAD4_RESET_PULSE_MS: u32 = 10;

/// HDC1000 conversion time for a 14-bit temperature + humidity pair
pub const TEMPHUM3_CONVERSION_MS: u32 = 15;

/// Default Buzz Click volume in percent
pub const BUZZ_DEFAULT_VOLUME: u8 = 50;

/// Consecutive equal samples required by the button debouncer
pub const BUTTON_DEBOUNCE_SAMPLES: u8 = 3;

/// Demo board socket pin maps
pub mod sockets {
    //! mikroBUS sockets on the STM32G474 demo board

    use super::{MikrobusSocket, PinRole};

    /// mikroBUS socket 1
    pub const MIKROBUS_1: MikrobusSocket = MikrobusSocket::new(1)
        .with(PinRole::An, "PA0")
        .with(PinRole::Rst, "PC0")
        .with(PinRole::Cs, "PA4")
        .with(PinRole::Sck, "PA5")
        .with(PinRole::Miso, "PA6")
        .with(PinRole::Mosi, "PA7")
        .with(PinRole::Pwm, "PA8")
        .with(PinRole::Int, "PC1")
        .with(PinRole::Rx, "PA3")
        .with(PinRole::Tx, "PA2")
        .with(PinRole::Scl, "PB8")
        .with(PinRole::Sda, "PB9");

    /// mikroBUS socket 2
    pub const MIKROBUS_2: MikrobusSocket = MikrobusSocket::new(2)
        .with(PinRole::An, "PA1")
        .with(PinRole::Rst, "PC2")
        .with(PinRole::Cs, "PB12")
        .with(PinRole::Sck, "PB13")
        .with(PinRole::Miso, "PB14")
        .with(PinRole::Mosi, "PB15")
        .with(PinRole::Pwm, "PA9")
        .with(PinRole::Int, "PC3")
        .with(PinRole::Rx, "PC5")
        .with(PinRole::Tx, "PC4")
        .with(PinRole::Scl, "PB8")
        .with(PinRole::Sda, "PB9");
}
