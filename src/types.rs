//! Shared types used across the Click drivers
//!
//! mikroBUS pin roles, socket pin maps and the physical-unit newtypes
//! several sensor drivers report.

use core::fmt;

/// Logical pin roles on a mikroBUS connector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinRole {
    /// Analog input
    An,
    /// Reset
    Rst,
    /// SPI chip select
    Cs,
    /// SPI clock
    Sck,
    /// SPI data in (to the MCU)
    Miso,
    /// SPI data out (from the MCU)
    Mosi,
    /// PWM output
    Pwm,
    /// Interrupt input
    Int,
    /// UART receive (MCU side)
    Rx,
    /// UART transmit (MCU side)
    Tx,
    /// I2C clock
    Scl,
    /// I2C data
    Sda,
}

impl PinRole {
    /// All roles in connector order (left column top to bottom, then right)
    pub const ALL: [Self; 12] = [
        Self::An,
        Self::Rst,
        Self::Cs,
        Self::Sck,
        Self::Miso,
        Self::Mosi,
        Self::Pwm,
        Self::Int,
        Self::Rx,
        Self::Tx,
        Self::Scl,
        Self::Sda,
    ];

    /// Silkscreen label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::An => "AN",
            Self::Rst => "RST",
            Self::Cs => "CS",
            Self::Sck => "SCK",
            Self::Miso => "MISO",
            Self::Mosi => "MOSI",
            Self::Pwm => "PWM",
            Self::Int => "INT",
            Self::Rx => "RX",
            Self::Tx => "TX",
            Self::Scl => "SCL",
            Self::Sda => "SDA",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::An => 0,
            Self::Rst => 1,
            Self::Cs => 2,
            Self::Sck => 3,
            Self::Miso => 4,
            Self::Mosi => 5,
            Self::Pwm => 6,
            Self::Int => 7,
            Self::Rx => 8,
            Self::Tx => 9,
            Self::Scl => 10,
            Self::Sda => 11,
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinRole {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}

/// MCU pin names wired to one mikroBUS socket
///
/// A `None` entry means the role is not routed on this board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MikrobusSocket {
    number: u8,
    pins: [Option<&'static str>; 12],
}

impl MikrobusSocket {
    /// Create a socket with no routed pins
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self {
            number,
            pins: [None; 12],
        }
    }

    /// Route a role to an MCU pin name
    #[must_use]
    pub const fn with(mut self, role: PinRole, pin: &'static str) -> Self {
        self.pins[role.index()] = Some(pin);
        self
    }

    /// Socket number as printed on the board
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// MCU pin routed to `role`
    #[must_use]
    pub const fn pin(&self, role: PinRole) -> Option<&'static str> {
        self.pins[role.index()]
    }

    /// Iterate over the routed roles
    pub fn routed(&self) -> impl Iterator<Item = (PinRole, &'static str)> + '_ {
        PinRole::ALL
            .iter()
            .filter_map(move |&role| self.pin(role).map(|pin| (role, pin)))
    }
}

/// Temperature in degrees Celsius
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Celsius(f32);

impl Celsius {
    /// Wrap a value in degrees Celsius
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Degrees Celsius
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Degrees Fahrenheit
    #[must_use]
    pub fn as_fahrenheit(self) -> f32 {
        self.0 * 9.0 / 5.0 + 32.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Celsius {
    fn format(&self, f: defmt::Formatter) {
        let tenths = (self.0 * 10.0) as i32;
        defmt::write!(f, "{}.{}C", tenths / 10, (tenths % 10).abs());
    }
}

/// Relative humidity in percent, clamped to 0-100
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct RelativeHumidity(f32);

impl RelativeHumidity {
    /// Create from percent, clamping to the physical range
    #[must_use]
    pub fn from_percent(percent: f32) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    /// Humidity in percent
    #[must_use]
    pub const fn percent(self) -> f32 {
        self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RelativeHumidity {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%RH", self.0 as u32);
    }
}
