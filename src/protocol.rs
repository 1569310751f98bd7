//! Communication Protocols
//!
//! Byte-level formats spoken by the UART Click boards: NMEA 0183 from
//! the GNSS receivers and the CRC-checked packet framing of the FT Click.

pub mod crc;
pub mod frame;
pub mod nmea;
