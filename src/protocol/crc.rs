//! CRC-16/CCITT-FALSE
//!
//! Polynomial 0x1021, initial value 0xFFFF, no reflection, no final XOR.
//! The lookup table is generated at compile time.

/// Generator polynomial
pub const POLY: u16 = 0x1021;

/// Initial register value
pub const INIT: u16 = 0xFFFF;

/// Byte-indexed lookup table
pub static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC of a complete buffer
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut digest = Crc16::new();
    digest.update(data);
    digest.finish()
}

/// Incremental CRC digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc16 {
    value: u16,
}

impl Crc16 {
    /// Start a new digest
    #[must_use]
    pub const fn new() -> Self {
        Self { value: INIT }
    }

    /// Feed one byte
    pub fn push(&mut self, byte: u8) {
        let idx = ((self.value >> 8) as u8 ^ byte) as usize;
        self.value = (self.value << 8) ^ TABLE[idx];
    }

    /// Feed a buffer
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.push(byte);
        }
    }

    /// Current CRC value
    #[must_use]
    pub const fn finish(&self) -> u16 {
        self.value
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}
