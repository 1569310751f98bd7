//! FT Click Packet Framing
//!
//! Length-prefixed, CRC-checked packets exchanged with the FT Click over
//! UART:
//!
//! ```text
//! ┌──────┬────────┬────────┬──────────────┬────────┬────────┐
//! │ 0xA5 │ len lo │ len hi │ payload[len] │ crc lo │ crc hi │
//! └──────┴────────┴────────┴──────────────┴────────┴────────┘
//! ```
//!
//! The CRC is [`crc16`](super::crc::crc16) over the two length bytes and
//! the payload. Empty payloads are not valid packets.

use heapless::Vec;
use thiserror::Error;

use super::crc::Crc16;

/// First byte of every packet
pub const START_BYTE: u8 = 0xA5;

/// Start byte plus length
pub const HEADER_LEN: usize = 3;

/// Trailing CRC
pub const CRC_LEN: usize = 2;

/// Bytes added around the payload
pub const OVERHEAD: usize = HEADER_LEN + CRC_LEN;

/// Packet encoding and decoding errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Zero-length payload
    #[error("empty payload")]
    Empty,
    /// Payload larger than the receive buffer or the length field
    #[error("payload of {0} bytes is too long")]
    TooLong(usize),
    /// CRC did not match
    #[error("crc mismatch: expected {expected:04X}, computed {computed:04X}")]
    Crc {
        /// CRC carried by the packet
        expected: u16,
        /// CRC computed over the received bytes
        computed: u16,
    },
    /// Output buffer cannot hold the encoded packet
    #[error("output buffer too small")]
    BufferTooSmall,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Empty => defmt::write!(f, "Empty"),
            Self::TooLong(n) => defmt::write!(f, "TooLong({})", n),
            Self::Crc { expected, computed } => {
                defmt::write!(f, "Crc({=u16:#x} != {=u16:#x})", expected, computed);
            }
            Self::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
        }
    }
}

/// Encoded size of a payload
#[must_use]
pub const fn encoded_len(payload_len: usize) -> usize {
    payload_len + OVERHEAD
}

/// Encode `payload` into `out`, returning the packet length
pub fn encode(payload: &[u8], out: &mut [u8]) -> Result<usize, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::Empty);
    }
    let len = u16::try_from(payload.len()).map_err(|_| FrameError::TooLong(payload.len()))?;
    let total = encoded_len(payload.len());
    if out.len() < total {
        return Err(FrameError::BufferTooSmall);
    }

    out[0] = START_BYTE;
    out[1..HEADER_LEN].copy_from_slice(&len.to_le_bytes());
    out[HEADER_LEN..HEADER_LEN + payload.len()].copy_from_slice(payload);

    let mut crc = Crc16::new();
    crc.update(&out[1..HEADER_LEN + payload.len()]);
    out[HEADER_LEN + payload.len()..total].copy_from_slice(&crc.finish().to_le_bytes());

    Ok(total)
}

/// Decoded packet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize> {
    payload: Vec<u8, N>,
}

impl<const N: usize> Frame<N> {
    /// Payload bytes
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Always false for decoded packets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Take the payload buffer
    #[must_use]
    pub fn into_payload(self) -> Vec<u8, N> {
        self.payload
    }
}

/// Receive state, as reported to callers polling for data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrameStatus {
    /// Waiting for a start byte
    #[default]
    Idle,
    /// Inside a packet
    Receiving,
    /// The last byte completed a valid packet
    Complete,
    /// The last byte completed an invalid packet
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    LenLo,
    LenHi,
    Payload,
    CrcLo,
    CrcHi,
}

/// Byte-fed packet decoder with an `N`-byte payload buffer
///
/// Bytes outside a packet are skipped until the next start byte. After
/// an error the decoder returns to hunting for a start byte.
pub struct FrameDecoder<const N: usize> {
    state: State,
    len: usize,
    payload: Vec<u8, N>,
    crc: Crc16,
    crc_lo: u8,
    status: FrameStatus,
}

impl<const N: usize> FrameDecoder<N> {
    /// Create an idle decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Start,
            len: 0,
            payload: Vec::new(),
            crc: Crc16::new(),
            crc_lo: 0,
            status: FrameStatus::Idle,
        }
    }

    /// Feed one received byte
    ///
    /// Returns a result each time a packet ends, valid or not.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Frame<N>, FrameError>> {
        match self.state {
            State::Start => {
                if byte == START_BYTE {
                    self.payload.clear();
                    self.crc = Crc16::new();
                    self.state = State::LenLo;
                    self.status = FrameStatus::Receiving;
                }
                None
            }
            State::LenLo => {
                self.crc.push(byte);
                self.len = usize::from(byte);
                self.state = State::LenHi;
                None
            }
            State::LenHi => {
                self.crc.push(byte);
                self.len |= usize::from(byte) << 8;
                if self.len == 0 {
                    return Some(self.fail(FrameError::Empty));
                }
                if self.len > N {
                    let len = self.len;
                    return Some(self.fail(FrameError::TooLong(len)));
                }
                self.state = State::Payload;
                None
            }
            State::Payload => {
                self.crc.push(byte);
                // Capacity was checked against `len` in LenHi
                let _ = self.payload.push(byte);
                if self.payload.len() == self.len {
                    self.state = State::CrcLo;
                }
                None
            }
            State::CrcLo => {
                self.crc_lo = byte;
                self.state = State::CrcHi;
                None
            }
            State::CrcHi => {
                let expected = u16::from_le_bytes([self.crc_lo, byte]);
                let computed = self.crc.finish();
                if expected != computed {
                    return Some(self.fail(FrameError::Crc { expected, computed }));
                }
                self.state = State::Start;
                self.status = FrameStatus::Complete;
                Some(Ok(Frame {
                    payload: core::mem::take(&mut self.payload),
                }))
            }
        }
    }

    /// Current receive state
    #[must_use]
    pub const fn status(&self) -> FrameStatus {
        self.status
    }

    /// Abandon any packet in progress
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.payload.clear();
        self.status = FrameStatus::Idle;
    }

    fn fail(&mut self, err: FrameError) -> Result<Frame<N>, FrameError> {
        self.state = State::Start;
        self.payload.clear();
        self.status = FrameStatus::Error;
        Err(err)
    }
}

impl<const N: usize> Default for FrameDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}
