//! NMEA 0183 Parsing
//!
//! Sentence assembly, checksum validation and typed decoding of the
//! position sentences (GGA, RMC, GLL) emitted by the GNSS Click boards.
//!
//! Field numbering follows the NMEA documents: field 0 is the address
//! (`GNGGA`), field 1 is the first data field.
//!
//! ```text
//! $GNGGA,123519.00,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*77
//!  └ 0 ┘ └── 1 ──┘ └─ 2 ──┘ 3 └── 4 ──┘ 5 6 7  8   9   10 ...    └ checksum
//! ```

use core::str::FromStr;

use heapless::{String, Vec};
#[cfg_attr(test, allow(unused_imports))]
use micromath::F32Ext;
use thiserror::Error;

use crate::config::NMEA_MAX_SENTENCE;

/// Mean Earth radius used for distances
const EARTH_RADIUS_M: f32 = 6_371_000.0;

/// NMEA decoding errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NmeaError {
    /// Not a `$`-prefixed ASCII sentence of plausible length
    #[error("malformed sentence")]
    Malformed,
    /// The `*hh` checksum does not match the sentence body
    #[error("checksum mismatch: expected {expected:02X}, computed {computed:02X}")]
    BadChecksum {
        /// Checksum transmitted in the sentence
        expected: u8,
        /// Checksum computed over the body
        computed: u8,
    },
    /// The sentence is valid but of another type
    #[error("unexpected sentence type")]
    UnexpectedKind,
    /// A required field is empty or absent
    #[error("field {0} is empty")]
    MissingField(usize),
    /// A field could not be decoded
    #[error("field {0} is invalid")]
    InvalidField(usize),
    /// No sentence with the requested header was found in the buffer
    #[error("sentence header not found")]
    HeaderNotFound,
}

#[cfg(feature = "defmt")]
impl defmt::Format for NmeaError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Malformed => defmt::write!(f, "Malformed"),
            Self::BadChecksum { expected, computed } => {
                defmt::write!(f, "BadChecksum({=u8:#x} != {=u8:#x})", expected, computed);
            }
            Self::UnexpectedKind => defmt::write!(f, "UnexpectedKind"),
            Self::MissingField(n) => defmt::write!(f, "MissingField({})", n),
            Self::InvalidField(n) => defmt::write!(f, "InvalidField({})", n),
            Self::HeaderNotFound => defmt::write!(f, "HeaderNotFound"),
        }
    }
}

/// Field indices of a GGA sentence
pub mod gga {
    /// UTC time `hhmmss.ss`
    pub const TIME: usize = 1;
    /// Latitude `ddmm.mmmm`
    pub const LATITUDE: usize = 2;
    /// `N` or `S`
    pub const LATITUDE_SIDE: usize = 3;
    /// Longitude `dddmm.mmmm`
    pub const LONGITUDE: usize = 4;
    /// `E` or `W`
    pub const LONGITUDE_SIDE: usize = 5;
    /// Fix quality indicator
    pub const QUALITY: usize = 6;
    /// Satellites in use
    pub const SATELLITES: usize = 7;
    /// Horizontal dilution of precision
    pub const HDOP: usize = 8;
    /// Altitude above mean sea level
    pub const ALTITUDE: usize = 9;
    /// Altitude unit
    pub const ALTITUDE_UNIT: usize = 10;
    /// Geoid separation
    pub const GEOID_SEPARATION: usize = 11;
}

/// Field indices of an RMC sentence
pub mod rmc {
    /// UTC time `hhmmss.ss`
    pub const TIME: usize = 1;
    /// `A` valid, `V` warning
    pub const STATUS: usize = 2;
    /// Latitude `ddmm.mmmm`
    pub const LATITUDE: usize = 3;
    /// `N` or `S`
    pub const LATITUDE_SIDE: usize = 4;
    /// Longitude `dddmm.mmmm`
    pub const LONGITUDE: usize = 5;
    /// `E` or `W`
    pub const LONGITUDE_SIDE: usize = 6;
    /// Speed over ground in knots
    pub const SPEED: usize = 7;
    /// Course over ground in degrees
    pub const COURSE: usize = 8;
    /// Date `ddmmyy`
    pub const DATE: usize = 9;
}

/// Field indices of a GLL sentence
pub mod gll {
    /// Latitude `ddmm.mmmm`
    pub const LATITUDE: usize = 1;
    /// `N` or `S`
    pub const LATITUDE_SIDE: usize = 2;
    /// Longitude `dddmm.mmmm`
    pub const LONGITUDE: usize = 3;
    /// `E` or `W`
    pub const LONGITUDE_SIDE: usize = 4;
    /// UTC time `hhmmss.ss`
    pub const TIME: usize = 5;
    /// `A` valid, `V` warning
    pub const STATUS: usize = 6;
}

/// XOR checksum of the bytes between `$` and `*`
#[must_use]
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |acc, &b| acc ^ b)
}

/// Sentence formatter, the last three characters of the address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentenceKind {
    /// Fix data
    Gga,
    /// Recommended minimum data
    Rmc,
    /// Geographic position
    Gll,
    /// DOP and active satellites
    Gsa,
    /// Satellites in view
    Gsv,
    /// Course and speed
    Vtg,
    /// Time and date
    Zda,
    /// Text message
    Txt,
    /// Anything else, including proprietary sentences
    Other,
}

impl SentenceKind {
    /// Decode a three-letter formatter
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "GGA" => Self::Gga,
            "RMC" => Self::Rmc,
            "GLL" => Self::Gll,
            "GSA" => Self::Gsa,
            "GSV" => Self::Gsv,
            "VTG" => Self::Vtg,
            "ZDA" => Self::Zda,
            "TXT" => Self::Txt,
            _ => Self::Other,
        }
    }
}

/// One complete NMEA sentence, `$` through checksum, without CR/LF
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    raw: String<NMEA_MAX_SENTENCE>,
}

impl Sentence {
    /// Validate and store a sentence
    ///
    /// Trailing CR/LF is ignored. A `*hh` suffix, when present, must match
    /// the body; sentences without one are accepted unverified.
    pub fn parse(text: &str) -> Result<Self, NmeaError> {
        let text = text.trim_end_matches(['\r', '\n']);

        if !text.starts_with('$') || text.len() < 6 || !text.is_ascii() {
            return Err(NmeaError::Malformed);
        }

        let mut raw = String::new();
        raw.push_str(text).map_err(|()| NmeaError::Malformed)?;
        let sentence = Self { raw };
        sentence.verify_checksum()?;

        Ok(sentence)
    }

    /// Check the `*hh` suffix against the body
    ///
    /// Passes for sentences transmitted without a checksum.
    pub fn verify_checksum(&self) -> Result<(), NmeaError> {
        match self.transmitted_checksum()? {
            Some(expected) => {
                let computed = checksum(self.body().as_bytes());
                if expected == computed {
                    Ok(())
                } else {
                    Err(NmeaError::BadChecksum { expected, computed })
                }
            }
            None => Ok(()),
        }
    }

    /// The full sentence text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Text between `$` and `*`
    #[must_use]
    pub fn body(&self) -> &str {
        let body = &self.raw[1..];
        match body.find('*') {
            Some(star) => &body[..star],
            None => body,
        }
    }

    /// Address field, e.g. `GNGGA`
    #[must_use]
    pub fn address(&self) -> &str {
        self.body().split(',').next().unwrap_or("")
    }

    /// Talker identifier, e.g. `GN`; `P` for proprietary sentences
    #[must_use]
    pub fn talker(&self) -> &str {
        let address = self.address();
        if address.starts_with('P') {
            &address[..1]
        } else {
            address.get(..2).unwrap_or("")
        }
    }

    /// Sentence formatter
    #[must_use]
    pub fn kind(&self) -> SentenceKind {
        let address = self.address();
        if address.starts_with('P') || address.len() < 5 {
            return SentenceKind::Other;
        }
        SentenceKind::from_code(&address[address.len() - 3..])
    }

    /// All fields, starting with the address
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.body().split(',')
    }

    /// Field `index`; `None` past the end of the sentence
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields().nth(index)
    }

    /// Checksum carried by the sentence, if any
    fn transmitted_checksum(&self) -> Result<Option<u8>, NmeaError> {
        let Some(star) = self.raw.find('*') else {
            return Ok(None);
        };
        let hex = &self.raw[star + 1..];
        if hex.len() != 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(NmeaError::Malformed);
        }
        u8::from_str_radix(hex, 16)
            .map(Some)
            .map_err(|_| NmeaError::Malformed)
    }

    fn require(&self, index: usize) -> Result<&str, NmeaError> {
        match self.field(index) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(NmeaError::MissingField(index)),
        }
    }

    fn optional<T: FromStr>(&self, index: usize) -> Result<Option<T>, NmeaError> {
        match self.field(index) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| NmeaError::InvalidField(index)),
        }
    }

    fn expect_kind(&self, kind: SentenceKind) -> Result<(), NmeaError> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(NmeaError::UnexpectedKind)
        }
    }
}

/// Byte-fed sentence assembler
///
/// `$` starts a sentence and discards any partial one; CR or LF ends it.
/// Sentences longer than [`NMEA_MAX_SENTENCE`] are dropped.
pub struct SentenceAssembler {
    buffer: Vec<u8, NMEA_MAX_SENTENCE>,
    active: bool,
}

impl SentenceAssembler {
    /// Create an idle assembler
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            active: false,
        }
    }

    /// Feed one received byte
    ///
    /// Returns a result each time a sentence terminator closes a sentence.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Sentence, NmeaError>> {
        match byte {
            b'$' => {
                self.buffer.clear();
                let _ = self.buffer.push(byte);
                self.active = true;
                None
            }
            b'\r' | b'\n' => {
                if !self.active {
                    return None;
                }
                self.active = false;
                let result = core::str::from_utf8(&self.buffer)
                    .map_err(|_| NmeaError::Malformed)
                    .and_then(Sentence::parse);
                self.buffer.clear();
                Some(result)
            }
            _ if self.active => {
                if self.buffer.push(byte).is_err() {
                    self.reset();
                }
                None
            }
            _ => None,
        }
    }

    /// Drop any partial sentence
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.active = false;
    }

    /// True while a sentence is being collected
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for SentenceAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the sentence starting with `header` in a raw receive buffer and
/// return its field `index` (0 is the header itself)
///
/// The buffer may contain any number of sentences and partial lines.
pub fn find_field<'a>(buffer: &'a [u8], header: &str, index: usize) -> Result<&'a str, NmeaError> {
    let header = header.as_bytes();
    if header.is_empty() {
        return Err(NmeaError::HeaderNotFound);
    }

    let start = buffer
        .windows(header.len())
        .position(|w| w == header)
        .ok_or(NmeaError::HeaderNotFound)?;

    let tail = &buffer[start..];
    let end = tail
        .iter()
        .position(|&b| matches!(b, b'*' | b'\r' | b'\n' | 0))
        .unwrap_or(tail.len());
    let sentence = core::str::from_utf8(&tail[..end]).map_err(|_| NmeaError::Malformed)?;

    match sentence.split(',').nth(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(NmeaError::MissingField(index)),
    }
}

/// UTC time of day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtcTime {
    /// Hours (0-23)
    pub hour: u8,
    /// Minutes (0-59)
    pub minute: u8,
    /// Seconds (0-60, leap second allowed)
    pub second: u8,
    /// Milliseconds
    pub millis: u16,
}

impl UtcTime {
    /// Parse `hhmmss` or `hhmmss.sss`
    pub fn parse(text: &str) -> Option<Self> {
        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (text, ""),
        };
        if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let hour: u8 = whole[0..2].parse().ok()?;
        let minute: u8 = whole[2..4].parse().ok()?;
        let second: u8 = whole[4..6].parse().ok()?;
        if hour > 23 || minute > 59 || second > 60 {
            return None;
        }

        let mut millis = 0u16;
        let mut scale = 100u16;
        for b in frac.bytes().take(3) {
            if !b.is_ascii_digit() {
                return None;
            }
            millis += u16::from(b - b'0') * scale;
            scale /= 10;
        }

        Some(Self {
            hour,
            minute,
            second,
            millis,
        })
    }

    /// Seconds since midnight
    #[must_use]
    pub fn seconds_of_day(self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UtcTime {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u8}:{=u8}:{=u8}.{=u16}",
            self.hour,
            self.minute,
            self.second,
            self.millis
        );
    }
}

/// Calendar date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    /// Day of month (1-31)
    pub day: u8,
    /// Month (1-12)
    pub month: u8,
    /// Full year
    pub year: u16,
}

impl Date {
    /// Parse `ddmmyy`; years are taken as 20yy
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day: u8 = text[0..2].parse().ok()?;
        let month: u8 = text[2..4].parse().ok()?;
        let year: u16 = text[4..6].parse().ok()?;
        if day == 0 || day > 31 || month == 0 || month > 12 {
            return None;
        }
        Some(Self {
            day,
            month,
            year: 2000 + year,
        })
    }
}

/// Hemisphere indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    /// North latitude
    North,
    /// South latitude
    South,
    /// East longitude
    East,
    /// West longitude
    West,
}

impl Hemisphere {
    /// Decode `N`, `S`, `E` or `W`
    #[must_use]
    pub fn from_field(text: &str) -> Option<Self> {
        match text {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    const fn is_latitude(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    const fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Latitude or longitude as transmitted: whole degrees plus minutes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Whole degrees
    pub degrees: u16,
    /// Decimal minutes (0-60)
    pub minutes: f64,
    /// Hemisphere
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Parse `ddmm.mmmm` (latitude) or `dddmm.mmmm` (longitude)
    ///
    /// The hemisphere decides which form is expected.
    pub fn parse(value: &str, hemisphere: Hemisphere) -> Option<Self> {
        if !value.is_ascii() {
            return None;
        }
        let dot = value.find('.').unwrap_or(value.len());
        let degree_digits = if hemisphere.is_latitude() { 2 } else { 3 };
        if dot != degree_digits + 2 {
            return None;
        }

        let degrees: u16 = value[..degree_digits].parse().ok()?;
        let minutes: f64 = value[degree_digits..].parse().ok()?;
        let max_degrees = if hemisphere.is_latitude() { 90 } else { 180 };
        if !(0.0..60.0).contains(&minutes) || degrees > max_degrees {
            return None;
        }
        if degrees == max_degrees && minutes > 0.0 {
            return None;
        }

        Some(Self {
            degrees,
            minutes,
            hemisphere,
        })
    }

    /// Signed decimal degrees (south and west negative)
    #[must_use]
    pub fn to_degrees(self) -> f64 {
        (f64::from(self.degrees) + self.minutes / 60.0) * self.hemisphere.sign()
    }
}

/// Decimal-degree position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Latitude, north positive
    pub latitude: f64,
    /// Longitude, east positive
    pub longitude: f64,
}

impl Position {
    /// Build from transmitted coordinates
    #[must_use]
    pub fn from_coordinates(latitude: Coordinate, longitude: Coordinate) -> Self {
        Self {
            latitude: latitude.to_degrees(),
            longitude: longitude.to_degrees(),
        }
    }

    /// Great-circle distance in metres (haversine)
    #[must_use]
    pub fn distance_m(&self, other: &Self) -> f32 {
        let lat1 = (self.latitude as f32).to_radians();
        let lat2 = (other.latitude as f32).to_radians();
        let dlat = ((other.latitude - self.latitude) as f32).to_radians();
        let dlon = ((other.longitude - self.longitude) as f32).to_radians();

        let a = (dlat / 2.0).sin() * (dlat / 2.0).sin()
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin() * (dlon / 2.0).sin();
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_M * c
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Position {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "({=f32}, {=f32})", self.latitude as f32, self.longitude as f32);
    }
}

/// GGA fix quality indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FixQuality {
    /// No fix
    #[default]
    Invalid,
    /// Autonomous GNSS fix
    Gps,
    /// Differential fix
    Dgps,
    /// PPS fix
    Pps,
    /// RTK fixed
    Rtk,
    /// RTK float
    FloatRtk,
    /// Dead reckoning
    Estimated,
    /// Manual input
    Manual,
    /// Simulator
    Simulation,
}

impl FixQuality {
    /// Decode the GGA quality digit
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        Some(match digit {
            0 => Self::Invalid,
            1 => Self::Gps,
            2 => Self::Dgps,
            3 => Self::Pps,
            4 => Self::Rtk,
            5 => Self::FloatRtk,
            6 => Self::Estimated,
            7 => Self::Manual,
            8 => Self::Simulation,
            _ => return None,
        })
    }

    /// True for any fix that yields a position
    #[must_use]
    pub const fn has_fix(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Decoded GGA sentence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gga {
    /// UTC time of the fix
    pub time: Option<UtcTime>,
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// Fix quality
    pub quality: FixQuality,
    /// Satellites in use
    pub satellites: u8,
    /// Horizontal dilution of precision
    pub hdop: Option<f32>,
    /// Altitude above mean sea level in metres
    pub altitude_m: Option<f32>,
    /// Geoid separation in metres
    pub geoid_separation_m: Option<f32>,
}

impl Gga {
    /// Decode a GGA sentence
    pub fn parse(sentence: &Sentence) -> Result<Self, NmeaError> {
        sentence.expect_kind(SentenceKind::Gga)?;

        let quality_digit: u8 = sentence.optional(gga::QUALITY)?.unwrap_or(0);
        let quality = FixQuality::from_digit(quality_digit).ok_or(NmeaError::InvalidField(gga::QUALITY))?;

        Ok(Self {
            time: parse_time(sentence, gga::TIME)?,
            latitude: parse_coordinate(sentence, gga::LATITUDE, gga::LATITUDE_SIDE)?,
            longitude: parse_coordinate(sentence, gga::LONGITUDE, gga::LONGITUDE_SIDE)?,
            quality,
            satellites: sentence.optional(gga::SATELLITES)?.unwrap_or(0),
            hdop: sentence.optional(gga::HDOP)?,
            altitude_m: sentence.optional(gga::ALTITUDE)?,
            geoid_separation_m: sentence.optional(gga::GEOID_SEPARATION)?,
        })
    }

    /// Position, when the receiver reports a fix
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        if !self.quality.has_fix() {
            return None;
        }
        Some(Position::from_coordinates(self.latitude?, self.longitude?))
    }
}

/// Decoded RMC sentence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rmc {
    /// UTC time of the fix
    pub time: Option<UtcTime>,
    /// Status `A`
    pub valid: bool,
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// Speed over ground in knots
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees true
    pub course_deg: Option<f32>,
    /// UTC date
    pub date: Option<Date>,
}

impl Rmc {
    /// Decode an RMC sentence
    pub fn parse(sentence: &Sentence) -> Result<Self, NmeaError> {
        sentence.expect_kind(SentenceKind::Rmc)?;

        let date = match sentence.field(rmc::DATE) {
            None | Some("") => None,
            Some(text) => Some(Date::parse(text).ok_or(NmeaError::InvalidField(rmc::DATE))?),
        };

        Ok(Self {
            time: parse_time(sentence, rmc::TIME)?,
            valid: parse_status(sentence, rmc::STATUS)?,
            latitude: parse_coordinate(sentence, rmc::LATITUDE, rmc::LATITUDE_SIDE)?,
            longitude: parse_coordinate(sentence, rmc::LONGITUDE, rmc::LONGITUDE_SIDE)?,
            speed_knots: sentence.optional(rmc::SPEED)?,
            course_deg: sentence.optional(rmc::COURSE)?,
            date,
        })
    }

    /// Speed over ground in km/h
    #[must_use]
    pub fn speed_kmh(&self) -> Option<f32> {
        self.speed_knots.map(|knots| knots * 1.852)
    }

    /// Position, when the fix is valid
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        if !self.valid {
            return None;
        }
        Some(Position::from_coordinates(self.latitude?, self.longitude?))
    }
}

/// Decoded GLL sentence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gll {
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// UTC time of the fix
    pub time: Option<UtcTime>,
    /// Status `A`
    pub valid: bool,
}

impl Gll {
    /// Decode a GLL sentence
    pub fn parse(sentence: &Sentence) -> Result<Self, NmeaError> {
        sentence.expect_kind(SentenceKind::Gll)?;

        Ok(Self {
            latitude: parse_coordinate(sentence, gll::LATITUDE, gll::LATITUDE_SIDE)?,
            longitude: parse_coordinate(sentence, gll::LONGITUDE, gll::LONGITUDE_SIDE)?,
            time: parse_time(sentence, gll::TIME)?,
            valid: parse_status(sentence, gll::STATUS)?,
        })
    }
}

fn parse_time(sentence: &Sentence, index: usize) -> Result<Option<UtcTime>, NmeaError> {
    match sentence.field(index) {
        None | Some("") => Ok(None),
        Some(text) => UtcTime::parse(text)
            .map(Some)
            .ok_or(NmeaError::InvalidField(index)),
    }
}

fn parse_status(sentence: &Sentence, index: usize) -> Result<bool, NmeaError> {
    match sentence.require(index)? {
        "A" => Ok(true),
        "V" => Ok(false),
        _ => Err(NmeaError::InvalidField(index)),
    }
}

fn parse_coordinate(
    sentence: &Sentence,
    value_index: usize,
    side_index: usize,
) -> Result<Option<Coordinate>, NmeaError> {
    let value = match sentence.field(value_index) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };
    let side = sentence.require(side_index)?;
    let hemisphere = Hemisphere::from_field(side).ok_or(NmeaError::InvalidField(side_index))?;

    Coordinate::parse(value, hemisphere)
        .map(Some)
        .ok_or(NmeaError::InvalidField(value_index))
}
