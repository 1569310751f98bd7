//! GNSS Receiver Core
//!
//! Shared by the GNSS 7 and GNSS 28 Clicks: a receiver that streams NMEA
//! 0183 sentences over UART and is reset through the RST pin. The board
//! wrappers add their defaults and extra pins.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, Write};
use heapless::String;

use crate::config::{GNSS_BOOT_TIME_MS, GNSS_RESET_PULSE_MS};
use crate::error::{Error, Result};
use crate::hal::gpio::{DigitalOut, PinLevel};
use crate::hal::uart::UartPort;
use crate::protocol::nmea::{find_field, Gga, Gll, Rmc, Sentence, SentenceAssembler, SentenceKind};

/// Longest field returned by [`Gnss::read_field`]
pub const MAX_FIELD_LEN: usize = 24;

/// Receiver settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GnssConfig {
    /// RST pulse width in ms
    pub reset_pulse_ms: u32,
    /// Wait after reset before the first sentence, in ms
    pub boot_time_ms: u32,
    /// Level that holds the receiver in reset
    pub reset_active: PinLevel,
    /// Sentences examined while searching for one kind before giving up
    pub search_limit: u16,
}

impl Default for GnssConfig {
    fn default() -> Self {
        Self {
            reset_pulse_ms: GNSS_RESET_PULSE_MS,
            boot_time_ms: GNSS_BOOT_TIME_MS,
            reset_active: PinLevel::Low,
            search_limit: 32,
        }
    }
}

/// NMEA receiver on a UART with a reset line
pub struct Gnss<U, R, D> {
    uart: UartPort<U>,
    rst: DigitalOut<R>,
    delay: D,
    assembler: SentenceAssembler,
    config: GnssConfig,
}

impl<U, R, D> Gnss<U, R, D>
where
    U: Read + Write,
    R: OutputPin,
    D: DelayNs,
{
    /// Take the UART and RST pin; the receiver is released from reset
    pub fn new(uart: U, rst: R, delay: D, config: GnssConfig) -> Result<Self, U::Error> {
        let rst = DigitalOut::new(rst, config.reset_active.toggle()).map_err(Error::Pin)?;
        Ok(Self {
            uart: UartPort::new(uart),
            rst,
            delay,
            assembler: SentenceAssembler::new(),
            config,
        })
    }

    /// Current settings
    #[must_use]
    pub const fn config(&self) -> &GnssConfig {
        &self.config
    }

    /// Pulse RST and wait for the receiver to boot
    pub async fn reset(&mut self) -> Result<(), U::Error> {
        self.rst.set(self.config.reset_active).map_err(Error::Pin)?;
        self.delay.delay_ms(self.config.reset_pulse_ms).await;
        self.rst
            .set(self.config.reset_active.toggle())
            .map_err(Error::Pin)?;
        self.delay.delay_ms(self.config.boot_time_ms).await;
        self.assembler.reset();
        info!("gnss receiver reset");
        Ok(())
    }

    /// Send raw bytes to the receiver
    pub async fn generic_write(&mut self, data: &[u8]) -> Result<(), U::Error> {
        self.uart.send(data).await.map_err(Error::Bus)
    }

    /// Read raw bytes from the receiver
    pub async fn generic_read(&mut self, buffer: &mut [u8]) -> Result<usize, U::Error> {
        self.uart.read_into(buffer).await.map_err(Error::Bus)
    }

    /// Next complete sentence
    ///
    /// A sentence that fails validation is returned as
    /// [`Error::Nmea`]; the receiver stays usable. An ended stream is
    /// reported as [`Error::Timeout`].
    pub async fn next_sentence(&mut self) -> Result<Sentence, U::Error> {
        loop {
            let Some(byte) = self.uart.read_byte().await.map_err(Error::Bus)? else {
                return Err(Error::Timeout);
            };
            if let Some(result) = self.assembler.feed(byte) {
                return result.map_err(|err| {
                    debug!("gnss: dropped sentence");
                    Error::Nmea(err)
                });
            }
        }
    }

    /// Next valid sentence of `kind`, skipping others and invalid ones
    pub async fn next_of_kind(&mut self, kind: SentenceKind) -> Result<Sentence, U::Error> {
        for _ in 0..self.config.search_limit {
            match self.next_sentence().await {
                Ok(sentence) if sentence.kind() == kind => return Ok(sentence),
                Ok(_) | Err(Error::Nmea(_)) => {}
                Err(err) => return Err(err),
            }
        }
        warn!("gnss: no sentence of the requested kind");
        Err(Error::Timeout)
    }

    /// Next fix data sentence
    pub async fn read_gga(&mut self) -> Result<Gga, U::Error> {
        let sentence = self.next_of_kind(SentenceKind::Gga).await?;
        Ok(Gga::parse(&sentence)?)
    }

    /// Next recommended minimum sentence
    pub async fn read_rmc(&mut self) -> Result<Rmc, U::Error> {
        let sentence = self.next_of_kind(SentenceKind::Rmc).await?;
        Ok(Rmc::parse(&sentence)?)
    }

    /// Next geographic position sentence
    pub async fn read_gll(&mut self) -> Result<Gll, U::Error> {
        let sentence = self.next_of_kind(SentenceKind::Gll).await?;
        Ok(Gll::parse(&sentence)?)
    }

    /// Field `index` of the next sentence starting with `header`
    ///
    /// `header` includes the `$`, e.g. `"$GNGGA"`; index 0 is the header
    /// itself.
    pub async fn read_field(
        &mut self,
        header: &str,
        index: usize,
    ) -> Result<String<MAX_FIELD_LEN>, U::Error> {
        for _ in 0..self.config.search_limit {
            let sentence = match self.next_sentence().await {
                Ok(sentence) => sentence,
                Err(Error::Nmea(_)) => continue,
                Err(err) => return Err(err),
            };
            if !sentence.as_str().starts_with(header) {
                continue;
            }
            let value = find_field(sentence.as_str().as_bytes(), header, index)?;
            let mut field = String::new();
            field.push_str(value).map_err(|()| Error::InvalidArgument)?;
            return Ok(field);
        }
        Err(Error::Timeout)
    }

    pub(crate) async fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    /// Drop any partially received sentence
    pub fn flush_input(&mut self) {
        self.assembler.reset();
    }

    /// Release the UART, RST pin and delay
    pub fn release(self) -> (U, R, D) {
        (self.uart.release(), self.rst.release(), self.delay)
    }
}
