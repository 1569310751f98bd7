//! Mock HAL shared by the integration tests
//!
//! Every mock is a cheap handle around shared state: clone it, move one
//! copy into the driver and inspect the other afterwards.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use click_drivers::hal::adc::{AdcResolution, AnalogIn};
use click_drivers::hal::pwm::PwmFrequency;

// ============================================================================
// GPIO
// ============================================================================

#[derive(Default)]
struct PinState {
    level: bool,
    history: Vec<bool>,
    script: VecDeque<bool>,
}

/// Input/output pin; inputs replay a script before falling back to the
/// current level
#[derive(Clone, Default)]
pub struct MockPin(Rc<RefCell<PinState>>);

impl MockPin {
    pub fn new(level: bool) -> Self {
        let pin = Self::default();
        pin.0.borrow_mut().level = level;
        pin
    }

    pub fn is_set_high(&self) -> bool {
        self.0.borrow().level
    }

    pub fn set_level(&self, level: bool) {
        self.0.borrow_mut().level = level;
    }

    /// Levels driven so far
    pub fn history(&self) -> Vec<bool> {
        self.0.borrow().history.clone()
    }

    /// Queue levels returned by the next reads
    pub fn script(&self, levels: &[bool]) {
        self.0.borrow_mut().script.extend(levels.iter().copied());
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.level = false;
        state.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.level = true;
        state.history.push(true);
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.0.borrow_mut();
        Ok(state.script.pop_front().unwrap_or(state.level))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ============================================================================
// PWM
// ============================================================================

struct PwmState {
    max: u16,
    duty: u16,
    frequency: u32,
    history: Vec<u16>,
}

/// PWM channel recording duty and frequency
#[derive(Clone)]
pub struct MockPwm(Rc<RefCell<PwmState>>);

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self(Rc::new(RefCell::new(PwmState {
            max,
            duty: max,
            frequency: 0,
            history: Vec::new(),
        })))
    }

    pub fn duty(&self) -> u16 {
        self.0.borrow().duty
    }

    pub fn frequency(&self) -> u32 {
        self.0.borrow().frequency
    }

    pub fn history(&self) -> Vec<u16> {
        self.0.borrow().history.clone()
    }
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.0.borrow().max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.duty = duty;
        state.history.push(duty);
        Ok(())
    }
}

impl PwmFrequency for MockPwm {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        self.0.borrow_mut().frequency = hz;
        Ok(())
    }
}

// ============================================================================
// ADC
// ============================================================================

struct AdcState {
    value: u16,
    script: VecDeque<u16>,
    reads: usize,
}

/// ADC channel returning a fixed value after any scripted samples
#[derive(Clone)]
pub struct MockAdc(Rc<RefCell<AdcState>>);

impl MockAdc {
    pub fn new(value: u16) -> Self {
        Self(Rc::new(RefCell::new(AdcState {
            value,
            script: VecDeque::new(),
            reads: 0,
        })))
    }

    pub fn set(&self, value: u16) {
        self.0.borrow_mut().value = value;
    }

    pub fn script(&self, samples: &[u16]) {
        self.0.borrow_mut().script.extend(samples.iter().copied());
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }
}

impl AnalogIn for MockAdc {
    type Error = Infallible;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        let mut state = self.0.borrow_mut();
        state.reads += 1;
        Ok(state.script.pop_front().unwrap_or(state.value))
    }

    fn resolution(&self) -> AdcResolution {
        AdcResolution::Bits12
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Delay that only records the requested time
#[derive(Clone, Default)]
pub struct MockDelay(Rc<RefCell<u64>>);

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        *self.0.borrow() / 1_000_000
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        *self.0.borrow_mut() += u64::from(ns);
    }
}

// ============================================================================
// I2C
// ============================================================================

/// Byte order of the mock's 16-bit registers
#[derive(Clone, Copy)]
pub enum WordOrder {
    Little,
    Big,
}

struct I2cState {
    address: u8,
    order: WordOrder,
    regs: [u16; 256],
    pointer: u8,
    writes: Vec<Vec<u8>>,
    fail: bool,
}

/// I2C device with 256 16-bit registers behind an auto-incrementing
/// 8-bit pointer
#[derive(Clone)]
pub struct MockI2c(Rc<RefCell<I2cState>>);

impl MockI2c {
    pub fn new(address: u8, order: WordOrder) -> Self {
        Self(Rc::new(RefCell::new(I2cState {
            address,
            order,
            regs: [0; 256],
            pointer: 0,
            writes: Vec::new(),
            fail: false,
        })))
    }

    pub fn set_reg(&self, reg: u8, value: u16) {
        self.0.borrow_mut().regs[usize::from(reg)] = value;
    }

    pub fn reg(&self, reg: u8) -> u16 {
        self.0.borrow().regs[usize::from(reg)]
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0.borrow().writes.clone()
    }

    pub fn fail(&self, fail: bool) {
        self.0.borrow_mut().fail = fail;
    }
}

impl embedded_hal_async::i2c::ErrorType for MockI2c {
    type Error = embedded_hal::i2c::ErrorKind;
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal_async::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
        use embedded_hal_async::i2c::Operation;

        let mut state = self.0.borrow_mut();
        if state.fail {
            return Err(ErrorKind::Bus);
        }
        if address != state.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    state.writes.push(bytes.to_vec());
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    state.pointer = reg;
                    for pair in data.chunks(2) {
                        let word = match (state.order, pair) {
                            (WordOrder::Little, [lo, hi]) => u16::from_le_bytes([*lo, *hi]),
                            (WordOrder::Big, [hi, lo]) => u16::from_be_bytes([*hi, *lo]),
                            (_, [single]) => u16::from(*single),
                            _ => unreachable!(),
                        };
                        let pointer = usize::from(state.pointer);
                        state.regs[pointer] = word;
                        state.pointer = state.pointer.wrapping_add(1);
                    }
                    if !data.is_empty() {
                        state.pointer = reg;
                    }
                }
                Operation::Read(buffer) => {
                    let mut reg = state.pointer;
                    for pair in buffer.chunks_mut(2) {
                        let word = state.regs[usize::from(reg)];
                        let bytes = match state.order {
                            WordOrder::Little => word.to_le_bytes(),
                            WordOrder::Big => word.to_be_bytes(),
                        };
                        pair.copy_from_slice(&bytes[..pair.len()]);
                        reg = reg.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SPI
// ============================================================================

#[derive(Default)]
struct SpiState {
    transactions: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
}

/// SPI device recording the bytes clocked out per transaction and
/// answering reads from a queue (0xFF when empty)
#[derive(Clone, Default)]
pub struct MockSpi(Rc<RefCell<SpiState>>);

impl MockSpi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, bytes: &[u8]) {
        self.0.borrow_mut().responses.push_back(bytes.to_vec());
    }

    pub fn transactions(&self) -> Vec<Vec<u8>> {
        self.0.borrow().transactions.clone()
    }
}

fn fill_from(response: &mut VecDeque<u8>, buffer: &mut [u8]) {
    for byte in buffer {
        *byte = response.pop_front().unwrap_or(0xFF);
    }
}

impl embedded_hal_async::spi::ErrorType for MockSpi {
    type Error = embedded_hal::spi::ErrorKind;
}

impl embedded_hal_async::spi::SpiDevice for MockSpi {
    async fn transaction(
        &mut self,
        operations: &mut [embedded_hal_async::spi::Operation<'_, u8>],
    ) -> Result<(), Self::Error> {
        use embedded_hal_async::spi::Operation;

        let mut state = self.0.borrow_mut();
        let mut response: VecDeque<u8> = state.responses.pop_front().unwrap_or_default().into();
        let mut sent = Vec::new();

        for op in operations {
            match op {
                Operation::Write(bytes) => sent.extend_from_slice(bytes),
                Operation::Read(buffer) => fill_from(&mut response, buffer),
                Operation::Transfer(read, write) => {
                    sent.extend_from_slice(write);
                    fill_from(&mut response, read);
                }
                Operation::TransferInPlace(buffer) => {
                    sent.extend_from_slice(buffer);
                    fill_from(&mut response, buffer);
                }
                Operation::DelayNs(_) => {}
            }
        }

        state.transactions.push(sent);
        Ok(())
    }
}

// ============================================================================
// UART
// ============================================================================

#[derive(Default)]
struct UartState {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

/// Serial port; reads drain the receive queue and return 0 once empty
#[derive(Clone, Default)]
pub struct MockUart(Rc<RefCell<UartState>>);

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rx(&self, bytes: &[u8]) {
        self.0.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn tx(&self) -> Vec<u8> {
        self.0.borrow().tx.clone()
    }

    pub fn rx_remaining(&self) -> usize {
        self.0.borrow().rx.len()
    }
}

impl embedded_io_async::ErrorType for MockUart {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io_async::Read for MockUart {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut state = self.0.borrow_mut();
        let n = buf.len().min(state.rx.len());
        for slot in &mut buf[..n] {
            *slot = state.rx.pop_front().unwrap_or(0);
        }
        Ok(n)
    }
}

impl embedded_io_async::Write for MockUart {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.borrow_mut().tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
