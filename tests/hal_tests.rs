//! HAL Helper Tests
//!
//! Tests for the PWM, GPIO, ADC and bus helpers every driver builds on.

mod common;

use common::{MockAdc, MockI2c, MockPin, MockPwm, MockSpi, MockUart, WordOrder};

use click_drivers::error::Error;
use click_drivers::hal::adc::{AdcReading, AdcResolution, AnalogInput};
use click_drivers::hal::gpio::{Debouncer, DigitalIn, DigitalOut, PinLevel};
use click_drivers::hal::i2c::{scan, I2cAddress, I2cBus};
use click_drivers::hal::pwm::{DutyCycle, PwmOutput};
use click_drivers::hal::spi::SpiPort;
use click_drivers::hal::uart::UartPort;
use embassy_futures::block_on;

// ============================================================================
// DutyCycle Tests
// ============================================================================

#[test]
fn test_duty_from_percent() {
    assert_eq!(DutyCycle::from_percent(0), DutyCycle::ZERO);
    assert_eq!(DutyCycle::from_percent(100), DutyCycle::FULL);
    assert_eq!(DutyCycle::from_percent(150), DutyCycle::FULL);
    assert_eq!(DutyCycle::from_percent(50).as_percent(), 50);
}

#[test]
fn test_duty_from_fraction_clamps() {
    assert_eq!(DutyCycle::from_fraction(-1.0), DutyCycle::ZERO);
    assert_eq!(DutyCycle::from_fraction(2.0), DutyCycle::FULL);
}

#[test]
fn test_duty_to_channel() {
    assert_eq!(DutyCycle::FULL.to_channel(1000), 1000);
    assert_eq!(DutyCycle::ZERO.to_channel(1000), 0);
    assert_eq!(DutyCycle::HALF.to_channel(1000), 500);
}

#[test]
fn test_duty_scale() {
    let quarter = DutyCycle::HALF.scale(DutyCycle::HALF);
    assert_eq!(quarter.as_percent(), 25);
    assert!(DutyCycle::default().is_off());
}

// ============================================================================
// PwmOutput Tests
// ============================================================================

#[test]
fn test_pwm_output_starts_off() {
    let pwm = MockPwm::new(1000);
    let output = PwmOutput::new(pwm.clone()).unwrap();
    assert_eq!(pwm.duty(), 0);
    assert!(!output.is_running());
}

#[test]
fn test_pwm_output_duty_applies_only_when_running() {
    let pwm = MockPwm::new(1000);
    let mut output = PwmOutput::new(pwm.clone()).unwrap();

    output.set_duty(DutyCycle::from_percent(30)).unwrap();
    assert_eq!(pwm.duty(), 0);

    output.start().unwrap();
    assert_eq!(pwm.duty(), 300);

    output.set_duty(DutyCycle::from_percent(70)).unwrap();
    assert_eq!(pwm.duty(), 700);

    output.stop().unwrap();
    assert_eq!(pwm.duty(), 0);
    assert_eq!(output.duty().as_percent(), 70);

    output.start().unwrap();
    assert_eq!(pwm.duty(), 700);
}

// ============================================================================
// GPIO Tests
// ============================================================================

#[test]
fn test_digital_out_tracks_level() {
    let pin = MockPin::new(true);
    let mut out = DigitalOut::new(pin.clone(), PinLevel::Low).unwrap();
    assert!(!pin.is_set_high());
    assert_eq!(out.level(), PinLevel::Low);

    out.toggle().unwrap();
    assert!(pin.is_set_high());
    assert_eq!(out.level(), PinLevel::High);

    out.set_low().unwrap();
    assert_eq!(pin.history(), vec![false, true, false]);
}

#[test]
fn test_digital_in_levels() {
    let pin = MockPin::new(false);
    let mut input = DigitalIn::new(pin.clone());
    assert_eq!(input.level().unwrap(), PinLevel::Low);
    pin.set_level(true);
    assert!(input.is_high().unwrap());
    assert!(!input.is_low().unwrap());
}

#[test]
fn test_pin_level_conversions() {
    assert_eq!(PinLevel::from(true), PinLevel::High);
    assert_eq!(PinLevel::High.toggle(), PinLevel::Low);
    assert_eq!(PinLevel::default(), PinLevel::Low);
}

#[test]
fn test_debouncer_needs_stable_samples() {
    let mut debouncer = Debouncer::new(false);
    // First differing sample plus three repeats
    assert_eq!(debouncer.update(true), None);
    assert_eq!(debouncer.update(true), None);
    assert_eq!(debouncer.update(true), None);
    assert_eq!(debouncer.update(true), Some(true));
    assert_eq!(debouncer.update(true), None);
    assert!(debouncer.state());
}

#[test]
fn test_debouncer_ignores_bounce() {
    let mut debouncer = Debouncer::default();
    for raw in [true, false, true, false, true, false] {
        assert_eq!(debouncer.update(raw), None);
    }
    assert!(!debouncer.state());
}

// ============================================================================
// ADC Tests
// ============================================================================

#[test]
fn test_adc_reading_conversion() {
    let reading = AdcReading::from_raw(4095, AdcResolution::Bits12);
    assert!((reading.as_voltage(3.3) - 3.3).abs() < 1e-6);
    let clamped = AdcReading::from_raw(5000, AdcResolution::Bits12);
    assert_eq!(clamped.raw(), 4095);
    assert_eq!(AdcResolution::Bits10.max_value(), 1023);
    assert_eq!(AdcResolution::Bits16.bits(), 16);
}

#[test]
fn test_analog_input_average() {
    let adc = MockAdc::new(0);
    adc.script(&[100, 200, 300, 401]);
    let mut input = AnalogInput::new(adc.clone(), 3.3);
    assert_eq!(input.read_averaged(4).unwrap().raw(), 250);
    assert_eq!(adc.reads(), 4);
}

#[test]
fn test_analog_input_zero_samples() {
    let mut input = AnalogInput::new(MockAdc::new(0), 3.3);
    assert_eq!(input.read_averaged(0), Err(Error::InvalidArgument));
}

// ============================================================================
// Bus Tests
// ============================================================================

#[test]
fn test_i2c_address_masks_to_seven_bits() {
    assert_eq!(I2cAddress::new(0xC0).addr(), 0x40);
}

#[test]
fn test_i2c_register_words() {
    let i2c = MockI2c::new(0x40, WordOrder::Big);
    i2c.set_reg(0xFE, 0x5449);
    let mut bus = I2cBus::new(i2c.clone(), I2cAddress::new(0x40));

    assert_eq!(block_on(bus.read_reg_u16_be(0xFE)).unwrap(), 0x5449);
    block_on(bus.write_reg_u16_be(0x02, 0x1000)).unwrap();
    assert_eq!(i2c.reg(0x02), 0x1000);
    assert_eq!(i2c.writes().last().unwrap(), &vec![0x02, 0x10, 0x00]);
}

#[test]
fn test_i2c_little_endian_words() {
    let i2c = MockI2c::new(0x56, WordOrder::Little);
    i2c.set_reg(0x00, 0x0763);
    let mut bus = I2cBus::new(i2c.clone(), I2cAddress::new(0x56));
    assert_eq!(block_on(bus.read_reg_u16_le(0x00)).unwrap(), 0x0763);
    block_on(bus.write_reg_u16_le(0x50, 0x0080)).unwrap();
    assert_eq!(i2c.writes().last().unwrap(), &vec![0x50, 0x80, 0x00]);
}

#[test]
fn test_i2c_write_regs_burst() {
    let i2c = MockI2c::new(0x40, WordOrder::Big);
    let mut bus = I2cBus::new(i2c.clone(), I2cAddress::new(0x40));
    block_on(bus.write_regs(0x10, &[1, 2, 3])).unwrap();
    assert_eq!(i2c.writes(), vec![vec![0x10, 1, 2, 3]]);
}

#[test]
fn test_i2c_write_regs_long_run_split() {
    let i2c = MockI2c::new(0x40, WordOrder::Big);
    let mut bus = I2cBus::new(i2c.clone(), I2cAddress::new(0x40));
    let values: Vec<u8> = (0..20).collect();
    block_on(bus.write_regs(0x20, &values)).unwrap();

    let writes = i2c.writes();
    assert_eq!(writes.len(), 20);
    assert_eq!(writes[0], vec![0x20, 0]);
    assert_eq!(writes[19], vec![0x33, 19]);
}

#[test]
fn test_i2c_wrong_address_fails() {
    let i2c = MockI2c::new(0x40, WordOrder::Big);
    let mut bus = I2cBus::new(i2c, I2cAddress::new(0x41));
    assert!(block_on(bus.read_reg(0x00)).is_err());
}

#[test]
fn test_i2c_scan_finds_device() {
    let mut i2c = MockI2c::new(0x56, WordOrder::Little);
    let found = block_on(scan(&mut i2c));
    assert_eq!(found.as_slice(), &[I2cAddress::new(0x56)]);
}

#[test]
fn test_spi_transfer_word() {
    let spi = MockSpi::new();
    spi.respond(&[0x12, 0x34]);
    let mut port = SpiPort::new(spi.clone());
    assert_eq!(block_on(port.transfer_word(0xABCD)).unwrap(), 0x1234);
    assert_eq!(spi.transactions(), vec![vec![0xAB, 0xCD]]);
}

#[test]
fn test_spi_write_then_read_is_one_transaction() {
    let spi = MockSpi::new();
    spi.respond(&[0x55, 0x66]);
    let mut port = SpiPort::new(spi.clone());
    let mut response = [0u8; 2];
    block_on(port.write_then_read(&[0x0C], &mut response)).unwrap();
    assert_eq!(response, [0x55, 0x66]);
    assert_eq!(spi.transactions(), vec![vec![0x0C]]);
}

#[test]
fn test_uart_send_and_read() {
    let uart = MockUart::new();
    uart.push_rx(b"ab");
    let mut port = UartPort::new(uart.clone());

    block_on(port.send_str("$PMTK000*32\r\n")).unwrap();
    assert_eq!(uart.tx(), b"$PMTK000*32\r\n".to_vec());

    assert_eq!(block_on(port.read_byte()).unwrap(), Some(b'a'));
    assert_eq!(block_on(port.read_byte()).unwrap(), Some(b'b'));
    assert_eq!(block_on(port.read_byte()).unwrap(), None);
}

#[test]
fn test_uart_read_into() {
    let uart = MockUart::new();
    uart.push_rx(b"$GP");
    let mut port = UartPort::new(uart.clone());

    let mut buffer = [0u8; 8];
    assert_eq!(block_on(port.read_into(&mut buffer)).unwrap(), 3);
    assert_eq!(&buffer[..3], b"$GP");
    assert_eq!(uart.rx_remaining(), 0);
}
