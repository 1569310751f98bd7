//! FT Click Tests
//!
//! Tests for packet transmission and reception over a scripted UART.

mod common;

use common::{MockDelay, MockPin, MockUart};

use click_drivers::config::{FT_BAUD_RATE, FT_MAX_PAYLOAD};
use click_drivers::drivers::ft::{Ft, FtConfig};
use click_drivers::error::Error;
use click_drivers::protocol::frame::{FrameError, FrameStatus};
use embassy_futures::block_on;

const PACKET_123: [u8; 8] = [0xA5, 0x03, 0x00, 0x01, 0x02, 0x03, 0xEF, 0x9E];
const PACKET_HELLO: [u8; 10] = [0xA5, 0x05, 0x00, b'h', b'e', b'l', b'l', b'o', 0x0B, 0x4B];

fn ft() -> (Ft<MockUart, MockPin, MockDelay>, MockUart, MockPin, MockDelay) {
    let uart = MockUart::new();
    let rst = MockPin::new(false);
    let delay = MockDelay::new();
    let ft = Ft::new(uart.clone(), rst.clone(), delay.clone(), FtConfig::default()).unwrap();
    (ft, uart, rst, delay)
}

#[test]
fn test_defaults() {
    let (ft, _uart, rst, _delay) = ft();
    assert_eq!(ft.config().baud_rate, FT_BAUD_RATE);
    assert!(rst.is_set_high());
    assert_eq!(ft.status(), FrameStatus::Idle);
}

#[test]
fn test_reset() {
    let (mut ft, _uart, rst, delay) = ft();
    block_on(ft.reset()).unwrap();
    assert_eq!(rst.history(), vec![true, false, true]);
    assert_eq!(delay.total_ms(), 100 + 500);
}

#[test]
fn test_send_package() {
    let (mut ft, uart, _rst, _delay) = ft();
    block_on(ft.send_package(&[1, 2, 3])).unwrap();
    assert_eq!(uart.tx(), PACKET_123.to_vec());
}

#[test]
fn test_send_package_rejects_bad_sizes() {
    let (mut ft, uart, _rst, _delay) = ft();
    assert_eq!(
        block_on(ft.send_package(&[])),
        Err(Error::Frame(FrameError::Empty))
    );
    let oversized = vec![0u8; FT_MAX_PAYLOAD + 1];
    assert_eq!(
        block_on(ft.send_package(&oversized)),
        Err(Error::Frame(FrameError::TooLong(FT_MAX_PAYLOAD + 1)))
    );
    assert!(uart.tx().is_empty());
}

#[test]
fn test_send_largest_payload() {
    let (mut ft, uart, _rst, _delay) = ft();
    let payload = vec![0x5A; FT_MAX_PAYLOAD];
    block_on(ft.send_package(&payload)).unwrap();
    let tx = uart.tx();
    assert_eq!(tx.len(), FT_MAX_PAYLOAD + 5);
    assert_eq!(&tx[..3], &[0xA5, 0x00, 0x01]);
}

#[test]
fn test_receive_after_garbage() {
    let (mut ft, uart, _rst, _delay) = ft();
    uart.push_rx(&[0x00, 0x11]);
    uart.push_rx(&PACKET_HELLO);

    let frame = block_on(ft.receive()).unwrap();
    assert_eq!(frame.payload(), b"hello");
    assert_eq!(ft.status(), FrameStatus::Complete);
    assert_eq!(uart.rx_remaining(), 0);
}

#[test]
fn test_poll_is_one_byte_at_a_time() {
    let (mut ft, uart, _rst, _delay) = ft();
    uart.push_rx(&PACKET_123);

    for _ in 0..PACKET_123.len() - 1 {
        assert!(block_on(ft.poll()).unwrap().is_none());
        assert_eq!(ft.status(), FrameStatus::Receiving);
    }
    let frame = block_on(ft.poll()).unwrap().unwrap();
    assert_eq!(frame.payload(), &[1, 2, 3]);
}

#[test]
fn test_receive_crc_error_then_recovers() {
    let (mut ft, uart, _rst, _delay) = ft();
    let mut corrupted = PACKET_123;
    corrupted[7] ^= 0xFF;
    uart.push_rx(&corrupted);
    uart.push_rx(&PACKET_123);

    assert!(matches!(
        block_on(ft.receive()),
        Err(Error::Frame(FrameError::Crc { .. }))
    ));
    assert_eq!(ft.status(), FrameStatus::Error);
    assert_eq!(block_on(ft.receive()).unwrap().payload(), &[1, 2, 3]);
}

#[test]
fn test_receive_on_idle_line_times_out() {
    let (mut ft, _uart, _rst, _delay) = ft();
    assert!(matches!(block_on(ft.receive()), Err(Error::Timeout)));
}

#[test]
fn test_reset_drops_partial_packet() {
    let (mut ft, uart, _rst, _delay) = ft();
    uart.push_rx(&PACKET_HELLO[..4]);
    for _ in 0..4 {
        block_on(ft.poll()).unwrap();
    }
    block_on(ft.reset()).unwrap();
    assert_eq!(ft.status(), FrameStatus::Idle);

    uart.push_rx(&PACKET_123);
    assert_eq!(block_on(ft.receive()).unwrap().payload(), &[1, 2, 3]);
}
