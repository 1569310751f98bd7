//! TouchPad 4 Click Tests
//!
//! Tests for the IQS7211A register driver against a little-endian
//! register mock.

mod common;

use common::{MockDelay, MockI2c, MockPin, WordOrder};

use click_drivers::drivers::touchpad4::{
    reg, ChargeMode, Finger, Gestures, Info, InfoFlags, Touchpad4, Touchpad4Config, NO_FINGER,
    PRODUCT_NUMBER,
};
use click_drivers::error::Error;
use embassy_futures::block_on;

type Pad = Touchpad4<MockI2c, MockPin, MockPin, MockDelay>;

struct Board {
    i2c: MockI2c,
    rdy: MockPin,
    mclr: MockPin,
    delay: MockDelay,
}

fn board() -> (Pad, Board) {
    let board = Board {
        i2c: MockI2c::new(0x56, WordOrder::Little),
        rdy: MockPin::new(false),
        mclr: MockPin::new(true),
        delay: MockDelay::new(),
    };
    board.i2c.set_reg(reg::PRODUCT_NUMBER, PRODUCT_NUMBER);
    let pad = Touchpad4::new(
        board.i2c.clone(),
        board.rdy.clone(),
        board.mclr.clone(),
        board.delay.clone(),
        Touchpad4Config::default(),
    );
    (pad, board)
}

// ============================================================================
// Init / Reset Tests
// ============================================================================

#[test]
fn test_init_acknowledges_reset() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::INFO_FLAGS, InfoFlags::SHOW_RESET.bits());

    block_on(pad.init()).unwrap();

    assert_eq!(board.mclr.history(), vec![false, true]);
    assert_eq!(board.i2c.reg(reg::SYS_CONTROL), 0x0080);
}

#[test]
fn test_init_without_pending_reset() {
    let (mut pad, board) = board();
    block_on(pad.init()).unwrap();
    assert_eq!(board.i2c.reg(reg::SYS_CONTROL), 0);
}

#[test]
fn test_init_wrong_product() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::PRODUCT_NUMBER, 0x1234);
    assert_eq!(block_on(pad.init()), Err(Error::NotDetected));
}

#[test]
fn test_init_times_out_without_ready() {
    let (mut pad, board) = board();
    board.rdy.set_level(true);
    assert_eq!(block_on(pad.init()), Err(Error::Timeout));
    // Two reset pulses plus one poll per millisecond
    assert_eq!(board.delay.total_ms(), 2 * 10 + 100);
}

#[test]
fn test_ready_is_active_low() {
    let (mut pad, board) = board();
    assert!(pad.is_ready().unwrap());
    board.rdy.set_level(true);
    assert!(!pad.is_ready().unwrap());
}

#[test]
fn test_product_and_version() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::MAJOR_VERSION, 1);
    board.i2c.set_reg(reg::MINOR_VERSION, 4);
    assert_eq!(block_on(pad.product_number()).unwrap(), 0x0763);
    assert_eq!(block_on(pad.version()).unwrap(), (1, 4));
}

#[test]
fn test_sw_reset_preserves_other_bits() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::SYS_CONTROL, 0x0003);
    block_on(pad.sw_reset()).unwrap();
    assert_eq!(board.i2c.reg(reg::SYS_CONTROL), 0x0203);
}

// ============================================================================
// Touch Data Tests
// ============================================================================

#[test]
fn test_read_touch_one_finger() {
    let (mut pad, board) = board();
    for (offset, value) in [100, 200, 50, 7, NO_FINGER, NO_FINGER, 0, 0]
        .into_iter()
        .enumerate()
    {
        board.i2c.set_reg(reg::FINGER_1_X + offset as u8, value);
    }

    let touch = block_on(pad.read_touch()).unwrap();
    assert_eq!(
        touch.primary,
        Some(Finger {
            x: 100,
            y: 200,
            strength: 50,
            area: 7
        })
    );
    assert_eq!(touch.secondary, None);
    assert_eq!(touch.count(), 1);
}

#[test]
fn test_read_touch_no_fingers() {
    let (mut pad, board) = board();
    for offset in 0..8u8 {
        board.i2c.set_reg(reg::FINGER_1_X + offset, NO_FINGER);
    }
    let touch = block_on(pad.read_touch()).unwrap();
    assert_eq!(touch.count(), 0);
}

#[test]
fn test_finger_from_words() {
    assert!(Finger::from_words([NO_FINGER, 10, 0, 0]).is_none());
    assert!(Finger::from_words([10, NO_FINGER, 0, 0]).is_none());
    assert!(Finger::from_words([0, 0, 0, 0]).is_some());
}

#[test]
fn test_read_gestures() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::GESTURES, 0x0101);
    board.i2c.set_reg(reg::GESTURE_X, 512);
    board.i2c.set_reg(reg::GESTURE_Y, 256);

    let gestures = block_on(pad.read_gestures()).unwrap();
    assert_eq!(gestures, Gestures::SINGLE_TAP | Gestures::SWIPE_X_POS);
    assert!(!gestures.contains(Gestures::DOUBLE_TAP));
    assert_eq!(block_on(pad.gesture_position()).unwrap(), (512, 256));
}

#[test]
fn test_info_flags_decode() {
    let (mut pad, board) = board();
    board
        .i2c
        .set_reg(reg::INFO_FLAGS, (1 << 10) | (2 << 8) | (1 << 3) | 0x01);

    let info = block_on(pad.info_flags()).unwrap();
    assert_eq!(info.fingers, 2);
    assert_eq!(info.charge_mode, ChargeMode::IdleTouch);
    assert!(info.flags.contains(InfoFlags::MOVEMENT));
    assert!(info.flags.contains(InfoFlags::ATI_ERROR));
    assert!(!info.flags.contains(InfoFlags::SHOW_RESET));
}

#[test]
fn test_info_reserved_charge_mode() {
    assert_eq!(Info::from_raw(0x0007).charge_mode, ChargeMode::Unknown(7));
}

#[test]
fn test_read_relative_signed() {
    let (mut pad, board) = board();
    board.i2c.set_reg(reg::RELATIVE_X, (-5i16) as u16);
    board.i2c.set_reg(reg::RELATIVE_Y, 3);
    assert_eq!(block_on(pad.read_relative()).unwrap(), (-5, 3));
}

#[test]
fn test_bus_error_is_reported() {
    let (mut pad, board) = board();
    board.i2c.fail(true);
    assert!(matches!(block_on(pad.read_touch()), Err(Error::Bus(_))));
}

#[test]
fn test_custom_address() {
    let i2c = MockI2c::new(0x57, WordOrder::Little);
    i2c.set_reg(reg::PRODUCT_NUMBER, PRODUCT_NUMBER);
    let config = Touchpad4Config {
        address: click_drivers::hal::i2c::I2cAddress::new(0x57),
    };
    let mut pad = Touchpad4::new(i2c, MockPin::new(false), MockPin::new(true), MockDelay::new(), config);
    assert_eq!(block_on(pad.product_number()).unwrap(), PRODUCT_NUMBER);
}
