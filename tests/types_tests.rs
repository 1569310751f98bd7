//! Types Module Tests
//!
//! Tests for mikroBUS pin roles, socket maps and unit newtypes.

use click_drivers::types::{Celsius, MikrobusSocket, PinRole, RelativeHumidity};

// =============================================================================
// PinRole Tests
// =============================================================================

#[test]
fn test_pin_role_labels() {
    assert_eq!(PinRole::An.label(), "AN");
    assert_eq!(PinRole::Sda.label(), "SDA");
    assert_eq!(format!("{}", PinRole::Pwm), "PWM");
}

#[test]
fn test_pin_role_all_unique() {
    let all = PinRole::ALL;
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// =============================================================================
// MikrobusSocket Tests
// =============================================================================

#[test]
fn test_socket_empty() {
    let socket = MikrobusSocket::new(3);
    assert_eq!(socket.number(), 3);
    assert_eq!(socket.pin(PinRole::Rst), None);
    assert_eq!(socket.routed().count(), 0);
}

#[test]
fn test_socket_routing() {
    let socket = MikrobusSocket::new(1)
        .with(PinRole::Rst, "PC0")
        .with(PinRole::Int, "PC1");
    assert_eq!(socket.pin(PinRole::Rst), Some("PC0"));
    assert_eq!(
        socket.routed().collect::<Vec<_>>(),
        vec![(PinRole::Rst, "PC0"), (PinRole::Int, "PC1")]
    );
}

#[test]
fn test_socket_reroute_overrides() {
    let socket = MikrobusSocket::new(1)
        .with(PinRole::Cs, "PA4")
        .with(PinRole::Cs, "PB12");
    assert_eq!(socket.pin(PinRole::Cs), Some("PB12"));
}

// =============================================================================
// Unit Newtype Tests
// =============================================================================

#[test]
fn test_celsius_fahrenheit() {
    assert!((Celsius::new(100.0).as_fahrenheit() - 212.0).abs() < 1e-4);
    assert!((Celsius::new(-40.0).as_fahrenheit() + 40.0).abs() < 1e-4);
    assert!(Celsius::new(20.0) < Celsius::new(21.0));
}

#[test]
fn test_humidity_clamps() {
    assert!((RelativeHumidity::from_percent(120.0).percent() - 100.0).abs() < f32::EPSILON);
    assert!(RelativeHumidity::from_percent(-3.0).percent().abs() < f32::EPSILON);
    assert!((RelativeHumidity::from_percent(42.5).percent() - 42.5).abs() < f32::EPSILON);
}
