//! Click Board Drivers
//!
//! One module per Click board. Every driver owns its bus and pin handles,
//! takes a `Config` where the board has settings, and reports failures
//! through [`crate::error::Error`].

pub mod button_g;
pub mod buzz;
pub mod dc_motor;
pub mod digipot;
pub mod force;
pub mod ft;
pub mod gnss;
pub mod gnss28;
pub mod gnss7;
pub mod relay;
pub mod temphum3;
pub mod touchpad4;
