//! Click Driver Demo
//!
//! Entry point for the STM32G474 demo board: a TouchPad 4 Click in
//! mikroBUS socket 1 and a Relay Click in socket 2. A tap on the pad
//! toggles relay 1, a double tap toggles relay 2.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use click_drivers::drivers::relay::{Relay, RelayId, RelayState};
use click_drivers::drivers::touchpad4::{Gestures, Touchpad4, Touchpad4Config};
use click_drivers::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

type Pad = Touchpad4<I2c<'static, Async>, Input<'static>, Output<'static>, Delay>;
type Relays = Relay<Output<'static>, Output<'static>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Click driver demo v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Socket 1: TouchPad 4 on I2C1 (PB8 = SCL, PB9 = SDA), RDY on INT,
    // MCLR on RST
    let i2c = I2c::new(
        p.I2C1,
        p.PB8,
        p.PB9,
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let rdy = Input::new(p.PC1, Pull::Up);
    let mclr = Output::new(p.PC0, Level::High, Speed::Low);
    let pad = Touchpad4::new(i2c, rdy, mclr, Delay, Touchpad4Config::default());

    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    // Socket 2: Relay Click, RL1 on PWM (PA9), RL2 on CS (PB12)
    let rl1 = Output::new(p.PA9, Level::Low, Speed::Low);
    let rl2 = Output::new(p.PB12, Level::Low, Speed::Low);
    let relays = Relay::new(rl1, rl2).unwrap();

    spawner.spawn(touch_task(pad, relays)).unwrap();

    info!("Tasks spawned, entering main loop");

    loop {
        Timer::after(Duration::from_secs(10)).await;
        info!("Main loop tick");
    }
}

/// Touch task - maps gestures onto the relays
#[embassy_executor::task]
async fn touch_task(mut pad: Pad, mut relays: Relays) {
    if let Err(e) = pad.init().await {
        warn!("TouchPad 4 init failed: {}", e);
        return;
    }

    loop {
        if let Err(e) = pad.wait_ready().await {
            warn!("TouchPad 4 not ready: {}", e);
            Timer::after(Duration::from_millis(100)).await;
            continue;
        }

        match pad.read_gestures().await {
            Ok(gestures) => {
                let relay = if gestures.contains(Gestures::DOUBLE_TAP) {
                    Some(RelayId::Two)
                } else if gestures.contains(Gestures::SINGLE_TAP) {
                    Some(RelayId::One)
                } else {
                    None
                };
                if let Some(id) = relay {
                    match relays.toggle(id) {
                        Ok(state) => info!("{} -> {}", id, state == RelayState::On),
                        Err(e) => warn!("relay: {}", e),
                    }
                }
            }
            Err(e) => warn!("TouchPad 4 read failed: {}", e),
        }

        Timer::after(Duration::from_millis(10)).await;
    }
}
