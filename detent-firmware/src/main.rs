//! Detent Encoder Firmware
//!
//! Polls the rotary encoder and push button on the STM32F042K6 display
//! board without interrupts, and drives a small settings menu from the
//! decoded clicks.

#![no_std]
#![no_main]

mod ui;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::Flex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use detent_core::config::{parse_config, ButtonConfig, EncoderConfig, InputConfig};
use detent_core::decoder::{RotaryEncoder, SampleOutcome};
use detent_core::input::{InputEvent, PushButton};
use detent_hal_stm32f0::{EmbassyClock, FlexInput};

use crate::ui::{Menu, MenuChange, Setting};

/// Embedded input configuration (validated by build.rs)
const INPUT_CONFIG: &str = include_str!("../input.toml");

/// Encoder sampling period: 1 kHz
const ENCODER_SAMPLE_US: u64 = 1000;

/// Button polling period
const BUTTON_POLL_MS: u64 = 2;

/// Input events waiting for the UI
static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, 16> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Detent firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let config = match parse_config(INPUT_CONFIG) {
        Ok(config) => {
            info!("Input config loaded: {}", config);
            config
        }
        Err(e) => {
            warn!("Input config invalid ({}), using defaults", e);
            InputConfig::default()
        }
    };

    // Encoder (PA4=A, PA5=B, PA1=Button)
    let enc_a = FlexInput::new(Flex::new(p.PA4), config.encoder.pull);
    let enc_b = FlexInput::new(Flex::new(p.PA5), config.encoder.pull);
    let enc_btn = FlexInput::new(Flex::new(p.PA1), config.button.pull());

    spawner.spawn(encoder_task(enc_a, enc_b, config.encoder)).unwrap();
    spawner.spawn(button_task(enc_btn, config.button)).unwrap();
    spawner.spawn(ui_task()).unwrap();

    info!("All tasks spawned");
}

/// Encoder sampling task
///
/// Owns the decoder. Clicks stay queued in the decoder while the event
/// channel is full and are forwarded once the UI catches up.
#[embassy_executor::task]
async fn encoder_task(a: FlexInput<'static>, b: FlexInput<'static>, config: EncoderConfig) {
    info!("Encoder task started");

    let mut encoder = RotaryEncoder::new(a, b, EmbassyClock, &config);
    let mut ticker = Ticker::every(Duration::from_micros(ENCODER_SAMPLE_US));

    loop {
        ticker.next().await;

        match encoder.sample() {
            SampleOutcome::Step(direction) => trace!("Detent {}", direction),
            SampleOutcome::Bounce => trace!("Bounce rejected"),
            _ => {}
        }

        while !INPUT_EVENTS.is_full() {
            match InputEvent::from_step(encoder.consume_step()) {
                Some(event) => {
                    if INPUT_EVENTS.try_send(event).is_err() {
                        warn!("Input queue full, dropping {}", event);
                    }
                }
                None => break,
            }
        }
    }
}

/// Button polling task
#[embassy_executor::task]
async fn button_task(pin: FlexInput<'static>, config: ButtonConfig) {
    info!("Button task started");

    let mut button = PushButton::new(pin, EmbassyClock, &config);
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));

    loop {
        ticker.next().await;

        if button.poll() {
            debug!("Button: Click");
            if INPUT_EVENTS.try_send(InputEvent::EncoderClick).is_err() {
                warn!("Input queue full, dropping click");
            }
        }
    }
}

/// Menu task - applies input events to the settings
#[embassy_executor::task]
async fn ui_task() {
    info!("UI task started");

    let mut menu = Menu::new([
        Setting {
            label: "Brightness",
            value: 128,
            step: 8,
            min: 0,
            max: 255,
        },
        Setting {
            label: "Current limit",
            value: 20,
            step: 1,
            min: 5,
            max: 40,
        },
        Setting {
            label: "Sleep (s)",
            value: 30,
            step: 5,
            min: 0,
            max: 300,
        },
    ]);

    loop {
        let event = INPUT_EVENTS.receive().await;
        debug!("Input: {}", event);

        match menu.handle(event) {
            MenuChange::None => {}
            MenuChange::Cursor(i) => info!("Menu: {}", menu.label(i)),
            MenuChange::EditStarted(i) => info!("Editing {}", menu.label(i)),
            MenuChange::EditFinished(i) => info!("Done editing {}", menu.label(i)),
            MenuChange::Value(i, value) => info!("{} = {}", menu.label(i), value),
        }
    }
}
