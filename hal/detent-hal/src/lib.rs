//! Detent Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware surface the encoder decoder
//! consumes: digital input pins with a configurable pull, and a monotonic
//! microsecond clock. Chip-specific crates (STM32F0, ...) implement these
//! traits so the decoder in `detent-core` stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (detent-firmware, UI loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  detent-core (decoder, button, config)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  detent-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ detent-hal-     │
//!            │    stm32f0      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::ConfigurableInput`] - Digital inputs
//! - [`clock::MonotonicClock`] - Microsecond timestamps

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use gpio::{ConfigurableInput, HalInput, InputPin, Pull};
