//! Board-agnostic input logic for rotary-encoder driven firmware
//!
//! This crate contains everything that does not depend on a specific
//! chip:
//!
//! - Quadrature decoder with debounce, idle reset and detent counting
//! - Push button press detection
//! - Input events and step application helpers
//! - Configuration types and the configuration file parser
//!
//! Hardware access goes through the `detent-hal` traits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod input;

pub use config::{ButtonConfig, EncoderConfig, InputConfig};
pub use decoder::{PhasePair, QuadratureDecoder, RotaryEncoder, SampleOutcome};
pub use input::{InputEvent, PushButton};
