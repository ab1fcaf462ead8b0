//! STM32F0-specific HAL for Detent firmware
//!
//! Implements the `detent-hal` traits on top of embassy-stm32 and the
//! embassy-time driver. Supported chips:
//!
//! - STM32F042K6 / STM32F042F6 (display board MCU)
//!
//! # Features
//!
//! - `stm32f042k6`, `stm32f042f6` - Chip selection
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod clock;
pub mod gpio;

pub use clock::EmbassyClock;
pub use gpio::FlexInput;
