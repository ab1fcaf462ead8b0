//! Configuration types
//!
//! Board-agnostic input configuration and the parser for the TOML subset
//! the firmware embeds.

pub mod input;
pub mod parse;

pub use input::*;
pub use parse::{parse_config, ParseError};
