//! Parser for the input configuration file
//!
//! This is a minimal TOML parser that handles only the subset used by
//! `input.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[encoder]` and `[button]` section headers
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...), including trailing comments
//!
//! Keys that are absent keep their default value.

use core::fmt;

use detent_hal::Pull;

use super::input::{ButtonConfig, EncoderConfig, InputConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header, or a key outside any section
    InvalidSection,
    /// Key not recognised for the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidSection => write!(f, "invalid section header"),
            ParseError::UnknownKey => write!(f, "unknown key"),
            ParseError::InvalidValue => write!(f, "invalid value"),
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Encoder,
    Button,
}

/// Parse configuration text into an [`InputConfig`]
pub fn parse_config(input: &str) -> Result<InputConfig, ParseError> {
    let mut config = InputConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;

        match section {
            Section::Root => return Err(ParseError::InvalidSection),
            Section::Encoder => apply_encoder_key(&mut config.encoder, key, value)?,
            Section::Button => apply_button_key(&mut config.button, key, value)?,
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|rest| rest.split('#').next())
        .map(str::trim)
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "encoder" => Ok(Section::Encoder),
        "button" => Ok(Section::Button),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_encoder_key(
    encoder: &mut EncoderConfig,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match key {
        "pull" => encoder.pull = parse_pull(value)?,
        "reversed" => encoder.reversed = parse_bool(value)?,
        "detent_width" => encoder.detent_width = parse_int(value)?,
        "min_edge_interval_us" => encoder.min_edge_interval_us = parse_int(value)?,
        "idle_reset_interval_us" => encoder.idle_reset_interval_us = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_button_key(button: &mut ButtonConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "active_low" => button.active_low = parse_bool(value)?,
        "lockout_ms" => button.lockout_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a key = value pair
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pull selection: "up" or "down"
fn parse_pull(value: &str) -> Result<Pull, ParseError> {
    match parse_string(value)? {
        "up" => Ok(Pull::Up),
        "down" => Ok(Pull::Down),
        _ => Err(ParseError::InvalidValue),
    }
}
