//! Build script for detent-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates input.toml at compile time

use std::fs;
use std::path::Path;

const ENCODER_KEYS: &[&str] = &[
    "pull",
    "reversed",
    "detent_width",
    "min_edge_interval_us",
    "idle_reset_interval_us",
];

const BUTTON_KEYS: &[&str] = &["active_low", "lockout_ms"];

fn main() {
    setup_linker();
    validate_config();
}

/// Linker arguments for the firmware binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate input.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=input.toml");

    let config_path = Path::new("input.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read input.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in input.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_encoder(&config, &mut errors);
    validate_button(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in input.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=input.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [encoder] and [button] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match (name.as_str(), value) {
            ("encoder", toml::Value::Table(_)) | ("button", toml::Value::Table(_)) => {}
            _ => errors.push(format!("Unexpected entry '{}'", name)),
        }
    }
}

fn validate_encoder(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(encoder) = config.get("encoder").and_then(toml::Value::as_table) else {
        return;
    };

    check_known_keys("encoder", encoder, ENCODER_KEYS, errors);

    if let Some(pull) = encoder.get("pull") {
        match pull.as_str() {
            Some("up") | Some("down") => {}
            _ => errors.push("encoder.pull must be \"up\" or \"down\"".to_string()),
        }
    }

    if let Some(reversed) = encoder.get("reversed") {
        if !reversed.is_bool() {
            errors.push("encoder.reversed must be a boolean".to_string());
        }
    }

    if let Some(width) = encoder.get("detent_width") {
        match width.as_integer() {
            Some(w) if (2..=255).contains(&w) => {}
            Some(w) if (0..2).contains(&w) => errors.push(format!(
                "encoder.detent_width {} is below the minimum of 2",
                w
            )),
            _ => errors.push("encoder.detent_width must be an integer 2-255".to_string()),
        }
    }

    let min_edge = check_micros(encoder, "min_edge_interval_us", errors);
    let idle_reset = check_micros(encoder, "idle_reset_interval_us", errors);

    if let (Some(min_edge), Some(idle_reset)) = (min_edge, idle_reset) {
        if min_edge >= idle_reset {
            errors.push(
                "encoder.min_edge_interval_us must be below idle_reset_interval_us".to_string(),
            );
        }
    }
}

fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(button) = config.get("button").and_then(toml::Value::as_table) else {
        return;
    };

    check_known_keys("button", button, BUTTON_KEYS, errors);

    if let Some(active_low) = button.get("active_low") {
        if !active_low.is_bool() {
            errors.push("button.active_low must be a boolean".to_string());
        }
    }

    check_micros(button, "lockout_ms", errors);
}

fn check_known_keys(
    section: &str,
    table: &toml::map::Map<String, toml::Value>,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("Unknown key {}.{}", section, key));
        }
    }
}

/// Check an unsigned 32-bit duration value
fn check_micros(
    table: &toml::map::Map<String, toml::Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let value = table.get(key)?;
    match value.as_integer() {
        Some(v) if (0..=i64::from(u32::MAX)).contains(&v) => Some(v),
        _ => {
            errors.push(format!("{} must be an integer 0-{}", key, u32::MAX));
            None
        }
    }
}
