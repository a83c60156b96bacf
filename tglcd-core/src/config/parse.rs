//! Minimal TOML parser for the `[panel]` section
//!
//! Handles only the subset needed for panel configuration, not TOML in
//! general.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers (anything other than `panel` is skipped)
//! - Comments (# ...)
//!
//! Recognised keys:
//!
//! ```toml
//! [panel]
//! spi_channel = 0          # 0 or 1, anything else means 0
//! spi_cs_pin = "0.16"      # "nc" = not connected
//! spi_frequency = 1000000  # Hz
//! buzz_pin = "1.30!"       # "nc" = buzzer on the adapter
//! contrast = 180
//! ```

use super::panel::{PanelConfig, PinConfig, SpiChannel};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Other,
}

/// Parse TOML configuration into a PanelConfig
///
/// Keys missing from the input keep their defaults; unknown keys are
/// skipped.
pub fn parse_panel_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if section != Section::Panel {
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();
    if header.is_empty() || header.starts_with('[') {
        return Err(ParseError::InvalidSection);
    }

    match header {
        "panel" => Ok(Section::Panel),
        _ => Ok(Section::Other),
    }
}

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

fn apply_value(key: &str, value: &str, config: &mut PanelConfig) -> Result<(), ParseError> {
    match key {
        "spi_channel" => config.spi_channel = SpiChannel::from_number(parse_int(value)?),
        "spi_frequency" => config.spi_frequency = parse_int(value)?,
        "spi_cs_pin" => config.spi_cs_pin = parse_pin(value)?,
        "buzz_pin" => config.buzz_pin = parse_pin(value)?,
        "contrast" => config.contrast = parse_int(value)?,
        _ => {}
    }
    Ok(())
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    parse_string(value)
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidValue)
}

/// Parse a `port.pin` string with an optional `!` for active-low
///
/// Returns `None` for "nc" (not connected).
fn parse_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    let mut s = parse_string(value).trim();
    if s.eq_ignore_ascii_case("nc") {
        return Ok(None);
    }

    let mut inverted = false;
    if let Some(rest) = s.strip_prefix('!') {
        inverted = true;
        s = rest;
    }
    if let Some(rest) = s.strip_suffix('!') {
        inverted = true;
        s = rest;
    }

    let (port, pin) = s.split_once('.').ok_or(ParseError::InvalidPin)?;
    let port: u8 = port.parse().map_err(|_| ParseError::InvalidPin)?;
    let pin: u8 = pin.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(Some(PinConfig {
        port,
        pin,
        inverted,
    }))
}
