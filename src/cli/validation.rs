//! Value parsers for CLI arguments.
//!
//! Each returns a plain `String` error so clap can print it next to the
//! offending argument.

use std::net::IpAddr;
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;
const MAX_HOSTNAME_LEN: usize = 253;

/// Port must parse as `u16` and be non-zero.
pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            value
        )),
    }
}

/// The file must exist and be readable.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.is_file() {
        return Err(format!("Configuration file does not exist: '{}'", value));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", value, e))
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value.parse().map_err(|_| {
        format!("Rollback steps must be a valid positive number, got: '{}'", value)
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {}",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

/// Accepts IP addresses and plausible hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // Dotted digits that failed to parse are a broken IPv4 address.
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", value));
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(format!("Host address contains invalid characters: '{}'", value));
    }

    Ok(host.to_string())
}
