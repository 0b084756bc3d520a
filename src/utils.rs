use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::entity::NetworkMode;

/// Function selector of ERC-20 `approve(address,uint256)`.
const APPROVE_SELECTOR: &str = "095ea7b3";

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
}

// Parse a user-entered amount, accepting forms like "1", "0.5", ".5", "1." and "1e3"
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut normalized = trimmed.trim_end_matches('.').to_string();
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

pub fn is_positive_amount(input: &str) -> bool {
    parse_amount(input).is_some_and(|amount| amount > Decimal::ZERO)
}

// A finite positive number too large for `Decimal`, e.g. "1e30"
pub fn is_out_of_range_amount(input: &str) -> bool {
    parse_amount(input).is_none()
        && input
            .trim()
            .parse::<f64>()
            .is_ok_and(|amount| amount.is_finite() && amount > 0.0)
}

// Convert a display amount into integer base units, dropping precision beyond `decimals`
pub fn parse_units(amount: &str, decimals: u8) -> Result<String> {
    let value = parse_amount(amount).ok_or_else(|| anyhow!("Invalid amount format"))?;
    if value.is_sign_negative() {
        return Err(anyhow!("Amount must not be negative"));
    }

    let plain = value.normalize().to_string();
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let decimals = decimals as usize;
    let mut fraction: String = fraction.chars().take(decimals).collect();
    while fraction.len() < decimals {
        fraction.push('0');
    }

    let units = format!("{}{}", integer, fraction);
    let units = units.trim_start_matches('0');

    Ok(if units.is_empty() {
        "0".to_string()
    } else {
        units.to_string()
    })
}

// Render integer base units as a display amount, e.g. ("1500000", 6) -> "1.5"
pub fn format_units(raw: &str, decimals: u8) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Invalid base unit amount: '{}'", raw));
    }

    let decimals = decimals as usize;
    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - raw.len() + 1), raw)
    } else {
        raw.to_string()
    };

    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let integer = match integer.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let fraction = match fraction.trim_end_matches('0') {
        "" => "0",
        digits => digits,
    };

    Ok(format!("{}.{}", integer, fraction))
}

// Format with exactly `dp` decimal places, rounding half away from zero
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let plain = value
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .to_string();
    if dp == 0 {
        return plain;
    }

    // Decimal keeps at most 28 significant digits, so the scale can fall short of `dp`
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    format!("{}.{:0<width$}", integer, fraction, width = dp as usize)
}

// Convert a decimal or hex quantity into the 0x-prefixed hex form JSON-RPC expects
pub fn to_hex_quantity(value: &str) -> Result<String> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x") {
        u128::from_str_radix(hex, 16).map_err(|e| anyhow!("Invalid hex quantity: {}", e))?;
        return Ok(value.to_lowercase());
    }

    let quantity = value
        .parse::<u128>()
        .map_err(|e| anyhow!("Invalid quantity '{}': {}", value, e))?;
    Ok(format!("0x{:x}", quantity))
}

pub fn is_evm_address(address: &str) -> bool {
    EVM_ADDRESS.is_match(address)
}

// Build calldata for ERC-20 approve(spender, amount)
pub fn encode_approve_call(spender: &str, amount_raw: &str) -> Result<String> {
    if !is_evm_address(spender) {
        return Err(anyhow!("Invalid spender address: {}", spender));
    }

    let amount = amount_raw
        .parse::<u128>()
        .map_err(|e| anyhow!("Invalid approval amount '{}': {}", amount_raw, e))?;

    Ok(format!(
        "0x{}{:0>64}{:064x}",
        APPROVE_SELECTOR,
        spender[2..].to_lowercase(),
        amount
    ))
}

pub fn explorer_tx_url(host: &str, mode: NetworkMode, reference: &str) -> String {
    let prefix = if mode.is_testnet() { "testnet." } else { "" };
    format!("https://{}{}/tx/{}", prefix, host, reference)
}

// Local time for history rows
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }

    let start = &address[..6];
    let end = &address[address.len() - 4..];

    format!("{}...{}", start, end)
}
