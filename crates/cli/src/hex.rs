//! Hex parsing for report bytes and identifiers.

use crate::error::CliError;

fn strip_prefix(token: &str) -> &str {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token)
}

/// Report bytes from `"01 7f 80"`, `"017F80"`, `"0x01,0x7f"` or
/// `"01:7f:80"`. Every token must hold whole bytes.
pub fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, CliError> {
    let mut bytes = Vec::new();
    let tokens = input
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|t| !t.is_empty())
        .map(strip_prefix);

    for token in tokens {
        if token.len() % 2 != 0 {
            return Err(CliError::InvalidHex(format!(
                "'{token}' has an odd number of digits"
            )));
        }
        for pair in token.as_bytes().chunks(2) {
            let digits = std::str::from_utf8(pair)
                .map_err(|_| CliError::InvalidHex(format!("'{token}' is not ASCII")))?;
            let byte = u8::from_str_radix(digits, 16)
                .map_err(|_| CliError::InvalidHex(format!("'{digits}' is not a hex byte")))?;
            bytes.push(byte);
        }
    }

    if bytes.is_empty() {
        return Err(CliError::InvalidHex("no bytes given".into()));
    }
    Ok(bytes)
}

/// clap value parser for vendor/product ids, hex with optional `0x`.
pub fn parse_id(s: &str) -> Result<u16, String> {
    u16::from_str_radix(strip_prefix(s), 16).map_err(|e| format!("'{s}': {e}"))
}

/// clap value parser for a 24-bit Class of Device, hex with optional `0x`.
pub fn parse_cod(s: &str) -> Result<u32, String> {
    let cod = u32::from_str_radix(strip_prefix(s), 16).map_err(|e| format!("'{s}': {e}"))?;
    if cod > 0x00FF_FFFF {
        return Err(format!("'{s}' is wider than 24 bits"));
    }
    Ok(cod)
}
