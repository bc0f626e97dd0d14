use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
    uint,
};
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;

use crate::source::ClientError;

pub static ONE_ETHER: U256 = uint!(1_000_000_000_000_000_000_U256);

/// Largest scale whose power of ten still fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

pub fn measure_start(label: &str) -> (String, Instant) {
    (label.to_string(), Instant::now())
}

pub fn measure_end(start: (String, Instant)) -> Duration {
    let elapsed = start.1.elapsed();
    log::debug!("Elapsed: {:.2?} for '{}'", elapsed, start.0);
    elapsed
}

/// Read-only call request, no gas or nonce fields.
pub fn build_call(to: Address, calldata: Bytes) -> TransactionRequest {
    TransactionRequest::default().with_to(to).with_input(calldata)
}

/// Coerces a decimal or `0x`-prefixed hex string into a `U256` without
/// going through any fixed-width or floating point type.
pub fn parse_amount(field: &str, value: &str) -> Result<U256, ClientError> {
    let invalid = || ClientError::InvalidInput {
        field: field.to_string(),
        value: value.to_string(),
    };
    if value.is_empty() || value.starts_with('-') || value.starts_with('+') {
        return Err(invalid());
    }
    U256::from_str(value).map_err(|_| invalid())
}

/// Renders a fixed-point integer with exactly `precision` fractional digits.
/// Digits beyond `precision` are dropped, never rounded.
pub fn format_units_truncated(
    value: U256,
    decimals: u8,
    precision: usize,
) -> Result<String, ClientError> {
    let scale = U256::from(10)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| ClientError::InvalidConfig {
            reason: format!("lp_decimals {} exceeds {}", decimals, MAX_DECIMALS),
        })?;
    let whole = value / scale;
    let fraction = value % scale;

    if precision == 0 {
        return Ok(whole.to_string());
    }

    let decimals = decimals as usize;
    let digits = if precision <= decimals {
        // decimals - precision <= decimals, already known to fit
        let cut = U256::from(10).pow(U256::from(decimals - precision));
        format!("{:0>width$}", (fraction / cut).to_string(), width = precision)
    } else {
        let padded = format!("{:0>width$}", fraction.to_string(), width = decimals);
        format!("{:0<width$}", padded, width = precision)
    };

    Ok(format!("{}.{}", whole, digits))
}
