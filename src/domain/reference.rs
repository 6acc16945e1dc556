//! Opt-in structural checks for the optional payment fields.
//!
//! They only run when field checks are requested, and empty optional fields
//! are always accepted.

use crate::domain::payment::EuroAmount;
use crate::error::{EpcError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest amount an EPC069-12 payload can carry.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);

const REFERENCE_MIN_LEN: usize = 5;
const REFERENCE_MAX_LEN: usize = 25;

/// Validates an ISO 11649 creditor reference (`RF` + two check digits + up to
/// 21 alphanumerics, mod-97 remainder of 1).
pub fn check_creditor_reference(reference: &str) -> Result<()> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Ok(());
    }
    let invalid =
        |reason: &str| EpcError::InvalidCreditorReference(format!("{reference}: {reason}"));

    if !(REFERENCE_MIN_LEN..=REFERENCE_MAX_LEN).contains(&reference.len()) {
        return Err(invalid("length must be between 5 and 25 characters"));
    }
    if !reference.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("only letters and digits are allowed"));
    }
    if !reference[..2].eq_ignore_ascii_case("RF") {
        return Err(invalid("must start with RF"));
    }
    if !reference[2..4].chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("check digits must be numeric"));
    }

    let rearranged = reference[4..].chars().chain(reference[..4].chars());
    if mod97(rearranged) != 1 {
        return Err(invalid("checksum mismatch"));
    }
    Ok(())
}

/// Checks the shape of a BIC: 4-letter institution, 2-letter country,
/// 2-character location and an optional 3-character branch.
pub fn check_bic(bic: &str) -> Result<()> {
    let bic = bic.trim();
    if bic.is_empty() {
        return Ok(());
    }
    let invalid = |reason: &str| EpcError::InvalidBic(format!("{bic}: {reason}"));

    if bic.len() != 8 && bic.len() != 11 {
        return Err(invalid("must be 8 or 11 characters"));
    }
    if !bic.is_ascii() {
        return Err(invalid("only ASCII letters and digits are allowed"));
    }
    if !bic[..6].chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("institution and country codes must be letters"));
    }
    if !bic[6..].chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("location and branch codes must be alphanumeric"));
    }
    Ok(())
}

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub fn check_amount(amount: EuroAmount) -> Result<()> {
    let value = amount.to_cents_precision()?;
    if value < Decimal::ZERO {
        return Err(EpcError::InvalidAmount(format!("{value} is negative")));
    }
    if value > MAX_AMOUNT {
        return Err(EpcError::InvalidAmount(format!(
            "{value} exceeds {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Remainder of the alphanumeric string read as a base-10 number, with
/// letters expanded to 10..=35.
fn mod97(chars: impl Iterator<Item = char>) -> u32 {
    let mut remainder: u32 = 0;
    for ch in chars {
        let value = match ch.to_digit(36) {
            Some(v) => v,
            None => continue,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder
}
