//! Conversion of decimal inputs into integer smallest units.
//!
//! CRITICAL: the solver never sees a decimal. Every amount and denomination
//! is rescaled to an exact integer count of `10^-scale` before any arithmetic,
//! so 0.1 + 0.2 style drift cannot produce false "no solution" answers.

use std::iter;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::ChangeError;
use super::types::{Denomination, NormalizedInput, ScalePolicy, SolverLimits, Units};

/// Parses a decimal from user input.
///
/// Accepts plain (`7.03`) and scientific (`7.03e2`) notation and ignores
/// surrounding whitespace. Returns `None` for anything else.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Parses a comma-separated list of denominations, skipping entries that
/// are not numbers.
#[must_use]
pub fn parse_denomination_list(raw: &str) -> Vec<Decimal> {
    raw.split(',').filter_map(parse_decimal).collect()
}

/// Converts a non-negative decimal to smallest units at `scale`.
///
/// Returns `None` if the value is negative, has more decimal places than
/// `scale`, or overflows.
#[must_use]
pub fn to_units(value: Decimal, scale: u32) -> Option<Units> {
    let value = value.normalize();
    let shift = scale.checked_sub(value.scale())?;
    let factor = 10i128.checked_pow(shift)?;
    let units = value.mantissa().checked_mul(factor)?;
    Units::try_from(units).ok()
}

/// Normalizes a change request into the integer domain.
///
/// Non-positive denominations are discarded and duplicates collapsed. The
/// result lists denominations largest first.
pub fn normalize(
    amount: Option<Decimal>,
    denominations: &[Decimal],
    policy: ScalePolicy,
    limits: &SolverLimits,
) -> Result<NormalizedInput, ChangeError> {
    let amount = amount
        .ok_or_else(|| ChangeError::InvalidInput("amount is missing or not a number".into()))?
        .normalize();
    if amount < Decimal::ZERO {
        return Err(ChangeError::InvalidInput(format!(
            "amount must not be negative, got {amount}"
        )));
    }

    let coins: Vec<Decimal> = denominations
        .iter()
        .filter(|d| **d > Decimal::ZERO)
        .map(Decimal::normalize)
        .collect();
    if coins.is_empty() {
        return Err(ChangeError::InvalidInput(
            "at least one positive coin denomination is required".into(),
        ));
    }

    let scale = resolve_scale(amount, &coins, policy, limits)?;

    let target = to_units(amount, scale).ok_or_else(|| too_large(amount))?;

    let mut units = coins
        .into_iter()
        .map(|value| {
            to_units(value, scale)
                .map(|units| Denomination { units, value })
                .ok_or_else(|| too_large(value))
        })
        .collect::<Result<Vec<_>, _>>()?;
    units.sort_by(|a, b| b.units.cmp(&a.units));
    units.dedup_by_key(|d| d.units);

    if units.len() > limits.max_denominations {
        return Err(ChangeError::ResourceLimitExceeded(format!(
            "{} distinct denominations exceed the limit of {}",
            units.len(),
            limits.max_denominations
        )));
    }

    Ok(NormalizedInput {
        scale,
        target,
        amount,
        denominations: units,
    })
}

fn resolve_scale(
    amount: Decimal,
    coins: &[Decimal],
    policy: ScalePolicy,
    limits: &SolverLimits,
) -> Result<u32, ChangeError> {
    let widest = coins
        .iter()
        .chain(iter::once(&amount))
        .map(Decimal::scale)
        .max()
        .unwrap_or(0);

    let scale = match policy {
        ScalePolicy::Inferred => widest,
        ScalePolicy::Fixed(scale) => {
            if widest > scale {
                return Err(ChangeError::InvalidInput(format!(
                    "inputs use {widest} decimal places but the configured scale is {scale}"
                )));
            }
            scale
        }
    };

    if scale > limits.max_scale {
        return Err(ChangeError::InvalidInput(format!(
            "{scale} decimal places exceed the maximum of {}",
            limits.max_scale
        )));
    }
    Ok(scale)
}

fn too_large(value: Decimal) -> ChangeError {
    ChangeError::ResourceLimitExceeded(format!("{value} is too large to represent in units"))
}
