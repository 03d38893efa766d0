//! Trade multipliers.

use crate::core::Spices;
use crate::rules::RuleViolation;

/// How many times `input` can be paid out of `stock`.
///
/// An empty input yields zero: a trade must cost something.
#[must_use]
pub fn max_trades(stock: &Spices, input: &Spices) -> u32 {
    input
        .iter()
        .map(|(spice, ratio)| stock[spice] / ratio)
        .min()
        .unwrap_or(0)
}

/// Stock after trading `input` for `output` `multiplier` times.
pub fn apply_trade(
    stock: &Spices,
    input: &Spices,
    output: &Spices,
    multiplier: u32,
) -> Result<Spices, RuleViolation> {
    let max = max_trades(stock, input);
    if multiplier == 0 || multiplier > max {
        return Err(RuleViolation::InvalidTradeMultiplier {
            requested: multiplier,
            max,
        });
    }
    let paid = stock
        .checked_sub(&input.times(multiplier))
        .ok_or(RuleViolation::InvalidTradeMultiplier {
            requested: multiplier,
            max,
        })?;
    Ok(paid + output.times(multiplier))
}
