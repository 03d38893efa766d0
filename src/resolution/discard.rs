//! Returning spices above the hand limit.

use crate::core::{SpiceType, Spices};
use crate::rules::RuleViolation;

/// Check that `bundle` returns exactly `excess` spices the player holds.
pub fn validate_discard(stock: &Spices, bundle: &Spices, excess: u32) -> Result<(), RuleViolation> {
    if !stock.covers(bundle) {
        return Err(RuleViolation::DiscardNotHeld {
            discarded: *bundle,
            held: *stock,
        });
    }
    if bundle.total() != excess {
        return Err(RuleViolation::DiscardMismatch {
            discarded: bundle.total(),
            excess,
        });
    }
    Ok(())
}

/// Every bundle of exactly `excess` spices that can be taken from `stock`.
///
/// Bundles are listed with the most yellow first.
#[must_use]
pub fn discard_options(stock: &Spices, excess: u32) -> Vec<Spices> {
    let mut options = Vec::new();
    let mut current = Spices::EMPTY;
    collect_discards(stock, excess, 0, &mut current, &mut options);
    options
}

fn collect_discards(
    stock: &Spices,
    remaining: u32,
    tier: usize,
    current: &mut Spices,
    out: &mut Vec<Spices>,
) {
    let Some(spice) = SpiceType::from_tier(tier) else {
        if remaining == 0 {
            out.push(*current);
        }
        return;
    };
    for amount in (0..=stock[spice].min(remaining)).rev() {
        current[spice] = amount;
        collect_discards(stock, remaining - amount, tier + 1, current, out);
    }
    current[spice] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_exact_count() {
        let stock = Spices::new(9, 0, 0, 3);

        assert!(validate_discard(&stock, &Spices::yellow(2), 2).is_ok());
        assert_eq!(
            validate_discard(&stock, &Spices::yellow(1), 2),
            Err(RuleViolation::DiscardMismatch { discarded: 1, excess: 2 })
        );
        assert!(validate_discard(&stock, &Spices::yellow(3), 2).is_err());
    }

    #[test]
    fn test_validate_must_hold() {
        let stock = Spices::yellow(12);
        assert!(matches!(
            validate_discard(&stock, &Spices::red(2), 2),
            Err(RuleViolation::DiscardNotHeld { .. })
        ));
    }

    #[test]
    fn test_oversized_bundle_not_held() {
        let stock = Spices::yellow(12);
        assert!(matches!(
            validate_discard(&stock, &Spices::new(u32::MAX, 3, 0, 0), 2),
            Err(RuleViolation::DiscardNotHeld { .. })
        ));
    }

    #[test]
    fn test_options() {
        let options = discard_options(&Spices::new(2, 1, 0, 0), 2);
        assert_eq!(options, vec![Spices::yellow(2), Spices::new(1, 1, 0, 0)]);
    }

    #[test]
    fn test_options_all_valid() {
        let stock = Spices::new(4, 3, 2, 3);
        let options = discard_options(&stock, 2);

        // Compositions of 2 over four tiers.
        assert_eq!(options.len(), 10);
        for bundle in options {
            assert!(validate_discard(&stock, &bundle, 2).is_ok());
        }
    }

    #[test]
    fn test_options_zero_excess() {
        assert_eq!(discard_options(&Spices::yellow(3), 0), vec![Spices::EMPTY]);
    }
}
