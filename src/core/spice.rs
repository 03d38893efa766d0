//! Spice tiers and spice bundles.
//!
//! ## SpiceType
//!
//! Four ordered tiers: `Yellow < Red < Green < Brown`. The order is part of
//! the rules: upgrades move a cube strictly forward along the chain.
//!
//! ## Spices
//!
//! A fixed-size count per tier. Used for player stock, card costs, trade
//! ratios, gains and bonus cubes. Counts are unsigned, so a bundle can never
//! hold a negative amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four spice tiers, in ascending value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpiceType {
    Yellow,
    Red,
    Green,
    Brown,
}

impl SpiceType {
    /// All tiers in ascending order.
    pub const ALL: [SpiceType; 4] = [
        SpiceType::Yellow,
        SpiceType::Red,
        SpiceType::Green,
        SpiceType::Brown,
    ];

    /// Tier index (Yellow = 0, Brown = 3).
    #[must_use]
    pub const fn tier(self) -> usize {
        self as usize
    }

    /// Tier for an index, if in range.
    #[must_use]
    pub const fn from_tier(tier: usize) -> Option<Self> {
        match tier {
            0 => Some(SpiceType::Yellow),
            1 => Some(SpiceType::Red),
            2 => Some(SpiceType::Green),
            3 => Some(SpiceType::Brown),
            _ => None,
        }
    }

    /// Number of upgrade steps from `self` to `to`.
    ///
    /// Returns `None` unless `to` is strictly later in the chain.
    #[must_use]
    pub fn distance(self, to: SpiceType) -> Option<u32> {
        (to > self).then(|| (to.tier() - self.tier()) as u32)
    }

    /// Whether this is the top tier (cannot be upgraded).
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, SpiceType::Brown)
    }

    /// Single-letter notation used in card names.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            SpiceType::Yellow => 'Y',
            SpiceType::Red => 'R',
            SpiceType::Green => 'G',
            SpiceType::Brown => 'B',
        }
    }
}

impl fmt::Display for SpiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpiceType::Yellow => "yellow",
            SpiceType::Red => "red",
            SpiceType::Green => "green",
            SpiceType::Brown => "brown",
        };
        f.write_str(name)
    }
}

/// Amount of each spice tier.
///
/// ```
/// use spice_road::core::{SpiceType, Spices};
///
/// let cost = Spices::new(2, 1, 0, 0);
/// let stock = Spices::yellow(3) + Spices::red(1);
///
/// assert!(stock.covers(&cost));
/// assert_eq!(stock.total(), 4);
/// assert_eq!(stock[SpiceType::Red], 1);
/// assert_eq!(cost.to_string(), "YYR");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spices([u32; 4]);

impl Spices {
    /// Empty bundle.
    pub const EMPTY: Spices = Spices([0; 4]);

    /// Create a bundle from per-tier counts.
    #[must_use]
    pub const fn new(yellow: u32, red: u32, green: u32, brown: u32) -> Self {
        Self([yellow, red, green, brown])
    }

    #[must_use]
    pub const fn yellow(amount: u32) -> Self {
        Self::new(amount, 0, 0, 0)
    }

    #[must_use]
    pub const fn red(amount: u32) -> Self {
        Self::new(0, amount, 0, 0)
    }

    #[must_use]
    pub const fn green(amount: u32) -> Self {
        Self::new(0, 0, amount, 0)
    }

    #[must_use]
    pub const fn brown(amount: u32) -> Self {
        Self::new(0, 0, 0, amount)
    }

    /// A bundle holding `amount` of a single tier.
    #[must_use]
    pub fn of(spice: SpiceType, amount: u32) -> Self {
        let mut bundle = Self::EMPTY;
        bundle[spice] = amount;
        bundle
    }

    /// Amount of one tier.
    #[must_use]
    pub fn get(&self, spice: SpiceType) -> u32 {
        self.0[spice.tier()]
    }

    /// Sum across all tiers, saturating at `u32::MAX`.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |sum, &count| sum.saturating_add(count))
    }

    /// Sum of Red, Green and Brown.
    #[must_use]
    pub fn non_yellow(&self) -> u32 {
        self.0[1..]
            .iter()
            .fold(0u32, |sum, &count| sum.saturating_add(count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True if every tier holds at least as much as `other`.
    #[must_use]
    pub fn covers(&self, other: &Spices) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(have, need)| have >= need)
    }

    /// Every tier multiplied by `factor`, saturating.
    #[must_use]
    pub fn times(&self, factor: u32) -> Spices {
        Spices(self.0.map(|count| count.saturating_mul(factor)))
    }

    /// Subtract `other`, or `None` if any tier would go negative.
    #[must_use]
    pub fn checked_sub(&self, other: &Spices) -> Option<Spices> {
        let mut out = *self;
        for spice in SpiceType::ALL {
            out[spice] = self.get(spice).checked_sub(other.get(spice))?;
        }
        Some(out)
    }

    /// Non-zero entries in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (SpiceType, u32)> + '_ {
        SpiceType::ALL
            .into_iter()
            .map(|spice| (spice, self.get(spice)))
            .filter(|&(_, count)| count > 0)
    }
}

impl Index<SpiceType> for Spices {
    type Output = u32;

    fn index(&self, spice: SpiceType) -> &Self::Output {
        &self.0[spice.tier()]
    }
}

impl IndexMut<SpiceType> for Spices {
    fn index_mut(&mut self, spice: SpiceType) -> &mut Self::Output {
        &mut self.0[spice.tier()]
    }
}

impl std::ops::Add for Spices {
    type Output = Spices;

    fn add(mut self, rhs: Spices) -> Spices {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign for Spices {
    fn add_assign(&mut self, rhs: Spices) {
        for spice in SpiceType::ALL {
            self[spice] = self[spice].saturating_add(rhs[spice]);
        }
    }
}

impl fmt::Display for Spices {
    /// Letter notation, e.g. `YYRB`. Empty bundles render as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (spice, count) in self.iter() {
            for _ in 0..count {
                write!(f, "{}", spice.letter())?;
            }
        }
        Ok(())
    }
}
