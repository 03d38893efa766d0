//! Card definitions - static card data.
//!
//! Definitions never change after the catalog is built. Game state refers to
//! cards by id only; the catalog resolves ids to definitions.

use serde::{Deserialize, Serialize};

use crate::core::{SpiceType, Spices};

/// Identifier of a merchant card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MerchantCardId(pub u16);

impl MerchantCardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MerchantCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Identifier of a victory card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VictoryCardId(pub u16);

impl VictoryCardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for VictoryCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// What a merchant card does when played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MerchantEffect {
    /// Add spices.
    Gain(Spices),

    /// Spend up to `levels` single-tier upgrade steps.
    Upgrade { levels: u32 },

    /// Exchange `input` for `output`, any whole number of times.
    Trade { input: Spices, output: Spices },

    /// Gain first, then upgrade.
    GainUpgrade { gain: Spices, levels: u32 },
}

impl MerchantEffect {
    /// Whether the effect can be started with the given stock.
    ///
    /// Trade needs one full input ratio; Upgrade needs at least one spice
    /// below the top tier; Gain and GainUpgrade are always playable.
    #[must_use]
    pub fn can_play(&self, stock: &Spices) -> bool {
        match self {
            MerchantEffect::Gain(_) | MerchantEffect::GainUpgrade { .. } => true,
            MerchantEffect::Upgrade { .. } => SpiceType::ALL
                .into_iter()
                .any(|spice| !spice.is_top() && stock[spice] > 0),
            MerchantEffect::Trade { input, .. } => stock.covers(input),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MerchantEffect::Gain(_) => "gain",
            MerchantEffect::Upgrade { .. } => "upgrade",
            MerchantEffect::Trade { .. } => "trade",
            MerchantEffect::GainUpgrade { .. } => "gain-upgrade",
        }
    }

    /// True if the effect does nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            MerchantEffect::Gain(gain) => gain.is_empty(),
            MerchantEffect::Upgrade { levels } => *levels == 0,
            MerchantEffect::Trade { input, output } => input.is_empty() || output.is_empty(),
            MerchantEffect::GainUpgrade { gain, levels } => gain.is_empty() && *levels == 0,
        }
    }
}

/// A merchant card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCard {
    pub id: MerchantCardId,
    pub name: String,
    pub effect: MerchantEffect,
}

impl MerchantCard {
    #[must_use]
    pub fn new(id: u16, name: impl Into<String>, effect: MerchantEffect) -> Self {
        Self {
            id: MerchantCardId(id),
            name: name.into(),
            effect,
        }
    }

    #[must_use]
    pub fn gain(id: u16, gain: Spices) -> Self {
        Self::new(id, format!("Gain {gain}"), MerchantEffect::Gain(gain))
    }

    #[must_use]
    pub fn upgrade(id: u16, levels: u32) -> Self {
        Self::new(id, format!("Upgrade {levels}"), MerchantEffect::Upgrade { levels })
    }

    #[must_use]
    pub fn trade(id: u16, input: Spices, output: Spices) -> Self {
        Self::new(
            id,
            format!("{input} → {output}"),
            MerchantEffect::Trade { input, output },
        )
    }

    #[must_use]
    pub fn gain_upgrade(id: u16, gain: Spices, levels: u32) -> Self {
        Self::new(
            id,
            format!("Gain {gain} + Upgrade {levels}"),
            MerchantEffect::GainUpgrade { gain, levels },
        )
    }
}

/// A victory card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryCard {
    pub id: VictoryCardId,
    pub points: u32,
    pub cost: Spices,
    /// Granted on purchase. Empty for most cards.
    pub bonus_spices: Spices,
}

impl VictoryCard {
    #[must_use]
    pub fn new(id: u16, points: u32, cost: Spices) -> Self {
        Self {
            id: VictoryCardId(id),
            points,
            cost,
            bonus_spices: Spices::EMPTY,
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, bonus: Spices) -> Self {
        self.bonus_spices = bonus;
        self
    }
}

/// Coin placed on the first two victory market slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    Gold,
    Silver,
}

impl Coin {
    /// Coin that sits on a victory market slot, if any.
    #[must_use]
    pub const fn for_slot(slot: usize) -> Option<Coin> {
        match slot {
            0 => Some(Coin::Gold),
            1 => Some(Coin::Silver),
            _ => None,
        }
    }
}
