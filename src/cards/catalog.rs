//! Card catalog: the fixed set of merchant and victory cards.
//!
//! The standard catalog holds 45 merchant cards, 37 victory cards and the two
//! starter cards every player begins with. Custom catalogs can be built for
//! variants and tests; `validate` must pass before a session uses one.

use rustc_hash::{FxHashMap, FxHashSet};

use super::definition::{MerchantCard, MerchantCardId, VictoryCard, VictoryCardId};
use crate::core::{SetupError, Spices};

/// Merchant cards in the standard catalog.
pub const MERCHANT_CATALOG_SIZE: usize = 45;
/// Victory cards in the standard catalog.
pub const VICTORY_CATALOG_SIZE: usize = 37;

/// Starter card: Upgrade 2.
pub const STARTER_UPGRADE: MerchantCardId = MerchantCardId(101);
/// Starter card: Gain YY.
pub const STARTER_GAIN: MerchantCardId = MerchantCardId(102);

/// Immutable card lookup.
///
/// ```
/// use spice_road::cards::{Catalog, MerchantCardId};
///
/// let catalog = Catalog::standard();
/// assert!(catalog.validate().is_ok());
///
/// let card = catalog.merchant(MerchantCardId(3)).unwrap();
/// assert_eq!(card.name, "YYY → B");
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    merchants: Vec<MerchantCard>,
    victories: Vec<VictoryCard>,
    starters: Vec<MerchantCard>,
    merchant_index: FxHashMap<MerchantCardId, usize>,
    victory_index: FxHashMap<VictoryCardId, usize>,
    starter_index: FxHashMap<MerchantCardId, usize>,
}

impl Catalog {
    /// Build a catalog from card lists. Call `validate` before use.
    #[must_use]
    pub fn new(
        merchants: Vec<MerchantCard>,
        victories: Vec<VictoryCard>,
        starters: Vec<MerchantCard>,
    ) -> Self {
        let merchant_index = merchants.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let victory_index = victories.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let starter_index = starters.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        Self {
            merchants,
            victories,
            starters,
            merchant_index,
            victory_index,
            starter_index,
        }
    }

    /// The standard game's cards.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_merchants(), standard_victories(), standard_starters())
    }

    /// Check the catalog is complete and internally consistent.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.merchants.is_empty() {
            return Err(SetupError::EmptyCatalog { kind: "merchant" });
        }
        if self.victories.is_empty() {
            return Err(SetupError::EmptyCatalog { kind: "victory" });
        }
        if self.starters.is_empty() {
            return Err(SetupError::EmptyCatalog { kind: "starter" });
        }

        let mut seen = FxHashSet::default();
        for card in self.merchants.iter().chain(&self.starters) {
            if !seen.insert(card.id) {
                return Err(SetupError::DuplicateMerchant(card.id));
            }
            if card.effect.is_empty() {
                return Err(SetupError::EmptyEffect(card.id));
            }
        }

        let mut seen = FxHashSet::default();
        for card in &self.victories {
            if !seen.insert(card.id) {
                return Err(SetupError::DuplicateVictory(card.id));
            }
        }
        Ok(())
    }

    /// Check both draw piles can fill their markets.
    pub fn check_market_sizes(&self, merchant: usize, victory: usize) -> Result<(), SetupError> {
        if self.merchants.len() < merchant {
            return Err(SetupError::CatalogTooSmall {
                kind: "merchant",
                found: self.merchants.len(),
                needed: merchant,
            });
        }
        if self.victories.len() < victory {
            return Err(SetupError::CatalogTooSmall {
                kind: "victory",
                found: self.victories.len(),
                needed: victory,
            });
        }
        Ok(())
    }

    /// Look up a merchant card, including starter cards.
    #[must_use]
    pub fn merchant(&self, id: MerchantCardId) -> Option<&MerchantCard> {
        if let Some(&i) = self.merchant_index.get(&id) {
            return self.merchants.get(i);
        }
        self.starter_index.get(&id).and_then(|&i| self.starters.get(i))
    }

    #[must_use]
    pub fn victory(&self, id: VictoryCardId) -> Option<&VictoryCard> {
        self.victory_index.get(&id).and_then(|&i| self.victories.get(i))
    }

    /// Cards that go into the merchant draw pile.
    #[must_use]
    pub fn merchant_cards(&self) -> &[MerchantCard] {
        &self.merchants
    }

    /// Cards that go into the victory draw pile.
    #[must_use]
    pub fn victory_cards(&self) -> &[VictoryCard] {
        &self.victories
    }

    /// Cards dealt to every player's starting hand.
    #[must_use]
    pub fn starter_cards(&self) -> &[MerchantCard] {
        &self.starters
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_starters() -> Vec<MerchantCard> {
    vec![
        MerchantCard::upgrade(STARTER_UPGRADE.0, 2),
        MerchantCard::gain(STARTER_GAIN.0, Spices::yellow(2)),
    ]
}

fn standard_merchants() -> Vec<MerchantCard> {
    let y = Spices::yellow;
    let r = Spices::red;
    let g = Spices::green;
    let b = Spices::brown;
    let s = Spices::new;

    vec![
        MerchantCard::gain(1, y(2)),
        MerchantCard::upgrade(2, 2),
        MerchantCard::trade(3, y(3), b(1)),
        MerchantCard::trade(4, r(1), y(3)),
        MerchantCard::gain(5, s(1, 1, 0, 0)),
        MerchantCard::gain(6, g(1)),
        MerchantCard::gain(7, y(3)),
        MerchantCard::upgrade(8, 3),
        MerchantCard::trade(9, g(2), s(2, 3, 0, 0)),
        MerchantCard::trade(10, g(2), s(2, 1, 0, 1)),
        MerchantCard::trade(11, b(1), s(3, 0, 1, 0)),
        MerchantCard::trade(12, r(2), s(3, 0, 1, 0)),
        MerchantCard::trade(13, r(3), s(2, 0, 2, 0)),
        MerchantCard::trade(14, b(1), s(2, 2, 0, 0)),
        MerchantCard::trade(15, y(4), g(2)),
        MerchantCard::gain(16, s(2, 1, 0, 0)),
        MerchantCard::gain(17, y(4)),
        MerchantCard::gain(18, b(1)),
        MerchantCard::gain(19, r(2)),
        MerchantCard::gain(20, s(1, 0, 1, 0)),
        MerchantCard::trade(21, y(2), g(1)),
        MerchantCard::trade(22, s(1, 1, 0, 0), b(1)),
        MerchantCard::trade(23, g(1), r(2)),
        MerchantCard::trade(24, r(2), s(2, 0, 0, 1)),
        MerchantCard::trade(25, y(3), s(0, 1, 1, 0)),
        MerchantCard::trade(26, g(2), s(0, 2, 0, 1)),
        MerchantCard::trade(27, r(3), s(1, 0, 1, 1)),
        MerchantCard::trade(28, b(1), r(3)),
        MerchantCard::trade(29, r(3), b(2)),
        MerchantCard::trade(30, b(1), s(1, 1, 1, 0)),
        MerchantCard::trade(31, g(1), s(1, 2, 0, 0)),
        MerchantCard::trade(32, g(1), s(4, 1, 0, 0)),
        MerchantCard::trade(33, y(5), b(2)),
        MerchantCard::trade(34, y(4), s(0, 0, 1, 1)),
        MerchantCard::trade(35, b(2), s(0, 3, 2, 0)),
        MerchantCard::trade(36, b(2), s(1, 1, 3, 0)),
        MerchantCard::trade(37, y(5), g(3)),
        MerchantCard::trade(38, s(2, 0, 1, 0), b(2)),
        MerchantCard::trade(39, g(3), b(3)),
        MerchantCard::trade(40, r(3), g(3)),
        MerchantCard::trade(41, y(3), r(3)),
        MerchantCard::trade(42, y(2), r(2)),
        MerchantCard::trade(43, g(2), b(2)),
        MerchantCard::trade(44, r(2), g(2)),
        MerchantCard::trade(45, b(1), g(2)),
    ]
}

fn standard_victories() -> Vec<VictoryCard> {
    let s = Spices::new;
    let v = VictoryCard::new;

    vec![
        // Two-colour costs
        v(1, 6, s(2, 2, 0, 0)),
        v(2, 7, s(3, 2, 0, 0)),
        v(3, 8, s(0, 4, 0, 0)),
        v(4, 8, s(2, 0, 2, 0)),
        v(5, 8, s(2, 3, 0, 0)),
        v(6, 9, s(3, 0, 2, 0)),
        v(7, 10, s(0, 2, 2, 0)),
        v(8, 10, s(0, 5, 0, 0)),
        v(9, 10, s(2, 0, 0, 2)),
        v(10, 11, s(2, 0, 3, 0)),
        v(11, 11, s(3, 0, 0, 2)),
        v(12, 12, s(0, 0, 4, 0)),
        v(13, 12, s(0, 2, 0, 2)),
        v(14, 12, s(0, 3, 2, 0)),
        v(15, 13, s(0, 2, 3, 0)),
        v(16, 14, s(0, 0, 2, 2)),
        v(17, 14, s(0, 3, 0, 2)),
        v(18, 14, s(2, 0, 0, 3)),
        v(19, 15, s(0, 0, 5, 0)),
        v(20, 16, s(0, 0, 0, 4)),
        v(21, 16, s(0, 2, 0, 3)),
        v(22, 17, s(0, 0, 3, 2)),
        v(23, 18, s(0, 0, 2, 3)),
        v(24, 20, s(0, 0, 0, 5)),
        // Three- and four-colour costs
        v(25, 9, s(2, 1, 0, 1)),
        v(26, 12, s(0, 2, 1, 1)),
        v(27, 12, s(1, 0, 2, 1)),
        v(28, 13, s(2, 2, 2, 0)),
        v(29, 15, s(2, 2, 0, 2)),
        v(30, 17, s(2, 0, 2, 2)),
        v(31, 19, s(0, 2, 2, 2)),
        v(32, 12, s(1, 1, 1, 1)),
        v(33, 14, s(3, 1, 1, 1)),
        v(34, 16, s(1, 3, 1, 1)),
        v(35, 18, s(1, 1, 3, 1)),
        v(36, 20, s(1, 1, 1, 3)),
        // Bonus spice card
        v(37, 8, s(0, 2, 1, 0)).with_bonus(Spices::yellow(1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MerchantEffect;

    #[test]
    fn test_standard_sizes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.merchant_cards().len(), MERCHANT_CATALOG_SIZE);
        assert_eq!(catalog.victory_cards().len(), VICTORY_CATALOG_SIZE);
        assert_eq!(catalog.starter_cards().len(), 2);
        assert_eq!(catalog.validate(), Ok(()));
    }

    #[test]
    fn test_lookup_includes_starters() {
        let catalog = Catalog::standard();

        let upgrade = catalog.merchant(STARTER_UPGRADE).unwrap();
        assert_eq!(upgrade.effect, MerchantEffect::Upgrade { levels: 2 });

        let gain = catalog.merchant(STARTER_GAIN).unwrap();
        assert_eq!(gain.effect, MerchantEffect::Gain(Spices::yellow(2)));

        assert!(catalog.merchant(MerchantCardId(999)).is_none());
        assert!(catalog.victory(VictoryCardId(0)).is_none());
    }

    #[test]
    fn test_victory_lookup() {
        let catalog = Catalog::standard();
        let card = catalog.victory(VictoryCardId(24)).unwrap();
        assert_eq!(card.points, 20);
        assert_eq!(card.cost, Spices::brown(5));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Catalog::new(vec![], standard_victories(), standard_starters());
        assert_eq!(
            catalog.validate(),
            Err(SetupError::EmptyCatalog { kind: "merchant" })
        );

        let catalog = Catalog::new(standard_merchants(), vec![], standard_starters());
        assert_eq!(
            catalog.validate(),
            Err(SetupError::EmptyCatalog { kind: "victory" })
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut merchants = standard_merchants();
        merchants.push(MerchantCard::gain(1, Spices::yellow(1)));
        let catalog = Catalog::new(merchants, standard_victories(), standard_starters());
        assert_eq!(
            catalog.validate(),
            Err(SetupError::DuplicateMerchant(MerchantCardId(1)))
        );

        let mut victories = standard_victories();
        victories.push(VictoryCard::new(5, 1, Spices::yellow(1)));
        let catalog = Catalog::new(standard_merchants(), victories, standard_starters());
        assert_eq!(
            catalog.validate(),
            Err(SetupError::DuplicateVictory(VictoryCardId(5)))
        );
    }

    #[test]
    fn test_starter_id_collision_rejected() {
        let starters = vec![MerchantCard::upgrade(2, 2)];
        let catalog = Catalog::new(standard_merchants(), standard_victories(), starters);
        assert_eq!(
            catalog.validate(),
            Err(SetupError::DuplicateMerchant(MerchantCardId(2)))
        );
    }

    #[test]
    fn test_market_size_check() {
        let catalog = Catalog::new(
            vec![MerchantCard::gain(1, Spices::yellow(1))],
            standard_victories(),
            standard_starters(),
        );
        assert_eq!(
            catalog.check_market_sizes(6, 5),
            Err(SetupError::CatalogTooSmall {
                kind: "merchant",
                found: 1,
                needed: 6
            })
        );
        assert!(Catalog::standard().check_market_sizes(6, 5).is_ok());
    }

    #[test]
    fn test_trade_cards_have_inputs_and_outputs() {
        for card in Catalog::standard().merchant_cards() {
            if let MerchantEffect::Trade { input, output } = &card.effect {
                assert!(!input.is_empty(), "{} has no input", card.name);
                assert!(!output.is_empty(), "{} has no output", card.name);
            }
        }
    }
}
