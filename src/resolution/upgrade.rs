//! Upgrade plans.
//!
//! An upgrade card grants a number of levels. Moving one cube one tier
//! forward costs one level, so a yellow cube turned brown costs three. A plan
//! is a short list of `(from, to, count)` steps that is checked and applied
//! as a whole: every step is priced against the stock held before the plan,
//! never against cubes produced by an earlier step.
//!
//! ```
//! use spice_road::core::{SpiceType, Spices};
//! use spice_road::resolution::{UpgradePlan, UpgradeStep};
//!
//! let stock = Spices::yellow(2);
//! let plan = UpgradePlan::from_steps([
//!     UpgradeStep::new(SpiceType::Yellow, SpiceType::Red, 1),
//!     UpgradeStep::new(SpiceType::Yellow, SpiceType::Green, 1),
//! ]);
//!
//! assert_eq!(plan.levels_used(), Some(3));
//! assert_eq!(plan.apply_to(&stock, 3).unwrap(), Spices::new(0, 1, 1, 0));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{SpiceType, Spices};
use crate::rules::RuleViolation;

/// Upgrade `count` cubes of `from` directly to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeStep {
    pub from: SpiceType,
    pub to: SpiceType,
    pub count: u32,
}

impl UpgradeStep {
    #[must_use]
    pub const fn new(from: SpiceType, to: SpiceType, count: u32) -> Self {
        Self { from, to, count }
    }

    /// Levels this step consumes, or `None` if it does not move forward.
    #[must_use]
    pub fn levels(&self) -> Option<u32> {
        self.from
            .distance(self.to)
            .and_then(|distance| distance.checked_mul(self.count))
    }
}

impl std::fmt::Display for UpgradeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x {} -> {}", self.count, self.from, self.to)
    }
}

/// A set of upgrade steps resolved together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradePlan {
    steps: SmallVec<[UpgradeStep; 4]>,
}

impl UpgradePlan {
    /// Plan that upgrades nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(step: UpgradeStep) -> Self {
        Self::from_steps([step])
    }

    #[must_use]
    pub fn from_steps(steps: impl IntoIterator<Item = UpgradeStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn push(&mut self, step: UpgradeStep) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn steps(&self) -> &[UpgradeStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total levels consumed, or `None` if any step is backwards or overflows.
    #[must_use]
    pub fn levels_used(&self) -> Option<u32> {
        self.steps
            .iter()
            .try_fold(0u32, |acc, step| acc.checked_add(step.levels()?))
    }

    /// Check the plan against `stock` and a level budget.
    ///
    /// Returns the stock after the plan is applied. Nothing is mutated, so a
    /// rejected plan leaves the caller's state untouched.
    pub fn apply_to(&self, stock: &Spices, budget: u32) -> Result<Spices, RuleViolation> {
        for step in &self.steps {
            if step.count == 0 {
                return Err(RuleViolation::InvalidUpgrade(format!(
                    "step {step} upgrades no cubes"
                )));
            }
            if step.from.distance(step.to).is_none() {
                return Err(RuleViolation::InvalidUpgrade(format!(
                    "{} cannot be upgraded to {}",
                    step.from, step.to
                )));
            }
        }

        let used = self
            .levels_used()
            .ok_or_else(|| RuleViolation::InvalidUpgrade("plan is too large".into()))?;
        if used > budget {
            return Err(RuleViolation::UpgradeOverBudget { used, budget });
        }

        let mut removed = Spices::EMPTY;
        let mut added = Spices::EMPTY;
        for step in &self.steps {
            removed[step.from] = removed[step.from]
                .checked_add(step.count)
                .ok_or_else(|| RuleViolation::InvalidUpgrade("plan is too large".into()))?;
            added[step.to] = added[step.to]
                .checked_add(step.count)
                .ok_or_else(|| RuleViolation::InvalidUpgrade("plan is too large".into()))?;
        }

        let remaining = stock.checked_sub(&removed).ok_or_else(|| {
            RuleViolation::InvalidUpgrade(format!("plan needs {removed}, only {stock} held"))
        })?;
        Ok(remaining + added)
    }
}

impl FromIterator<UpgradeStep> for UpgradePlan {
    fn from_iter<I: IntoIterator<Item = UpgradeStep>>(iter: I) -> Self {
        Self::from_steps(iter)
    }
}

/// Every single-step upgrade affordable with `stock` within `budget` levels.
///
/// Steps are listed by source tier, then target tier, then count.
#[must_use]
pub fn upgrade_options(stock: &Spices, budget: u32) -> Vec<UpgradeStep> {
    let mut options = Vec::new();
    for from in SpiceType::ALL {
        let available = stock[from];
        if available == 0 {
            continue;
        }
        for to in SpiceType::ALL {
            let Some(distance) = from.distance(to) else {
                continue;
            };
            let max_count = available.min(budget / distance);
            options.extend((1..=max_count).map(|count| UpgradeStep::new(from, to, count)));
        }
    }
    options
}
