//! Funded-account plan model: loss limits, drawdown, and the scaling ladder.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One rung of a profit-based scaling ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingTier {
    /// Realized profit required to unlock this tier (USD)
    pub profit_threshold: Decimal,

    /// Maximum contracts permitted at this tier
    pub max_contracts: u32,
}

impl ScalingTier {
    pub fn new(profit_threshold: Decimal, max_contracts: u32) -> Self {
        Self {
            profit_threshold,
            max_contracts,
        }
    }
}

/// Published risk rules for one prop-firm account size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPlan {
    /// Plan identifier (e.g. "50K Express")
    pub id: String,

    // === Account economics ===
    /// Account starting balance (USD)
    pub starting_balance: Decimal,

    /// Maximum loss permitted in a single session (USD)
    pub daily_loss_limit: Decimal,

    /// Trailing drawdown cushion from peak equity (USD)
    pub trailing_drawdown: Decimal,

    // === Scaling ===
    /// Profit tiers, ascending by threshold, tier 0 at threshold 0.
    /// The highest tier whose threshold is at or below current realized
    /// profit determines the contract cap.
    pub scaling_plan: Vec<ScalingTier>,
}

impl AccountPlan {
    /// Build a plan, validating the scaling ladder.
    ///
    /// A ladder that is empty, doesn't start at threshold 0, has
    /// non-ascending thresholds, or a decreasing contract cap is a
    /// configuration defect and is rejected here so it can never reach
    /// the engine.
    pub fn new(
        id: impl Into<String>,
        starting_balance: Decimal,
        daily_loss_limit: Decimal,
        trailing_drawdown: Decimal,
        scaling_plan: Vec<ScalingTier>,
    ) -> Result<Self> {
        let id = id.into();

        for (label, value) in [
            ("starting_balance", starting_balance),
            ("daily_loss_limit", daily_loss_limit),
            ("trailing_drawdown", trailing_drawdown),
        ] {
            if value <= Decimal::ZERO {
                return Err(Error::invalid(format!(
                    "plan '{id}': {label} must be positive, got {value}"
                )));
            }
        }

        let Some(base) = scaling_plan.first() else {
            return Err(Error::invalid(format!("plan '{id}': empty scaling plan")));
        };
        if base.profit_threshold != Decimal::ZERO {
            return Err(Error::invalid(format!(
                "plan '{id}': first scaling tier must start at profit 0"
            )));
        }
        for pair in scaling_plan.windows(2) {
            if pair[1].profit_threshold <= pair[0].profit_threshold {
                return Err(Error::invalid(format!(
                    "plan '{id}': scaling thresholds must be strictly ascending"
                )));
            }
            if pair[1].max_contracts < pair[0].max_contracts {
                return Err(Error::invalid(format!(
                    "plan '{id}': scaling contract caps must be non-decreasing"
                )));
            }
        }

        Ok(Self {
            id,
            starting_balance,
            daily_loss_limit,
            trailing_drawdown,
            scaling_plan,
        })
    }

    /// Contract cap unlocked at the given realized profit.
    ///
    /// Scans tiers in ascending order and keeps the last one whose
    /// threshold has been reached. A negative profit still resolves to
    /// the base tier.
    pub fn contracts_allowed_at(&self, realized_profit: Decimal) -> u32 {
        let mut eligible = self.scaling_plan[0].max_contracts;
        for tier in &self.scaling_plan {
            if realized_profit >= tier.profit_threshold {
                eligible = tier.max_contracts;
            } else {
                break;
            }
        }
        eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn express_50k() -> AccountPlan {
        AccountPlan::new(
            "50K Express",
            dec!(50_000),
            dec!(2_500),
            dec!(2_500),
            vec![
                ScalingTier::new(dec!(0), 4),
                ScalingTier::new(dec!(1_000), 6),
                ScalingTier::new(dec!(2_000), 8),
                ScalingTier::new(dec!(3_000), 10),
            ],
        )
        .unwrap()
    }

    #[test]
    fn scaling_resolves_highest_reached_tier() {
        let plan = express_50k();
        assert_eq!(plan.contracts_allowed_at(dec!(0)), 4);
        assert_eq!(plan.contracts_allowed_at(dec!(999.99)), 4);
        assert_eq!(plan.contracts_allowed_at(dec!(1_000)), 6);
        assert_eq!(plan.contracts_allowed_at(dec!(1_500)), 6);
        assert_eq!(plan.contracts_allowed_at(dec!(99_999)), 10);
    }

    #[test]
    fn negative_profit_stays_on_base_tier() {
        let plan = express_50k();
        assert_eq!(plan.contracts_allowed_at(dec!(-800)), 4);
    }

    #[test]
    fn rejects_decreasing_contract_cap() {
        let err = AccountPlan::new(
            "bad",
            dec!(50_000),
            dec!(2_500),
            dec!(2_500),
            vec![
                ScalingTier::new(dec!(0), 6),
                ScalingTier::new(dec!(1_000), 4),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_ladder_not_starting_at_zero() {
        assert!(AccountPlan::new(
            "bad",
            dec!(50_000),
            dec!(2_500),
            dec!(2_500),
            vec![ScalingTier::new(dec!(500), 4)],
        )
        .is_err());
    }

    #[test]
    fn rejects_unsorted_thresholds() {
        assert!(AccountPlan::new(
            "bad",
            dec!(50_000),
            dec!(2_500),
            dec!(2_500),
            vec![
                ScalingTier::new(dec!(0), 4),
                ScalingTier::new(dec!(2_000), 6),
                ScalingTier::new(dec!(1_000), 8),
            ],
        )
        .is_err());
    }

    #[test]
    fn rejects_empty_ladder() {
        assert!(
            AccountPlan::new("bad", dec!(50_000), dec!(2_500), dec!(2_500), vec![]).is_err()
        );
    }
}
