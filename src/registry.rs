//! Immutable lookup tables for market specs and funded-account plans.
//!
//! Both registries are populated once at startup and never mutated, so a
//! host can share them freely across threads. They are plain objects rather
//! than module-level statics so tests can fabricate their own catalogs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Error, Result};
use crate::models::{AccountPlan, MarketSpec, ScalingTier};

/// Read-only table of market tick specs, looked up by symbol.
#[derive(Debug, Clone)]
pub struct MarketRegistry {
    markets: Vec<MarketSpec>,
}

impl MarketRegistry {
    pub fn new(markets: Vec<MarketSpec>) -> Self {
        Self { markets }
    }

    /// Built-in CME Group market catalog.
    pub fn builtin() -> Self {
        fn m(symbol: &str, name: &str, ticks_per_point: u32, tick_value: Decimal) -> MarketSpec {
            MarketSpec::new(symbol, name, ticks_per_point, tick_value)
        }
        Self::new(vec![
            // Equity index
            m("MES", "Micro ES", 4, dec!(1.25)),
            m("ES", "E-mini ES", 4, dec!(12.50)),
            m("MNQ", "Micro NQ", 4, dec!(0.50)),
            m("NQ", "E-mini NQ", 4, dec!(5.00)),
            m("MYM", "Micro YM", 1, dec!(0.50)),
            m("YM", "E-mini YM", 1, dec!(5.00)),
            m("M2K", "Micro RTY", 10, dec!(0.50)),
            m("RTY", "E-mini RTY", 10, dec!(5.00)),
            // Energy (NYMEX)
            m("MCL", "Micro WTI Crude", 100, dec!(1.00)),
            m("CL", "WTI Crude Oil", 100, dec!(10.00)),
            // Metals (COMEX)
            m("MGC", "Micro Gold", 10, dec!(1.00)),
            m("GC", "Gold", 10, dec!(10.00)),
            m("SIL", "Micro Silver", 200, dec!(5.00)),
            m("SI", "Silver", 200, dec!(25.00)),
            m("HG", "Copper", 2000, dec!(12.50)),
            // Treasuries (CBOT)
            m("ZT", "2Y Note", 128, dec!(7.8125)),
            m("ZF", "5Y Note", 128, dec!(7.8125)),
            m("ZN", "10Y Note", 64, dec!(15.625)),
            m("ZB", "30Y Bond", 32, dec!(31.25)),
            // FX (CME)
            m("M6E", "Micro EUR/USD", 20000, dec!(1.25)),
            m("6E", "Euro FX", 20000, dec!(6.25)),
        ])
    }

    /// Look up a market by its symbol (case-insensitive).
    pub fn lookup(&self, symbol: &str) -> Result<&MarketSpec> {
        self.markets
            .iter()
            .find(|m| m.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| Error::not_found("market", symbol))
    }

    /// All markets, in catalog order.
    pub fn all(&self) -> &[MarketSpec] {
        &self.markets
    }
}

/// Read-only table of funded-account plans, looked up by id.
#[derive(Debug, Clone)]
pub struct AccountPlanRegistry {
    plans: Vec<AccountPlan>,
}

impl AccountPlanRegistry {
    /// Build a registry from pre-validated plans.
    pub fn new(plans: Vec<AccountPlan>) -> Self {
        Self { plans }
    }

    /// Published Express funded-account plans (as of late 2023).
    ///
    /// Plan validation happens inside [`AccountPlan::new`]; a malformed
    /// ladder here is a build-time defect, not a runtime condition.
    pub fn builtin() -> Result<Self> {
        let t = ScalingTier::new;
        Ok(Self::new(vec![
            AccountPlan::new(
                "50K Express",
                dec!(50_000),
                dec!(2_500),
                dec!(2_500),
                vec![
                    t(dec!(0), 4),
                    t(dec!(1_000), 6),
                    t(dec!(2_000), 8),
                    t(dec!(3_000), 10),
                ],
            )?,
            AccountPlan::new(
                "100K Express",
                dec!(100_000),
                dec!(3_000),
                dec!(3_000),
                vec![
                    t(dec!(0), 8),
                    t(dec!(2_000), 12),
                    t(dec!(4_000), 14),
                    t(dec!(6_000), 16),
                ],
            )?,
            AccountPlan::new(
                "150K Express",
                dec!(150_000),
                dec!(3_500),
                dec!(4_500),
                vec![
                    t(dec!(0), 10),
                    t(dec!(3_000), 14),
                    t(dec!(6_000), 18),
                    t(dec!(9_000), 22),
                ],
            )?,
        ]))
    }

    /// Look up a plan by id (case-insensitive).
    pub fn lookup(&self, id: &str) -> Result<&AccountPlan> {
        self.plans
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| Error::not_found("account plan", id))
    }

    /// All plans, in catalog order.
    pub fn all(&self) -> &[AccountPlan] {
        &self.plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_market_lookup() {
        let registry = MarketRegistry::builtin();
        let mes = registry.lookup("MES").unwrap();
        assert_eq!(mes.ticks_per_point, 4);
        assert_eq!(mes.tick_value, dec!(1.25));

        // Case-insensitive
        assert!(registry.lookup("mes").is_ok());
    }

    #[test]
    fn unknown_market_is_not_found() {
        let registry = MarketRegistry::builtin();
        let err = registry.lookup("BTC").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "market", .. }));
    }

    #[test]
    fn builtin_plans_validate() {
        let registry = AccountPlanRegistry::builtin().unwrap();
        assert_eq!(registry.all().len(), 3);
        let plan = registry.lookup("50K Express").unwrap();
        assert_eq!(plan.daily_loss_limit, dec!(2_500));
    }

    #[test]
    fn unknown_plan_is_not_found() {
        let registry = AccountPlanRegistry::builtin().unwrap();
        assert!(matches!(
            registry.lookup("25K Starter").unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
