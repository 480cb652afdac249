//! The sizing engine: stop/target math, auto-trail schedule, and contract
//! count reconciliation against funded-account guardrails.
//!
//! Pure and synchronous: same inputs, same result, every time. The only
//! failure modes are domain violations on the inputs; guardrail breaches
//! come back as warnings on the result.

mod input;
mod result;
mod sizing;
mod stops;
mod trail;

pub use input::{CalculationInput, DEFAULT_ATR_MULTIPLIER, MAX_ZONE_WIDTH_TICKS};
pub use result::{CalculationResult, BREAKEVEN_PLUS_TICKS};
pub use sizing::{GuardrailReport, GuardrailWarning, SizingBreakdown};
pub use stops::StopPlan;
pub use trail::{TrailSchedule, TrailStep, TrailStyle};

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::models::{AccountPlan, MarketSpec};

/// Run one full calculation: validate, derive the stop plan, generate the
/// trail schedule, then reconcile position size against the guardrails.
pub fn calculate(
    input: &CalculationInput,
    market: &MarketSpec,
    plan: Option<&AccountPlan>,
) -> Result<CalculationResult> {
    input.validate()?;

    let stops = stops::build_stop_plan(input, market)?;
    debug!(
        market = %market.symbol,
        final_stop_ticks = stops.final_stop_ticks,
        per_contract_risk = %stops.per_contract_risk_dollars,
        "stop plan"
    );

    let trail = trail::build_schedule(input.zone_width_ticks, input.trail_style);

    let sizing = sizing::reconcile(
        input.account_risk_dollars,
        stops.per_contract_risk_dollars,
        input.safety_split_fraction,
        plan,
        input.realized_profit_dollars,
    );

    let target1_dollars = Decimal::from(stops.target1_ticks) * market.tick_value;
    let target2_dollars = Decimal::from(stops.target2_ticks) * market.tick_value;
    let breakeven_trigger_ticks = stops.final_stop_ticks;

    Ok(CalculationResult {
        stops,
        breakeven_trigger_ticks,
        breakeven_plus_ticks: BREAKEVEN_PLUS_TICKS,
        target1_dollars_per_contract: target1_dollars,
        target2_dollars_per_contract: target2_dollars,
        trail,
        max_contracts_by_risk: sizing.max_contracts_by_risk,
        qty_safety: sizing.qty_safety,
        qty_runner: sizing.qty_runner,
        used_risk_dollars: sizing.used_risk_dollars,
        unused_risk_dollars: sizing.unused_risk_dollars,
        guardrails: sizing.guardrails,
        warnings: sizing.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScalingTier;
    use rust_decimal_macros::dec;

    fn mes() -> MarketSpec {
        MarketSpec::new("MES", "Micro ES", 4, dec!(1.25))
    }

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
    fn mes_18_tick_scenario() {
        let input = CalculationInput::new(18, dec!(1000));
        let result = calculate(&input, &mes(), None).unwrap();
        assert_eq!(result.stops.per_contract_risk_dollars, dec!(22.50));
        assert_eq!(result.max_contracts_by_risk, 44);
        assert_eq!(result.stops.target1_ticks, 36);
        assert_eq!(result.stops.target2_ticks, 90);
        assert_eq!(result.breakeven_trigger_ticks, 18);
        assert_eq!(result.breakeven_plus_ticks, 1);
        assert_eq!(result.target1_dollars_per_contract, dec!(45.00));
        assert_eq!(result.target2_dollars_per_contract, dec!(112.50));
        assert!(result.guardrails.is_none());
    }

    #[test]
    fn atr_buffer_rounds_away_at_mes_scale() {
        let mut input = CalculationInput::new(18, dec!(1000));
        input.atr_value = dec!(2.0);
        let result = calculate(&input, &mes(), None).unwrap();
        assert_eq!(result.stops.atr_buffer_ticks, 0);
        assert_eq!(result.stops.final_stop_ticks, 18);
    }

    #[test]
    fn funded_plan_enforces_scaling_tier() {
        let plan = express_50k();
        let mut input = CalculationInput::new(18, dec!(1000));
        input.realized_profit_dollars = dec!(1500);
        let result = calculate(&input, &mes(), Some(&plan)).unwrap();
        let g = result.guardrails.unwrap();
        assert_eq!(g.max_contracts_by_daily_loss, 111);
        assert_eq!(g.max_contracts_by_scaling_plan, 6);
        assert_eq!(g.enforced_max_contracts, 6);
        assert_eq!(
            result.warnings,
            vec![GuardrailWarning::RiskSizingExceedsScalingPlan]
        );
    }

    #[test]
    fn breakeven_trigger_tracks_buffered_stop() {
        let mut input = CalculationInput::new(18, dec!(1000));
        input.atr_value = dec!(50); // 1.0 point buffer = 4 ticks on MES
        let result = calculate(&input, &mes(), None).unwrap();
        assert_eq!(result.stops.final_stop_ticks, 22);
        assert_eq!(result.breakeven_trigger_ticks, 22);
    }

    #[test]
    fn identical_inputs_identical_results() {
        let plan = express_50k();
        let mut input = CalculationInput::new(25, dec!(750));
        input.atr_value = dec!(12.5);
        input.trail_style = TrailStyle::Loose;
        let a = calculate(&input, &mes(), Some(&plan)).unwrap();
        let b = calculate(&input, &mes(), Some(&plan)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_input_yields_no_result() {
        let input = CalculationInput::new(0, dec!(1000));
        assert!(calculate(&input, &mes(), None).is_err());
    }

    #[test]
    fn huge_zone_width_errors_instead_of_overflowing() {
        // Past the bound: a clean domain error, never a wrapped multiply
        let input = CalculationInput::new(1_000_000_000, dec!(1000));
        assert!(calculate(&input, &mes(), None).is_err());

        // At the bound every derived offset (up to the loose 7x trigger)
        // still fits in u32
        let mut input = CalculationInput::new(MAX_ZONE_WIDTH_TICKS, dec!(1000));
        input.trail_style = TrailStyle::Loose;
        let result = calculate(&input, &mes(), None).unwrap();
        assert_eq!(result.stops.target2_ticks, 5 * MAX_ZONE_WIDTH_TICKS);
        assert_eq!(
            result.trail.steps[2].trigger_ticks,
            7 * MAX_ZONE_WIDTH_TICKS
        );
        assert_eq!(result.max_contracts_by_risk, 0);
    }
}
