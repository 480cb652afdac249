//! Stop/target calculator: zone width plus an optional ATR buffer become
//! the final stop distance, profit targets, and per-contract dollar risk.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::MarketSpec;
use super::input::CalculationInput;

/// Stop distance, targets, and per-contract risk for one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPlan {
    /// Base stop distance (the zone width) in ticks
    pub zone_width_ticks: u32,

    /// ATR buffer converted to ticks (0 when ATR is disabled)
    pub atr_buffer_ticks: u32,

    /// Raw ATR buffer in price points, before tick conversion
    pub atr_buffer_points: Decimal,

    /// Zone width plus buffer; what actually goes in the stop field
    pub final_stop_ticks: u32,

    /// First profit target in ticks (2x zone width)
    pub target1_ticks: u32,

    /// Second profit target in ticks (custom, or 5x zone width)
    pub target2_ticks: u32,

    /// Whether target 2 came from the custom override
    pub custom_target2: bool,

    /// Dollar loss per contract if the stop is hit
    pub per_contract_risk_dollars: Decimal,
}

/// Derive the stop plan from validated inputs and a market's tick economics.
///
/// The ATR buffer is strictly additive: it can widen the stop but never
/// shrink it below the zone width. The tick conversion multiplies the
/// buffer by `ticks_per_point` and rounds half-to-even; it treats the
/// ATR as quoted in full price points and is not adjusted for
/// instruments whose tick is an awkward fraction of a point.
pub fn build_stop_plan(input: &CalculationInput, market: &MarketSpec) -> Result<StopPlan> {
    let zw = input.zone_width_ticks;
    let target1_ticks = 2 * zw;
    let custom_target2 = input.custom_target2_ticks > 0;
    let target2_ticks = if custom_target2 {
        input.custom_target2_ticks
    } else {
        5 * zw
    };

    let (atr_buffer_points, atr_buffer_ticks) = if input.atr_value > Decimal::ZERO {
        let buffer = input.atr_value * input.atr_multiplier_fraction;
        let ticks = (buffer * Decimal::from(market.ticks_per_point))
            .round()
            .to_u32()
            .ok_or_else(|| {
                Error::invalid(format!("ATR buffer of {buffer} points does not fit in ticks"))
            })?;
        (buffer, ticks)
    } else {
        (Decimal::ZERO, 0)
    };

    let final_stop_ticks = zw.checked_add(atr_buffer_ticks).ok_or_else(|| {
        Error::invalid(format!(
            "stop of {zw} ticks plus ATR buffer of {atr_buffer_ticks} ticks does not fit in ticks"
        ))
    })?;
    if final_stop_ticks == 0 {
        return Err(Error::invalid("stop size resolved to zero ticks"));
    }

    Ok(StopPlan {
        zone_width_ticks: zw,
        atr_buffer_ticks,
        atr_buffer_points,
        final_stop_ticks,
        target1_ticks,
        target2_ticks,
        custom_target2,
        per_contract_risk_dollars: Decimal::from(final_stop_ticks) * market.tick_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn mes() -> MarketSpec {
        MarketSpec::new("MES", "Micro ES", 4, dec!(1.25))
    }

    #[test]
    fn base_targets_without_atr() {
        let input = CalculationInput::new(18, dec!(1000));
        let plan = build_stop_plan(&input, &mes()).unwrap();
        assert_eq!(plan.final_stop_ticks, 18);
        assert_eq!(plan.atr_buffer_ticks, 0);
        assert_eq!(plan.target1_ticks, 36);
        assert_eq!(plan.target2_ticks, 90);
        assert!(!plan.custom_target2);
        assert_eq!(plan.per_contract_risk_dollars, dec!(22.50));
    }

    #[test]
    fn small_atr_buffer_rounds_to_zero_ticks() {
        // 2.0 ATR * 2% = 0.04 points; 0.04 * 4 ticks/pt = 0.16 -> 0 ticks
        let mut input = CalculationInput::new(18, dec!(1000));
        input.atr_value = dec!(2.0);
        let plan = build_stop_plan(&input, &mes()).unwrap();
        assert_eq!(plan.atr_buffer_points, dec!(0.04));
        assert_eq!(plan.atr_buffer_ticks, 0);
        assert_eq!(plan.final_stop_ticks, 18);
    }

    #[test]
    fn large_atr_widens_the_stop() {
        // 50 ATR * 2% = 1.0 point = 4 ticks on MES
        let mut input = CalculationInput::new(18, dec!(1000));
        input.atr_value = dec!(50);
        let plan = build_stop_plan(&input, &mes()).unwrap();
        assert_eq!(plan.atr_buffer_ticks, 4);
        assert_eq!(plan.final_stop_ticks, 22);
        // Per-contract risk reflects the buffered stop
        assert_eq!(plan.per_contract_risk_dollars, dec!(27.50));
    }

    #[test]
    fn stop_composition_past_u32_errors_cleanly() {
        // Buffer of 4e9 ticks on its own fits u32, but added to a
        // maximal zone width the sum does not
        let mut input =
            CalculationInput::new(crate::engine::MAX_ZONE_WIDTH_TICKS, dec!(1000));
        input.atr_value = dec!(50_000_000_000); // * 2% * 4 ticks/pt = 4e9 ticks
        let err = build_stop_plan(&input, &mes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn custom_target2_overrides_default() {
        let mut input = CalculationInput::new(18, dec!(1000));
        input.custom_target2_ticks = 120;
        let plan = build_stop_plan(&input, &mes()).unwrap();
        assert_eq!(plan.target2_ticks, 120);
        assert!(plan.custom_target2);
    }

    #[test]
    fn tick_conversion_rounds_half_even() {
        // 12.5 ATR * 2% = 0.25 points; on MYM (1 tick/pt) 0.25 -> 0;
        // on M2K (10 ticks/pt) 2.5 rounds half-even to 2
        let mut input = CalculationInput::new(10, dec!(1000));
        input.atr_value = dec!(12.5);
        let mym = MarketSpec::new("MYM", "Micro YM", 1, dec!(0.50));
        assert_eq!(build_stop_plan(&input, &mym).unwrap().atr_buffer_ticks, 0);
        let m2k = MarketSpec::new("M2K", "Micro RTY", 10, dec!(0.50));
        assert_eq!(build_stop_plan(&input, &m2k).unwrap().atr_buffer_ticks, 2);
    }

    proptest! {
        /// ATR additivity: a positive ATR never shrinks the stop below
        /// the zone width, and zero ATR leaves it untouched.
        #[test]
        fn atr_is_strictly_additive(
            zw in 1u32..5_000,
            atr_cents in 0u32..100_000,
        ) {
            let mut input = CalculationInput::new(zw, dec!(1000));
            input.atr_value = Decimal::from(atr_cents) / dec!(100);
            let plan = build_stop_plan(&input, &mes()).unwrap();
            prop_assert!(plan.final_stop_ticks >= zw);
            if atr_cents == 0 {
                prop_assert_eq!(plan.final_stop_ticks, zw);
            }
        }

        /// Monotonic stop: per-contract risk is non-decreasing in the
        /// final stop size for a fixed tick value.
        #[test]
        fn risk_monotone_in_stop(zw1 in 1u32..5_000, zw2 in 1u32..5_000) {
            let market = mes();
            let p1 = build_stop_plan(&CalculationInput::new(zw1, dec!(1000)), &market).unwrap();
            let p2 = build_stop_plan(&CalculationInput::new(zw2, dec!(1000)), &market).unwrap();
            if p1.final_stop_ticks <= p2.final_stop_ticks {
                prop_assert!(p1.per_contract_risk_dollars <= p2.per_contract_risk_dollars);
            }
        }
    }
}
