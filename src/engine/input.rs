//! Calculation inputs: defaults, domain validation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use super::trail::TrailStyle;

/// Default ATR multiplier when the field is left blank (2%).
pub const DEFAULT_ATR_MULTIPLIER: Decimal = dec!(0.02);

/// Largest accepted zone width (and target override) in ticks.
///
/// The widest derived offset is the loose trail's 7x trigger, so anything
/// at or below this bound keeps every tick multiple inside `u32`. Real
/// stops are orders of magnitude smaller; values past the bound are a
/// typo, not a trade.
pub const MAX_ZONE_WIDTH_TICKS: u32 = u32::MAX / 7;

/// One complete set of inputs to the sizing engine.
///
/// Optional form fields resolve to their documented defaults before the
/// engine sees them: ATR 0 (buffer disabled), ATR multiplier 2%, custom
/// target 2 of 0 (meaning "use 5x zone width"), realized profit 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Base stop distance in ticks (the trader's zone width)
    pub zone_width_ticks: u32,

    /// Dollar risk budget for this trade
    pub account_risk_dollars: Decimal,

    /// Fraction of the contract count taken off at target 1 (0 to 1)
    pub safety_split_fraction: Decimal,

    /// Daily ATR in price points; 0 disables the stop buffer
    pub atr_value: Decimal,

    /// Fraction of the ATR added to the stop (0 to 1 typical)
    pub atr_multiplier_fraction: Decimal,

    /// Override for target 2 in ticks; 0 means the 5x zone-width default
    pub custom_target2_ticks: u32,

    /// Auto-trail trigger spacing
    pub trail_style: TrailStyle,

    /// Realized profit used to resolve the scaling-plan tier (any sign)
    pub realized_profit_dollars: Decimal,
}

impl CalculationInput {
    /// Inputs with every optional field at its default.
    pub fn new(zone_width_ticks: u32, account_risk_dollars: Decimal) -> Self {
        Self {
            zone_width_ticks,
            account_risk_dollars,
            safety_split_fraction: dec!(0.5),
            atr_value: Decimal::ZERO,
            atr_multiplier_fraction: DEFAULT_ATR_MULTIPLIER,
            custom_target2_ticks: 0,
            trail_style: TrailStyle::Tight,
            realized_profit_dollars: Decimal::ZERO,
        }
    }

    /// Check every field against its numeric domain.
    ///
    /// Runs before any calculation so a caller never gets a partial result.
    /// `realized_profit_dollars` is intentionally unchecked: losses are a
    /// legal input to the scaling-tier lookup.
    pub fn validate(&self) -> Result<()> {
        if self.zone_width_ticks == 0 {
            return Err(Error::invalid("zone width must be at least 1 tick"));
        }
        if self.zone_width_ticks > MAX_ZONE_WIDTH_TICKS {
            return Err(Error::invalid(format!(
                "zone width must be at most {MAX_ZONE_WIDTH_TICKS} ticks, got {}",
                self.zone_width_ticks
            )));
        }
        if self.custom_target2_ticks > MAX_ZONE_WIDTH_TICKS {
            return Err(Error::invalid(format!(
                "custom target 2 must be at most {MAX_ZONE_WIDTH_TICKS} ticks, got {}",
                self.custom_target2_ticks
            )));
        }
        if self.account_risk_dollars <= Decimal::ZERO {
            return Err(Error::invalid(format!(
                "account risk must be positive, got {}",
                self.account_risk_dollars
            )));
        }
        if self.safety_split_fraction < Decimal::ZERO || self.safety_split_fraction > Decimal::ONE
        {
            return Err(Error::invalid(format!(
                "safety split must be between 0 and 1, got {}",
                self.safety_split_fraction
            )));
        }
        if self.atr_value < Decimal::ZERO {
            return Err(Error::invalid(format!(
                "ATR must not be negative, got {}",
                self.atr_value
            )));
        }
        if self.atr_multiplier_fraction < Decimal::ZERO {
            return Err(Error::invalid(format!(
                "ATR multiplier must not be negative, got {}",
                self.atr_multiplier_fraction
            )));
        }
        Ok(())
    }
}
