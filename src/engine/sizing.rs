//! Position sizing reconciler: raw risk-based contract count intersected
//! with every funded-account guardrail that applies.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::AccountPlan;

/// Advisory note for one violated guardrail. Never an error: the engine's
/// job is to inform the trader, not to block the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailWarning {
    /// A single contract's stop-out would breach the daily loss limit
    PerContractRiskExceedsDailyLoss,
    /// A single contract's stop-out would breach the trailing drawdown
    PerContractRiskExceedsTrailingDrawdown,
    /// Risk-based count exceeds the current scaling-plan tier
    RiskSizingExceedsScalingPlan,
    /// All risk-based contracts stopping out would breach the daily loss cap
    RiskSizingExceedsDailyLoss,
    /// All risk-based contracts stopping out would breach the trailing drawdown
    RiskSizingExceedsTrailingDrawdown,
}

impl fmt::Display for GuardrailWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::PerContractRiskExceedsDailyLoss => {
                "Per-contract risk exceeds the daily loss limit."
            }
            Self::PerContractRiskExceedsTrailingDrawdown => {
                "Per-contract risk exceeds the trailing drawdown cushion."
            }
            Self::RiskSizingExceedsScalingPlan => {
                "Risk sizing wants more contracts than the scaling plan permits."
            }
            Self::RiskSizingExceedsDailyLoss => {
                "Risk sizing violates the daily loss cap if all contracts stop out."
            }
            Self::RiskSizingExceedsTrailingDrawdown => {
                "Risk sizing would blow the trailing drawdown if fully stopped."
            }
        };
        f.write_str(msg)
    }
}

/// Contract caps derived from a funded-account plan, plus the single
/// enforced maximum after intersecting them with risk-based sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailReport {
    /// Cap from the daily loss limit
    pub max_contracts_by_daily_loss: u32,

    /// Cap from the trailing drawdown cushion
    pub max_contracts_by_trailing_drawdown: u32,

    /// Cap from the scaling-plan tier at current realized profit
    pub max_contracts_by_scaling_plan: u32,

    /// Minimum of the risk-based count and every cap above
    pub enforced_max_contracts: u32,
}

/// Risk-based contract count, the safety/runner split, and (with a plan)
/// the guardrail reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingBreakdown {
    /// Contracts affordable inside the dollar risk budget
    pub max_contracts_by_risk: u32,

    /// Contracts taken off at target 1
    pub qty_safety: u32,

    /// Contracts left to trail
    pub qty_runner: u32,

    /// Budget actually consumed by the risk-based count
    pub used_risk_dollars: Decimal,

    /// Budget left over after rounding down to whole contracts
    pub unused_risk_dollars: Decimal,

    /// Present only when an account plan was supplied
    pub guardrails: Option<GuardrailReport>,

    /// Violated guardrails: per-contract breaches first, then count breaches
    pub warnings: Vec<GuardrailWarning>,
}

/// Whole contracts affordable for `budget` at `per_contract` risk each.
/// Truncates toward zero; a non-positive per-contract risk yields 0.
fn floor_contracts(budget: Decimal, per_contract: Decimal) -> u32 {
    if per_contract <= Decimal::ZERO {
        return 0;
    }
    (budget / per_contract).floor().to_u32().unwrap_or(u32::MAX)
}

/// Reconcile risk-based sizing against the account guardrails.
///
/// The enforced maximum is the minimum of the risk-based count and each
/// defined cap, so it can never exceed what the risk budget alone allows.
pub fn reconcile(
    account_risk_dollars: Decimal,
    per_contract_risk_dollars: Decimal,
    safety_split_fraction: Decimal,
    plan: Option<&AccountPlan>,
    realized_profit_dollars: Decimal,
) -> SizingBreakdown {
    let max_by_risk = floor_contracts(account_risk_dollars, per_contract_risk_dollars);

    let qty_safety = (Decimal::from(max_by_risk) * safety_split_fraction)
        .floor()
        .to_u32()
        .unwrap_or(0);
    let qty_runner = max_by_risk - qty_safety;

    let used_risk = Decimal::from(max_by_risk) * per_contract_risk_dollars;
    let unused_risk = account_risk_dollars - used_risk;

    let mut warnings = Vec::new();
    let guardrails = plan.map(|plan| {
        let by_daily = floor_contracts(plan.daily_loss_limit, per_contract_risk_dollars);
        let by_trailing = floor_contracts(plan.trailing_drawdown, per_contract_risk_dollars);
        let by_scaling = plan.contracts_allowed_at(realized_profit_dollars);
        let enforced = max_by_risk.min(by_daily).min(by_trailing).min(by_scaling);

        if per_contract_risk_dollars > plan.daily_loss_limit {
            warnings.push(GuardrailWarning::PerContractRiskExceedsDailyLoss);
        }
        if per_contract_risk_dollars > plan.trailing_drawdown {
            warnings.push(GuardrailWarning::PerContractRiskExceedsTrailingDrawdown);
        }
        if max_by_risk > by_scaling {
            warnings.push(GuardrailWarning::RiskSizingExceedsScalingPlan);
        }
        if max_by_risk > by_daily {
            warnings.push(GuardrailWarning::RiskSizingExceedsDailyLoss);
        }
        if max_by_risk > by_trailing {
            warnings.push(GuardrailWarning::RiskSizingExceedsTrailingDrawdown);
        }

        debug!(
            plan = %plan.id,
            by_risk = max_by_risk,
            by_daily,
            by_trailing,
            by_scaling,
            enforced,
            "guardrail reconciliation"
        );

        GuardrailReport {
            max_contracts_by_daily_loss: by_daily,
            max_contracts_by_trailing_drawdown: by_trailing,
            max_contracts_by_scaling_plan: by_scaling,
            enforced_max_contracts: enforced,
        }
    });

    SizingBreakdown {
        max_contracts_by_risk: max_by_risk,
        qty_safety,
        qty_runner,
        used_risk_dollars: used_risk,
        unused_risk_dollars: unused_risk,
        guardrails,
        warnings,
    }
}
