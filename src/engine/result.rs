//! The full calculation result handed to the presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sizing::{GuardrailReport, GuardrailWarning};
use super::stops::StopPlan;
use super::trail::TrailSchedule;

/// Ticks added to the breakeven stop once the trigger is reached.
pub const BREAKEVEN_PLUS_TICKS: u32 = 1;

/// Everything one calculation produces. Built fresh per call; carries no
/// state between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    // === Stop & targets ===
    /// Stop distance, targets, and per-contract risk
    pub stops: StopPlan,

    /// Breakeven trigger: move the stop once price runs this many ticks
    pub breakeven_trigger_ticks: u32,

    /// Offset past entry for the moved breakeven stop
    pub breakeven_plus_ticks: u32,

    /// Per-contract P&L if target 1 fills
    pub target1_dollars_per_contract: Decimal,

    /// Per-contract P&L if target 2 fills
    pub target2_dollars_per_contract: Decimal,

    // === Trail ===
    /// 3-step auto-trail schedule for the runner
    pub trail: TrailSchedule,

    // === Sizing ===
    /// Risk-based count, safety/runner split, and guardrail reconciliation
    pub max_contracts_by_risk: u32,
    pub qty_safety: u32,
    pub qty_runner: u32,
    pub used_risk_dollars: Decimal,
    pub unused_risk_dollars: Decimal,

    /// Funded-account caps; `None` when no plan was supplied
    pub guardrails: Option<GuardrailReport>,

    /// Advisory guardrail breaches, in report order
    pub warnings: Vec<GuardrailWarning>,
}
