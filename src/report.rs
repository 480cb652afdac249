//! Plain-text rendering of a calculation result: a copy-pasteable block
//! of ATM field values, sizing figures, and guardrail warnings.

use rust_decimal::Decimal;

use crate::engine::{CalculationInput, CalculationResult};
use crate::models::{AccountPlan, MarketSpec};

fn dollars(value: Decimal) -> String {
    format!("${:.2}", value)
}

/// Render the full report block.
pub fn render(
    market: &MarketSpec,
    plan: Option<&AccountPlan>,
    input: &CalculationInput,
    result: &CalculationResult,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(plan) = plan {
        lines.push(format!(
            "Account plan: {}  (start {})",
            plan.id,
            dollars(plan.starting_balance)
        ));
    }
    lines.push(format!(
        "Market: {} ({})   Tick={}   Ticks/pt={}",
        market.symbol,
        market.name,
        dollars(market.tick_value),
        market.ticks_per_point
    ));
    lines.push(format!(
        "Risk budget: {}",
        dollars(input.account_risk_dollars)
    ));
    lines.push(String::new());

    let stops = &result.stops;
    if stops.atr_buffer_points > Decimal::ZERO {
        lines.push("ATR STOP BUFFER:".to_string());
        lines.push(format!("  Daily ATR: {:.4}", input.atr_value));
        lines.push(format!(
            "  ATR Multiplier: {:.1}%",
            input.atr_multiplier_fraction * Decimal::from(100)
        ));
        lines.push(format!(
            "  Stop Buffer: {:.4} ({} ticks)",
            stops.atr_buffer_points, stops.atr_buffer_ticks
        ));
        lines.push(format!(
            "  Base ZW: {} ticks + Buffer: {} ticks = Final SL: {} ticks",
            stops.zone_width_ticks, stops.atr_buffer_ticks, stops.final_stop_ticks
        ));
        lines.push(String::new());
    }

    lines.push(format!(
        "Per-contract risk: {} ticks -> {}",
        stops.final_stop_ticks,
        dollars(stops.per_contract_risk_dollars)
    ));
    lines.push(format!(
        "Max contracts by account risk: {}",
        result.max_contracts_by_risk
    ));
    lines.push(format!(
        "Qty split: Safety {} | Runner {}",
        result.qty_safety, result.qty_runner
    ));
    lines.push(format!(
        "Risk used: {}   Unused: {}",
        dollars(result.used_risk_dollars),
        dollars(result.unused_risk_dollars)
    ));

    if let (Some(plan), Some(g)) = (plan, result.guardrails.as_ref()) {
        lines.push(String::new());
        lines.push("Account guardrails:".to_string());
        lines.push(format!(
            "  Daily loss limit: {} -> Max contracts {}",
            dollars(plan.daily_loss_limit),
            g.max_contracts_by_daily_loss
        ));
        lines.push(format!(
            "  Trailing drawdown: {} -> Max contracts {}",
            dollars(plan.trailing_drawdown),
            g.max_contracts_by_trailing_drawdown
        ));
        lines.push(format!(
            "  Scaling plan (profit {}): allows up to {} contracts",
            dollars(input.realized_profit_dollars),
            g.max_contracts_by_scaling_plan
        ));
        lines.push(format!(
            "  Enforced max contracts: {}",
            g.enforced_max_contracts
        ));
    }

    lines.push(String::new());
    lines.push("ATM fields (enter ticks):".to_string());
    let stop_suffix = if stops.atr_buffer_ticks > 0 {
        format!(
            " (ZW:{} + ATR Buffer:{})",
            stops.zone_width_ticks, stops.atr_buffer_ticks
        )
    } else {
        String::new()
    };
    lines.push(format!(
        "  Stop Loss (both): {}{}",
        stops.final_stop_ticks, stop_suffix
    ));
    lines.push(format!(
        "  Target 1: {}  ({:.2} pts)",
        stops.target1_ticks,
        market.ticks_to_points(stops.target1_ticks)
    ));
    lines.push(format!(
        "  Target 2: {}  ({:.2} pts) {}",
        stops.target2_ticks,
        market.ticks_to_points(stops.target2_ticks),
        if stops.custom_target2 {
            "[CUSTOM]"
        } else {
            "[AUTO: 5xZW]"
        }
    ));
    lines.push(format!(
        "  Breakeven: Trigger {}, Plus {}",
        result.breakeven_trigger_ticks, result.breakeven_plus_ticks
    ));
    lines.push(format!("  Runner Auto-Trail ({}):", result.trail.style));
    for (i, step) in result.trail.steps.iter().enumerate() {
        lines.push(format!(
            "    Step {}: Stop {}  |  Trigger {}  |  Freq {}",
            i + 1,
            step.stop_ticks,
            step.trigger_ticks,
            step.frequency_ticks
        ));
    }

    lines.push(String::new());
    lines.push("Per-contract P&L if targets hit:".to_string());
    lines.push(format!(
        "  T1: {}   T2: {}",
        dollars(result.target1_dollars_per_contract),
        dollars(result.target2_dollars_per_contract)
    ));

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("WARNINGS:".to_string());
        for warning in &result.warnings {
            lines.push(format!("  - {warning}"));
        }
    }

    lines.join("\n")
}
