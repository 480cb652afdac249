//! Futures ATM sizing calculator.
//!
//! Sizes a futures position from a dollar risk budget and a zone-width
//! stop, derives the ATM order parameters (stop, targets, breakeven,
//! 3-step auto-trail), and reconciles the contract count against
//! prop-firm account guardrails.

mod engine;
mod error;
mod models;
mod registry;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use crate::engine::{CalculationInput, TrailStyle};
use crate::registry::{AccountPlanRegistry, MarketRegistry};

/// ATM sizing calculator CLI.
#[derive(Parser)]
#[command(name = "atm-sizer")]
#[command(about = "Size futures positions and ATM parameters from a risk budget", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in market tick specs
    Markets,

    /// List the built-in funded-account plans
    Plans,

    /// Run a sizing calculation
    Calc {
        /// Market symbol (e.g. MES)
        #[arg(short, long, default_value = "MES")]
        market: String,

        /// Zone width (base stop) in ticks
        #[arg(short, long)]
        zone_width: u32,

        /// Funded-account plan id (e.g. "50K Express")
        #[arg(short, long)]
        plan: Option<String>,

        /// Dollar risk budget; overrides balance and risk percent
        #[arg(long)]
        risk_dollars: Option<f64>,

        /// Account balance used for the risk budget; defaults to the
        /// plan's starting balance when a plan is selected
        #[arg(short, long)]
        balance: Option<f64>,

        /// Risk per trade as a percent of balance
        #[arg(short, long, default_value = "1.0")]
        risk_pct: f64,

        /// Safety leg split as a percent of the contract count
        #[arg(short, long, default_value = "50")]
        split_pct: f64,

        /// Daily ATR in price points (omit to disable the stop buffer)
        #[arg(long, default_value = "0")]
        atr: f64,

        /// ATR multiplier as a percent
        #[arg(long, default_value = "2")]
        atr_mult_pct: f64,

        /// Custom target 2 in ticks (0 = auto 5x zone width)
        #[arg(long, default_value = "0")]
        target2: u32,

        /// Auto-trail spacing (tight or loose)
        #[arg(short, long, default_value = "tight")]
        trail: TrailStyle,

        /// Realized profit for scaling-plan tier lookup
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        realized_profit: f64,

        /// Emit the result as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let markets = MarketRegistry::builtin();
    let plans = AccountPlanRegistry::builtin()?;

    match cli.command {
        Commands::Markets => {
            println!(
                "{:<6} {:<18} {:>9} {:>10} {:>11}",
                "SYMBOL", "NAME", "TICKS/PT", "TICK SIZE", "TICK VALUE"
            );
            println!("{}", "-".repeat(58));
            for market in markets.all() {
                println!(
                    "{:<6} {:<18} {:>9} {:>10} {:>11}",
                    market.symbol,
                    market.name,
                    market.ticks_per_point,
                    market.tick_size(),
                    format!("${:.4}", market.tick_value)
                );
            }
        }

        Commands::Plans => {
            for plan in plans.all() {
                println!("{} (start ${:.0})", plan.id, plan.starting_balance);
                println!("  Daily loss limit:  ${:.2}", plan.daily_loss_limit);
                println!("  Trailing drawdown: ${:.2}", plan.trailing_drawdown);
                println!("  Scaling plan:");
                for tier in &plan.scaling_plan {
                    println!(
                        "    profit >= ${:<8.0} -> {} contracts",
                        tier.profit_threshold, tier.max_contracts
                    );
                }
                println!();
            }
        }

        Commands::Calc {
            market,
            zone_width,
            plan,
            risk_dollars,
            balance,
            risk_pct,
            split_pct,
            atr,
            atr_mult_pct,
            target2,
            trail,
            realized_profit,
            json,
        } => {
            let market = markets.lookup(&market)?;
            let plan = plan.as_deref().map(|id| plans.lookup(id)).transpose()?;

            let account_risk = resolve_risk_budget(
                risk_dollars,
                balance,
                risk_pct,
                plan.map(|p| p.starting_balance),
            )?;
            debug!(%account_risk, "resolved risk budget");

            let input = CalculationInput {
                zone_width_ticks: zone_width,
                account_risk_dollars: account_risk,
                safety_split_fraction: Decimal::try_from(split_pct)? / dec!(100),
                atr_value: Decimal::try_from(atr)?,
                atr_multiplier_fraction: Decimal::try_from(atr_mult_pct)? / dec!(100),
                custom_target2_ticks: target2,
                trail_style: trail,
                realized_profit_dollars: Decimal::try_from(realized_profit)?,
            };

            let result = engine::calculate(&input, market, plan)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render(market, plan, &input, &result));
            }
        }
    }

    Ok(())
}

/// Resolve the dollar risk budget from the CLI's form-style inputs:
/// an explicit dollar amount wins; otherwise balance (or the plan's
/// starting balance) times the risk percent.
fn resolve_risk_budget(
    risk_dollars: Option<f64>,
    balance: Option<f64>,
    risk_pct: f64,
    plan_balance: Option<Decimal>,
) -> Result<Decimal> {
    if let Some(dollars) = risk_dollars {
        return Ok(Decimal::try_from(dollars)?);
    }
    let balance = match balance {
        Some(b) => Decimal::try_from(b)?,
        None => plan_balance.ok_or_else(|| {
            anyhow::anyhow!("provide --risk-dollars, --balance, or a --plan with a starting balance")
        })?,
    };
    Ok(balance * Decimal::try_from(risk_pct)? / dec!(100))
}
