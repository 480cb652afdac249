//! Auto-trail schedule: 3 progressively wider stop offsets with triggers
//! and re-evaluation frequencies, all derived from the zone width.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Trigger spacing template for the runner's auto-trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrailStyle {
    /// Tight spacing: triggers at 2/3/4x zone width
    #[default]
    Tight,
    /// More room for bigger moves: triggers at 3/5/7x zone width
    Loose,
}

impl FromStr for TrailStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "tight" => Ok(Self::Tight),
            "loose" => Ok(Self::Loose),
            other => Err(Error::invalid(format!(
                "trail style must be 'tight' or 'loose', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TrailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tight => write!(f, "Tight"),
            Self::Loose => write!(f, "Loose"),
        }
    }
}

/// One step of the trail ladder, all values in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailStep {
    /// Stop offset behind price
    pub stop_ticks: u32,

    /// Profit level that arms this step
    pub trigger_ticks: u32,

    /// How often the step re-evaluates, in ticks of movement
    pub frequency_ticks: u32,
}

/// The full 3-step schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailSchedule {
    pub style: TrailStyle,
    pub steps: [TrailStep; 3],
}

/// Re-evaluation frequency: a fixed fraction of the zone width per step,
/// rounded half-to-even, never below 1 tick.
fn frequency(zone_width: u32, fraction: Decimal) -> u32 {
    let raw = (fraction * Decimal::from(zone_width)).round();
    raw.to_u32().unwrap_or(1).max(1)
}

/// Build the trail schedule for a zone width and spacing style.
///
/// Stops sit at 1/2/3x zone width for both styles; only the triggers
/// differ. For every positive zone width the triggers strictly exceed
/// their stops, so the trail only ever ratchets forward.
pub fn build_schedule(zone_width: u32, style: TrailStyle) -> TrailSchedule {
    let zw = zone_width;
    let stops = [zw, 2 * zw, 3 * zw];
    let triggers = match style {
        TrailStyle::Tight => [2 * zw, 3 * zw, 4 * zw],
        TrailStyle::Loose => [3 * zw, 5 * zw, 7 * zw],
    };
    let frequencies = [
        frequency(zw, dec!(0.25)),
        frequency(zw, dec!(0.1875)),
        frequency(zw, dec!(0.125)),
    ];

    let step = |i: usize| TrailStep {
        stop_ticks: stops[i],
        trigger_ticks: triggers[i],
        frequency_ticks: frequencies[i],
    };

    TrailSchedule {
        style,
        steps: [step(0), step(1), step(2)],
    }
}
