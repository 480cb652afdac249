//! Market model holding the tick economics of a futures contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tick economics for one CME futures market.
///
/// Immutable once constructed; the engine only ever reads these two numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSpec {
    /// Exchange symbol (e.g. "MES")
    pub symbol: String,

    /// Human-readable contract name (e.g. "Micro ES")
    pub name: String,

    /// How many minimum price increments make up a 1.00 point move
    pub ticks_per_point: u32,

    /// USD value of one minimum price increment
    pub tick_value: Decimal,
}

impl MarketSpec {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        ticks_per_point: u32,
        tick_value: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            ticks_per_point,
            tick_value,
        }
    }

    /// Minimum price increment as a fraction of a full point.
    pub fn tick_size(&self) -> Decimal {
        Decimal::ONE / Decimal::from(self.ticks_per_point)
    }

    /// Convert a tick count into price points for display.
    pub fn ticks_to_points(&self, ticks: u32) -> Decimal {
        Decimal::from(ticks) / Decimal::from(self.ticks_per_point)
    }
}
