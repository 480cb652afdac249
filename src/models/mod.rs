//! Data models for markets and funded-account plans.

mod account;
mod market;

pub use account::{AccountPlan, ScalingTier};
pub use market::MarketSpec;
