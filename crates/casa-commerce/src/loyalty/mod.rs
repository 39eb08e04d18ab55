//! Loyalty: cumulative purchase points and the derived level tier.

mod engine;
mod level;

pub use engine::{accrue, level_of, points_of, LevelUser, PointPurchase};
pub use level::{LoyaltyLevel, FAMILIAR_POINTS, VIP_POINTS};
