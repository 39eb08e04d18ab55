//! Loyalty level tiers.

use serde::{Deserialize, Serialize};

/// Points needed for the VIP tier.
pub const VIP_POINTS: i64 = 30;
/// Points needed for the FAMILIAR tier.
pub const FAMILIAR_POINTS: i64 = 20;

/// Discrete loyalty tier, a pure function of the cumulative point total.
///
/// Stored as its numeric code: 0 = VIP, 1 = FAMILIAR, 2 = NORMAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "i64", from = "i64")]
pub enum LoyaltyLevel {
    Vip,
    Familiar,
    #[default]
    Normal,
}

impl LoyaltyLevel {
    /// Derive the level from a cumulative point total.
    pub fn from_points(points: i64) -> Self {
        if points >= VIP_POINTS {
            LoyaltyLevel::Vip
        } else if points >= FAMILIAR_POINTS {
            LoyaltyLevel::Familiar
        } else {
            LoyaltyLevel::Normal
        }
    }

    /// The numeric code stored in the database.
    pub fn code(&self) -> i64 {
        match self {
            LoyaltyLevel::Vip => 0,
            LoyaltyLevel::Familiar => 1,
            LoyaltyLevel::Normal => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyLevel::Vip => "vip",
            LoyaltyLevel::Familiar => "familiar",
            LoyaltyLevel::Normal => "normal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoyaltyLevel::Vip => "VIP",
            LoyaltyLevel::Familiar => "Familiar",
            LoyaltyLevel::Normal => "Normal",
        }
    }
}

impl From<LoyaltyLevel> for i64 {
    fn from(level: LoyaltyLevel) -> Self {
        level.code()
    }
}

impl From<i64> for LoyaltyLevel {
    fn from(code: i64) -> Self {
        match code {
            0 => LoyaltyLevel::Vip,
            1 => LoyaltyLevel::Familiar,
            _ => LoyaltyLevel::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(LoyaltyLevel::from_points(0), LoyaltyLevel::Normal);
        assert_eq!(LoyaltyLevel::from_points(19), LoyaltyLevel::Normal);
        assert_eq!(LoyaltyLevel::from_points(20), LoyaltyLevel::Familiar);
        assert_eq!(LoyaltyLevel::from_points(29), LoyaltyLevel::Familiar);
        assert_eq!(LoyaltyLevel::from_points(30), LoyaltyLevel::Vip);
        assert_eq!(LoyaltyLevel::from_points(1000), LoyaltyLevel::Vip);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(
            serde_json::to_value(LoyaltyLevel::Vip).unwrap(),
            serde_json::json!(0)
        );
        let level: LoyaltyLevel = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(level, LoyaltyLevel::Familiar);
    }
}
