//! Loyalty accrual: create-or-increment points, upsert the derived level.

use casa_db::{Record, Transaction};
use serde::{Deserialize, Serialize};

use crate::ids::{LevelUserId, PointPurchaseId, UserId};
use crate::loyalty::LoyaltyLevel;
use crate::CommerceError;

/// Cumulative purchase points, one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointPurchase {
    pub id: PointPurchaseId,
    pub user_id: UserId,
    pub point: i64,
}

impl Record for PointPurchase {
    const TABLE: &'static str = "point_purchase";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Derived loyalty level, one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelUser {
    pub id: LevelUserId,
    pub user_id: UserId,
    pub level: LoyaltyLevel,
}

impl Record for LevelUser {
    const TABLE: &'static str = "level_user";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Add `purchased_qty` points to the user's balance and recompute the
/// level from the resulting total.
///
/// The point row is created lazily on first purchase. Idempotent given
/// the same cumulative total: the stored level depends only on the sum,
/// never on the order of increments.
pub fn accrue(
    tx: &mut Transaction,
    user_id: &UserId,
    purchased_qty: i64,
) -> Result<LoyaltyLevel, CommerceError> {
    if purchased_qty < 1 {
        return Err(CommerceError::InvalidQuantity(purchased_qty));
    }

    let total = match tx.find_one::<PointPurchase>(|p| p.user_id == *user_id)? {
        Some(mut points) => {
            points.point += purchased_qty;
            tx.update(&points)?;
            points.point
        }
        None => {
            let points = PointPurchase {
                id: PointPurchaseId::generate(),
                user_id: user_id.clone(),
                point: purchased_qty,
            };
            tx.insert(&points)?;
            points.point
        }
    };

    let level = LoyaltyLevel::from_points(total);
    match tx.find_one::<LevelUser>(|l| l.user_id == *user_id)? {
        Some(mut row) => {
            row.level = level;
            tx.update(&row)?;
        }
        None => {
            tx.insert(&LevelUser {
                id: LevelUserId::generate(),
                user_id: user_id.clone(),
                level,
            })?;
        }
    }

    Ok(level)
}

/// The user's current point balance; 0 when no row exists yet.
pub fn points_of(tx: &Transaction, user_id: &UserId) -> Result<i64, CommerceError> {
    Ok(tx
        .find_one::<PointPurchase>(|p| p.user_id == *user_id)?
        .map(|p| p.point)
        .unwrap_or(0))
}

/// The user's current level; NORMAL when no row exists yet.
pub fn level_of(tx: &Transaction, user_id: &UserId) -> Result<LoyaltyLevel, CommerceError> {
    Ok(tx
        .find_one::<LevelUser>(|l| l.user_id == *user_id)?
        .map(|l| l.level)
        .unwrap_or_default())
}
