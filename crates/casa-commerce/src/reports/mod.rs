//! Reporting: best sellers and order volume over time.
//!
//! Windows are inclusive calendar-day ranges in UTC: orders created
//! between `start 00:00:00` and `end 23:59:59` are counted.

use std::collections::{HashMap, HashSet};

use casa_db::Store;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Book, Label};
use crate::ids::BookId;
use crate::orders::{Order, OrderDetail};
use crate::CommerceError;

/// Best-seller lists are truncated to this many entries.
const TOP_SELLERS_LIMIT: usize = 10;

/// One entry of the best-sellers report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestSeller {
    pub book: Book,
    pub total_quantity: i64,
    pub label: Option<Label>,
}

/// One day of the order-volume report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOrderCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// The top books by quantity sold within the window, descending,
/// truncated to ten.
pub fn best_sellers(
    store: &Store,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<BestSeller>, CommerceError> {
    let (window_start, window_end) = match window(start, end) {
        Some(window) => window,
        None => return Ok(Vec::new()),
    };

    store.read::<_, CommerceError, _>(|tx| {
        let orders = tx.find::<Order>(|o| {
            o.created_at >= window_start && o.created_at <= window_end
        })?;
        let in_window: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();

        let mut totals: HashMap<BookId, i64> = HashMap::new();
        for detail in tx.all::<OrderDetail>()? {
            if in_window.contains(detail.order_id.as_str()) {
                *totals.entry(detail.book_id).or_insert(0) += detail.quantity;
            }
        }

        let mut ranked: Vec<(BookId, i64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(TOP_SELLERS_LIMIT);

        let mut sellers = Vec::with_capacity(ranked.len());
        for (book_id, total_quantity) in ranked {
            let book: Book = match tx.get(book_id.as_str())? {
                Some(book) => book,
                // The book was deleted after the sale; skip it.
                None => continue,
            };
            let label = tx.get::<Label>(book.label_id.as_str())?;
            sellers.push(BestSeller {
                book,
                total_quantity,
                label,
            });
        }
        Ok(sellers)
    })
}

/// Orders created per calendar day, zero-filled across the whole window.
pub fn order_volume(
    store: &Store,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyOrderCount>, CommerceError> {
    if start > end {
        return Ok(Vec::new());
    }

    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for order in store.all::<Order>()? {
        if let Some(date) = DateTime::<Utc>::from_timestamp(order.created_at, 0) {
            *counts.entry(date.date_naive()).or_insert(0) += 1;
        }
    }

    let days = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| DailyOrderCount {
            count: counts.get(&date).copied().unwrap_or(0),
            date,
        })
        .collect();
    Ok(days)
}

/// The `[start 00:00:00, end 23:59:59]` window as unix timestamps.
fn window(start: NaiveDate, end: NaiveDate) -> Option<(i64, i64)> {
    if start > end {
        return None;
    }
    let from = start.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
    let to = end.and_hms_opt(23, 59, 59)?.and_utc().timestamp();
    Some((from, to))
}
