//! Per-day dashboard series over a trailing window.
//!
//! Buckets are built for every day of the window, zero-filled, ending at
//! `today`. Orders dated outside the window are ignored.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_orders::{PersistedPurchaseOrder, PersistedSalesOrder};

use crate::aggregate::Dated;

/// Order counts for one day of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub purchase_count: u32,
    pub sales_count: u32,
}

impl DayBucket {
    pub fn total(&self) -> u32 {
        self.purchase_count + self.sales_count
    }
}

/// Sales revenue for one day of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

fn window(range_days: u32, today: NaiveDate) -> Vec<NaiveDate> {
    let range_days = range_days.max(1);
    (0..range_days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .collect()
}

/// Purchase + sales order counts per day over the last `range_days` days.
pub fn orders_per_day(
    purchase_orders: &[PersistedPurchaseOrder],
    sales_orders: &[PersistedSalesOrder],
    range_days: u32,
    today: NaiveDate,
) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = window(range_days, today)
        .into_iter()
        .map(|date| DayBucket {
            date,
            purchase_count: 0,
            sales_count: 0,
        })
        .collect();

    for order in purchase_orders {
        let Some(date) = order.effective_date() else {
            continue;
        };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
            bucket.purchase_count += 1;
        }
    }

    for order in sales_orders {
        let Some(date) = order.effective_date() else {
            continue;
        };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
            bucket.sales_count += 1;
        }
    }

    buckets
}

/// Sales revenue per day (sum of `total_amount`) over the window.
pub fn revenue_per_day(
    sales_orders: &[PersistedSalesOrder],
    range_days: u32,
    today: NaiveDate,
) -> Vec<RevenuePoint> {
    let mut points: Vec<RevenuePoint> = window(range_days, today)
        .into_iter()
        .map(|date| RevenuePoint {
            date,
            revenue: Decimal::ZERO,
        })
        .collect();

    for order in sales_orders {
        let Some(date) = order.effective_date() else {
            continue;
        };
        if let Some(point) = points.iter_mut().find(|p| p.date == date) {
            point.revenue += order.total_amount;
        }
    }

    points
}
