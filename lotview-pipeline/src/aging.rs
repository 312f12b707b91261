//! Aging cohorts, new arrivals, oldest units and KPI counts.
//!
//! In-transit units are excluded from every bucket and from the
//! percentage denominator.

use serde::Serialize;

use crate::components::oldest_units_selector::OldestUnitsSelector;
use crate::selector::Selector;
use crate::types::{AgingBucket, InventoryKpis, InventoryRow};

/// Count of one aging bucket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketCount {
    pub bucket: AgingBucket,
    pub count: usize,
    /// Share of on-lot units, 0.0–100.0.
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgingSummary {
    /// One entry per bucket, youngest first.
    pub buckets: Vec<BucketCount>,
    pub on_lot_total: usize,
}

impl AgingSummary {
    pub fn count(&self, bucket: AgingBucket) -> usize {
        self.buckets
            .iter()
            .find(|b| b.bucket == bucket)
            .map(|b| b.count)
            .unwrap_or(0)
    }
}

/// Bucket for a row, or `None` when it is in transit.
pub fn classify(row: &InventoryRow) -> Option<AgingBucket> {
    if row.is_in_transit() {
        None
    } else {
        Some(AgingBucket::for_age(row.age))
    }
}

pub fn aging_summary(rows: &[InventoryRow]) -> AgingSummary {
    let mut counts = [0usize; 4];
    for bucket in rows.iter().filter_map(classify) {
        counts[bucket as usize] += 1;
    }
    let on_lot_total: usize = counts.iter().sum();

    let buckets = AgingBucket::ALL
        .into_iter()
        .map(|bucket| {
            let count = counts[bucket as usize];
            let percent = if on_lot_total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / on_lot_total as f64
            };
            BucketCount {
                bucket,
                count,
                percent,
            }
        })
        .collect();

    AgingSummary {
        buckets,
        on_lot_total,
    }
}

/// On-lot rows in one bucket, input order preserved.
pub fn rows_in_bucket(rows: &[InventoryRow], bucket: AgingBucket) -> Vec<InventoryRow> {
    rows.iter()
        .filter(|row| classify(row) == Some(bucket))
        .cloned()
        .collect()
}

/// On-lot rows no older than `max_age` days.
pub fn new_arrivals(rows: &[InventoryRow], max_age: u32) -> Vec<InventoryRow> {
    rows.iter()
        .filter(|row| !row.is_in_transit() && row.age <= max_age)
        .cloned()
        .collect()
}

/// The `limit` oldest on-lot rows with a positive age, oldest first.
pub fn oldest_units(rows: &[InventoryRow], limit: usize) -> Vec<InventoryRow> {
    let candidates: Vec<InventoryRow> = rows
        .iter()
        .filter(|row| !row.is_in_transit() && row.age > 0)
        .cloned()
        .collect();
    OldestUnitsSelector { limit }.select(candidates)
}

/// Headline counts over the whole snapshot.
///
/// `in_stock` counts on-lot rows directly; with a two-state lot status
/// it always equals `total_vehicles - in_transit`.
pub fn compute_kpis(rows: &[InventoryRow], new_arrival_days: u32) -> InventoryKpis {
    let in_transit = rows.iter().filter(|r| r.is_in_transit()).count();
    let on_lot: Vec<&InventoryRow> = rows.iter().filter(|r| !r.is_in_transit()).collect();
    let average_age = if on_lot.is_empty() {
        0.0
    } else {
        on_lot.iter().map(|r| r.age as f64).sum::<f64>() / on_lot.len() as f64
    };

    InventoryKpis {
        total_vehicles: rows.len(),
        in_stock: on_lot.len(),
        in_transit,
        new_arrivals: on_lot.iter().filter(|r| r.age <= new_arrival_days).count(),
        average_age,
        total_msrp: rows.iter().map(|r| r.msrp).sum(),
    }
}
