//! Rolling month window for the trend chart.
//!
//! The window is centered on a target month and always has `2 * half_width + 1`
//! points. A month without entries reports `None`, which the chart draws as a
//! gap; an exact zero net still reports `Some(0.0)`.

use moneybook_domain::{LedgerEntry, YearMonth};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_HALF_WIDTH: usize = 2;
pub const MAX_HALF_WIDTH: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollingWindowPoint {
    pub label: String,
    pub month: YearMonth,
    pub value: Option<f64>,
    pub is_current_period: bool,
}

impl RollingWindowPoint {
    pub fn empty(month: YearMonth, is_current_period: bool) -> Self {
        Self {
            label: month.label(),
            month,
            value: None,
            is_current_period,
        }
    }
}

/// A bounded list of points ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollingWindow {
    points: Vec<RollingWindowPoint>,
}

impl RollingWindow {
    pub fn capacity_for(half_width: usize) -> usize {
        2 * half_width + 1
    }

    /// Accepts a caller-built point list. Anything past `capacity` is dropped
    /// with a warning; the chart is hard-limited to its width.
    pub fn from_points(mut points: Vec<RollingWindowPoint>, capacity: usize) -> Self {
        if points.len() > capacity {
            warn!(
                "rolling window holds at most {capacity} points, got {}; truncating",
                points.len()
            );
            points.truncate(capacity);
        }
        Self { points }
    }

    pub fn points(&self) -> &[RollingWindowPoint] {
        &self.points
    }

    pub fn current(&self) -> Option<&RollingWindowPoint> {
        self.points.iter().find(|point| point.is_current_period)
    }

    /// Smallest and largest present values, used to scale the chart.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|point| point.value)
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((low, high)) => Some((low.min(value), high.max(value))),
            })
    }
}

/// Sums signed amounts into the months around `target`, oldest first.
/// A `half_width` above [`MAX_HALF_WIDTH`] is clamped with a warning.
pub fn statistics_by_month(
    entries: &[LedgerEntry],
    target: YearMonth,
    half_width: usize,
) -> Vec<RollingWindowPoint> {
    let half_width = if half_width > MAX_HALF_WIDTH {
        warn!("window half width {half_width} unsupported; clamping to {MAX_HALF_WIDTH}");
        MAX_HALF_WIDTH
    } else {
        half_width
    };

    let span = half_width as i32;
    let mut points: Vec<RollingWindowPoint> = (-span..=span)
        .map(|offset| RollingWindowPoint::empty(target.shift(offset), offset == 0))
        .collect();
    let first = target.shift(-span);

    for entry in entries {
        let index = entry.month().months_since(first);
        if !(0..points.len() as i64).contains(&index) {
            continue;
        }
        let slot = &mut points[index as usize].value;
        *slot = Some(slot.unwrap_or(0.0) + entry.amount);
    }

    points
}
