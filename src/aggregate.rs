use crate::model::Donor;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: u64,
    pub count: usize,
}

impl Totals {
    /// Over the canonical list only; search and reveal state never feed in.
    pub fn from_donors(donors: &[Donor]) -> Totals {
        Totals {
            total: donors.iter().fold(0u64, |acc, d| acc.saturating_add(d.amount)),
            count: donors.len(),
        }
    }
}

/// Linear count-up from 0 to `target` over `duration`. Cosmetic only.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    pub target: u64,
    pub duration: Duration,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() {
            return self.target;
        }
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        (self.target as f64 * progress).round() as u64
    }
}
