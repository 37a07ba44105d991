//! Resource pools (HP, SP)
//!
//! Only the current value is stored; the maximum is always derived from the
//! owning [`StatBlock`](crate::StatBlock) and passed in.

use serde::{Deserialize, Serialize};

/// Current value of a regenerating resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    current: f64,
}

impl ResourcePool {
    /// Create a pool filled to `max`
    pub fn full(max: f64) -> Self {
        ResourcePool { current: max.max(0.0) }
    }

    /// Current value, never above `max`
    pub fn current(&self, max: f64) -> f64 {
        self.current.min(max).max(0.0)
    }

    /// Restore a flat amount, capped at `max`
    pub fn restore(&mut self, amount: f64, max: f64) {
        self.current = (self.current(max) + amount.max(0.0)).min(max);
    }

    /// Restore a percentage (0-100) of `max`
    pub fn restore_percentage_max(&mut self, percentage: f64, max: f64) {
        self.restore(max * percentage / 100.0, max);
    }

    /// Spend or lose `amount`, flooring at zero
    pub fn consume(&mut self, amount: f64, max: f64) {
        self.current = (self.current(max) - amount.max(0.0)).max(0.0);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}
