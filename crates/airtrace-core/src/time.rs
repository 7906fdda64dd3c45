//! Time axis for tick-based charting
//!
//! Two counters advance once per scan:
//! - `x_value` - the horizontal position of the next point, never capped
//! - `scan_count` - how many scans the chart holds, frozen at a ceiling

use crate::Error;
use serde::{Deserialize, Serialize};

/// A discrete tick identifier (one scan)
pub type Tick = u64;

/// Horizontal axis state for one chart session
///
/// Deserialized values are checked: `scan_count` must not exceed a non-zero
/// `max_scan_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AxisState")]
pub struct TimeAxis {
    x_value: Tick,
    scan_count: u32,
    max_scan_count: u32,
}

impl TimeAxis {
    /// Create an axis at tick zero
    pub fn new(max_scan_count: u32) -> Self {
        Self {
            x_value: 0,
            scan_count: 0,
            max_scan_count,
        }
    }

    /// Advance to the next tick
    ///
    /// `x_value` always moves; `scan_count` stops at the ceiling.
    pub fn advance(&mut self) {
        self.x_value += 1;
        if self.scan_count < self.max_scan_count {
            self.scan_count += 1;
        }
    }

    /// Number of ticks processed so far
    pub fn x_value(&self) -> Tick {
        self.x_value
    }

    /// Scans counted so far, capped at `max_scan_count`
    pub fn scan_count(&self) -> u32 {
        self.scan_count
    }

    pub fn max_scan_count(&self) -> u32 {
        self.max_scan_count
    }

    /// Override the scan counter, clamped to the ceiling
    pub fn set_scan_count(&mut self, scan_count: u32) {
        self.scan_count = scan_count.min(self.max_scan_count);
    }

    /// Whether horizontal labels carry information (two or more points)
    pub fn labels_visible(&self) -> bool {
        self.scan_count > 1
    }

    /// The x-range currently scrolled into view
    pub fn window(&self) -> (Tick, Tick) {
        (
            self.x_value.saturating_sub(self.max_scan_count as Tick),
            self.x_value,
        )
    }
}

/// Unchecked wire form of [`TimeAxis`]
#[derive(Deserialize)]
struct AxisState {
    x_value: Tick,
    scan_count: u32,
    max_scan_count: u32,
}

impl TryFrom<AxisState> for TimeAxis {
    type Error = Error;

    fn try_from(state: AxisState) -> Result<Self, Self::Error> {
        if state.max_scan_count == 0 {
            return Err(Error::InvalidConfig(
                "max_scan_count must be at least 1".to_string(),
            ));
        }
        if state.scan_count > state.max_scan_count {
            return Err(Error::InvalidConfig(format!(
                "scan_count {} exceeds max_scan_count {}",
                state.scan_count, state.max_scan_count
            )));
        }
        Ok(Self {
            x_value: state.x_value,
            scan_count: state.scan_count,
            max_scan_count: state.max_scan_count,
        })
    }
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self::new(crate::config::MAX_SCAN_COUNT)
    }
}
