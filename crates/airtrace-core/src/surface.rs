//! Chart surface trait - the owner of drawn series
//!
//! This trait is used by:
//! - [`SeriesReconciler`](crate::SeriesReconciler), which only queries and
//!   commands the surface and never holds references into it
//! - `airtrace-chart` for the in-memory `SeriesChart`
//!
//! # Example
//!
//! ```rust,ignore
//! use airtrace_core::{ChartSurface, DataPoint, Detail, Result};
//! use std::collections::BTreeSet;
//!
//! struct PrintSurface {
//!     drawn: BTreeSet<Detail>,
//! }
//!
//! impl ChartSurface for PrintSurface {
//!     fn is_new_series(&self, detail: &Detail) -> Result<bool> {
//!         Ok(!self.drawn.contains(detail))
//!     }
//!
//!     fn add_series(&mut self, detail: &Detail, point: DataPoint, _: bool) -> Result<()> {
//!         println!("new series {} at {}", detail.title(), point);
//!         self.drawn.insert(detail.clone());
//!         Ok(())
//!     }
//!
//!     // ... other methods
//! }
//! ```

use crate::{DataPoint, Detail, DetailKey, Result};
use std::collections::BTreeSet;

/// A surface that draws one series per [`DetailKey`].
///
/// Every method may fail; the engine propagates those failures unchanged.
pub trait ChartSurface {
    /// Whether no series is drawn for this detail yet.
    fn is_new_series(&self, detail: &Detail) -> Result<bool>;

    /// Drawn series that are not in `details`.
    fn difference_series(&self, details: &BTreeSet<Detail>) -> Result<BTreeSet<Detail>>;

    /// Append a point to an existing series.
    ///
    /// `point_count` is the number of scans the chart currently holds, which
    /// bounds how far back the series keeps points.
    fn append_to_series(
        &mut self,
        detail: &Detail,
        point: DataPoint,
        point_count: u32,
        is_new_series: bool,
    ) -> Result<()>;

    /// Create a series starting at `point`.
    fn add_series(&mut self, detail: &Detail, point: DataPoint, is_new_series: bool) -> Result<()>;

    /// Show or hide the horizontal axis labels.
    fn set_horizontal_labels_visible(&mut self, visible: bool) -> Result<()>;

    /// Drop every series not in `keep`, returning the removed keys.
    fn retain_series(&mut self, keep: &BTreeSet<Detail>) -> Result<BTreeSet<DetailKey>>;
}
