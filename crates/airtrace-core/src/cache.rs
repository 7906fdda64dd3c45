//! Grace cache trait for series that are vanishing from the chart
//!
//! The engine registers every series that disappeared on a tick with
//! [`GraceCache::add`], commits the batch with [`GraceCache::clear`], and
//! marks every series seen on the tick with [`GraceCache::reset`]. How long an
//! entry stays in [`GraceCache::active`] is up to the implementation.

use crate::{Detail, Result};
use std::collections::BTreeSet;

/// Bookkeeping for series in their vanishing window.
pub trait GraceCache {
    /// Details currently vanishing but still within their grace period.
    fn active(&self) -> Result<BTreeSet<Detail>>;

    /// Record that `detail` was not seen on this tick.
    fn add(&mut self, detail: &Detail) -> Result<()>;

    /// Record that `detail` was seen on this tick.
    fn reset(&mut self, detail: &Detail) -> Result<()>;

    /// Commit the tick's batch, expiring whatever the policy says is done.
    fn clear(&mut self) -> Result<()>;
}
