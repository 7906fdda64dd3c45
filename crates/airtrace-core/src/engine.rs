//! Per-tick series reconciliation
//!
//! Keeps a chart surface in step with a stream of scan snapshots. Each tick:
//!
//! ```text
//!  scan ──▶ difference_series ──▶ terminal point + cache.add  (vanished)
//!                                        │
//!                                   cache.clear
//!                                        │
//!  scan ──▶ is_new_series ──▶ append or add_series + cache.reset  (current)
//!                                        │
//!                         axis.advance ──▶ horizontal labels
//! ```

use crate::{ChartSurface, DataPoint, Detail, EngineConfig, GraceCache, Result, Tick, TimeAxis};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Reconciliation engine for one chart session
///
/// Owns the axis counters and the grace cache. The chart surface is passed in
/// on every call so the engine never holds on to drawn series.
#[derive(Debug)]
pub struct SeriesReconciler<C: GraceCache> {
    cache: C,
    axis: TimeAxis,
    config: EngineConfig,
}

impl<C: GraceCache> SeriesReconciler<C> {
    /// Create an engine with the default configuration
    pub fn new(cache: C) -> Self {
        let config = EngineConfig::default();
        Self {
            cache,
            axis: TimeAxis::new(config.max_scan_count),
            config,
        }
    }

    /// Create an engine with the given configuration
    ///
    /// Fails with `Error::InvalidConfig` if the configuration does not
    /// validate.
    pub fn with_config(cache: C, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache,
            axis: TimeAxis::new(config.max_scan_count),
            config,
        })
    }

    /// Process one scan snapshot
    ///
    /// Series that disappeared trail to the floor, visible series get a new
    /// point or a new series, then the axis advances. Collaborator failures
    /// are returned as-is and leave the axis where it was.
    pub fn process_tick<S>(&mut self, surface: &mut S, current: &BTreeSet<Detail>) -> Result<()>
    where
        S: ChartSurface + ?Sized,
    {
        let vanished = self.adjust_data(surface, current)?;

        let mut created = 0usize;
        for detail in current {
            if self.add_data(surface, detail)? {
                created += 1;
            }
        }

        self.axis.advance();
        if self.axis.labels_visible() {
            surface.set_horizontal_labels_visible(true)?;
        }

        debug!(
            x_value = self.axis.x_value(),
            scan_count = self.axis.scan_count(),
            vanished,
            appended = current.len() - created,
            created,
            "processed tick"
        );
        Ok(())
    }

    /// Everything that should be on screen: `current` plus the vanishing
    /// series still in their grace period
    ///
    /// Entries of `current` win over cached entries with the same identity.
    pub fn new_series(&self, current: &BTreeSet<Detail>) -> Result<BTreeSet<Detail>> {
        let mut series = current.clone();
        series.extend(self.cache.active()?);
        Ok(series)
    }

    /// Trail every series missing from `current` towards the floor
    fn adjust_data<S>(&mut self, surface: &mut S, current: &BTreeSet<Detail>) -> Result<usize>
    where
        S: ChartSurface + ?Sized,
    {
        let difference = surface.difference_series(current)?;
        let point = DataPoint::new(self.axis.x_value(), self.config.floor());
        for detail in &difference {
            trace!(series = %detail.key, "series vanishing");
            surface.append_to_series(detail, point, self.axis.scan_count(), false)?;
            self.cache.add(detail)?;
        }
        self.cache.clear()?;
        Ok(difference.len())
    }

    /// Plot one visible detail, returning whether a series was created
    fn add_data<S>(&mut self, surface: &mut S, detail: &Detail) -> Result<bool>
    where
        S: ChartSurface + ?Sized,
    {
        let point = DataPoint::new(self.axis.x_value(), detail.level);
        let created = surface.is_new_series(detail)?;
        if created {
            trace!(series = %detail.key, level = detail.level, "series created");
            surface.add_series(detail, point, true)?;
        } else {
            surface.append_to_series(detail, point, self.axis.scan_count(), false)?;
        }
        self.cache.reset(detail)?;
        Ok(created)
    }

    /// Ticks processed so far
    pub fn x_value(&self) -> Tick {
        self.axis.x_value()
    }

    /// Scans counted so far, capped at the configured ceiling
    pub fn scan_count(&self) -> u32 {
        self.axis.scan_count()
    }

    /// Override the scan counter, clamped to the ceiling
    pub fn set_scan_count(&mut self, scan_count: u32) {
        self.axis.set_scan_count(scan_count);
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get access to the grace cache
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Get mutable access to the grace cache
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }
}
