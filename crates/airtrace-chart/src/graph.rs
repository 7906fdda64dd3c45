//! TimeGraph - one chart session driven by scan snapshots
//!
//! Execution flow per scan:
//! 1. Collect the scan into an ordered set (first detail per identity wins)
//! 2. Reconcile the chart against the set
//! 3. Work out what should stay on screen (visible plus vanishing in grace)
//! 4. Drop every other series from the chart

use crate::SeriesChart;
use airtrace_core::{
    ChartSurface, Detail, DetailKey, EngineConfig, GraceCache, Result, SeriesReconciler, Tick,
};
use airtrace_grace::{GraceConfig, NotSeenCache};
use std::collections::BTreeSet;
use tracing::debug;

/// A chart session: engine, grace cache and chart surface together
#[derive(Debug)]
pub struct TimeGraph<C: GraceCache = NotSeenCache> {
    engine: SeriesReconciler<C>,
    chart: SeriesChart,
}

impl TimeGraph<NotSeenCache> {
    /// Create a session using [`NotSeenCache`]
    ///
    /// Fails with `Error::InvalidConfig` if `engine_config` does not validate.
    pub fn new(engine_config: EngineConfig, grace_config: GraceConfig) -> Result<Self> {
        Self::with_cache(NotSeenCache::new(grace_config), engine_config)
    }
}

impl Default for TimeGraph<NotSeenCache> {
    fn default() -> Self {
        Self {
            engine: SeriesReconciler::new(NotSeenCache::default()),
            chart: SeriesChart::new(),
        }
    }
}

impl<C: GraceCache> TimeGraph<C> {
    /// Create a session with any grace cache
    pub fn with_cache(cache: C, engine_config: EngineConfig) -> Result<Self> {
        Ok(Self {
            engine: SeriesReconciler::with_config(cache, engine_config)?,
            chart: SeriesChart::new(),
        })
    }

    /// Feed one scan, returning the series that left the chart
    pub fn update(&mut self, details: impl IntoIterator<Item = Detail>) -> Result<BTreeSet<DetailKey>> {
        // Explicit inserts keep the first detail per identity
        let mut current = BTreeSet::new();
        for detail in details {
            current.insert(detail);
        }
        self.engine.process_tick(&mut self.chart, &current)?;
        let keep = self.engine.new_series(&current)?;
        let removed = self.chart.retain_series(&keep)?;
        if !removed.is_empty() {
            debug!(
                removed = removed.len(),
                remaining = self.chart.len(),
                "series left the chart"
            );
        }
        Ok(removed)
    }

    pub fn chart(&self) -> &SeriesChart {
        &self.chart
    }

    pub fn engine(&self) -> &SeriesReconciler<C> {
        &self.engine
    }

    pub fn x_value(&self) -> Tick {
        self.engine.x_value()
    }

    pub fn scan_count(&self) -> u32 {
        self.engine.scan_count()
    }

    /// The x-range currently scrolled into view
    pub fn visible_window(&self) -> (Tick, Tick) {
        self.engine.axis().window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtrace_core::{DataPoint, Error};
    use airtrace_grace::SeriesState;

    fn detail(ssid: &str, level: i32) -> Detail {
        Detail::new(ssid, "BSSID", level)
    }

    fn key(ssid: &str) -> DetailKey {
        DetailKey::new(ssid, "BSSID")
    }

    fn points(graph: &TimeGraph, ssid: &str) -> Vec<DataPoint> {
        graph
            .chart()
            .series(&key(ssid))
            .map(|s| s.points().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_first_scan_creates_series() {
        let mut graph = TimeGraph::default();

        let removed = graph
            .update([detail("A", -40), detail("B", -50), detail("C", -60)])
            .unwrap();

        assert!(removed.is_empty());
        assert_eq!(graph.chart().len(), 3);
        assert_eq!(graph.x_value(), 1);
        assert_eq!(graph.scan_count(), 1);
        assert!(!graph.chart().horizontal_labels_visible());
        assert_eq!(points(&graph, "B"), vec![DataPoint::new(0, -50)]);
    }

    #[test]
    fn test_second_scan_shows_labels() {
        let mut graph = TimeGraph::default();
        graph.update([detail("A", -40)]).unwrap();
        graph.update([detail("A", -42)]).unwrap();

        assert!(graph.chart().horizontal_labels_visible());
        assert_eq!(
            points(&graph, "A"),
            vec![DataPoint::new(0, -40), DataPoint::new(1, -42)]
        );
    }

    #[test]
    fn test_duplicate_details_collapse() {
        let mut graph = TimeGraph::default();
        graph.update([detail("A", -40), detail("A", -70)]).unwrap();

        assert_eq!(graph.chart().len(), 1);
        assert_eq!(points(&graph, "A"), vec![DataPoint::new(0, -40)]);
    }

    #[test]
    fn test_first_duplicate_wins_in_any_order() {
        let scans = [
            vec![detail("A", -40), detail("A", -70), detail("A", -55), detail("B", -60)],
            vec![detail("B", -60), detail("A", -40), detail("A", -55), detail("A", -70)],
            vec![detail("A", -40), detail("B", -60), detail("A", -70), detail("A", -55)],
        ];
        for scan in scans {
            let mut graph = TimeGraph::default();
            graph.update(scan).unwrap();

            assert_eq!(graph.chart().len(), 2);
            assert_eq!(points(&graph, "A"), vec![DataPoint::new(0, -40)]);
            assert_eq!(
                graph.chart().series(&key("A")).map(|s| s.detail().level),
                Some(-40)
            );
        }
    }

    #[test]
    fn test_invalid_engine_config_rejected() {
        let config = EngineConfig {
            min_y_offset: -5,
            ..EngineConfig::default()
        };
        let err = TimeGraph::new(config, GraceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let config = EngineConfig {
            max_scan_count: 0,
            ..EngineConfig::default()
        };
        assert!(TimeGraph::new(config, GraceConfig::default()).is_err());
    }

    #[test]
    fn test_vanished_series_trails_then_leaves() {
        let mut graph = TimeGraph::new(EngineConfig::default(), GraceConfig::bounded(1)).unwrap();
        graph.update([detail("A", -40), detail("B", -50)]).unwrap();

        let removed = graph.update([detail("A", -40)]).unwrap();
        assert!(removed.is_empty());
        assert_eq!(
            points(&graph, "B"),
            vec![DataPoint::new(0, -50), DataPoint::new(1, -99)]
        );
        assert_eq!(
            graph.engine().cache().state(&key("B")),
            Some(SeriesState::Vanishing { not_seen: 1 })
        );

        let removed = graph.update([detail("A", -40)]).unwrap();
        assert_eq!(removed, [key("B")].into_iter().collect());
        assert!(graph.chart().series(&key("B")).is_none());
        assert_eq!(graph.chart().len(), 1);
    }

    #[test]
    fn test_reappearing_series_continues() {
        let mut graph = TimeGraph::new(EngineConfig::default(), GraceConfig::bounded(5)).unwrap();
        graph.update([detail("A", -40), detail("B", -50)]).unwrap();
        graph.update([detail("A", -40)]).unwrap();
        graph.update([detail("A", -40), detail("B", -55)]).unwrap();

        assert_eq!(
            points(&graph, "B"),
            vec![
                DataPoint::new(0, -50),
                DataPoint::new(1, -99),
                DataPoint::new(2, -55),
            ]
        );
        assert_eq!(
            graph.engine().cache().state(&key("B")),
            Some(SeriesState::Active)
        );
    }

    #[test]
    fn test_series_recreated_after_expiry() {
        let mut graph = TimeGraph::new(EngineConfig::default(), GraceConfig::bounded(0)).unwrap();
        graph.update([detail("A", -40)]).unwrap();
        let removed = graph.update(Vec::new()).unwrap();
        assert_eq!(removed, [key("A")].into_iter().collect());

        graph.update([detail("A", -45)]).unwrap();
        assert_eq!(points(&graph, "A"), vec![DataPoint::new(2, -45)]);
    }

    #[test]
    fn test_points_bounded_by_scan_ceiling() {
        let config = EngineConfig {
            max_scan_count: 4,
            ..EngineConfig::default()
        };
        let mut graph = TimeGraph::new(config, GraceConfig::default()).unwrap();
        for _ in 0..20 {
            graph.update([detail("A", -40)]).unwrap();
        }

        assert_eq!(graph.x_value(), 20);
        assert_eq!(graph.scan_count(), 4);
        assert_eq!(points(&graph, "A").len(), 5);
        assert_eq!(graph.visible_window(), (16, 20));
    }

    #[test]
    fn test_empty_scans_only_advance_axis() {
        let mut graph = TimeGraph::default();
        for _ in 0..3 {
            assert!(graph.update(Vec::new()).unwrap().is_empty());
        }
        assert!(graph.chart().is_empty());
        assert_eq!(graph.x_value(), 3);
        assert_eq!(graph.scan_count(), 3);
    }
}
