//! In-memory chart surface
//!
//! Series are stored in a slot vector and looked up through an index keyed by
//! [`DetailKey`]. Callers only see read-only views; mutation goes through the
//! [`ChartSurface`] commands.

use crate::palette::{Color, ColorPalette};
use airtrace_core::{ChartSurface, DataPoint, Detail, DetailKey, Error, Result};
use indexmap::IndexMap;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Index of a series slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesHandle(usize);

/// One drawn series
#[derive(Debug, Clone)]
pub struct Series {
    detail: Detail,
    color: Color,
    points: VecDeque<DataPoint>,
    highlighted: bool,
}

impl Series {
    /// Last detail recorded for this series
    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    pub fn title(&self) -> String {
        self.detail.title()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Points oldest first
    pub fn points(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<DataPoint> {
        self.points.back().copied()
    }

    /// Flag passed with the most recent point
    pub fn highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Chart surface holding one series per detail identity
#[derive(Debug, Default)]
pub struct SeriesChart {
    handles: IndexMap<DetailKey, SeriesHandle>,
    slots: Vec<Option<Series>>,
    free: Vec<usize>,
    palette: ColorPalette,
    horizontal_labels_visible: bool,
}

impl SeriesChart {
    /// Create an empty chart with the default palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chart with a custom palette
    pub fn with_palette(palette: ColorPalette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Look up a series by identity
    pub fn series(&self, key: &DetailKey) -> Option<&Series> {
        let handle = self.handles.get(key)?;
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// All series in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.handles
            .values()
            .filter_map(|h| self.slots.get(h.0).and_then(Option::as_ref))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn horizontal_labels_visible(&self) -> bool {
        self.horizontal_labels_visible
    }

    fn series_mut(&mut self, key: &DetailKey) -> Result<&mut Series> {
        let handle = self
            .handles
            .get(key)
            .copied()
            .ok_or_else(|| Error::SeriesNotFound(key.clone()))?;
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::SeriesNotFound(key.clone()))
    }

    fn insert(&mut self, series: Series) -> SeriesHandle {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(series);
                SeriesHandle(index)
            }
            None => {
                self.slots.push(Some(series));
                SeriesHandle(self.slots.len() - 1)
            }
        }
    }

    fn remove(&mut self, key: &DetailKey) -> Option<Series> {
        let handle = self.handles.shift_remove(key)?;
        let series = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        self.palette.release(series.color);
        Some(series)
    }
}

impl ChartSurface for SeriesChart {
    fn is_new_series(&self, detail: &Detail) -> Result<bool> {
        Ok(!self.handles.contains_key(&detail.key))
    }

    fn difference_series(&self, details: &BTreeSet<Detail>) -> Result<BTreeSet<Detail>> {
        let keys: BTreeSet<&DetailKey> = details.iter().map(|d| &d.key).collect();
        Ok(self
            .iter()
            .filter(|s| !keys.contains(&s.detail.key))
            .map(|s| s.detail.clone())
            .collect())
    }

    fn append_to_series(
        &mut self,
        detail: &Detail,
        point: DataPoint,
        point_count: u32,
        is_new_series: bool,
    ) -> Result<()> {
        let series = self.series_mut(&detail.key)?;
        series.detail = detail.clone();
        series.points.push_back(point);
        let max_points = point_count as usize + 1;
        while series.points.len() > max_points {
            series.points.pop_front();
        }
        series.highlighted = is_new_series;
        Ok(())
    }

    fn add_series(&mut self, detail: &Detail, point: DataPoint, is_new_series: bool) -> Result<()> {
        if self.handles.contains_key(&detail.key) {
            return Err(Error::DuplicateSeries(detail.key.clone()));
        }
        let color = self.palette.take();
        let series = Series {
            detail: detail.clone(),
            color,
            points: VecDeque::from([point]),
            highlighted: is_new_series,
        };
        let handle = self.insert(series);
        self.handles.insert(detail.key.clone(), handle);
        debug!(series = %detail.key, %color, "series added");
        Ok(())
    }

    fn set_horizontal_labels_visible(&mut self, visible: bool) -> Result<()> {
        self.horizontal_labels_visible = visible;
        Ok(())
    }

    fn retain_series(&mut self, keep: &BTreeSet<Detail>) -> Result<BTreeSet<DetailKey>> {
        let keep: BTreeSet<&DetailKey> = keep.iter().map(|d| &d.key).collect();
        let removed: BTreeSet<DetailKey> = self
            .handles
            .keys()
            .filter(|k| !keep.contains(k))
            .cloned()
            .collect();
        for key in &removed {
            self.remove(key);
            debug!(series = %key, "series removed");
        }
        Ok(removed)
    }
}
