//! Airtrace Core - Reconciliation engine for scrolling signal charts
//!
//! This crate provides the core types and the per-tick engine:
//! - Series identity (`DetailKey`) and scanned details (`Detail`)
//! - Plotted points (`DataPoint`) and the time axis (`TimeAxis`)
//! - Collaborator traits for the chart surface and the grace cache
//! - `SeriesReconciler`, which keeps a chart in step with scan snapshots
//!
//! ## Collaborators
//!
//! The engine owns no drawn series. It talks to:
//! - `ChartSurface` - answers "is this a new series?" and "which drawn series
//!   are missing from this scan?", and accepts point/series commands
//! - `GraceCache` - remembers which series are vanishing and for how long
//!
//! Concrete implementations live in `airtrace-chart` and `airtrace-grace`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use airtrace_core::{Detail, SeriesReconciler};
//! use airtrace_chart::SeriesChart;
//! use airtrace_grace::NotSeenCache;
//!
//! let mut engine = SeriesReconciler::new(NotSeenCache::default());
//! let mut chart = SeriesChart::new();
//! let scan = [Detail::new("home", "aa:bb:cc:dd:ee:ff", -52)].into_iter().collect();
//! engine.process_tick(&mut chart, &scan)?;
//! ```

mod cache;
mod config;
pub mod engine;
mod error;
mod identity;
mod surface;
pub mod time;

pub use cache::GraceCache;
pub use config::{EngineConfig, MAX_SCAN_COUNT, MIN_Y, MIN_Y_OFFSET};
pub use engine::SeriesReconciler;
pub use error::{Error, Result};
pub use identity::{DataPoint, Detail, DetailKey};
pub use surface::ChartSurface;
pub use time::{Tick, TimeAxis};
