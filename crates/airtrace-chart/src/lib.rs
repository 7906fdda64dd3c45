//! Airtrace Chart - In-memory chart surface and session driver
//!
//! This crate provides:
//! - `SeriesChart` - a `ChartSurface` keeping one scrolling series per identity
//! - `ColorPalette` - colors handed out to series and recycled on removal
//! - `TimeGraph` - engine, grace cache and chart wired into one session
//!
//! # Example
//!
//! ```rust
//! use airtrace_chart::TimeGraph;
//! use airtrace_core::Detail;
//!
//! let mut graph = TimeGraph::default();
//! graph.update([Detail::new("home", "aa:bb", -48)]).unwrap();
//! graph.update([Detail::new("home", "aa:bb", -51)]).unwrap();
//!
//! assert_eq!(graph.chart().len(), 1);
//! assert!(graph.chart().horizontal_labels_visible());
//! ```

mod chart;
mod graph;
mod palette;

pub use chart::{Series, SeriesChart, SeriesHandle};
pub use graph::TimeGraph;
pub use palette::{Color, ColorPalette};
