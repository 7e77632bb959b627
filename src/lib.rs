//! pane-rs: indicator pane rendering and synchronization engine.
//!
//! This crate turns a computed indicator's raw time series plus display
//! metadata into concrete drawable elements (colored line/histogram series,
//! reference price lines, legend values), keeps those elements stable and
//! leak-free across repeated re-renders, and keeps an arbitrary set of
//! secondary chart panes scrolling and zooming in lockstep with a primary
//! price chart. The concrete charting backend stays behind the
//! [`surface::DrawingSurface`] seam.

pub mod core;
pub mod error;
pub mod indicator;
pub mod lifecycle;
pub mod pane;
pub mod surface;
pub mod sync;
pub mod telemetry;

pub use error::{PaneError, PaneResult};
pub use pane::IndicatorPane;
pub use sync::TimeScaleSynchronizer;
