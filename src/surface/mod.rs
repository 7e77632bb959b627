pub mod recording;
pub mod snap;

pub use recording::{RecordedSeries, RecordingSurface, SurfaceOp};
pub use snap::nearest_timestamp;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{ChartDataPoint, Color, LineStyle, ValueRange, VisibleRange};
use crate::error::PaneResult;
use crate::indicator::DisplayType;

/// Native primitive family understood by a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Histogram,
}

impl From<DisplayType> for SeriesKind {
    fn from(display_type: DisplayType) -> Self {
        match display_type {
            DisplayType::Line => Self::Line,
            DisplayType::Histogram => Self::Histogram,
        }
    }
}

/// Opaque identity of one native series created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesHandle(u64);

impl SeriesHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque identity of one native price line attached to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceLineHandle(u64);

impl PriceLineHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Style options applied to a native series at create/update time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesOptions {
    pub color: Color,
    pub line_width: f64,
    pub visible: bool,
}

/// Options for one native price line.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLineOptions {
    pub value: f64,
    pub color: Color,
    pub label: Option<String>,
    pub line_style: LineStyle,
}

/// Contract implemented by the host's charting backend.
///
/// The engine never draws; it issues create/update/remove calls against this
/// seam and treats any failure as non-recoverable, propagating it to the
/// pane's caller.
///
/// Range-change notifications flow the other way: the trait carries no
/// subscription hook, so the host that owns the primary surface must forward
/// its backend's range-change events to
/// [`TimeScaleSynchronizer::on_primary_range_changed`](crate::sync::TimeScaleSynchronizer::on_primary_range_changed).
/// Secondary surfaces only ever receive [`set_visible_range`](Self::set_visible_range)
/// calls from that broadcast.
pub trait DrawingSurface {
    fn create_series(&mut self, kind: SeriesKind, options: &SeriesOptions)
    -> PaneResult<SeriesHandle>;
    fn update_series(&mut self, handle: SeriesHandle, options: &SeriesOptions) -> PaneResult<()>;
    fn set_series_data(
        &mut self,
        handle: SeriesHandle,
        points: &[ChartDataPoint],
    ) -> PaneResult<()>;
    fn remove_series(&mut self, handle: SeriesHandle) -> PaneResult<()>;
    fn create_price_line(
        &mut self,
        series: SeriesHandle,
        options: &PriceLineOptions,
    ) -> PaneResult<PriceLineHandle>;
    fn remove_price_line(&mut self, series: SeriesHandle, line: PriceLineHandle) -> PaneResult<()>;
    fn visible_range(&self) -> Option<VisibleRange>;
    fn set_visible_range(&mut self, range: VisibleRange) -> PaneResult<()>;
    /// `None` re-enables vertical auto-scaling.
    fn set_fixed_value_range(&mut self, range: Option<ValueRange>) -> PaneResult<()>;
}

/// Surfaces are shared between their owning pane and the synchronizer on the
/// single UI thread.
pub type SharedSurface = Rc<RefCell<dyn DrawingSurface>>;
