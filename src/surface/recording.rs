use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::{ChartDataPoint, ValueRange, VisibleRange};
use crate::error::{PaneError, PaneResult};

use super::{
    DrawingSurface, PriceLineHandle, PriceLineOptions, SeriesHandle, SeriesKind, SeriesOptions,
};

/// Everything the recorder knows about one live series.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSeries {
    pub kind: SeriesKind,
    pub options: SeriesOptions,
    pub data: Vec<ChartDataPoint>,
    pub price_lines: IndexMap<PriceLineHandle, PriceLineOptions>,
}

/// One operation issued against the recording surface, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    CreateSeries(SeriesHandle),
    UpdateSeries(SeriesHandle),
    SetSeriesData { handle: SeriesHandle, len: usize },
    RemoveSeries(SeriesHandle),
    CreatePriceLine(SeriesHandle, PriceLineHandle),
    RemovePriceLine(SeriesHandle, PriceLineHandle),
    SetVisibleRange(VisibleRange),
    SetFixedValueRange(Option<ValueRange>),
}

/// In-memory drawing surface used by tests and headless hosts.
///
/// It allocates monotonically increasing handles, validates every call the
/// way a native backend would (unknown handles fail), and records the full
/// operation log so reconciliation invariants can be asserted call-by-call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    pub series: IndexMap<SeriesHandle, RecordedSeries>,
    pub operations: Vec<SurfaceOp>,
    pub visible: Option<VisibleRange>,
    pub fixed_range: Option<ValueRange>,
    /// When set, the next series create fails with this message. Used to
    /// exercise surface-failure propagation.
    pub fail_next_create: Option<&'static str>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for pane/synchronizer tests that need the
    /// shared `Rc<RefCell<…>>` form.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Drains the operation log, so assertions can scope to one call.
    pub fn take_operations(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.operations)
    }

    #[must_use]
    pub fn create_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, SurfaceOp::CreateSeries(_)))
            .count()
    }

    #[must_use]
    pub fn remove_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, SurfaceOp::RemoveSeries(_)))
            .count()
    }

    fn series_mut(
        &mut self,
        handle: SeriesHandle,
        operation: &'static str,
    ) -> PaneResult<&mut RecordedSeries> {
        self.series
            .get_mut(&handle)
            .ok_or_else(|| PaneError::surface(operation, format!("unknown series handle {handle:?}")))
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl DrawingSurface for RecordingSurface {
    fn create_series(
        &mut self,
        kind: SeriesKind,
        options: &SeriesOptions,
    ) -> PaneResult<SeriesHandle> {
        if let Some(message) = self.fail_next_create.take() {
            return Err(PaneError::surface("create_series", message));
        }
        let handle = SeriesHandle::new(self.allocate());
        self.series.insert(
            handle,
            RecordedSeries {
                kind,
                options: *options,
                data: Vec::new(),
                price_lines: IndexMap::new(),
            },
        );
        self.operations.push(SurfaceOp::CreateSeries(handle));
        Ok(handle)
    }

    fn update_series(&mut self, handle: SeriesHandle, options: &SeriesOptions) -> PaneResult<()> {
        self.series_mut(handle, "update_series")?.options = *options;
        self.operations.push(SurfaceOp::UpdateSeries(handle));
        Ok(())
    }

    fn set_series_data(
        &mut self,
        handle: SeriesHandle,
        points: &[ChartDataPoint],
    ) -> PaneResult<()> {
        self.series_mut(handle, "set_series_data")?.data = points.to_vec();
        self.operations.push(SurfaceOp::SetSeriesData {
            handle,
            len: points.len(),
        });
        Ok(())
    }

    fn remove_series(&mut self, handle: SeriesHandle) -> PaneResult<()> {
        if self.series.shift_remove(&handle).is_none() {
            return Err(PaneError::surface(
                "remove_series",
                format!("unknown series handle {handle:?}"),
            ));
        }
        self.operations.push(SurfaceOp::RemoveSeries(handle));
        Ok(())
    }

    fn create_price_line(
        &mut self,
        series: SeriesHandle,
        options: &PriceLineOptions,
    ) -> PaneResult<PriceLineHandle> {
        let line = PriceLineHandle::new(self.allocate());
        self.series_mut(series, "create_price_line")?
            .price_lines
            .insert(line, options.clone());
        self.operations.push(SurfaceOp::CreatePriceLine(series, line));
        Ok(line)
    }

    fn remove_price_line(&mut self, series: SeriesHandle, line: PriceLineHandle) -> PaneResult<()> {
        let entry = self.series_mut(series, "remove_price_line")?;
        if entry.price_lines.shift_remove(&line).is_none() {
            return Err(PaneError::surface(
                "remove_price_line",
                format!("unknown price line handle {line:?}"),
            ));
        }
        self.operations.push(SurfaceOp::RemovePriceLine(series, line));
        Ok(())
    }

    fn visible_range(&self) -> Option<VisibleRange> {
        self.visible
    }

    fn set_visible_range(&mut self, range: VisibleRange) -> PaneResult<()> {
        self.visible = Some(range);
        self.operations.push(SurfaceOp::SetVisibleRange(range));
        Ok(())
    }

    fn set_fixed_value_range(&mut self, range: Option<ValueRange>) -> PaneResult<()> {
        self.fixed_range = range;
        self.operations.push(SurfaceOp::SetFixedValueRange(range));
        Ok(())
    }
}
