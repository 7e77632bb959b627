use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{ChartDataPoint, Color, UnixTime};
use crate::error::PaneResult;
use crate::indicator::{DerivedSeries, SeriesId, SeriesSpec};
use crate::surface::{
    DrawingSurface, PriceLineHandle, PriceLineOptions, SeriesHandle, SeriesKind, SeriesOptions,
};

/// One realized native series and the primitive family it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealizedSeries {
    pub handle: SeriesHandle,
    pub kind: SeriesKind,
}

/// Realized drawable state of one pane.
///
/// Owned exclusively by its pane; mutated only through reconciliation and
/// torn down entirely with the pane. Handles are keyed by semantic
/// `SeriesId`, never by position, so the active set can change without
/// invalidating unrelated series.
#[derive(Debug, Default)]
pub struct PaneSeriesState {
    handles: IndexMap<SeriesId, RealizedSeries>,
    price_lines: Vec<PriceLineHandle>,
    price_line_target: Option<SeriesHandle>,
    baseline: Option<SeriesHandle>,
}

impl PaneSeriesState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self, id: &SeriesId) -> Option<SeriesHandle> {
        self.handles.get(id).map(|realized| realized.handle)
    }

    #[must_use]
    pub fn realized_count(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn baseline_handle(&self) -> Option<SeriesHandle> {
        self.baseline
    }

    #[must_use]
    pub fn price_line_count(&self) -> usize {
        self.price_lines.len()
    }

    /// Brings the realized set in line with `desired`.
    ///
    /// Idempotent: reconciling the same desired set twice issues zero series
    /// create/destroy calls on the second pass, and an unchanged id keeps
    /// its native handle across passes. Destroys always precede creates for
    /// the same slot. Callers must apply reconciliations in trigger order;
    /// nothing here reorders or batches across calls.
    pub fn reconcile(
        &mut self,
        surface: &mut dyn DrawingSurface,
        desired: &DerivedSeries,
    ) -> PaneResult<()> {
        // Price lines are rebuilt on every pass; detach them first, while
        // their target handle is still alive.
        self.remove_price_lines(surface)?;

        let stale: Vec<SeriesId> = self
            .handles
            .keys()
            .filter(|id| {
                desired
                    .main_series
                    .as_ref()
                    .is_none_or(|spec| spec.id != **id)
                    && desired.additional_series.iter().all(|spec| spec.id != **id)
            })
            .map(|id| (*id).clone())
            .collect();
        for id in stale {
            if let Some(realized) = self.handles.shift_remove(&id) {
                trace!(series = %id, "destroying stale series");
                surface.remove_series(realized.handle)?;
            }
        }

        if let Some(spec) = &desired.main_series {
            self.reconcile_one(surface, spec)?;
        }
        for spec in &desired.additional_series {
            self.reconcile_one(surface, spec)?;
        }

        self.create_price_lines(surface, desired)?;
        Ok(())
    }

    fn reconcile_one(
        &mut self,
        surface: &mut dyn DrawingSurface,
        spec: &SeriesSpec,
    ) -> PaneResult<()> {
        let desired_kind = SeriesKind::from(spec.display_type);
        let options = SeriesOptions {
            color: spec.color,
            line_width: spec.line_width,
            visible: spec.visible,
        };

        match self.handles.get(&spec.id) {
            Some(realized) if realized.kind == desired_kind => {
                // Only data or style changed: identity must be preserved.
                let handle = realized.handle;
                surface.update_series(handle, &options)?;
                surface.set_series_data(handle, &spec.data)?;
                trace!(series = %spec.id, points = spec.data.len(), "updated series in place");
                Ok(())
            }
            Some(_) => {
                // Line and histogram need different native primitives;
                // destroy first so no duplicate artifact exists mid-pass.
                if let Some(previous) = self.handles.shift_remove(&spec.id) {
                    debug!(series = %spec.id, "display type changed, recreating series");
                    surface.remove_series(previous.handle)?;
                }
                self.create_series(surface, spec, desired_kind, &options)
            }
            None => self.create_series(surface, spec, desired_kind, &options),
        }
    }

    fn create_series(
        &mut self,
        surface: &mut dyn DrawingSurface,
        spec: &SeriesSpec,
        kind: SeriesKind,
        options: &SeriesOptions,
    ) -> PaneResult<()> {
        let handle = surface.create_series(kind, options)?;
        surface.set_series_data(handle, &spec.data)?;
        self.handles
            .insert(spec.id.clone(), RealizedSeries { handle, kind });
        debug!(series = %spec.id, points = spec.data.len(), "created series");
        Ok(())
    }

    fn remove_price_lines(&mut self, surface: &mut dyn DrawingSurface) -> PaneResult<()> {
        let Some(target) = self.price_line_target.take() else {
            self.price_lines.clear();
            return Ok(());
        };
        for line in self.price_lines.drain(..) {
            surface.remove_price_line(target, line)?;
        }
        Ok(())
    }

    fn create_price_lines(
        &mut self,
        surface: &mut dyn DrawingSurface,
        desired: &DerivedSeries,
    ) -> PaneResult<()> {
        if desired.price_lines.is_empty() {
            return Ok(());
        }

        let target = desired
            .main_series
            .as_ref()
            .and_then(|spec| self.handle(&spec.id))
            .or_else(|| {
                desired
                    .additional_series
                    .iter()
                    .find_map(|spec| self.handle(&spec.id))
            });
        let Some(target) = target else {
            trace!("no realized series to attach price lines to, skipping");
            return Ok(());
        };

        for spec in &desired.price_lines {
            let line = surface.create_price_line(
                target,
                &PriceLineOptions {
                    value: spec.value,
                    color: spec.color,
                    label: spec.label.clone(),
                    line_style: spec.line_style,
                },
            )?;
            self.price_lines.push(line);
        }
        self.price_line_target = Some(target);
        trace!(count = desired.price_lines.len(), "recreated price lines");
        Ok(())
    }

    /// Maintains the hidden baseline series that pins the pane's time domain
    /// to the primary chart's candle range even when indicator data is
    /// sparser. Created once per pane lifetime; afterwards only its data is
    /// updated.
    pub fn sync_baseline(
        &mut self,
        surface: &mut dyn DrawingSurface,
        candle_times: &[UnixTime],
    ) -> PaneResult<()> {
        let mut times = candle_times.to_vec();
        times.sort_unstable();
        times.dedup();
        let points: Vec<ChartDataPoint> = times
            .into_iter()
            .map(|time| ChartDataPoint::new(time, 0.0))
            .collect();

        let handle = match self.baseline {
            Some(handle) => handle,
            None => {
                let options = SeriesOptions {
                    color: Color::rgba(0.0, 0.0, 0.0, 0.0),
                    line_width: 1.0,
                    visible: false,
                };
                let handle = surface.create_series(SeriesKind::Line, &options)?;
                debug!("created hidden baseline series");
                self.baseline = Some(handle);
                handle
            }
        };
        surface.set_series_data(handle, &points)
    }

    /// Destroys every realized handle. Called on pane teardown.
    pub fn teardown(&mut self, surface: &mut dyn DrawingSurface) -> PaneResult<()> {
        self.remove_price_lines(surface)?;
        for (id, realized) in self.handles.drain(..) {
            trace!(series = %id, "destroying series on teardown");
            surface.remove_series(realized.handle)?;
        }
        if let Some(baseline) = self.baseline.take() {
            surface.remove_series(baseline)?;
        }
        debug!("tore down pane series state");
        Ok(())
    }
}
