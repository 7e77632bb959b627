use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{PaneKey, UnixTime};
use crate::error::PaneResult;
use crate::indicator::{IndicatorOutput, LegendEntry, StyleOverrides, compute_legend, transform};
use crate::lifecycle::PaneSeriesState;
use crate::surface::SharedSurface;
use crate::sync::TimeScaleSynchronizer;

/// One indicator pane: a drawing surface, its realized series state, and the
/// wiring between them.
///
/// The pane owns its surface and handle map exclusively; the only thing it
/// shares is the surface reference handed to the synchronizer. A pane's
/// identity is its `PaneKey`; when the identity changes (symbol, indicator,
/// interval switch) the container unmounts this pane and mounts a fresh one
/// rather than mutating it in place.
pub struct IndicatorPane {
    key: PaneKey,
    surface: SharedSurface,
    state: PaneSeriesState,
    overrides: StyleOverrides,
    output: Option<IndicatorOutput>,
    crosshair_time: Option<UnixTime>,
    legend: Vec<LegendEntry>,
    alive: bool,
}

impl IndicatorPane {
    /// Creates the pane and registers its viewport with the synchronizer, so
    /// it starts in sync with the primary chart.
    pub fn mount(
        key: PaneKey,
        surface: SharedSurface,
        synchronizer: &mut TimeScaleSynchronizer,
    ) -> PaneResult<Self> {
        synchronizer.register_secondary(key.clone(), Rc::clone(&surface))?;
        debug!(pane = %key, "mounted indicator pane");
        Ok(Self {
            key,
            surface,
            state: PaneSeriesState::new(),
            overrides: StyleOverrides::default(),
            output: None,
            crosshair_time: None,
            legend: Vec::new(),
            alive: true,
        })
    }

    /// Applies a freshly fetched indicator output.
    ///
    /// Canonicalizes the input, derives the desired series set, reconciles
    /// it onto the surface, refreshes the baseline from the primary chart's
    /// candle timestamps, and applies the fixed scale range (or re-enables
    /// auto-scaling). An update arriving after `unmount` is a no-op, so a
    /// pane torn down mid-flight ignores its stale data.
    pub fn apply_output(
        &mut self,
        output: IndicatorOutput,
        candle_times: &[UnixTime],
    ) -> PaneResult<()> {
        if !self.alive {
            trace!(pane = %self.key, "ignoring update for unmounted pane");
            return Ok(());
        }

        let output = output.canonicalized();
        let result = transform(&output, &self.overrides, self.crosshair_time);
        {
            let mut surface = self.surface.borrow_mut();
            self.state.reconcile(&mut *surface, &result.derived)?;
            self.state.sync_baseline(&mut *surface, candle_times)?;
            surface.set_fixed_value_range(output.metadata.scale_ranges)?;
        }
        self.legend = result.legend;
        self.output = Some(output);
        Ok(())
    }

    /// Replaces the style overrides and re-renders the current output.
    pub fn set_style_overrides(&mut self, overrides: StyleOverrides) -> PaneResult<()> {
        self.overrides = overrides;
        self.refresh()
    }

    /// Moves the crosshair and recomputes legend values. `None` falls back
    /// to the latest sample.
    pub fn set_crosshair_time(&mut self, time: Option<UnixTime>) {
        self.crosshair_time = time;
        if let Some(output) = &self.output {
            self.legend = compute_legend(output, &self.overrides, time);
        }
    }

    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn key(&self) -> &PaneKey {
        &self.key
    }

    #[must_use]
    pub fn surface(&self) -> SharedSurface {
        Rc::clone(&self.surface)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn realized_series_count(&self) -> usize {
        self.state.realized_count()
    }

    /// Unregisters from the synchronizer and destroys every realized series.
    ///
    /// Hiding a pane goes through this same path: the container unmounts the
    /// hidden pane and rebuilds it on re-show from the retained output. That
    /// trades re-show cost for zero idle native resources.
    pub fn unmount(&mut self, synchronizer: &mut TimeScaleSynchronizer) -> PaneResult<()> {
        if !self.alive {
            return Ok(());
        }
        synchronizer.unregister_secondary(&self.key);
        {
            let mut surface = self.surface.borrow_mut();
            self.state.teardown(&mut *surface)?;
        }
        self.legend.clear();
        self.alive = false;
        debug!(pane = %self.key, "unmounted indicator pane");
        Ok(())
    }

    fn refresh(&mut self) -> PaneResult<()> {
        if !self.alive {
            return Ok(());
        }
        let Some(output) = &self.output else {
            return Ok(());
        };
        let result = transform(output, &self.overrides, self.crosshair_time);
        {
            let mut surface = self.surface.borrow_mut();
            self.state.reconcile(&mut *surface, &result.derived)?;
        }
        self.legend = result.legend;
        Ok(())
    }
}
