use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{PaneKey, VisibleRange};
use crate::error::PaneResult;
use crate::surface::SharedSurface;

/// One-way fan-out of the primary chart's visible range to every registered
/// secondary pane viewport.
///
/// There is exactly one primary at a time and no feedback path: secondaries
/// are write-only targets of the broadcast, keyed by pane identity so the
/// set can change dynamically. Broadcast order is the registration order of
/// the table, which keeps fan-out deterministic.
#[derive(Default)]
pub struct TimeScaleSynchronizer {
    primary: Option<SharedSurface>,
    last_primary_range: Option<VisibleRange>,
    secondaries: IndexMap<PaneKey, SharedSurface>,
}

impl TimeScaleSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source-of-truth viewport, replacing any previous primary and
    /// seeding the broadcast range from its current visible window.
    pub fn register_primary(&mut self, surface: SharedSurface) {
        let replaced = self.primary.is_some();
        self.last_primary_range = surface.borrow().visible_range();
        self.primary = Some(surface);
        debug!(replaced, "registered primary time scale");
    }

    /// Forwards a range-change notification from the primary surface and
    /// applies it to every registered secondary, in registration order.
    pub fn on_primary_range_changed(&mut self, range: VisibleRange) -> PaneResult<()> {
        self.last_primary_range = Some(range);
        for (key, surface) in &self.secondaries {
            surface.borrow_mut().set_visible_range(range)?;
            trace!(pane = %key, "applied primary range to secondary");
        }
        Ok(())
    }

    /// Adds a pane viewport to the broadcast set.
    ///
    /// Idempotent: re-registering a key replaces its surface. When a primary
    /// range is already known it is applied immediately, so late-joining
    /// panes start in sync instead of blank.
    pub fn register_secondary(&mut self, key: PaneKey, surface: SharedSurface) -> PaneResult<()> {
        if let Some(range) = self.last_primary_range {
            surface.borrow_mut().set_visible_range(range)?;
        }
        let replaced = self.secondaries.insert(key.clone(), surface).is_some();
        debug!(pane = %key, replaced, "registered secondary time scale");
        Ok(())
    }

    /// Removes a pane from the broadcast set. Unknown keys are a no-op.
    pub fn unregister_secondary(&mut self, key: &PaneKey) -> bool {
        let removed = self.secondaries.shift_remove(key).is_some();
        if removed {
            debug!(pane = %key, "unregistered secondary time scale");
        }
        removed
    }

    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    #[must_use]
    pub fn secondary_count(&self) -> usize {
        self.secondaries.len()
    }

    #[must_use]
    pub fn has_secondary(&self, key: &PaneKey) -> bool {
        self.secondaries.contains_key(key)
    }

    #[must_use]
    pub fn last_primary_range(&self) -> Option<VisibleRange> {
        self.last_primary_range
    }
}
