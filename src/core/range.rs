use serde::{Deserialize, Serialize};

use crate::error::{PaneError, PaneResult};

/// Visible logical/time window of a chart surface.
///
/// Owned by the primary chart; secondaries receive read-only copies through
/// the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: f64,
    pub to: f64,
}

impl VisibleRange {
    /// Creates a normalized range (`from <= to`, both finite).
    ///
    /// Equal endpoints are widened by a minimal span so downstream scale math
    /// never divides by zero.
    pub fn new(from: f64, to: f64) -> PaneResult<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(PaneError::InvalidData(
                "visible range endpoints must be finite".to_owned(),
            ));
        }

        if from == to {
            let half = 0.5e-9;
            return Ok(Self {
                from: from - half,
                to: to + half,
            });
        }

        Ok(Self {
            from: from.min(to),
            to: from.max(to),
        })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.to - self.from
    }
}

/// Fixed vertical scale bounds for a pane (`scale_ranges` metadata).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> PaneResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PaneError::InvalidData(
                "value range must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn validate(self) -> PaneResult<()> {
        Self::new(self.min, self.max).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::VisibleRange;
    use approx::assert_relative_eq;

    #[test]
    fn visible_range_normalizes_reversed_endpoints() {
        let range = VisibleRange::new(200.0, 100.0).expect("range");
        assert!(range.from < range.to);
        assert_relative_eq!(range.span(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn visible_range_widens_degenerate_span() {
        let range = VisibleRange::new(50.0, 50.0).expect("range");
        assert!(range.span() > 0.0);
    }

    #[test]
    fn visible_range_rejects_non_finite_endpoints() {
        assert!(VisibleRange::new(f64::NAN, 1.0).is_err());
        assert!(VisibleRange::new(0.0, f64::INFINITY).is_err());
    }
}
