use std::cmp::Ordering;

use crate::core::ChartDataPoint;

/// Result of splitting a series by local slope direction.
///
/// Each subsequence is drawable as its own polyline. A point at a direction
/// change belongs to both the outgoing and the incoming subsequence, so
/// adjacent segments stay visually connected instead of leaving a one-sample
/// gap at every slope reversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendSegments {
    pub up: Vec<ChartDataPoint>,
    pub neutral: Vec<ChartDataPoint>,
    pub down: Vec<ChartDataPoint>,
}

impl TrendSegments {
    #[must_use]
    pub fn total_memberships(&self) -> usize {
        self.up.len() + self.neutral.len() + self.down.len()
    }
}

/// Partitions consecutive points into up/neutral/down runs with bridging.
///
/// The direction of the pair `(points[i-1], points[i])` is
/// `sign(value[i] - value[i-1])`; both pair endpoints join that direction's
/// subsequence, deduplicated so an unchanged direction does not repeat the
/// shared point. Deterministic and side-effect free, like the core
/// projection helpers.
#[must_use]
pub fn partition_trend(points: &[ChartDataPoint]) -> TrendSegments {
    let mut segments = TrendSegments::default();

    // A lone point has no slope; report it as neutral so every filtered
    // point belongs to at least one subsequence.
    if points.len() == 1 {
        segments.neutral.push(points[0]);
        return segments;
    }

    for pair in points.windows(2) {
        let segment = match pair[1].value.total_cmp(&pair[0].value) {
            Ordering::Greater => &mut segments.up,
            Ordering::Less => &mut segments.down,
            Ordering::Equal => &mut segments.neutral,
        };
        if segment.last().map(|last| last.time) != Some(pair[0].time) {
            segment.push(pair[0]);
        }
        segment.push(pair[1]);
    }

    segments
}
