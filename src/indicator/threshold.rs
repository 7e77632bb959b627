use crate::core::{ChartDataPoint, Color, UnixTime};

use super::{ColorSchemes, Thresholds};

#[cfg(feature = "parallel-transform")]
use rayon::prelude::*;

/// Per-point classification against fixed bounds or an explicit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSign {
    Bullish,
    Neutral,
    Bearish,
}

impl ThresholdSign {
    #[must_use]
    pub fn color(self, schemes: &ColorSchemes) -> Color {
        match self {
            Self::Bullish => schemes.bullish(),
            Self::Neutral => schemes.neutral(),
            Self::Bearish => schemes.bearish(),
        }
    }
}

/// Classifies a value against the high/low bounds.
///
/// A missing bound simply never produces its sign, so values degrade to
/// neutral rather than erroring.
#[must_use]
pub fn classify_value(value: f64, thresholds: Thresholds) -> ThresholdSign {
    if thresholds.high.is_some_and(|high| value > high) {
        return ThresholdSign::Bullish;
    }
    if thresholds.low.is_some_and(|low| value < low) {
        return ThresholdSign::Bearish;
    }
    ThresholdSign::Neutral
}

/// Maps an explicit signal sample (`1`/`0`/`-1`) to its sign.
#[must_use]
pub fn classify_signal(signal: f64) -> ThresholdSign {
    if signal > 0.0 {
        ThresholdSign::Bullish
    } else if signal < 0.0 {
        ThresholdSign::Bearish
    } else {
        ThresholdSign::Neutral
    }
}

/// Builds the single per-point-colored main series for threshold mode.
///
/// The series is deliberately not split by sign: a per-point-colorable
/// single series is the only representation that stays continuous across
/// sign-change boundaries. When an explicit signal array is supplied its
/// samples win; indices where the signal is absent fall back to bound
/// derivation.
#[must_use]
pub fn color_points(
    timestamps: &[UnixTime],
    values: &[Option<f64>],
    signal: Option<&[Option<f64>]>,
    thresholds: Thresholds,
    schemes: &ColorSchemes,
) -> Vec<ChartDataPoint> {
    let filtered: Vec<(usize, UnixTime, f64)> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(index, &time)| {
            let value = values.get(index).copied().flatten()?;
            Some((index, time, value))
        })
        .collect();

    let classify = |index: usize, value: f64| -> ThresholdSign {
        match signal.and_then(|samples| samples.get(index).copied().flatten()) {
            Some(sample) => classify_signal(sample),
            None => classify_value(value, thresholds),
        }
    };

    // For large outputs the per-point classification is embarrassingly
    // parallel; the optional rayon path keeps output order and content
    // identical to the sequential one.
    #[cfg(feature = "parallel-transform")]
    {
        filtered
            .par_iter()
            .map(|&(index, time, value)| {
                ChartDataPoint::colored(time, value, classify(index, value).color(schemes))
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-transform"))]
    {
        filtered
            .iter()
            .map(|&(index, time, value)| {
                ChartDataPoint::colored(time, value, classify(index, value).color(schemes))
            })
            .collect()
    }
}
