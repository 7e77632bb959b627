use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ChartDataPoint, Color, LineStyle, UnixTime};

use super::legend::{LegendEntry, compute_legend};
use super::threshold::color_points;
use super::trend::partition_trend;
use super::{
    ColorMode, DisplayType, IndicatorMetadata, IndicatorOutput, SeriesDescriptor, SeriesRole,
    StyleOverrides,
};

/// Stable semantic identity of one drawable series.
///
/// Derived from the field name (plus a trend-segment suffix), never from
/// array position; the realized-handle cache keys off this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    #[must_use]
    pub fn field(field: &str) -> Self {
        Self(field.to_owned())
    }

    #[must_use]
    pub fn trend_neutral(field: &str) -> Self {
        Self(format!("{field}_neutral"))
    }

    #[must_use]
    pub fn trend_down(field: &str) -> Self {
        Self(format!("{field}_down"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One desired drawable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub id: SeriesId,
    pub data: Vec<ChartDataPoint>,
    pub color: Color,
    pub display_type: DisplayType,
    pub line_width: f64,
    pub visible: bool,
}

/// A desired fixed horizontal reference line; the lifecycle manager resolves
/// which realized series it attaches to.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLineSpec {
    pub value: f64,
    pub color: Color,
    pub label: Option<String>,
    pub line_style: LineStyle,
}

/// Full desired drawable set for one pane.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedSeries {
    pub main_series: Option<SeriesSpec>,
    pub additional_series: Vec<SeriesSpec>,
    pub price_lines: Vec<PriceLineSpec>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformResult {
    pub derived: DerivedSeries,
    pub legend: Vec<LegendEntry>,
}

/// Converts an indicator output into the desired drawable set plus legend
/// rows.
///
/// Pure over its inputs; malformed pieces (missing main descriptor, missing
/// field arrays) degrade to empty output rather than failing.
#[must_use]
pub fn transform(
    output: &IndicatorOutput,
    overrides: &StyleOverrides,
    crosshair_time: Option<UnixTime>,
) -> TransformResult {
    TransformResult {
        derived: derive_series(output, overrides),
        legend: compute_legend(output, overrides, crosshair_time),
    }
}

fn derive_series(output: &IndicatorOutput, overrides: &StyleOverrides) -> DerivedSeries {
    let mut derived = DerivedSeries {
        price_lines: derive_price_lines(&output.metadata),
        ..DerivedSeries::default()
    };

    let Some(main) = output.main_descriptor() else {
        debug!("indicator output has no series descriptors; derived set is empty");
        return derived;
    };
    let mode = output.metadata.color_mode;
    let schemes = &output.metadata.color_schemes;

    // Coloring mode is a closed set dispatched exactly once.
    match mode {
        ColorMode::Single => {
            derived.main_series = build_uniform_spec(output, overrides, main, true);
        }
        ColorMode::Threshold => {
            let signal = output
                .signal_field()
                .and_then(|field| output.field_values(field));
            let points = color_points(
                &output.timestamps,
                output.field_values(&main.field).unwrap_or(&[]),
                signal,
                output.metadata.thresholds.unwrap_or_default(),
                schemes,
            );
            if !points.is_empty() {
                derived.main_series = Some(SeriesSpec {
                    id: SeriesId::field(&main.field),
                    data: points,
                    color: overrides.resolve_color(main, true),
                    display_type: main.display_type,
                    line_width: overrides.resolve_line_width(main),
                    visible: true,
                });
            }
        }
        ColorMode::Trend => {
            let segments = partition_trend(&filtered_points(output, &main.field));
            let line_width = overrides.resolve_line_width(main);
            if !segments.up.is_empty() {
                derived.main_series = Some(SeriesSpec {
                    id: SeriesId::field(&main.field),
                    data: segments.up,
                    color: schemes.bullish(),
                    display_type: main.display_type,
                    line_width,
                    visible: true,
                });
            }
            if !segments.neutral.is_empty() {
                derived.additional_series.push(SeriesSpec {
                    id: SeriesId::trend_neutral(&main.field),
                    data: segments.neutral,
                    color: schemes.neutral(),
                    display_type: main.display_type,
                    line_width,
                    visible: true,
                });
            }
            if !segments.down.is_empty() {
                derived.additional_series.push(SeriesSpec {
                    id: SeriesId::trend_down(&main.field),
                    data: segments.down,
                    color: schemes.bearish(),
                    display_type: main.display_type,
                    line_width,
                    visible: true,
                });
            }
        }
    }

    for descriptor in &output.metadata.series_metadata {
        if descriptor.field == main.field {
            continue;
        }
        // Outside single mode the signal series is consumed for sign
        // computation only.
        if descriptor.role == Some(SeriesRole::Signal) && mode != ColorMode::Single {
            continue;
        }
        if let Some(spec) = build_uniform_spec(output, overrides, descriptor, false) {
            derived.additional_series.push(spec);
        }
    }

    trace!(
        has_main = derived.main_series.is_some(),
        additional_count = derived.additional_series.len(),
        price_line_count = derived.price_lines.len(),
        "derived series set"
    );
    derived
}

fn build_uniform_spec(
    output: &IndicatorOutput,
    overrides: &StyleOverrides,
    descriptor: &SeriesDescriptor,
    is_main: bool,
) -> Option<SeriesSpec> {
    let points = filtered_points(output, &descriptor.field);
    if points.is_empty() {
        return None;
    }
    Some(SeriesSpec {
        id: SeriesId::field(&descriptor.field),
        data: points,
        color: overrides.resolve_color(descriptor, is_main),
        display_type: descriptor.display_type,
        line_width: overrides.resolve_line_width(descriptor),
        visible: true,
    })
}

/// Pairs the timestamp axis with one field's values, dropping nulls.
fn filtered_points(output: &IndicatorOutput, field: &str) -> Vec<ChartDataPoint> {
    let Some(values) = output.field_values(field) else {
        return Vec::new();
    };
    output
        .timestamps
        .iter()
        .zip(values)
        .filter_map(|(&time, &value)| {
            let value = value.filter(|v| v.is_finite())?;
            Some(ChartDataPoint::new(time, value))
        })
        .collect()
}

fn derive_price_lines(metadata: &IndicatorMetadata) -> Vec<PriceLineSpec> {
    if !metadata.reference_levels.is_empty() {
        return metadata
            .reference_levels
            .iter()
            .filter(|level| level.value.is_finite())
            .map(|level| PriceLineSpec {
                value: level.value,
                color: level.line_color,
                label: level.line_label.clone(),
                line_style: level.line_style,
            })
            .collect();
    }

    // Fallback: dashed, unlabeled guides at the threshold bounds.
    let Some(thresholds) = metadata.thresholds else {
        return Vec::new();
    };
    let neutral = metadata.color_schemes.neutral();
    [thresholds.high, thresholds.low]
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
        .map(|value| PriceLineSpec {
            value,
            color: neutral,
            label: None,
            line_style: LineStyle::Dashed,
        })
        .collect()
}
