use serde::{Deserialize, Serialize};

use crate::core::{Color, UnixTime};

use super::{ColorMode, IndicatorOutput, SeriesRole, StyleOverrides};

/// One legend row: field key, resolved display color, sample value at the
/// crosshair time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub color: Color,
    pub value: f64,
}

/// Computes legend rows at `crosshair_time` (default: last timestamp).
///
/// Lookup is by exact timestamp index; a field with no sample at that index
/// is omitted rather than rendered as a placeholder. Signal descriptors only
/// appear in single mode, mirroring the rendering suppression rule.
#[must_use]
pub fn compute_legend(
    output: &IndicatorOutput,
    overrides: &StyleOverrides,
    crosshair_time: Option<UnixTime>,
) -> Vec<LegendEntry> {
    let Some(time) = crosshair_time.or_else(|| output.timestamps.last().copied()) else {
        return Vec::new();
    };
    let Ok(index) = output.timestamps.binary_search(&time) else {
        return Vec::new();
    };

    let main_field = output.main_descriptor().map(|d| d.field.clone());
    let mut entries = Vec::new();
    for descriptor in &output.metadata.series_metadata {
        if descriptor.role == Some(SeriesRole::Signal)
            && output.metadata.color_mode != ColorMode::Single
        {
            continue;
        }
        let Some(value) = output
            .field_values(&descriptor.field)
            .and_then(|values| values.get(index).copied().flatten())
        else {
            continue;
        };
        let is_main = main_field.as_deref() == Some(descriptor.field.as_str());
        entries.push(LegendEntry {
            key: descriptor.field.clone(),
            color: overrides.resolve_color(descriptor, is_main),
            value,
        });
    }
    entries
}
