use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Color, LineStyle, UnixTime, ValueRange};

/// Rendering role of one field within an indicator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    Main,
    Signal,
    Band,
    Histogram,
}

/// Native primitive family a series is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Line,
    Histogram,
}

/// Coloring rule for the indicator's main series.
///
/// Closed set by design: the transformer dispatches on it exactly once
/// instead of re-checking role strings per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Single,
    Trend,
    Threshold,
}

fn default_line_width() -> f64 {
    2.0
}

/// Display metadata for one output field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub field: String,
    #[serde(default)]
    pub role: Option<SeriesRole>,
    pub line_color: Color,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub display_type: DisplayType,
}

impl SeriesDescriptor {
    #[must_use]
    pub fn new(field: impl Into<String>, line_color: Color) -> Self {
        Self {
            field: field.into(),
            role: None,
            line_color,
            line_width: default_line_width(),
            display_type: DisplayType::Line,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: SeriesRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }
}

/// Semantic color palette of an indicator (`bullish`, `bearish`, `neutral`,
/// `line`, ...), with conventional fallbacks for the well-known keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSchemes(IndexMap<String, Color>);

impl ColorSchemes {
    pub const DEFAULT_BULLISH: Color = Color::rgb(0.149, 0.651, 0.604);
    pub const DEFAULT_BEARISH: Color = Color::rgb(0.937, 0.325, 0.314);
    pub const DEFAULT_NEUTRAL: Color = Color::rgb(0.471, 0.482, 0.525);
    pub const DEFAULT_LINE: Color = Color::rgb(0.161, 0.384, 1.0);

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Color> {
        self.0.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, color: Color) {
        self.0.insert(key.into(), color);
    }

    #[must_use]
    pub fn bullish(&self) -> Color {
        self.get("bullish").unwrap_or(Self::DEFAULT_BULLISH)
    }

    #[must_use]
    pub fn bearish(&self) -> Color {
        self.get("bearish").unwrap_or(Self::DEFAULT_BEARISH)
    }

    #[must_use]
    pub fn neutral(&self) -> Color {
        self.get("neutral").unwrap_or(Self::DEFAULT_NEUTRAL)
    }

    #[must_use]
    pub fn line(&self) -> Color {
        self.get("line").unwrap_or(Self::DEFAULT_LINE)
    }
}

/// Fixed high/low bounds used by threshold coloring and fallback price lines.
///
/// Upstream payloads are inconsistent about key names, hence the aliases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default, alias = "upper")]
    pub high: Option<f64>,
    #[serde(default, alias = "lower")]
    pub low: Option<f64>,
}

/// A fixed horizontal reference line declared by indicator metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLevel {
    pub value: f64,
    pub line_color: Color,
    #[serde(default)]
    pub line_label: Option<String>,
    #[serde(default)]
    pub line_style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorMetadata {
    #[serde(default)]
    pub series_metadata: Vec<SeriesDescriptor>,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub color_schemes: ColorSchemes,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
    #[serde(default)]
    pub reference_levels: Vec<ReferenceLevel>,
    #[serde(default)]
    pub scale_ranges: Option<ValueRange>,
}

/// One computed indicator: a shared timestamp axis plus index-aligned value
/// arrays and display metadata. Immutable per fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorOutput {
    pub timestamps: Vec<UnixTime>,
    pub data: IndexMap<String, Vec<Option<f64>>>,
    pub metadata: IndicatorMetadata,
}

impl IndicatorOutput {
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The descriptor rendered as the main series: the entry with
    /// `role = main`, else the first entry.
    #[must_use]
    pub fn main_descriptor(&self) -> Option<&SeriesDescriptor> {
        self.metadata
            .series_metadata
            .iter()
            .find(|descriptor| descriptor.role == Some(SeriesRole::Main))
            .or_else(|| self.metadata.series_metadata.first())
    }

    /// The field supplying explicit per-point signs (`1`/`0`/`-1`), when one
    /// exists: a `role = signal` descriptor's field, else a data field
    /// literally named `signal`.
    #[must_use]
    pub fn signal_field(&self) -> Option<&str> {
        if let Some(descriptor) = self
            .metadata
            .series_metadata
            .iter()
            .find(|descriptor| descriptor.role == Some(SeriesRole::Signal))
        {
            return Some(descriptor.field.as_str());
        }
        self.data.contains_key("signal").then_some("signal")
    }

    #[must_use]
    pub fn field_values(&self, field: &str) -> Option<&[Option<f64>]> {
        self.data.get(field).map(Vec::as_slice)
    }

    /// Brings the output into canonical form: strictly increasing timestamps,
    /// every field array index-aligned to the timestamp axis, non-finite
    /// values demoted to `None`.
    ///
    /// Malformed input degrades with a warning instead of failing, so a pane
    /// with partially unusable data still renders what it can.
    #[must_use]
    pub fn canonicalized(mut self) -> Self {
        let original_len = self.timestamps.len();

        let mut kept_indices: Vec<usize> = Vec::with_capacity(original_len);
        let mut last_kept: Option<UnixTime> = None;
        for (index, &time) in self.timestamps.iter().enumerate() {
            if last_kept.is_some_and(|last| time <= last) {
                continue;
            }
            kept_indices.push(index);
            last_kept = Some(time);
        }

        let dropped_timestamps = original_len - kept_indices.len();
        if dropped_timestamps > 0 {
            self.timestamps = kept_indices
                .iter()
                .map(|&index| self.timestamps[index])
                .collect();
        }

        let mut demoted_values = 0_usize;
        let mut realigned_fields = 0_usize;
        for (_, values) in &mut self.data {
            let misaligned = values.len() != original_len || dropped_timestamps > 0;
            if misaligned {
                realigned_fields += 1;
            }

            let mut aligned = Vec::with_capacity(kept_indices.len());
            for &index in &kept_indices {
                let value = values.get(index).copied().flatten();
                match value {
                    Some(v) if !v.is_finite() => {
                        demoted_values += 1;
                        aligned.push(None);
                    }
                    other => aligned.push(other),
                }
            }
            *values = aligned;
        }

        if dropped_timestamps > 0 || demoted_values > 0 || realigned_fields > 0 {
            warn!(
                dropped_timestamps,
                demoted_values,
                realigned_fields,
                canonical_len = self.timestamps.len(),
                "canonicalized indicator output"
            );
        }

        self
    }
}
