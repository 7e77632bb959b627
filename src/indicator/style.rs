use indexmap::IndexMap;

use crate::core::Color;

use super::SeriesDescriptor;

/// Host-driven style overrides layered on top of indicator metadata.
///
/// Resolution order for a series color: per-field override, then the
/// whole-indicator override (main series only), then the descriptor's own
/// `line_color`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub color: Option<Color>,
    pub line_width: Option<f64>,
    pub series_colors: IndexMap<String, Color>,
}

impl StyleOverrides {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_series_color(mut self, field: impl Into<String>, color: Color) -> Self {
        self.series_colors.insert(field.into(), color);
        self
    }

    #[must_use]
    pub fn resolve_color(&self, descriptor: &SeriesDescriptor, is_main: bool) -> Color {
        self.series_colors
            .get(&descriptor.field)
            .copied()
            .or(if is_main { self.color } else { None })
            .unwrap_or(descriptor.line_color)
    }

    #[must_use]
    pub fn resolve_line_width(&self, descriptor: &SeriesDescriptor) -> f64 {
        self.line_width.unwrap_or(descriptor.line_width)
    }
}
