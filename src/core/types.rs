use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{PaneError, PaneResult};

/// Integer seconds since the Unix epoch, the sample axis of every indicator.
pub type UnixTime = i64;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> PaneResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| PaneError::InvalidData(format!("{field_name} cannot be represented as f64")))
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> UnixTime {
    time.timestamp()
}

/// Stroke style of a horizontal reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// A single renderable sample.
///
/// `color` is present only for per-point-colored (threshold mode) series;
/// uniformly colored series carry their color on the series options instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub time: UnixTime,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl ChartDataPoint {
    #[must_use]
    pub const fn new(time: UnixTime, value: f64) -> Self {
        Self {
            time,
            value,
            color: None,
        }
    }

    #[must_use]
    pub const fn colored(time: UnixTime, value: f64, color: Color) -> Self {
        Self {
            time,
            value,
            color: Some(color),
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> PaneResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(value, "value")?,
        ))
    }
}
