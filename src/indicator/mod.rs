pub mod json;
pub mod legend;
pub mod output;
pub mod style;
pub mod threshold;
pub mod transform;
pub mod trend;

pub use json::{INDICATOR_OUTPUT_JSON_SCHEMA_V1, IndicatorOutputJsonContractV1};
pub use legend::{LegendEntry, compute_legend};
pub use output::{
    ColorMode, ColorSchemes, DisplayType, IndicatorMetadata, IndicatorOutput, ReferenceLevel,
    SeriesDescriptor, SeriesRole, Thresholds,
};
pub use style::StyleOverrides;
pub use threshold::{ThresholdSign, classify_signal, classify_value};
pub use transform::{
    DerivedSeries, PriceLineSpec, SeriesId, SeriesSpec, TransformResult, transform,
};
pub use trend::{TrendSegments, partition_trend};
