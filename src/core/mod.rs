pub mod color;
pub mod key;
pub mod range;
pub mod types;

pub use color::Color;
pub use key::PaneKey;
pub use range::{ValueRange, VisibleRange};
pub use types::{ChartDataPoint, LineStyle, UnixTime, datetime_to_unix_seconds, decimal_to_f64};
