use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::UnixTime;

/// Maps a pointer-derived time onto the nearest sample timestamp.
///
/// Crosshair positions rarely land exactly on a sample; hosts snap with this
/// before feeding the legend's exact-index lookup. `timestamps` must be
/// sorted ascending (the canonical indicator axis).
#[must_use]
pub fn nearest_timestamp(timestamps: &[UnixTime], time: f64) -> Option<UnixTime> {
    if timestamps.is_empty() || !time.is_finite() {
        return None;
    }

    let split = timestamps.partition_point(|&t| (t as f64) < time);
    let mut candidates: SmallVec<[UnixTime; 2]> = SmallVec::new();
    if split > 0 {
        candidates.push(timestamps[split - 1]);
    }
    if split < timestamps.len() {
        candidates.push(timestamps[split]);
    }

    candidates
        .into_iter()
        .min_by_key(|&t| OrderedFloat((t as f64 - time).abs()))
}
