use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one secondary indicator pane.
///
/// Panes are added and removed dynamically, so the synchronizer and every
/// handle cache key off this identity rather than any positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneKey {
    pub symbol: String,
    pub indicator: String,
    pub instance: u32,
}

impl PaneKey {
    #[must_use]
    pub fn new(symbol: impl Into<String>, indicator: impl Into<String>, instance: u32) -> Self {
        Self {
            symbol: symbol.into(),
            indicator: indicator.into(),
            instance,
        }
    }
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.symbol, self.indicator, self.instance)
    }
}
