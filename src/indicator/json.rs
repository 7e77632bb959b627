use serde::{Deserialize, Serialize};

use crate::error::{PaneError, PaneResult};

use super::IndicatorOutput;

pub const INDICATOR_OUTPUT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope for persisted/transported indicator payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOutputJsonContractV1 {
    pub schema_version: u32,
    pub output: IndicatorOutput,
}

impl IndicatorOutput {
    pub fn to_json_contract_v1_pretty(&self) -> PaneResult<String> {
        let payload = IndicatorOutputJsonContractV1 {
            schema_version: INDICATOR_OUTPUT_JSON_SCHEMA_V1,
            output: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PaneError::InvalidData(format!("failed to serialize indicator contract v1: {e}"))
        })
    }

    /// Parses either a bare `IndicatorOutput` object or the versioned
    /// envelope, so hosts can feed raw fetch responses directly.
    pub fn from_json_compat_str(input: &str) -> PaneResult<Self> {
        if let Ok(output) = serde_json::from_str::<IndicatorOutput>(input) {
            return Ok(output);
        }
        let payload: IndicatorOutputJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PaneError::InvalidData(format!("failed to parse indicator json payload: {e}"))
        })?;
        if payload.schema_version != INDICATOR_OUTPUT_JSON_SCHEMA_V1 {
            return Err(PaneError::InvalidData(format!(
                "unsupported indicator schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.output)
    }
}
