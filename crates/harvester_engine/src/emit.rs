use serde::Deserialize;

use crate::HarvestOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitFormat {
    #[default]
    Compact,
    Pretty,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to serialize records: {0}")]
pub struct EmitError(#[from] serde_json::Error);

/// Serializes the records of `outcome` (not the counts) as a compact JSON array.
///
/// Non-ASCII text is written as UTF-8, never `\u` escaped.
pub fn emit(outcome: &HarvestOutcome) -> Result<Vec<u8>, EmitError> {
    emit_with(outcome, EmitFormat::Compact)
}

pub fn emit_with(outcome: &HarvestOutcome, format: EmitFormat) -> Result<Vec<u8>, EmitError> {
    let bytes = match format {
        EmitFormat::Compact => serde_json::to_vec(outcome.records())?,
        EmitFormat::Pretty => serde_json::to_vec_pretty(outcome.records())?,
    };
    Ok(bytes)
}
