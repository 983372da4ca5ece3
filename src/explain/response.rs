//! Explain API response parsing.
//!
//! The explain API answers with one object keyed by index name, plus a
//! `total_managed_indices` counter at the same level:
//!
//! ```text
//! {
//!   "logs-000001": { "index": "logs-000001", "policy_id": "hot_warm", ... },
//!   "metrics-000001": { "index.plugins.index_state_management.policy_id": null },
//!   "total_managed_indices": 1
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::explain::error::ExplainError;
use crate::explain::metadata::transform_with_logging;
use crate::explain::models::{ExplainManagedIndexMetaData, ManagedIndexMetaData};
use crate::logging::structured::LogContext;

/// Key of the managed index counter in an explain response.
pub const TOTAL_MANAGED_INDICES_KEY: &str = "total_managed_indices";

/// Parsed explain API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplainResponse {
    pub indices: BTreeMap<String, ExplainManagedIndexMetaData>,
    /// Entries that are not explain records, keyed by index, with the reason.
    pub rejected: BTreeMap<String, String>,
    pub total_managed_indices: Option<u64>,
}

/// Normalized explain API response, as handed to the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedExplainResponse {
    /// `None` for indices that are not under active management, and for
    /// rejected entries.
    pub indices: BTreeMap<String, Option<ManagedIndexMetaData>>,
    pub total_managed_indices: Option<u64>,
}

/// Parse a single explain record from JSON text.
///
/// `null` is accepted and yields `None`, matching an index the explain API
/// has no data for.
pub fn parse_explain_record(json: &str) -> Result<Option<ExplainManagedIndexMetaData>, ExplainError> {
    let record = serde_json::from_str::<Option<ExplainManagedIndexMetaData>>(json)?;
    Ok(record)
}

/// Parse a full explain response body.
///
/// Only a body that is not a JSON object fails. An entry that is not an
/// explain record is rejected on its own and its siblings are still parsed.
pub fn parse_explain_response(body: &str, ctx: &LogContext) -> Result<ExplainResponse, ExplainError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(entries) = value else {
        return Err(ExplainError::NotAnObject);
    };

    let mut response = ExplainResponse::default();
    for (key, entry) in entries {
        if key == TOTAL_MANAGED_INDICES_KEY {
            response.total_managed_indices = entry.as_u64();
            if response.total_managed_indices.is_none() {
                crate::log_warn!(ctx, "EXPLAIN_TOTAL_INVALID", value = entry);
            }
            continue;
        }

        match serde_json::from_value::<ExplainManagedIndexMetaData>(entry) {
            Ok(record) => {
                response.indices.insert(key, record);
            }
            Err(source) => {
                let err = ExplainError::InvalidEntry {
                    index: key.clone(),
                    source,
                };
                let reason = err.to_string();
                crate::log_warn!(ctx.with_index(&key), "EXPLAIN_ENTRY_REJECTED", error = reason);
                response.rejected.insert(key, reason);
            }
        }
    }

    Ok(response)
}

/// Normalize every index entry of a parsed explain response.
pub fn normalize_explain_response(
    response: &ExplainResponse,
    ctx: &LogContext,
) -> NormalizedExplainResponse {
    let mut indices: BTreeMap<String, Option<ManagedIndexMetaData>> = response
        .indices
        .iter()
        .map(|(name, record)| (name.clone(), transform_with_logging(Some(record), ctx)))
        .collect();
    for name in response.rejected.keys() {
        indices.insert(name.clone(), None);
    }

    let managed = indices.values().filter(|m| m.is_some()).count();
    log::debug!(
        "{} EXPLAIN_RESPONSE_NORMALIZED indices={} managed={} rejected={} reported_total={:?}",
        ctx,
        indices.len(),
        managed,
        response.rejected.len(),
        response.total_managed_indices
    );

    NormalizedExplainResponse {
        indices,
        total_managed_indices: response.total_managed_indices,
    }
}
