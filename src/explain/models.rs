//! Explain API and dashboard metadata models.
//!
//! `ExplainManagedIndexMetaData` mirrors the snake_case record the explain API
//! reports per index. `ManagedIndexMetaData` is the camelCase shape the
//! dashboard renders. Every explain field is optional; absent fields are
//! omitted when the dashboard shape is serialized.
//!
//! Status values (sequence numbers, timestamps, flags, messages) are carried
//! as raw JSON and never validated. An explicit `null` stays `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw lifecycle status of one index, as reported by the explain API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainManagedIndexMetaData {
    /// Policy id index setting; the `opendistro` key is the legacy spelling.
    #[serde(rename = "index.plugins.index_state_management.policy_id")]
    pub plugins_policy_id: Option<String>,
    #[serde(rename = "index.opendistro.index_state_management.policy_id")]
    pub opendistro_policy_id: Option<String>,
    pub index: Option<String>,
    pub index_uuid: Option<String>,
    pub policy_id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub policy_seq_no: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub policy_primary_term: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub policy_completed: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub rolled_over: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub transition_to: Option<Value>,
    pub state: Option<ExplainState>,
    pub action: Option<ExplainAction>,
    pub retry_info: Option<ExplainRetryInfo>,
    #[serde(default, deserialize_with = "present")]
    pub info: Option<Value>,
    pub enabled: Option<Value>,
}

impl ExplainManagedIndexMetaData {
    /// Name of the index when it is under active management. An empty
    /// name counts as unmanaged.
    pub fn managed_index(&self) -> Option<&str> {
        self.index.as_deref().filter(|index| !index.is_empty())
    }

    /// Policy id configured on the index settings, whether or not the index
    /// is actively managed yet. The plugins setting wins over the legacy one.
    pub fn configured_policy_id(&self) -> Option<&str> {
        self.plugins_policy_id
            .as_deref()
            .or(self.opendistro_policy_id.as_deref())
    }
}

/// Keep a field that is present in the payload, even when it is `null`.
/// Paired with `#[serde(default)]` so a missing field stays `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainState {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_time: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainAction {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_time: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub index: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub failed: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub consumed_retries: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainRetryInfo {
    #[serde(default, deserialize_with = "present")]
    pub failed: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub consumed_retries: Option<Value>,
}

/// Lifecycle status of a managed index, in the shape the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedIndexMetaData {
    pub index: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_seq_no: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_primary_term: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_completed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolled_over: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ManagedIndexState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ManagedIndexAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_info: Option<ManagedIndexRetryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedIndexState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedIndexAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_retries: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedIndexRetryInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_retries: Option<Value>,
}
