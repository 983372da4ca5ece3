//! Managed index metadata normalization.
//!
//! Converts the explain API's per-index record into the dashboard's
//! `ManagedIndexMetaData`. Each sub-record maps through its own total
//! function, so an absent sub-record stays absent in the output.

use crate::explain::models::{
    ExplainAction, ExplainManagedIndexMetaData, ExplainRetryInfo, ExplainState,
    ManagedIndexAction, ManagedIndexMetaData, ManagedIndexRetryInfo, ManagedIndexState,
};
use crate::logging::structured::LogContext;

/// Normalize an explain API record.
///
/// Returns `None` when there is no record, or when the record has no `index`
/// or an empty one (the index is not managed yet, or ISM is still
/// initializing it). In the latter case the configured policy id may still
/// be set on the record; it is deliberately not carried over.
pub fn transform_managed_index_metadata(
    metadata: Option<&ExplainManagedIndexMetaData>,
) -> Option<ManagedIndexMetaData> {
    let metadata = metadata?;
    let index = metadata.managed_index()?;

    Some(ManagedIndexMetaData {
        index: index.to_string(),
        // index_uuid and policy_id are always reported alongside index
        index_uuid: metadata.index_uuid.clone(),
        policy_id: metadata.policy_id.clone(),
        policy_seq_no: metadata.policy_seq_no.clone(),
        policy_primary_term: metadata.policy_primary_term.clone(),
        policy_completed: metadata.policy_completed.clone(),
        rolled_over: metadata.rolled_over.clone(),
        transition_to: metadata.transition_to.clone(),
        state: metadata.state.as_ref().map(transform_state),
        action: metadata.action.as_ref().map(transform_action),
        retry_info: metadata.retry_info.as_ref().map(transform_retry_info),
        info: metadata.info.clone(),
    })
}

/// Same as [`transform_managed_index_metadata`], with log lines for the
/// outcome and a warning when `index_uuid` or `policy_id` is missing.
pub fn transform_with_logging(
    metadata: Option<&ExplainManagedIndexMetaData>,
    ctx: &LogContext,
) -> Option<ManagedIndexMetaData> {
    let Some(raw) = metadata else {
        crate::log_debug!(ctx, "EXPLAIN_SKIP", reason = "no_explain_data");
        return None;
    };

    let Some(index) = raw.managed_index() else {
        crate::log_debug!(
            ctx,
            "EXPLAIN_SKIP",
            reason = "not_managed",
            configured_policy_id = raw.configured_policy_id(),
        );
        return None;
    };

    let ctx = ctx.with_index(index);
    let missing = missing_guaranteed_fields(raw);
    if !missing.is_empty() {
        crate::log_warn!(ctx, "EXPLAIN_FIELD_MISSING", fields = missing);
    }

    let normalized = transform_managed_index_metadata(Some(raw));

    if let Some(normalized) = &normalized {
        crate::log_debug!(
            ctx,
            "EXPLAIN_NORMALIZED",
            policy_id = normalized.policy_id.as_deref(),
            state = normalized.state.as_ref().and_then(|s| s.name.as_ref()),
            action = normalized.action.as_ref().and_then(|a| a.name.as_ref()),
        );
    }

    normalized
}

/// Fields the explain API always reports next to `index`, missing from `raw`.
pub fn missing_guaranteed_fields(raw: &ExplainManagedIndexMetaData) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if raw.index_uuid.is_none() {
        missing.push("index_uuid");
    }
    if raw.policy_id.is_none() {
        missing.push("policy_id");
    }
    missing
}

fn transform_state(state: &ExplainState) -> ManagedIndexState {
    ManagedIndexState {
        name: state.name.clone(),
        start_time: state.start_time.clone(),
    }
}

fn transform_action(action: &ExplainAction) -> ManagedIndexAction {
    ManagedIndexAction {
        name: action.name.clone(),
        start_time: action.start_time.clone(),
        index: action.index.clone(),
        failed: action.failed.clone(),
        consumed_retries: action.consumed_retries.clone(),
    }
}

fn transform_retry_info(retry_info: &ExplainRetryInfo) -> ManagedIndexRetryInfo {
    ManagedIndexRetryInfo {
        failed: retry_info.failed.clone(),
        consumed_retries: retry_info.consumed_retries.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, Once};

    use super::*;
    use serde_json::json;

    fn explain(value: serde_json::Value) -> ExplainManagedIndexMetaData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_metadata() {
        assert_eq!(transform_managed_index_metadata(None), None);
    }

    #[test]
    fn test_empty_record() {
        let raw = explain(json!({}));
        assert_eq!(transform_managed_index_metadata(Some(&raw)), None);
    }

    #[test]
    fn test_unmanaged_index_with_policy_setting() {
        let raw = explain(json!({
            "index.plugins.index_state_management.policy_id": "hot_warm",
            "policy_id": "hot_warm",
            "index_uuid": "u1"
        }));
        assert_eq!(transform_managed_index_metadata(Some(&raw)), None);
    }

    #[test]
    fn test_minimal_managed_index() {
        let raw = explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1"
        }));

        let normalized = transform_managed_index_metadata(Some(&raw)).unwrap();
        assert_eq!(normalized.index, "i1");
        assert_eq!(normalized.index_uuid.as_deref(), Some("u1"));
        assert_eq!(normalized.policy_id.as_deref(), Some("p1"));
        assert!(normalized.state.is_none());
        assert!(normalized.action.is_none());
        assert!(normalized.retry_info.is_none());
        assert!(normalized.info.is_none());
    }

    #[test]
    fn test_state_renamed() {
        let raw = explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1",
            "state": { "name": "s", "start_time": 100 }
        }));

        let normalized = transform_managed_index_metadata(Some(&raw)).unwrap();
        assert_eq!(
            normalized.state,
            Some(ManagedIndexState {
                name: Some(json!("s")),
                start_time: Some(json!(100)),
            })
        );
        assert_eq!(
            serde_json::to_value(&normalized.state).unwrap(),
            json!({ "name": "s", "startTime": 100 })
        );
    }

    #[test]
    fn test_full_record() {
        let raw = explain(json!({
            "index": "logs-000002",
            "index_uuid": "Zr2W4nEbS9S4Jh2D8rEGbA",
            "policy_id": "rollover_policy",
            "policy_seq_no": 7,
            "policy_primary_term": 2,
            "policy_completed": false,
            "rolled_over": true,
            "transition_to": "warm",
            "state": { "name": "hot", "start_time": 1_700_000_000_000_i64 },
            "action": {
                "name": "rollover",
                "start_time": 1_700_000_500_000_i64,
                "index": 1,
                "failed": true,
                "consumed_retries": 2
            },
            "retry_info": { "failed": true, "consumed_retries": 2 },
            "info": { "message": "Missing rollover_alias" },
            "enabled": true
        }));

        let normalized = transform_managed_index_metadata(Some(&raw)).unwrap();
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({
                "index": "logs-000002",
                "indexUuid": "Zr2W4nEbS9S4Jh2D8rEGbA",
                "policyId": "rollover_policy",
                "policySeqNo": 7,
                "policyPrimaryTerm": 2,
                "policyCompleted": false,
                "rolledOver": true,
                "transitionTo": "warm",
                "state": { "name": "hot", "startTime": 1_700_000_000_000_i64 },
                "action": {
                    "name": "rollover",
                    "startTime": 1_700_000_500_000_i64,
                    "index": 1,
                    "failed": true,
                    "consumedRetries": 2
                },
                "retryInfo": { "failed": true, "consumedRetries": 2 },
                "info": { "message": "Missing rollover_alias" }
            })
        );
    }

    #[test]
    fn test_empty_sub_records_stay_present() {
        let raw = explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1",
            "action": {},
            "retry_info": {}
        }));

        let normalized = transform_managed_index_metadata(Some(&raw)).unwrap();
        assert_eq!(normalized.action, Some(ManagedIndexAction::default()));
        assert_eq!(normalized.retry_info, Some(ManagedIndexRetryInfo::default()));
        assert!(normalized.state.is_none());
    }

    #[test]
    fn test_missing_uuid_propagates_absence() {
        install_capture_logger();
        let ctx = LogContext::new("req-missing-uuid");
        let raw = explain(json!({ "index": "i1" }));

        let normalized = transform_with_logging(Some(&raw), &ctx).unwrap();
        assert_eq!(normalized.index, "i1");
        assert!(normalized.index_uuid.is_none());
        assert!(normalized.policy_id.is_none());

        let warnings: Vec<String> = captured_logs("req-missing-uuid")
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, message)| message)
            .collect();
        assert_eq!(
            warnings,
            vec![r#"[request=req-missing-uuid] [index=i1] EXPLAIN_FIELD_MISSING fields=["index_uuid", "policy_id"]"#]
        );
    }

    #[test]
    fn test_complete_record_logs_no_warning() {
        install_capture_logger();
        let ctx = LogContext::new("req-complete");
        let raw = explain(json!({ "index": "i1", "index_uuid": "u1", "policy_id": "p1" }));

        assert!(transform_with_logging(Some(&raw), &ctx).is_some());
        assert!(captured_logs("req-complete")
            .iter()
            .all(|(level, _)| *level != log::Level::Warn));
    }

    #[test]
    fn test_missing_guaranteed_fields() {
        assert_eq!(
            missing_guaranteed_fields(&explain(json!({ "index": "i1", "policy_id": "p1" }))),
            vec!["index_uuid"]
        );
        assert!(missing_guaranteed_fields(&explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1"
        })))
        .is_empty());
    }

    #[test]
    fn test_empty_index_is_unmanaged() {
        let ctx = LogContext::new("req-empty-index");
        let raw = explain(json!({ "index": "", "index_uuid": "u1", "policy_id": "p1" }));

        assert_eq!(transform_managed_index_metadata(Some(&raw)), None);
        assert_eq!(transform_with_logging(Some(&raw), &ctx), None);

        let raw = explain(json!({ "index": null, "index_uuid": "u1", "policy_id": "p1" }));
        assert_eq!(transform_managed_index_metadata(Some(&raw)), None);
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let raw = explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1",
            "policy_completed": "yes",
            "transition_to": null,
            "action": { "name": "rollover", "failed": "true", "consumed_retries": null },
            "info": null
        }));

        let normalized = transform_managed_index_metadata(Some(&raw)).unwrap();
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({
                "index": "i1",
                "indexUuid": "u1",
                "policyId": "p1",
                "policyCompleted": "yes",
                "transitionTo": null,
                "action": { "name": "rollover", "failed": "true", "consumedRetries": null },
                "info": null
            })
        );
    }

    struct CaptureLogger {
        records: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    fn install_capture_logger() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    /// Log lines emitted so far for one request id.
    fn captured_logs(request_id: &str) -> Vec<(log::Level, String)> {
        let prefix = format!("[request={}]", request_id);
        CAPTURE
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, message)| message.starts_with(&prefix))
            .cloned()
            .collect()
    }

    #[test]
    fn test_logging_variant_matches_plain_transform() {
        let ctx = LogContext::new("req-test");
        let raw = explain(json!({
            "index": "i1",
            "index_uuid": "u1",
            "policy_id": "p1",
            "state": { "name": "delete", "start_time": 5 }
        }));

        assert_eq!(
            transform_with_logging(Some(&raw), &ctx),
            transform_managed_index_metadata(Some(&raw))
        );
        assert_eq!(transform_with_logging(None, &ctx), None);
    }
}
