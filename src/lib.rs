//! ISM Core - Index State Management helpers for the dashboards backend
//!
//! This crate normalizes lifecycle status reported by the explain API and
//! builds the query pieces used to filter index listings. It is exposed to
//! the Python backend via PyO3.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `explain` - Explain API models, parsing, and metadata normalization
//! - `query` - Query fragment and search string builders
//! - `logging` - Structured logging with request context
//!
//! Both `explain` and `query` are pure: no I/O and no shared state.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

pub mod explain;
pub mod logging;
pub mod query;

use explain::{
    normalize_explain_response, parse_explain_record, parse_explain_response,
    transform_with_logging, ExplainError,
};
use logging::structured::LogContext;
use query::{build_field_match, build_search_string, OneOrMany};

impl From<ExplainError> for PyErr {
    fn from(err: ExplainError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Initialize the module-level logger
fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Accept either a bare string or a list of strings.
fn extract_one_or_many(value: Option<&PyAny>) -> PyResult<Option<OneOrMany>> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value.is_none() {
        return Ok(None);
    }
    if let Ok(single) = value.extract::<String>() {
        return Ok(Some(OneOrMany::One(single)));
    }
    Ok(Some(OneOrMany::Many(value.extract::<Vec<String>>()?)))
}

/// Normalize one explain API record.
///
/// # Arguments
/// * `explain_json` - The per-index explain record (JSON serialized), or None
///
/// # Returns
/// The dashboard metadata as JSON, or None when the index is not managed
#[pyfunction]
#[pyo3(signature = (explain_json=None))]
fn transform_managed_index_metadata(explain_json: Option<String>) -> PyResult<Option<String>> {
    init_logger();
    let ctx = LogContext::for_request();

    let record = match explain_json.as_deref() {
        Some(json) => parse_explain_record(json)?,
        None => None,
    };

    transform_with_logging(record.as_ref(), &ctx)
        .map(|metadata| to_json(&metadata))
        .transpose()
}

/// Normalize a full explain API response body.
///
/// # Returns
/// Dict with `total_managed_indices` (int or None), `indices`, a dict of
/// index name -> dashboard metadata JSON (None for unmanaged indices), and
/// `rejected`, a dict of index name -> reason for entries that could not be read
#[pyfunction]
fn transform_explain_response(py: Python<'_>, body: String) -> PyResult<Py<PyAny>> {
    init_logger();
    let ctx = LogContext::for_request();

    let response = parse_explain_response(&body, &ctx)?;
    let normalized = normalize_explain_response(&response, &ctx);

    log::info!(
        "{} EXPLAIN_RESPONSE_RECEIVED indices={} total_managed={:?}",
        ctx,
        normalized.indices.len(),
        normalized.total_managed_indices
    );

    let indices_dict = PyDict::new(py);
    for (index, metadata) in &normalized.indices {
        let json = metadata.as_ref().map(to_json).transpose()?;
        indices_dict.set_item(index, json)?;
    }

    let rejected_dict = PyDict::new(py);
    for (index, reason) in &response.rejected {
        rejected_dict.set_item(index, reason)?;
    }

    let py_result = PyDict::new(py);
    py_result.set_item("total_managed_indices", normalized.total_managed_indices)?;
    py_result.set_item("indices", indices_dict)?;
    py_result.set_item("rejected", rejected_dict)?;

    Ok(py_result.into())
}

/// Build the `must` clause for a text search on one field.
///
/// # Returns
/// Either a `query_string` or a `match_all` fragment, JSON serialized
#[pyfunction]
fn get_must_query(field: &str, search: &str) -> PyResult<String> {
    to_json(&build_field_match(field, search))
}

/// Build the target string for an index search.
///
/// `terms`, `indices` and `data_streams` each accept a string or a list of
/// strings.
#[pyfunction]
#[pyo3(signature = (terms=None, indices=None, data_streams=None, show_data_streams=true))]
fn get_search_string(
    terms: Option<&PyAny>,
    indices: Option<&PyAny>,
    data_streams: Option<&PyAny>,
    show_data_streams: bool,
) -> PyResult<String> {
    let terms = extract_one_or_many(terms)?;
    let indices = extract_one_or_many(indices)?;
    let data_streams = extract_one_or_many(data_streams)?;

    Ok(build_search_string(
        terms.as_ref(),
        indices.as_ref(),
        data_streams.as_ref(),
        show_data_streams,
    ))
}

/// Python module definition
#[pymodule]
fn ism_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform_managed_index_metadata, m)?)?;
    m.add_function(wrap_pyfunction!(transform_explain_response, m)?)?;
    m.add_function(wrap_pyfunction!(get_must_query, m)?)?;
    m.add_function(wrap_pyfunction!(get_search_string, m)?)?;
    Ok(())
}
