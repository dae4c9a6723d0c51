// Python bindings. Only built with `--features python`.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::process_upload_json;

/// process_upload(csv_text, athlete_json=None, cfg_json=None) -> str (JSON)
#[pyfunction]
#[pyo3(signature = (csv_text, athlete_json=None, cfg_json=None))]
fn process_upload(
    csv_text: &str,
    athlete_json: Option<&str>,
    cfg_json: Option<&str>,
) -> PyResult<String> {
    process_upload_json(csv_text, athlete_json, cfg_json)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Prometheus text exposition of the upload counters.
#[pyfunction]
fn metrics_text() -> String {
    crate::telemetry::gather_text()
}

#[pymodule]
fn forceplate_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_upload, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
