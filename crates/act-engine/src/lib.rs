//! act-engine: ejecución de acciones con script sobre un intérprete Python
//! embebido (pyo3).
use pyo3::PyErr;
use thiserror::Error;

pub mod convert;
pub mod core;

pub use self::core::PythonScriptRunner;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("El pool de intérpretes necesita al menos un slot")]
    EmptyPool,
    #[error("Error inicializando Python: {0}")]
    Init(PyErr),
}
