//! `PythonScriptRunner`: pool de namespaces Python.
//!
//! Cada slot guarda un diccionario que hace de globals y locals del script.
//! Antes de cada ejecución el diccionario se vacía, así ninguna variable de
//! una ejecución es visible en la siguiente. Con un solo slot las
//! ejecuciones quedan estrictamente serializadas; con más, corren sobre
//! namespaces independientes.
//!
//! Los slots libres se reparten desde una lista protegida por un `Condvar`:
//! quien espera recibe el primer slot que se libere, sea cual sea.
//!
//! Orden de bloqueo: primero el slot, después el GIL (`Python::attach`).
//! Nunca al revés.
use std::ffi::CString;
use std::sync::{Condvar, Mutex, OnceLock, PoisonError};

use act_core::constants::DEFAULT_SCRIPT_POOL_SIZE;
use act_core::{ActionError, ActionOutputs, CallArguments, ReturnValues, ScriptRunner};
use log::debug;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};
use serde_json::Value;

use crate::convert::{to_json, to_python};
use crate::EngineError;

/// Tipos cuyos valores nunca forman parte de la salida (módulos, funciones,
/// métodos, handles de fichero).
static EXCLUDED_TYPES: OnceLock<Py<PyTuple>> = OnceLock::new();

fn excluded_types(py: Python<'_>) -> PyResult<Bound<'_, PyTuple>> {
    if let Some(types) = EXCLUDED_TYPES.get() {
        return Ok(types.bind(py).clone());
    }
    let types = py.import("types")?;
    let io = py.import("io")?;
    let tuple = PyTuple::new(py,
                             [types.getattr("ModuleType")?,
                              types.getattr("FunctionType")?,
                              types.getattr("BuiltinFunctionType")?,
                              types.getattr("MethodType")?,
                              io.getattr("IOBase")?])?;
    let _ = EXCLUDED_TYPES.set(tuple.clone().unbind());
    Ok(tuple)
}

type Slot = Mutex<Option<Py<PyDict>>>;

pub struct PythonScriptRunner {
    slots: Vec<Slot>,
    free: Mutex<Vec<usize>>,
    released: Condvar,
}

/// Préstamo exclusivo de un slot; al soltarlo el índice vuelve a la lista
/// libre y despierta a un hilo en espera.
struct SlotLease<'r> {
    runner: &'r PythonScriptRunner,
    index: usize,
}

impl Drop for SlotLease<'_> {
    fn drop(&mut self) {
        self.runner.release(self.index);
    }
}

impl PythonScriptRunner {
    /// Runner con el tamaño de pool por defecto (serialización estricta).
    pub fn init() -> Result<Self, EngineError> {
        Self::with_pool_size(DEFAULT_SCRIPT_POOL_SIZE)
    }

    pub fn with_pool_size(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::EmptyPool);
        }
        Python::attach(|py| excluded_types(py).map(|_| ())).map_err(EngineError::Init)?;
        debug!("python:init pool_size={size}");
        Ok(Self::with_slots(size))
    }

    fn with_slots(size: usize) -> Self {
        Self { slots: (0..size).map(|_| Mutex::new(None)).collect(),
               free: Mutex::new((0..size).rev().collect()),
               released: Condvar::new() }
    }

    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    /// Toma un slot libre; si no hay ninguno, espera al primero que se
    /// devuelva.
    fn acquire(&self) -> SlotLease<'_> {
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(index) = free.pop() {
                return SlotLease { runner: self, index };
            }
            free = self.released.wait(free).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn release(&self, index: usize) {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).push(index);
        self.released.notify_one();
    }
}

impl std::fmt::Debug for PythonScriptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonScriptRunner").field("pool_size", &self.slots.len()).finish()
    }
}

impl ScriptRunner for PythonScriptRunner {
    fn run(&self, call_arguments: &mut CallArguments, source: &str, operation: &str) -> Result<ReturnValues, ActionError> {
        let bindings: Vec<(String, Value)> = call_arguments.drain(..).collect();
        let script = CString::new(source).map_err(|e| script_failure(e.to_string()))?;

        let lease = self.acquire();
        let mut slot = self.slots[lease.index].lock().unwrap_or_else(PoisonError::into_inner);
        Python::attach(|py| {
            let namespace = fresh_namespace(py, &mut slot);
            let outcome = execute(py, &namespace, bindings, &script, operation);
            namespace.clear();
            outcome.map(|outputs| ReturnValues::new(outputs, None))
        })
    }
}

fn fresh_namespace<'py>(py: Python<'py>, slot: &mut Option<Py<PyDict>>) -> Bound<'py, PyDict> {
    match slot.as_ref() {
        Some(dict) => {
            let dict = dict.bind(py).clone();
            dict.clear();
            dict
        }
        None => {
            let dict = PyDict::new(py);
            *slot = Some(dict.clone().unbind());
            dict
        }
    }
}

fn execute(py: Python<'_>,
           namespace: &Bound<'_, PyDict>,
           bindings: Vec<(String, Value)>,
           script: &CString,
           operation: &str)
           -> Result<ActionOutputs, ActionError> {
    for (name, value) in bindings {
        let obj = to_python(py, &value).map_err(|e| script_failure(e.to_string()))?;
        namespace.set_item(name, obj).map_err(|e| script_failure(e.to_string()))?;
    }
    py.run(script.as_c_str(), Some(namespace), Some(namespace))
      .map_err(|e| script_failure(e.to_string()))?;
    collect_outputs(py, namespace, operation)
}

fn collect_outputs(py: Python<'_>, namespace: &Bound<'_, PyDict>, operation: &str) -> Result<ActionOutputs, ActionError> {
    let excluded = excluded_types(py).map_err(|e| script_failure(e.to_string()))?;
    let mut outputs = ActionOutputs::new();
    for (key, value) in namespace.iter() {
        let Ok(name) = key.extract::<String>() else {
            continue;
        };
        if name.starts_with("__") && name.ends_with("__") {
            continue;
        }
        if value.is_instance(excluded.as_any()).unwrap_or(false) {
            continue;
        }
        match to_json(&value) {
            Some(json) => {
                outputs.insert(name, json);
            }
            None => {
                let repr = value.str().map(|s| s.to_string()).unwrap_or_else(|_| "<unprintable>".to_string());
                return Err(ActionError::NonSerializableOutput { operation: operation.to_string(),
                                                                variable: name,
                                                                repr });
            }
        }
    }
    debug!("python:outputs operation={operation} count={}", outputs.len());
    Ok(outputs)
}

fn script_failure(message: String) -> ActionError {
    ActionError::ScriptExecutionFailure { message }
}
