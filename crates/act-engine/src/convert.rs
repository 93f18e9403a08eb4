//! Conversión entre `serde_json::Value` y objetos Python.
//!
//! Python -> JSON acepta sólo el subconjunto serializable: bool, None, int
//! (dentro de i64/u64), float finito, str, list/tuple y dict con claves str.
//! Cualquier otra cosa devuelve `None` y el llamador decide el error.
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use pyo3::IntoPyObjectExt;
use serde_json::{Map, Number, Value};

pub fn to_python<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    match value {
        Value::Null => Ok(py.None().into_bound(py)),
        Value::Bool(b) => b.into_bound_py_any(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_bound_py_any(py)
            } else if let Some(u) = n.as_u64() {
                u.into_bound_py_any(py)
            } else {
                n.as_f64().unwrap_or(f64::NAN).into_bound_py_any(py)
            }
        }
        Value::String(s) => s.as_str().into_bound_py_any(py),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(to_python(py, item)?)?;
            }
            Ok(list.into_any())
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (k, v) in map {
                dict.set_item(k, to_python(py, v)?)?;
            }
            Ok(dict.into_any())
        }
    }
}

pub fn to_json(value: &Bound<'_, PyAny>) -> Option<Value> {
    // bool es subclase de int: va primero.
    if let Ok(b) = value.downcast::<PyBool>() {
        return Some(Value::Bool(b.is_true()));
    }
    if value.is_none() {
        return Some(Value::Null);
    }
    if value.downcast::<PyInt>().is_ok() {
        if let Ok(i) = value.extract::<i64>() {
            return Some(Value::from(i));
        }
        return value.extract::<u64>().ok().map(Value::from);
    }
    if let Ok(f) = value.downcast::<PyFloat>() {
        return Number::from_f64(f.value()).map(Value::Number);
    }
    if value.downcast::<PyString>().is_ok() {
        return value.extract::<String>().ok().map(Value::String);
    }
    if let Ok(list) = value.downcast::<PyList>() {
        return list.iter().map(|item| to_json(&item)).collect::<Option<Vec<_>>>().map(Value::Array);
    }
    if let Ok(tuple) = value.downcast::<PyTuple>() {
        return tuple.iter().map(|item| to_json(&item)).collect::<Option<Vec<_>>>().map(Value::Array);
    }
    if let Ok(dict) = value.downcast::<PyDict>() {
        let mut map = Map::new();
        for (k, v) in dict.iter() {
            if k.downcast::<PyString>().is_err() {
                return None;
            }
            let key: String = k.extract().ok()?;
            map.insert(key, to_json(&v)?);
        }
        return Some(Value::Object(map));
    }
    None
}
