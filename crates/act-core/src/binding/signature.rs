use std::fmt;

use serde_json::Value;

use crate::errors::BoxError;
use crate::session::{SerializableSessionObject, TransientSessionObject};

/// Tipo declarado de un parámetro de valor plano.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Any,
    String,
    Integer,
    Float,
    Boolean,
    List,
    Map,
}

impl ValueType {
    /// Chequeo de asignabilidad. `Null` nunca llega aquí: se trata como
    /// ausente antes del chequeo.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Any => true,
            ValueType::String => value.is_string(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_f64(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::List => value.is_array(),
            ValueType::Map => value.is_object(),
        }
    }

    /// Nombre del tipo en tiempo de ejecución de un valor JSON.
    pub fn name_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Object(_) => "map",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Any => "any",
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::List => "list",
            ValueType::Map => "map",
        };
        f.write_str(name)
    }
}

/// Tipo declarado del parámetro; determina su capacidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Value(ValueType),
    SerializableSession,
    TransientSession,
}

/// Parámetro declarado de una rutina nativa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParameter {
    /// Directiva de binding. `None` = parámetro sin anotar (firma inválida).
    pub binding: Option<String>,
    pub param_type: ParamType,
}

impl ActionParameter {
    pub fn value(binding: impl Into<String>, value_type: ValueType) -> Self {
        Self { binding: Some(binding.into()),
               param_type: ParamType::Value(value_type) }
    }

    pub fn serializable_session(binding: impl Into<String>) -> Self {
        Self { binding: Some(binding.into()),
               param_type: ParamType::SerializableSession }
    }

    pub fn transient_session(binding: impl Into<String>) -> Self {
        Self { binding: Some(binding.into()),
               param_type: ParamType::TransientSession }
    }

    pub fn unannotated(param_type: ParamType) -> Self {
        Self { binding: None, param_type }
    }
}

/// Argumento ya resuelto.
#[derive(Debug, Clone)]
pub enum ActionArgument {
    /// Valor plano; `None` es el centinela "sin valor".
    Value(Option<Value>),
    SerializableSession(SerializableSessionObject),
    TransientSession(TransientSessionObject),
}

/// Lista ordenada de argumentos en el orden de declaración.
#[derive(Debug, Clone, Default)]
pub struct ActionArguments(Vec<ActionArgument>);

impl ActionArguments {
    pub fn new(args: Vec<ActionArgument>) -> Self {
        Self(args)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ActionArgument> {
        self.0.get(index)
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        match self.0.get(index) {
            Some(ActionArgument::Value(v)) => v.as_ref(),
            _ => None,
        }
    }

    pub fn str(&self, index: usize) -> Option<&str> {
        self.value(index).and_then(Value::as_str)
    }

    /// Igual que `str` pero falla si falta el valor (para rutinas que lo
    /// exigen).
    pub fn require_str(&self, index: usize) -> Result<&str, BoxError> {
        self.str(index).ok_or_else(|| format!("argument {index} is missing or not a string").into())
    }

    pub fn serializable_session(&self, index: usize) -> Result<&SerializableSessionObject, BoxError> {
        match self.0.get(index) {
            Some(ActionArgument::SerializableSession(s)) => Ok(s),
            _ => Err(format!("argument {index} is not a serializable session").into()),
        }
    }

    pub fn transient_session(&self, index: usize) -> Result<&TransientSessionObject, BoxError> {
        match self.0.get(index) {
            Some(ActionArgument::TransientSession(s)) => Ok(s),
            _ => Err(format!("argument {index} is not a transient session").into()),
        }
    }
}
