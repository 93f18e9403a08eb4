//! Valores que viajan entre el contexto y una acción.
//!
//! - `CallArguments`: entradas pendientes del step. Se consumen una sola vez.
//! - `ReturnValues`: salidas de una ejecución; inmutables una vez creadas.
//! - `AuditSnapshot`: copia profunda usada sólo para eventos. Nunca comparte
//!   almacenamiento con el contexto vivo.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argumentos de llamada: nombre de parámetro -> valor serializable.
pub type CallArguments = IndexMap<String, Value>;

/// Salidas crudas de una acción: nombre -> valor serializable.
pub type ActionOutputs = IndexMap<String, Value>;

/// Salidas de exactamente una ejecución de acción.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnValues {
    outputs: ActionOutputs,
    /// Nombre de resultado; el core nunca lo fija.
    result: Option<String>,
}

impl ReturnValues {
    pub fn new(outputs: ActionOutputs, result: Option<String>) -> Self {
        Self { outputs, result }
    }

    pub fn outputs(&self) -> &ActionOutputs {
        &self.outputs
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.outputs.get(name)
    }

    pub fn into_outputs(self) -> ActionOutputs {
        self.outputs
    }
}

/// Copia profunda para auditoría.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSnapshot(Value);

impl AuditSnapshot {
    /// `Value` es un tipo valor: clonar el mapa copia toda la estructura.
    pub fn of(values: &IndexMap<String, Value>) -> Self {
        let map: serde_json::Map<String, Value> = values.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Self(Value::Object(map))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self(Value::String(message.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
