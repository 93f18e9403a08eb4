//! Descripción inmutable del cuerpo de un step.
//!
//! El compilador de workflows (externo) produce un `ActionSpec` por step; el
//! dispatcher lo recibe envuelto en un `ActionStep` junto con el puntero al
//! siguiente step.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador opaco del siguiente step a ejecutar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cuerpo ejecutable de un step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionSpec {
    /// Rutina nativa registrada en el `ActionRegistry`.
    Native { class_ref: String, method_name: String },
    /// Script embebido ejecutado por un `ScriptRunner`.
    Scripted { source_text: String },
}

/// Tag del tipo de acción (sin payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Native,
    Scripted,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Native => f.write_str("NATIVE"),
            ActionKind::Scripted => f.write_str("SCRIPTED"),
        }
    }
}

impl ActionSpec {
    pub fn native(class_ref: impl Into<String>, method_name: impl Into<String>) -> Self {
        ActionSpec::Native { class_ref: class_ref.into(),
                             method_name: method_name.into() }
    }

    pub fn scripted(source_text: impl Into<String>) -> Self {
        ActionSpec::Scripted { source_text: source_text.into() }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionSpec::Native { .. } => ActionKind::Native,
            ActionSpec::Scripted { .. } => ActionKind::Scripted,
        }
    }
}

/// Unidad que el orquestador entrega al dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    /// Nombre de la operación que contiene la acción (sólo diagnóstico).
    pub operation: String,
    pub action: ActionSpec,
    pub next_step: StepId,
}

impl ActionStep {
    pub fn new(operation: impl Into<String>, action: ActionSpec, next_step: StepId) -> Self {
        Self { operation: operation.into(),
               action,
               next_step }
    }
}
