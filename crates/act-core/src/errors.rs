//! Errores del core de acciones.
//!
//! Todas las variantes son terminales para el step actual: el core no
//! reintenta. El dispatcher las registra, emite `ActionError` y las propaga
//! sin alterar su contenido.

use thiserror::Error;

use crate::session::SessionKind;

/// Error boxeado que una rutina nativa puede devolver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Method {method_name} is not part of class {class_ref}")]
    ActionNotFound { class_ref: String, method_name: String },

    #[error("Invalid signature for action {method_name} of class {class_ref}: all action arguments should be annotated with a binding directive ({annotated} of {declared} annotated)")]
    InvalidActionSignature {
        class_ref: String,
        method_name: String,
        annotated: usize,
        declared: usize,
    },

    #[error("Parameter type mismatch for action {action} of class {class_ref}. Parameter {parameter} expects type {expected} (got {actual})")]
    TypeMismatch {
        action: String,
        class_ref: String,
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("Could not instantiate action class {class_ref}: {reason}")]
    InstantiationFailure { class_ref: String, reason: String },

    #[error("Invocation of method {method_name} of class {class_ref} threw an exception: {cause}")]
    InvocationFailure {
        class_ref: String,
        method_name: String,
        #[source]
        cause: BoxError,
    },

    #[error("Action method {method_name} of class {class_ref} did not return a name/value map (returned {actual})")]
    MalformedActionResult {
        class_ref: String,
        method_name: String,
        actual: String,
    },

    #[error("Error executing python script: {message}")]
    ScriptExecutionFailure { message: String },

    #[error("Problem occurred in operation: '{operation}':\nNon-serializable values are not allowed in the output context of a Python script:\n\tConversion failed for '{variable}' ({repr}),\n\tThe error can be solved by removing the variable from the context in the script: e.g. 'del {variable}'.\n")]
    NonSerializableOutput {
        operation: String,
        variable: String,
        repr: String,
    },

    #[error("Python script not found in action data")]
    MissingScript,

    #[error("Session object '{name}' is already bound as {bound}")]
    SessionKindConflict { name: String, bound: SessionKind },
}

impl ActionError {
    /// Nombre estable de la variante (útil para logs y métricas).
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::ActionNotFound { .. } => "action_not_found",
            ActionError::InvalidActionSignature { .. } => "invalid_action_signature",
            ActionError::TypeMismatch { .. } => "type_mismatch",
            ActionError::InstantiationFailure { .. } => "instantiation_failure",
            ActionError::InvocationFailure { .. } => "invocation_failure",
            ActionError::MalformedActionResult { .. } => "malformed_action_result",
            ActionError::ScriptExecutionFailure { .. } => "script_execution_failure",
            ActionError::NonSerializableOutput { .. } => "non_serializable_output",
            ActionError::MissingScript => "missing_script",
            ActionError::SessionKindConflict { .. } => "session_kind_conflict",
        }
    }
}
