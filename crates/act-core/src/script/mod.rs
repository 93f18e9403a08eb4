//! Contrato para ejecutores de acciones con script.
//!
//! El core no sabe nada del intérprete: `act-engine` aporta la
//! implementación embebida. Aquí sólo vive el trait y un ejecutor nulo para
//! despliegues sin intérprete.
use log::warn;

use crate::errors::ActionError;
use crate::model::{CallArguments, ReturnValues};

pub trait ScriptRunner: Send + Sync {
    /// Ejecuta `source` con los argumentos ligados como variables.
    ///
    /// Consume (vacía) `call_arguments`. `operation` sólo se usa en
    /// mensajes de error.
    fn run(&self, call_arguments: &mut CallArguments, source: &str, operation: &str) -> Result<ReturnValues, ActionError>;
}

/// Ejecutor por defecto cuando no se configuró ningún intérprete.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableScriptRunner;

impl ScriptRunner for UnavailableScriptRunner {
    fn run(&self, call_arguments: &mut CallArguments, _source: &str, operation: &str) -> Result<ReturnValues, ActionError> {
        call_arguments.clear();
        warn!("script:unavailable operation={operation}");
        Err(ActionError::ScriptExecutionFailure { message: "no script interpreter configured".to_string() })
    }
}
