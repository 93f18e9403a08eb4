//! Constantes del core de ejecución de acciones.
//!
//! Las claves de payload y los mensajes forman parte del contrato observable
//! de los eventos: consumidores externos (auditoría, UI) dependen de ellos.

/// Clave del snapshot de argumentos en el evento `ActionStart`.
pub const CALL_ARGUMENTS_KEY: &str = "callArguments";
/// Clave del mensaje de error en el evento `ActionError`.
pub const EXCEPTION_KEY: &str = "exception";
/// Clave del snapshot de salidas en el evento `ActionEnd`.
pub const RETURN_VALUES_KEY: &str = "returnValues";

/// Mensaje del evento de cierre exitoso.
pub const ACTION_PERFORMED_MESSAGE: &str = "Action performed";

/// Tamaño por defecto del pool de intérpretes (1 = serialización estricta).
pub const DEFAULT_SCRIPT_POOL_SIZE: usize = 1;
