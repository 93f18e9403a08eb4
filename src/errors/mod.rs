//! Errores del runtime (cableado y configuración). Los errores de una
//! acción concreta viven en `act_core::ActionError`.

pub mod runtime_error;

pub use runtime_error::RuntimeError;
