//! Acciones nativas: registro explícito + invocación.
//!
//! En lugar de introspección de tipos en runtime, cada clase de acción se
//! registra bajo una clave estable (`ActionClass::CLASS_REF`) con sus métodos
//! declarados. El resto del core sólo ve el `ActionRegistry`.

mod invoker;
mod registry;

pub use invoker::NativeInvoker;
pub use registry::{ActionClass, ActionHandler, ActionMethod, ActionRegistry, RegisteredMethod};
