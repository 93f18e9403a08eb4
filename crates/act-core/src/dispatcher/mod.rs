//! Dispatcher de acciones: punto de entrada único para ejecutar el cuerpo
//! de un step.

mod builder;
mod core;

pub use builder::DispatcherBuilder;
pub use self::core::ActionDispatcher;
