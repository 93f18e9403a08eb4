//! actflow: núcleo de ejecución de acciones de workflow.
//!
//! - `config`: configuración desde el entorno.
//! - `errors`: errores de cableado (`RuntimeError`).
//! - `logging`: subscriber de logging para binarios.
//! - `runtime`: dispatcher + runner Python + adapters, listo para usar.
//!
//! Los tipos del core se re-exportan desde `act_core`.

pub mod config;
pub mod errors;
pub mod logging;
pub mod runtime;

pub use act_core::{ActionError, ActionSpec, ActionStep, CallArguments, ExecutionContext, ReturnValues, StepId};
pub use config::{RuntimeConfig, CONFIG};
pub use errors::RuntimeError;
pub use runtime::Runtime;
