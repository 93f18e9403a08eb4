//! act-core: núcleo de ejecución de acciones de un workflow.
//!
//! Recibe un `ActionStep`, resuelve sus entradas desde el
//! `ExecutionContext`, ejecuta la acción (nativa o script) y confirma las
//! salidas junto con el siguiente step.
pub mod binding;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod event;
pub mod model;
pub mod native;
pub mod script;
pub mod session;

pub use binding::{ActionArgument, ActionArguments, ActionParameter, BindingResolver, ParamType, ValueType};
pub use dispatcher::{ActionDispatcher, DispatcherBuilder};
pub use errors::{ActionError, BoxError};
pub use event::{ActionEvent, ActionEventKind, ChannelEventSink, EventEmitter, EventSink, EventSinkError, InMemoryEventSink,
                LogEventSink, StepType};
pub use model::{ActionKind, ActionOutputs, ActionSpec, ActionStep, AuditSnapshot, CallArguments, ExecutionContext,
                ExecutionPath, ReturnValues, StepId};
pub use native::{ActionClass, ActionMethod, ActionRegistry, NativeInvoker};
pub use script::{ScriptRunner, UnavailableScriptRunner};
pub use session::{RunSessions, SerializableSessionObject, SessionKind, SessionObject, SessionStore, TransientSessionData,
                  TransientSessionObject};
