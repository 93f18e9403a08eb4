//! Eventos de ciclo de vida de una acción y sus destinos.

mod emitter;
mod sink;
mod types;

pub use emitter::EventEmitter;
pub use sink::{ChannelEventSink, EventSink, EventSinkError, InMemoryEventSink, LogEventSink};
pub use types::{ActionEvent, ActionEventKind, StepType};
