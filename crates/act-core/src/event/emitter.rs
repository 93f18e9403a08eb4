use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use log::warn;

use super::{ActionEvent, EventSink};

/// Envoltorio best-effort sobre un `EventSink`.
///
/// Un fallo (o pánico) del destino nunca altera el resultado de la acción:
/// se registra con `warn!` y se descarta.
#[derive(Clone)]
pub struct EventEmitter {
    sink: Arc<dyn EventSink>,
}

impl EventEmitter {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn emit(&self, event: ActionEvent) {
        let kind = event.kind;
        match catch_unwind(AssertUnwindSafe(|| self.sink.publish(event))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("event:emit failed kind={kind:?}: {e}"),
            Err(_) => warn!("event:emit sink panicked kind={kind:?}"),
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EventEmitter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ActionEventKind, EventSinkError, InMemoryEventSink};
    use crate::model::{AuditSnapshot, ExecutionPath};

    struct PanickingSink;

    impl EventSink for PanickingSink {
        fn publish(&self, _event: ActionEvent) -> Result<(), EventSinkError> {
            panic!("sink down")
        }
    }

    fn event() -> ActionEvent {
        ActionEvent::new(ActionEventKind::ActionEnd,
                         ExecutionPath::root().to_string(),
                         "done",
                         "returnValues",
                         AuditSnapshot::message("ok"))
    }

    #[test]
    fn emit_swallows_panics() {
        EventEmitter::new(Arc::new(PanickingSink)).emit(event());
    }

    #[test]
    fn emit_forwards_to_sink() {
        let sink = Arc::new(InMemoryEventSink::new());
        EventEmitter::new(sink.clone()).emit(event());
        assert_eq!(sink.len(), 1);
    }
}
