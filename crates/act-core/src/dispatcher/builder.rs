//! Builder para `ActionDispatcher`.
//!
//! Defaults:
//! - registro vacío,
//! - `UnavailableScriptRunner` (las acciones con script fallan),
//! - `LogEventSink`.
use std::sync::Arc;

use super::ActionDispatcher;
use crate::event::{EventEmitter, EventSink, LogEventSink};
use crate::native::ActionRegistry;
use crate::script::{ScriptRunner, UnavailableScriptRunner};

#[derive(Default)]
pub struct DispatcherBuilder {
    registry: Option<Arc<ActionRegistry>>,
    scripts: Option<Arc<dyn ScriptRunner>>,
    sink: Option<Arc<dyn EventSink>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(mut self, registry: Arc<ActionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn script_runner(mut self, runner: Arc<dyn ScriptRunner>) -> Self {
        self.scripts = Some(runner);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> ActionDispatcher {
        let registry = self.registry.unwrap_or_default();
        let scripts = self.scripts.unwrap_or_else(|| Arc::new(UnavailableScriptRunner));
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogEventSink));
        ActionDispatcher::from_parts(registry, scripts, EventEmitter::new(sink))
    }
}
