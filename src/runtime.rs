//! Runtime listo para usar: dispatcher con el runner Python, las clases de
//! `act-adapters` registradas y el mapa de sesiones transitorias del proceso.
use std::sync::Arc;

use act_core::{ActionDispatcher, ActionRegistry, ActionStep, EventSink, ExecutionContext, LogEventSink, ReturnValues,
               TransientSessionData};
use act_engine::PythonScriptRunner;
use log::info;

use crate::config::RuntimeConfig;
use crate::errors::RuntimeError;

pub struct Runtime {
    dispatcher: ActionDispatcher,
    transient: TransientSessionData,
    script_pool_size: usize,
}

impl Runtime {
    /// Runtime con eventos a `log`.
    pub fn new(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Self::with_event_sink(config, Arc::new(LogEventSink))
    }

    pub fn with_event_sink(config: &RuntimeConfig, sink: Arc<dyn EventSink>) -> Result<Self, RuntimeError> {
        let registry = Arc::new(ActionRegistry::new());
        act_adapters::register_all(&registry);
        let runner = PythonScriptRunner::with_pool_size(config.script_pool_size)?;
        let script_pool_size = runner.pool_size();
        info!("runtime:ready classes={:?} script_pool={script_pool_size}", registry.class_refs());
        let dispatcher = ActionDispatcher::builder().registry(registry)
                                                    .script_runner(Arc::new(runner))
                                                    .event_sink(sink)
                                                    .build();
        Ok(Self { dispatcher,
                  transient: TransientSessionData::new(),
                  script_pool_size })
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn transient_sessions(&self) -> &TransientSessionData {
        &self.transient
    }

    /// Intérpretes Python disponibles para steps de script.
    pub fn script_pool_size(&self) -> usize {
        self.script_pool_size
    }

    pub fn execute(&self, step: &ActionStep, context: &mut ExecutionContext) -> Result<ReturnValues, RuntimeError> {
        Ok(self.dispatcher.execute(step, context, &self.transient)?)
    }
}
