//! Destinos de eventos.
use std::sync::mpsc::Sender;
use std::sync::Mutex;

use log::info;
use thiserror::Error;

use super::ActionEvent;

#[derive(Debug, Error)]
pub enum EventSinkError {
    #[error("event channel closed")]
    ChannelClosed,
    #[error("event sink unavailable: {0}")]
    Unavailable(String),
}

pub trait EventSink: Send + Sync {
    fn publish(&self, event: ActionEvent) -> Result<(), EventSinkError>;
}

/// Acumula eventos en memoria (tests y demos).
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: Mutex<Vec<ActionEvent>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActionEvent> {
        self.events.lock().map(|v| v.clone()).unwrap_or_else(|p| p.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|v| v.len()).unwrap_or_else(|p| p.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: ActionEvent) -> Result<(), EventSinkError> {
        let mut guard = self.events.lock().map_err(|e| EventSinkError::Unavailable(e.to_string()))?;
        guard.push(event);
        Ok(())
    }
}

/// Escribe cada evento como una línea `info!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn publish(&self, event: ActionEvent) -> Result<(), EventSinkError> {
        info!("[{:?}] path={} {} {}", event.kind, event.path, event.message, event.payload);
        Ok(())
    }
}

/// Reenvía eventos por un canal. Falla cuando el receptor ya no existe.
#[derive(Debug)]
pub struct ChannelEventSink {
    tx: Mutex<Sender<ActionEvent>>,
}

impl ChannelEventSink {
    pub fn new(tx: Sender<ActionEvent>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: ActionEvent) -> Result<(), EventSinkError> {
        let tx = self.tx.lock().map_err(|e| EventSinkError::Unavailable(e.to_string()))?;
        tx.send(event).map_err(|_| EventSinkError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ActionEventKind;
    use crate::model::{AuditSnapshot, ExecutionPath};
    use std::sync::mpsc;

    fn sample() -> ActionEvent {
        ActionEvent::new(ActionEventKind::ActionStart,
                         ExecutionPath::root().to_string(),
                         "start",
                         "callArguments",
                         AuditSnapshot::message("x"))
    }

    #[test]
    fn channel_sink_errors_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelEventSink::new(tx);
        sink.publish(sample()).expect("receiver alive");
        assert_eq!(rx.recv().unwrap().message, "start");
        drop(rx);
        assert!(matches!(sink.publish(sample()), Err(EventSinkError::ChannelClosed)));
    }

    #[test]
    fn in_memory_sink_keeps_order() {
        let sink = InMemoryEventSink::new();
        sink.publish(sample()).unwrap();
        let mut second = sample();
        second.message = "second".into();
        sink.publish(second).unwrap();
        let msgs: Vec<String> = sink.events().into_iter().map(|e| e.message).collect();
        assert_eq!(msgs, vec!["start", "second"]);
    }
}
