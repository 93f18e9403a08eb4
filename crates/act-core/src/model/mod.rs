//! Modelos neutrales (ActionSpec, ExecutionContext, valores de binding,...)

pub mod action;
pub mod context;
pub mod path;
pub mod values;

pub use action::{ActionKind, ActionSpec, ActionStep, StepId};
pub use context::ExecutionContext;
pub use path::ExecutionPath;
pub use values::{ActionOutputs, AuditSnapshot, CallArguments, ReturnValues};
