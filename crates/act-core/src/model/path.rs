use std::fmt;

use serde::{Deserialize, Serialize};

/// Ruta de ejecución jerárquica (p. ej. `0.3.1`). Sólo se usa para correlar
/// eventos; los eventos de acción se publican con la ruta del padre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPath {
    segments: Vec<u32>,
}

impl ExecutionPath {
    pub fn root() -> Self {
        Self { segments: vec![0] }
    }

    pub fn from_segments(segments: Vec<u32>) -> Self {
        Self { segments }
    }

    /// Desciende un nivel (entra a un sub-flujo).
    pub fn down(&mut self) {
        self.segments.push(0);
    }

    /// Sube un nivel; no hace nada en la raíz.
    pub fn up(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop();
        }
    }

    /// Avanza la posición en el nivel actual.
    pub fn forward(&mut self) {
        match self.segments.last_mut() {
            Some(last) => *last += 1,
            None => self.segments.push(0),
        }
    }

    pub fn parent_path(&self) -> String {
        match self.segments.split_last() {
            Some((_, parent)) => join(parent),
            None => String::new(),
        }
    }
}

fn join(segments: &[u32]) -> String {
    segments.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(".")
}

impl fmt::Display for ExecutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.segments))
    }
}
