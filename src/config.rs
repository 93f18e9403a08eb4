//! Configuración del runtime.
//! Lee variables de entorno (y `.env` si existe) una sola vez (`CONFIG`).
use std::env;

use act_core::constants::DEFAULT_SCRIPT_POOL_SIZE;
use once_cell::sync::Lazy;

use crate::errors::RuntimeError;

pub const POOL_SIZE_VAR: &str = "ACTFLOW_SCRIPT_POOL_SIZE";
pub const LOG_VAR: &str = "ACTFLOW_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Namespaces independientes del runner Python.
    pub script_pool_size: usize,
    /// Filtro de logging (sintaxis `EnvFilter`).
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { script_pool_size: DEFAULT_SCRIPT_POOL_SIZE,
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, RuntimeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeError>
        where F: Fn(&str) -> Option<String>
    {
        let script_pool_size = match lookup(POOL_SIZE_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(RuntimeError::Config(format!("{POOL_SIZE_VAR} debe ser un entero positivo (valor: '{raw}')"))),
            },
            None => DEFAULT_SCRIPT_POOL_SIZE,
        };
        let log_filter = lookup(LOG_VAR).filter(|v| !v.trim().is_empty())
                                        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self { script_pool_size, log_filter })
    }
}

/// Configuración global perezosa. Si el entorno es inválido se usan los
/// valores por defecto; `RuntimeConfig::from_env` expone el error.
pub static CONFIG: Lazy<RuntimeConfig> = Lazy::new(|| {
    RuntimeConfig::from_env().unwrap_or_else(|e| {
                                 log::warn!("config: {e}; usando valores por defecto");
                                 RuntimeConfig::default()
                             })
});
