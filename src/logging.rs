//! Inicialización del subscriber de logging.
//!
//! Las librerías del workspace usan la fachada `log`; el subscriber de
//! `tracing-subscriber` recoge esos registros a través de su puente
//! `tracing-log`.
use tracing_subscriber::EnvFilter;

/// Instala el subscriber global. Llamadas repetidas no tienen efecto.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_tolerates_bad_filters() {
        init_logging("not a [valid filter");
        init_logging("debug");
        log::info!("logging ready");
    }
}
