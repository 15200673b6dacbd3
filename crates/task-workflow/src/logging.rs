//! Inicialización de logs del proceso.
//!
//! Las librerías del workspace registran con la fachada `log`; aquí se
//! instala un subscriber de `tracing-subscriber` que también recoge esos
//! registros.
use crate::errors::TaskError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Formato de salida de los logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  #[default]
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = TaskError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "text" | "pretty" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      other => Err(TaskError::Config(format!("formato de log desconocido: '{}' (text|json)", other))),
    }
  }
}

/// Instala el subscriber global una única vez; las llamadas siguientes no
/// hacen nada. `RUST_LOG` tiene prioridad sobre el nivel por defecto
/// (`info`, o `debug` si `verbose`). Los logs van a stderr para no mezclarse
/// con el resultado de la tarea.
pub fn init_logging(format: LogFormat, verbose: bool) {
  INIT.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
        let result = match format {
          LogFormat::Text => builder.try_init(),
          LogFormat::Json => builder.json().try_init(),
        };
        if let Err(e) = result {
          eprintln!("no se pudo inicializar el logging: {}", e);
        }
      });
}
