use crate::backend_kind::BackendKind;
use crate::errors::TaskError;
use crate::logging::LogFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_BACKEND: &str = "TASKFLOW_BACKEND";
pub const ENV_LOG_DIR: &str = "TASKFLOW_LOG_DIR";
pub const ENV_EXTENSION: &str = "TASKFLOW_EXTENSION";
pub const ENV_SHELL: &str = "TASKFLOW_SHELL";
pub const ENV_TIMEOUT_SECS: &str = "TASKFLOW_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "TASKFLOW_LOG_FORMAT";

/// Configuración resuelta que consume el motor.
///
/// La resuelve la capa de arranque (variables de entorno + `.env` + flags
/// de la CLI); el motor no parsea flags por su cuenta.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskflowConfig {
  /// Backend de almacenamiento.
  pub backend: BackendKind,
  /// Directorio base de logs; cada proceso escribe en una subcarpeta con
  /// timestamp (ver `run_root`).
  pub log_root: PathBuf,
  /// Extensión de los archivos generados por el backend de directorio.
  pub extension: String,
  /// Shell usado por `ShellCommand`.
  pub shell: String,
  /// Timeout opcional para subprocesos (shell y CLIs de agentes).
  pub command_timeout: Option<Duration>,
  /// Formato de los logs del proceso.
  pub log_format: LogFormat,
}

impl Default for TaskflowConfig {
  fn default() -> Self {
    TaskflowConfig { backend: BackendKind::Directory,
                     log_root: PathBuf::from(".taskflow/logs"),
                     extension: "txt".to_string(),
                     shell: "sh".to_string(),
                     command_timeout: None,
                     log_format: LogFormat::Text }
  }
}

impl TaskflowConfig {
  /// Carga `.env` (si existe) y resuelve la configuración desde el entorno.
  pub fn from_env() -> Result<Self, TaskError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Resuelve la configuración a partir de una función de búsqueda; las
  /// claves ausentes o vacías conservan el valor por defecto.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, TaskError>
    where F: Fn(&str) -> Option<String>
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = TaskflowConfig::default();
    if let Some(v) = get(ENV_BACKEND) {
      config.backend = v.parse()?;
    }
    if let Some(v) = get(ENV_LOG_DIR) {
      config.log_root = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_EXTENSION) {
      config.extension = v;
    }
    if let Some(v) = get(ENV_SHELL) {
      config.shell = v;
    }
    if let Some(v) = get(ENV_TIMEOUT_SECS) {
      let secs: u64 = v.parse()
                       .map_err(|_| TaskError::Config(format!("{} debe ser un entero: '{}'", ENV_TIMEOUT_SECS, v)))?;
      config.command_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(v) = get(ENV_LOG_FORMAT) {
      config.log_format = v.parse()?;
    }
    config.validate()?;
    Ok(config)
  }

  /// Comprueba invariantes básicos de la configuración.
  pub fn validate(&self) -> Result<(), TaskError> {
    let ext = self.extension.trim_start_matches('.');
    if ext.is_empty() {
      return Err(TaskError::Config("la extensión no puede estar vacía".into()));
    }
    if ext.contains('/') || ext.contains('\\') {
      return Err(TaskError::Config(format!("extensión inválida: '{}'", self.extension)));
    }
    if self.shell.trim().is_empty() {
      return Err(TaskError::Config("el shell no puede estar vacío".into()));
    }
    Ok(())
  }

  /// Raíz con timestamp para un proceso: `log_root/{YYYYMMDDTHHMMSS-mmm}`.
  pub fn run_root(&self, now: DateTime<Utc>) -> PathBuf {
    self.log_root.join(now.format("%Y%m%dT%H%M%S-%3f").to_string())
  }
}
