use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use task_workflow::{LogFormat, TaskError, TaskflowConfig};

/// Compone tareas a partir de comandos cuyas salidas quedan guardadas como
/// referencias (en memoria o en archivos con timestamp).
#[derive(Parser, Debug)]
#[command(name = "taskflow", version, about)]
pub struct Cli {
    /// Backend de referencias: memory | directory (TASKFLOW_BACKEND).
    #[arg(long)]
    pub backend: Option<String>,

    /// Directorio base de logs (TASKFLOW_LOG_DIR).
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Extensión de los archivos generados (TASKFLOW_EXTENSION).
    #[arg(long)]
    pub extension: Option<String>,

    /// Shell para los scripts (TASKFLOW_SHELL).
    #[arg(long)]
    pub shell: Option<String>,

    /// Timeout en segundos para subprocesos; 0 lo desactiva.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Logs de depuración.
    #[arg(short, long)]
    pub verbose: bool,

    /// Logs en JSON.
    #[arg(long)]
    pub log_json: bool,

    /// Imprime el resumen de la tarea en JSON en lugar del contenido.
    #[arg(long)]
    pub json: bool,

    /// Verbo de la tarea; sin él se listan las tareas disponibles.
    pub verb: Option<String>,

    /// Argumentos de la tarea.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Entorno (y `.env`) primero; los flags explícitos ganan.
    pub fn resolve_config(&self) -> Result<TaskflowConfig, TaskError> {
        let mut config = TaskflowConfig::from_env()?;
        self.apply(&mut config)?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut TaskflowConfig) -> Result<(), TaskError> {
        if let Some(backend) = &self.backend {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = &self.log_dir {
            config.log_root = dir.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if let Some(shell) = &self.shell {
            config.shell = shell.clone();
        }
        if let Some(secs) = self.timeout {
            config.command_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if self.log_json {
            config.log_format = LogFormat::Json;
        }
        config.validate()
    }
}
