//! Tareas incluidas: cada una es un `TaskHandler` ligado a un verbo.
pub mod ask_task;
pub mod review_task;
pub mod shell_task;
pub mod transform_task;

pub use ask_task::AskTask;
pub use review_task::ReviewTask;
pub use shell_task::ShellTask;
pub use transform_task::TransformTask;

use crate::commands::OutputNaming;
use crate::config::TaskflowConfig;
use crate::errors::TaskError;
use crate::task::TaskHandler;
use std::sync::Arc;
use std::time::Duration;

/// Valores de configuración que comparten las tareas incluidas.
#[derive(Debug, Clone)]
pub struct TaskDefaults {
  pub shell: String,
  pub extension: String,
  pub timeout: Option<Duration>,
}

impl TaskDefaults {
  pub fn from_config(config: &TaskflowConfig) -> Self {
    Self { shell: config.shell.clone(),
           extension: config.extension.clone(),
           timeout: config.command_timeout }
  }

  /// Nombre con token y timestamp para las salidas de las tareas.
  pub fn naming(&self, token: &str) -> OutputNaming {
    OutputNaming::token(token).with_extension(self.extension.clone())
  }
}

impl Default for TaskDefaults {
  fn default() -> Self {
    Self::from_config(&TaskflowConfig::default())
  }
}

/// Handlers incluidos, en el orden en que aparecen en la ayuda.
pub fn builtin_handlers(defaults: &TaskDefaults) -> Vec<Arc<dyn TaskHandler>> {
  vec![Arc::new(ShellTask::new(defaults.clone())),
       Arc::new(AskTask::new(defaults.clone())),
       Arc::new(TransformTask::new(defaults.clone())),
       Arc::new(ReviewTask::new(defaults.clone()))]
}

/// Convierte un error de parseo del motor en error de validación.
pub(crate) fn invalid(e: flow::FlowError) -> TaskError {
  match e {
    flow::FlowError::Validation(msg) => TaskError::Validation(msg),
    other => TaskError::Validation(other.to_string()),
  }
}
