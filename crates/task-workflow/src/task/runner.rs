use super::handler::TaskHandler;
use super::session::TaskSession;
use crate::errors::TaskError;
use flow::{Flow, StringRef};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::time::{Duration, Instant};

/// Estados del ciclo de vida de una tarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
  Idle,
  ValidatingArguments,
  Executing,
  Succeeded,
  Failed,
}

impl fmt::Display for TaskState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      TaskState::Idle => "idle",
      TaskState::ValidatingArguments => "validating-arguments",
      TaskState::Executing => "executing",
      TaskState::Succeeded => "succeeded",
      TaskState::Failed => "failed",
    };
    write!(f, "{}", s)
  }
}

/// Resultado visible de una tarea exitosa.
#[derive(Debug, Clone)]
pub struct TaskReport {
  pub verb: String,
  /// Referencia titular.
  pub headline: StringRef,
  /// Todas las referencias producidas por los `run` de la tarea, en orden.
  pub produced: Vec<StringRef>,
  pub duration: Duration,
}

impl TaskReport {
  pub fn headline_token(&self) -> Option<&str> {
    self.headline.token()
  }

  /// Resumen serializable para salida JSON.
  pub fn summary(&self) -> serde_json::Value {
    json!({
      "verb": self.verb,
      "headline": self.headline,
      "token": self.headline_token(),
      "produced": self.produced,
      "duration_ms": self.duration.as_millis() as u64,
    })
  }
}

/// Conduce una tarea por `Idle -> ValidatingArguments -> Executing ->
/// {Succeeded | Failed}`.
///
/// Un fallo de validación pasa directamente a `Failed` sin ejecutar
/// comandos. Un fallo durante la ejecución no deshace nada: las
/// referencias ya comprometidas siguen en el backend.
pub struct TaskRunner<'a> {
  flow: &'a dyn Flow,
  state: TaskState,
  history: Vec<TaskState>,
}

impl<'a> TaskRunner<'a> {
  pub fn new(flow: &'a dyn Flow) -> Self {
    Self { flow,
           state: TaskState::Idle,
           history: vec![TaskState::Idle] }
  }

  pub fn state(&self) -> TaskState {
    self.state
  }

  /// Estados recorridos por la última ejecución, incluido el inicial.
  pub fn history(&self) -> &[TaskState] {
    &self.history
  }

  fn transition(&mut self, next: TaskState) {
    log::debug!("tarea: {} -> {}", self.state, next);
    self.state = next;
    self.history.push(next);
  }

  pub async fn run(&mut self, handler: &dyn TaskHandler, args: &[String]) -> Result<TaskReport, TaskError> {
    let started = Instant::now();
    // Cada ejecución recorre su propio ciclo desde `Idle`.
    self.state = TaskState::Idle;
    self.history = vec![TaskState::Idle];
    self.transition(TaskState::ValidatingArguments);
    let plan = match handler.validate(args) {
      Ok(plan) => plan,
      Err(e) => {
        self.transition(TaskState::Failed);
        return Err(e);
      }
    };

    self.transition(TaskState::Executing);
    let mut session = TaskSession::new(self.flow);
    let outcome = handler.execute(&mut session, plan).await;
    if let Err(e) = outcome {
      log::warn!("tarea '{}' falló tras {} referencias comprometidas: {}",
                 handler.verb(),
                 session.produced().len(),
                 e);
      self.transition(TaskState::Failed);
      return Err(e);
    }

    let (headline, produced) = session.into_parts();
    let Some(headline) = headline else {
      self.transition(TaskState::Failed);
      return Err(TaskError::Other(format!("la tarea '{}' no produjo ningún resultado", handler.verb())));
    };
    self.transition(TaskState::Succeeded);
    let duration = started.elapsed();
    log::info!("tarea '{}' completada en {:?} ({} referencias)", handler.verb(), duration, produced.len());
    Ok(TaskReport { verb: handler.verb().to_string(),
                    headline,
                    produced,
                    duration })
  }
}
