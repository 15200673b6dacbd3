use super::session::TaskSession;
use crate::errors::TaskError;
use async_trait::async_trait;
use indexmap::IndexMap;

/// Argumentos ya validados de una tarea.
///
/// `validate` los construye a partir de la lista cruda de la CLI; `execute`
/// sólo lee de aquí.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPlan {
  params: IndexMap<String, String>,
  rest: Vec<String>,
}

impl TaskPlan {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.params.insert(name.into(), value.into());
    self
  }

  pub fn with_rest(mut self, rest: Vec<String>) -> Self {
    self.rest = rest;
    self
  }

  pub fn param(&self, name: &str) -> Option<&str> {
    self.params.get(name).map(|s| s.as_str())
  }

  /// Parámetro que `validate` garantizó; su ausencia es un error de
  /// programación del handler, no del usuario.
  pub fn require(&self, name: &str) -> Result<&str, TaskError> {
    self.param(name)
        .ok_or_else(|| TaskError::Other(format!("parámetro '{}' ausente en el plan", name)))
  }

  pub fn rest(&self) -> &[String] {
    &self.rest
  }
}

/// Orquestador asociado a un verbo de la CLI.
///
/// `validate` no debe tener efectos: si falla no se ejecuta ningún
/// comando. `execute` hace una o más llamadas secuenciales a
/// `session.run(...)` y puede elegir la referencia titular con
/// `session.set_headline`; si no lo hace, el titular es la última
/// referencia producida.
#[async_trait]
pub trait TaskHandler: Send + Sync {
  /// Verbo de la CLI (sin espacios).
  fn verb(&self) -> &str;

  /// Línea de uso para la ayuda.
  fn usage(&self) -> &str;

  fn validate(&self, args: &[String]) -> Result<TaskPlan, TaskError>;

  async fn execute(&self, session: &mut TaskSession<'_>, plan: TaskPlan) -> Result<(), TaskError>;
}
