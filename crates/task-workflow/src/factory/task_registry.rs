use crate::errors::TaskError;
use crate::task::TaskHandler;
use crate::tasks::{builtin_handlers, TaskDefaults};
use indexmap::IndexMap;
use std::sync::Arc;

/// Tabla verbo -> handler.
///
/// Sustituye la carga dinámica de módulos por un paso explícito de registro
/// durante el arranque. Conserva el orden de registro para la ayuda.
#[derive(Default)]
pub struct TaskRegistry {
  handlers: IndexMap<String, Arc<dyn TaskHandler>>,
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registro con las tareas incluidas.
  pub fn with_builtins(defaults: &TaskDefaults) -> Result<Self, TaskError> {
    let mut registry = Self::new();
    for handler in builtin_handlers(defaults) {
      registry.register(handler)?;
    }
    Ok(registry)
  }

  /// Valida la forma del handler y lo registra. Rechaza verbos vacíos, con
  /// espacios o ya registrados, y líneas de uso vacías.
  pub fn register(&mut self, handler: Arc<dyn TaskHandler>) -> Result<(), TaskError> {
    let verb = handler.verb().to_string();
    if verb.is_empty() || verb.chars().any(char::is_whitespace) {
      return Err(TaskError::Config(format!("verbo inválido: '{}'", verb)));
    }
    if handler.usage().trim().is_empty() {
      return Err(TaskError::Config(format!("el verbo '{}' no declara uso", verb)));
    }
    if self.handlers.contains_key(&verb) {
      return Err(TaskError::Config(format!("verbo duplicado: '{}'", verb)));
    }
    log::debug!("tarea registrada: {}", verb);
    self.handlers.insert(verb, handler);
    Ok(())
  }

  pub fn get(&self, verb: &str) -> Option<Arc<dyn TaskHandler>> {
    self.handlers.get(verb).cloned()
  }

  pub fn verbs(&self) -> Vec<&str> {
    self.handlers.keys().map(|k| k.as_str()).collect()
  }

  /// Líneas de uso en orden de registro.
  pub fn usage_lines(&self) -> Vec<String> {
    self.handlers.values().map(|h| h.usage().to_string()).collect()
  }

  pub fn len(&self) -> usize {
    self.handlers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty()
  }
}
