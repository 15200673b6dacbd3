use thiserror::Error;

// Errores comunes de la capa de tareas.
//
// Este enum centraliza los errores que pueden ocurrir al validar y
// ejecutar una tarea: errores del motor (`FlowError`), validación de
// argumentos, configuración, E/S y plantillas.
#[derive(Error, Debug)]
pub enum TaskError {
  /// Errores originados por el motor de referencias o por un comando.
  #[error("Error de flujo: {0}")]
  Flow(#[from] flow::FlowError),

  /// Argumentos de la tarea mal formados. Se detectan antes de ejecutar
  /// cualquier comando.
  #[error("Error de validación: {0}")]
  Validation(String),

  /// Valores de configuración inválidos.
  #[error("Error de configuración: {0}")]
  Config(String),

  /// Errores de E/S fuera del motor (por ejemplo al preparar directorios).
  #[error("Error de E/S: {0}")]
  Io(#[from] std::io::Error),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Error generico.
  #[error("Otro error: {0}")]
  Other(String),
}

impl TaskError {
  /// Código de salida del proceso para este error: 2 para errores de uso
  /// (validación/configuración), 1 para el resto.
  pub fn exit_code(&self) -> i32 {
    match self {
      TaskError::Validation(_) | TaskError::Config(_) => 2,
      _ => 1,
    }
  }
}
