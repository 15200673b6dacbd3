// Archivo: errors.rs
// Propósito: definir los errores del motor de referencias y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;

/// Errores comunes del motor de flujos.
///
/// - `NotFound`: referencia o token inexistente cuando el caller exige que exista.
/// - `Validation`: ubicación o argumento mal formado.
/// - `Storage`: fallo de E/S al persistir un valor.
/// - `LocationInUse`: la ubicación ya contiene contenido comprometido.
/// - `Command`: fallo dentro de `Command::execute`.
/// - `Other`: cualquier otro error.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Entidad no encontrada (por ejemplo, un token sin referencia).
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Datos de entrada inválidos (ubicación vacía, rutas absolutas...).
    #[error("Error de validación: {0}")]
    Validation(String),
    /// Error de almacenamiento al escribir en `location`.
    #[error("Error de almacenamiento en '{location}': {message}")]
    Storage { location: String, message: String },
    /// El contenido comprometido nunca se reescribe.
    #[error("Ubicación ocupada: {0}")]
    LocationInUse(String),
    /// Error propagado desde la ejecución de un comando.
    #[error("Comando '{command}' falló: {message}")]
    Command { command: String, message: String },
    /// Otro tipo de error.
    #[error("Otro: {0}")]
    Other(String),
}

impl FlowError {
    /// Atajo para construir `FlowError::Storage` a partir de un error de E/S.
    pub fn storage(location: impl Into<String>, err: std::io::Error) -> Self {
        FlowError::Storage { location: location.into(),
                             message: err.to_string() }
    }

    /// Atajo para construir `FlowError::Command`.
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Command { command: command.into(),
                             message: message.into() }
    }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;
