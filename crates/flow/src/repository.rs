// Archivo: repository.rs
// Propósito: definir el trait `Flow`, el contrato que deben implementar los
// backends de almacenamiento (memoria, directorio, etc.).
use crate::command::Command;
use crate::decorator::RefDecorator;
use crate::domain::StringRef;
use crate::errors::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Contexto compartido por todos los comandos de una tarea.
///
/// Garantías comunes a cualquier backend:
/// - `set` sólo devuelve `Ok` cuando el valor ya es legible con `get`; si
///   la persistencia falla, la referencia nunca aparece en el índice.
/// - `get` y `token` devuelven `None` ante una ubicación ausente o ilegible
///   (fallo suave): el caller decide qué hacer con "no encontrado".
/// - `run` compromete las salidas en el orden devuelto por el comando y no
///   deshace las que ya se comprometieron si una posterior falla.
#[async_trait]
pub trait Flow: Send + Sync {
    /// Crea un borrador, aplica los decoradores, persiste `value` en la
    /// ubicación resultante y actualiza el índice de tokens.
    async fn set(&self, value: String, decorators: &[Box<dyn RefDecorator>]) -> Result<StringRef>;

    /// Contenido de la ubicación de `reference`, o `None`.
    async fn get(&self, reference: &StringRef) -> Option<String>;

    /// Ejecuta `command` y compromete cada una de sus salidas.
    async fn run(&self, command: &dyn Command, args: &[String]) -> Result<Vec<StringRef>>;

    /// Contenido de la referencia más reciente con ese token.
    fn token(&self, name: &str) -> Option<String>;

    /// Referencia más reciente con ese token.
    fn token_ref(&self, name: &str) -> Option<StringRef>;

    /// Recupera una referencia comprometida por su id.
    fn resolve(&self, id: &Uuid) -> Option<StringRef>;
}
