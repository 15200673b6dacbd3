// Archivo: command.rs
// Propósito: protocolo de comandos. Un comando se configura en su
// constructor ("qué hacer") y recibe en `execute` sólo el contexto
// compartido y argumentos ad hoc ("cómo ejecutarlo").
use crate::decorator::RefDecorator;
use crate::errors::Result;
use crate::repository::Flow;
use async_trait::async_trait;

/// Un valor producido por un comando junto con los decoradores que
/// nombran/indexan su referencia.
pub struct CommandOutput {
    pub value: String,
    pub decorators: Vec<Box<dyn RefDecorator>>,
}

impl CommandOutput {
    /// Valor sin decoradores.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(),
               decorators: Vec::new() }
    }

    /// Añade un decorador al final de la cadena.
    pub fn decorated(mut self, decorator: impl RefDecorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Añade varios decoradores ya empaquetados, respetando su orden.
    pub fn with_decorators(mut self, decorators: impl IntoIterator<Item = Box<dyn RefDecorator>>) -> Self {
        self.decorators.extend(decorators);
        self
    }
}

impl std::fmt::Debug for CommandOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandOutput")
         .field("value", &self.value)
         .field("decorators", &self.decorators.len())
         .finish()
    }
}

/// Unidad de trabajo reutilizable.
///
/// `execute` devuelve una lista ordenada de salidas; el orden determina el
/// orden de las referencias devueltas por `Flow::run`. Una lista vacía es
/// válida. Un comando puede leer salidas previas con `context.get` y anidar
/// otros comandos con `context.run`.
#[async_trait]
pub trait Command: Send + Sync {
    /// Nombre corto usado en logs y errores.
    fn name(&self) -> &str;

    async fn execute(&self, context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>>;
}
