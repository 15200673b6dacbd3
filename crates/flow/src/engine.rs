// Archivo: engine.rs
// Propósito: piezas compartidas por los backends: el registro de
// referencias comprometidas (`RefLedger`) y el bucle de `run`.
//
// Nota: los backends sólo deciden dónde vive el contenido. La identidad,
// el índice de tokens y el orden de commit de `run` viven aquí para que
// ambos se comporten igual.
use crate::command::Command;
use crate::domain::{DraftRef, StringRef};
use crate::errors::Result;
use crate::index::TokenIndex;
use crate::repository::Flow;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

/// Registro de referencias comprometidas de un backend.
///
/// Guarda `id -> StringRef` y el `TokenIndex` asociado. Sólo se escribe
/// después de que el backend persistió el contenido.
#[derive(Debug, Default)]
pub struct RefLedger {
    refs: DashMap<Uuid, StringRef>,
    index: TokenIndex,
}

impl RefLedger {
    /// Crea el registro tomando posesión del índice.
    pub fn new(index: TokenIndex) -> Self {
        Self { refs: DashMap::new(),
               index }
    }

    /// Inserta una referencia ya persistida y, si tiene token, lo redirige.
    pub fn record(&self, reference: StringRef) {
        if let Some(token) = reference.token() {
            self.index.point(token, reference.id());
        }
        log::debug!("referencia comprometida {} en '{}'", reference.id(), reference.location());
        self.refs.insert(reference.id(), reference);
    }

    pub fn resolve(&self, id: &Uuid) -> Option<StringRef> {
        self.refs.get(id).map(|entry| entry.value().clone())
    }

    pub fn token_ref(&self, token: &str) -> Option<StringRef> {
        let id = self.index.lookup(token)?;
        self.resolve(&id)
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn clear(&self) {
        self.refs.clear();
        self.index.clear();
    }
}

/// Borrador con id nuevo y timestamp actual. `default_location` deriva la
/// ubicación por defecto del id y el timestamp.
pub fn new_draft<F>(default_location: F) -> DraftRef
    where F: FnOnce(Uuid, chrono::DateTime<Utc>) -> String
{
    let id = Uuid::new_v4();
    let timestamp = Utc::now();
    DraftRef::new(id, default_location(id, timestamp), timestamp)
}

/// Bucle común de `Flow::run`.
///
/// Si `execute` falla el error se propaga tal cual. Si falla el commit de
/// una salida, las anteriores quedan comprometidas (no hay rollback) y se
/// deja constancia en el log.
pub async fn run_command(flow: &dyn Flow, command: &dyn Command, args: &[String]) -> Result<Vec<StringRef>> {
    log::debug!("ejecutando comando '{}' con {} argumentos", command.name(), args.len());
    let outputs = command.execute(flow, args).await?;
    let total = outputs.len();
    let mut committed = Vec::with_capacity(total);
    for output in outputs {
        match flow.set(output.value, &output.decorators).await {
            Ok(reference) => committed.push(reference),
            Err(e) => {
                if !committed.is_empty() {
                    log::warn!("comando '{}': {} de {} salidas quedaron comprometidas antes del error",
                               command.name(),
                               committed.len(),
                               total);
                }
                return Err(e);
            }
        }
    }
    Ok(committed)
}
