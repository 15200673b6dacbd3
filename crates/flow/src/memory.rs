// Archivo: memory.rs
// Propósito: backend en memoria. Rápido y efímero, pensado para sesiones
// cortas y pruebas; el contenido vive en un diccionario local al proceso.
use crate::command::Command;
use crate::decorator::{apply_decorators, RefDecorator};
use crate::domain::StringRef;
use crate::engine::{new_draft, run_command, RefLedger};
use crate::errors::{FlowError, Result};
use crate::index::TokenIndex;
use crate::repository::Flow;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// Backend en memoria: `location -> valor` más el registro de referencias.
///
/// La ubicación por defecto de un borrador es su id.
#[derive(Debug, Default)]
pub struct InMemoryFlow {
    contents: DashMap<String, String>,
    ledger: RefLedger,
}

impl InMemoryFlow {
    /// Crea un backend vacío con su propio índice de tokens.
    pub fn new() -> Self {
        Self::with_index(TokenIndex::new())
    }

    /// Crea un backend que toma posesión de `index`.
    pub fn with_index(index: TokenIndex) -> Self {
        Self { contents: DashMap::new(),
               ledger: RefLedger::new(index) }
    }

    /// Descarta todo el contenido y el índice de tokens de una vez.
    pub fn clear(&self) {
        self.contents.clear();
        self.ledger.clear();
    }

    /// Número de referencias comprometidas.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.ledger.index().tokens()
    }
}

#[async_trait]
impl Flow for InMemoryFlow {
    async fn set(&self, value: String, decorators: &[Box<dyn RefDecorator>]) -> Result<StringRef> {
        let draft = apply_decorators(new_draft(|id, _| id.to_string()), decorators);
        if draft.location().is_empty() {
            return Err(FlowError::Validation("ubicación vacía".into()));
        }
        match self.contents.entry(draft.location().to_string()) {
            Entry::Occupied(_) => return Err(FlowError::LocationInUse(draft.location().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
        let committed = StringRef::from(draft);
        self.ledger.record(committed.clone());
        Ok(committed)
    }

    async fn get(&self, reference: &StringRef) -> Option<String> {
        self.contents.get(reference.location()).map(|entry| entry.value().clone())
    }

    async fn run(&self, command: &dyn Command, args: &[String]) -> Result<Vec<StringRef>> {
        run_command(self, command, args).await
    }

    fn token(&self, name: &str) -> Option<String> {
        let reference = self.ledger.token_ref(name)?;
        self.contents.get(reference.location()).map(|entry| entry.value().clone())
    }

    fn token_ref(&self, name: &str) -> Option<StringRef> {
        self.ledger.token_ref(name)
    }

    fn resolve(&self, id: &Uuid) -> Option<StringRef> {
        self.ledger.resolve(id)
    }
}
