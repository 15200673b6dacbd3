// Archivo: index.rs
// Propósito: índice secundario token -> id con semántica last-write-wins.
use dashmap::DashMap;
use uuid::Uuid;

/// Índice de tokens de un backend.
///
/// Cada backend posee exactamente un índice durante toda su vida; se
/// entrega por valor en el constructor. Escribir un token ya usado
/// redirige el mapeo sin borrar la referencia anterior, que sigue
/// recuperable por su id.
#[derive(Debug, Default)]
pub struct TokenIndex {
    tokens: DashMap<String, Uuid>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id más reciente asociado al token.
    pub fn lookup(&self, token: &str) -> Option<Uuid> {
        self.tokens.get(token).map(|entry| *entry.value())
    }

    /// Apunta `token` a `id` y devuelve el id anterior si lo había.
    ///
    /// Redirigir un token se registra siempre a nivel `info`, con
    /// independencia del backend.
    pub fn point(&self, token: &str, id: Uuid) -> Option<Uuid> {
        let previous = self.tokens.insert(token.to_string(), id);
        if let Some(prev) = previous {
            if prev != id {
                log::info!("token '{}' redirigido: {} -> {}", token, prev, id);
            }
        }
        previous
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens conocidos, ordenados alfabéticamente.
    pub fn tokens(&self) -> Vec<String> {
        let mut out: Vec<String> = self.tokens.iter().map(|e| e.key().clone()).collect();
        out.sort();
        out
    }

    pub fn clear(&self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_last_write_wins() {
        let index = TokenIndex::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(index.point("x", a), None);
        assert_eq!(index.point("x", b), Some(a));
        assert_eq!(index.lookup("x"), Some(b));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn unknown_token_is_none() {
        let index = TokenIndex::new();
        assert!(index.lookup("missing").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn tokens_sorted_and_clear() {
        let index = TokenIndex::new();
        index.point("b", Uuid::new_v4());
        index.point("a", Uuid::new_v4());
        assert_eq!(index.tokens(), vec!["a".to_string(), "b".to_string()]);
        index.clear();
        assert!(index.is_empty());
    }
}
