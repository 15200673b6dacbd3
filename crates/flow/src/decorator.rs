// Archivo: decorator.rs
// Propósito: decoradores de referencias. Un decorador es una
// transformación pura `DraftRef -> DraftRef` sobre los metadatos de nombre
// e indexado; nunca ve ni modifica el valor.
use crate::domain::DraftRef;
use chrono::{DateTime, Utc};

/// Transformación pura sobre un borrador de referencia.
///
/// Los decoradores se aplican en el orden recibido (fold de izquierda a
/// derecha): si dos decoradores escriben el mismo campo gana el último.
pub trait RefDecorator: Send + Sync {
    fn decorate(&self, draft: DraftRef) -> DraftRef;

    /// Empaqueta el decorador para listas heterogéneas.
    fn boxed(self) -> Box<dyn RefDecorator>
        where Self: Sized + 'static
    {
        Box::new(self)
    }
}

impl<F> RefDecorator for F where F: Fn(DraftRef) -> DraftRef + Send + Sync
{
    fn decorate(&self, draft: DraftRef) -> DraftRef {
        self(draft)
    }
}

/// Aplica la lista de decoradores sobre el borrador.
pub fn apply_decorators(draft: DraftRef, decorators: &[Box<dyn RefDecorator>]) -> DraftRef {
    decorators.iter().fold(draft, |acc, decorator| decorator.decorate(acc))
}

/// Asigna un token al borrador.
#[derive(Debug, Clone)]
pub struct TokenDecorator {
    token: String,
}

impl TokenDecorator {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl RefDecorator for TokenDecorator {
    fn decorate(&self, draft: DraftRef) -> DraftRef {
        draft.with_token(self.token.clone())
    }
}

/// Reemplaza la ubicación tal cual.
#[derive(Debug, Clone)]
pub struct NameDecorator {
    name: String,
}

impl NameDecorator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RefDecorator for NameDecorator {
    fn decorate(&self, draft: DraftRef) -> DraftRef {
        draft.with_location(self.name.clone())
    }
}

/// Deriva la ubicación de un timestamp compacto, los milisegundos, una
/// etiqueta y una extensión: `{YYYYMMDDTHHMMSS}-{mmm}-{etiqueta}.{ext}`.
///
/// La etiqueta es el `stem` explícito si se configuró; si no, el token
/// vigente del borrador; si no, su id. El timestamp es el del propio
/// borrador, así que el resultado sólo depende de sus campos.
#[derive(Debug, Clone)]
pub struct TimestampNameDecorator {
    stem: Option<String>,
    extension: String,
}

impl TimestampNameDecorator {
    pub fn new(extension: impl Into<String>) -> Self {
        Self { stem: None,
               extension: extension.into() }
    }

    pub fn with_stem(stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self { stem: Some(stem.into()),
               extension: extension.into() }
    }
}

impl RefDecorator for TimestampNameDecorator {
    fn decorate(&self, draft: DraftRef) -> DraftRef {
        let label = self.stem.clone().unwrap_or_else(|| draft.label());
        let name = timestamped_name(draft.timestamp(), &label, &self.extension);
        draft.with_location(name)
    }
}

/// Antepone un prefijo fijo a la ubicación actual.
#[derive(Debug, Clone)]
pub struct PrefixDecorator {
    prefix: String,
}

impl PrefixDecorator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl RefDecorator for PrefixDecorator {
    fn decorate(&self, draft: DraftRef) -> DraftRef {
        let location = format!("{}{}", self.prefix, draft.location());
        draft.with_location(location)
    }
}

/// Nombre de archivo ordenable cronológicamente.
///
/// Los caracteres fuera de `[A-Za-z0-9._-]` de la etiqueta se sustituyen
/// por `_` para que el resultado sea siempre un único componente de ruta.
pub fn timestamped_name(timestamp: DateTime<Utc>, label: &str, extension: &str) -> String {
    let label: String = label.chars()
                             .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
                             .collect();
    let base = format!("{}-{:03}-{}",
                       timestamp.format("%Y%m%dT%H%M%S"),
                       timestamp.timestamp_subsec_millis().min(999),
                       label);
    if extension.is_empty() {
        base
    } else {
        format!("{}.{}", base, extension.trim_start_matches('.'))
    }
}
