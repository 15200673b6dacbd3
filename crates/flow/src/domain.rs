// Archivo: domain.rs
// Propósito: tipos de dominio del motor. `DraftRef` es el borrador que
// recorre la cadena de decoradores; `StringRef` es la referencia ya
// comprometida, inmutable una vez que el backend persistió su valor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Referencia comprometida a un valor persistido.
///
/// Sólo expone getters: una vez creada no existe operación para cambiar su
/// contenido ni su ubicación. Para "actualizar" se crea una referencia nueva
/// y, opcionalmente, se redirige el token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRef {
    id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    location: String,
    timestamp: DateTime<Utc>,
}

impl StringRef {
    /// Identificador único dentro de la vida del contexto.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Token humano asignado por decoradores, si existe.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Ubicación en el backend (clave en memoria o ruta relativa a la raíz).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Momento en que se creó el borrador.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Etiqueta legible: el token si existe, si no el id.
    pub fn label(&self) -> String {
        self.token.clone().unwrap_or_else(|| self.id.to_string())
    }
}

impl From<DraftRef> for StringRef {
    fn from(draft: DraftRef) -> Self {
        StringRef { id: draft.id,
                    token: draft.token,
                    location: draft.location,
                    timestamp: draft.timestamp }
    }
}

/// Borrador de referencia.
///
/// El `id` y el `timestamp` se fijan al crear el borrador y no se pueden
/// cambiar; `token` y `location` los reescriben los decoradores. Cada método
/// `with_*` consume el borrador y devuelve uno nuevo, de modo que la cadena
/// de decoradores es un fold inmutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRef {
    id: Uuid,
    token: Option<String>,
    location: String,
    timestamp: DateTime<Utc>,
}

impl DraftRef {
    /// Crea un borrador con ubicación por defecto y sin token.
    pub fn new(id: Uuid, location: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { id,
               token: None,
               location: location.into(),
               timestamp }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Devuelve un borrador con el token reemplazado.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Devuelve un borrador con la ubicación reemplazada.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Token si existe, si no el id en texto.
    pub fn label(&self) -> String {
        self.token.clone().unwrap_or_else(|| self.id.to_string())
    }
}
