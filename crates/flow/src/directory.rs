// Archivo: directory.rs
// Propósito: backend respaldado por un directorio. Cada referencia
// comprometida es un archivo bajo la raíz configurada, inspeccionable
// después de que el proceso termina. Un manifiesto JSONL (`refs.jsonl`)
// registra las referencias en orden de commit.
use crate::command::Command;
use crate::decorator::{apply_decorators, timestamped_name, RefDecorator};
use crate::domain::StringRef;
use crate::engine::{new_draft, run_command, RefLedger};
use crate::errors::{FlowError, Result};
use crate::index::TokenIndex;
use crate::repository::Flow;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Nombre del manifiesto dentro de la raíz.
pub const MANIFEST_FILE: &str = "refs.jsonl";

/// Backend de directorio.
///
/// La ubicación por defecto es `{YYYYMMDDTHHMMSS}-{mmm}-{id}.{ext}`. Las
/// ubicaciones son rutas relativas a la raíz; se rechazan rutas absolutas
/// y componentes `..`.
#[derive(Debug)]
pub struct DirectoryFlow {
    root: PathBuf,
    extension: String,
    ledger: RefLedger,
}

impl DirectoryFlow {
    /// Crea (si hace falta) la raíz y devuelve un backend vacío.
    pub async fn create(root: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await
                                        .map_err(|e| FlowError::storage(root.display().to_string(), e))?;
        Ok(Self { root,
                  extension: extension.into(),
                  ledger: RefLedger::new(TokenIndex::new()) })
    }

    /// Abre una raíz existente y reconstruye el registro desde el
    /// manifiesto. Las líneas ilegibles se ignoran con un aviso.
    pub async fn open(root: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self> {
        let flow = Self::create(root, extension).await?;
        let manifest = flow.root.join(MANIFEST_FILE);
        let text = match tokio::fs::read_to_string(&manifest).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(flow),
            Err(e) => return Err(FlowError::storage(MANIFEST_FILE, e)),
        };
        for (n, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            match serde_json::from_str::<StringRef>(line) {
                Ok(reference) => flow.ledger.record(reference),
                Err(e) => log::warn!("{}:{} ignorada: {}", MANIFEST_FILE, n + 1, e),
            }
        }
        Ok(flow)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Ruta absoluta de una referencia, si su ubicación es válida.
    pub fn path_of(&self, reference: &StringRef) -> Option<PathBuf> {
        self.resolve_path(reference.location()).ok()
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.ledger.index().tokens()
    }

    fn resolve_path(&self, location: &str) -> Result<PathBuf> {
        if location.is_empty() {
            return Err(FlowError::Validation("ubicación vacía".into()));
        }
        let relative = Path::new(location);
        let mut normal = 0usize;
        for component in relative.components() {
            match component {
                Component::Normal(_) => normal += 1,
                Component::CurDir => {}
                _ => {
                    return Err(FlowError::Validation(format!("ubicación fuera de la raíz: {}", location)));
                }
            }
        }
        if normal == 0 {
            return Err(FlowError::Validation(format!("ubicación sin nombre de archivo: {}", location)));
        }
        if relative == Path::new(MANIFEST_FILE) {
            return Err(FlowError::LocationInUse(location.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Escribe en un temporal hermano y renombra, de modo que el archivo
    /// final sólo existe con el contenido completo.
    async fn write_atomic(&self, location: &str, path: &Path, id: Uuid, value: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await
                                             .map_err(|e| FlowError::storage(location, e))?;
        }
        let file_name = path.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
        let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, id));
        if let Err(e) = tokio::fs::write(&tmp, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(FlowError::storage(location, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(FlowError::storage(location, e));
        }
        Ok(())
    }

    async fn append_manifest(&self, reference: &StringRef) -> Result<()> {
        let mut line = serde_json::to_string(reference).map_err(|e| FlowError::Other(e.to_string()))?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new().create(true)
                                                    .append(true)
                                                    .open(self.root.join(MANIFEST_FILE))
                                                    .await
                                                    .map_err(|e| FlowError::storage(MANIFEST_FILE, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| FlowError::storage(MANIFEST_FILE, e))?;
        file.flush().await.map_err(|e| FlowError::storage(MANIFEST_FILE, e))
    }
}

#[async_trait]
impl Flow for DirectoryFlow {
    async fn set(&self, value: String, decorators: &[Box<dyn RefDecorator>]) -> Result<StringRef> {
        let extension = self.extension.clone();
        let draft = new_draft(|id, ts| timestamped_name(ts, &id.to_string(), &extension));
        let draft = apply_decorators(draft, decorators);
        let path = self.resolve_path(draft.location())?;
        match tokio::fs::try_exists(&path).await {
            Ok(false) => {}
            Ok(true) => return Err(FlowError::LocationInUse(draft.location().to_string())),
            Err(e) => return Err(FlowError::storage(draft.location(), e)),
        }
        self.write_atomic(draft.location(), &path, draft.id(), &value).await?;
        let committed = StringRef::from(draft);
        if let Err(e) = self.append_manifest(&committed).await {
            // Sin línea en el manifiesto no hay commit: el archivo no debe quedar.
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                log::warn!("no se pudo retirar '{}' tras fallar el manifiesto: {}", committed.location(), cleanup);
            }
            return Err(e);
        }
        self.ledger.record(committed.clone());
        Ok(committed)
    }

    async fn get(&self, reference: &StringRef) -> Option<String> {
        let path = self.resolve_path(reference.location()).ok()?;
        tokio::fs::read_to_string(path).await.ok()
    }

    async fn run(&self, command: &dyn Command, args: &[String]) -> Result<Vec<StringRef>> {
        run_command(self, command, args).await
    }

    fn token(&self, name: &str) -> Option<String> {
        let reference = self.ledger.token_ref(name)?;
        let path = self.resolve_path(reference.location()).ok()?;
        std::fs::read_to_string(path).ok()
    }

    fn token_ref(&self, name: &str) -> Option<StringRef> {
        self.ledger.token_ref(name)
    }

    fn resolve(&self, id: &Uuid) -> Option<StringRef> {
        self.ledger.resolve(id)
    }
}
