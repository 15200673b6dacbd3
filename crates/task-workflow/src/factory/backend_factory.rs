use crate::backend_kind::BackendKind;
use crate::config::TaskflowConfig;
use crate::errors::TaskError;
use chrono::Utc;
use flow::{DirectoryFlow, Flow, InMemoryFlow};
use std::path::PathBuf;

/// Backend abierto para un proceso.
pub struct OpenedBackend {
  pub flow: Box<dyn Flow>,
  /// Raíz con timestamp cuando el backend es de directorio.
  pub root: Option<PathBuf>,
  pub kind: BackendKind,
}

/// Fábrica de backends a partir de la configuración resuelta.
pub struct BackendFactory;

impl BackendFactory {
  /// Abre el backend indicado por `config`. El de directorio escribe bajo
  /// una raíz nueva con timestamp (`TaskflowConfig::run_root`).
  pub async fn open(config: &TaskflowConfig) -> Result<OpenedBackend, TaskError> {
    config.validate()?;
    match config.backend {
      BackendKind::Memory => Ok(OpenedBackend { flow: Box::new(InMemoryFlow::new()),
                                                root: None,
                                                kind: BackendKind::Memory }),
      BackendKind::Directory => {
        let root = config.run_root(Utc::now());
        let flow = DirectoryFlow::create(&root, config.extension.trim_start_matches('.')).await?;
        log::info!("referencias en {}", root.display());
        Ok(OpenedBackend { flow: Box::new(flow),
                           root: Some(root),
                           kind: BackendKind::Directory })
      }
    }
  }
}
