use crate::errors::TaskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backends de almacenamiento que soporta el crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
  Memory,
  #[default]
  Directory,
}

impl fmt::Display for BackendKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      BackendKind::Memory => "memory",
      BackendKind::Directory => "directory",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for BackendKind {
  type Err = TaskError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "memory" | "mem" => Ok(BackendKind::Memory),
      "directory" | "dir" => Ok(BackendKind::Directory),
      other => Err(TaskError::Config(format!("backend desconocido: '{}' (memory|directory)", other))),
    }
  }
}
