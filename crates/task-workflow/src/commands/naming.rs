use flow::{PrefixDecorator, RefDecorator, TimestampNameDecorator, TokenDecorator};

/// Cómo nombrar/indexar la referencia de una salida.
///
/// Los decoradores se generan en orden fijo: token, nombre con timestamp,
/// prefijo. Así el nombre con timestamp usa el token como etiqueta y el
/// prefijo se aplica sobre el nombre final.
#[derive(Debug, Clone, Default)]
pub struct OutputNaming {
  token: Option<String>,
  extension: Option<String>,
  prefix: Option<String>,
}

impl OutputNaming {
  pub fn new() -> Self {
    Self::default()
  }

  /// Atajo: sólo token.
  pub fn token(token: impl Into<String>) -> Self {
    Self::new().with_token(token)
  }

  pub fn with_token(mut self, token: impl Into<String>) -> Self {
    self.token = Some(token.into());
    self
  }

  /// Nombra la salida como `{timestamp}-{ms}-{token|id}.{extension}`.
  pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
    self.extension = Some(extension.into());
    self
  }

  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = Some(prefix.into());
    self
  }

  pub fn token_name(&self) -> Option<&str> {
    self.token.as_deref()
  }

  /// Decoradores nuevos para una salida.
  pub fn decorators(&self) -> Vec<Box<dyn RefDecorator>> {
    let mut out: Vec<Box<dyn RefDecorator>> = Vec::new();
    if let Some(token) = &self.token {
      out.push(TokenDecorator::new(token.clone()).boxed());
    }
    if let Some(ext) = &self.extension {
      out.push(TimestampNameDecorator::new(ext.clone()).boxed());
    }
    if let Some(prefix) = &self.prefix {
      out.push(PrefixDecorator::new(prefix.clone()).boxed());
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use flow::{apply_decorators, DraftRef};

  #[test]
  fn order_is_token_name_prefix() {
    let naming = OutputNaming::token("diff").with_extension("patch").with_prefix("review/");
    let draft = DraftRef::new(flow::Uuid::nil(), "x", chrono::Utc::now());
    let out = apply_decorators(draft, &naming.decorators());
    assert_eq!(out.token(), Some("diff"));
    assert!(out.location().starts_with("review/"));
    assert!(out.location().ends_with("-diff.patch"));
  }

  #[test]
  fn empty_naming_has_no_decorators() {
    assert!(OutputNaming::new().decorators().is_empty());
  }
}
