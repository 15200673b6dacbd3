use super::naming::OutputNaming;
use async_trait::async_trait;
use base64::Engine as _;
use flow::{Command, CommandOutput, Flow, FlowError, Result, StringRef};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Transformaciones de texto disponibles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
  Upper,
  Lower,
  Trim,
  Base64,
  Sha256,
}

impl TransformOp {
  pub const ALL: [TransformOp; 5] = [TransformOp::Upper,
                                     TransformOp::Lower,
                                     TransformOp::Trim,
                                     TransformOp::Base64,
                                     TransformOp::Sha256];

  pub fn apply(&self, input: &str) -> String {
    match self {
      TransformOp::Upper => input.to_uppercase(),
      TransformOp::Lower => input.to_lowercase(),
      TransformOp::Trim => input.trim().to_string(),
      TransformOp::Base64 => base64::engine::general_purpose::STANDARD.encode(input.as_bytes()),
      TransformOp::Sha256 => {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        format!("{:x}", hasher.finalize())
      }
    }
  }
}

impl fmt::Display for TransformOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      TransformOp::Upper => "upper",
      TransformOp::Lower => "lower",
      TransformOp::Trim => "trim",
      TransformOp::Base64 => "base64",
      TransformOp::Sha256 => "sha256",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for TransformOp {
  type Err = FlowError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    TransformOp::ALL.iter()
                    .copied()
                    .find(|op| op.to_string() == s.trim().to_lowercase())
                    .ok_or_else(|| FlowError::Validation(format!("transformación desconocida: '{}'", s)))
  }
}

/// Aplica una transformación al contenido de una referencia previa o, si
/// no hay entrada, a los argumentos unidos por espacios.
#[derive(Debug, Clone)]
pub struct TransformCommand {
  op: TransformOp,
  input: Option<StringRef>,
  naming: OutputNaming,
}

impl TransformCommand {
  pub fn new(op: TransformOp) -> Self {
    Self { op,
           input: None,
           naming: OutputNaming::new() }
  }

  pub fn with_input(mut self, input: StringRef) -> Self {
    self.input = Some(input);
    self
  }

  pub fn named(mut self, naming: OutputNaming) -> Self {
    self.naming = naming;
    self
  }
}

#[async_trait]
impl Command for TransformCommand {
  fn name(&self) -> &str {
    "transform"
  }

  async fn execute(&self, context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    let source = match &self.input {
      Some(reference) => context.get(reference).await.ok_or_else(|| {
                                                       FlowError::command(self.name(),
                                                                          format!("entrada no disponible: {}",
                                                                                  reference.location()))
                                                     })?,
      None => args.join(" "),
    };
    Ok(vec![CommandOutput::new(self.op.apply(&source)).with_decorators(self.naming.decorators())])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ops_apply() {
    assert_eq!(TransformOp::Upper.apply("abc"), "ABC");
    assert_eq!(TransformOp::Lower.apply("AbC"), "abc");
    assert_eq!(TransformOp::Trim.apply("  x \n"), "x");
    assert_eq!(TransformOp::Base64.apply("hola"), "aG9sYQ==");
    assert_eq!(TransformOp::Sha256.apply("abc"),
               "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
  }

  #[test]
  fn parse_ops() {
    assert_eq!("SHA256".parse::<TransformOp>().unwrap(), TransformOp::Sha256);
    assert!("rot13".parse::<TransformOp>().is_err());
  }
}
