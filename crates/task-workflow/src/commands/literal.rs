use super::naming::OutputNaming;
use async_trait::async_trait;
use flow::{Command, CommandOutput, Flow, Result};

/// Compromete valores tal cual.
///
/// Sin valor fijo, cada argumento produce una salida; con valor fijo los
/// argumentos se ignoran.
#[derive(Debug, Clone, Default)]
pub struct LiteralCommand {
  value: Option<String>,
  naming: OutputNaming,
}

impl LiteralCommand {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fixed(value: impl Into<String>) -> Self {
    Self { value: Some(value.into()),
           naming: OutputNaming::new() }
  }

  pub fn named(mut self, naming: OutputNaming) -> Self {
    self.naming = naming;
    self
  }
}

#[async_trait]
impl Command for LiteralCommand {
  fn name(&self) -> &str {
    "literal"
  }

  async fn execute(&self, _context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    let values: Vec<String> = match &self.value {
      Some(v) => vec![v.clone()],
      None => args.to_vec(),
    };
    Ok(values.into_iter()
             .map(|v| CommandOutput::new(v).with_decorators(self.naming.decorators()))
             .collect())
  }
}
