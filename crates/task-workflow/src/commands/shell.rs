use super::naming::OutputNaming;
use super::process::run_process;
use async_trait::async_trait;
use flow::{Command, CommandOutput, Flow, FlowError, Result};
use std::time::Duration;

/// Ejecuta un script a través de un shell y compromete su salida.
///
/// Los argumentos de `execute` llegan al script como parámetros
/// posicionales (`$1`, `$2`...). La salida es stdout seguido de stderr si
/// no está vacío. Un código de salida distinto de cero es un error salvo
/// que se active `allow_failure`.
#[derive(Debug, Clone)]
pub struct ShellCommand {
  script: String,
  shell: String,
  naming: OutputNaming,
  allow_failure: bool,
  timeout: Option<Duration>,
}

impl ShellCommand {
  pub fn new(script: impl Into<String>) -> Self {
    Self { script: script.into(),
           shell: "sh".to_string(),
           naming: OutputNaming::new(),
           allow_failure: false,
           timeout: None }
  }

  pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
    self.shell = shell.into();
    self
  }

  pub fn named(mut self, naming: OutputNaming) -> Self {
    self.naming = naming;
    self
  }

  pub fn allow_failure(mut self, allow: bool) -> Self {
    self.allow_failure = allow;
    self
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn script(&self) -> &str {
    &self.script
  }
}

#[async_trait]
impl Command for ShellCommand {
  fn name(&self) -> &str {
    "shell"
  }

  async fn execute(&self, _context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    // sh -c '<script>' taskflow arg1 arg2 -> $0=taskflow, $1=arg1...
    let mut shell_args = vec!["-c".to_string(), self.script.clone(), "taskflow".to_string()];
    shell_args.extend_from_slice(args);
    let output = run_process(self.name(), &self.shell, &shell_args, self.timeout).await?;
    if !output.success() && !self.allow_failure {
      let code = output.status.map(|c| c.to_string()).unwrap_or_else(|| "señal".into());
      return Err(FlowError::command(self.name(), format!("salida {}: {}", code, output.stderr.trim())));
    }
    Ok(vec![CommandOutput::new(output.combined()).with_decorators(self.naming.decorators())])
  }
}
