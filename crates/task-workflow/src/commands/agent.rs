use super::naming::OutputNaming;
use super::process::run_process;
use super::prompt::PromptCommand;
use async_trait::async_trait;
use flow::{Command, CommandOutput, Flow, FlowError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// CLI de IA envuelta por `AgentCommand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentKind {
  Claude,
  Gemini,
  Codex,
  /// Programa arbitrario que recibe el prompt como último argumento.
  Custom(String),
}

impl AgentKind {
  pub fn program(&self) -> &str {
    match self {
      AgentKind::Claude => "claude",
      AgentKind::Gemini => "gemini",
      AgentKind::Codex => "codex",
      AgentKind::Custom(program) => program,
    }
  }

  /// Argumentos que ponen a la CLI en modo no interactivo.
  pub fn base_args(&self) -> &'static [&'static str] {
    match self {
      AgentKind::Claude | AgentKind::Gemini => &["-p"],
      AgentKind::Codex => &["exec"],
      AgentKind::Custom(_) => &[],
    }
  }
}

impl fmt::Display for AgentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program())
  }
}

impl FromStr for AgentKind {
  type Err = FlowError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim() {
      "" => Err(FlowError::Validation("agente vacío".into())),
      "claude" => Ok(AgentKind::Claude),
      "gemini" => Ok(AgentKind::Gemini),
      "codex" => Ok(AgentKind::Codex),
      other => Ok(AgentKind::Custom(other.to_string())),
    }
  }
}

/// Envuelve una CLI de IA.
///
/// Primero anida `context.run(prompt)` para que el prompt renderizado
/// quede comprometido (e inspeccionable) como referencia propia; después
/// lanza la CLI con ese prompt y compromete su respuesta.
#[derive(Debug, Clone)]
pub struct AgentCommand {
  agent: AgentKind,
  prompt: PromptCommand,
  extra_args: Vec<String>,
  naming: OutputNaming,
  timeout: Option<Duration>,
}

impl AgentCommand {
  pub fn new(agent: AgentKind, prompt: PromptCommand) -> Self {
    Self { agent,
           prompt,
           extra_args: Vec::new(),
           naming: OutputNaming::new(),
           timeout: None }
  }

  pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
    self.extra_args = args;
    self
  }

  pub fn named(mut self, naming: OutputNaming) -> Self {
    self.naming = naming;
    self
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn agent(&self) -> &AgentKind {
    &self.agent
  }

  /// Argumentos finales: extras, flags de modo y el prompt. El flag de modo
  /// (`-p`) queda pegado al prompt que toma como valor.
  pub fn cli_args(&self, prompt: String) -> Vec<String> {
    let mut args = self.extra_args.clone();
    args.extend(self.agent.base_args().iter().map(|a| a.to_string()));
    args.push(prompt);
    args
  }
}

#[async_trait]
impl Command for AgentCommand {
  fn name(&self) -> &str {
    "agent"
  }

  async fn execute(&self, context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    let prompt_ref = context.run(&self.prompt, args)
                            .await?
                            .pop()
                            .ok_or_else(|| FlowError::command(self.name(), "el prompt no produjo salida"))?;
    let prompt = context.get(&prompt_ref)
                        .await
                        .ok_or_else(|| FlowError::command(self.name(), "prompt comprometido ilegible"))?;

    let cli_args = self.cli_args(prompt);
    let output = run_process(self.name(), self.agent.program(), &cli_args, self.timeout).await?;
    if !output.success() {
      return Err(FlowError::command(self.name(),
                                    format!("'{}' terminó con error: {}", self.agent, output.stderr.trim())));
    }
    log::info!("[{}] respuesta de '{}' ({} bytes)", self.name(), self.agent, output.stdout.len());
    Ok(vec![CommandOutput::new(output.stdout).with_decorators(self.naming.decorators())])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mode_flag_sits_before_prompt() {
    let agent = AgentCommand::new(AgentKind::Gemini, PromptCommand::new("x"))
      .with_extra_args(vec!["--model".into(), "flash".into()]);
    assert_eq!(agent.cli_args("hola".into()), vec!["--model", "flash", "-p", "hola"]);
  }

  #[test]
  fn custom_agent_gets_prompt_last() {
    let agent = AgentCommand::new(AgentKind::Custom("mi-agente".into()), PromptCommand::new("x"))
      .with_extra_args(vec!["--quiet".into()]);
    assert_eq!(agent.cli_args("hola".into()), vec!["--quiet", "hola"]);
  }
}
