use super::{invalid, TaskDefaults};
use crate::commands::{AgentCommand, AgentKind, PromptCommand, ShellCommand};
use crate::errors::TaskError;
use crate::task::{TaskHandler, TaskPlan, TaskSession};
use async_trait::async_trait;

/// Plantilla del prompt de revisión: instrucciones (o unas por defecto)
/// seguidas del contexto capturado por el script.
pub const REVIEW_TEMPLATE: &str = "{{#if args}}{{args}}{{else}}Revisa el siguiente contenido y resume los problemas \
                                   encontrados.{{/if}}\n\n---\n{{context}}\n";

/// `review <agent> <script> [instrucciones...]`: captura contexto con un
/// script (token `context`), arma el prompt (token `prompt`) y se lo pasa
/// al agente (token `review`).
pub struct ReviewTask {
  defaults: TaskDefaults,
}

impl ReviewTask {
  pub fn new(defaults: TaskDefaults) -> Self {
    Self { defaults }
  }
}

#[async_trait]
impl TaskHandler for ReviewTask {
  fn verb(&self) -> &str {
    "review"
  }

  fn usage(&self) -> &str {
    "review <agent> <script> [instrucciones...]"
  }

  fn validate(&self, args: &[String]) -> Result<TaskPlan, TaskError> {
    if args.len() < 2 {
      return Err(TaskError::Validation("uso: review <agent> <script> [instrucciones...]".into()));
    }
    let kind: AgentKind = args[0].parse().map_err(invalid)?;
    if args[1].trim().is_empty() {
      return Err(TaskError::Validation("falta el script".into()));
    }
    Ok(TaskPlan::new().with_param("agent", kind.program())
                      .with_param("script", args[1].clone())
                      .with_rest(args[2..].to_vec()))
  }

  async fn execute(&self, session: &mut TaskSession<'_>, plan: TaskPlan) -> Result<(), TaskError> {
    let kind: AgentKind = plan.require("agent")?.parse().map_err(invalid)?;

    // El script puede terminar con error (p.ej. un linter) y su salida
    // sigue siendo contexto útil.
    let capture = ShellCommand::new(plan.require("script")?).with_shell(self.defaults.shell.clone())
                                                            .with_timeout(self.defaults.timeout)
                                                            .allow_failure(true)
                                                            .named(self.defaults.naming("context"));
    let context = session.run_one(&capture, &[]).await?;

    let prompt = PromptCommand::new(REVIEW_TEMPLATE).with_input("context", context)
                                                    .named(self.defaults.naming("prompt"));
    let agent = AgentCommand::new(kind, prompt).with_timeout(self.defaults.timeout)
                                               .named(self.defaults.naming("review"));
    let review = session.run_one(&agent, plan.rest()).await?;
    session.set_headline(review);
    Ok(())
  }
}
