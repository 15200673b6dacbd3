use super::{invalid, TaskDefaults};
use crate::commands::{AgentCommand, AgentKind, PromptCommand};
use crate::errors::TaskError;
use crate::task::{TaskHandler, TaskPlan, TaskSession};
use async_trait::async_trait;

/// `ask <agent> <prompt...>`: pregunta a una CLI de IA. Compromete el
/// prompt (token `prompt`) y la respuesta (token `answer`).
pub struct AskTask {
  defaults: TaskDefaults,
}

impl AskTask {
  pub fn new(defaults: TaskDefaults) -> Self {
    Self { defaults }
  }
}

#[async_trait]
impl TaskHandler for AskTask {
  fn verb(&self) -> &str {
    "ask"
  }

  fn usage(&self) -> &str {
    "ask <claude|gemini|codex|programa> <prompt...>"
  }

  fn validate(&self, args: &[String]) -> Result<TaskPlan, TaskError> {
    let (agent, prompt) = args.split_first()
                              .ok_or_else(|| TaskError::Validation("falta el agente".into()))?;
    let kind: AgentKind = agent.parse().map_err(invalid)?;
    if prompt.iter().all(|p| p.trim().is_empty()) {
      return Err(TaskError::Validation("falta el prompt".into()));
    }
    Ok(TaskPlan::new().with_param("agent", kind.program()).with_rest(prompt.to_vec()))
  }

  async fn execute(&self, session: &mut TaskSession<'_>, plan: TaskPlan) -> Result<(), TaskError> {
    let kind: AgentKind = plan.require("agent")?.parse().map_err(invalid)?;
    let prompt = PromptCommand::new("{{args}}").named(self.defaults.naming("prompt"));
    let agent = AgentCommand::new(kind, prompt).with_timeout(self.defaults.timeout)
                                               .named(self.defaults.naming("answer"));
    let answer = session.run_one(&agent, plan.rest()).await?;
    session.set_headline(answer);
    Ok(())
  }
}
