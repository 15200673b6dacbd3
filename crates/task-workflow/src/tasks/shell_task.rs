use super::TaskDefaults;
use crate::commands::ShellCommand;
use crate::errors::TaskError;
use crate::task::{TaskHandler, TaskPlan, TaskSession};
use async_trait::async_trait;

/// `shell <script> [args...]`: ejecuta un script y guarda su salida con el
/// token `shell`.
pub struct ShellTask {
  defaults: TaskDefaults,
}

impl ShellTask {
  pub fn new(defaults: TaskDefaults) -> Self {
    Self { defaults }
  }
}

#[async_trait]
impl TaskHandler for ShellTask {
  fn verb(&self) -> &str {
    "shell"
  }

  fn usage(&self) -> &str {
    "shell <script> [args...]"
  }

  fn validate(&self, args: &[String]) -> Result<TaskPlan, TaskError> {
    let script = args.first()
                     .filter(|s| !s.trim().is_empty())
                     .ok_or_else(|| TaskError::Validation("falta el script".into()))?;
    Ok(TaskPlan::new().with_param("script", script.clone()).with_rest(args[1..].to_vec()))
  }

  async fn execute(&self, session: &mut TaskSession<'_>, plan: TaskPlan) -> Result<(), TaskError> {
    let command = ShellCommand::new(plan.require("script")?).with_shell(self.defaults.shell.clone())
                                                            .with_timeout(self.defaults.timeout)
                                                            .named(self.defaults.naming("shell"));
    session.run_one(&command, plan.rest()).await?;
    Ok(())
  }
}
