use super::{invalid, TaskDefaults};
use crate::commands::{LiteralCommand, TransformCommand, TransformOp};
use crate::errors::TaskError;
use crate::task::{TaskHandler, TaskPlan, TaskSession};
use async_trait::async_trait;

/// `transform <op> <text...>`: guarda el texto (token `input`) y después su
/// transformación (token = nombre de la operación). Dos `run` encadenados.
pub struct TransformTask {
  defaults: TaskDefaults,
}

impl TransformTask {
  pub fn new(defaults: TaskDefaults) -> Self {
    Self { defaults }
  }
}

#[async_trait]
impl TaskHandler for TransformTask {
  fn verb(&self) -> &str {
    "transform"
  }

  fn usage(&self) -> &str {
    "transform <upper|lower|trim|base64|sha256> <text...>"
  }

  fn validate(&self, args: &[String]) -> Result<TaskPlan, TaskError> {
    let (op, text) = args.split_first()
                         .ok_or_else(|| TaskError::Validation("falta la operación".into()))?;
    let op: TransformOp = op.parse().map_err(invalid)?;
    if text.is_empty() {
      return Err(TaskError::Validation("falta el texto".into()));
    }
    Ok(TaskPlan::new().with_param("op", op.to_string()).with_param("text", text.join(" ")))
  }

  async fn execute(&self, session: &mut TaskSession<'_>, plan: TaskPlan) -> Result<(), TaskError> {
    let op: TransformOp = plan.require("op")?.parse().map_err(invalid)?;
    let literal = LiteralCommand::fixed(plan.require("text")?).named(self.defaults.naming("input"));
    let input = session.run_one(&literal, &[]).await?;

    let transform = TransformCommand::new(op).with_input(input)
                                             .named(self.defaults.naming(&op.to_string()));
    session.run_one(&transform, &[]).await?;
    Ok(())
  }
}
