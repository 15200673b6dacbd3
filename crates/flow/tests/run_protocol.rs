use async_trait::async_trait;
use flow::{Command, CommandOutput, DirectoryFlow, Flow, FlowError, InMemoryFlow, NameDecorator, Result, StringRef,
           TokenDecorator};

/// Devuelve una salida por argumento, sin decoradores.
struct Letters;

#[async_trait]
impl Command for Letters {
  fn name(&self) -> &str {
    "letters"
  }

  async fn execute(&self, _context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    Ok(args.iter().map(|a| CommandOutput::new(a.clone())).collect())
  }
}

/// Lee una referencia previa y guarda su versión en mayúsculas.
struct Shout {
  input: StringRef,
}

#[async_trait]
impl Command for Shout {
  fn name(&self) -> &str {
    "shout"
  }

  async fn execute(&self, context: &dyn Flow, _args: &[String]) -> Result<Vec<CommandOutput>> {
    let text = context.get(&self.input)
                      .await
                      .ok_or_else(|| FlowError::NotFound(self.input.id().to_string()))?;
    Ok(vec![CommandOutput::new(text.to_uppercase()).decorated(TokenDecorator::new("shout"))])
  }
}

/// Anida otro comando mediante `context.run`.
struct Nested;

#[async_trait]
impl Command for Nested {
  fn name(&self) -> &str {
    "nested"
  }

  async fn execute(&self, context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    let inner = context.run(&Letters, args).await?;
    Ok(vec![CommandOutput::new(format!("{} hijos", inner.len()))])
  }
}

struct Failing;

#[async_trait]
impl Command for Failing {
  fn name(&self) -> &str {
    "failing"
  }

  async fn execute(&self, _context: &dyn Flow, _args: &[String]) -> Result<Vec<CommandOutput>> {
    Err(FlowError::command("failing", "boom"))
  }
}

/// La segunda salida choca con la ubicación de la primera.
struct Colliding;

#[async_trait]
impl Command for Colliding {
  fn name(&self) -> &str {
    "colliding"
  }

  async fn execute(&self, _context: &dyn Flow, _args: &[String]) -> Result<Vec<CommandOutput>> {
    Ok(vec![CommandOutput::new("one").decorated(NameDecorator::new("dup")).decorated(TokenDecorator::new("first")),
            CommandOutput::new("two").decorated(NameDecorator::new("dup"))])
  }
}

fn args(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn run_preserves_output_order() {
  let flow = InMemoryFlow::new();
  let refs = flow.run(&Letters, &args(&["a", "b", "c"])).await.unwrap();
  assert_eq!(refs.len(), 3);
  let mut values = Vec::new();
  for r in &refs {
    values.push(flow.get(r).await.unwrap());
  }
  assert_eq!(values, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn empty_output_list_is_legal() {
  let flow = InMemoryFlow::new();
  let refs = flow.run(&Letters, &[]).await.unwrap();
  assert!(refs.is_empty());
  assert!(flow.is_empty());
}

#[tokio::test]
async fn commands_chain_through_references() {
  let flow = InMemoryFlow::new();
  let first = flow.run(&Letters, &args(&["hola"])).await.unwrap().remove(0);
  let shouted = flow.run(&Shout { input: first }, &[]).await.unwrap();
  assert_eq!(shouted.len(), 1);
  assert_eq!(flow.token("shout").as_deref(), Some("HOLA"));
}

#[tokio::test]
async fn nested_runs_commit_children_first() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let refs = flow.run(&Nested, &args(&["x", "y"])).await.unwrap();
  assert_eq!(refs.len(), 1);
  assert_eq!(flow.get(&refs[0]).await.as_deref(), Some("2 hijos"));
  assert_eq!(flow.len(), 3);
}

#[tokio::test]
async fn execute_error_propagates() {
  let flow = InMemoryFlow::new();
  let err = flow.run(&Failing, &[]).await.unwrap_err();
  assert!(matches!(err, FlowError::Command { ref command, .. } if command == "failing"));
  assert!(flow.is_empty());
}

#[tokio::test]
async fn earlier_outputs_stay_committed_after_failure() {
  let flow = InMemoryFlow::new();
  let err = flow.run(&Colliding, &[]).await.unwrap_err();
  assert!(matches!(err, FlowError::LocationInUse(_)));
  // sin rollback: la primera salida sigue visible
  assert_eq!(flow.token("first").as_deref(), Some("one"));
  assert_eq!(flow.len(), 1);
}
