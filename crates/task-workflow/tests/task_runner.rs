use async_trait::async_trait;
use flow::{DirectoryFlow, Flow, InMemoryFlow};
use task_workflow::commands::{LiteralCommand, OutputNaming, ShellCommand};
use task_workflow::tasks::{AskTask, ReviewTask, ShellTask, TransformTask};
use task_workflow::{TaskDefaults, TaskError, TaskHandler, TaskPlan, TaskRunner, TaskSession, TaskState};

fn args(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| s.to_string()).collect()
}

/// Compromete un valor y después falla.
struct HalfDone;

#[async_trait]
impl TaskHandler for HalfDone {
  fn verb(&self) -> &str {
    "half"
  }

  fn usage(&self) -> &str {
    "half"
  }

  fn validate(&self, _args: &[String]) -> Result<TaskPlan, TaskError> {
    Ok(TaskPlan::new())
  }

  async fn execute(&self, session: &mut TaskSession<'_>, _plan: TaskPlan) -> Result<(), TaskError> {
    session.run_one(&LiteralCommand::fixed("primero").named(OutputNaming::token("first")), &[]).await?;
    session.run(&ShellCommand::new("exit 7"), &[]).await?;
    Ok(())
  }
}

/// No produce nada.
struct Silent;

#[async_trait]
impl TaskHandler for Silent {
  fn verb(&self) -> &str {
    "silent"
  }

  fn usage(&self) -> &str {
    "silent"
  }

  fn validate(&self, _args: &[String]) -> Result<TaskPlan, TaskError> {
    Ok(TaskPlan::new())
  }

  async fn execute(&self, _session: &mut TaskSession<'_>, _plan: TaskPlan) -> Result<(), TaskError> {
    Ok(())
  }
}

#[tokio::test]
async fn validation_failure_runs_nothing() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let err = runner.run(&ShellTask::new(TaskDefaults::default()), &[]).await.unwrap_err();
  assert!(matches!(err, TaskError::Validation(_)));
  assert_eq!(err.exit_code(), 2);
  assert_eq!(runner.state(), TaskState::Failed);
  assert_eq!(runner.history(),
             &[TaskState::Idle, TaskState::ValidatingArguments, TaskState::Failed]);
  assert!(flow.is_empty());
}

#[tokio::test]
async fn shell_task_succeeds_with_headline() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let report = runner.run(&ShellTask::new(TaskDefaults::default()), &args(&["printf '%s' \"$1\"", "ok"]))
                     .await
                     .unwrap();
  assert_eq!(report.verb, "shell");
  assert_eq!(report.headline_token(), Some("shell"));
  assert_eq!(flow.get(&report.headline).await.as_deref(), Some("ok"));
  assert!(report.headline.location().ends_with("-shell.txt"));
  assert_eq!(runner.history(),
             &[TaskState::Idle, TaskState::ValidatingArguments, TaskState::Executing, TaskState::Succeeded]);
  let summary = report.summary();
  assert_eq!(summary["token"], "shell");
  assert_eq!(summary["produced"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn failure_keeps_earlier_references() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let err = runner.run(&HalfDone, &[]).await.unwrap_err();
  assert!(matches!(err, TaskError::Flow(_)));
  assert_eq!(err.exit_code(), 1);
  assert_eq!(runner.state(), TaskState::Failed);
  assert_eq!(flow.token("first").as_deref(), Some("primero"));
}

#[tokio::test]
async fn task_without_result_fails() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let err = runner.run(&Silent, &[]).await.unwrap_err();
  assert!(matches!(err, TaskError::Other(_)));
  assert_eq!(runner.state(), TaskState::Failed);
}

#[tokio::test]
async fn transform_task_chains_two_runs() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let report = runner.run(&TransformTask::new(TaskDefaults::default()), &args(&["base64", "hola"]))
                     .await
                     .unwrap();
  assert_eq!(report.produced.len(), 2);
  assert_eq!(flow.token("input").as_deref(), Some("hola"));
  assert_eq!(flow.get(&report.headline).await.as_deref(), Some("aG9sYQ=="));
  assert_eq!(report.headline_token(), Some("base64"));
}

#[tokio::test]
async fn transform_task_rejects_unknown_op() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let err = runner.run(&TransformTask::new(TaskDefaults::default()), &args(&["rot13", "x"]))
                  .await
                  .unwrap_err();
  assert!(matches!(err, TaskError::Validation(_)));
  assert!(flow.is_empty());
}

#[tokio::test]
async fn ask_task_with_custom_agent() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let report = runner.run(&AskTask::new(TaskDefaults::default()), &args(&["echo", "hola", "agente"]))
                     .await
                     .unwrap();
  assert_eq!(report.headline_token(), Some("answer"));
  assert_eq!(flow.get(&report.headline).await.as_deref(), Some("hola agente\n"));
  assert_eq!(flow.token("prompt").as_deref(), Some("hola agente"));
}

#[tokio::test]
async fn ask_task_requires_prompt() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let err = runner.run(&AskTask::new(TaskDefaults::default()), &args(&["claude"])).await.unwrap_err();
  assert!(matches!(err, TaskError::Validation(_)));
}

#[tokio::test]
async fn review_task_writes_three_files() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let mut runner = TaskRunner::new(&flow);
  let report = runner.run(&ReviewTask::new(TaskDefaults::default()),
                          &args(&["echo", "echo contexto; exit 1", "Resume"]))
                     .await
                     .unwrap();
  assert_eq!(report.headline_token(), Some("review"));
  let review = flow.get(&report.headline).await.unwrap();
  assert!(review.starts_with("Resume\n\n---\ncontexto"), "{}", review);

  let names: Vec<String> = std::fs::read_dir(dir.path()).unwrap()
                                                        .filter_map(|e| e.ok())
                                                        .map(|e| e.file_name().to_string_lossy().into_owned())
                                                        .filter(|n| n.ends_with(".txt"))
                                                        .collect();
  assert_eq!(names.len(), 3, "{:?}", names);
  for token in ["context", "prompt", "review"] {
    assert!(names.iter().any(|n| n.ends_with(&format!("-{}.txt", token))), "{:?}", names);
  }
}

#[tokio::test]
async fn review_task_default_instructions() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  runner.run(&ReviewTask::new(TaskDefaults::default()), &args(&["echo", "echo x"])).await.unwrap();
  let prompt = flow.token("prompt").unwrap();
  assert!(prompt.starts_with("Revisa el siguiente contenido"), "{}", prompt);
  assert!(prompt.ends_with("x\n\n"), "{:?}", prompt);
}

#[tokio::test]
async fn reused_runner_restarts_from_idle() {
  let flow = InMemoryFlow::new();
  let mut runner = TaskRunner::new(&flow);
  let shell = ShellTask::new(TaskDefaults::default());
  runner.run(&shell, &[]).await.unwrap_err();
  assert_eq!(runner.state(), TaskState::Failed);

  runner.run(&shell, &args(&["echo ok"])).await.unwrap();
  assert_eq!(runner.history(),
             &[TaskState::Idle, TaskState::ValidatingArguments, TaskState::Executing, TaskState::Succeeded]);
}
