use flow::FlowError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as Process;

/// Resultado de un subproceso.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
  pub status: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl ProcessOutput {
  pub fn success(&self) -> bool {
    self.status == Some(0)
  }

  /// stdout seguido de stderr (si lo hay), separados por salto de línea.
  pub fn combined(&self) -> String {
    let mut result = self.stdout.clone();
    if !self.stderr.is_empty() {
      if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
      }
      result.push_str(&self.stderr);
    }
    result
  }
}

/// Ejecuta `program` con `args` y recoge su salida.
///
/// Con `timeout` el proceso se mata al expirar (`kill_on_drop`). Los
/// errores de lanzamiento y el timeout se reportan como
/// `FlowError::Command` con el nombre del comando que lo lanzó.
pub async fn run_process(command_name: &str,
                         program: &str,
                         args: &[String],
                         timeout: Option<Duration>)
                         -> Result<ProcessOutput, FlowError> {
  log::debug!("[{}] lanzando '{}' con {} argumentos", command_name, program, args.len());
  let mut process = Process::new(program);
  process.args(args)
         .stdin(Stdio::null())
         .stdout(Stdio::piped())
         .stderr(Stdio::piped())
         .kill_on_drop(true);
  let child = process.spawn()
                     .map_err(|e| FlowError::command(command_name, format!("no se pudo lanzar '{}': {}", program, e)))?;
  let waited = match timeout {
    Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
      Ok(result) => result,
      Err(_) => {
        return Err(FlowError::command(command_name, format!("'{}' superó el timeout de {:?}", program, limit)));
      }
    },
    None => child.wait_with_output().await,
  };
  let output = waited.map_err(|e| FlowError::command(command_name, format!("error esperando a '{}': {}", program, e)))?;
  Ok(ProcessOutput { status: output.status.code(),
                     stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                     stderr: String::from_utf8_lossy(&output.stderr).into_owned() })
}
