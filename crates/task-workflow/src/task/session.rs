use crate::errors::TaskError;
use flow::{Command, Flow, StringRef};

/// Contexto de una ejecución de tarea.
///
/// Envuelve el `Flow` compartido y conserva localmente cada referencia
/// producida por `run`, para encadenarla en comandos posteriores y para
/// construir el resumen final.
pub struct TaskSession<'a> {
  flow: &'a dyn Flow,
  produced: Vec<StringRef>,
  headline: Option<StringRef>,
  runs: usize,
}

impl<'a> TaskSession<'a> {
  pub fn new(flow: &'a dyn Flow) -> Self {
    Self { flow,
           produced: Vec::new(),
           headline: None,
           runs: 0 }
  }

  pub fn flow(&self) -> &'a dyn Flow {
    self.flow
  }

  /// Ejecuta un comando y registra sus referencias.
  pub async fn run(&mut self, command: &dyn Command, args: &[String]) -> Result<Vec<StringRef>, TaskError> {
    self.runs += 1;
    log::debug!("run #{}: comando '{}'", self.runs, command.name());
    let refs = self.flow.run(command, args).await?;
    self.produced.extend(refs.iter().cloned());
    Ok(refs)
  }

  /// Como `run`, pero exige al menos una salida y devuelve la última.
  pub async fn run_one(&mut self, command: &dyn Command, args: &[String]) -> Result<StringRef, TaskError> {
    let mut refs = self.run(command, args).await?;
    refs.pop()
        .ok_or_else(|| TaskError::Other(format!("el comando '{}' no produjo salidas", command.name())))
  }

  /// Contenido de una referencia; aquí un fallo suave se vuelve error
  /// porque la tarea no puede continuar sin él.
  pub async fn read(&self, reference: &StringRef) -> Result<String, TaskError> {
    self.flow
        .get(reference)
        .await
        .ok_or_else(|| TaskError::Flow(flow::FlowError::NotFound(reference.location().to_string())))
  }

  pub fn set_headline(&mut self, reference: StringRef) {
    self.headline = Some(reference);
  }

  pub fn headline(&self) -> Option<&StringRef> {
    self.headline.as_ref().or_else(|| self.produced.last())
  }

  pub fn produced(&self) -> &[StringRef] {
    &self.produced
  }

  pub fn runs(&self) -> usize {
    self.runs
  }

  pub(crate) fn into_parts(self) -> (Option<StringRef>, Vec<StringRef>) {
    let headline = self.headline.or_else(|| self.produced.last().cloned());
    (headline, self.produced)
  }
}
