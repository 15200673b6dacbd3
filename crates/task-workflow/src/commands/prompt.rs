use super::naming::OutputNaming;
use async_trait::async_trait;
use flow::{Command, CommandOutput, Flow, FlowError, Result, StringRef};
use handlebars::Handlebars;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

/// Renderiza una plantilla handlebars con el contenido de referencias
/// previas.
///
/// Cada entrada `nombre -> StringRef` queda disponible como `{{nombre}}`;
/// los argumentos de `execute` unidos por espacios como `{{args}}`. El modo
/// estricto hace que una variable desconocida sea un error, y una entrada
/// cuyo contenido ya no existe también lo es.
#[derive(Debug, Clone)]
pub struct PromptCommand {
  template: String,
  inputs: IndexMap<String, StringRef>,
  naming: OutputNaming,
}

impl PromptCommand {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into(),
           inputs: IndexMap::new(),
           naming: OutputNaming::new() }
  }

  /// Declara una dependencia sobre la salida de otro comando.
  pub fn with_input(mut self, name: impl Into<String>, reference: StringRef) -> Self {
    self.inputs.insert(name.into(), reference);
    self
  }

  pub fn named(mut self, naming: OutputNaming) -> Self {
    self.naming = naming;
    self
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Renderiza la plantilla sin comprometer nada.
  pub async fn render(&self, context: &dyn Flow, args: &[String]) -> Result<String> {
    let mut data = Map::new();
    for (name, reference) in &self.inputs {
      let content = context.get(reference).await.ok_or_else(|| {
                                                   FlowError::command(self.name(),
                                                                      format!("entrada '{}' no disponible en '{}'",
                                                                              name,
                                                                              reference.location()))
                                                 })?;
      data.insert(name.clone(), JsonValue::String(content));
    }
    data.insert("args".to_string(), JsonValue::String(args.join(" ")));

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.render_template(&self.template, &JsonValue::Object(data))
              .map_err(|e| FlowError::command(self.name(), format!("plantilla: {}", e)))
  }
}

#[async_trait]
impl Command for PromptCommand {
  fn name(&self) -> &str {
    "prompt"
  }

  async fn execute(&self, context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
    let rendered = self.render(context, args).await?;
    Ok(vec![CommandOutput::new(rendered).with_decorators(self.naming.decorators())])
  }
}
