//! Comandos representativos: valores literales, shell, plantillas de
//! prompt, CLIs de IA y transformaciones de texto.
pub mod agent;
pub mod literal;
pub mod naming;
pub mod process;
pub mod prompt;
pub mod shell;
pub mod transform;

pub use agent::{AgentCommand, AgentKind};
pub use literal::LiteralCommand;
pub use naming::OutputNaming;
pub use process::{run_process, ProcessOutput};
pub use prompt::PromptCommand;
pub use shell::ShellCommand;
pub use transform::{TransformCommand, TransformOp};
