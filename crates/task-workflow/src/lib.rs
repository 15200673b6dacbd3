//! task-workflow: tareas y comandos sobre el motor `flow`
//!
//! Este crate implementa los comandos representativos (shell, CLIs de IA,
//! plantillas de prompt, transformaciones de texto), los handlers de tareas
//! ligados a verbos de la CLI con su ciclo de vida, el registro de tareas,
//! la configuración resuelta y la inicialización de logs.

pub mod backend_kind;
pub mod commands;
pub mod config;
pub mod errors;
pub mod factory;
pub mod logging;
pub mod task;
pub mod tasks;

pub use backend_kind::BackendKind;
pub use config::TaskflowConfig;
pub use errors::TaskError;
pub use factory::{BackendFactory, OpenedBackend, TaskRegistry};
pub use logging::{init_logging, LogFormat};
pub use task::{TaskHandler, TaskPlan, TaskReport, TaskRunner, TaskSession, TaskState};
pub use tasks::TaskDefaults;
