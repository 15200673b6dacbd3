pub mod backend_factory;
pub mod task_registry;

pub use backend_factory::{BackendFactory, OpenedBackend};
pub use task_registry::TaskRegistry;
