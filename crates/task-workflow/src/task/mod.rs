pub mod handler;
pub mod runner;
pub mod session;

pub use handler::{TaskHandler, TaskPlan};
pub use runner::{TaskReport, TaskRunner, TaskState};
pub use session::TaskSession;
