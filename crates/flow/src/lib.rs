//! Crate `flow` — motor de referencias y composición de comandos
//!
//! Este crate define la referencia comprometida (`StringRef`), los
//! decoradores que la nombran antes del commit (`RefDecorator`), el
//! contrato de almacenamiento `Flow` con dos backends (`InMemoryFlow` y
//! `DirectoryFlow`) y el protocolo de comandos (`Command`) que permite que
//! la salida de un comando alimente al siguiente.
//!
//! Diseño resumido:
//! - `set` construye un borrador (id nuevo, ubicación por defecto,
//!   timestamp), aplica los decoradores en orden, persiste el valor y
//!   actualiza el índice de tokens.
//! - `get` es un fallo suave: devuelve `None` si la ubicación no existe.
//! - `run` ejecuta un comando y compromete sus salidas en orden.
//! - Tokens: last-write-wins; las referencias previas siguen accesibles
//!   por id.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::{Flow, InMemoryFlow, RefDecorator, TokenDecorator};
//! let flow = InMemoryFlow::new();
//! let reference = tokio_test::block_on(flow.set("Hello World".into(), &[TokenDecorator::new("greeting").boxed()])).unwrap();
//! assert_eq!(reference.token(), Some("greeting"));
//! assert_eq!(flow.token("greeting").as_deref(), Some("Hello World"));
//! ```
pub mod command;
pub mod decorator;
pub mod directory;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod index;
pub mod memory;
pub mod repository;

pub use command::*;
pub use decorator::*;
pub use directory::*;
pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use index::*;
pub use memory::*;
pub use repository::*;

pub use uuid::Uuid;
