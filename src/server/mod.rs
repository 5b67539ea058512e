//! Server-side modules for the greetings API.

pub mod greetings;
pub mod routes;
pub mod storage;

pub use routes::router;
pub use storage::{GreetingStore, StorageError};
