pub mod catalog;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod history;
pub mod log;
pub mod model;
pub mod persist;
pub mod prompt;
pub mod session;
pub mod store;
pub mod ux;
pub mod validate;

pub use errors::{BuilderError, Result};
pub use session::Session;
