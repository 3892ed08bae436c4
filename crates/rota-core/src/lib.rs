//! `rota-core`: identifiers, view modes, configuration and top-level errors
//! shared by every rota crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::RotaConfig;
pub use error::{Result, RotaError};
pub use types::{UserId, ViewMode};
