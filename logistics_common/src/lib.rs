//! Small building blocks shared by every crate in the logistics workspace.
mod helpers;
mod secret;

pub use helpers::{join_non_empty, parse_boolean_flag, parse_env_number, EnvParseError};
pub use secret::Secret;
