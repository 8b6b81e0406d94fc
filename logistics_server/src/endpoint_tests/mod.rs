mod comments;
mod general;
pub mod helpers;
mod orders;
