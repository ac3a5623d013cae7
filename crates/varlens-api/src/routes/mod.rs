//! API route handlers.

pub mod health;
pub mod returns;
pub mod var;
