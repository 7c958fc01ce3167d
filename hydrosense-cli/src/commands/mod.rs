//! Command implementations for the hydrosense CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod allocate;
pub mod init;
pub mod inspect;
pub mod submit;
