//! Declarative macros for reraise.

// The guarded! macro is defined here with #[macro_export], which exports it at crate root
#[macro_use]
mod guarded;
