// flowline/src/pipeline/mod.rs

//! The `Pipeline<T, E>` type: declaration, hook registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
