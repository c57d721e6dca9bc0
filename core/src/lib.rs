// flowline/src/lib.rs

//! Flowline: a small asynchronous step pipeline.
//!
//! A pipeline is an ordered list of named steps. Each step carries `before`,
//! `on` and `after` hooks that receive a shared [`ContextData`] and return a
//! [`PipelineControl`] telling the runner whether to keep going.
//!
//!  - Steps run strictly in declaration order.
//!  - Any hook may stop the run early or fail it with the pipeline's error type.
//!  - Optional steps without hooks are skipped; required ones are an error.
//!  - A [`Registry`] dispatches to the pipeline registered for a context type.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{Handler, SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::Registry;
