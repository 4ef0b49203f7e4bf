//! Generic batch processing
//!
//! A [`BatchPipeline`] runs an ordered list of [`ProcessStep`]s against many
//! documents, one document at a time, reporting [`BatchProgress`] and honoring
//! a [`CancellationSignal`] between files and steps.

pub mod cancel;
pub mod pipeline;
pub mod progress;
pub mod step;
pub mod steps;

pub use cancel::CancellationSignal;
pub use pipeline::{BatchItem, BatchOptions, BatchPipeline, BatchReport};
pub use progress::{BatchPhase, BatchProgress, ProgressReporter, TracingProgress};
pub use step::{ProcessResult, ProcessStep, StepContext, StepStatus};
pub use steps::{available_steps, resolve_steps};
