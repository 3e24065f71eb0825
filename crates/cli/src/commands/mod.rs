//! Command implementations.

mod run;

pub use run::{classify_failure, run_pipeline, Failure};
