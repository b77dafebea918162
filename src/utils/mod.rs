//! Utility functions for logging and progress tracking.

pub mod progress;

pub use progress::{create_batch_progress_bar, finish_progress_bar};
