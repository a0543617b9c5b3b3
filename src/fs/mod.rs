//! Filesystem utilities for promptbatch.
//!
//! Provides atomic writes so library state (templates, collections, config)
//! is never left half-written by a crash or interruption.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
