//! Exit code constants for the promptbatch CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid template, invalid state)
//! - 2: CSV structural failure (empty input, empty header)
//! - 3: Batch completed but one or more rows failed
//! - 4: Template or collection not found

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid template declarations, or invalid state.
pub const USER_ERROR: i32 = 1;

/// CSV structural failure: input with zero rows or an empty header row.
pub const CSV_FAILURE: i32 = 2;

/// Batch failure: execution completed but at least one row failed validation.
pub const BATCH_FAILURE: i32 = 3;

/// Lookup failure: referenced template or collection does not exist.
pub const NOT_FOUND: i32 = 4;
