//! Batch execution of a template against many variable sets.
//!
//! The executor is a pure, synchronous transform: one [`ExecutionResult`]
//! per input set, in input order, always. A row that fails validation
//! becomes a failure result carrying the reason; it never aborts the batch
//! or shifts the output slots of later rows. No I/O happens here; persisting
//! successful results is the caller's job via the execution recorder.
//!
//! Rows are independent of each other, so the sequential loop below could be
//! parallelized per row without changing any observable output ordering.

use crate::template::{resolve, validate_set, Template};
use crate::varset::VariableSet;

/// Outcome of resolving one variable set.
///
/// Immutable once produced; safe to hand across threads.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// The input variable set this result was produced from.
    pub set: VariableSet,

    /// The resolved prompt text; empty when the row failed.
    pub resolved: String,

    /// Whether resolution succeeded.
    pub success: bool,

    /// Why the row failed, when it did.
    pub error: Option<String>,
}

impl ExecutionResult {
    fn success(set: VariableSet, resolved: String) -> Self {
        Self {
            set,
            resolved,
            success: true,
            error: None,
        }
    }

    fn failure(set: VariableSet, error: String) -> Self {
        Self {
            set,
            resolved: String::new(),
            success: false,
            error: Some(error),
        }
    }
}

/// Aggregate view of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Total number of rows executed.
    pub total: usize,

    /// Number of rows that resolved successfully.
    pub succeeded: usize,

    /// 1-based row index and reason for each failed row, in row order.
    pub failures: Vec<(usize, String)>,
}

impl BatchSummary {
    /// Summarize a result list.
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let failures = results
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.success)
            .map(|(i, r)| {
                (
                    i + 1,
                    r.error.clone().unwrap_or_else(|| "unknown error".to_string()),
                )
            })
            .collect::<Vec<_>>();

        Self {
            total: results.len(),
            succeeded: results.len() - failures.len(),
            failures,
        }
    }

    /// Number of failed rows.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Execute a template against every variable set, isolating per-row failures.
///
/// Returns exactly one result per input set, preserving order. Each set is
/// validated first; invalid sets produce failure results with a descriptive
/// reason, valid sets are resolved.
pub fn execute_batch(template: &Template, sets: &[VariableSet]) -> Vec<ExecutionResult> {
    sets.iter()
        .map(|set| match validate_set(template, set).error_message() {
            Some(reason) => ExecutionResult::failure(set.clone(), reason),
            None => {
                let resolved = resolve(template, set);
                ExecutionResult::success(set.clone(), resolved)
            }
        })
        .collect()
}
