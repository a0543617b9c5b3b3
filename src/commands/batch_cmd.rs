//! Implementation of the `promptbatch batch` command.
//!
//! Runs a template against every row of a CSV file or imported collection.
//! The batch itself never aborts on a bad row: every input produces exactly
//! one result, failures carry their row index and reason, and the summary
//! is printed before the command maps row failures to exit code 3.

use super::load_template;
use crate::batch::{execute_batch, BatchSummary, ExecutionResult};
use crate::cli::BatchArgs;
use crate::config::Config;
use crate::context::require_initialized_library;
use crate::csv::{self, export_results};
use crate::error::{PromptError, Result};
use crate::fs::atomic_write_file;
use crate::history::{default_actor, ExecutionRecord, ExecutionRecorder, FileRecorder};
use crate::store::{CollectionStore, FsLibrary};
use crate::template::Template;
use crate::varset::VariableSet;

/// Execute the `promptbatch batch` command.
pub fn cmd_batch(args: BatchArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let config = Config::load_or_default(ctx.config_path());
    let library = FsLibrary::new(ctx);
    let template = load_template(&library, &args.template)?;

    let sets = load_sets(&library, &template, &args)?;
    let results = execute_batch(&template, &sets);
    let summary = BatchSummary::from_results(&results);

    print_summary(&summary);

    if let Some(path) = &args.output {
        let csv = export_results(&template, &results);
        atomic_write_file(path, &csv)?;
        println!("Results written to {}", path.display());
    }

    if config.record_history && !args.no_history {
        let recorded = record_successes(&library, &config, &template, &results)?;
        if recorded > 0 {
            println!("Recorded {} execution(s) to history.", recorded);
        }
    }

    if summary.failed() > 0 {
        return Err(PromptError::BatchFailures {
            failed: summary.failed(),
            total: summary.total,
        });
    }

    Ok(())
}

/// Load the input rows from `--csv` or `--collection`.
fn load_sets(
    library: &FsLibrary,
    template: &Template,
    args: &BatchArgs,
) -> Result<Vec<VariableSet>> {
    match (&args.csv, &args.collection) {
        (Some(path), None) => {
            let csv_text = std::fs::read_to_string(path).map_err(|e| {
                PromptError::UserError(format!(
                    "failed to read CSV file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            csv::decode(&csv_text)
        }
        (None, Some(id)) => {
            let collection = library.get_collection(id)?;
            if collection.template != template.id {
                return Err(PromptError::UserError(format!(
                    "collection '{}' belongs to template '{}', not '{}'",
                    id, collection.template, template.id
                )));
            }
            Ok(collection.sets)
        }
        _ => Err(PromptError::UserError(
            "provide exactly one of --csv or --collection".to_string(),
        )),
    }
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "Executed {} row(s): {} succeeded, {} failed.",
        summary.total,
        summary.succeeded,
        summary.failed()
    );

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for (index, reason) in &summary.failures {
            println!("  row {}: {}", index, reason);
        }
    }
}

/// Append the successful results to the history log.
fn record_successes(
    library: &FsLibrary,
    config: &Config,
    template: &Template,
    results: &[ExecutionResult],
) -> Result<usize> {
    let actor = config.actor.clone().unwrap_or_else(default_actor);
    let records: Vec<ExecutionRecord> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| ExecutionRecord::from_result(&template.id, r, &actor))
        .collect();

    let count = records.len();
    if count > 0 {
        let recorder = FileRecorder::new(library.context().history_file());
        recorder.save_executions(records)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::require_initialized_library;
    use crate::exit_codes;
    use crate::history::read_recent;
    use crate::test_support::{create_test_library, DirGuard};
    use serial_test::serial;
    use std::path::PathBuf;

    fn args(template: &str) -> BatchArgs {
        BatchArgs {
            template: template.to_string(),
            csv: None,
            collection: None,
            output: None,
            no_history: false,
        }
    }

    fn setup_greeting(library: &FsLibrary) {
        library
            .save_template(&Template::from_body(
                "greeting",
                "Hello {{name}}, you are {{age}}",
            ))
            .unwrap();
    }

    #[test]
    #[serial]
    fn batch_from_csv_writes_results_and_fails_on_bad_rows() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let library = FsLibrary::new(require_initialized_library().unwrap());
        setup_greeting(&library);

        let csv_path = temp_dir.path().join("rows.csv");
        std::fs::write(&csv_path, "name,age\nJohn,30\nJane,\n").unwrap();

        let mut batch_args = args("greeting");
        batch_args.csv = Some(PathBuf::from("rows.csv"));
        batch_args.output = Some(PathBuf::from("results.csv"));
        batch_args.no_history = true;

        let err = cmd_batch(batch_args).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::BATCH_FAILURE);
        assert_eq!(err.to_string(), "1 of 2 rows failed");

        let results = std::fs::read_to_string(temp_dir.path().join("results.csv")).unwrap();
        let lines: Vec<&str> = results.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,true,"));
        assert!(lines[2].starts_with("2,false,missing required variable(s): age"));
    }

    #[test]
    #[serial]
    fn batch_from_collection_records_successes() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let library = FsLibrary::new(require_initialized_library().unwrap());
        setup_greeting(&library);
        library
            .save_collection("users", "greeting", "name,age\nJohn,30\nJane,25")
            .unwrap();

        let mut batch_args = args("greeting");
        batch_args.collection = Some("users".to_string());
        cmd_batch(batch_args).unwrap();

        let records = read_recent(library.context().history_file(), 10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resolved_prompt, "Hello John, you are 30");
        assert_eq!(records[1].resolved_prompt, "Hello Jane, you are 25");
    }

    #[test]
    #[serial]
    fn batch_rejects_collection_of_another_template() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let library = FsLibrary::new(require_initialized_library().unwrap());
        setup_greeting(&library);
        library
            .save_template(&Template::from_body("other", "{{name}}"))
            .unwrap();
        library
            .save_collection("users", "other", "name\nJohn")
            .unwrap();

        let mut batch_args = args("greeting");
        batch_args.collection = Some("users".to_string());

        let err = cmd_batch(batch_args).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("belongs to template 'other'"));
    }

    #[test]
    #[serial]
    fn batch_requires_an_input_source() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let library = FsLibrary::new(require_initialized_library().unwrap());
        setup_greeting(&library);

        let err = cmd_batch(args("greeting")).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    #[serial]
    fn batch_with_structurally_bad_csv_is_csv_failure() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let library = FsLibrary::new(require_initialized_library().unwrap());
        setup_greeting(&library);
        std::fs::write(temp_dir.path().join("empty.csv"), "").unwrap();

        let mut batch_args = args("greeting");
        batch_args.csv = Some(PathBuf::from("empty.csv"));

        let err = cmd_batch(batch_args).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::CSV_FAILURE);
    }
}
