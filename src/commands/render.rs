//! Implementation of the `promptbatch render` command.
//!
//! Resolves a template against one variable set supplied as `--set`
//! assignments. Validation runs first so a missing required variable is a
//! clear error instead of a silently hollow prompt. Successful renders are
//! appended to the history log unless disabled.

use super::{load_template, parse_assignment};
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::context::require_initialized_library;
use crate::error::{PromptError, Result};
use crate::history::{default_actor, ExecutionRecord, ExecutionRecorder, FileRecorder};
use crate::store::FsLibrary;
use crate::template::{resolve, validate_set};
use crate::varset::VariableSet;

/// Execute the `promptbatch render` command.
pub fn cmd_render(args: RenderArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let config = Config::load_or_default(ctx.config_path());
    let library = FsLibrary::new(ctx);
    let template = load_template(&library, &args.template)?;

    let mut set = VariableSet::new();
    for assignment in &args.sets {
        let (name, value) = parse_assignment(assignment)?;
        set.insert(name, value);
    }

    if let Some(reason) = validate_set(&template, &set).error_message() {
        return Err(PromptError::UserError(reason));
    }

    let resolved = resolve(&template, &set);
    println!("{}", resolved);

    if config.record_history && !args.no_history {
        let actor = config.actor.clone().unwrap_or_else(default_actor);
        let record = ExecutionRecord {
            id: None,
            ts: chrono::Utc::now(),
            actor,
            template: template.id.clone(),
            variables: set.to_json(),
            resolved_prompt: resolved,
        };
        let recorder = FileRecorder::new(library.context().history_file());
        recorder.save_executions(vec![record])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::history::read_recent;
    use crate::template::Template;
    use crate::test_support::{create_test_library, DirGuard};
    use serial_test::serial;

    fn args(template: &str, sets: Vec<&str>) -> RenderArgs {
        RenderArgs {
            template: template.to_string(),
            sets: sets.into_iter().map(String::from).collect(),
            no_history: false,
        }
    }

    #[test]
    #[serial]
    fn render_records_history() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let ctx = crate::context::require_initialized_library().unwrap();
        let library = FsLibrary::new(ctx);
        library
            .save_template(&Template::from_body("greeting", "Hello {{name}}"))
            .unwrap();

        cmd_render(args("greeting", vec!["name=John"])).unwrap();

        let records = read_recent(library.context().history_file(), 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].template, "greeting");
        assert_eq!(records[0].resolved_prompt, "Hello John");
        assert_eq!(records[0].variables["name"], "John");
    }

    #[test]
    #[serial]
    fn render_with_no_history_flag_skips_recording() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let ctx = crate::context::require_initialized_library().unwrap();
        let library = FsLibrary::new(ctx);
        library
            .save_template(&Template::from_body("greeting", "Hello {{name}}"))
            .unwrap();

        let mut render_args = args("greeting", vec!["name=John"]);
        render_args.no_history = true;
        cmd_render(render_args).unwrap();

        let records = read_recent(library.context().history_file(), 10).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    #[serial]
    fn render_missing_required_variable_is_user_error() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());
        let ctx = crate::context::require_initialized_library().unwrap();
        let library = FsLibrary::new(ctx);
        library
            .save_template(&Template::from_body("greeting", "Hello {{name}}"))
            .unwrap();

        let err = cmd_render(args("greeting", vec![])).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("name"));
    }

    #[test]
    #[serial]
    fn render_unknown_template_is_not_found() {
        let temp_dir = create_test_library();
        let _guard = DirGuard::new(temp_dir.path());

        let err = cmd_render(args("missing", vec![])).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }
}
