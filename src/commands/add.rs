//! Implementation of the `promptbatch add` command.
//!
//! Creates a template file in the library. The body comes from `--file` or
//! stdin; declared variables are derived from the placeholders the body
//! references, and `--var NAME=DEFAULT` assignments attach defaults (or
//! declare additional variables not referenced by the body).

use super::parse_assignment;
use crate::cli::AddArgs;
use crate::context::require_initialized_library;
use crate::error::{PromptError, Result};
use crate::store::FsLibrary;
use crate::template::{Template, TemplateVariable};
use std::io::Read;

/// Execute the `promptbatch add` command.
pub fn cmd_add(args: AddArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let library = FsLibrary::new(ctx);

    if library.template_exists(&args.id) && !args.force {
        return Err(PromptError::UserError(format!(
            "template '{}' already exists (use --force to replace)",
            args.id
        )));
    }

    let body = read_body(&args)?;
    let template = build_template(&args, body)?;
    library.save_template(&template)?;

    println!("Added template '{}'.", template.id);
    if template.variables.is_empty() {
        println!("No variables declared.");
    } else {
        println!("Variables:");
        for var in &template.variables {
            match &var.default {
                Some(default) => println!("  {} (default: {})", var.name, default),
                None => println!("  {} (required)", var.name),
            }
        }
    }

    Ok(())
}

fn read_body(args: &AddArgs) -> Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            PromptError::UserError(format!(
                "failed to read template body from '{}': {}",
                path.display(),
                e
            ))
        }),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body).map_err(|e| {
                PromptError::UserError(format!("failed to read template body from stdin: {}", e))
            })?;
            Ok(body)
        }
    }
}

/// Build the template: extracted variables first, then `--var` defaults.
pub(crate) fn build_template(args: &AddArgs, body: String) -> Result<Template> {
    let mut template = Template::from_body(&args.id, body);
    template.description = args.description.clone();

    for assignment in &args.vars {
        let (name, default) = parse_assignment(assignment)?;
        match template.variables.iter_mut().find(|v| v.name == name) {
            Some(var) => var.default = Some(default),
            None => template
                .variables
                .push(TemplateVariable::with_default(name, default)),
        }
    }

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args(id: &str, vars: Vec<&str>) -> AddArgs {
        AddArgs {
            id: id.to_string(),
            file: None,
            description: Some("test template".to_string()),
            vars: vars.into_iter().map(String::from).collect(),
            force: false,
        }
    }

    #[test]
    fn variables_come_from_body() {
        let args = add_args("greeting", vec![]);
        let template =
            build_template(&args, "Hello {{name}}, you are {{age}}".to_string()).unwrap();

        let names: Vec<&str> = template.variable_names().collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(template.description.as_deref(), Some("test template"));
    }

    #[test]
    fn var_assignments_attach_defaults() {
        let args = add_args("greeting", vec!["age=30"]);
        let template =
            build_template(&args, "Hello {{name}}, you are {{age}}".to_string()).unwrap();

        assert_eq!(template.default_for("age"), Some("30"));
        assert_eq!(template.default_for("name"), None);
    }

    #[test]
    fn unreferenced_var_is_declared_additionally() {
        let args = add_args("greeting", vec!["signature=Best regards"]);
        let template = build_template(&args, "Hello {{name}}".to_string()).unwrap();

        assert!(template.is_declared("signature"));
        assert_eq!(template.default_for("signature"), Some("Best regards"));
    }

    #[test]
    fn bad_assignment_is_rejected() {
        let args = add_args("greeting", vec!["notanassignment"]);
        let result = build_template(&args, "Hello {{name}}".to_string());
        assert!(result.is_err());
    }
}
