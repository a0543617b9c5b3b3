//! Implementation of the `promptbatch history` command.

use crate::cli::HistoryArgs;
use crate::config::Config;
use crate::context::require_initialized_library;
use crate::error::Result;
use crate::history::read_recent;

/// Execute the `promptbatch history` command.
pub fn cmd_history(args: HistoryArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let config = Config::load_or_default(ctx.config_path());
    let limit = args.limit.unwrap_or(config.history_limit) as usize;

    let records = read_recent(ctx.history_file(), limit)?;
    if records.is_empty() {
        println!("No execution history.");
        return Ok(());
    }

    println!("Recent executions ({}):", records.len());
    for record in &records {
        let id = record
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  #{} {} {} [{}]",
            id,
            record.ts.format("%Y-%m-%d %H:%M:%S"),
            record.template,
            record.actor
        );
        // Prompts can be long; show the first line as a preview.
        if let Some(first_line) = record.resolved_prompt.lines().next() {
            println!("      {}", first_line);
        }
    }

    Ok(())
}
