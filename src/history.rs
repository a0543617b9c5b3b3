//! Execution history for promptbatch.
//!
//! Successful resolutions are persisted as append-only NDJSON records (one
//! JSON object per line) in `.promptbatch/history/history.ndjson`. The batch
//! executor itself performs no I/O; callers filter successes out of a batch
//! and hand them to a recorder after the batch completes.
//!
//! # Record Format
//!
//! Each line is a JSON object with the following fields:
//! - `id`: sequential record id assigned on save
//! - `ts`: RFC3339 timestamp
//! - `actor`: who ran the execution (e.g., `user@HOST`)
//! - `template`: the template id
//! - `variables`: the input variable set as a JSON object
//! - `resolved_prompt`: the final resolved text

use crate::batch::ExecutionResult;
use crate::error::{PromptError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A durable record of one successful execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Sequential id, assigned by the recorder on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// When the execution was recorded.
    pub ts: DateTime<Utc>,

    /// Who performed the execution (e.g., `user@HOST`).
    pub actor: String,

    /// The template the prompt was resolved from.
    pub template: String,

    /// The input variable set, serialized as a JSON object.
    pub variables: Value,

    /// The resolved prompt text.
    pub resolved_prompt: String,
}

impl ExecutionRecord {
    /// Build a record from a successful batch result.
    ///
    /// The caller is responsible for only passing successes; a failure
    /// result would record an empty prompt.
    pub fn from_result(template_id: &str, result: &ExecutionResult, actor: &str) -> Self {
        Self {
            id: None,
            ts: Utc::now(),
            actor: actor.to_string(),
            template: template_id.to_string(),
            variables: result.set.to_json(),
            resolved_prompt: result.resolved.clone(),
        }
    }

    /// Serialize the record to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PromptError::UserError(format!("failed to serialize history record: {}", e))
        })
    }
}

/// Default actor string derived from the environment.
pub fn default_actor() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Collaborator boundary for persisting successful executions.
pub trait ExecutionRecorder {
    /// Persist the given records, returning them with assigned ids.
    fn save_executions(&self, records: Vec<ExecutionRecord>) -> Result<Vec<ExecutionRecord>>;
}

/// NDJSON-file-backed execution recorder.
///
/// Ids are sequential across the life of the file: the next id is one past
/// the number of lines already present.
#[derive(Debug, Clone)]
pub struct FileRecorder {
    path: PathBuf,
}

impl FileRecorder {
    /// Create a recorder writing to the given NDJSON file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn existing_record_count(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.lines().filter(|l| !l.trim().is_empty()).count() as u64,
            Err(_) => 0,
        }
    }
}

impl ExecutionRecorder for FileRecorder {
    fn save_executions(&self, mut records: Vec<ExecutionRecord>) -> Result<Vec<ExecutionRecord>> {
        if records.is_empty() {
            return Ok(records);
        }

        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                PromptError::UserError(format!(
                    "failed to create history directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let next_id = self.existing_record_count() + 1;
        for (offset, record) in records.iter_mut().enumerate() {
            record.id = Some(next_id + offset as u64);
        }

        // Serialize everything before touching the file so a bad record
        // cannot leave a partially written batch behind.
        let mut lines = String::new();
        for record in &records {
            lines.push_str(&record.to_ndjson_line()?);
            lines.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                PromptError::UserError(format!(
                    "failed to open history file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        file.write_all(lines.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| {
                PromptError::UserError(format!(
                    "failed to write history file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        Ok(records)
    }
}

/// Read the most recent `limit` records from a history file.
///
/// A missing file reads as empty history. Unparseable lines are skipped so
/// one corrupt entry cannot hide the rest of the log.
pub fn read_recent<P: AsRef<Path>>(path: P, limit: usize) -> Result<Vec<ExecutionRecord>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(PromptError::UserError(format!(
                "failed to read history file '{}': {}",
                path.display(),
                e
            )));
        }
    };

    let records: Vec<ExecutionRecord> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    let skip = records.len().saturating_sub(limit);
    Ok(records.into_iter().skip(skip).collect())
}
