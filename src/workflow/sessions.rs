use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// One session log that yielded at least one qualifying prompt.
///
/// Project comes from the log's parent directory, the session id from the
/// file stem.
#[derive(Debug, Clone)]
pub struct Session {
    pub project: String,
    pub id: String,
    pub prompts: Vec<String>,
}

/// One line of a session log, reduced to the fields that decide whether it
/// counts as a user prompt.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Record {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "isMeta")]
    is_meta: bool,
    message: Message,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Message {
    role: String,
    content: Value,
}

/// Parse every session log in `paths`, keeping only sessions with at least
/// one qualifying prompt. Malformed lines are skipped; unreadable files
/// contribute nothing and the run continues.
pub fn parse_sessions(paths: &[std::path::PathBuf]) -> Vec<Session> {
    let mut sessions = Vec::new();

    for path in paths {
        match parse_one(path) {
            Some(session) if !session.prompts.is_empty() => sessions.push(session),
            Some(_) => {}
            None => debug!(path = %path.display(), "skipping unreadable session log"),
        }
    }

    sessions
}

fn parse_one(path: &Path) -> Option<Session> {
    let project = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(path).ok()?;
    let mut prompts = Vec::new();

    for line in BufReader::new(file).lines() {
        // A file-level read error drops the whole file, not just the line.
        let line = line.ok()?;
        if let Some(prompt) = qualifying_prompt(&line) {
            prompts.push(prompt);
        }
    }

    Some(Session { project, id, prompts })
}

/// A line counts as a user prompt iff it is a `type: "user"` record whose
/// message role is `user`, is not flagged as meta, carries plain-string
/// content (multi-part list content is excluded), does not start with a
/// command marker tag, and is longer than 20 characters.
fn qualifying_prompt(line: &str) -> Option<String> {
    let record: Record = serde_json::from_str(line.trim()).ok()?;

    if record.kind != "user" || record.message.role != "user" || record.is_meta {
        return None;
    }

    let content = record.message.content.as_str()?;
    if content.starts_with("<command") || content.starts_with("<local-command") {
        return None;
    }
    if content.chars().count() <= 20 {
        return None;
    }

    Some(content.to_string())
}
