//! Workflow analyzer: session logs in, Markdown report out.
//!
//! # Flow
//! 1. Parse record-per-line session logs into qualifying prompts ([`sessions`]).
//! 2. Run the five keyword classifiers per session ([`patterns`]).
//! 3. Tally per-project session counts ([`project_activity`]).
//! 4. Render the Markdown report ([`report`]).
//!
//! The run never fails: malformed lines and unreadable files only reduce
//! coverage, reflected in the summary counts.

pub mod patterns;
pub mod report;
pub mod sessions;

use std::path::PathBuf;

use patterns::Patterns;
use sessions::Session;

/// Everything the report renderer needs, in one aggregate.
#[derive(Debug)]
pub struct Analysis {
    pub summary: Summary,
    /// project → session count, first-seen order.
    pub project_activity: Vec<(String, usize)>,
    pub patterns: Patterns,
}

#[derive(Debug)]
pub struct Summary {
    /// Every input path, readable or not.
    pub total_sessions_analyzed: usize,
    pub sessions_with_user_prompts: usize,
    pub total_user_prompts: usize,
    pub date_range: String,
}

/// Analyze the given session-log paths.
pub fn analyze(paths: &[PathBuf]) -> Analysis {
    let sessions = sessions::parse_sessions(paths);

    let summary = Summary {
        total_sessions_analyzed: paths.len(),
        sessions_with_user_prompts: sessions.len(),
        total_user_prompts: sessions.iter().map(|s| s.prompts.len()).sum(),
        date_range: "Last 30 days".to_string(),
    };

    Analysis {
        summary,
        project_activity: project_activity(&sessions),
        patterns: patterns::detect(&sessions),
    }
}

/// Count sessions per project, preserving first-seen project order.
fn project_activity(sessions: &[Session]) -> Vec<(String, usize)> {
    let mut activity: Vec<(String, usize)> = Vec::new();

    for session in sessions {
        match activity.iter_mut().find(|(p, _)| *p == session.project) {
            Some((_, count)) => *count += 1,
            None => activity.push((session.project.clone(), 1)),
        }
    }

    activity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(project: &str, id: &str) -> Session {
        Session {
            project: project.to_string(),
            id: id.to_string(),
            prompts: vec!["a placeholder prompt long enough to count".to_string()],
        }
    }

    #[test]
    fn test_project_activity_counts_sessions_not_prompts() {
        let mut s = session("alpha", "s1");
        s.prompts.push("another prompt in the very same session".to_string());
        let sessions = vec![s, session("beta", "s2"), session("alpha", "s3")];

        let activity = project_activity(&sessions);
        assert_eq!(activity, vec![("alpha".to_string(), 2), ("beta".to_string(), 1)]);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let sessions = vec![
            session("zeta", "s1"),
            session("alpha", "s2"),
            session("zeta", "s3"),
        ];
        let activity = project_activity(&sessions);
        assert_eq!(activity[0].0, "zeta");
        assert_eq!(activity[1].0, "alpha");
    }

    #[test]
    fn test_empty_input_yields_zeroed_summary() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.summary.total_sessions_analyzed, 0);
        assert_eq!(analysis.summary.sessions_with_user_prompts, 0);
        assert_eq!(analysis.summary.total_user_prompts, 0);
        assert!(analysis.project_activity.is_empty());
        assert_eq!(analysis.patterns.git_commit_push.count, 0);
    }

    #[test]
    fn test_unreadable_paths_still_count_toward_total() {
        let analysis = analyze(&[PathBuf::from("/no/such/file.jsonl")]);
        assert_eq!(analysis.summary.total_sessions_analyzed, 1);
        assert_eq!(analysis.summary.sessions_with_user_prompts, 0);
    }
}
