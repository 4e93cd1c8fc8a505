use super::sessions::Session;

/// Stored examples per pattern are capped; `count` stays uncapped.
const EXAMPLES_CAP: usize = 5;
/// Prompt excerpts carried per example.
const PROMPTS_PER_EXAMPLE: usize = 5;

#[derive(Debug, Clone)]
pub struct PatternExample {
    pub session: String,
    pub project: String,
    pub prompts: Vec<String>,
}

/// One workflow pattern: the true number of matching sessions plus the first
/// few matches (in input order) as illustrations.
#[derive(Debug, Default)]
pub struct Pattern {
    pub count: usize,
    pub examples: Vec<PatternExample>,
}

/// The five keyword classifiers. Independent and non-exclusive: one session
/// may match any subset.
#[derive(Debug, Default)]
pub struct Patterns {
    pub git_commit_push: Pattern,
    pub version_publish: Pattern,
    pub documentation_updates: Pattern,
    pub test_fix_cycles: Pattern,
    pub implementation_workflows: Pattern,
}

/// Run all five classifiers over each session's combined lowercased prompt
/// text.
pub fn detect(sessions: &[Session]) -> Patterns {
    Patterns {
        git_commit_push: collect(sessions, |text, _| {
            let has_commit = text.contains("commit") || text.contains("committed");
            let has_push = text.contains("push");
            (has_commit && has_push) || text.matches("git").count() >= 2
        }),
        version_publish: collect(sessions, |text, _| {
            let has_version = text.contains("version") || text.contains("bump");
            let has_publish =
                text.contains("publish") || text.contains("release") || text.contains("update");
            let has_plugin = text.contains("plugin") || text.contains("marketplace");
            (has_version && has_publish) || (has_plugin && (has_version || has_publish))
        }),
        documentation_updates: collect(sessions, |text, _| {
            text.contains("readme")
                || text.contains("documentation")
                || (text.contains("doc") && (text.contains("update") || text.contains("write")))
        }),
        test_fix_cycles: collect(sessions, |text, _| {
            let has_test = text.contains("test") || text.contains("testing");
            let has_fix =
                text.contains("fix") || text.contains("error") || text.contains("bug");
            has_test && has_fix
        }),
        implementation_workflows: collect(sessions, |text, session| {
            text.contains("implement")
                || text.contains("implementation")
                || text.contains("build")
                || (session.prompts.len() >= 5
                    && (text.contains("add") || text.contains("create")))
        }),
    }
}

fn collect<F>(sessions: &[Session], matches: F) -> Pattern
where
    F: Fn(&str, &Session) -> bool,
{
    let mut pattern = Pattern::default();

    for session in sessions {
        let text = combined_text(session);
        if !matches(&text, session) {
            continue;
        }
        pattern.count += 1;
        if pattern.examples.len() < EXAMPLES_CAP {
            pattern.examples.push(PatternExample {
                session: session.id.clone(),
                project: session.project.clone(),
                prompts: session
                    .prompts
                    .iter()
                    .take(PROMPTS_PER_EXAMPLE)
                    .cloned()
                    .collect(),
            });
        }
    }

    pattern
}

/// Space-joined lowercased prompt text, the unit every classifier operates on.
fn combined_text(session: &Session) -> String {
    session
        .prompts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
