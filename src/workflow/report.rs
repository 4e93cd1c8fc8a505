//! Markdown report rendering.
//!
//! Pure formatting over an [`Analysis`]: fixed section layout, per-pattern
//! frequency with minutes-to-hours arithmetic, a top-5 project ranking, and
//! static recommendation text. Renders a well-formed report for any input,
//! including zero sessions.

use std::fmt::Write;

use super::patterns::Pattern;
use super::Analysis;

/// Minutes attributed to one occurrence of each pattern, as
/// (time spent, time saved) pairs used by the totals arithmetic.
const VERSION_PUBLISH_MINUTES: (f64, f64) = (12.5, 10.0);
const GIT_COMMIT_PUSH_MINUTES: (f64, f64) = (6.5, 4.0);
const DOCUMENTATION_MINUTES: (f64, f64) = (10.0, 6.0);
const IMPLEMENTATION_MINUTES: (f64, f64) = (32.5, 7.0);
const TEST_FIX_SAVED_MINUTES: f64 = 3.0;

/// Session-log project directories encode the filesystem path; strip the
/// noise prefixes when showing names to the reader.
fn clean_project_name(project: &str) -> String {
    project
        .replace("-Users-ant-code-", "")
        .replace("-Users-ant-", "")
}

fn hours(count: usize, minutes: f64) -> f64 {
    count as f64 * minutes / 60.0
}

/// First-example excerpt block: `*Example from <project>:*` plus numbered
/// 120-character prompt previews with newlines flattened.
fn example_block(pattern: &Pattern, max_prompts: usize) -> String {
    let Some(example) = pattern.examples.first() else {
        return String::new();
    };

    let mut block = String::new();
    let _ = write!(
        block,
        "\n*Example from {}:*\n",
        clean_project_name(&example.project)
    );
    for (i, prompt) in example.prompts.iter().take(max_prompts).enumerate() {
        let preview: String = prompt.chars().take(120).collect::<String>().replace('\n', " ");
        let _ = writeln!(block, "{}. \"{preview}...\"", i + 1);
    }
    block
}

/// Render the complete Markdown report.
pub fn render(analysis: &Analysis) -> String {
    let summary = &analysis.summary;
    let patterns = &analysis.patterns;

    let mut report = String::new();
    let out = &mut report;

    let _ = write!(
        out,
        "# Claude Code Workflow Analysis Report\n\n\
         ## Analysis Summary\n\n\
         **Period Analyzed:** {}\n\
         **Sessions Reviewed:** {} sessions with user activity (from {} total)\n\
         **User Prompts Examined:** {} prompts\n\
         **Patterns Detected:** 5 high-value automation opportunities\n\n\
         ---\n\n\
         ## High-Priority Patterns\n\n\
         ### 1. Plugin/Marketplace Publish Workflow\n\
         **Frequency:** {} occurrences\n\
         **Estimated Time per Occurrence:** 10-15 minutes\n\
         **Total Time Spent:** ~{:.1} hours\n\
         **Potential Savings:** 8-10 minutes per run (automated sequence)\n\n\
         **What you do:**\n",
        summary.date_range,
        summary.sessions_with_user_prompts,
        summary.total_sessions_analyzed,
        summary.total_user_prompts,
        patterns.version_publish.count,
        hours(patterns.version_publish.count, VERSION_PUBLISH_MINUTES.0),
    );

    out.push_str(&example_block(&patterns.version_publish, 3));

    let _ = write!(
        out,
        "\n**Suggested Command:** `/publish-plugin [version]`\n\n\
         **What it automates:**\n\
         1. Update version in plugin.json and marketplace.json\n\
         2. Update README with version notes\n\
         3. Run any validation/tests\n\
         4. Git add, commit with conventional message\n\
         5. Git push\n\
         6. Optionally create GitHub release\n\n\
         **Time savings:** ~10 min/occurrence = **{:.1} hours saved over 30 days**\n\n\
         ---\n\n\
         ### 2. Git Commit + Push Workflow\n\
         **Frequency:** {} occurrences\n\
         **Estimated Time per Occurrence:** 5-8 minutes\n\
         **Total Time Spent:** ~{:.1} hours\n\
         **Potential Savings:** 3-5 minutes per run\n\n\
         **What you do:**\n\
         - Review changes with git status/diff\n\
         - Stage files selectively\n\
         - Write commit message\n\
         - Push to remote\n\
         - Often involves back-and-forth about commit message format\n\n\
         **Suggested Command:** `/ship-git [message]`\n\n\
         **What it automates:**\n\
         1. Run git status and git diff for review\n\
         2. Stage all changes (or prompt for selection)\n\
         3. Create commit with your preferred format\n\
         4. Push to current branch\n\
         5. Show summary of what was shipped\n\n\
         **Time savings:** ~4 min/occurrence = **{:.1} hours saved over 30 days**\n\n\
         ---\n\n\
         ### 3. Documentation Updates\n\
         **Frequency:** {} occurrences\n\
         **Estimated Time per Occurrence:** 8-12 minutes\n\
         **Total Time Spent:** ~{:.1} hours\n\
         **Potential Savings:** 5-8 minutes per run\n\n\
         **What you do:**\n\
         - Update README files after feature changes\n\
         - Keep plugin docs in sync with marketplace.json\n\
         - Review and refine documentation formatting\n\
         - Ensure consistency across multiple README files\n\n\
         **Suggested Command:** `/sync-docs`\n\n\
         **What it automates:**\n\
         1. Check for version mismatches between files\n\
         2. Update README files with latest plugin metadata\n\
         3. Validate documentation structure\n\
         4. Check for broken links or references\n\
         5. Ensure consistent formatting\n\
         6. Optionally commit documentation changes\n\n\
         **Time savings:** ~6 min/occurrence = **{:.1} hours saved over 30 days**\n\n\
         ---\n\n\
         ### 4. Implementation Workflows (Plan → Build → Test)\n\
         **Frequency:** {} occurrences\n\
         **Estimated Time per Occurrence:** 20-45 minutes\n\
         **Total Time Spent:** ~{:.1} hours\n\
         **Potential Savings:** 5-10 minutes per run (setup/teardown phases)\n\n\
         **What you do:**\n",
        hours(patterns.version_publish.count, VERSION_PUBLISH_MINUTES.1),
        patterns.git_commit_push.count,
        hours(patterns.git_commit_push.count, GIT_COMMIT_PUSH_MINUTES.0),
        hours(patterns.git_commit_push.count, GIT_COMMIT_PUSH_MINUTES.1),
        patterns.documentation_updates.count,
        hours(patterns.documentation_updates.count, DOCUMENTATION_MINUTES.0),
        hours(patterns.documentation_updates.count, DOCUMENTATION_MINUTES.1),
        patterns.implementation_workflows.count,
        hours(
            patterns.implementation_workflows.count,
            IMPLEMENTATION_MINUTES.0
        ),
    );

    out.push_str(&example_block(&patterns.implementation_workflows, 2));

    let _ = write!(
        out,
        "\n**Suggested Command:** `/do-phase [phase-name]`\n\n\
         **What it automates:**\n\
         - Common development phase transitions\n\
         - Reads @PLAN.md or similar planning documents\n\
         - Sets up context for each phase\n\
         - Runs phase-specific validations\n\
         - Updates progress tracking\n\n\
         **Example usage:**\n\
         - `/do-phase planning` - Review requirements, create/update PLAN.md\n\
         - `/do-phase implementation` - Load plan, track progress, implement features\n\
         - `/do-phase review` - Run tests, check quality, prepare for commit\n\n\
         **Time savings:** ~7 min/occurrence = **{:.1} hours saved over 30 days**\n\n\
         ---\n\n\
         ## Medium-Priority Patterns\n\n\
         ### 5. Test + Fix Cycles\n\
         **Frequency:** {} occurrences\n\
         **Suggested Command:** `/test-and-fix`\n\n\
         **What it automates:**\n\
         1. Run test suite\n\
         2. Analyze failures\n\
         3. Fix identified issues\n\
         4. Re-run tests\n\
         5. Report results\n\n\
         **Time savings:** ~3 min/occurrence = **{:.1} hours saved over 30 days**\n\n\
         ---\n\n\
         ## Project-Specific Insights\n\n\
         **Most Active Projects:**\n",
        hours(
            patterns.implementation_workflows.count,
            IMPLEMENTATION_MINUTES.1
        ),
        patterns.test_fix_cycles.count,
        hours(patterns.test_fix_cycles.count, TEST_FIX_SAVED_MINUTES),
    );

    // Top 5 projects by descending session count; ties keep first-seen order.
    let mut ranked = analysis.project_activity.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let total_sessions: usize = ranked.iter().map(|(_, count)| count).sum();

    for (project, count) in ranked.iter().take(5) {
        let percentage = if total_sessions > 0 {
            *count as f64 / total_sessions as f64 * 100.0
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            "- **{}**: {} sessions ({:.0}% of activity)",
            clean_project_name(project),
            count,
            percentage
        );
    }

    let most_active = ranked
        .first()
        .map(|(project, _)| clean_project_name(project))
        .unwrap_or_else(|| "unknown".to_string());

    let _ = write!(
        out,
        "\n**Key Observation:** Your workflow patterns suggest you'd benefit from \
         **project-aware commands** that adapt to context.\n\n\
         **Pattern:** You frequently work on:\n\
         1. Plugin/skill development\n\
         2. Application development ({most_active} is your most active project)\n\
         3. Testing/setup tooling\n\n\
         ---\n\n\
         ## Recommendations\n\n\
         ### Commands to Create First (Ranked by Impact)\n\n\
         1. **`/publish-plugin`** - Highest time savings, very repetitive workflow\n\
            - Priority: **HIGHEST**\n\
            - Complexity: Medium\n\
            - ROI: Excellent\n\n\
         2. **`/ship-git`** - Second highest savings, used across all projects\n\
            - Priority: **HIGH**\n\
            - Complexity: Low\n\
            - ROI: Excellent\n\n\
         3. **`/sync-docs`** - High savings, prevents consistency errors\n\
            - Priority: **HIGH**\n\
            - Complexity: Medium\n\
            - ROI: Very Good\n\n\
         4. **`/do-phase`** - Good savings, improves workflow structure\n\
            - Priority: **MEDIUM-HIGH**\n\
            - Complexity: Medium-High\n\
            - ROI: Good\n\n\
         5. **`/test-and-fix`** - Moderate savings, good for iteration speed\n\
            - Priority: **MEDIUM**\n\
            - Complexity: Medium\n\
            - ROI: Good\n\n\
         ### Estimated Total Time Savings\n\n\
         **If you implement the top 3 commands:** ~{:.1} hours saved per month\n\
         **If you implement all 5 commands:** ~{:.1} hours saved per month\n\n\
         ### Next Steps\n\n\
         1. **Start with `/ship-git`** - Lowest complexity, immediate benefit, used everywhere\n\
         2. **Add `/publish-plugin`** - Highest savings for your current focus area\n\
         3. **Create `/sync-docs`** - Prevents documentation drift in marketplace work\n\
         4. Consider project-specific variants that detect current project context\n\n\
         ### User Preference Observations\n\n\
         Based on your workflow patterns:\n\
         - ✓ You prefer structured, multi-step workflows\n\
         - ✓ You work with @PLAN.md and reference files frequently\n\
         - ✓ You iterate on naming and documentation carefully\n\
         - ✓ You value consistency across plugin/marketplace files\n\
         - ✓ Git commit messages appear to use conventional format\n\n\
         **Commands should:**\n\
         - Support reading from @-referenced files (like @PLAN.md)\n\
         - Provide clear progress tracking\n\
         - Allow refinement/iteration before final execution\n\
         - Maintain file consistency as a primary goal\n\
         - Use your preferred commit message conventions\n\n\
         ---\n\n\
         ## Appendix: Analysis Metadata\n\n\
         **Sessions Analyzed:** {}\n\
         **Sessions with User Activity:** {}\n\
         **User Prompts Parsed:** {}\n\
         **Pattern Detection Method:** Keyword analysis + session structure analysis\n\
         **Privacy:** All analysis performed locally, no data sent externally\n",
        top3_savings_hours(analysis),
        all5_savings_hours(analysis),
        summary.total_sessions_analyzed,
        summary.sessions_with_user_prompts,
        summary.total_user_prompts,
    );

    report
}

fn top3_savings_hours(analysis: &Analysis) -> f64 {
    let patterns = &analysis.patterns;
    (patterns.version_publish.count as f64 * VERSION_PUBLISH_MINUTES.1
        + patterns.git_commit_push.count as f64 * GIT_COMMIT_PUSH_MINUTES.1
        + patterns.documentation_updates.count as f64 * DOCUMENTATION_MINUTES.1)
        / 60.0
}

fn all5_savings_hours(analysis: &Analysis) -> f64 {
    let patterns = &analysis.patterns;
    top3_savings_hours(analysis)
        + (patterns.implementation_workflows.count as f64 * IMPLEMENTATION_MINUTES.1
            + patterns.test_fix_cycles.count as f64 * TEST_FIX_SAVED_MINUTES)
            / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::patterns::{PatternExample, Patterns};
    use crate::workflow::{analyze, Summary};

    fn empty_analysis() -> Analysis {
        Analysis {
            summary: Summary {
                total_sessions_analyzed: 0,
                sessions_with_user_prompts: 0,
                total_user_prompts: 0,
                date_range: "Last 30 days".to_string(),
            },
            project_activity: Vec::new(),
            patterns: Patterns::default(),
        }
    }

    #[test]
    fn test_empty_input_renders_zeroed_report() {
        let report = render(&analyze(&[]));
        assert!(report.starts_with("# Claude Code Workflow Analysis Report"));
        assert!(report.contains("**Sessions Reviewed:** 0 sessions with user activity (from 0 total)"));
        assert!(report.contains("**User Prompts Examined:** 0 prompts"));
        assert!(report.contains("**Frequency:** 0 occurrences"));
        assert!(report.contains("(unknown is your most active project)"));
    }

    #[test]
    fn test_time_arithmetic_uses_fixed_constants() {
        let mut analysis = empty_analysis();
        analysis.patterns.git_commit_push.count = 6;
        let report = render(&analysis);
        // 6 occurrences * 6.5 min spent, * 4 min saved.
        assert!(report.contains("**Total Time Spent:** ~0.7 hours"));
        assert!(report.contains("**Time savings:** ~4 min/occurrence = **0.4 hours saved over 30 days**"));
    }

    #[test]
    fn test_projects_ranked_by_descending_session_count() {
        let mut analysis = empty_analysis();
        analysis.project_activity = vec![
            ("small".to_string(), 1),
            ("big".to_string(), 7),
            ("mid".to_string(), 2),
        ];
        let report = render(&analysis);

        let big = report.find("- **big**: 7 sessions (70% of activity)").unwrap();
        let mid = report.find("- **mid**: 2 sessions (20% of activity)").unwrap();
        let small = report.find("- **small**: 1 sessions (10% of activity)").unwrap();
        assert!(big < mid && mid < small);
    }

    #[test]
    fn test_top_five_projects_only() {
        let mut analysis = empty_analysis();
        analysis.project_activity = (0..8)
            .map(|i| (format!("project-{i}"), 8 - i))
            .collect();
        let report = render(&analysis);
        assert!(report.contains("- **project-4**:"));
        assert!(!report.contains("- **project-5**:"));
    }

    #[test]
    fn test_example_excerpts_are_truncated_and_flattened() {
        let mut analysis = empty_analysis();
        let long_prompt = format!("bump the version and publish it {}", "x".repeat(200));
        analysis.patterns.version_publish.count = 1;
        analysis.patterns.version_publish.examples.push(PatternExample {
            session: "s1".to_string(),
            project: "-Users-ant-code-my-plugin".to_string(),
            prompts: vec![long_prompt, "second\nline".to_string()],
        });
        let report = render(&analysis);

        assert!(report.contains("*Example from my-plugin:*"));
        // 120 chars then an ellipsis marker.
        let excerpt_line = report
            .lines()
            .find(|l| l.starts_with("1. \"bump the version"))
            .unwrap();
        assert!(excerpt_line.len() <= 120 + "1. \"...\"".len());
        assert!(report.contains("2. \"second line...\""));
    }

    #[test]
    fn test_project_name_cleaning() {
        assert_eq!(clean_project_name("-Users-ant-code-pkglens"), "pkglens");
        assert_eq!(clean_project_name("-Users-ant-notes"), "notes");
        assert_eq!(clean_project_name("plain"), "plain");
    }
}
