//! GitHub repository linking: URL → (owner, name) → repository metadata.
//!
//! Core repository fields come from `gh api` with a plain REST fallback when
//! the CLI is unavailable. Community health, contributor count, and the SPDX
//! license id are supplementary: each is attempted via `gh` alone and
//! silently omitted when its call fails.

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::exec::{run_command, COMMAND_TIMEOUT};
use crate::fetch::fetch_json;
use crate::models::{CommunityHealth, GithubData, LicenseInfo};

/// Repository core fields as returned by `gh api repos/{owner}/{repo}` and
/// the REST endpoint alike.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepoFields {
    pushed_at: String,
    open_issues_count: i64,
    stargazers_count: i64,
    forks_count: i64,
    watchers_count: i64,
    default_branch: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommunityProfile {
    health_percentage: i64,
    files: Value,
}

/// Extract `(owner, name)` from a GitHub URL in any common form: HTTPS, SSH
/// (`git@github.com:owner/name`), or `.git`-suffixed. Only github.com is
/// recognized. Idempotent on its own canonical output.
pub fn extract_repo_id(url: &str) -> Option<(String, String)> {
    if url.is_empty() {
        return None;
    }

    // Colon-or-slash first (covers SSH remotes), then plain slash.
    for pattern in [
        r"github\.com[:/]([^/]+)/([^/.]+)",
        r"github\.com/([^/]+)/([^/.]+)",
    ] {
        let re = Regex::new(pattern).ok()?;
        if let Some(caps) = re.captures(url) {
            let owner = caps[1].to_string();
            let name = caps[2].trim_end_matches(".git").to_string();
            return Some((owner, name));
        }
    }

    None
}

/// Gather repository metadata for a source-control URL.
///
/// An unparsable URL yields a warning naming it and an empty record. Core
/// fields try `gh api` first and fall back to the public REST API; the three
/// supplementary lookups are best-effort with no warning on failure.
pub async fn gather_repo_data(client: &Client, url: &str, diag: &mut Diagnostics) -> GithubData {
    let mut data = GithubData::default();

    let Some((owner, name)) = extract_repo_id(url) else {
        diag.warn(format!("Could not parse GitHub URL: {url}"));
        return data;
    };

    data.repository_url = Some(format!("https://github.com/{owner}/{name}"));

    let repo_path = format!("repos/{owner}/{name}");
    let out = run_command(&["gh", "api", &repo_path], COMMAND_TIMEOUT, diag).await;
    if out.success && !out.stdout.is_empty() {
        match serde_json::from_str::<RepoFields>(&out.stdout) {
            Ok(fields) => apply_repo_fields(&mut data, fields),
            Err(_) => diag.warn("Failed to parse gh api output"),
        }
    } else {
        let api_url = format!("https://api.github.com/repos/{owner}/{name}");
        if let Some(fields) = fetch_json::<RepoFields>(client, &api_url, diag).await {
            apply_repo_fields(&mut data, fields);
        }
    }

    // Supplementary lookups, silently skipped on failure.
    let profile_path = format!("repos/{owner}/{name}/community/profile");
    let out = run_command(&["gh", "api", &profile_path], COMMAND_TIMEOUT, diag).await;
    if out.success && !out.stdout.is_empty() {
        if let Ok(profile) = serde_json::from_str::<CommunityProfile>(&out.stdout) {
            data.community_health = Some(CommunityHealth {
                health_percentage: profile.health_percentage,
                files: profile.files,
            });
        }
    }

    let contributors_path = format!("repos/{owner}/{name}/contributors");
    let out = run_command(
        &["gh", "api", &contributors_path, "--jq", "length"],
        COMMAND_TIMEOUT,
        diag,
    )
    .await;
    let count = out.stdout.trim();
    if out.success && !count.is_empty() && count.chars().all(|c| c.is_ascii_digit()) {
        data.contributors_count = count.parse().ok();
    }

    let license_path = format!("repos/{owner}/{name}/license");
    let out = run_command(
        &["gh", "api", &license_path, "--jq", ".license.spdx_id"],
        COMMAND_TIMEOUT,
        diag,
    )
    .await;
    let spdx = out.stdout.trim();
    if out.success && !spdx.is_empty() {
        data.license_info = Some(LicenseInfo {
            spdx_id: spdx.to_string(),
        });
    }

    data
}

fn apply_repo_fields(data: &mut GithubData, fields: RepoFields) {
    data.pushed_at = Some(fields.pushed_at);
    data.open_issues_count = Some(fields.open_issues_count);
    data.stargazers_count = Some(fields.stargazers_count);
    data.forks_count = Some(fields.forks_count);
    data.watchers_count = Some(fields.watchers_count);
    data.default_branch = Some(fields.default_branch);
}
