use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::exec::{run_command, COMMAND_TIMEOUT};
use crate::models::RegistryData;

/// `npm view <pkg> --json` output, reduced to the fields we surface.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NpmView {
    version: String,
    license: Value,
    description: String,
    homepage: String,
    repository: Repository,
    maintainers: Value,
    keywords: Vec<String>,
}

/// npm publishes `repository` either as a bare URL string or as
/// `{ "type": ..., "url": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repository {
    Url(String),
    Details {
        #[serde(default)]
        url: String,
    },
}

impl Default for Repository {
    fn default() -> Self {
        Repository::Url(String::new())
    }
}

impl Repository {
    fn url(&self) -> &str {
        match self {
            Repository::Url(url) => url,
            Repository::Details { url } => url,
        }
    }
}

/// `npm view <pkg> versions --json` yields a list, or a bare string for
/// packages with a single release.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionList {
    Many(Vec<String>),
    One(String),
}

/// Gather npm metadata via three `npm view` invocations: package metadata,
/// publish-time history, and the version list. Each call is independently
/// best-effort; a failed or unparsable call only drops its own fields.
pub async fn gather(package: &str, diag: &mut Diagnostics) -> RegistryData {
    let mut data = RegistryData::default();

    let out = run_command(&["npm", "view", package, "--json"], COMMAND_TIMEOUT, diag).await;
    if out.success && !out.stdout.is_empty() {
        match serde_json::from_str::<NpmView>(&out.stdout) {
            Ok(view) => {
                data.latest_version = Some(view.version);
                data.license = Some(license_string(&view.license));
                data.description = Some(view.description);
                data.homepage = Some(view.homepage);
                data.repository_url = Some(view.repository.url().to_string());
                data.maintainers = Some(view.maintainers);
                data.keywords = Some(view.keywords);
            }
            Err(_) => diag.warn("Failed to parse npm view output"),
        }
    }

    let out = run_command(
        &["npm", "view", package, "time", "--json"],
        COMMAND_TIMEOUT,
        diag,
    )
    .await;
    if out.success && !out.stdout.is_empty() {
        match serde_json::from_str::<BTreeMap<String, String>>(&out.stdout) {
            Ok(times) => {
                // "created" and "modified" are registry bookkeeping, not releases.
                data.versions_count = Some(
                    times
                        .keys()
                        .filter(|k| k.as_str() != "created" && k.as_str() != "modified")
                        .count(),
                );
                data.publish_history = Some(times);
            }
            Err(_) => diag.warn("Failed to parse npm time output"),
        }
    }

    let out = run_command(
        &["npm", "view", package, "versions", "--json"],
        COMMAND_TIMEOUT,
        diag,
    )
    .await;
    if out.success && !out.stdout.is_empty() {
        match serde_json::from_str::<VersionList>(&out.stdout) {
            Ok(VersionList::Many(versions)) => data.all_versions = Some(versions),
            Ok(VersionList::One(version)) => data.all_versions = Some(vec![version]),
            Err(_) => diag.warn("Failed to parse npm versions output"),
        }
    }

    data
}

/// npm license fields are usually SPDX strings, but legacy packages carry
/// `{ "type": ..., "url": ... }` objects. Anything non-string renders empty.
fn license_string(license: &Value) -> String {
    license.as_str().unwrap_or_default().to_string()
}
