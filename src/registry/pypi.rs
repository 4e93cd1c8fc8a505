use std::collections::BTreeMap;

use reqwest::Client;
use serde::Deserialize;

use crate::diagnostics::Diagnostics;
use crate::fetch::fetch_json;
use crate::models::RegistryData;

/// PyPI JSON API response (`https://pypi.org/pypi/<pkg>/json`), reduced to
/// the fields we surface. String fields may be `null` upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PypiResponse {
    info: PypiInfo,
    releases: BTreeMap<String, Vec<PypiRelease>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PypiInfo {
    version: Option<String>,
    license: Option<String>,
    summary: Option<String>,
    home_page: Option<String>,
    project_urls: Option<BTreeMap<String, Option<String>>>,
    project_url: Option<String>,
    author: Option<String>,
    keywords: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PypiRelease {
    upload_time: Option<String>,
}

/// Gather PyPI metadata from a single JSON API call.
pub async fn gather(client: &Client, package: &str, diag: &mut Diagnostics) -> RegistryData {
    let url = format!("https://pypi.org/pypi/{package}/json");
    let Some(response) = fetch_json::<PypiResponse>(client, &url, diag).await else {
        return RegistryData::default();
    };
    from_response(response)
}

fn from_response(response: PypiResponse) -> RegistryData {
    let info = response.info;
    let mut data = RegistryData::default();

    data.latest_version = Some(info.version.unwrap_or_default());
    data.license = Some(info.license.unwrap_or_default());
    data.description = Some(info.summary.unwrap_or_default());
    data.homepage = Some(info.home_page.unwrap_or_default());

    // Prefer the curated "Source" project URL; fall back to the generic one.
    let source = info
        .project_urls
        .as_ref()
        .and_then(|urls| urls.get("Source").cloned().flatten());
    data.repository_url = Some(source.or(info.project_url).unwrap_or_default());

    data.author = Some(info.author.unwrap_or_default());
    data.keywords = Some(match info.keywords.as_deref() {
        Some(keywords) if !keywords.is_empty() => {
            keywords.split(',').map(str::to_string).collect()
        }
        _ => Vec::new(),
    });

    data.versions_count = Some(response.releases.len());
    data.publish_history = Some(
        response
            .releases
            .into_iter()
            .map(|(version, files)| {
                let uploaded = files
                    .first()
                    .and_then(|f| f.upload_time.clone())
                    .unwrap_or_default();
                (version, uploaded)
            })
            .collect(),
    );

    data
}
