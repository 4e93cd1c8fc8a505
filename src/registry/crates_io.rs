use reqwest::Client;
use serde::Deserialize;

use crate::diagnostics::Diagnostics;
use crate::fetch::fetch_json;
use crate::models::RegistryData;

/// `https://crates.io/api/v1/crates/<name>` envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CratesResponse {
    #[serde(rename = "crate")]
    krate: Option<CrateData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrateData {
    max_version: Option<String>,
    license: Option<String>,
    description: Option<String>,
    homepage: Option<String>,
    repository: Option<String>,
    downloads: u64,
    recent_downloads: u64,
}

/// `https://crates.io/api/v1/crates/<name>/versions` envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VersionsResponse {
    versions: Option<Vec<CrateVersion>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrateVersion {
    num: Option<String>,
}

/// Gather crates.io metadata: crate record first, then the version list.
/// The versions call is only issued once the crate record is in hand.
pub async fn gather(client: &Client, package: &str, diag: &mut Diagnostics) -> RegistryData {
    let url = format!("https://crates.io/api/v1/crates/{package}");
    let krate = match fetch_json::<CratesResponse>(client, &url, diag).await {
        Some(CratesResponse { krate: Some(krate) }) => krate,
        _ => return RegistryData::default(),
    };

    let mut data = from_crate(krate);

    let versions_url = format!("https://crates.io/api/v1/crates/{package}/versions");
    if let Some(VersionsResponse {
        versions: Some(versions),
    }) = fetch_json::<VersionsResponse>(client, &versions_url, diag).await
    {
        data.versions_count = Some(versions.len());
        data.all_versions = Some(
            versions
                .into_iter()
                .map(|v| v.num.unwrap_or_default())
                .collect(),
        );
    }

    data
}

fn from_crate(krate: CrateData) -> RegistryData {
    let mut data = RegistryData::default();
    data.latest_version = Some(krate.max_version.unwrap_or_default());
    data.license = Some(readable_license(&krate.license.unwrap_or_default()));
    data.description = Some(krate.description.unwrap_or_default());
    data.homepage = Some(krate.homepage.unwrap_or_default());
    data.repository_url = Some(krate.repository.unwrap_or_default());
    data.downloads = Some(krate.downloads);
    data.recent_downloads = Some(krate.recent_downloads);
    data
}

/// SPDX `OR` expressions read better as a plain comma list in a report.
fn readable_license(license: &str) -> String {
    license.split(" OR ").collect::<Vec<_>>().join(", ")
}
