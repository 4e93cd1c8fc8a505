use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// The four package ecosystems the evaluator understands.
///
/// Dispatch over this enum is exhaustive; anything that fails [`Ecosystem::parse`]
/// becomes the single "Unsupported ecosystem" error in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Npm,
    Pypi,
    Cargo,
    Go,
}

impl Ecosystem {
    /// Case-insensitive parse of an ecosystem tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "npm" => Some(Ecosystem::Npm),
            "pypi" => Some(Ecosystem::Pypi),
            "cargo" => Some(Ecosystem::Cargo),
            "go" => Some(Ecosystem::Go),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
            Ecosystem::Pypi => write!(f, "pypi"),
            Ecosystem::Cargo => write!(f, "cargo"),
            Ecosystem::Go => write!(f, "go"),
        }
    }
}

/// Final evaluation report, printed as pretty JSON on stdout.
///
/// Field order here is the wire order. `ecosystem` keeps the lowercased raw
/// tag even when it failed validation, so the report always echoes what was
/// asked for.
#[derive(Debug, Serialize)]
pub struct Evaluation {
    pub package: String,
    pub ecosystem: String,
    pub timestamp: String,
    pub registry_data: RegistryData,
    pub github_data: GithubData,
    pub security_data: SecurityData,
    pub dependency_footprint: DependencyFootprint,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Evaluation {
    pub fn new(package: &str, ecosystem_tag: &str) -> Self {
        Evaluation {
            package: package.to_string(),
            ecosystem: ecosystem_tag.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            registry_data: RegistryData::default(),
            github_data: GithubData::default(),
            security_data: SecurityData::default(),
            dependency_footprint: DependencyFootprint::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Normalized registry metadata, shared by all four ecosystem adapters.
///
/// Every field is optional and skipped when absent: a field only appears in
/// the output when the call that produces it succeeded. An adapter whose
/// primary source is unavailable leaves the whole record empty (`{}`), which
/// is distinct from an evaluation error.
#[derive(Debug, Default, Serialize)]
pub struct RegistryData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// npm only; upstream shape passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// PyPI only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// crates.io only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_downloads: Option<u64>,
    /// Go modules only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// version → first publish timestamp ("" when unknown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_history: Option<std::collections::BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_versions: Option<Vec<String>>,
}

/// Repository metadata gathered via `gh` with a REST fallback.
#[derive(Debug, Default, Serialize)]
pub struct GithubData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_health: Option<CommunityHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_info: Option<LicenseInfo>,
}

#[derive(Debug, Serialize)]
pub struct CommunityHealth {
    pub health_percentage: i64,
    pub files: Value,
}

#[derive(Debug, Serialize)]
pub struct LicenseInfo {
    pub spdx_id: String,
}

/// Placeholder: isolated evaluation has no package manifest to audit against,
/// so this section stays empty and npm gets an explanatory warning.
#[derive(Debug, Default, Serialize)]
pub struct SecurityData {}

/// Placeholder dependency-tree stats; resolving a real tree would require the
/// package to be installed locally. Defaults to an empty section; the
/// evaluator fills in [`DependencyFootprint::placeholder`] for supported
/// ecosystems.
#[derive(Debug, Default, Serialize)]
pub struct DependencyFootprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_dependencies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_dependencies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_depth: Option<u32>,
}

impl DependencyFootprint {
    pub fn placeholder() -> Self {
        DependencyFootprint {
            direct_dependencies: Some(0),
            total_dependencies: Some(0),
            tree_depth: Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecosystem_parse_case_insensitive() {
        assert_eq!(Ecosystem::parse("NPM"), Some(Ecosystem::Npm));
        assert_eq!(Ecosystem::parse("PyPI"), Some(Ecosystem::Pypi));
        assert_eq!(Ecosystem::parse("cargo"), Some(Ecosystem::Cargo));
        assert_eq!(Ecosystem::parse("Go"), Some(Ecosystem::Go));
        assert_eq!(Ecosystem::parse("maven"), None);
        assert_eq!(Ecosystem::parse(""), None);
    }

    #[test]
    fn test_empty_registry_data_serializes_to_empty_object() {
        let data = RegistryData::default();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_absent_fields_are_omitted_not_null() {
        let data = RegistryData {
            latest_version: Some("1.0.0".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json, serde_json::json!({"latest_version": "1.0.0"}));
        assert!(json.get("license").is_none());
    }

    #[test]
    fn test_footprint_placeholder_shape() {
        let json = serde_json::to_value(DependencyFootprint::placeholder()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "direct_dependencies": 0,
                "total_dependencies": 0,
                "tree_depth": 1
            })
        );
        // Until the stub runs, the section is empty.
        let empty = serde_json::to_value(DependencyFootprint::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn test_timestamp_is_utc_with_z_suffix() {
        let eval = Evaluation::new("lodash", "npm");
        assert!(eval.timestamp.ends_with('Z'));
        assert!(eval.timestamp.contains('T'));
    }
}
