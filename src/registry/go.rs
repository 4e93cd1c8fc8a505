use serde::Deserialize;

use crate::diagnostics::Diagnostics;
use crate::exec::{run_command, COMMAND_TIMEOUT};
use crate::models::RegistryData;

/// `go list -m -json <module>` output.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoModule {
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "Time")]
    time: String,
}

/// Gather Go module metadata via the `go` CLI. There is no versions listing
/// here: the record is absent entirely when the lookup fails.
pub async fn gather(package: &str, diag: &mut Diagnostics) -> RegistryData {
    let mut data = RegistryData::default();

    let out = run_command(
        &["go", "list", "-m", "-json", package],
        COMMAND_TIMEOUT,
        diag,
    )
    .await;
    if out.success && !out.stdout.is_empty() {
        match serde_json::from_str::<GoModule>(&out.stdout) {
            Ok(module) => {
                data.module_path = Some(module.path);
                data.latest_version = Some(module.version);
                data.time = Some(module.time);
            }
            Err(_) => diag.warn("Failed to parse go list output"),
        }
    }

    data
}
