use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a, T> {
    kind: &'a str,
    scraped_at: String,
    data: &'a T,
}

/// Writes `data` as a timestamped JSON snapshot.
pub fn save_snapshot<T: Serialize>(kind: &str, data: &T, path: &Path) -> Result<()> {
    let snapshot = Snapshot {
        kind,
        scraped_at: chrono::Utc::now().to_rfc3339(),
        data,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
