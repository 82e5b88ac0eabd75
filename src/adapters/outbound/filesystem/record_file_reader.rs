use crate::shared::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// RecordFileReader adapter for loading normalized vendor records from disk
///
/// A record file holds one JSON array of vendor documents as produced by a
/// fetcher. The reader applies the same checks to every input file:
/// - Reject symbolic links
/// - Check file size limits
/// - Validate file is a regular file
pub struct RecordFileReader;

impl RecordFileReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses a JSON array of records
    pub fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        let content = self.safe_read_file(path)?;
        let records: Vec<T> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse records in {}", path.display()))?;
        tracing::debug!(path = %path.display(), records = records.len(), "Read record file");
        Ok(records)
    }

    fn safe_read_file(&self, path: &Path) -> Result<String> {
        // Get file metadata without following symlinks
        let metadata = fs::symlink_metadata(path)
            .with_context(|| format!("Failed to read record file metadata: {}", path.display()))?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                file_size,
                MAX_FILE_SIZE
            );
        }

        fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))
    }
}

impl Default for RecordFileReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cve_tracking::domain::{DebianCve, MicrosoftProduct};
    use tempfile::TempDir;

    #[test]
    fn test_read_records_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("debian.json");
        fs::write(
            &path,
            r#"[
  {
    "cve_id": "CVE-2023-0001",
    "package": [
      {"package_name": "bash", "release": [{"product_name": "bookworm", "status": "open"}]}
    ]
  }
]"#,
        )
        .unwrap();

        let records: Vec<DebianCve> = RecordFileReader::new().read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cve_id, "CVE-2023-0001");
        assert_eq!(records[0].package[0].release[0].status, "open");
    }

    #[test]
    fn test_read_records_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");
        fs::write(&path, "[]").unwrap();

        let records: Vec<MicrosoftProduct> = RecordFileReader::new().read_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_records_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result: Result<Vec<DebianCve>> =
            RecordFileReader::new().read_records(&temp_dir.path().join("missing.json"));

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Failed to read record file metadata"));
    }

    #[test]
    fn test_read_records_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<DebianCve>> = RecordFileReader::new().read_records(&path);
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Failed to parse records"));
        assert!(err_string.contains("broken.json"));
    }

    #[test]
    fn test_read_records_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result: Result<Vec<DebianCve>> = RecordFileReader::new().read_records(temp_dir.path());

        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("is not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_records_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        fs::write(&target, "[]").unwrap();
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result: Result<Vec<DebianCve>> = RecordFileReader::new().read_records(&link);
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("symbolic link"));
    }
}
