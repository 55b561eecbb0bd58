//! JSON file store.
//!
//! Files are organized by local date, one file per stored batch:
//! `{output_dir}/{YYYY-MM-DD}/{label}_{HHMMSS}.json`.

use chrono::Local;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

use super::NewsStore;
use crate::error::GNewsError;
use crate::models::NewsRecord;
use crate::utils::{date_and_time, file_label};

/// Writes record batches as pretty-printed JSON under a root directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    output_dir: PathBuf,
}

impl JsonStore {
    /// # Arguments
    ///
    /// * `output_dir` - Root directory; dated subdirectories are created on write
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `records` and return the path of the file written.
    #[instrument(level = "info", skip_all, fields(output_dir = %self.output_dir.display(), %label))]
    pub async fn write(&self, label: &str, records: &[NewsRecord]) -> Result<PathBuf, GNewsError> {
        let json = serde_json::to_string_pretty(records)?;

        let (date, time) = date_and_time(Local::now());
        let dir = self.output_dir.join(&date);

        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(&dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }

        let path = dir.join(format!("{}_{}.json", file_label(label), time));
        fs::write(&path, json).await?;
        info!(path = %path.display(), count = records.len(), "Wrote news JSON");

        Ok(path)
    }
}

impl NewsStore for JsonStore {
    async fn insert(&self, label: &str, records: &[NewsRecord]) -> Result<usize, GNewsError> {
        self.write(label, records).await?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> NewsRecord {
        NewsRecord {
            title: format!("Story {n}"),
            description: "Desc".to_string(),
            published_date: "Tue, 02 Jan 2024 12:00:00 GMT".to_string(),
            url: format!("https://publisher.example/{n}"),
            publisher: "Publisher".to_string(),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gnews-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_write_creates_dated_file() {
        let dir = scratch_dir("json-write");
        let store = JsonStore::new(&dir);
        let records = vec![record(1), record(2)];

        let path = store.write("Climate Change", &records).await.unwrap();
        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("climate-change_"));
        assert!(name.ends_with(".json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<NewsRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
        assert!(text.contains("\"published date\""));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_insert_reports_count() {
        let dir = scratch_dir("json-insert");
        let store = JsonStore::new(&dir);
        assert_eq!(store.insert("top", &[record(1)]).await.unwrap(), 1);
        assert_eq!(store.insert("empty", &[]).await.unwrap(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
