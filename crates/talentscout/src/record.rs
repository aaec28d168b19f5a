use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use talentscout_core::{CandidateRecord, Turn};
use tokio::task::spawn_blocking;

use crate::session::SessionId;

/// A finished interview could not be exported.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing the file failed.
    #[error("failed to write interview record: {0}")]
    Io(#[from] io::Error),
    /// The record could not be serialized.
    #[error("failed to serialize interview record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The displayable summary of a finished interview.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterviewRecord {
    /// When the interview finished.
    pub timestamp: DateTime<Local>,
    /// The collected answers.
    pub candidate_data: CandidateRecord,
    /// Every message shown during the session, in order.
    pub conversation: Vec<Turn>,
}

impl InterviewRecord {
    /// Serializes the record as pretty-printed JSON.
    #[inline]
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the record into `dir` and returns the path of the new file.
    ///
    /// The directory is created if needed. The file is named after the
    /// session and the finish time, so records never overwrite each other
    /// within one process.
    pub async fn save_to_dir(
        &self,
        dir: &Path,
        session: SessionId,
    ) -> Result<PathBuf, ExportError> {
        let json = self.to_json_pretty()?;
        let file_name = format!(
            "interview-{}-{}.json",
            session.get(),
            self.timestamp.format("%Y%m%dT%H%M%S")
        );
        let path = dir.join(file_name);
        let dir = dir.to_owned();

        let written = path.clone();
        spawn_blocking(move || -> io::Result<()> {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(&written, json)
        })
        .await
        .map_err(io::Error::other)??;

        info!("saved interview record to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Value, json};
    use talentscout_core::Role;

    use super::*;

    fn sample() -> InterviewRecord {
        InterviewRecord {
            timestamp: Local.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            candidate_data: serde_json::from_value(json!({
                "name": "Alice",
                "email": "alice@example.com"
            }))
            .unwrap(),
            conversation: vec![
                Turn::new(Role::Assistant, "Hi! What's your name?"),
                Turn::new(Role::User, "Alice"),
            ],
        }
    }

    #[test]
    fn test_json_layout() {
        let value: Value =
            serde_json::from_str(&sample().to_json_pretty().unwrap()).unwrap();
        assert!(value["timestamp"].as_str().unwrap().starts_with("2026-03-01T09:30:00"));
        assert_eq!(
            value["candidate_data"],
            json!({ "name": "Alice", "email": "alice@example.com" })
        );
        assert_eq!(value["conversation"][1], json!({ "role": "user", "content": "Alice" }));
    }

    #[tokio::test]
    async fn test_save_to_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("records");
        let record = sample();

        let path = record.save_to_dir(&dir, SessionId::new(7)).await.unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "interview-7-20260301T093000.json"
        );
        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap())
                .unwrap();
        assert_eq!(saved["candidate_data"]["name"], "Alice");
    }
}
