//! Request and response payloads for the screening backend.
//!
//! # Design
//! These types mirror what the mock-server accepts but are defined
//! independently; integration tests catch drift between the two crates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A file to upload as one part of a multipart form.
///
/// No validation is applied to the name, type or size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: &str, content_type: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Read `path` from disk, guessing the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            content_type: guess_content_type(path).to_string(),
            file_name,
            bytes,
        })
    }
}

fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Upload that creates a new chat: the candidate sheet, the job description
/// and the table the backend should load the candidates into.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub candidates: UploadFile,
    pub job_description: UploadFile,
    pub table_name: String,
}

/// JSON body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub table_name: String,
    pub query: String,
}

/// `{"result": ...}` wrapper returned by `/newChat` and `/chat`.
///
/// An absent `result` deserializes to `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default)]
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_uses_camel_case_keys() {
        let msg = ChatMessage {
            table_name: "T".to_string(),
            query: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"tableName":"T","query":"hello"}"#
        );
    }

    #[test]
    fn envelope_without_result_is_null() {
        let env: ResultEnvelope = serde_json::from_str(r#"{"other":1}"#).unwrap();
        assert!(env.result.is_null());
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        assert_eq!(guess_content_type(Path::new("people.CSV")), "text/csv");
        assert_eq!(guess_content_type(Path::new("jd.pdf")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn from_path_reads_file_and_name() {
        let path = std::env::temp_dir().join(format!("chat-core-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, "name,email\nAda,ada@example.com\n").unwrap();
        let file = UploadFile::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(file.content_type, "text/csv");
        assert!(file.file_name.starts_with("chat-core-"));
        assert_eq!(file.bytes, b"name,email\nAda,ada@example.com\n");
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = UploadFile::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
