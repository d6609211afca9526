//! Stateless HTTP request builder and response parser for the screening
//! backend.
//!
//! # Design
//! `ChatClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (or `BackendApi`) executes the round-trip in
//! between, keeping this module deterministic and free of I/O.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::unversioned::multipart::{Form, Part};

use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ChatMessage, NewChat, ResultEnvelope, UploadFile};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the screening backend.
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ClientConfig,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The form is encoded up front with ureq's multipart `Form`, so the
    /// request stays plain data. Fields go out as `csv`, `pdf`, `tableName`.
    pub fn build_create_new_chat(&self, input: &NewChat) -> Result<HttpRequest, ApiError> {
        let mut form = Form::new()
            .part("csv", file_part(&input.candidates)?)
            .part("pdf", file_part(&input.job_description)?)
            .text("tableName", &input.table_name);
        let mut headers = self.config.headers.clone();
        headers.push((
            "content-type".to_string(),
            format!("multipart/form-data; boundary={}", form.boundary()),
        ));
        let mut body = Vec::new();
        form.read_to_end(&mut body)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url("/newChat"),
            headers,
            body: Some(body),
        })
    }

    pub fn build_send_chat_message(&self, input: &ChatMessage) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url("/chat"),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn build_get_tables(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url("/gettables"),
            headers: self.json_headers(),
            body: None,
        }
    }

    pub fn parse_create_new_chat(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response, Operation::CreateNewChat)?;
        let envelope: ResultEnvelope = parse_json(&response)?;
        Ok(envelope.result)
    }

    pub fn parse_send_chat_message(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response, Operation::SendChatMessage)?;
        let envelope: ResultEnvelope = parse_json(&response)?;
        Ok(envelope.result)
    }

    /// Unlike the other two operations, the whole body is returned rather
    /// than its `result` field.
    pub fn parse_get_tables(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response, Operation::GetTables)?;
        parse_json(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.config.headers.clone();
        headers.push(("content-type".to_string(), JSON.to_string()));
        headers
    }
}

fn file_part(file: &UploadFile) -> Result<Part<'_>, ApiError> {
    Part::bytes(&file.bytes)
        .file_name(&file.file_name)
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Serialization(format!("content type of {}: {e}", file.file_name)))
}

/// Any status outside 2xx becomes the operation's generic failure; the body
/// is ignored.
fn check_status(response: &HttpResponse, operation: Operation) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::RequestFailed(operation))
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
