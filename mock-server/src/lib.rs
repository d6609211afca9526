use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use axum::http::StatusCode;

/// Everything the backend stored for one `/newChat` upload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Upload {
    pub csv: Vec<u8>,
    pub csv_file_name: Option<String>,
    pub pdf: Vec<u8>,
    pub pdf_file_name: Option<String>,
    pub candidates: usize,
}

#[derive(Debug, Default)]
struct Inner {
    tables: BTreeMap<String, Upload>,
    forced_status: Option<StatusCode>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub table_name: String,
    pub query: String,
}

/// Shared in-memory backend state, cloned into every handler.
#[derive(Clone, Debug, Default)]
pub struct MockBackend {
    inner: Arc<RwLock<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every endpoint answer `status` until cleared with `None`.
    pub async fn fail_with(&self, status: Option<StatusCode>) {
        self.inner.write().await.forced_status = status;
    }

    pub async fn upload(&self, table_name: &str) -> Option<Upload> {
        self.inner.read().await.tables.get(table_name).cloned()
    }

    pub async fn table_names(&self) -> Vec<String> {
        self.inner.read().await.tables.keys().cloned().collect()
    }
}

pub fn app() -> Router {
    app_with(MockBackend::new())
}

pub fn app_with(backend: MockBackend) -> Router {
    Router::new()
        .route("/newChat", post(new_chat))
        .route("/chat", post(chat))
        .route("/gettables", get(get_tables))
        .with_state(backend)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, backend: MockBackend) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(backend)).await
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn forced_failure(backend: &MockBackend) -> Option<Response> {
    let status = backend.inner.read().await.forced_status?;
    // Carries a plausible `result` so clients must not trust the body.
    Some((status, Json(json!({ "result": "forced failure" }))).into_response())
}

/// Data rows in a candidate sheet: non-empty lines after the header.
pub fn count_candidates(csv: &[u8]) -> usize {
    String::from_utf8_lossy(csv)
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .count()
}

async fn new_chat(State(backend): State<MockBackend>, mut multipart: Multipart) -> Response {
    if let Some(resp) = forced_failure(&backend).await {
        return resp;
    }

    let mut upload = Upload::default();
    let mut table_name = None;
    let (mut has_csv, mut has_pdf) = (false, false);

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.body_text()),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.body_text()),
        };
        match name.as_str() {
            "csv" => {
                upload.csv = bytes.to_vec();
                upload.csv_file_name = file_name;
                has_csv = true;
            }
            "pdf" => {
                upload.pdf = bytes.to_vec();
                upload.pdf_file_name = file_name;
                has_pdf = true;
            }
            "tableName" => table_name = Some(String::from_utf8_lossy(&bytes).into_owned()),
            other => warn!(field = other, "ignoring unknown form field"),
        }
    }

    let Some(table_name) = table_name.filter(|name| !name.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing tableName");
    };
    if !has_csv || !has_pdf {
        return error_response(StatusCode::BAD_REQUEST, "Both csv and pdf files are required");
    }

    upload.candidates = count_candidates(&upload.csv);
    let processed = upload.candidates;
    info!(table = %table_name, candidates = processed, "stored new chat upload");
    backend.inner.write().await.tables.insert(table_name, upload);

    Json(json!({
        "result": {
            "message": format!(
                "Processing completed successfully. {processed} candidates processed."
            )
        }
    }))
    .into_response()
}

async fn chat(State(backend): State<MockBackend>, Json(input): Json<ChatRequest>) -> Response {
    if let Some(resp) = forced_failure(&backend).await {
        return resp;
    }

    let inner = backend.inner.read().await;
    let Some(upload) = inner.tables.get(&input.table_name) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Table {} does not exist", input.table_name),
        );
    };
    let answer = format!(
        "Table {} has {} candidates. You asked: {}",
        input.table_name, upload.candidates, input.query
    );
    Json(json!({ "result": answer })).into_response()
}

async fn get_tables(State(backend): State<MockBackend>) -> Response {
    if let Some(resp) = forced_failure(&backend).await {
        return resp;
    }
    let tables: Vec<Value> = backend
        .table_names()
        .await
        .into_iter()
        .map(Value::String)
        .collect();
    Json(json!({ "tables": tables })).into_response()
}
