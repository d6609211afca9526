//! Client for the candidate-screening chat backend.
//!
//! # Overview
//! Three operations are exposed: upload a candidate sheet and job
//! description to start a new chat (`/newChat`), ask a question against a
//! table (`/chat`), and list the available tables (`/gettables`).
//!
//! # Design
//! - `ChatClient` is stateless and never touches the network. Each
//!   operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), so the I/O boundary is explicit.
//! - `Transport` executes requests; `UreqTransport` is the blocking default.
//! - `BackendApi` ties the two together, one round-trip per call, logging
//!   every failure through `tracing` before returning it.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::BackendApi;
pub use client::ChatClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{ChatMessage, NewChat, ResultEnvelope, UploadFile};
