//! One-call-per-operation facade over `ChatClient` and a `Transport`.
//!
//! Each method is a single independent round-trip: build, execute, parse.
//! Failures are logged with the operation's context prefix and then returned
//! unchanged to the caller.

use serde_json::Value;
use tracing::{debug, error};

use crate::client::ChatClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ChatMessage, NewChat, UploadFile};

#[derive(Debug, Clone)]
pub struct BackendApi<T = UreqTransport> {
    client: ChatClient,
    transport: T,
}

impl BackendApi<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Resolve the backend origin from `BACKEND_URL` (or `.env`).
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> BackendApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ChatClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Upload the candidate sheet and job description into `table_name`.
    /// Returns the `result` field of the backend's answer.
    pub fn create_new_chat(
        &self,
        candidates: UploadFile,
        job_description: UploadFile,
        table_name: &str,
    ) -> Result<Value, ApiError> {
        let input = NewChat {
            candidates,
            job_description,
            table_name: table_name.to_string(),
        };
        self.run(
            Operation::CreateNewChat,
            || self.client.build_create_new_chat(&input),
            |response| self.client.parse_create_new_chat(response),
        )
    }

    /// Ask `query` against `table_name`. Returns the `result` field.
    pub fn send_chat_message(&self, table_name: &str, query: &str) -> Result<Value, ApiError> {
        let input = ChatMessage {
            table_name: table_name.to_string(),
            query: query.to_string(),
        };
        self.run(
            Operation::SendChatMessage,
            || self.client.build_send_chat_message(&input),
            |response| self.client.parse_send_chat_message(response),
        )
    }

    /// Returns the backend's table listing verbatim.
    pub fn get_tables(&self) -> Result<Value, ApiError> {
        self.run(
            Operation::GetTables,
            || Ok(self.client.build_get_tables()),
            |response| self.client.parse_get_tables(response),
        )
    }

    fn run(
        &self,
        operation: Operation,
        build: impl FnOnce() -> Result<HttpRequest, ApiError>,
        parse: impl FnOnce(HttpResponse) -> Result<Value, ApiError>,
    ) -> Result<Value, ApiError> {
        let outcome = build().and_then(|request| {
            debug!(%operation, method = request.method.as_str(), url = %request.url, "sending request");
            let response = self.transport.execute(request)?;
            debug!(%operation, status = response.status, "received response");
            parse(response)
        });
        if let Err(err) = &outcome {
            error!(%operation, error = %err, "{}", operation.log_context());
        }
        outcome
    }
}
